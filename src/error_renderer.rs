//! Error rendering using miette
//!
//! Proxy creation errors are rendered as diagnostics; throwables raised from
//! proxied calls are rendered with their chain of causes.

use core::fmt::Write as _;

use miette::{GraphicalReportHandler, GraphicalTheme};

use crate::{ProxyError, Throwable};

/// Render an error to stderr
pub fn render_error(error: &ProxyError) {
    eprint!("{}", render(error, GraphicalTheme::unicode()));
}

/// Render an error to a String without color codes (useful for tests and logs)
///
/// # Example
/// ```no_run
/// use dynproxy::{ProxyFactory, render_error_to_string, stdlib};
///
/// let factory = ProxyFactory::default();
/// let string = stdlib::bootstrap().string().clone();
/// if let Err(e) = factory.proxy_class(None, &[string]) {
///     println!("{}", render_error_to_string(&e));
/// }
/// ```
pub fn render_error_to_string(error: &ProxyError) -> String {
    render(error, GraphicalTheme::unicode_nocolor())
}

fn render(error: &ProxyError, theme: GraphicalTheme) -> String {
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(theme);
    if handler.render_report(&mut out, error).is_err() {
        // Fall back to the plain message.
        out = format!("{}\n", error);
    }
    out
}

/// Render a throwable and its causes, one per line
///
/// ```text
/// java.lang.reflect.UndeclaredThrowableException
/// Caused by: demo.QuotaException: over limit
/// ```
pub fn render_throwable(throwable: &Throwable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", throwable);
    let mut cause = throwable.cause();
    while let Some(current) = cause {
        let _ = writeln!(out, "Caused by: {}", current);
        cause = current.cause();
    }
    out
}
