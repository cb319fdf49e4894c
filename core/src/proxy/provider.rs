//! Suppliers of delegation targets.

use crate::throwable::Throwable;
use crate::values::Value;

/// Supplies the object a delegating proxy forwards to, once per call.
///
/// Providers may cache or create targets as they like; whatever they raise
/// is raised from the proxied call.
pub trait ObjectProvider: Send + Sync {
    fn get_object(&self) -> Result<Value, Throwable>;
}

impl<F> ObjectProvider for F
where
    F: Fn() -> Result<Value, Throwable> + Send + Sync,
{
    fn get_object(&self) -> Result<Value, Throwable> {
        self()
    }
}

/// A provider backed by a closure.
pub fn from_fn<F>(f: F) -> impl ObjectProvider
where
    F: Fn() -> Result<Value, Throwable> + Send + Sync + 'static,
{
    f
}
