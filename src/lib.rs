//! dynproxy - Dynamic proxies for a reflective object model
//!
//! # Overview
//!
//! A proxy is an object whose class is synthesized at runtime to implement a
//! list of interfaces (and optionally extend one class). Every call on it is
//! routed to a single handler:
//!
//! - **Delegator**: forwards to an object fetched from an `ObjectProvider`
//!   on each call
//! - **Interceptor**: hands an `Invocation` to an `Interceptor`, which may
//!   proceed to a fixed target any number of times
//! - **Invoker**: hands the raw call to an `Invoker`
//!
//! Proxy classes are cached per type loader and ordered type list, so
//! proxies for the same types share a class.
//!
//! # Quick Start
//!
//! ```ignore
//! use dynproxy::{ProxyFactory, Value, ValueType, stdlib};
//!
//! let factory = ProxyFactory::default();
//! let comparable = stdlib::bootstrap().comparable().clone();
//!
//! // Delegate every call to the string "b".
//! let proxy = factory.create_delegator_proxy(
//!     None,
//!     dynproxy::proxy::provider::from_fn(|| Ok(Value::str("b"))),
//!     &[comparable],
//! )?;
//!
//! let result = Value::Object(proxy)
//!     .invoke("compareTo", [ValueType::object()], vec![Value::str("a")])?;
//! assert_eq!(result, Value::Int(1));
//! ```
//!
//! # Typed Interfaces
//!
//! Declare interfaces as Rust traits with `#[proxy_interface]` and call
//! proxies through the trait. The expansion names `dynproxy_core` unless
//! told otherwise, so crates that only depend on `dynproxy` pass
//! `crate = "dynproxy"`:
//!
//! ```ignore
//! use dynproxy::{ObjectRef, Throwable, proxy_interface};
//!
//! #[proxy_interface(name = "demo.Greeter", crate = "dynproxy")]
//! pub trait Greeter {
//!     fn greet(&self, name: String) -> Result<String, Throwable>;
//! }
//!
//! let greeter = GreeterInterface::define(&loader)?;
//! let proxy: ObjectRef = factory.create_invoker_proxy(Some(&loader), invoker, &[greeter])?;
//! let text = proxy.greet("ada".to_string())?;
//! ```

mod error_renderer;

// Re-export the public API from dynproxy_core
pub use dynproxy_core::*;

pub use dynproxy_macros::proxy_interface;

pub use error_renderer::{render_error, render_error_to_string, render_throwable};
