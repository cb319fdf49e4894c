//! Dynamic proxies over a small reflective object model.
//!
//! A proxy is an object of a runtime-synthesized class that implements a
//! requested set of interfaces (and optionally extends one class) and routes
//! every call through a single [`Handler`](proxy::Handler): a delegator, an
//! interceptor bridge, or a raw invoker.
//!
//! The crate is organized bottom-up:
//!
//! - [`types`], [`values`], [`throwable`], [`reflect`]: the object model that
//!   proxies live in (type descriptors, dynamic values, exceptions, and
//!   reflective method invocation).
//! - [`stdlib`]: the bootstrap types every loader can see.
//! - [`resolver`], [`generator`], [`cache`]: building proxy classes and
//!   caching them per loader and type set.
//! - [`proxy`], [`filter`]: proxy instances, handlers, and collaborators.
//! - [`api`]: the [`ProxyFactory`](api::ProxyFactory) facade.

pub mod api;
pub mod cache;
pub mod filter;
pub mod generator;
pub mod proxy;
pub mod reflect;
pub mod resolver;
pub mod stdlib;
pub mod throwable;
pub mod types;
pub mod values;

mod sync;

pub use api::{FactoryOptions, ProxyError, ProxyFactory};
pub use proxy::{Handler, Interceptor, Invocation, Invoker, ObjectProvider};
pub use throwable::Throwable;
pub use types::{
    MethodDescriptor, MethodRef, MethodSignature, MethodSpec, TypeBuilder, TypeDescriptor,
    TypeLoader, TypeRef, TypeSet, ValueType,
};
pub use values::{FromValue, IntoValue, Object, ObjectRef, Value};

#[cfg(test)]
pub(crate) mod testing {
    use tracing_subscriber::EnvFilter;

    /// Routes this crate's `tracing` events into the captured test output.
    ///
    /// `RUST_LOG` overrides the default `dynproxy_core=debug` filter. Only the
    /// first call in a test binary installs the subscriber.
    pub fn enable_tracing() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("dynproxy_core=debug"));
        let _already_set = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}
