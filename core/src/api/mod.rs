//! Public API for creating proxies.
//!
//! [`ProxyFactory`] is the entry point: it picks a backend, owns the class
//! cache, and builds delegating, intercepting, and invoking proxies.
//!
//! # Example
//!
//! ```
//! use dynproxy_core::api::{FactoryOptions, ProxyFactory};
//! use dynproxy_core::proxy::provider;
//! use dynproxy_core::{Value, ValueType, stdlib};
//!
//! let factory = ProxyFactory::new(FactoryOptions::default());
//! let comparable = stdlib::bootstrap().comparable().clone();
//!
//! let proxy = factory
//!     .create_delegator_proxy(None, provider::from_fn(|| Ok(Value::str("b"))), &[comparable])
//!     .unwrap();
//! let result = Value::Object(proxy)
//!     .invoke("compareTo", [ValueType::object()], vec![Value::str("a")])
//!     .unwrap();
//! assert_eq!(result, Value::Int(1));
//! ```

pub mod error;
pub mod factory;
pub mod options;

pub use error::ProxyError;
pub use factory::ProxyFactory;
pub use options::FactoryOptions;
