//! Proxy instances and the handlers their calls are routed to.

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::generator::ProxyClass;
use crate::types::TypeRef;
use crate::values::{Object, ObjectRef, Value};

mod delegator;
mod handler;
pub mod interceptor;
pub mod invoker;
pub mod provider;


pub use handler::Handler;
pub use interceptor::{FilteredInterceptor, Interceptor, InterceptorChain, Invocation};
pub use invoker::{Invoker, NullInvoker};
pub use provider::ObjectProvider;

/// An instance of a generated proxy class.
pub struct ProxyInstance {
    class: Arc<ProxyClass>,
    handler: Handler,
    state: Option<Box<dyn Any + Send + Sync>>,
}

static_assertions::assert_impl_all!(ProxyInstance: Send, Sync);

impl ProxyInstance {
    pub(crate) fn new(
        class: Arc<ProxyClass>,
        handler: Handler,
        state: Option<Box<dyn Any + Send + Sync>>,
    ) -> Self {
        Self {
            class,
            handler,
            state,
        }
    }

    pub fn from_object(object: &ObjectRef) -> Option<&ProxyInstance> {
        object.downcast_ref::<ProxyInstance>()
    }

    pub fn from_value(value: &Value) -> Option<&ProxyInstance> {
        value.as_object().and_then(Self::from_object)
    }

    pub fn proxy_class(&self) -> &Arc<ProxyClass> {
        &self.class
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }
}

impl Object for ProxyInstance {
    fn class(&self) -> &TypeRef {
        self.class.descriptor()
    }

    fn state(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.state.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for ProxyInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyInstance")
            .field("class", &self.class.name())
            .field("handler", &self.handler)
            .finish()
    }
}

/// Whether `value` is a proxy instance.
pub fn is_proxy(value: &Value) -> bool {
    ProxyInstance::from_value(value).is_some()
}
