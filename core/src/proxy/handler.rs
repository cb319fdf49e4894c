use core::fmt;
use std::sync::Arc;

use super::delegator;
use super::interceptor::{self, Interceptor};
use super::invoker::Invoker;
use super::provider::ObjectProvider;
use crate::throwable::Throwable;
use crate::types::MethodRef;
use crate::values::{ObjectRef, Value, identity_hash};

/// Where a proxy sends its calls.
///
/// Every variant answers `equals(Object)` by reference identity with the
/// proxy and `hashCode()` with the proxy's identity hash before the variant
/// sees the call, so proxies behave like plain objects in identity-keyed
/// containers no matter what the target or handler would answer.
#[derive(Clone)]
pub enum Handler {
    /// Invokes the method on the object the provider supplies.
    Delegator { provider: Arc<dyn ObjectProvider> },
    /// Passes an [`Invocation`](super::Invocation) for `target` to the interceptor.
    Interceptor {
        target: Value,
        interceptor: Arc<dyn Interceptor>,
    },
    /// Hands the raw call to the invoker.
    Invoker { invoker: Arc<dyn Invoker> },
}

static_assertions::assert_impl_all!(Handler: Send, Sync);

impl Handler {
    pub fn delegator(provider: impl ObjectProvider + 'static) -> Self {
        Handler::Delegator {
            provider: Arc::new(provider),
        }
    }

    pub fn interceptor(target: Value, interceptor: impl Interceptor + 'static) -> Self {
        Handler::Interceptor {
            target,
            interceptor: Arc::new(interceptor),
        }
    }

    pub fn invoker(invoker: impl Invoker + 'static) -> Self {
        Handler::Invoker {
            invoker: Arc::new(invoker),
        }
    }

    /// The single entry point every forwarder calls.
    pub fn dispatch(
        &self,
        proxy: &ObjectRef,
        method: &MethodRef,
        args: &[Value],
    ) -> Result<Value, Throwable> {
        if method.is_equals() {
            let same = args.first().is_some_and(|other| other.is_same_object(proxy));
            return Ok(Value::Bool(same));
        }
        if method.is_hash_code() {
            return Ok(Value::Int(identity_hash(proxy)));
        }

        match self {
            Handler::Delegator { provider } => delegator::dispatch(provider.as_ref(), method, args),
            Handler::Interceptor {
                target,
                interceptor,
            } => interceptor::dispatch(interceptor.as_ref(), proxy, target, method, args),
            Handler::Invoker { invoker } => invoker.invoke(proxy, method, args),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Delegator { .. } => write!(f, "Delegator"),
            Handler::Interceptor { target, .. } => write!(f, "Interceptor({:?})", target),
            Handler::Invoker { .. } => write!(f, "Invoker"),
        }
    }
}
