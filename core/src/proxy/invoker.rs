use crate::throwable::Throwable;
use crate::types::MethodRef;
use crate::values::{ObjectRef, Value};

/// Low-level handler: receives every call on an invoking proxy as is.
pub trait Invoker: Send + Sync {
    fn invoke(&self, proxy: &ObjectRef, method: &MethodRef, args: &[Value])
    -> Result<Value, Throwable>;
}

impl<F> Invoker for F
where
    F: Fn(&ObjectRef, &MethodRef, &[Value]) -> Result<Value, Throwable> + Send + Sync,
{
    fn invoke(
        &self,
        proxy: &ObjectRef,
        method: &MethodRef,
        args: &[Value],
    ) -> Result<Value, Throwable> {
        self(proxy, method, args)
    }
}

/// An invoker backed by a closure.
pub fn from_fn<F>(f: F) -> impl Invoker
where
    F: Fn(&ObjectRef, &MethodRef, &[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
{
    f
}

/// Answers every call with the zero value of its return type: `0`, `false`,
/// `'\0'`, or null.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInvoker;

impl Invoker for NullInvoker {
    fn invoke(
        &self,
        _proxy: &ObjectRef,
        method: &MethodRef,
        _args: &[Value],
    ) -> Result<Value, Throwable> {
        Ok(method.return_type().default_value())
    }
}
