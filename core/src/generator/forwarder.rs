use std::sync::Arc;

use crate::proxy::ProxyInstance;
use crate::reflect;
use crate::throwable::Throwable;
use crate::types::{MethodDescriptor, MethodRef};
use crate::values::Value;

/// Redeclares `method` on the proxy class `class_name` with a body that
/// forwards to the receiver's handler.
///
/// The handler sees the original descriptor, so it reports the interface or
/// superclass that declared the method, not the proxy class.
pub(super) fn forwarding_method(class_name: &str, method: &MethodRef) -> MethodRef {
    let target = method.clone();
    let body = move |this: &Value, args: &[Value]| -> Result<Value, Throwable> {
        let proxy = this.as_object().ok_or_else(|| {
            Throwable::illegal_argument(format!("{} is not a proxy", this.type_name()))
        })?;
        let instance = ProxyInstance::from_object(proxy).ok_or_else(|| {
            Throwable::illegal_argument(format!("{} is not a proxy", this.type_name()))
        })?;

        reflect::check_arguments(&target, args)?;

        match instance.handler().dispatch(proxy, &target, args) {
            Ok(result) => target.return_type().coerce(result),
            Err(thrown) => Err(shape_failure(&target, thrown)),
        }
    };
    Arc::new(method.redeclare(class_name, Arc::new(body)))
}

/// What a proxied call may raise, given what the handler raised.
///
/// Invocation-target wrappers are stripped. Unchecked throwables and
/// instances of declared exceptions pass through; any other checked
/// throwable is wrapped in `UndeclaredThrowableException`.
pub(super) fn shape_failure(method: &MethodDescriptor, thrown: Throwable) -> Throwable {
    let thrown = thrown.unwrap_invocation_target();
    if thrown.is_unchecked() || method.declares(&thrown) {
        thrown
    } else {
        Throwable::undeclared(thrown)
    }
}
