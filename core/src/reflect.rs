//! Reflective method invocation.

use crate::throwable::Throwable;
use crate::types::{MethodDescriptor, MethodSignature, ValueType};
use crate::values::{ObjectRef, Value};

/// Invokes `method` on `target`, dispatching virtually on the target's
/// runtime class.
///
/// Whatever the selected body raises comes back wrapped in an
/// `InvocationTargetException`; problems with the call itself (null target,
/// wrong receiver or arguments, no implementation) are raised directly.
pub fn invoke(method: &MethodDescriptor, target: &Value, args: &[Value]) -> Result<Value, Throwable> {
    let class = target.runtime_class().ok_or_else(|| {
        Throwable::null_pointer(format!(
            "cannot invoke {}.{} on null",
            method.declaring_type(),
            method.name()
        ))
    })?;

    if !class.is_subtype_of(method.declaring_type()) {
        return Err(Throwable::illegal_argument(
            "object is not an instance of declaring class",
        ));
    }

    check_arguments(method, args)?;

    let signature = method.signature();
    let implementation = class.find_implementation(&signature).ok_or_else(|| {
        Throwable::abstract_method(format!("{}.{}", class.name(), signature))
    })?;
    let body = implementation.body().ok_or_else(|| {
        Throwable::abstract_method(format!("{}.{}", class.name(), signature))
    })?;

    body(target, args).map_err(Throwable::invocation_target)
}

/// Validates argument count and types against the method's parameters.
pub fn check_arguments(method: &MethodDescriptor, args: &[Value]) -> Result<(), Throwable> {
    if args.len() != method.params().len() {
        return Err(Throwable::illegal_argument(format!(
            "wrong number of arguments for {}: expected {}, got {}",
            method.name(),
            method.params().len(),
            args.len()
        )));
    }
    for (i, (param, arg)) in method.params().iter().zip(args).enumerate() {
        if !param.accepts(arg) {
            return Err(Throwable::illegal_argument(format!(
                "argument {} of {}: {} is not a {}",
                i,
                method.name(),
                arg.type_name(),
                param
            )));
        }
    }
    Ok(())
}

/// Looks up the public method `name(params)` on the receiver's runtime class
/// and invokes it, raising what the body raised.
pub fn call(
    receiver: &Value,
    name: &str,
    params: impl IntoIterator<Item = ValueType>,
    args: Vec<Value>,
) -> Result<Value, Throwable> {
    let signature = MethodSignature::new(name, params);
    let class = receiver.runtime_class().ok_or_else(|| {
        Throwable::null_pointer(format!("cannot invoke {} on null", signature))
    })?;
    let method = class
        .find_method(&signature)
        .ok_or_else(|| Throwable::no_such_method(format!("{}.{}", class.name(), signature)))?;
    invoke(&method, receiver, &args).map_err(Throwable::unwrap_invocation_target)
}

/// [`call`] with an object receiver.
pub fn call_object(
    receiver: &ObjectRef,
    name: &str,
    params: impl IntoIterator<Item = ValueType>,
    args: Vec<Value>,
) -> Result<Value, Throwable> {
    call(&Value::Object(receiver.clone()), name, params, args)
}
