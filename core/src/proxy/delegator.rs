use super::provider::ObjectProvider;
use crate::reflect;
use crate::throwable::Throwable;
use crate::types::MethodDescriptor;
use crate::values::Value;

/// Fetches the target and invokes `method` on it, raising what the target
/// raised.
pub(super) fn dispatch(
    provider: &dyn ObjectProvider,
    method: &MethodDescriptor,
    args: &[Value],
) -> Result<Value, Throwable> {
    let target = provider.get_object()?;
    reflect::invoke(method, &target, args).map_err(Throwable::unwrap_invocation_target)
}
