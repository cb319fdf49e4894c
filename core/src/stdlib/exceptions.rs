//! Exception classes. They carry no methods; a raised exception is a
//! [`Throwable`](crate::throwable::Throwable) naming one of these classes.

use std::sync::Arc;

use super::names;
use crate::types::{TypeBuilder, TypeRef};

pub(super) fn throwable(object: &TypeRef, serializable: &TypeRef) -> TypeRef {
    Arc::new(
        TypeBuilder::class(names::THROWABLE)
            .extends(object)
            .implements(serializable)
            .build_unchecked(),
    )
}

pub(super) fn subclass(name: &str, superclass: &TypeRef) -> TypeRef {
    Arc::new(TypeBuilder::class(name).extends(superclass).build_unchecked())
}
