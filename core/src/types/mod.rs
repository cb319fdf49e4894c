//! Runtime type descriptors: the reflective view proxies are built from.

mod builder;
mod descriptor;
mod loader;
mod method;
mod signature;
mod type_set;
mod value_type;


pub use builder::TypeBuilder;
pub use descriptor::{Constructor, StateInit, TypeDescriptor, TypeKind, TypeRef, Visibility};
pub use loader::{ContextGuard, LoaderId, TypeLoader, WeakTypeLoader};
pub use method::{MethodBody, MethodDescriptor, MethodRef, MethodSpec};
pub use signature::{MethodSignature, Params};
pub use type_set::TypeSet;
pub use value_type::ValueType;
