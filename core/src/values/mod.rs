pub mod convert;
mod object;
mod value;

pub use convert::{FromValue, IntoValue, Typed};
pub use object::{Instance, Object, ObjectRef, identity_hash, same_object};
pub use value::Value;
pub(crate) use value::string_hash;

#[cfg(test)]
mod convert_test;
