//! Boxing and unboxing between Rust types and [`Value`].
//!
//! These traits back typed facades over reflective calls: arguments are
//! boxed with [`IntoValue`], results unboxed with [`FromValue`], and both
//! report the [`ValueType`] used in the method signature.

use ecow::EcoString;

use super::{ObjectRef, Value};
use crate::stdlib::names;
use crate::throwable::Throwable;
use crate::types::ValueType;

/// Rust types with a fixed counterpart in method signatures.
pub trait Typed {
    fn value_type() -> ValueType;
}

pub trait IntoValue: Typed {
    fn into_value(self) -> Value;
}

pub trait FromValue: Typed + Sized {
    fn from_value(value: Value) -> Result<Self, Throwable>;
}

fn cast_error(value: &Value, target: &str) -> Throwable {
    if value.is_null() {
        Throwable::null_pointer(format!("cannot unbox null as {}", target))
    } else {
        Throwable::class_cast(format!(
            "{} cannot be cast to {}",
            value.type_name(),
            target
        ))
    }
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident, $value_type:ident);* $(;)?) => {
        $(
            impl Typed for $ty {
                fn value_type() -> ValueType {
                    ValueType::$value_type
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, Throwable> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(cast_error(&other, ValueType::$value_type.name())),
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool, Boolean;
    i8 => Byte, Byte;
    i16 => Short, Short;
    char => Char, Char;
    i32 => Int, Int;
    i64 => Long, Long;
    f32 => Float, Float;
    f64 => Double, Double;
}

impl Typed for () {
    fn value_type() -> ValueType {
        ValueType::Void
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

impl FromValue for () {
    fn from_value(_value: Value) -> Result<Self, Throwable> {
        Ok(())
    }
}

impl Typed for String {
    fn value_type() -> ValueType {
        ValueType::string()
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(EcoString::from(self))
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, Throwable> {
        match value {
            Value::Str(s) => Ok(s.to_string()),
            other => Err(cast_error(&other, names::STRING)),
        }
    }
}

impl Typed for EcoString {
    fn value_type() -> ValueType {
        ValueType::string()
    }
}

impl IntoValue for EcoString {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl FromValue for EcoString {
    fn from_value(value: Value) -> Result<Self, Throwable> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(cast_error(&other, names::STRING)),
        }
    }
}

impl Typed for &str {
    fn value_type() -> ValueType {
        ValueType::string()
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(EcoString::from(self))
    }
}

impl Typed for Value {
    fn value_type() -> ValueType {
        ValueType::object()
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, Throwable> {
        Ok(value)
    }
}

impl Typed for ObjectRef {
    fn value_type() -> ValueType {
        ValueType::object()
    }
}

impl IntoValue for ObjectRef {
    fn into_value(self) -> Value {
        Value::Object(self)
    }
}

impl FromValue for ObjectRef {
    fn from_value(value: Value) -> Result<Self, Throwable> {
        match value {
            Value::Object(o) => Ok(o),
            other => Err(cast_error(&other, names::OBJECT)),
        }
    }
}

/// Nullable references. A primitive inside an `Option` is its boxed class.
impl<T: Typed> Typed for Option<T> {
    fn value_type() -> ValueType {
        let inner = T::value_type();
        match inner.boxed_name() {
            Some(boxed) => ValueType::reference(boxed),
            None => inner,
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, Throwable> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(EcoString::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(EcoString::from(value))
    }
}

impl From<EcoString> for Value {
    fn from(value: EcoString) -> Self {
        Value::Str(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}
