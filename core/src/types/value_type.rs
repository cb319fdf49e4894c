use core::fmt;

use ecow::EcoString;

use crate::stdlib::names;
use crate::throwable::Throwable;
use crate::values::Value;

/// Static type of a method parameter or return value.
///
/// Primitives are matched exactly; references are matched by assignability of
/// the value's runtime class to the named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Void,
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Reference(EcoString),
}

impl ValueType {
    pub fn reference(name: impl Into<EcoString>) -> Self {
        ValueType::Reference(name.into())
    }

    /// `java.lang.Object`, the erasure of every unbounded type parameter.
    pub fn object() -> Self {
        ValueType::Reference(EcoString::from(names::OBJECT))
    }

    pub fn string() -> Self {
        ValueType::Reference(EcoString::from(names::STRING))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, ValueType::Void)
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, ValueType::Void | ValueType::Reference(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ValueType::Reference(_))
    }

    /// Name of the class primitives of this type box into.
    pub fn boxed_name(&self) -> Option<&'static str> {
        match self {
            ValueType::Boolean => Some(names::BOOLEAN),
            ValueType::Byte => Some(names::BYTE),
            ValueType::Short => Some(names::SHORT),
            ValueType::Char => Some(names::CHARACTER),
            ValueType::Int => Some(names::INTEGER),
            ValueType::Long => Some(names::LONG),
            ValueType::Float => Some(names::FLOAT),
            ValueType::Double => Some(names::DOUBLE),
            ValueType::Void | ValueType::Reference(_) => None,
        }
    }

    /// The zero value of this type: `false`, `0`, `'\0'`, or null.
    pub fn default_value(&self) -> Value {
        match self {
            ValueType::Void | ValueType::Reference(_) => Value::Null,
            ValueType::Boolean => Value::Bool(false),
            ValueType::Byte => Value::Byte(0),
            ValueType::Short => Value::Short(0),
            ValueType::Char => Value::Char('\0'),
            ValueType::Int => Value::Int(0),
            ValueType::Long => Value::Long(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::Double => Value::Double(0.0),
        }
    }

    /// Whether `value` may be passed where this type is expected.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Void, _) => false,
            (ValueType::Reference(_), Value::Null) => true,
            (ValueType::Reference(name), value) => value.is_instance_of(name),
            (ValueType::Boolean, Value::Bool(_))
            | (ValueType::Byte, Value::Byte(_))
            | (ValueType::Short, Value::Short(_))
            | (ValueType::Char, Value::Char(_))
            | (ValueType::Int, Value::Int(_))
            | (ValueType::Long, Value::Long(_))
            | (ValueType::Float, Value::Float(_))
            | (ValueType::Double, Value::Double(_)) => true,
            _ => false,
        }
    }

    /// Narrows a handler result to this declared return type.
    ///
    /// `void` discards the value. A primitive requires exactly the matching
    /// boxed variant and rejects null with `NullPointerException`. Anything
    /// else that does not fit raises `ClassCastException`.
    pub fn coerce(&self, value: Value) -> Result<Value, Throwable> {
        if self.is_void() {
            return Ok(Value::Null);
        }
        if value.is_null() {
            return if self.is_primitive() {
                Err(Throwable::null_pointer(format!(
                    "null returned where primitive {} was expected",
                    self
                )))
            } else {
                Ok(Value::Null)
            };
        }
        if self.accepts(&value) {
            Ok(value)
        } else {
            Err(Throwable::class_cast(format!(
                "{} cannot be cast to {}",
                value.type_name(),
                self.boxed_name().unwrap_or(self.name())
            )))
        }
    }

    /// Source-level spelling of the type.
    pub fn name(&self) -> &str {
        match self {
            ValueType::Void => "void",
            ValueType::Boolean => "boolean",
            ValueType::Byte => "byte",
            ValueType::Short => "short",
            ValueType::Char => "char",
            ValueType::Int => "int",
            ValueType::Long => "long",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::Reference(name) => name,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
