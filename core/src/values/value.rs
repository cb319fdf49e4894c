use core::any::Any;
use core::fmt;

use ecow::EcoString;

use super::object::{ObjectRef, identity_hash, same_object};
use crate::reflect;
use crate::stdlib::{self, names};
use crate::throwable::Throwable;
use crate::types::{TypeRef, ValueType};

/// A dynamically typed value: what flows through method arguments, return
/// values, and handler results.
///
/// Primitives are stored boxed, the way a reflective call sees them.
/// `Null` is also the result of a `void` method.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(EcoString),
    Object(ObjectRef),
}

impl Value {
    // ============================================================================
    // Construction
    // ============================================================================

    pub fn str(s: impl Into<EcoString>) -> Self {
        Value::Str(s.into())
    }

    pub fn object(object: ObjectRef) -> Self {
        Value::Object(object)
    }

    // ============================================================================
    // Inspection
    // ============================================================================

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Downcasts the state of an object value.
    pub fn state<S: Any>(&self) -> Option<&S> {
        self.as_object()?.state_ref::<S>()
    }

    /// Qualified name of the runtime class, or `null`.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => names::BOOLEAN,
            Value::Byte(_) => names::BYTE,
            Value::Short(_) => names::SHORT,
            Value::Char(_) => names::CHARACTER,
            Value::Int(_) => names::INTEGER,
            Value::Long(_) => names::LONG,
            Value::Float(_) => names::FLOAT,
            Value::Double(_) => names::DOUBLE,
            Value::Str(_) => names::STRING,
            Value::Object(o) => o.class().name(),
        }
    }

    /// The static type a value of this variant fits exactly.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Boolean,
            Value::Byte(_) => ValueType::Byte,
            Value::Short(_) => ValueType::Short,
            Value::Char(_) => ValueType::Char,
            Value::Int(_) => ValueType::Int,
            Value::Long(_) => ValueType::Long,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::Null => ValueType::object(),
            other => ValueType::reference(other.type_name()),
        }
    }

    /// Class a reflective call dispatches on. Primitives answer their boxed
    /// class. `None` for null.
    pub fn runtime_class(&self) -> Option<TypeRef> {
        let bootstrap = stdlib::bootstrap();
        let class = match self {
            Value::Null => return None,
            Value::Object(o) => return Some(o.class().clone()),
            Value::Str(_) => bootstrap.string(),
            Value::Bool(_) => bootstrap.boolean(),
            Value::Byte(_) => bootstrap.byte(),
            Value::Short(_) => bootstrap.short(),
            Value::Char(_) => bootstrap.character(),
            Value::Int(_) => bootstrap.integer(),
            Value::Long(_) => bootstrap.long(),
            Value::Float(_) => bootstrap.float(),
            Value::Double(_) => bootstrap.double(),
        };
        Some(class.clone())
    }

    /// `instanceof`: false for null.
    pub fn is_instance_of(&self, name: &str) -> bool {
        match self {
            Value::Null => false,
            Value::Object(o) => o.class().is_subtype_of(name),
            other => other
                .runtime_class()
                .is_some_and(|class| class.is_subtype_of(name)),
        }
    }

    /// `==`: reference identity for objects, value equality otherwise.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => same_object(a, b),
            (Value::Object(_), _) | (_, Value::Object(_)) => false,
            (a, b) => a == b,
        }
    }

    pub fn is_same_object(&self, object: &ObjectRef) -> bool {
        self.as_object().is_some_and(|o| same_object(o, object))
    }

    /// `System.identityHashCode`.
    pub fn identity_hash(&self) -> i32 {
        match self {
            Value::Null => 0,
            Value::Object(o) => identity_hash(o),
            other => other.boxed_hash(),
        }
    }

    /// `hashCode()` of a boxed primitive or string. Objects answer their
    /// identity hash.
    pub(crate) fn boxed_hash(&self) -> i32 {
        match self {
            Value::Null => 0,
            Value::Bool(b) => {
                if *b {
                    1231
                } else {
                    1237
                }
            }
            Value::Byte(b) => i32::from(*b),
            Value::Short(s) => i32::from(*s),
            Value::Char(c) => *c as i32,
            Value::Int(i) => *i,
            Value::Long(l) => (*l ^ ((*l as u64) >> 32) as i64) as i32,
            Value::Float(f) => f.to_bits() as i32,
            Value::Double(d) => {
                let bits = d.to_bits();
                (bits ^ (bits >> 32)) as i32
            }
            Value::Str(s) => string_hash(s),
            Value::Object(o) => identity_hash(o),
        }
    }

    // ============================================================================
    // Reflective calls
    // ============================================================================

    /// Calls the public method `name(params)` found on this value's runtime
    /// class.
    pub fn invoke(
        &self,
        name: &str,
        params: impl IntoIterator<Item = ValueType>,
        args: Vec<Value>,
    ) -> Result<Value, Throwable> {
        reflect::call(self, name, params, args)
    }
}

/// `String.hashCode()`: `s[0]*31^(n-1) + ... + s[n-1]` over UTF-16 units.
pub(crate) fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            // Boxed floating point compares bit patterns.
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => same_object(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Byte(b) => write!(f, "Byte({})", b),
            Value::Short(s) => write!(f, "Short({})", s),
            Value::Char(c) => write!(f, "Char({:?})", c),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Long(l) => write!(f, "Long({})", l),
            Value::Float(x) => write!(f, "Float({:?})", x),
            Value::Double(x) => write!(f, "Double({:?})", x),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Object(o) => write!(f, "Object({:?})", o),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Byte(b) => write!(f, "{}", b),
            Value::Short(s) => write!(f, "{}", s),
            Value::Char(c) => write!(f, "{}", c),
            Value::Int(i) => write!(f, "{}", i),
            Value::Long(l) => write!(f, "{}", l),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Double(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Object(o) => write!(f, "{:?}", o),
        }
    }
}
