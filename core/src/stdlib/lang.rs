//! Lang Package
//!
//! `java.lang.Object`, `String`, the boxed primitives, and the core interfaces.
//!
//! Design notes:
//! - Boxed primitives are `Value` variants; these classes give them methods
//! - String positions and lengths count UTF-16 code units

use core::cmp::Ordering;
use std::sync::Arc;

use super::{arg, names};
use crate::throwable::Throwable;
use crate::types::{MethodSpec, TypeBuilder, TypeRef, ValueType};
use crate::values::{Value, string_hash};

fn build(builder: TypeBuilder) -> TypeRef {
    Arc::new(builder.build_unchecked())
}

// ============================================================================
// java.lang.Object
// ============================================================================

pub(super) fn object() -> TypeRef {
    build(
        TypeBuilder::class(names::OBJECT)
            .without_superclass()
            .method(
                MethodSpec::new("equals")
                    .param(ValueType::object())
                    .returns(ValueType::Boolean)
                    .body(|this, args| Ok(Value::Bool(this.is_identical(arg(args, 0)?)))),
            )
            .method(
                MethodSpec::new("hashCode")
                    .returns(ValueType::Int)
                    .body(|this, _| Ok(Value::Int(this.identity_hash()))),
            )
            .method(
                MethodSpec::new("toString")
                    .returns(ValueType::string())
                    .body(|this, _| {
                        Ok(Value::str(format!(
                            "{}@{:x}",
                            this.type_name(),
                            this.identity_hash() as u32
                        )))
                    }),
            ),
    )
}

// ============================================================================
// Interfaces
// ============================================================================

pub(super) fn serializable() -> TypeRef {
    build(TypeBuilder::interface(names::SERIALIZABLE))
}

pub(super) fn comparable() -> TypeRef {
    build(
        TypeBuilder::interface(names::COMPARABLE).method(
            MethodSpec::new("compareTo")
                .param(ValueType::object())
                .returns(ValueType::Int),
        ),
    )
}

pub(super) fn char_sequence() -> TypeRef {
    build(
        TypeBuilder::interface(names::CHAR_SEQUENCE)
            .method(MethodSpec::new("length").returns(ValueType::Int))
            .method(
                MethodSpec::new("charAt")
                    .param(ValueType::Int)
                    .returns(ValueType::Char),
            ),
    )
}

pub(super) fn runnable() -> TypeRef {
    build(TypeBuilder::interface(names::RUNNABLE).method(MethodSpec::new("run")))
}

// ============================================================================
// java.lang.String
// ============================================================================

fn this_str(this: &Value) -> Result<&str, Throwable> {
    this.as_str().ok_or_else(|| {
        Throwable::class_cast(format!("{} cannot be cast to {}", this.type_name(), names::STRING))
    })
}

/// `String.compareTo`: difference of the first differing UTF-16 unit, else
/// of the lengths.
pub(crate) fn compare_strings(a: &str, b: &str) -> i32 {
    let mut left = a.encode_utf16();
    let mut right = b.encode_utf16();
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) if x != y => return i32::from(x) - i32::from(y),
            (Some(_), Some(_)) => continue,
            (Some(_), None) => return 1 + left.count() as i32,
            (None, Some(_)) => return -1 - right.count() as i32,
            (None, None) => return 0,
        }
    }
}

pub(super) fn string(
    object: &TypeRef,
    serializable: &TypeRef,
    comparable: &TypeRef,
    char_sequence: &TypeRef,
) -> TypeRef {
    build(
        TypeBuilder::class(names::STRING)
            .extends(object)
            .implements(serializable)
            .implements(comparable)
            .implements(char_sequence)
            .mark_final()
            .method(
                MethodSpec::new("equals")
                    .param(ValueType::object())
                    .returns(ValueType::Boolean)
                    .body(|this, args| {
                        let this = this_str(this)?;
                        Ok(Value::Bool(arg(args, 0)?.as_str() == Some(this)))
                    }),
            )
            .method(
                MethodSpec::new("hashCode")
                    .returns(ValueType::Int)
                    .body(|this, _| Ok(Value::Int(string_hash(this_str(this)?)))),
            )
            .method(
                MethodSpec::new("toString")
                    .returns(ValueType::string())
                    .body(|this, _| Ok(Value::str(this_str(this)?))),
            )
            .method(
                MethodSpec::new("length")
                    .returns(ValueType::Int)
                    .body(|this, _| {
                        Ok(Value::Int(this_str(this)?.encode_utf16().count() as i32))
                    }),
            )
            .method(
                MethodSpec::new("isEmpty")
                    .returns(ValueType::Boolean)
                    .body(|this, _| Ok(Value::Bool(this_str(this)?.is_empty()))),
            )
            .method(
                MethodSpec::new("charAt")
                    .param(ValueType::Int)
                    .returns(ValueType::Char)
                    .body(|this, args| {
                        let s = this_str(this)?;
                        let index = arg(args, 0)?.as_int().unwrap_or(-1);
                        let unit = usize::try_from(index)
                            .ok()
                            .and_then(|i| s.encode_utf16().nth(i))
                            .ok_or_else(|| {
                                Throwable::index_out_of_bounds(format!(
                                    "index {} out of bounds for length {}",
                                    index,
                                    s.encode_utf16().count()
                                ))
                            })?;
                        let c = char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER);
                        Ok(Value::Char(c))
                    }),
            )
            .method(
                MethodSpec::new("compareTo")
                    .param(ValueType::object())
                    .returns(ValueType::Int)
                    .body(|this, args| {
                        let this = this_str(this)?;
                        match arg(args, 0)? {
                            Value::Str(other) => Ok(Value::Int(compare_strings(this, other))),
                            Value::Null => Err(Throwable::null_pointer("compareTo(null)")),
                            other => Err(Throwable::class_cast(format!(
                                "{} cannot be cast to {}",
                                other.type_name(),
                                names::STRING
                            ))),
                        }
                    }),
            ),
    )
}

// ============================================================================
// Boxed primitives
// ============================================================================

pub(super) fn number(object: &TypeRef, serializable: &TypeRef) -> TypeRef {
    build(
        TypeBuilder::class(names::NUMBER)
            .extends(object)
            .implements(serializable),
    )
}

fn signum(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// `compareTo` of two boxed primitives of the same class.
fn compare_boxed(this: &Value, other: &Value) -> Result<i32, Throwable> {
    let result = match (this, other) {
        (Value::Bool(a), Value::Bool(b)) => signum(a.cmp(b)),
        (Value::Byte(a), Value::Byte(b)) => i32::from(*a) - i32::from(*b),
        (Value::Short(a), Value::Short(b)) => i32::from(*a) - i32::from(*b),
        (Value::Char(a), Value::Char(b)) => *a as i32 - *b as i32,
        (Value::Int(a), Value::Int(b)) => signum(a.cmp(b)),
        (Value::Long(a), Value::Long(b)) => signum(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => signum(a.total_cmp(b)),
        (Value::Double(a), Value::Double(b)) => signum(a.total_cmp(b)),
        (_, Value::Null) => return Err(Throwable::null_pointer("compareTo(null)")),
        (this, other) => {
            return Err(Throwable::class_cast(format!(
                "{} cannot be cast to {}",
                other.type_name(),
                this.type_name()
            )));
        }
    };
    Ok(result)
}

pub(super) struct Boxed<'a> {
    pub object: &'a TypeRef,
    pub number: &'a TypeRef,
    pub serializable: &'a TypeRef,
    pub comparable: &'a TypeRef,
}

impl Boxed<'_> {
    pub fn boolean(&self) -> TypeRef {
        self.build(names::BOOLEAN, self.object)
    }

    pub fn byte(&self) -> TypeRef {
        self.build(names::BYTE, self.number)
    }

    pub fn short(&self) -> TypeRef {
        self.build(names::SHORT, self.number)
    }

    pub fn character(&self) -> TypeRef {
        self.build(names::CHARACTER, self.object)
    }

    pub fn integer(&self) -> TypeRef {
        self.build(names::INTEGER, self.number)
    }

    pub fn long(&self) -> TypeRef {
        self.build(names::LONG, self.number)
    }

    pub fn float(&self) -> TypeRef {
        self.build(names::FLOAT, self.number)
    }

    pub fn double(&self) -> TypeRef {
        self.build(names::DOUBLE, self.number)
    }

    fn build(&self, name: &str, superclass: &TypeRef) -> TypeRef {
        build(
            TypeBuilder::class(name)
                .extends(superclass)
                .implements(self.serializable)
                .implements(self.comparable)
                .mark_final()
                .method(
                    MethodSpec::new("equals")
                        .param(ValueType::object())
                        .returns(ValueType::Boolean)
                        .body(|this, args| Ok(Value::Bool(this == arg(args, 0)?))),
                )
                .method(
                    MethodSpec::new("hashCode")
                        .returns(ValueType::Int)
                        .body(|this, _| Ok(Value::Int(this.boxed_hash()))),
                )
                .method(
                    MethodSpec::new("toString")
                        .returns(ValueType::string())
                        .body(|this, _| Ok(Value::str(this.to_string()))),
                )
                .method(
                    MethodSpec::new("compareTo")
                        .param(ValueType::object())
                        .returns(ValueType::Int)
                        .body(|this, args| Ok(Value::Int(compare_boxed(this, arg(args, 0)?)?))),
                ),
        )
    }
}
