//! Collections Package
//!
//! `java.util.Collection`, `java.util.List`, and a growable `ArrayList`.
//!
//! Design notes:
//! - Element comparison is `Value` equality: by value for primitives and
//!   strings, by identity for objects
//! - `ArrayList` keeps `Object`'s identity `equals`/`hashCode`

use std::sync::{Arc, Mutex};

use super::{arg, names};
use crate::sync::lock;
use crate::throwable::Throwable;
use crate::types::{MethodSpec, TypeBuilder, TypeRef, ValueType};
use crate::values::Value;

pub(super) fn collection() -> TypeRef {
    Arc::new(
        TypeBuilder::interface(names::COLLECTION)
            .method(MethodSpec::new("size").returns(ValueType::Int))
            .method(MethodSpec::new("isEmpty").returns(ValueType::Boolean))
            .method(
                MethodSpec::new("contains")
                    .param(ValueType::object())
                    .returns(ValueType::Boolean),
            )
            .method(
                MethodSpec::new("add")
                    .param(ValueType::object())
                    .returns(ValueType::Boolean),
            )
            .method(
                MethodSpec::new("equals")
                    .param(ValueType::object())
                    .returns(ValueType::Boolean),
            )
            .method(MethodSpec::new("hashCode").returns(ValueType::Int))
            .build_unchecked(),
    )
}

pub(super) fn list(collection: &TypeRef) -> TypeRef {
    Arc::new(
        TypeBuilder::interface(names::LIST)
            .implements(collection)
            .method(
                MethodSpec::new("get")
                    .param(ValueType::Int)
                    .returns(ValueType::object()),
            )
            .method(
                MethodSpec::new("indexOf")
                    .param(ValueType::object())
                    .returns(ValueType::Int),
            )
            .build_unchecked(),
    )
}

// ============================================================================
// java.util.ArrayList
// ============================================================================

#[derive(Default)]
struct Elements(Mutex<Vec<Value>>);

fn with_elements<R>(this: &Value, f: impl FnOnce(&mut Vec<Value>) -> R) -> Result<R, Throwable> {
    let elements = this.state::<Elements>().ok_or_else(|| {
        Throwable::illegal_state(format!("{} has no list storage", this.type_name()))
    })?;
    let mut guard = lock(&elements.0);
    Ok(f(&mut guard))
}

pub(super) fn array_list(object: &TypeRef, list: &TypeRef, serializable: &TypeRef) -> TypeRef {
    Arc::new(
        TypeBuilder::class(names::ARRAY_LIST)
            .extends(object)
            .implements(list)
            .implements(serializable)
            .state(Elements::default)
            .method(
                MethodSpec::new("size")
                    .returns(ValueType::Int)
                    .body(|this, _| with_elements(this, |e| Value::Int(e.len() as i32))),
            )
            .method(
                MethodSpec::new("isEmpty")
                    .returns(ValueType::Boolean)
                    .body(|this, _| with_elements(this, |e| Value::Bool(e.is_empty()))),
            )
            .method(
                MethodSpec::new("contains")
                    .param(ValueType::object())
                    .returns(ValueType::Boolean)
                    .body(|this, args| {
                        let needle = arg(args, 0)?;
                        with_elements(this, |e| Value::Bool(e.contains(needle)))
                    }),
            )
            .method(
                MethodSpec::new("add")
                    .param(ValueType::object())
                    .returns(ValueType::Boolean)
                    .body(|this, args| {
                        let element = arg(args, 0)?.clone();
                        with_elements(this, |e| {
                            e.push(element);
                            Value::Bool(true)
                        })
                    }),
            )
            .method(
                MethodSpec::new("get")
                    .param(ValueType::Int)
                    .returns(ValueType::object())
                    .body(|this, args| {
                        let index = arg(args, 0)?.as_int().unwrap_or(-1);
                        with_elements(this, |e| {
                            usize::try_from(index)
                                .ok()
                                .and_then(|i| e.get(i).cloned())
                                .ok_or_else(|| {
                                    Throwable::index_out_of_bounds(format!(
                                        "Index {} out of bounds for length {}",
                                        index,
                                        e.len()
                                    ))
                                })
                        })?
                    }),
            )
            .method(
                MethodSpec::new("indexOf")
                    .param(ValueType::object())
                    .returns(ValueType::Int)
                    .body(|this, args| {
                        let needle = arg(args, 0)?;
                        with_elements(this, |e| {
                            Value::Int(e.iter().position(|v| v == needle).map_or(-1, |i| i as i32))
                        })
                    }),
            )
            .method(
                MethodSpec::new("toString")
                    .returns(ValueType::string())
                    .body(|this, _| {
                        with_elements(this, |e| {
                            let items: Vec<String> = e.iter().map(ToString::to_string).collect();
                            Value::str(format!("[{}]", items.join(", ")))
                        })
                    }),
            )
            .build_unchecked(),
    )
}
