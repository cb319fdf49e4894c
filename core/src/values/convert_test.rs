use pretty_assertions::assert_eq;

use super::{FromValue, IntoValue, Typed, Value};
use crate::stdlib::names;
use crate::types::ValueType;

#[test]
fn test_primitive_round_trip() {
    assert_eq!(42i32.into_value(), Value::Int(42));
    assert_eq!(i32::from_value(Value::Int(42)).unwrap(), 42);
    assert_eq!('x'.into_value(), Value::Char('x'));
    assert_eq!(bool::value_type(), ValueType::Boolean);
    assert_eq!(i64::value_type(), ValueType::Long);
    assert_eq!(Value::from(2.5f64), Value::Double(2.5));
}

#[test]
fn test_strings() {
    assert_eq!(String::value_type(), ValueType::string());
    assert_eq!("hi".into_value(), Value::str("hi"));
    assert_eq!(String::from_value(Value::str("hi")).unwrap(), "hi");
}

#[test]
fn test_unit_is_void() {
    assert_eq!(<()>::value_type(), ValueType::Void);
    assert_eq!(().into_value(), Value::Null);
    assert!(<()>::from_value(Value::Int(1)).is_ok());
}

#[test]
fn test_option_boxes_primitives() {
    assert_eq!(
        Option::<i32>::value_type(),
        ValueType::reference(names::INTEGER)
    );
    assert_eq!(Option::<String>::value_type(), ValueType::string());
    assert_eq!(Option::<i32>::None.into_value(), Value::Null);
    assert_eq!(Option::<i32>::from_value(Value::Null).unwrap(), None);
    assert_eq!(Option::<i32>::from_value(Value::Int(3)).unwrap(), Some(3));
}

#[test]
fn test_unboxing_errors() {
    let err = i32::from_value(Value::Null).unwrap_err();
    assert_eq!(err.class_name(), names::NULL_POINTER_EXCEPTION);
    assert_eq!(err.message(), Some("cannot unbox null as int"));

    let err = i32::from_value(Value::Long(1)).unwrap_err();
    assert_eq!(err.class_name(), names::CLASS_CAST_EXCEPTION);
    assert_eq!(err.message(), Some("java.lang.Long cannot be cast to int"));

    let err = String::from_value(Value::Int(1)).unwrap_err();
    assert_eq!(
        err.message(),
        Some("java.lang.Integer cannot be cast to java.lang.String")
    );
}
