//! Delegating proxies.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dynproxy::proxy::provider;
use dynproxy::stdlib::{self, names};
use dynproxy::values::Instance;
use dynproxy::{ProxyFactory, Throwable, Value, ValueType};
use pretty_assertions::assert_eq;

#[test]
fn test_comparable_delegates_to_string() {
    let factory = ProxyFactory::default();
    let comparable = stdlib::bootstrap().comparable().clone();
    let proxy = Value::Object(
        factory
            .create_delegator_proxy(None, provider::from_fn(|| Ok(Value::str("b"))), &[comparable])
            .unwrap(),
    );

    let direct = Value::str("b")
        .invoke("compareTo", [ValueType::object()], vec![Value::str("a")])
        .unwrap();
    let proxied = proxy
        .invoke("compareTo", [ValueType::object()], vec![Value::str("a")])
        .unwrap();
    assert_eq!(proxied, direct);
    assert_eq!(proxied, Value::Int(1));
}

#[test]
fn test_target_failures_pass_through_unwrapped() {
    let factory = ProxyFactory::default();
    let comparable = stdlib::bootstrap().comparable().clone();
    let proxy = Value::Object(
        factory
            .create_delegator_proxy(None, provider::from_fn(|| Ok(Value::str("b"))), &[comparable])
            .unwrap(),
    );

    let err = proxy
        .invoke("compareTo", [ValueType::object()], vec![Value::Int(3)])
        .unwrap_err();
    assert_eq!(err.class_name(), names::CLASS_CAST_EXCEPTION);
}

#[test]
fn test_provider_is_asked_every_call() {
    let factory = ProxyFactory::default();
    let bootstrap = stdlib::bootstrap();
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let proxy = Value::Object(
        factory
            .create_delegator_proxy(
                None,
                provider::from_fn(move || {
                    let n = seen.fetch_add(1, Ordering::SeqCst);
                    Ok(Value::str("x".repeat(n + 1)))
                }),
                &[bootstrap.char_sequence().clone()],
            )
            .unwrap(),
    );

    assert_eq!(proxy.invoke("length", [], vec![]).unwrap(), Value::Int(1));
    assert_eq!(proxy.invoke("length", [], vec![]).unwrap(), Value::Int(2));
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shared_list_target() {
    let factory = ProxyFactory::default();
    let bootstrap = stdlib::bootstrap();
    let list = Value::Object(Instance::new(bootstrap.array_list()).unwrap());
    let target = list.clone();
    let proxy = Value::Object(
        factory
            .create_delegator_proxy(
                None,
                provider::from_fn(move || Ok(target.clone())),
                &[bootstrap.list().clone()],
            )
            .unwrap(),
    );

    proxy
        .invoke("add", [ValueType::object()], vec![Value::str("one")])
        .unwrap();
    assert_eq!(list.invoke("size", [], vec![]).unwrap(), Value::Int(1));
    assert_eq!(
        proxy.invoke("get", [ValueType::Int], vec![Value::Int(0)]).unwrap(),
        Value::str("one")
    );
    assert_eq!(proxy.invoke("toString", [], vec![]).unwrap(), Value::str("[one]"));
}

#[test]
fn test_target_of_wrong_type() {
    let factory = ProxyFactory::default();
    let proxy = Value::Object(
        factory
            .create_delegator_proxy(
                None,
                provider::from_fn(|| Ok(Value::Int(5))),
                &[stdlib::bootstrap().runnable().clone()],
            )
            .unwrap(),
    );

    let err = proxy.invoke("run", [], vec![]).unwrap_err();
    assert_eq!(err.class_name(), names::ILLEGAL_ARGUMENT_EXCEPTION);
    assert_eq!(err.message(), Some("object is not an instance of declaring class"));
}

#[test]
fn test_provider_exception_is_shaped() {
    let factory = ProxyFactory::default();
    let io = stdlib::bootstrap().io_exception().clone();
    let proxy = Value::Object(
        factory
            .create_delegator_proxy(
                None,
                provider::from_fn(move || Err(Throwable::new(&io, "unavailable"))),
                &[stdlib::bootstrap().runnable().clone()],
            )
            .unwrap(),
    );

    // run() declares nothing, so the checked failure is wrapped.
    let err = proxy.invoke("run", [], vec![]).unwrap_err();
    assert_eq!(err.class_name(), names::UNDECLARED_THROWABLE_EXCEPTION);
    assert_eq!(err.cause().map(|c| c.to_string()).as_deref(), Some("java.io.IOException: unavailable"));
}
