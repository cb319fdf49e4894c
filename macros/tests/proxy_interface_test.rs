//! Test the #[proxy_interface] macro

use std::sync::Arc;

use dynproxy_core::proxy::{NullInvoker, invoker, provider};
use dynproxy_core::stdlib::names;
use dynproxy_core::types::MethodSignature;
use dynproxy_core::values::Instance;
use dynproxy_core::{
    MethodSpec, ObjectRef, ProxyFactory, Throwable, TypeBuilder, TypeLoader, Value, ValueType,
};
use dynproxy_macros::proxy_interface;
use pretty_assertions::assert_eq;

#[proxy_interface(name = "demo.Greeter")]
pub trait Greeter {
    fn greet(&self, name: String) -> Result<String, Throwable>;

    fn greeting_count(&self) -> Result<i32, Throwable>;

    #[throws("java.io.IOException")]
    fn reload(&self, force: bool) -> Result<(), Throwable>;
}

#[test]
fn test_descriptor() {
    let loader = TypeLoader::new("macro-test");
    let greeter = GreeterInterface::define(&loader).unwrap();

    assert_eq!(GreeterInterface::NAME, "demo.Greeter");
    assert_eq!(greeter.name(), "demo.Greeter");
    assert!(greeter.is_interface());

    let methods: Vec<&str> = greeter.declared_methods().iter().map(|m| m.name()).collect();
    assert_eq!(methods, vec!["greet", "greetingCount", "reload"]);

    let greet = greeter
        .declared_method(&MethodSignature::new("greet", [ValueType::string()]))
        .unwrap();
    assert_eq!(greet.return_type(), &ValueType::string());

    let reload = greeter
        .declared_method(&MethodSignature::new("reload", [ValueType::Boolean]))
        .unwrap();
    assert_eq!(reload.return_type(), &ValueType::Void);
    let throws: Vec<&str> = reload.exceptions().iter().map(|e| e.name()).collect();
    assert_eq!(throws, vec![names::IO_EXCEPTION]);

    assert!(GreeterInterface::define(&loader).is_err());
}

#[test]
fn test_calls_through_invoker_proxy() {
    let loader = TypeLoader::new("macro-test");
    let greeter = GreeterInterface::define(&loader).unwrap();

    let proxy: ObjectRef = ProxyFactory::default()
        .create_invoker_proxy(
            Some(&loader),
            invoker::from_fn(|_, method, args| match method.name() {
                "greet" => Ok(Value::str(format!("hello, {}", args[0]))),
                "greetingCount" => Ok(Value::Int(3)),
                _ => Ok(Value::Null),
            }),
            &[greeter],
        )
        .unwrap();

    assert_eq!(proxy.greet("ada".to_string()).unwrap(), "hello, ada");
    assert_eq!(proxy.greeting_count().unwrap(), 3);
    proxy.reload(true).unwrap();
}

#[test]
fn test_declared_exception_passes_through() {
    let loader = TypeLoader::new("macro-test");
    let greeter = GreeterInterface::define(&loader).unwrap();
    let io = loader.require(names::IO_EXCEPTION).unwrap();

    let proxy = ProxyFactory::default()
        .create_invoker_proxy(
            Some(&loader),
            invoker::from_fn(move |_, _, _| Err(Throwable::new(&io, "disk gone"))),
            &[greeter],
        )
        .unwrap();

    let err = proxy.reload(false).unwrap_err();
    assert_eq!(err.class_name(), names::IO_EXCEPTION);

    let err = proxy.greeting_count().unwrap_err();
    assert_eq!(err.class_name(), names::UNDECLARED_THROWABLE_EXCEPTION);
}

#[test]
fn test_delegating_to_plain_object() {
    let loader = TypeLoader::new("macro-test");
    let greeter = GreeterInterface::define(&loader).unwrap();
    let class = Arc::new(
        TypeBuilder::class("demo.Polite")
            .implements(&greeter)
            .method(
                MethodSpec::new("greet")
                    .param(ValueType::string())
                    .returns(ValueType::string())
                    .body(|_, args| Ok(Value::str(format!("good day, {}", args[0])))),
            )
            .build()
            .unwrap(),
    );
    let target = Value::Object(Instance::new(&class).unwrap());

    let proxy = ProxyFactory::default()
        .create_delegator_proxy(
            Some(&loader),
            provider::from_fn(move || Ok(target.clone())),
            &[greeter],
        )
        .unwrap();
    assert_eq!(proxy.greet("bob".to_string()).unwrap(), "good day, bob");

    // greetingCount has no implementation on the target.
    let err = proxy.greeting_count().unwrap_err();
    assert_eq!(err.class_name(), names::ABSTRACT_METHOD_ERROR);
}

#[test]
fn test_null_invoker_unboxing() {
    let loader = TypeLoader::new("macro-test");
    let greeter = GreeterInterface::define(&loader).unwrap();
    let proxy = ProxyFactory::default()
        .create_invoker_proxy(Some(&loader), NullInvoker, &[greeter])
        .unwrap();

    assert_eq!(proxy.greeting_count().unwrap(), 0);
    let err = proxy.greet("x".to_string()).unwrap_err();
    assert_eq!(err.class_name(), names::NULL_POINTER_EXCEPTION);
}

#[proxy_interface]
trait Counter {
    fn next_value(&self, step: Option<i64>) -> Result<i64, Throwable>;
}

#[test]
fn test_default_name_and_nullable_params() {
    assert_eq!(CounterInterface::NAME, "Counter");

    let loader = TypeLoader::new("macro-test");
    let counter = CounterInterface::define(&loader).unwrap();
    assert!(
        counter
            .declared_method(&MethodSignature::new(
                "nextValue",
                [ValueType::reference(names::LONG)]
            ))
            .is_some()
    );

    let proxy = ProxyFactory::default()
        .create_invoker_proxy(
            Some(&loader),
            invoker::from_fn(|_, _, args| match &args[0] {
                Value::Null => Ok(Value::Long(1)),
                Value::Long(step) => Ok(Value::Long(step * 10)),
                other => Err(Throwable::illegal_argument(other.to_string())),
            }),
            &[counter],
        )
        .unwrap();
    assert_eq!(proxy.next_value(None).unwrap(), 1);
    assert_eq!(proxy.next_value(Some(4)).unwrap(), 40);
}
