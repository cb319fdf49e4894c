use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::forwarder::shape_failure;
use super::{Backend, ProxyClassGenerator};
use crate::api::ProxyError;
use crate::stdlib::{self, names};
use crate::testing::enable_tracing;
use crate::throwable::Throwable;
use crate::types::{
    Constructor, MethodSignature, MethodSpec, TypeBuilder, TypeDescriptor, TypeLoader, TypeRef,
    TypeSet, ValueType, Visibility,
};
use crate::values::Value;

fn interface_descriptor(name: &str, methods: &[&str]) -> TypeDescriptor {
    let mut builder = TypeBuilder::interface(name);
    for method in methods {
        builder = builder.method(MethodSpec::new(*method).returns(ValueType::string()));
    }
    builder.build().unwrap()
}

/// An interface no loader defines; enough for `superclass_for`.
fn interface(name: &str, methods: &[&str]) -> TypeRef {
    Arc::new(interface_descriptor(name, methods))
}

fn message(result: Result<TypeRef, ProxyError>) -> String {
    result.unwrap_err().to_string()
}

#[test]
fn test_superclass_for_interfaces_only() {
    let generator = ProxyClassGenerator::default();
    let types = TypeSet::new([interface("test.A", &["foo"])]);
    assert_eq!(
        generator.superclass_for(&types).unwrap().name(),
        names::OBJECT
    );
    assert!(generator.can_proxy(&TypeSet::default()));
}

#[test]
fn test_superclass_for_rejections() {
    let generator = ProxyClassGenerator::default();
    let bootstrap = stdlib::bootstrap();

    assert_eq!(
        message(generator.superclass_for(&TypeSet::new([bootstrap.string().clone()]))),
        "Proxy class cannot extend java.lang.String as it is final."
    );

    let no_default = Arc::new(
        TypeBuilder::class("test.Point")
            .constructor(Constructor::new(Visibility::Public, [ValueType::Int]))
            .build()
            .unwrap(),
    );
    assert_eq!(
        message(generator.superclass_for(&TypeSet::new([no_default]))),
        "Proxy class cannot extend test.Point, because it has no visible \"default\" constructor."
    );

    let private_default = Arc::new(
        TypeBuilder::class("test.Singleton")
            .constructor(Constructor::new(Visibility::Private, []))
            .build()
            .unwrap(),
    );
    assert!(!generator.can_proxy(&TypeSet::new([private_default])));

    let a = Arc::new(TypeBuilder::class("test.A").build().unwrap());
    let b = Arc::new(TypeBuilder::class("test.B").build().unwrap());
    let err = generator
        .superclass_for(&TypeSet::new([a, interface("test.I", &[]), b]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Proxy class cannot extend test.A, test.B; multiple inheritance not allowed."
    );
    assert!(err.is_configuration());
    assert_eq!(err.types(), vec!["test.A", "test.B"]);
}

#[test]
fn test_interfaces_backend_rejects_classes() {
    let generator = ProxyClassGenerator::new(Backend::Interfaces);
    let class = Arc::new(TypeBuilder::class("test.Base").build().unwrap());
    assert_eq!(
        message(generator.superclass_for(&TypeSet::new([class]))),
        "test.Base is not an interface"
    );
    assert!(generator.can_proxy(&TypeSet::new([interface("test.A", &[])])));
}

#[test]
fn test_generated_class_shape() {
    enable_tracing();
    let generator = ProxyClassGenerator::default();
    let loader = TypeLoader::new("test");
    let a = loader.define(interface_descriptor("test.A", &["foo", "bar"])).unwrap();
    let b = loader.define(interface_descriptor("test.B", &["foo", "baz"])).unwrap();
    let class = generator.generate(&loader, &TypeSet::new([a, b])).unwrap();

    assert!(class.name().starts_with("test.A$$Proxy"), "{}", class.name());
    assert!(class.descriptor().is_final());
    assert!(class.descriptor().constructors().is_empty());
    assert_eq!(class.superclass().name(), names::OBJECT);
    assert_eq!(class.key(), "test.A,test.B");
    assert!(class.descriptor().is_subtype_of("test.A"));
    assert!(class.descriptor().is_subtype_of("test.B"));

    let methods: Vec<String> = class
        .methods()
        .iter()
        .map(|m| format!("{}.{}", m.declaring_type(), m.name()))
        .collect();
    assert_eq!(
        methods,
        vec![
            "test.A.foo",
            "test.A.bar",
            "test.B.baz",
            "java.lang.Object.equals",
            "java.lang.Object.hashCode",
            "java.lang.Object.toString",
        ]
    );

    let forwarder = class.forwarder(&MethodSignature::new("foo", [])).unwrap();
    assert_eq!(forwarder.declaring_type(), class.name());
    assert!(!forwarder.is_abstract());
    assert!(class.implements(&MethodSignature::new("toString", [])));
    assert!(!class.implements(&MethodSignature::new("qux", [])));
}

#[test]
fn test_names_are_unique() {
    let generator = ProxyClassGenerator::default();
    let loader = TypeLoader::new("test");
    let types = TypeSet::new([loader.define(interface_descriptor("test.A", &[])).unwrap()]);
    let first = generator.generate(&loader, &types).unwrap();
    let second = generator.generate(&loader, &types).unwrap();
    assert_ne!(first.name(), second.name());

    let interfaces = ProxyClassGenerator::new(Backend::Interfaces);
    let class = interfaces.generate(&loader, &types).unwrap();
    assert!(class.name().starts_with("$Proxy"), "{}", class.name());
}

#[test]
fn test_final_methods_are_not_forwarded() {
    let loader = TypeLoader::new("test");
    let base = loader.define(
        TypeBuilder::class("test.Greeter")
            .method(
                MethodSpec::new("greet")
                    .returns(ValueType::string())
                    .mark_final()
                    .body(|_, _| Ok(Value::str("hello"))),
            )
            .method(MethodSpec::new("name").returns(ValueType::string()))
            .build()
            .unwrap(),
    )
    .unwrap();
    let class = ProxyClassGenerator::default()
        .generate(&loader, &TypeSet::new([base]))
        .unwrap();

    assert!(class.name().starts_with("test.Greeter$$Proxy"));
    assert!(!class.implements(&MethodSignature::new("greet", [])));
    assert!(class.implements(&MethodSignature::new("name", [])));
}

#[test]
fn test_types_must_come_from_the_loader() {
    let generator = ProxyClassGenerator::default();
    let app = TypeLoader::new("app");
    let plugin = TypeLoader::with_parent("plugin", app.clone());
    let shared = app.define(interface_descriptor("test.Shared", &["run"])).unwrap();

    // Visible through the parent.
    assert!(generator.generate(&plugin, &TypeSet::new([shared.clone()])).is_ok());

    let stray = interface("test.Shared", &["run"]);
    assert_eq!(
        generator
            .generate(&app, &TypeSet::new([stray]))
            .unwrap_err()
            .to_string(),
        "type test.Shared is not visible from loader app"
    );

    let unknown = interface("test.Unknown", &[]);
    assert!(matches!(
        generator.generate(&app, &TypeSet::new([shared, unknown])),
        Err(ProxyError::UnknownType { name, .. }) if name == "test.Unknown"
    ));
}

fn method_throwing(exception: &TypeRef) -> crate::types::MethodDescriptor {
    let ty = TypeBuilder::interface("test.Reader")
        .method(MethodSpec::new("read").returns(ValueType::Int).throws(exception))
        .build()
        .unwrap();
    (*ty.declared_methods()[0]).clone()
}

#[test]
fn test_shape_failure() {
    let bootstrap = stdlib::bootstrap();
    let method = method_throwing(bootstrap.io_exception());

    let declared = shape_failure(&method, Throwable::new(bootstrap.io_exception(), "disk"));
    assert_eq!(declared.class_name(), names::IO_EXCEPTION);

    let unchecked = shape_failure(&method, Throwable::illegal_state("bad"));
    assert_eq!(unchecked.class_name(), names::ILLEGAL_STATE_EXCEPTION);

    let wrapped = shape_failure(
        &method,
        Throwable::invocation_target(Throwable::new(bootstrap.io_exception(), "disk")),
    );
    assert_eq!(wrapped.class_name(), names::IO_EXCEPTION);
    assert_eq!(wrapped.message(), Some("disk"));

    let undeclared = shape_failure(&method, Throwable::of(bootstrap.exception()));
    assert_eq!(undeclared.class_name(), names::UNDECLARED_THROWABLE_EXCEPTION);
    assert_eq!(
        undeclared.cause().map(Throwable::class_name),
        Some(names::EXCEPTION)
    );
}
