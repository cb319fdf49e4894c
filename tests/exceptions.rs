//! How failures raised behind a proxy reach the caller.

use dynproxy::proxy::invoker;
use dynproxy::stdlib::{self, names};
use dynproxy::{
    MethodSpec, ProxyFactory, Throwable, TypeBuilder, TypeLoader, TypeRef, Value, ValueType,
    render_error_to_string, render_throwable,
};
use pretty_assertions::assert_eq;

struct Fixture {
    loader: TypeLoader,
    repository: TypeRef,
}

/// `app.Repository` with `String load(String) throws IOException` and
/// `void save(String)`.
fn fixture() -> Fixture {
    let loader = TypeLoader::new("app");
    let io_exception = stdlib::bootstrap().io_exception().clone();
    let repository = loader
        .define(
            TypeBuilder::interface("app.Repository")
                .method(
                    MethodSpec::new("load")
                        .param(ValueType::string())
                        .returns(ValueType::string())
                        .throws(&io_exception),
                )
                .method(MethodSpec::new("save").param(ValueType::string()))
                .build()
                .unwrap(),
        )
        .unwrap();
    Fixture { loader, repository }
}

/// A repository proxy whose every call raises `failure`.
fn failing_repository(fixture: &Fixture, failure: Throwable) -> Value {
    let factory = ProxyFactory::default();
    Value::Object(
        factory
            .create_invoker_proxy(
                Some(&fixture.loader),
                invoker::from_fn(move |_, _, _| Err(failure.clone())),
                &[fixture.repository.clone()],
            )
            .unwrap(),
    )
}

fn load(proxy: &Value) -> Throwable {
    proxy
        .invoke("load", [ValueType::string()], vec![Value::str("key")])
        .unwrap_err()
}

fn save(proxy: &Value) -> Throwable {
    proxy
        .invoke("save", [ValueType::string()], vec![Value::str("key")])
        .unwrap_err()
}

#[test]
fn test_declared_exception_passes_through() {
    let fixture = fixture();
    let failure = Throwable::new(stdlib::bootstrap().io_exception(), "disk gone");
    let proxy = failing_repository(&fixture, failure.clone());

    let err = load(&proxy);
    assert_eq!(err.class_name(), names::IO_EXCEPTION);
    assert_eq!(err.message(), Some("disk gone"));
    assert!(err.cause().is_none());
}

#[test]
fn test_subclass_of_declared_exception_passes_through() {
    let fixture = fixture();
    let missing = fixture
        .loader
        .define(
            TypeBuilder::class("app.FileMissingException")
                .extends(stdlib::bootstrap().io_exception())
                .build()
                .unwrap(),
        )
        .unwrap();
    let proxy = failing_repository(&fixture, Throwable::new(&missing, "key"));

    let err = load(&proxy);
    assert_eq!(err.class_name(), "app.FileMissingException");
    assert!(err.is_instance_of(names::IO_EXCEPTION));
}

#[test]
fn test_undeclared_checked_exception_is_wrapped() {
    let fixture = fixture();
    let quota = fixture
        .loader
        .define(
            TypeBuilder::class("app.QuotaException")
                .extends(stdlib::bootstrap().exception())
                .build()
                .unwrap(),
        )
        .unwrap();
    let proxy = failing_repository(&fixture, Throwable::new(&quota, "over limit"));

    // Neither method declares QuotaException.
    for err in [load(&proxy), save(&proxy)] {
        assert_eq!(err.class_name(), names::UNDECLARED_THROWABLE_EXCEPTION);
        let cause = err.cause().unwrap();
        assert_eq!(cause.class_name(), "app.QuotaException");
        assert_eq!(cause.message(), Some("over limit"));
    }
}

#[test]
fn test_declared_exception_is_wrapped_where_not_declared() {
    let fixture = fixture();
    let failure = Throwable::new(stdlib::bootstrap().io_exception(), "disk gone");
    let proxy = failing_repository(&fixture, failure);

    assert_eq!(load(&proxy).class_name(), names::IO_EXCEPTION);

    let err = save(&proxy);
    assert_eq!(err.class_name(), names::UNDECLARED_THROWABLE_EXCEPTION);
    assert_eq!(err.cause().unwrap().class_name(), names::IO_EXCEPTION);
}

#[test]
fn test_unchecked_exceptions_and_errors_pass_through() {
    let fixture = fixture();
    let failures = [
        Throwable::illegal_state("closed"),
        Throwable::unsupported_operation("read only"),
        Throwable::new(stdlib::bootstrap().error(), "fatal"),
    ];

    for failure in failures {
        let proxy = failing_repository(&fixture, failure.clone());
        let err = save(&proxy);
        assert_eq!(err.class_name(), failure.class_name());
        assert_eq!(err.message(), failure.message());
    }
}

#[test]
fn test_invocation_target_wrapping_is_removed() {
    let fixture = fixture();
    let wrapped = Throwable::invocation_target(Throwable::illegal_state("closed"));
    let proxy = failing_repository(&fixture, wrapped);

    let err = save(&proxy);
    assert_eq!(err.class_name(), names::ILLEGAL_STATE_EXCEPTION);
    assert_eq!(err.message(), Some("closed"));
}

#[test]
fn test_render_throwable_lists_causes() {
    let fixture = fixture();
    let quota = fixture
        .loader
        .define(
            TypeBuilder::class("app.QuotaException")
                .extends(stdlib::bootstrap().exception())
                .build()
                .unwrap(),
        )
        .unwrap();
    let proxy = failing_repository(&fixture, Throwable::new(&quota, "over limit"));

    assert_eq!(
        render_throwable(&save(&proxy)),
        "java.lang.reflect.UndeclaredThrowableException\n\
         Caused by: app.QuotaException: over limit\n"
    );
}

#[test]
fn test_render_configuration_error() {
    let factory = ProxyFactory::default();
    let string = stdlib::bootstrap().string().clone();
    let err = factory.proxy_class(None, &[string]).unwrap_err();

    let rendered = render_error_to_string(&err);
    assert!(rendered.contains("dynproxy::configuration"), "{}", rendered);
    assert!(rendered.contains("java.lang.String"), "{}", rendered);
}
