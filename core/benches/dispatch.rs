//! Benchmarks for proxied call dispatch.
//!
//! Run with: `cargo bench --bench dispatch` in the core/ directory.
//!
//! Benchmark groups:
//! 1. direct: reflective call on a plain object, the baseline
//! 2. proxy: the same call through invoker, delegator, and interceptor proxies
//! 3. class_lookup: cached proxy class lookups

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dynproxy_core::proxy::{NullInvoker, interceptor, provider};
use dynproxy_core::values::Instance;
use dynproxy_core::{MethodSpec, ProxyFactory, TypeBuilder, TypeLoader, TypeRef, Value, ValueType};

/// `bench.Adder` defined in `loader`, plus a plain implementation of it.
fn adder(loader: &TypeLoader) -> (TypeRef, Value) {
    let interface = loader
        .define(
            TypeBuilder::interface("bench.Adder")
                .method(
                    MethodSpec::new("add")
                        .params([ValueType::Int, ValueType::Int])
                        .returns(ValueType::Int),
                )
                .build()
                .unwrap(),
        )
        .unwrap();
    let class = Arc::new(
        TypeBuilder::class("bench.AdderImpl")
            .implements(&interface)
            .method(
                MethodSpec::new("add")
                    .params([ValueType::Int, ValueType::Int])
                    .returns(ValueType::Int)
                    .body(|_, args| {
                        let a = args[0].as_int().unwrap_or(0);
                        let b = args[1].as_int().unwrap_or(0);
                        Ok(Value::Int(a.wrapping_add(b)))
                    }),
            )
            .build()
            .unwrap(),
    );
    let target = Value::Object(Instance::new(&class).unwrap());
    (interface, target)
}

fn call_add(receiver: &Value) -> Value {
    receiver
        .invoke(
            "add",
            [ValueType::Int, ValueType::Int],
            vec![Value::Int(black_box(2)), Value::Int(black_box(3))],
        )
        .unwrap()
}

fn bench_direct(c: &mut Criterion) {
    let (_, target) = adder(&TypeLoader::new("bench"));
    c.bench_function("direct/add", |b| b.iter(|| call_add(&target)));
}

fn bench_proxy(c: &mut Criterion) {
    let loader = TypeLoader::new("bench");
    let (interface, target) = adder(&loader);
    let factory = ProxyFactory::default();
    let mut group = c.benchmark_group("proxy");

    let invoker = Value::Object(
        factory
            .create_invoker_proxy(Some(&loader), NullInvoker, &[interface.clone()])
            .unwrap(),
    );
    group.bench_function("invoker", |b| b.iter(|| call_add(&invoker)));

    let delegate = target.clone();
    let delegator = Value::Object(
        factory
            .create_delegator_proxy(
                Some(&loader),
                provider::from_fn(move || Ok(delegate.clone())),
                &[interface.clone()],
            )
            .unwrap(),
    );
    group.bench_function("delegator", |b| b.iter(|| call_add(&delegator)));

    let intercepting = Value::Object(
        factory
            .create_interceptor_proxy(
                Some(&loader),
                target,
                interceptor::from_fn(|invocation| invocation.proceed()),
                &[interface],
            )
            .unwrap(),
    );
    group.bench_function("interceptor", |b| b.iter(|| call_add(&intercepting)));

    group.finish();
}

fn bench_class_lookup(c: &mut Criterion) {
    let loader = TypeLoader::new("bench");
    let (interface, _) = adder(&loader);
    let factory = ProxyFactory::default();
    let types = [interface];
    let _held = factory.proxy_class(Some(&loader), &types).unwrap();

    c.bench_function("class_lookup/hit", |b| {
        b.iter(|| factory.proxy_class(Some(&loader), black_box(&types)).unwrap())
    });
}

criterion_group!(benches, bench_direct, bench_proxy, bench_class_lookup);
criterion_main!(benches);
