//! Typed interfaces declared through the `dynproxy` facade alone.

use dynproxy::proxy::invoker;
use dynproxy::stdlib::names;
use dynproxy::{ObjectRef, ProxyFactory, Throwable, TypeLoader, Value, proxy_interface};
use pretty_assertions::assert_eq;

#[proxy_interface(name = "shop.Cart", crate = "dynproxy")]
pub trait Cart {
    fn add_item(&self, sku: String, quantity: i32) -> Result<i32, Throwable>;

    #[throws("java.io.IOException")]
    fn checkout(&self) -> Result<String, Throwable>;
}

fn cart_proxy(loader: &TypeLoader) -> ObjectRef {
    let cart = CartInterface::define(loader).unwrap();
    let io = loader.require(names::IO_EXCEPTION).unwrap();
    ProxyFactory::default()
        .create_invoker_proxy(
            Some(loader),
            invoker::from_fn(move |_, method, args| match method.name() {
                "addItem" => match &args[1] {
                    Value::Int(quantity) => Ok(Value::Int(quantity * 2)),
                    other => Err(Throwable::illegal_argument(other.to_string())),
                },
                _ => Err(Throwable::new(&io, "payment service down")),
            }),
            &[cart],
        )
        .unwrap()
}

#[test]
fn test_interface_defined_through_facade() {
    let loader = TypeLoader::new("shop");
    let proxy = cart_proxy(&loader);

    assert_eq!(CartInterface::NAME, "shop.Cart");
    assert!(loader.load("shop.Cart").unwrap().is_interface());
    assert_eq!(proxy.add_item("A-1".to_string(), 3).unwrap(), 6);
}

#[test]
fn test_declared_exception_through_facade() {
    let loader = TypeLoader::new("shop");
    let proxy = cart_proxy(&loader);

    let err = proxy.checkout().unwrap_err();
    assert_eq!(err.class_name(), names::IO_EXCEPTION);
    assert_eq!(err.message(), Some("payment service down"));
}
