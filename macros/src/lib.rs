//! Procedural macros for dynproxy interfaces
//!
//! This crate provides the `#[proxy_interface]` attribute macro, which turns
//! a Rust trait into a proxyable interface plus a typed facade for calling
//! it on any object.

extern crate proc_macro;

use proc_macro::TokenStream;

mod proxy_interface;

/// Declare a proxyable interface from a Rust trait.
///
/// # Example
///
/// ```ignore
/// #[proxy_interface(name = "demo.Greeter")]
/// pub trait Greeter {
///     fn greet(&self, name: String) -> Result<String, Throwable>;
///
///     #[throws("java.io.IOException")]
///     fn load(&self) -> Result<(), Throwable>;
/// }
/// ```
///
/// This generates:
/// - The trait itself, with `#[throws]` attributes removed
/// - Struct `GreeterInterface` with `NAME`, `descriptor(loader)` and
///   `define(loader)`
/// - `impl Greeter for ObjectRef`, so proxies (and any other object of a
///   class implementing the interface) can be called through the trait
///
/// # Attribute
///
/// - `name`: The qualified interface name (string literal). Defaults to the
///   trait name.
/// - `crate`: Path to the runtime the expansion refers to (string literal).
///   Defaults to `dynproxy_core`; code depending only on the `dynproxy`
///   facade passes `crate = "dynproxy"`.
///
/// # Methods
///
/// Methods take `&self` and return `Result<T, Throwable>`. Parameters must
/// implement `IntoValue`, and `T` must implement `FromValue`; both map to
/// the method's signature through `Typed`. Interface method names are the
/// lowerCamelCase of the Rust names (`compare_to` becomes `compareTo`).
///
/// `#[throws("qualified.Name", ...)]` lists declared exceptions, looked up
/// in the loader passed to `descriptor`.
#[proc_macro_attribute]
pub fn proxy_interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    proxy_interface::proxy_interface_impl(attr, item)
}
