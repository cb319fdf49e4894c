//! Implementation of the `#[proxy_interface]` attribute macro

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Expr, ExprLit, FnArg, GenericArgument, ItemTrait, Lit, LitStr, Meta, Pat,
    PathArguments, ReturnType, Token, TraitItem, TraitItemFn, Type, parse_macro_input,
};

pub fn proxy_interface_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input_trait = parse_macro_input!(item as ItemTrait);

    let args = match parse_attribute(attr) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };
    let interface_name = args.name.unwrap_or_else(|| input_trait.ident.to_string());

    let methods = match parse_methods(&mut input_trait) {
        Ok(methods) => methods,
        Err(err) => return err.to_compile_error().into(),
    };

    generate_code(&interface_name, &args.krate, &input_trait, &methods).into()
}

/// Arguments of `#[proxy_interface(...)]`
struct InterfaceArgs {
    /// Qualified interface name, if given
    name: Option<String>,
    /// Path the expansion reaches the runtime through
    krate: syn::Path,
}

/// A trait method as seen by the generated code
struct MethodInfo {
    /// Rust method name
    ident: syn::Ident,
    /// Method name in the interface (lowerCamelCase of the Rust name)
    name: String,
    /// Parameter names and types (excluding the receiver)
    params: Vec<(syn::Ident, Box<Type>)>,
    /// `T` of the declared `Result<T, E>`
    ok_type: Box<Type>,
    /// Exception types from `#[throws(...)]`
    throws: Vec<LitStr>,
}

/// Parse `name = "..."` and `crate = "..."`, both optional
fn parse_attribute(attr: TokenStream) -> syn::Result<InterfaceArgs> {
    // #[proxy_interface(name = "demo.Greeter", crate = "dynproxy")]
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse(attr)?;

    let mut args = InterfaceArgs { name: None, krate: syn::parse_quote!(::dynproxy_core) };
    for meta in metas {
        let Meta::NameValue(nv) = &meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected attribute format: #[proxy_interface(name = \"package.Interface\")]",
            ));
        };
        let value = match &nv.value {
            Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => lit,
            other => {
                return Err(syn::Error::new_spanned(other, "attribute value must be a string literal"));
            }
        };
        if nv.path.is_ident("name") {
            args.name = Some(value.value());
        } else if nv.path.is_ident("crate") {
            args.krate = value.parse()?;
        } else {
            return Err(syn::Error::new_spanned(&nv.path, "expected 'name' or 'crate' attribute"));
        }
    }
    Ok(args)
}

/// `compare_to` -> `compareTo`
fn to_lower_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Check if a type is `Result<T, E>` and extract the Ok type `T`.
fn extract_result_ok_type(ty: &Type) -> Option<Box<Type>> {
    if let Type::Path(type_path) = ty {
        if let Some(last_segment) = type_path.path.segments.last() {
            if last_segment.ident == "Result" {
                if let PathArguments::AngleBracketed(args) = &last_segment.arguments {
                    if let Some(GenericArgument::Type(ok_type)) = args.args.first() {
                        return Some(Box::new(ok_type.clone()));
                    }
                }
            }
        }
    }
    None
}

/// Remove `#[throws(...)]` attributes, returning the exception names they list
fn take_throws(attrs: &mut Vec<Attribute>) -> syn::Result<Vec<LitStr>> {
    let mut throws = Vec::new();
    let mut kept = Vec::with_capacity(attrs.len());
    for attr in attrs.drain(..) {
        if attr.path().is_ident("throws") {
            let names = attr.parse_args_with(
                Punctuated::<LitStr, Token![,]>::parse_terminated,
            )?;
            throws.extend(names);
        } else {
            kept.push(attr);
        }
    }
    *attrs = kept;
    Ok(throws)
}

fn parse_method(method: &mut TraitItemFn) -> syn::Result<MethodInfo> {
    if method.default.is_some() {
        return Err(syn::Error::new_spanned(
            &method.sig,
            "proxy_interface methods cannot have a default body",
        ));
    }
    if !method.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &method.sig.generics,
            "proxy_interface methods cannot be generic",
        ));
    }

    let throws = take_throws(&mut method.attrs)?;
    let mut inputs = method.sig.inputs.iter();

    // Receiver: &self
    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &method.sig,
                "proxy_interface methods must take &self",
            ));
        }
    }

    let mut params = Vec::new();
    for input in inputs {
        match input {
            FnArg::Typed(pat_type) => match &*pat_type.pat {
                Pat::Ident(pat_ident) => {
                    params.push((pat_ident.ident.clone(), pat_type.ty.clone()));
                }
                other => {
                    return Err(syn::Error::new_spanned(other, "Expected identifier pattern"));
                }
            },
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(receiver, "Unexpected receiver"));
            }
        }
    }

    let ok_type = match &method.sig.output {
        ReturnType::Type(_, ty) => extract_result_ok_type(ty),
        ReturnType::Default => None,
    }
    .ok_or_else(|| {
        syn::Error::new_spanned(
            &method.sig,
            "proxy_interface methods must return Result<T, Throwable>",
        )
    })?;

    Ok(MethodInfo {
        ident: method.sig.ident.clone(),
        name: to_lower_camel_case(&method.sig.ident.to_string()),
        params,
        ok_type,
        throws,
    })
}

fn parse_methods(input_trait: &mut ItemTrait) -> syn::Result<Vec<MethodInfo>> {
    if !input_trait.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input_trait.generics,
            "proxy_interface traits cannot be generic",
        ));
    }

    let mut methods = Vec::new();
    for item in &mut input_trait.items {
        match item {
            TraitItem::Fn(method) => methods.push(parse_method(method)?),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "proxy_interface traits may only contain methods",
                ));
            }
        }
    }
    Ok(methods)
}

/// Generate the trait, its descriptor struct, and the `ObjectRef` impl
fn generate_code(
    interface_name: &str,
    krate: &syn::Path,
    input_trait: &ItemTrait,
    methods: &[MethodInfo],
) -> TokenStream2 {
    let trait_ident = &input_trait.ident;
    let vis = &input_trait.vis;
    let struct_ident = format_ident!("{}Interface", trait_ident);

    let method_specs = methods.iter().map(|method| {
        let name = &method.name;
        let param_types = method.params.iter().map(|(_, ty)| ty);
        let ok_type = &method.ok_type;
        let throws = &method.throws;
        quote! {
            .method(
                #krate::MethodSpec::new(#name)
                    .params([#( <#param_types as #krate::values::Typed>::value_type() ),*])
                    .returns(<#ok_type as #krate::values::Typed>::value_type())
                    #( .throws(&loader.require(#throws)?) )*
            )
        }
    });

    let forwarders = methods.iter().map(|method| {
        let ident = &method.ident;
        let name = &method.name;
        let param_names: Vec<_> = method.params.iter().map(|(name, _)| name).collect();
        let param_types: Vec<_> = method.params.iter().map(|(_, ty)| ty).collect();
        let ok_type = &method.ok_type;
        quote! {
            fn #ident(&self, #( #param_names: #param_types ),*) -> ::core::result::Result<#ok_type, #krate::Throwable> {
                let result = #krate::reflect::call_object(
                    self,
                    #name,
                    [#( <#param_types as #krate::values::Typed>::value_type() ),*],
                    ::std::vec![#( #krate::values::IntoValue::into_value(#param_names) ),*],
                )?;
                <#ok_type as #krate::values::FromValue>::from_value(result)
            }
        }
    });

    quote! {
        #input_trait

        /// Runtime description of the interface.
        #vis struct #struct_ident;

        impl #struct_ident {
            pub const NAME: &'static str = #interface_name;

            /// Builds the interface descriptor, resolving `throws` types through `loader`.
            pub fn descriptor(
                loader: &#krate::TypeLoader,
            ) -> ::core::result::Result<#krate::TypeDescriptor, #krate::ProxyError> {
                let _ = loader;
                #krate::TypeBuilder::interface(Self::NAME)
                    #( #method_specs )*
                    .build()
            }

            /// Builds the interface and defines it in `loader`.
            pub fn define(
                loader: &#krate::TypeLoader,
            ) -> ::core::result::Result<#krate::TypeRef, #krate::ProxyError> {
                loader.define(Self::descriptor(loader)?)
            }
        }

        impl #trait_ident for #krate::ObjectRef {
            #( #forwarders )*
        }
    }
}

#[cfg(test)]
mod tests {
    use super::to_lower_camel_case;

    #[test]
    fn test_lower_camel_case() {
        assert_eq!(to_lower_camel_case("compare_to"), "compareTo");
        assert_eq!(to_lower_camel_case("run"), "run");
        assert_eq!(to_lower_camel_case("char_at"), "charAt");
        assert_eq!(to_lower_camel_case("_private_name"), "privateName");
    }
}
