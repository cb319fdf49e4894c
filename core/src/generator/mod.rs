//! Proxy class generation.
//!
//! A proxy class is a final class extending the requested superclass (or
//! `java.lang.Object`) and implementing the requested interfaces. Each
//! resolved method is redeclared with a forwarding body that hands the call
//! to the instance's handler, so the class itself is just a dispatch table.

use core::sync::atomic::{AtomicU64, Ordering};

use ecow::{EcoString, eco_format};
use tracing::debug;

use crate::api::ProxyError;
use crate::resolver;
use crate::stdlib::{self, names};
use crate::types::{TypeDescriptor, TypeKind, TypeLoader, TypeRef, TypeSet};

mod class;
mod forwarder;

#[cfg(test)]
mod generator_test;

pub use class::ProxyClass;

static NEXT_PROXY_ID: AtomicU64 = AtomicU64::new(0);

/// How proxy classes relate to the requested types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Subclass the one requested class, if any, and implement the interfaces.
    #[default]
    Subclassing,
    /// Implement interfaces only; any class in the type set is rejected.
    Interfaces,
}

#[derive(Debug, Clone, Default)]
pub struct ProxyClassGenerator {
    backend: Backend,
}

impl ProxyClassGenerator {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The class a proxy for `types` extends, or why there is none.
    pub fn superclass_for(&self, types: &TypeSet) -> Result<TypeRef, ProxyError> {
        let classes: Vec<&TypeRef> = types.classes().collect();

        if self.backend == Backend::Interfaces {
            if let Some(class) = classes.first() {
                return Err(ProxyError::configuration(
                    format!("{} is not an interface", class.name()),
                    [class.name()],
                ));
            }
            return Ok(stdlib::bootstrap().object().clone());
        }

        match classes.as_slice() {
            [] => Ok(stdlib::bootstrap().object().clone()),
            [class] => {
                if class.is_final() {
                    Err(ProxyError::configuration(
                        format!("Proxy class cannot extend {} as it is final.", class.name()),
                        [class.name()],
                    ))
                } else if !class.has_visible_default_constructor() {
                    Err(ProxyError::configuration(
                        format!(
                            "Proxy class cannot extend {}, because it has no visible \"default\" constructor.",
                            class.name()
                        ),
                        [class.name()],
                    ))
                } else {
                    Ok((*class).clone())
                }
            }
            many => {
                let names: Vec<&str> = many.iter().map(|class| class.name()).collect();
                Err(ProxyError::configuration(
                    format!(
                        "Proxy class cannot extend {}; multiple inheritance not allowed.",
                        names.join(", ")
                    ),
                    names,
                ))
            }
        }
    }

    pub fn can_proxy(&self, types: &TypeSet) -> bool {
        self.superclass_for(types).is_ok()
    }

    /// Builds a new, uniquely named proxy class for `types`.
    ///
    /// Every requested type must be the one `loader` resolves its name to.
    pub fn generate(&self, loader: &TypeLoader, types: &TypeSet) -> Result<ProxyClass, ProxyError> {
        types.ensure_visible_from(loader)?;
        let superclass = self.superclass_for(types)?;
        let interfaces: Vec<TypeRef> = types.interfaces().cloned().collect();

        // Proxies always answer equals, hashCode and toString themselves.
        let object = stdlib::bootstrap().object().clone();
        let methods = resolver::resolve(&types.iter().cloned().chain([object]).collect());

        let name = self.class_name(&superclass, &interfaces);
        let forwarders = methods
            .iter()
            .map(|method| forwarder::forwarding_method(&name, method))
            .collect();

        let descriptor = TypeDescriptor::new(
            name,
            TypeKind::Class,
            true,
            Some(superclass.clone()),
            interfaces.clone(),
            forwarders,
            Vec::new(),
        );

        debug!(
            class = %descriptor.name(),
            loader = %loader.name(),
            types = %types,
            methods = methods.len(),
            "Generated proxy class"
        );

        Ok(ProxyClass::new(
            descriptor,
            superclass,
            interfaces,
            methods,
            types.cache_key(),
        ))
    }

    fn class_name(&self, superclass: &TypeRef, interfaces: &[TypeRef]) -> EcoString {
        let id = NEXT_PROXY_ID.fetch_add(1, Ordering::Relaxed);
        match self.backend {
            Backend::Interfaces => eco_format!("$Proxy{}", id),
            Backend::Subclassing => {
                let base = match interfaces.first() {
                    Some(interface) if superclass.name() == names::OBJECT => interface.name(),
                    _ => superclass.name(),
                };
                eco_format!("{}$$Proxy{}", base, id)
            }
        }
    }
}
