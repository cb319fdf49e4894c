use core::any::Any;
use std::sync::Arc;

use ecow::EcoString;
use hashbrown::HashSet;

use super::{Constructor, MethodSpec, TypeDescriptor, TypeKind, TypeRef, Visibility};
use crate::api::ProxyError;
use crate::stdlib;

#[derive(Clone)]
enum Superclass {
    /// `java.lang.Object` for classes, nothing for interfaces.
    Default,
    Explicit(TypeRef),
    None,
}

/// Builder for [`TypeDescriptor`]s.
///
/// ```ignore
/// let greeter = TypeBuilder::interface("demo.Greeter")
///     .method(MethodSpec::new("greet").param(ValueType::string()).returns(ValueType::string()))
///     .build()?;
/// let greeter = loader.define(greeter)?;
/// ```
#[derive(Clone)]
pub struct TypeBuilder {
    name: EcoString,
    kind: TypeKind,
    is_final: bool,
    superclass: Superclass,
    interfaces: Vec<TypeRef>,
    methods: Vec<MethodSpec>,
    constructors: Vec<Constructor>,
}

impl TypeBuilder {
    pub fn interface(name: impl Into<EcoString>) -> Self {
        Self::new(name.into(), TypeKind::Interface)
    }

    pub fn class(name: impl Into<EcoString>) -> Self {
        Self::new(name.into(), TypeKind::Class)
    }

    fn new(name: EcoString, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            is_final: false,
            superclass: Superclass::Default,
            interfaces: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn extends(mut self, superclass: &TypeRef) -> Self {
        self.superclass = Superclass::Explicit(superclass.clone());
        self
    }

    /// Root of the hierarchy; only `java.lang.Object` is built this way.
    pub(crate) fn without_superclass(mut self) -> Self {
        self.superclass = Superclass::None;
        self
    }

    pub fn implements(mut self, interface: &TypeRef) -> Self {
        self.interfaces.push(interface.clone());
        self
    }

    pub fn mark_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Adds a public no-argument constructor that initializes instance state.
    pub fn state<S, F>(self, init: F) -> Self
    where
        S: Any + Send + Sync,
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.constructor(Constructor::with_state(Visibility::Public, init))
    }

    pub fn build(self) -> Result<TypeDescriptor, ProxyError> {
        self.validate()?;
        Ok(self.build_unchecked())
    }

    fn validate(&self) -> Result<(), ProxyError> {
        let invalid = |reason: String| ProxyError::InvalidType {
            name: self.name.to_string(),
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid("type name is empty".to_string()));
        }

        match self.kind {
            TypeKind::Interface => {
                if self.is_final {
                    return Err(invalid("an interface cannot be final".to_string()));
                }
                if matches!(self.superclass, Superclass::Explicit(_)) {
                    return Err(invalid("an interface cannot extend a class".to_string()));
                }
                if !self.constructors.is_empty() {
                    return Err(invalid("an interface cannot declare constructors".to_string()));
                }
            }
            TypeKind::Class => {
                if let Superclass::Explicit(superclass) = &self.superclass {
                    if superclass.is_interface() {
                        return Err(invalid(format!(
                            "cannot extend {}, it is an interface",
                            superclass.name()
                        )));
                    }
                    if superclass.is_final() {
                        return Err(invalid(format!(
                            "cannot extend {}, it is final",
                            superclass.name()
                        )));
                    }
                }
            }
        }

        if let Some(class) = self.interfaces.iter().find(|i| !i.is_interface()) {
            return Err(invalid(format!(
                "cannot implement {}, it is not an interface",
                class.name()
            )));
        }

        let mut seen = HashSet::new();
        for method in &self.methods {
            if !seen.insert(method.signature()) {
                return Err(invalid(format!(
                    "duplicate method {}",
                    method.signature()
                )));
            }
            if method.is_final() && !method.has_body() {
                return Err(invalid(format!(
                    "final method {} has no body",
                    method.name()
                )));
            }
            if method.is_final() && self.kind == TypeKind::Interface {
                return Err(invalid(format!(
                    "interface method {} cannot be final",
                    method.name()
                )));
            }
        }

        Ok(())
    }

    /// Builds without validation. Used for bootstrap types, which are
    /// constructed before `java.lang.Object` is reachable.
    pub(crate) fn build_unchecked(self) -> TypeDescriptor {
        let superclass = match (self.kind, self.superclass) {
            (TypeKind::Interface, _) | (_, Superclass::None) => None,
            (TypeKind::Class, Superclass::Explicit(superclass)) => Some(superclass),
            (TypeKind::Class, Superclass::Default) => Some(stdlib::bootstrap().object().clone()),
        };

        let mut constructors = self.constructors;
        if self.kind == TypeKind::Class && constructors.is_empty() {
            constructors.push(Constructor::new(Visibility::Public, []));
        }

        let methods = self
            .methods
            .into_iter()
            .map(|spec| Arc::new(spec.declared_by(&self.name)))
            .collect();

        TypeDescriptor::new(
            self.name,
            self.kind,
            self.is_final,
            superclass,
            self.interfaces,
            methods,
            constructors,
        )
    }
}
