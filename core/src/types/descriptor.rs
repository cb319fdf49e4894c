use core::any::Any;
use core::fmt;
use std::sync::Arc;

use ecow::EcoString;
use hashbrown::HashMap;

use super::{MethodRef, MethodSignature, Params, ValueType};
use crate::stdlib::names;

pub type TypeRef = Arc<TypeDescriptor>;

/// Produces the opaque state of a freshly constructed instance.
pub type StateInit = Arc<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Interface,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Package => write!(f, "package"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// A constructor of a class.
///
/// Only the no-argument constructor can be run by this crate (it is what a
/// proxy subclass chains to); constructors with parameters are recorded so
/// that a class lacking a usable default constructor can be detected.
#[derive(Clone)]
pub struct Constructor {
    params: Params,
    visibility: Visibility,
    init: Option<StateInit>,
}

impl Constructor {
    pub fn new(visibility: Visibility, params: impl IntoIterator<Item = ValueType>) -> Self {
        Self {
            params: params.into_iter().collect(),
            visibility,
            init: None,
        }
    }

    /// A no-argument constructor that initializes instance state.
    pub fn with_state<S, F>(visibility: Visibility, init: F) -> Self
    where
        S: Any + Send + Sync,
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self {
            params: Params::new(),
            visibility,
            init: Some(Arc::new(move || Box::new(init()) as Box<dyn Any + Send + Sync>)),
        }
    }

    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_default(&self) -> bool {
        self.params.is_empty()
    }

    /// Visible to a subclass in another package.
    pub fn is_visible_to_subclass(&self) -> bool {
        matches!(self.visibility, Visibility::Public | Visibility::Protected)
    }

    /// Runs the state initializer, if any.
    pub fn instantiate(&self) -> Option<Box<dyn Any + Send + Sync>> {
        self.init.as_ref().map(|init| init())
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .field("stateful", &self.init.is_some())
            .finish()
    }
}

/// Runtime description of an interface or class.
///
/// Descriptors are immutable once built and shared as [`TypeRef`]. Type
/// identity is pointer identity of the `Arc`: two loaders may hold distinct
/// types with the same name.
pub struct TypeDescriptor {
    name: EcoString,
    kind: TypeKind,
    is_final: bool,
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
    methods: Vec<MethodRef>,
    method_index: HashMap<MethodSignature, usize>,
    constructors: Vec<Constructor>,
}

impl TypeDescriptor {
    pub(crate) fn new(
        name: EcoString,
        kind: TypeKind,
        is_final: bool,
        superclass: Option<TypeRef>,
        interfaces: Vec<TypeRef>,
        methods: Vec<MethodRef>,
        constructors: Vec<Constructor>,
    ) -> Self {
        let method_index = methods
            .iter()
            .enumerate()
            .map(|(i, method)| (method.signature(), i))
            .collect();
        Self {
            name,
            kind,
            is_final,
            superclass,
            interfaces,
            methods,
            method_index,
            constructors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Direct superclass. `None` for interfaces and for `java.lang.Object`.
    pub fn superclass(&self) -> Option<&TypeRef> {
        self.superclass.as_ref()
    }

    /// Directly implemented (or, for interfaces, extended) interfaces.
    pub fn interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    pub fn declared_methods(&self) -> &[MethodRef] {
        &self.methods
    }

    pub fn declared_method(&self, signature: &MethodSignature) -> Option<&MethodRef> {
        self.method_index.get(signature).map(|&i| &self.methods[i])
    }

    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    pub fn default_constructor(&self) -> Option<&Constructor> {
        self.constructors.iter().find(|c| c.is_default())
    }

    /// Whether a subclass can chain to a no-argument constructor.
    pub fn has_visible_default_constructor(&self) -> bool {
        self.constructors
            .iter()
            .any(|c| c.is_default() && c.is_visible_to_subclass())
    }

    /// State for a new instance: the initializer of the nearest no-argument
    /// constructor along the superclass chain that has one.
    pub fn new_state(&self) -> Option<Box<dyn Any + Send + Sync>> {
        let mut current = Some(self);
        while let Some(ty) = current {
            if let Some(state) = ty.default_constructor().and_then(Constructor::instantiate) {
                return Some(state);
            }
            current = ty.superclass.as_deref();
        }
        None
    }

    /// Whether a value of this type can be used where `name` is expected.
    pub fn is_subtype_of(&self, name: &str) -> bool {
        if self.name.as_str() == name || name == names::OBJECT {
            return true;
        }
        self.superclass
            .as_ref()
            .is_some_and(|superclass| superclass.is_subtype_of(name))
            || self.interfaces.iter().any(|i| i.is_subtype_of(name))
    }

    pub fn is_assignable_to(&self, other: &TypeDescriptor) -> bool {
        self.is_subtype_of(other.name())
    }

    /// Public methods declared or inherited, most specific first.
    ///
    /// Own methods come first, then the superclass chain, then implemented
    /// interfaces depth first. Overridden methods are listed again at each
    /// level that declares them; callers de-duplicate by signature.
    /// Interfaces do not inherit the methods of `java.lang.Object`.
    pub fn public_methods(&self) -> Vec<MethodRef> {
        let mut methods = Vec::new();
        self.collect_public_methods(&mut methods);
        methods
    }

    fn collect_public_methods(&self, out: &mut Vec<MethodRef>) {
        out.extend(self.methods.iter().filter(|m| m.is_public()).cloned());
        if let Some(superclass) = &self.superclass {
            superclass.collect_public_methods(out);
        }
        for interface in &self.interfaces {
            interface.collect_public_methods(out);
        }
    }

    /// First public method with `signature`, searching like [`Self::public_methods`].
    pub fn find_method(&self, signature: &MethodSignature) -> Option<MethodRef> {
        if let Some(method) = self.declared_method(signature).filter(|m| m.is_public()) {
            return Some(method.clone());
        }
        if let Some(method) = self
            .superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(signature))
        {
            return Some(method);
        }
        self.interfaces
            .iter()
            .find_map(|interface| interface.find_method(signature))
    }

    /// The body virtual dispatch selects for `signature` on an instance of
    /// this type: the nearest concrete declaration along the superclass
    /// chain, else a default body from an interface.
    pub fn find_implementation(&self, signature: &MethodSignature) -> Option<MethodRef> {
        let mut current = Some(self);
        while let Some(ty) = current {
            if let Some(method) = ty.declared_method(signature).filter(|m| !m.is_abstract()) {
                return Some(method.clone());
            }
            current = ty.superclass.as_deref();
        }
        let mut current = Some(self);
        while let Some(ty) = current {
            if let Some(method) = ty
                .interfaces
                .iter()
                .find_map(|interface| interface.find_implementation(signature))
            {
                return Some(method);
            }
            current = ty.superclass.as_deref();
        }
        None
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("is_final", &self.is_final)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name()))
            .field(
                "interfaces",
                &self.interfaces.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .field("methods", &self.methods)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TypeKind::Interface => write!(f, "interface {}", self.name),
            TypeKind::Class => write!(f, "class {}", self.name),
        }
    }
}
