use core::fmt;
use std::sync::Arc;

use crate::proxy::{Handler, ProxyInstance};
use crate::resolver::ResolvedMethodSet;
use crate::types::{MethodRef, MethodSignature, TypeDescriptor, TypeRef};
use crate::values::ObjectRef;

/// A generated proxy class.
///
/// The runtime [`descriptor`](Self::descriptor) is the class proxy instances
/// report; its declared methods are the forwarders, one per resolved method.
pub struct ProxyClass {
    descriptor: TypeRef,
    superclass: TypeRef,
    interfaces: Vec<TypeRef>,
    methods: ResolvedMethodSet,
    key: String,
}

static_assertions::assert_impl_all!(ProxyClass: Send, Sync);

impl ProxyClass {
    pub(super) fn new(
        descriptor: TypeDescriptor,
        superclass: TypeRef,
        interfaces: Vec<TypeRef>,
        methods: ResolvedMethodSet,
        key: String,
    ) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            superclass,
            interfaces,
            methods,
            key,
        }
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &TypeRef {
        &self.descriptor
    }

    pub fn superclass(&self) -> &TypeRef {
        &self.superclass
    }

    pub fn interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    /// The methods forwarded to the handler, as declared by the requested types.
    pub fn methods(&self) -> &ResolvedMethodSet {
        &self.methods
    }

    /// Cache key of the type set this class was generated for.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether calls to `signature` are forwarded to the handler.
    pub fn implements(&self, signature: &MethodSignature) -> bool {
        self.descriptor.declared_method(signature).is_some()
    }

    pub fn forwarder(&self, signature: &MethodSignature) -> Option<&MethodRef> {
        self.descriptor.declared_method(signature)
    }

    /// Instantiates the class, running the superclass's no-argument
    /// constructor for the instance state.
    pub fn new_instance(self: &Arc<Self>, handler: Handler) -> ObjectRef {
        let state = self.superclass.new_state();
        Arc::new(ProxyInstance::new(self.clone(), handler, state))
    }
}

impl fmt::Debug for ProxyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyClass")
            .field("name", &self.name())
            .field("superclass", &self.superclass.name())
            .field(
                "interfaces",
                &self.interfaces.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .field("methods", &self.methods.len())
            .finish()
    }
}
