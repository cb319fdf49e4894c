use core::fmt;
use std::sync::Arc;

use ecow::EcoString;

use super::{MethodSignature, Params, TypeRef, ValueType, Visibility};
use crate::stdlib::names;
use crate::throwable::Throwable;
use crate::values::Value;

pub type MethodRef = Arc<MethodDescriptor>;

/// Implementation of a method: receives the receiver and the boxed arguments.
pub type MethodBody = Arc<dyn Fn(&Value, &[Value]) -> Result<Value, Throwable> + Send + Sync>;

/// A method as seen through reflection.
///
/// A descriptor without a body is abstract: interface methods, or slots a
/// class leaves to its subclasses.
#[derive(Clone)]
pub struct MethodDescriptor {
    declaring_type: EcoString,
    name: EcoString,
    params: Params,
    return_type: ValueType,
    exceptions: Vec<TypeRef>,
    visibility: Visibility,
    is_final: bool,
    body: Option<MethodBody>,
}

impl MethodDescriptor {
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    pub fn return_type(&self) -> &ValueType {
        &self.return_type
    }

    /// Exception types listed in the method's `throws` clause.
    pub fn exceptions(&self) -> &[TypeRef] {
        &self.exceptions
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_abstract(&self) -> bool {
        self.body.is_none()
    }

    pub fn body(&self) -> Option<&MethodBody> {
        self.body.as_ref()
    }

    pub fn signature(&self) -> MethodSignature {
        MethodSignature::new(self.name.clone(), self.params.iter().cloned())
    }

    pub fn has_signature(&self, signature: &MethodSignature) -> bool {
        self.name.as_str() == signature.name() && self.params.as_slice() == signature.params()
    }

    /// Whether `throwable` is an instance of a type in the `throws` clause.
    pub fn declares(&self, throwable: &Throwable) -> bool {
        self.exceptions
            .iter()
            .any(|declared| throwable.is_instance_of(declared.name()))
    }

    /// `boolean equals(Object)`.
    pub fn is_equals(&self) -> bool {
        self.name.as_str() == "equals"
            && self.params.len() == 1
            && matches!(&self.params[0], ValueType::Reference(name) if name.as_str() == names::OBJECT)
    }

    /// `int hashCode()`.
    pub fn is_hash_code(&self) -> bool {
        self.name.as_str() == "hashCode" && self.params.is_empty()
    }

    /// `String toString()`.
    pub fn is_to_string(&self) -> bool {
        self.name.as_str() == "toString" && self.params.is_empty()
    }

    /// Copy of this method declared by `declaring_type` with a new body.
    pub(crate) fn redeclare(&self, declaring_type: &str, body: MethodBody) -> MethodDescriptor {
        MethodDescriptor {
            declaring_type: EcoString::from(declaring_type),
            is_final: false,
            body: Some(body),
            ..self.clone()
        }
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodDescriptor({})", self)
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.visibility)?;
        if self.is_final {
            write!(f, "final ")?;
        }
        if self.is_abstract() {
            write!(f, "abstract ")?;
        }
        write!(f, "{} {}.{}(", self.return_type, self.declaring_type, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")?;
        for (i, exception) in self.exceptions.iter().enumerate() {
            let sep = if i == 0 { " throws " } else { "," };
            write!(f, "{}{}", sep, exception.name())?;
        }
        Ok(())
    }
}

/// Builder for a method added through [`TypeBuilder::method`](super::TypeBuilder::method).
///
/// The declaring type is filled in when the enclosing type is built.
#[derive(Clone)]
pub struct MethodSpec {
    name: EcoString,
    params: Params,
    return_type: ValueType,
    exceptions: Vec<TypeRef>,
    visibility: Visibility,
    is_final: bool,
    body: Option<MethodBody>,
}

impl MethodSpec {
    /// A public, non-final, abstract `void name()`.
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
            return_type: ValueType::Void,
            exceptions: Vec::new(),
            visibility: Visibility::Public,
            is_final: false,
            body: None,
        }
    }

    pub fn param(mut self, ty: ValueType) -> Self {
        self.params.push(ty);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = ValueType>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn returns(mut self, ty: ValueType) -> Self {
        self.return_type = ty;
        self
    }

    pub fn throws(mut self, exception: &TypeRef) -> Self {
        self.exceptions.push(exception.clone());
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn mark_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Throwable> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub(crate) fn is_final(&self) -> bool {
        self.is_final
    }

    pub(crate) fn signature(&self) -> MethodSignature {
        MethodSignature::new(self.name.clone(), self.params.iter().cloned())
    }

    pub(crate) fn declared_by(self, declaring_type: &str) -> MethodDescriptor {
        MethodDescriptor {
            declaring_type: EcoString::from(declaring_type),
            name: self.name,
            params: self.params,
            return_type: self.return_type,
            exceptions: self.exceptions,
            visibility: self.visibility,
            is_final: self.is_final,
            body: self.body,
        }
    }
}
