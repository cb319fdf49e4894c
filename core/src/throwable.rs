//! Exceptions raised by method bodies and handlers.

use core::fmt;

use ecow::EcoString;

use crate::stdlib::{self, names};
use crate::types::TypeRef;

/// An exception value: a class under `java.lang.Throwable`, an optional
/// message, and an optional cause.
#[derive(Clone)]
pub struct Throwable {
    class: TypeRef,
    message: Option<EcoString>,
    cause: Option<Box<Throwable>>,
}

impl Throwable {
    pub fn new(class: &TypeRef, message: impl Into<EcoString>) -> Self {
        Self {
            class: class.clone(),
            message: Some(message.into()),
            cause: None,
        }
    }

    /// An exception without a message.
    pub fn of(class: &TypeRef) -> Self {
        Self {
            class: class.clone(),
            message: None,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: Throwable) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn class(&self) -> &TypeRef {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> Option<&Throwable> {
        self.cause.as_deref()
    }

    pub fn is_instance_of(&self, name: &str) -> bool {
        self.class.is_subtype_of(name)
    }

    /// Must be declared by a method that lets it escape.
    pub fn is_checked(&self) -> bool {
        self.is_instance_of(names::THROWABLE)
            && !self.is_instance_of(names::RUNTIME_EXCEPTION)
            && !self.is_instance_of(names::ERROR)
    }

    pub fn is_unchecked(&self) -> bool {
        !self.is_checked()
    }

    // ============================================================================
    // Reflection wrappers
    // ============================================================================

    /// `InvocationTargetException` carrying what a reflectively invoked body raised.
    pub fn invocation_target(cause: Throwable) -> Self {
        Self::of(stdlib::bootstrap().invocation_target_exception()).with_cause(cause)
    }

    /// `UndeclaredThrowableException` carrying a checked exception the
    /// method does not declare.
    pub fn undeclared(cause: Throwable) -> Self {
        Self::of(stdlib::bootstrap().undeclared_throwable_exception()).with_cause(cause)
    }

    pub fn is_invocation_target(&self) -> bool {
        self.class_name() == names::INVOCATION_TARGET_EXCEPTION
    }

    /// Strips one level of invocation-target wrapping.
    pub fn unwrap_invocation_target(self) -> Throwable {
        if !self.is_invocation_target() {
            return self;
        }
        match self.cause {
            Some(cause) => *cause,
            None => Throwable { cause: None, ..self },
        }
    }

    // ============================================================================
    // Runtime exceptions raised by the object model
    // ============================================================================

    pub fn null_pointer(message: impl Into<EcoString>) -> Self {
        Self::new(stdlib::bootstrap().null_pointer_exception(), message)
    }

    pub fn class_cast(message: impl Into<EcoString>) -> Self {
        Self::new(stdlib::bootstrap().class_cast_exception(), message)
    }

    pub fn illegal_argument(message: impl Into<EcoString>) -> Self {
        Self::new(stdlib::bootstrap().illegal_argument_exception(), message)
    }

    pub fn illegal_state(message: impl Into<EcoString>) -> Self {
        Self::new(stdlib::bootstrap().illegal_state_exception(), message)
    }

    pub fn unsupported_operation(message: impl Into<EcoString>) -> Self {
        Self::new(stdlib::bootstrap().unsupported_operation_exception(), message)
    }

    pub fn index_out_of_bounds(message: impl Into<EcoString>) -> Self {
        Self::new(stdlib::bootstrap().index_out_of_bounds_exception(), message)
    }

    pub fn abstract_method(message: impl Into<EcoString>) -> Self {
        Self::new(stdlib::bootstrap().abstract_method_error(), message)
    }

    pub fn no_such_method(message: impl Into<EcoString>) -> Self {
        Self::new(stdlib::bootstrap().no_such_method_error(), message)
    }

    pub fn instantiation(message: impl Into<EcoString>) -> Self {
        Self::new(stdlib::bootstrap().instantiation_exception(), message)
    }
}

impl fmt::Display for Throwable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.class.name(), message),
            None => write!(f, "{}", self.class.name()),
        }
    }
}

impl fmt::Debug for Throwable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throwable")
            .field("class", &self.class.name())
            .field("message", &self.message)
            .field("cause", &self.cause)
            .finish()
    }
}

impl std::error::Error for Throwable {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeBuilder;
    use std::error::Error as _;
    use std::sync::Arc;

    fn checked_exception() -> TypeRef {
        Arc::new(
            TypeBuilder::class("test.BrokenWidgetException")
                .extends(stdlib::bootstrap().exception())
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_checked_classification() {
        let bootstrap = stdlib::bootstrap();
        assert!(Throwable::of(bootstrap.io_exception()).is_checked());
        assert!(Throwable::of(&checked_exception()).is_checked());
        assert!(Throwable::null_pointer("x").is_unchecked());
        assert!(Throwable::abstract_method("x").is_unchecked());
        assert!(Throwable::undeclared(Throwable::of(bootstrap.io_exception())).is_unchecked());
        assert!(Throwable::invocation_target(Throwable::null_pointer("x")).is_checked());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Throwable::illegal_argument("bad").to_string(),
            "java.lang.IllegalArgumentException: bad"
        );
        assert_eq!(
            Throwable::of(stdlib::bootstrap().io_exception()).to_string(),
            "java.io.IOException"
        );
    }

    #[test]
    fn test_unwrap_invocation_target() {
        let cause = Throwable::of(stdlib::bootstrap().io_exception());
        let wrapped = Throwable::invocation_target(cause);
        assert!(wrapped.is_invocation_target());
        assert_eq!(wrapped.source().map(|s| s.to_string()).as_deref(), Some("java.io.IOException"));

        let unwrapped = wrapped.unwrap_invocation_target();
        assert_eq!(unwrapped.class_name(), names::IO_EXCEPTION);

        // Anything else is returned as is, cause included.
        let undeclared = Throwable::undeclared(unwrapped).unwrap_invocation_target();
        assert_eq!(undeclared.class_name(), names::UNDECLARED_THROWABLE_EXCEPTION);
        assert_eq!(
            undeclared.cause().map(Throwable::class_name),
            Some(names::IO_EXCEPTION)
        );
    }
}
