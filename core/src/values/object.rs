use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::throwable::Throwable;
use crate::types::TypeRef;

/// A heap object: anything with a runtime class.
///
/// Implemented by [`Instance`] for ordinary objects and by proxy instances.
pub trait Object: Any + Send + Sync {
    fn class(&self) -> &TypeRef;

    /// Opaque per-instance state, as produced by the class's constructor.
    fn state(&self) -> Option<&(dyn Any + Send + Sync)> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

pub type ObjectRef = Arc<dyn Object>;

impl dyn Object {
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn state_ref<S: Any>(&self) -> Option<&S> {
        let state: &dyn Any = self.state()?;
        state.downcast_ref::<S>()
    }
}

impl fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:x}", self.class().name(), address_hash(self) as u32)
    }
}

/// Reference identity.
pub fn same_object(a: &ObjectRef, b: &ObjectRef) -> bool {
    core::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Hash derived from the object's address; stable for the object's lifetime.
pub fn identity_hash(object: &ObjectRef) -> i32 {
    address_hash(object.as_ref())
}

fn address_hash(object: &dyn Object) -> i32 {
    let addr = (object as *const dyn Object).cast::<()>() as usize as u64;
    let mixed = (addr >> 3) ^ (addr >> 35);
    (mixed as u32 & 0x7fff_ffff) as i32
}

/// An ordinary object: a class plus whatever state its constructor produced.
pub struct Instance {
    class: TypeRef,
    state: Option<Box<dyn Any + Send + Sync>>,
}

impl Instance {
    /// Runs the no-argument constructor of `class`.
    pub fn new(class: &TypeRef) -> Result<ObjectRef, Throwable> {
        if class.is_interface() {
            return Err(Throwable::instantiation(class.name()));
        }
        if class.default_constructor().is_none() {
            return Err(Throwable::instantiation(format!(
                "{} has no no-argument constructor",
                class.name()
            )));
        }
        Ok(Arc::new(Instance {
            class: class.clone(),
            state: class.new_state(),
        }))
    }

    /// An instance with explicitly supplied state, bypassing constructors.
    pub fn with_state<S: Any + Send + Sync>(class: &TypeRef, state: S) -> ObjectRef {
        Arc::new(Instance {
            class: class.clone(),
            state: Some(Box::new(state)),
        })
    }
}

impl Object for Instance {
    fn class(&self) -> &TypeRef {
        &self.class
    }

    fn state(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.state.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
