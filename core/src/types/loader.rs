use core::cell::RefCell;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use ecow::EcoString;
use hashbrown::HashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use super::{TypeDescriptor, TypeRef};
use crate::api::ProxyError;
use crate::stdlib;
use crate::sync::{read, write};

static NEXT_LOADER_ID: AtomicU64 = AtomicU64::new(0);

static SYSTEM: Lazy<TypeLoader> =
    Lazy::new(|| TypeLoader::with_parent("system", TypeLoader::bootstrap().clone()));

thread_local! {
    static CONTEXT: RefCell<Option<TypeLoader>> = const { RefCell::new(None) };
}

/// Identity of a [`TypeLoader`], never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoaderId(u64);

struct LoaderInner {
    id: LoaderId,
    name: EcoString,
    parent: Option<TypeLoader>,
    types: RwLock<HashMap<EcoString, TypeRef>>,
}

/// A named registry of types; the unit proxy classes are cached under.
///
/// Lookups ask the parent first, so the bootstrap types are visible from
/// every loader and cannot be shadowed. Cloning is cheap and yields the same
/// loader.
#[derive(Clone)]
pub struct TypeLoader {
    inner: Arc<LoaderInner>,
}

impl TypeLoader {
    /// A loader whose parent is the system loader.
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self::with_parent(name, Self::system().clone())
    }

    pub fn with_parent(name: impl Into<EcoString>, parent: TypeLoader) -> Self {
        Self::build(name.into(), Some(parent), HashMap::new())
    }

    pub(crate) fn from_types(
        name: impl Into<EcoString>,
        types: impl IntoIterator<Item = TypeRef>,
    ) -> Self {
        let types = types
            .into_iter()
            .map(|ty| (EcoString::from(ty.name()), ty))
            .collect();
        Self::build(name.into(), None, types)
    }

    fn build(
        name: EcoString,
        parent: Option<TypeLoader>,
        types: HashMap<EcoString, TypeRef>,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                id: LoaderId(NEXT_LOADER_ID.fetch_add(1, Ordering::Relaxed)),
                name,
                parent,
                types: RwLock::new(types),
            }),
        }
    }

    /// The loader holding the built-in `java.*` types.
    pub fn bootstrap() -> &'static TypeLoader {
        stdlib::bootstrap().loader()
    }

    /// The default loader for application types.
    pub fn system() -> &'static TypeLoader {
        &SYSTEM
    }

    /// The current thread's context loader, or the system loader.
    pub fn context() -> TypeLoader {
        CONTEXT
            .with(|context| context.borrow().clone())
            .unwrap_or_else(|| Self::system().clone())
    }

    /// Makes this loader the current thread's context loader until the guard
    /// is dropped.
    pub fn enter_context(&self) -> ContextGuard {
        let previous = CONTEXT.with(|context| context.borrow_mut().replace(self.clone()));
        ContextGuard { previous }
    }

    pub fn id(&self) -> LoaderId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn parent(&self) -> Option<&TypeLoader> {
        self.inner.parent.as_ref()
    }

    pub fn ptr_eq(&self, other: &TypeLoader) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakTypeLoader {
        WeakTypeLoader {
            id: self.inner.id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Registers a type with this loader.
    ///
    /// Fails if a type of that name is already visible from here.
    pub fn define(&self, descriptor: TypeDescriptor) -> Result<TypeRef, ProxyError> {
        let visible_in_parent = self
            .parent()
            .is_some_and(|parent| parent.load(descriptor.name()).is_some());
        if visible_in_parent {
            return Err(ProxyError::DuplicateType {
                name: descriptor.name().to_string(),
                loader: self.name().to_string(),
            });
        }

        let mut types = write(&self.inner.types);
        if types.contains_key(descriptor.name()) {
            return Err(ProxyError::DuplicateType {
                name: descriptor.name().to_string(),
                loader: self.name().to_string(),
            });
        }
        let ty: TypeRef = Arc::new(descriptor);
        types.insert(EcoString::from(ty.name()), ty.clone());
        debug!(loader = %self.name(), ty = %ty.name(), "Defined type");
        Ok(ty)
    }

    /// Finds a type by qualified name, asking the parent first.
    pub fn load(&self, name: &str) -> Option<TypeRef> {
        self.parent()
            .and_then(|parent| parent.load(name))
            .or_else(|| read(&self.inner.types).get(name).cloned())
    }

    pub fn require(&self, name: &str) -> Result<TypeRef, ProxyError> {
        self.load(name).ok_or_else(|| ProxyError::UnknownType {
            name: name.to_string(),
            loader: self.name().to_string(),
        })
    }

    /// Fails unless `ty` is the very type this loader resolves its name to.
    ///
    /// A same-named type defined by an unrelated loader is not visible.
    pub fn ensure_visible(&self, ty: &TypeRef) -> Result<(), ProxyError> {
        match self.load(ty.name()) {
            Some(found) if Arc::ptr_eq(&found, ty) => Ok(()),
            _ => Err(ProxyError::UnknownType {
                name: ty.name().to_string(),
                loader: self.name().to_string(),
            }),
        }
    }

    /// Number of types defined directly by this loader.
    pub fn len(&self) -> usize {
        read(&self.inner.types).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for TypeLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeLoader")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("parent", &self.parent().map(|p| p.name()))
            .finish()
    }
}

/// A non-owning handle to a [`TypeLoader`].
#[derive(Clone)]
pub struct WeakTypeLoader {
    id: LoaderId,
    inner: Weak<LoaderInner>,
}

impl WeakTypeLoader {
    pub fn id(&self) -> LoaderId {
        self.id
    }

    pub fn upgrade(&self) -> Option<TypeLoader> {
        self.inner.upgrade().map(|inner| TypeLoader { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl fmt::Debug for WeakTypeLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakTypeLoader")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Restores the previous context loader on drop.
#[must_use = "the context loader is restored as soon as the guard is dropped"]
pub struct ContextGuard {
    previous: Option<TypeLoader>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CONTEXT.with(|context| *context.borrow_mut() = previous);
    }
}
