use core::fmt;
use std::sync::Arc;

use super::{TypeLoader, TypeRef};
use crate::api::ProxyError;

/// The ordered list of types a proxy must satisfy.
///
/// Duplicates (by type identity) are dropped, keeping the first occurrence.
/// Order is significant: it decides which of two identical signatures wins
/// during resolution and is part of the cache key.
#[derive(Clone, Default)]
pub struct TypeSet {
    types: Vec<TypeRef>,
}

impl TypeSet {
    pub fn new(types: impl IntoIterator<Item = TypeRef>) -> Self {
        let mut deduped: Vec<TypeRef> = Vec::new();
        for ty in types {
            if !deduped.iter().any(|seen| Arc::ptr_eq(seen, &ty)) {
                deduped.push(ty);
            }
        }
        Self { types: deduped }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.types.iter()
    }

    pub fn as_slice(&self) -> &[TypeRef] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Qualified names joined by commas, in order.
    pub fn cache_key(&self) -> String {
        let mut key = String::new();
        for (i, ty) in self.types.iter().enumerate() {
            if i > 0 {
                key.push(',');
            }
            key.push_str(ty.name());
        }
        key
    }

    /// Fails on the first member `loader` does not resolve to that very type.
    pub fn ensure_visible_from(&self, loader: &TypeLoader) -> Result<(), ProxyError> {
        self.types.iter().try_for_each(|ty| loader.ensure_visible(ty))
    }

    /// Non-interface members, in order.
    pub fn classes(&self) -> impl Iterator<Item = &TypeRef> {
        self.types.iter().filter(|ty| ty.is_class())
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &TypeRef> {
        self.types.iter().filter(|ty| ty.is_interface())
    }
}

impl FromIterator<TypeRef> for TypeSet {
    fn from_iter<I: IntoIterator<Item = TypeRef>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<TypeRef>> for TypeSet {
    fn from(types: Vec<TypeRef>) -> Self {
        Self::new(types)
    }
}

impl From<&[TypeRef]> for TypeSet {
    fn from(types: &[TypeRef]) -> Self {
        Self::new(types.iter().cloned())
    }
}

impl<'a> IntoIterator for &'a TypeSet {
    type Item = &'a TypeRef;
    type IntoIter = core::slice::Iter<'a, TypeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

impl fmt::Debug for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.types.iter().map(|ty| ty.name()))
            .finish()
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.cache_key())
    }
}
