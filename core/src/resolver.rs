//! Computes the methods a proxy class implements.
//!
//! Every public method of every requested type, declared or inherited,
//! contributes its signature. The first method seen for a signature is the
//! one implemented; a signature that is `final` anywhere is left out, since
//! the final body is inherited unchanged.

use hashbrown::HashSet;

use crate::types::{MethodRef, MethodSignature, TypeSet};

/// Methods a proxy class implements, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedMethodSet {
    methods: Vec<MethodRef>,
}

impl ResolvedMethodSet {
    pub fn methods(&self) -> &[MethodRef] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodRef> {
        self.methods.iter()
    }

    pub fn find(&self, signature: &MethodSignature) -> Option<&MethodRef> {
        self.methods.iter().find(|m| m.has_signature(signature))
    }

    pub fn contains(&self, signature: &MethodSignature) -> bool {
        self.find(signature).is_some()
    }
}

impl<'a> IntoIterator for &'a ResolvedMethodSet {
    type Item = &'a MethodRef;
    type IntoIter = core::slice::Iter<'a, MethodRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.iter()
    }
}

pub fn resolve(types: &TypeSet) -> ResolvedMethodSet {
    let mut chosen: Vec<(MethodSignature, MethodRef)> = Vec::new();
    let mut seen: HashSet<MethodSignature> = HashSet::new();
    let mut finalized: HashSet<MethodSignature> = HashSet::new();

    for ty in types {
        for method in ty.public_methods() {
            let signature = method.signature();
            if method.is_final() {
                finalized.insert(signature);
            } else if seen.insert(signature.clone()) {
                chosen.push((signature, method));
            }
        }
    }

    let methods = chosen
        .into_iter()
        .filter(|(signature, _)| !finalized.contains(signature))
        .map(|(_, method)| method)
        .collect();
    ResolvedMethodSet { methods }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;
