//! Method filters: predicates over method descriptors, used to decide which
//! calls an interceptor applies to.

use ecow::EcoString;
use hashbrown::HashSet;

use crate::types::{MethodDescriptor, ValueType};

pub trait MethodFilter: Send + Sync {
    fn accepts(&self, method: &MethodDescriptor) -> bool;
}

impl<F> MethodFilter for F
where
    F: Fn(&MethodDescriptor) -> bool + Send + Sync,
{
    fn accepts(&self, method: &MethodDescriptor) -> bool {
        self(method)
    }
}

/// A filter backed by a closure.
pub fn from_fn<F>(f: F) -> impl MethodFilter
where
    F: Fn(&MethodDescriptor) -> bool + Send + Sync + 'static,
{
    f
}

/// Accepts methods whose name is in the set.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    names: HashSet<EcoString>,
}

impl NameFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EcoString>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl MethodFilter for NameFilter {
    fn accepts(&self, method: &MethodDescriptor) -> bool {
        self.names.contains(method.name())
    }
}

/// Accepts methods declared to return one of the given types.
#[derive(Debug, Clone, Default)]
pub struct ReturnTypeFilter {
    types: Vec<ValueType>,
}

impl ReturnTypeFilter {
    pub fn new(types: impl IntoIterator<Item = ValueType>) -> Self {
        Self {
            types: types.into_iter().collect(),
        }
    }
}

impl MethodFilter for ReturnTypeFilter {
    fn accepts(&self, method: &MethodDescriptor) -> bool {
        self.types.contains(method.return_type())
    }
}
