//! Configuration options for the proxy factory.

use crate::cache::EvictionPolicy;
use crate::generator::Backend;

/// Configuration options for a [`ProxyFactory`](super::ProxyFactory).
///
/// # Example
///
/// ```
/// use dynproxy_core::api::FactoryOptions;
/// use dynproxy_core::cache::EvictionPolicy;
/// use dynproxy_core::generator::Backend;
///
/// let options = FactoryOptions {
///     backend: Backend::Interfaces,
///     eviction: EvictionPolicy::Never,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FactoryOptions {
    /// How proxy classes relate to the requested types.
    ///
    /// Default: `Backend::Subclassing`
    pub backend: Backend,

    /// How long generated classes stay cached.
    ///
    /// Default: `EvictionPolicy::WhenUnreferenced`
    pub eviction: EvictionPolicy,
}
