use std::sync::Arc;

use tracing::{debug, warn};

use super::{FactoryOptions, ProxyError};
use crate::cache::ProxyClassCache;
use crate::generator::{ProxyClass, ProxyClassGenerator};
use crate::proxy::{Handler, Interceptor, Invoker, ObjectProvider};
use crate::types::{TypeLoader, TypeRef, TypeSet};
use crate::values::{ObjectRef, Value};

/// Creates proxies.
///
/// Each factory owns a class cache, so proxies for the same loader and type
/// list created through one factory share a class.
///
/// # Example
///
/// ```ignore
/// let factory = ProxyFactory::default();
/// let runnable = stdlib::bootstrap().runnable().clone();
/// let proxy = factory.create_invoker_proxy(None, NullInvoker, &[runnable])?;
/// Value::Object(proxy).invoke("run", [], vec![])?;
/// ```
#[derive(Debug)]
pub struct ProxyFactory {
    options: FactoryOptions,
    cache: ProxyClassCache,
}

static_assertions::assert_impl_all!(ProxyFactory: Send, Sync);

impl ProxyFactory {
    pub fn new(options: FactoryOptions) -> Self {
        Self {
            options,
            cache: ProxyClassCache::new(
                ProxyClassGenerator::new(options.backend),
                options.eviction,
            ),
        }
    }

    pub fn options(&self) -> &FactoryOptions {
        &self.options
    }

    pub fn cache(&self) -> &ProxyClassCache {
        &self.cache
    }

    /// Whether a proxy can be created for `types`.
    pub fn can_proxy(&self, types: &[TypeRef]) -> bool {
        self.cache.generator().can_proxy(&TypeSet::from(types))
    }

    /// The proxy class for `types`, generating it if needed.
    ///
    /// `None` selects the current context loader.
    pub fn proxy_class(
        &self,
        loader: Option<&TypeLoader>,
        types: &[TypeRef],
    ) -> Result<Arc<ProxyClass>, ProxyError> {
        let types = TypeSet::from(types);
        match loader {
            Some(loader) => self.cache.get_or_create(loader, &types),
            None => self.cache.get_or_create(&TypeLoader::context(), &types),
        }
    }

    /// A proxy forwarding every call to the object `provider` supplies.
    pub fn create_delegator_proxy(
        &self,
        loader: Option<&TypeLoader>,
        provider: impl ObjectProvider + 'static,
        types: &[TypeRef],
    ) -> Result<ObjectRef, ProxyError> {
        self.create(loader, Handler::delegator(provider), types)
    }

    /// A proxy passing every call on `target` through `interceptor`.
    pub fn create_interceptor_proxy(
        &self,
        loader: Option<&TypeLoader>,
        target: Value,
        interceptor: impl Interceptor + 'static,
        types: &[TypeRef],
    ) -> Result<ObjectRef, ProxyError> {
        self.create(loader, Handler::interceptor(target, interceptor), types)
    }

    /// A proxy handing every call to `invoker`.
    pub fn create_invoker_proxy(
        &self,
        loader: Option<&TypeLoader>,
        invoker: impl Invoker + 'static,
        types: &[TypeRef],
    ) -> Result<ObjectRef, ProxyError> {
        self.create(loader, Handler::invoker(invoker), types)
    }

    /// A proxy with an explicitly built handler.
    pub fn create_proxy(
        &self,
        loader: Option<&TypeLoader>,
        handler: Handler,
        types: &[TypeRef],
    ) -> Result<ObjectRef, ProxyError> {
        self.create(loader, handler, types)
    }

    fn create(
        &self,
        loader: Option<&TypeLoader>,
        handler: Handler,
        types: &[TypeRef],
    ) -> Result<ObjectRef, ProxyError> {
        let class = self.proxy_class(loader, types).inspect_err(|error| {
            warn!(error = %error, "Cannot create proxy");
        })?;
        debug!(class = %class.name(), handler = ?handler, "Creating proxy");
        Ok(class.new_instance(handler))
    }
}

impl Default for ProxyFactory {
    fn default() -> Self {
        Self::new(FactoryOptions::default())
    }
}
