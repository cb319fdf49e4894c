//! Interception: calls wrapped in user code that decides whether, when, and
//! how often the target method runs.

use core::fmt;
use std::sync::Arc;

use crate::filter::MethodFilter;
use crate::reflect;
use crate::throwable::Throwable;
use crate::types::MethodRef;
use crate::values::{ObjectRef, Value};

/// Wraps calls on an intercepting proxy.
///
/// An interceptor may call [`Invocation::proceed`] any number of times,
/// including not at all, and may change the arguments first.
pub trait Interceptor: Send + Sync {
    fn intercept(&self, invocation: &mut Invocation<'_>) -> Result<Value, Throwable>;
}

impl<F> Interceptor for F
where
    F: Fn(&mut Invocation<'_>) -> Result<Value, Throwable> + Send + Sync,
{
    fn intercept(&self, invocation: &mut Invocation<'_>) -> Result<Value, Throwable> {
        self(invocation)
    }
}

/// An interceptor backed by a closure.
///
/// Pins the closure's argument type, which inference cannot do through the
/// blanket impl alone.
pub fn from_fn<F>(f: F) -> impl Interceptor
where
    F: Fn(&mut Invocation<'_>) -> Result<Value, Throwable> + Send + Sync + 'static,
{
    f
}

/// What `proceed` runs next.
#[derive(Clone, Copy)]
enum Continuation<'a> {
    /// Invoke the method on the target.
    Target,
    /// Run these interceptors in order, then continue with `then`.
    Chain {
        interceptors: &'a [Arc<dyn Interceptor>],
        then: &'a Continuation<'a>,
    },
}

/// One intercepted call, as seen by an [`Interceptor`].
pub struct Invocation<'a> {
    proxy: &'a ObjectRef,
    method: &'a MethodRef,
    arguments: Vec<Value>,
    target: &'a Value,
    continuation: Continuation<'a>,
}

impl<'a> Invocation<'a> {
    pub fn new(
        proxy: &'a ObjectRef,
        method: &'a MethodRef,
        arguments: Vec<Value>,
        target: &'a Value,
    ) -> Self {
        Self {
            proxy,
            method,
            arguments,
            target,
            continuation: Continuation::Target,
        }
    }

    /// The method as declared by the proxied type.
    pub fn method(&self) -> &MethodRef {
        self.method
    }

    /// The call's arguments. A copy: changing them does not affect the caller.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Arguments `proceed` passes on.
    pub fn arguments_mut(&mut self) -> &mut Vec<Value> {
        &mut self.arguments
    }

    pub fn proxy(&self) -> &ObjectRef {
        self.proxy
    }

    /// The object calls proceed to. May be null.
    pub fn target(&self) -> &Value {
        self.target
    }

    /// Continues the call: the next interceptor of an enclosing chain, or the
    /// target method. What the target raises is raised here unwrapped.
    pub fn proceed(&self) -> Result<Value, Throwable> {
        match self.continuation {
            Continuation::Target => reflect::invoke(self.method, self.target, &self.arguments)
                .map_err(Throwable::unwrap_invocation_target),
            Continuation::Chain {
                interceptors: [],
                then,
            } => self.with_continuation(*then).proceed(),
            Continuation::Chain {
                interceptors: [first, rest @ ..],
                then,
            } => {
                let mut next = self.with_continuation(Continuation::Chain {
                    interceptors: rest,
                    then,
                });
                first.intercept(&mut next)
            }
        }
    }

    /// Runs `interceptors` in order around whatever `proceed` would run.
    pub fn proceed_through<'b>(
        &'b self,
        interceptors: &'b [Arc<dyn Interceptor>],
    ) -> Result<Value, Throwable> {
        self.with_continuation(Continuation::Chain {
            interceptors,
            then: &self.continuation,
        })
        .proceed()
    }

    fn with_continuation<'b>(&'b self, continuation: Continuation<'b>) -> Invocation<'b> {
        Invocation {
            proxy: self.proxy,
            method: self.method,
            arguments: self.arguments.clone(),
            target: self.target,
            continuation,
        }
    }
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("method", &self.method.signature())
            .field("arguments", &self.arguments)
            .field("target", &self.target)
            .finish()
    }
}

pub(super) fn dispatch(
    interceptor: &dyn Interceptor,
    proxy: &ObjectRef,
    target: &Value,
    method: &MethodRef,
    args: &[Value],
) -> Result<Value, Throwable> {
    let mut invocation = Invocation::new(proxy, method, args.to_vec(), target);
    interceptor.intercept(&mut invocation)
}

// ============================================================================
// Combinators
// ============================================================================

/// Several interceptors applied in order: each `proceed` enters the next one,
/// and the last one proceeds to the target.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl FromIterator<Arc<dyn Interceptor>> for InterceptorChain {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Interceptor>>>(iter: I) -> Self {
        Self {
            interceptors: iter.into_iter().collect(),
        }
    }
}

impl Interceptor for InterceptorChain {
    fn intercept(&self, invocation: &mut Invocation<'_>) -> Result<Value, Throwable> {
        invocation.proceed_through(&self.interceptors)
    }
}

/// Applies `inner` only to methods the filter accepts; other calls proceed
/// untouched.
pub struct FilteredInterceptor<I, F> {
    inner: I,
    filter: F,
}

impl<I: Interceptor, F: MethodFilter> FilteredInterceptor<I, F> {
    pub fn new(inner: I, filter: F) -> Self {
        Self { inner, filter }
    }
}

impl<I: Interceptor, F: MethodFilter> Interceptor for FilteredInterceptor<I, F> {
    fn intercept(&self, invocation: &mut Invocation<'_>) -> Result<Value, Throwable> {
        if self.filter.accepts(invocation.method()) {
            self.inner.intercept(invocation)
        } else {
            invocation.proceed()
        }
    }
}
