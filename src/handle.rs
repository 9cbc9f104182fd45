//! Handles: identity-bearing factories
//!
//! A handle pairs a factory with the identity the container caches its result
//! under. Identity is allocated when the handle is defined, so two handles
//! built from identical closures still cache independently. Clones of a handle
//! share its identity.

use std::any::type_name;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::container::Container;
use crate::resolve;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a handle, used as the cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u64);

impl HandleId {
    /// Allocate a fresh identity.
    ///
    /// Custom [`Constructor`] implementations call this once and keep the
    /// result for their whole lifetime.
    pub fn allocate() -> Self {
        Self(NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of this identity
    pub fn as_u64(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Anything that can build a single value from a container under a stable identity.
///
/// [`Handle`] is the usual implementation. Implementors must return the same
/// [`HandleId`] from every call to `id` and must never share it with a
/// constructor of a different output type.
pub trait Constructor<T> {
    /// Identity the result is cached under
    fn id(&self) -> HandleId;

    /// Run the factory. Never consults the cache.
    fn build(&self, container: &Container) -> T;

    /// Cached resolution, see [`resolve::from`]
    fn from(&self, container: &Container) -> T
    where
        T: Clone + Send + Sync + 'static,
    {
        resolve::from(container, self)
    }
}

/// Anything that can build a pair of values from a container under a stable identity.
///
/// Use this when a factory yields an instance plus an auxiliary value, most
/// often an error.
pub trait Constructor2<T, U> {
    /// Identity the pair is cached under
    fn id(&self) -> HandleId;

    /// Run the factory. Never consults the cache.
    fn build(&self, container: &Container) -> (T, U);

    /// Cached resolution, see [`resolve::from2`]
    fn from(&self, container: &Container) -> (T, U)
    where
        T: Clone + Send + Sync + 'static,
        U: Clone + Send + Sync + 'static,
    {
        resolve::from2(container, self)
    }
}

type Factory<T> = dyn Fn(&Container) -> T + Send + Sync;

/// A factory for `T` bound to its own identity
pub struct Handle<T> {
    id: HandleId,
    factory: Arc<Factory<T>>,
}

impl<T: 'static> Handle<T> {
    /// Define a new handle around `factory`
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&Container) -> T + Send + Sync + 'static,
    {
        Self {
            id: HandleId::allocate(),
            factory: Arc::new(factory),
        }
    }

    /// Identity this handle caches under
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Transient resolution: a fresh value on every call.
    pub fn build(&self, container: &Container) -> T {
        (self.factory)(container)
    }

    /// Cached resolution: the first committed value for this handle in `container`.
    pub fn from(&self, container: &Container) -> T
    where
        T: Clone + Send + Sync,
    {
        resolve::from(container, self)
    }
}

impl<T: 'static> Constructor<T> for Handle<T> {
    fn id(&self) -> HandleId {
        self.id
    }

    fn build(&self, container: &Container) -> T {
        (self.factory)(container)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("id", &self.id)
            .field("output", &type_name::<T>())
            .finish_non_exhaustive()
    }
}

/// A factory for the pair `(T, U)` bound to its own identity
pub struct Handle2<T, U> {
    id: HandleId,
    factory: Arc<Factory<(T, U)>>,
}

impl<T: 'static, U: 'static> Handle2<T, U> {
    /// Define a new pair handle around `factory`
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&Container) -> (T, U) + Send + Sync + 'static,
    {
        Self {
            id: HandleId::allocate(),
            factory: Arc::new(factory),
        }
    }

    /// Identity this handle caches under
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Transient resolution: a fresh pair on every call.
    pub fn build(&self, container: &Container) -> (T, U) {
        (self.factory)(container)
    }

    /// Cached resolution. Both halves always come from the same factory run.
    pub fn from(&self, container: &Container) -> (T, U)
    where
        T: Clone + Send + Sync,
        U: Clone + Send + Sync,
    {
        resolve::from2(container, self)
    }
}

impl<T: 'static, U: 'static> Constructor2<T, U> for Handle2<T, U> {
    fn id(&self) -> HandleId {
        self.id
    }

    fn build(&self, container: &Container) -> (T, U) {
        (self.factory)(container)
    }
}

impl<T, U> Clone for Handle2<T, U> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T, U> fmt::Debug for Handle2<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle2")
            .field("id", &self.id)
            .field("output", &(type_name::<T>(), type_name::<U>()))
            .finish_non_exhaustive()
    }
}

/// Define a handle, shorthand for [`Handle::new`]
pub fn using<T, F>(factory: F) -> Handle<T>
where
    T: 'static,
    F: Fn(&Container) -> T + Send + Sync + 'static,
{
    Handle::new(factory)
}

/// Define a pair handle, shorthand for [`Handle2::new`]
pub fn using2<T, U, F>(factory: F) -> Handle2<T, U>
where
    T: 'static,
    U: 'static,
    F: Fn(&Container) -> (T, U) + Send + Sync + 'static,
{
    Handle2::new(factory)
}
