//! Cached resolution and overrides
//!
//! `from` and `from2` implement get-or-compute-and-commit. No lock is held
//! while a factory runs, so concurrent misses on one handle may each run the
//! factory; the first value committed wins and every caller returns it.
//! Factories must therefore tolerate running redundantly.

use std::any::type_name;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::container::{Container, Slot};
use crate::error::GotError;
use crate::handle::{Constructor, Constructor2, HandleId};

/// A pair result, cached as one slot so both halves always come from one factory run
#[derive(Clone)]
struct Pair<T, U>(T, U);

/// Recover a typed value from a slot.
///
/// Identities belong to exactly one typed handle, so a mismatch means the
/// cache invariant is broken and resolution cannot continue.
fn read<V: Clone + 'static>(id: HandleId, slot: &Slot) -> V {
    match (**slot).downcast_ref::<V>() {
        Some(value) => value.clone(),
        None => panic!(
            "{}",
            GotError::TypeMismatch {
                handle: id,
                expected: type_name::<V>(),
            }
        ),
    }
}

fn get_or_commit<V, F>(container: &Container, id: HandleId, build: F) -> V
where
    V: Clone + Send + Sync + 'static,
    F: FnOnce() -> V,
{
    if let Some(slot) = container.load(id) {
        trace!(handle = %id, ty = type_name::<V>(), "Cache hit");
        return read(id, &slot);
    }

    debug!(handle = %id, ty = type_name::<V>(), "Cache miss, running factory");
    let candidate: Slot = Arc::new(build());

    let (committed, already_present) = container.store_if_absent(id, candidate);
    if already_present {
        debug!(handle = %id, "Lost commit race, discarding computed value");
    } else {
        debug!(handle = %id, "Committed value");
    }
    read(id, &committed)
}

/// Return the value for `ct` cached in `container`, running its factory on first use.
///
/// The factory receives `container` and may resolve other handles from it.
pub fn from<T, C>(container: &Container, ct: &C) -> T
where
    T: Clone + Send + Sync + 'static,
    C: Constructor<T> + ?Sized,
{
    get_or_commit(container, ct.id(), || ct.build(container))
}

/// Return the pair for `ct` cached in `container`, running its factory on first use.
pub fn from2<T, U, C>(container: &Container, ct: &C) -> (T, U)
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    C: Constructor2<T, U> + ?Sized,
{
    let Pair(v1, v2) = get_or_commit(container, ct.id(), || {
        let (v1, v2) = ct.build(container);
        Pair(v1, v2)
    });
    (v1, v2)
}

/// Replace whatever is cached for `ct` with `value`.
///
/// Later cached resolutions return `value` and never run the real factory.
/// There is no way to undo a mock short of using a new container.
pub fn mock<T, C>(container: &Container, ct: &C, value: T)
where
    T: Send + Sync + 'static,
    C: Constructor<T> + ?Sized,
{
    let id = ct.id();
    debug!(handle = %id, ty = type_name::<T>(), "Mocking cached value");
    container.force_store(id, Arc::new(value));
}

/// Replace whatever pair is cached for `ct` with `(v1, v2)`.
pub fn mock2<T, U, C>(container: &Container, ct: &C, v1: T, v2: U)
where
    T: Send + Sync + 'static,
    U: Send + Sync + 'static,
    C: Constructor2<T, U> + ?Sized,
{
    let id = ct.id();
    debug!(
        handle = %id,
        ty = type_name::<(T, U)>(),
        "Mocking cached pair"
    );
    container.force_store(id, Arc::new(Pair(v1, v2)));
}
