//! Mutex-guarded creator handle for multi-threaded hosts.
//!
//! A creator is a plain single-threaded data structure. Hosts that touch it
//! from more than one thread wrap each creator in a `SharedCreator`, which
//! serialises every call through one mutex per creator instance.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::binding::ExpandableBinder;
use crate::creator::ExpandableCreator;

/// A cloneable, thread-safe handle to one [`ExpandableCreator`].
pub struct SharedCreator<P, C, B: ExpandableBinder<P, C>> {
    inner: Arc<Mutex<ExpandableCreator<P, C, B>>>,
}

impl<P, C, B: ExpandableBinder<P, C>> Clone for SharedCreator<P, C, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, C, B: ExpandableBinder<P, C>> SharedCreator<P, C, B> {
    /// Wraps a creator.
    pub fn new(creator: ExpandableCreator<P, C, B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(creator)),
        }
    }

    /// Locks the creator for the lifetime of the guard.
    pub fn lock(&self) -> MutexGuard<'_, ExpandableCreator<P, C, B>> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access to the creator.
    pub fn with<R>(&self, f: impl FnOnce(&mut ExpandableCreator<P, C, B>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
