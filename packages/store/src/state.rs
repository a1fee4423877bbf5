//! State access capability.
//!
//! Store actions never reach for a global: they are handed a [`StateHandle`]
//! and read or write through it. The UI passes a signal-backed handle, tests
//! and native tools pass a [`SharedState`].

use std::sync::{Arc, Mutex, PoisonError};

/// Read a snapshot of `S` or mutate it in place.
pub trait StateHandle<S> {
    fn snapshot(&self) -> S;
    fn update(&self, f: impl FnOnce(&mut S));
}

/// In-process state cell.
#[derive(Debug, Default)]
pub struct SharedState<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> SharedState<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }
}

impl<S> Clone for SharedState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone> StateHandle<S> for SharedState<S> {
    fn snapshot(&self) -> S {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, f: impl FnOnce(&mut S)) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

impl<S, H: StateHandle<S>> StateHandle<S> for &H {
    fn snapshot(&self) -> S {
        (**self).snapshot()
    }

    fn update(&self, f: impl FnOnce(&mut S)) {
        (**self).update(f)
    }
}
