//! Write access to view state from async controllers.
//!
//! DESIGN
//! ======
//! Controllers in this module tree run across `.await` points and must not
//! hold a signal borrow while a request is outstanding. They take a
//! `StateHandle` instead and touch state in short synchronous bursts before
//! and after each call.
//!
//! A handle whose owner has been disposed (the page unmounted while a
//! request was in flight) returns `None`, so late responses are dropped
//! without panicking.

use std::cell::RefCell;

use leptos::prelude::*;

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

/// Short-lived access to a piece of view state.
pub trait StateHandle<S> {
    /// Mutate the state and notify observers. `None` once disposed.
    fn update_with<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R>;

    /// Read the state without subscribing. `None` once disposed.
    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R>;
}

impl<S> StateHandle<S> for RwSignal<S>
where
    S: Send + Sync + 'static,
{
    fn update_with<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.try_update(f)
    }

    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }
}

/// Plain cell handle used outside a reactive owner.
impl<S> StateHandle<S> for RefCell<S> {
    fn update_with<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}
