#![forbid(unsafe_code)]

//! The trigger API.
//!
//! A [`Toaster`] is a cheap clonable handle for firing toasts from anywhere
//! in an application: `show`, `success`, `error`, `loading`, plus dismissal
//! and the [`promise`](Toaster::promise) helper that sequences a loading
//! toast into a success or error toast around a unit of background work.
//!
//! Every "show" goes through upsert, so passing an explicit id uniformly
//! refreshes an existing toast or creates a new one.

use std::fmt;
use std::sync::Arc;
use std::thread;

use tracing::debug;

use crouton_core::reducer::Action;
use crouton_core::toast::{DismissReason, Toast, ToastKind, ToastMessage, ToastOptions};
use crouton_core::ToastId;

use crate::store::Shared;

/// Clonable trigger handle onto one store.
#[derive(Clone)]
pub struct Toaster {
    shared: Arc<Shared>,
}

impl Toaster {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Show a plain toast. Returns its id.
    pub fn show(&self, message: impl Into<ToastMessage>, options: ToastOptions) -> ToastId {
        self.emit(ToastKind::Blank, message.into(), options)
    }

    /// Show a success toast. Returns its id.
    pub fn success(&self, message: impl Into<ToastMessage>, options: ToastOptions) -> ToastId {
        self.emit(ToastKind::Success, message.into(), options)
    }

    /// Show an error toast. Returns its id.
    pub fn error(&self, message: impl Into<ToastMessage>, options: ToastOptions) -> ToastId {
        self.emit(ToastKind::Error, message.into(), options)
    }

    /// Show a loading toast (never auto-dismisses). Returns its id.
    pub fn loading(&self, message: impl Into<ToastMessage>, options: ToastOptions) -> ToastId {
        self.emit(ToastKind::Loading, message.into(), options)
    }

    fn emit(&self, kind: ToastKind, message: ToastMessage, options: ToastOptions) -> ToastId {
        let toast = Toast::build(kind, message, options, self.shared.clock().now());
        if let Some(announcement) = &toast.accessibility_message {
            self.shared.announce(announcement);
        }
        let id = toast.id.clone();
        debug!(toast_id = %id, kind = ?kind, "toast");
        self.shared.dispatch(Action::Upsert(toast));
        id
    }

    /// Begin dismissing one toast (reason `Programmatic`).
    pub fn dismiss(&self, id: &ToastId) {
        self.dismiss_with(id, DismissReason::Programmatic);
    }

    /// Begin dismissing one toast with an explicit reason. Render layers
    /// use this for swipe and timeout dismissals.
    pub fn dismiss_with(&self, id: &ToastId, reason: DismissReason) {
        self.shared.dispatch(Action::Dismiss {
            id: Some(id.clone()),
            reason,
        });
    }

    /// Begin dismissing every toast.
    pub fn dismiss_all(&self) {
        self.shared.dispatch(Action::Dismiss {
            id: None,
            reason: DismissReason::Programmatic,
        });
    }

    /// Delete one toast immediately, bypassing the grace period.
    pub fn remove(&self, id: &ToastId) {
        self.shared.dispatch(Action::Remove {
            id: Some(id.clone()),
        });
    }

    /// Delete every toast immediately. Used for hard resets and teardown.
    pub fn remove_all(&self) {
        self.shared.dispatch(Action::Remove { id: None });
    }

    /// Run `work` on a background thread behind a loading toast.
    ///
    /// The loading toast appears immediately. When `work` returns, the same
    /// id is upserted exactly once more: as a success toast (message
    /// resolved from the `Ok` value) or an error toast (resolved from the
    /// `Err` value). The join handle yields the untouched result so callers
    /// can keep chaining on it; a panic in `work` or a resolver propagates
    /// through the handle.
    pub fn promise<T, E, F>(
        &self,
        work: F,
        messages: PromiseMessages<T, E>,
        options: ToastOptions,
    ) -> thread::JoinHandle<Result<T, E>>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let id = options.id.clone().unwrap_or_else(ToastId::next);
        let options = options.id(id.clone());
        self.emit(ToastKind::Loading, messages.loading, options.clone());

        let toaster = self.clone();
        thread::spawn(move || {
            let result = work();
            match &result {
                Ok(value) => {
                    toaster.emit(ToastKind::Success, (messages.success)(value), options);
                }
                Err(error) => {
                    toaster.emit(ToastKind::Error, (messages.error)(error), options);
                }
            }
            result
        })
    }
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Toaster")
    }
}

/// The three message stages of a [`Toaster::promise`] call.
pub struct PromiseMessages<T, E> {
    /// Shown immediately on the loading toast.
    pub loading: ToastMessage,
    /// Resolves the success message from the `Ok` value.
    pub success: Box<dyn FnOnce(&T) -> ToastMessage + Send>,
    /// Resolves the error message from the `Err` value.
    pub error: Box<dyn FnOnce(&E) -> ToastMessage + Send>,
}

impl<T, E> PromiseMessages<T, E> {
    /// Messages with outcome-dependent resolvers.
    pub fn new(
        loading: impl Into<ToastMessage>,
        success: impl FnOnce(&T) -> ToastMessage + Send + 'static,
        error: impl FnOnce(&E) -> ToastMessage + Send + 'static,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: Box::new(success),
            error: Box::new(error),
        }
    }

    /// Fixed messages for all three stages.
    pub fn text(
        loading: impl Into<ToastMessage>,
        success: impl Into<ToastMessage>,
        error: impl Into<ToastMessage>,
    ) -> Self {
        let success = success.into();
        let error = error.into();
        Self {
            loading: loading.into(),
            success: Box::new(move |_| success),
            error: Box::new(move |_| error),
        }
    }
}

impl<T, E> fmt::Debug for PromiseMessages<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromiseMessages")
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}
