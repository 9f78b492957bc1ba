#![forbid(unsafe_code)]

//! The lifecycle reducer.
//!
//! [`reduce`] is a pure function `(State, Action) -> State`. Timer side
//! effects (scheduling and cancelling evictions) belong to the dispatch
//! path in `crouton-runtime`, which keeps every transition here replayable
//! and directly testable.
//!
//! Ordering is newest-first: [`Action::Add`] prepends. Consumers wanting
//! oldest-first stacking reverse at the view layer, not here.

use std::time::{Duration, Instant};

use crate::id::ToastId;
use crate::toast::{DismissReason, Toast, ToastPatch};

/// Maximum number of records held at once; insertion beyond the cap drops
/// the oldest entries.
pub const TOAST_LIMIT: usize = 20;

/// The shared toast collection plus the global pause marker.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Newest-first, at most [`TOAST_LIMIT`] entries.
    pub toasts: Vec<Toast>,
    /// Set while a pause interval is active; at most one at a time.
    pub paused_at: Option<Instant>,
}

impl State {
    /// Look up a record by id.
    pub fn find(&self, id: &ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| &t.id == id)
    }

    /// Whether a record with `id` exists.
    pub fn contains(&self, id: &ToastId) -> bool {
        self.find(id).is_some()
    }
}

/// A state transition request.
#[derive(Debug, Clone)]
pub enum Action {
    /// Prepend a record; truncate to [`TOAST_LIMIT`].
    Add(Toast),
    /// Shallow-merge a patch into the matching record; no-op for unknown
    /// ids.
    Update(ToastPatch),
    /// Replace the matching record in place, or prepend when absent. The
    /// trigger API's uniform "show or refresh" primitive.
    Upsert(Toast),
    /// Mark one record (or all, when `id` is `None`) invisible with the
    /// given reason.
    Dismiss {
        /// Target; `None` dismisses everything.
        id: Option<ToastId>,
        /// Recorded on each affected toast.
        reason: DismissReason,
    },
    /// Delete one record outright (or all, when `id` is `None`).
    Remove {
        /// Target; `None` clears the sequence.
        id: Option<ToastId>,
    },
    /// Begin the global pause interval. Ignored while already paused: the
    /// earlier timestamp is kept so no pause time is lost to overlapping
    /// press-holds.
    StartPause {
        /// When the pause began.
        at: Instant,
    },
    /// End the global pause interval, crediting the elapsed time to every
    /// record's `pause_duration`. Without an active pause this clears
    /// nothing and credits zero.
    EndPause {
        /// When the pause ended.
        at: Instant,
    },
    /// Record a measured height. Pure metadata: unlike `Update`, this never
    /// cancels a pending eviction.
    SetHeight {
        /// Target record.
        id: ToastId,
        /// Measured rendered height.
        height: f32,
    },
}

/// Apply one action, producing the next state.
pub fn reduce(state: &State, action: &Action) -> State {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("reduce", action = ?action).entered();

    match action {
        Action::Add(toast) => {
            let mut toasts = Vec::with_capacity((state.toasts.len() + 1).min(TOAST_LIMIT));
            toasts.push(toast.clone());
            toasts.extend(state.toasts.iter().take(TOAST_LIMIT - 1).cloned());
            State {
                toasts,
                paused_at: state.paused_at,
            }
        }

        Action::Update(patch) => State {
            toasts: state
                .toasts
                .iter()
                .map(|t| {
                    if t.id == patch.id {
                        let mut updated = t.clone();
                        updated.apply(patch);
                        updated
                    } else {
                        t.clone()
                    }
                })
                .collect(),
            paused_at: state.paused_at,
        },

        Action::Upsert(toast) => {
            if state.contains(&toast.id) {
                // Full replacement keeps the record's position in the
                // sequence, so a refreshed toast does not jump the stack.
                State {
                    toasts: state
                        .toasts
                        .iter()
                        .map(|t| {
                            if t.id == toast.id {
                                toast.clone()
                            } else {
                                t.clone()
                            }
                        })
                        .collect(),
                    paused_at: state.paused_at,
                }
            } else {
                reduce(state, &Action::Add(toast.clone()))
            }
        }

        Action::Dismiss { id, reason } => State {
            toasts: state
                .toasts
                .iter()
                .map(|t| {
                    if id.is_none() || id.as_ref() == Some(&t.id) {
                        let mut dismissed = t.clone();
                        dismissed.visible = false;
                        dismissed.dismiss_reason = Some(*reason);
                        dismissed
                    } else {
                        t.clone()
                    }
                })
                .collect(),
            paused_at: state.paused_at,
        },

        Action::Remove { id } => match id {
            None => State {
                toasts: Vec::new(),
                paused_at: state.paused_at,
            },
            Some(id) => State {
                toasts: state
                    .toasts
                    .iter()
                    .filter(|t| &t.id != id)
                    .cloned()
                    .collect(),
                paused_at: state.paused_at,
            },
        },

        Action::StartPause { at } => State {
            toasts: state.toasts.clone(),
            paused_at: state.paused_at.or(Some(*at)),
        },

        Action::EndPause { at } => {
            let diff = state
                .paused_at
                .map(|paused| at.saturating_duration_since(paused))
                .unwrap_or(Duration::ZERO);
            State {
                toasts: state
                    .toasts
                    .iter()
                    .map(|t| {
                        let mut resumed = t.clone();
                        resumed.pause_duration += diff;
                        resumed
                    })
                    .collect(),
                paused_at: None,
            }
        }

        Action::SetHeight { id, height } => State {
            toasts: state
                .toasts
                .iter()
                .map(|t| {
                    if &t.id == id {
                        let mut measured = t.clone();
                        measured.height = Some(*height);
                        measured
                    } else {
                        t.clone()
                    }
                })
                .collect(),
            paused_at: state.paused_at,
        },
    }
}
