#![forbid(unsafe_code)]

//! Per-consumer views over a live store.
//!
//! A [`ConsumerView`] binds one display region to a store: it filters the
//! shared pool by provider key, resolves effective options through its
//! [`ToastDefaults`], and answers stacking-offset queries. Every query
//! reads the live state, so height and visibility changes are reflected on
//! the next read without any cache invalidation.

use std::fmt;
use std::sync::Arc;

use crouton_core::reducer::Action;
use crouton_core::toast::ProviderKey;
use crouton_core::view::{
    EffectiveToast, OffsetOptions, ToastDefaults, derive_view, stacking_offset,
};
use crouton_core::ToastId;

use crate::store::Shared;

/// One display region's read surface plus its pause/measure controls.
#[derive(Clone)]
pub struct ConsumerView {
    shared: Arc<Shared>,
    provider: Option<ProviderKey>,
    defaults: ToastDefaults,
    offsets: OffsetOptions,
}

impl ConsumerView {
    pub(crate) fn new(
        shared: Arc<Shared>,
        provider: Option<ProviderKey>,
        defaults: ToastDefaults,
    ) -> Self {
        Self {
            shared,
            provider,
            defaults,
            offsets: OffsetOptions::default(),
        }
    }

    /// Stack oldest-first instead of newest-first.
    pub fn reverse_order(mut self, reverse: bool) -> Self {
        self.offsets.reverse_order = reverse;
        self
    }

    /// Vertical gap between stacked toasts.
    pub fn gutter(mut self, gutter: f32) -> Self {
        self.offsets.gutter = gutter;
        self
    }

    /// The ordered effective toast list for this region.
    pub fn toasts(&self) -> Vec<EffectiveToast> {
        let state = self.shared.snapshot();
        derive_view(&state, self.provider.as_ref(), &self.defaults)
    }

    /// The effective list paired with each toast's stacking offset.
    pub fn entries(&self) -> Vec<(EffectiveToast, f32)> {
        let toasts = self.toasts();
        toasts
            .iter()
            .map(|entry| {
                let offset = stacking_offset(&toasts, &entry.toast.id, self.offsets);
                (entry.clone(), offset)
            })
            .collect()
    }

    /// The stacking offset of one toast within this region.
    pub fn offset(&self, id: &ToastId) -> f32 {
        stacking_offset(&self.toasts(), id, self.offsets)
    }

    /// Record a toast's measured height. Reaches every subscriber, so the
    /// whole region restacks, not just the measured toast.
    pub fn update_height(&self, id: &ToastId, height: f32) {
        self.shared.dispatch(Action::SetHeight {
            id: id.clone(),
            height,
        });
    }

    /// Pause the shared auto-dismiss clock (user press-hold).
    pub fn start_pause(&self) {
        let at = self.shared.clock().now();
        self.shared.dispatch(Action::StartPause { at });
    }

    /// Resume the shared clock, crediting the paused interval to every
    /// toast.
    pub fn end_pause(&self) {
        let at = self.shared.clock().now();
        self.shared.dispatch(Action::EndPause { at });
    }
}

impl fmt::Debug for ConsumerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerView")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
