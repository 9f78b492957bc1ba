#![forbid(unsafe_code)]

//! Per-consumer view derivation.
//!
//! Several independent consumers (display regions) can render from one
//! shared toast pool at once. Each consumer derives its own read-only list:
//! filter by provider key, merge effective options (view defaults, then
//! per-kind defaults, then the record's explicit fields), and compute the
//! vertical stacking offset that keeps simultaneous toasts from
//! overlapping.
//!
//! Derivation is recomputed from live state on every query; nothing here is
//! cached.

use std::time::{Duration, Instant};

use crate::id::ToastId;
use crate::reducer::State;
use crate::toast::{ProviderKey, Toast, ToastKind, ToastPosition};

/// Default vertical gap between stacked toasts.
pub const DEFAULT_GUTTER: f32 = 8.0;

/// Option overrides applied to every toast of one kind.
#[derive(Debug, Clone, Default)]
pub struct KindDefaults {
    /// Auto-dismiss duration for this kind.
    pub duration: Option<Duration>,
    /// Anchor for this kind.
    pub position: Option<ToastPosition>,
    /// Indicator for this kind.
    pub icon: Option<String>,
}

/// A consumer view's default configuration.
///
/// Per-record resolution is ascending priority: these view-level values,
/// then the matching [`KindDefaults`], then the record's explicit fields.
#[derive(Debug, Clone, Default)]
pub struct ToastDefaults {
    /// View-level auto-dismiss duration.
    pub duration: Option<Duration>,
    /// View-level anchor.
    pub position: Option<ToastPosition>,
    /// View-level indicator.
    pub icon: Option<String>,
    /// Overrides for `ToastKind::Blank`.
    pub blank: KindDefaults,
    /// Overrides for `ToastKind::Success`.
    pub success: KindDefaults,
    /// Overrides for `ToastKind::Error`.
    pub error: KindDefaults,
    /// Overrides for `ToastKind::Loading`.
    pub loading: KindDefaults,
}

impl ToastDefaults {
    /// Defaults with nothing overridden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the view-level duration.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the view-level anchor.
    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// The overrides for `kind`.
    pub fn for_kind(&self, kind: ToastKind) -> &KindDefaults {
        match kind {
            ToastKind::Blank => &self.blank,
            ToastKind::Success => &self.success,
            ToastKind::Error => &self.error,
            ToastKind::Loading => &self.loading,
        }
    }
}

/// A toast with its per-consumer effective configuration resolved.
#[derive(Debug, Clone)]
pub struct EffectiveToast {
    /// The underlying record.
    pub toast: Toast,
    /// Resolved auto-dismiss duration; `None` means never.
    pub duration: Option<Duration>,
    /// Resolved anchor.
    pub position: ToastPosition,
    /// Resolved indicator.
    pub icon: Option<String>,
}

impl EffectiveToast {
    /// Time left until the renderer should dismiss this toast.
    ///
    /// Pause credit extends the deadline: the toast expires once
    /// `now - created_at` exceeds `duration + pause_duration`. `None` for
    /// never-expiring toasts.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.duration.map(|duration| {
            let deadline = duration + self.toast.pause_duration;
            deadline.saturating_sub(now.saturating_duration_since(self.toast.created_at))
        })
    }

    /// Whether the auto-dismiss deadline has passed.
    pub fn expired(&self, now: Instant) -> bool {
        self.remaining(now)
            .is_some_and(|remaining| remaining.is_zero())
    }
}

/// Whether a record belongs to a view filtered by `provider`.
///
/// `None` accepts everything; `Persists` records are accepted by every
/// view.
fn accepts(provider: Option<&ProviderKey>, toast: &Toast) -> bool {
    match provider {
        None => true,
        Some(key) => toast.provider_key == *key || toast.provider_key == ProviderKey::Persists,
    }
}

/// Derive the ordered effective list for one consumer.
pub fn derive_view(
    state: &State,
    provider: Option<&ProviderKey>,
    defaults: &ToastDefaults,
) -> Vec<EffectiveToast> {
    state
        .toasts
        .iter()
        .filter(|t| accepts(provider, t))
        .map(|t| {
            let kind = defaults.for_kind(t.kind);
            EffectiveToast {
                duration: t
                    .duration
                    .or(kind.duration)
                    .or(defaults.duration)
                    .or_else(|| t.kind.default_duration()),
                position: t
                    .position
                    .or(kind.position)
                    .or(defaults.position)
                    .unwrap_or_default(),
                icon: t
                    .icon
                    .clone()
                    .or_else(|| kind.icon.clone())
                    .or_else(|| defaults.icon.clone()),
                toast: t.clone(),
            }
        })
        .collect()
}

/// Stacking order and spacing for offset queries.
#[derive(Debug, Clone, Copy)]
pub struct OffsetOptions {
    /// Stack oldest-first instead of newest-first.
    pub reverse_order: bool,
    /// Vertical gap added per stacked toast.
    pub gutter: f32,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            reverse_order: false,
            gutter: DEFAULT_GUTTER,
        }
    }
}

/// Vertical offset of the toast `id` within `entries`.
///
/// Only toasts sharing the target's resolved position and carrying a
/// measured height participate; of those, every *visible* toast ahead of
/// the target in the stacking order contributes its height plus the
/// gutter. Unknown or unmeasured targets sit at offset zero.
pub fn stacking_offset(entries: &[EffectiveToast], id: &ToastId, options: OffsetOptions) -> f32 {
    let Some(target) = entries.iter().find(|e| &e.toast.id == id) else {
        return 0.0;
    };
    let relevant: Vec<&EffectiveToast> = entries
        .iter()
        .filter(|e| e.position == target.position && e.toast.height.is_some())
        .collect();
    let Some(index) = relevant.iter().position(|e| &e.toast.id == id) else {
        return 0.0;
    };
    let ahead = relevant[..index].iter().filter(|e| e.toast.visible).count();

    let visible = relevant.iter().filter(|e| e.toast.visible);
    let stacked: Box<dyn Iterator<Item = &&EffectiveToast>> = if options.reverse_order {
        Box::new(visible.skip(ahead + 1))
    } else {
        Box::new(visible.take(ahead))
    };
    stacked
        .map(|e| e.toast.height.unwrap_or(0.0) + options.gutter)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::{Action, reduce};
    use crate::toast::{DismissReason, ToastOptions};

    fn state_with(toasts: Vec<Toast>) -> State {
        let mut state = State::default();
        for toast in toasts {
            state = reduce(&state, &Action::Add(toast));
        }
        state
    }

    fn toast(id: &str, kind: ToastKind, options: ToastOptions) -> Toast {
        Toast::build(kind, "msg", options.id(id), Instant::now())
    }

    #[test]
    fn provider_isolation() {
        let state = state_with(vec![
            toast(
                "x",
                ToastKind::Blank,
                ToastOptions::new().provider_key(ProviderKey::named("X")),
            ),
            toast(
                "y",
                ToastKind::Blank,
                ToastOptions::new().provider_key(ProviderKey::named("Y")),
            ),
        ]);
        let view = derive_view(
            &state,
            Some(&ProviderKey::named("Y")),
            &ToastDefaults::new(),
        );
        let ids: Vec<&str> = view.iter().map(|e| e.toast.id.as_str()).collect();
        assert_eq!(ids, ["y"]);
    }

    #[test]
    fn persists_broadcasts_to_every_view() {
        let state = state_with(vec![
            toast(
                "broadcast",
                ToastKind::Blank,
                ToastOptions::new().provider_key(ProviderKey::Persists),
            ),
            toast("plain", ToastKind::Blank, ToastOptions::new()),
        ]);
        let view = derive_view(
            &state,
            Some(&ProviderKey::named("anywhere")),
            &ToastDefaults::new(),
        );
        let ids: Vec<&str> = view.iter().map(|e| e.toast.id.as_str()).collect();
        assert_eq!(ids, ["broadcast"]);
    }

    #[test]
    fn missing_provider_filter_accepts_all() {
        let state = state_with(vec![
            toast(
                "x",
                ToastKind::Blank,
                ToastOptions::new().provider_key(ProviderKey::named("X")),
            ),
            toast("d", ToastKind::Blank, ToastOptions::new()),
        ]);
        let view = derive_view(&state, None, &ToastDefaults::new());
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn duration_resolution_prefers_explicit_then_kind_then_view_then_builtin() {
        let state = state_with(vec![
            toast("builtin", ToastKind::Success, ToastOptions::new()),
            toast(
                "explicit",
                ToastKind::Blank,
                ToastOptions::new().duration(Duration::from_millis(9000)),
            ),
        ]);

        let plain = derive_view(&state, None, &ToastDefaults::new());
        let by_id = |id: &str| {
            plain
                .iter()
                .find(|e| e.toast.id.as_str() == id)
                .expect("entry present")
        };
        assert_eq!(by_id("builtin").duration, Some(Duration::from_millis(2000)));
        assert_eq!(
            by_id("explicit").duration,
            Some(Duration::from_millis(9000))
        );

        // A view-level default beats the builtin but not the explicit value.
        let with_view_default = derive_view(
            &state,
            None,
            &ToastDefaults::new().duration(Duration::from_millis(5000)),
        );
        assert_eq!(
            with_view_default[1].duration,
            Some(Duration::from_millis(5000))
        );
        assert_eq!(
            with_view_default
                .iter()
                .find(|e| e.toast.id.as_str() == "explicit")
                .expect("entry present")
                .duration,
            Some(Duration::from_millis(9000))
        );

        // A kind-level default beats the view-level one.
        let mut defaults = ToastDefaults::new().duration(Duration::from_millis(5000));
        defaults.success.duration = Some(Duration::from_millis(1500));
        let with_kind_default = derive_view(&state, None, &defaults);
        assert_eq!(
            with_kind_default
                .iter()
                .find(|e| e.toast.id.as_str() == "builtin")
                .expect("entry present")
                .duration,
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn loading_never_expires_by_default() {
        let state = state_with(vec![toast("l", ToastKind::Loading, ToastOptions::new())]);
        let view = derive_view(&state, None, &ToastDefaults::new());
        assert_eq!(view[0].duration, None);
        assert!(view[0].remaining(Instant::now()).is_none());
        assert!(!view[0].expired(Instant::now() + Duration::from_secs(3600)));
    }

    #[test]
    fn position_resolution_defaults_to_top() {
        let state = state_with(vec![
            toast("t", ToastKind::Blank, ToastOptions::new()),
            toast(
                "b",
                ToastKind::Blank,
                ToastOptions::new().position(ToastPosition::Bottom),
            ),
        ]);
        let view = derive_view(&state, None, &ToastDefaults::new());
        let by_id = |id: &str| {
            view.iter()
                .find(|e| e.toast.id.as_str() == id)
                .expect("entry present")
        };
        assert_eq!(by_id("t").position, ToastPosition::Top);
        assert_eq!(by_id("b").position, ToastPosition::Bottom);
    }

    #[test]
    fn remaining_extends_with_pause_credit() {
        let created = Instant::now();
        let mut record = toast(
            "r",
            ToastKind::Blank,
            ToastOptions::new().duration(Duration::from_millis(1000)),
        );
        record.created_at = created;
        record.pause_duration = Duration::from_millis(400);
        let state = state_with(vec![record]);
        let view = derive_view(&state, None, &ToastDefaults::new());

        let at = created + Duration::from_millis(1000);
        // Without the pause the toast would be expiring right now; the
        // 400ms credit keeps it alive.
        assert_eq!(view[0].remaining(at), Some(Duration::from_millis(400)));
        assert!(view[0].expired(created + Duration::from_millis(1400)));
    }

    fn measured(id: &str, height: f32, visible: bool) -> Toast {
        let mut t = toast(id, ToastKind::Blank, ToastOptions::new());
        t.height = Some(height);
        t.visible = visible;
        if !visible {
            t.dismiss_reason = Some(DismissReason::Programmatic);
        }
        t
    }

    #[test]
    fn offsets_stack_visible_toasts_ahead_of_target() {
        // Added a, b, c: the derived order is newest-first (c, b, a).
        let state = state_with(vec![
            measured("a", 40.0, true),
            measured("b", 50.0, true),
            measured("c", 60.0, true),
        ]);
        let view = derive_view(&state, None, &ToastDefaults::new());
        let opts = OffsetOptions::default();
        assert_eq!(stacking_offset(&view, &"c".into(), opts), 0.0);
        assert_eq!(stacking_offset(&view, &"b".into(), opts), 68.0);
        assert_eq!(stacking_offset(&view, &"a".into(), opts), 68.0 + 58.0);
    }

    #[test]
    fn offsets_reverse_order_flips_the_stack() {
        let state = state_with(vec![
            measured("a", 40.0, true),
            measured("b", 50.0, true),
            measured("c", 60.0, true),
        ]);
        let view = derive_view(&state, None, &ToastDefaults::new());
        let opts = OffsetOptions {
            reverse_order: true,
            ..OffsetOptions::default()
        };
        assert_eq!(stacking_offset(&view, &"c".into(), opts), 58.0 + 48.0);
        assert_eq!(stacking_offset(&view, &"b".into(), opts), 48.0);
        assert_eq!(stacking_offset(&view, &"a".into(), opts), 0.0);
    }

    #[test]
    fn offsets_skip_invisible_and_unmeasured_toasts() {
        let mut unmeasured = toast("u", ToastKind::Blank, ToastOptions::new());
        unmeasured.height = None;
        let state = state_with(vec![
            measured("a", 40.0, true),
            measured("gone", 50.0, false),
            unmeasured,
            measured("c", 60.0, true),
        ]);
        let view = derive_view(&state, None, &ToastDefaults::new());
        let opts = OffsetOptions::default();
        // "gone" is invisible and "u" unmeasured: "a" stacks only under "c".
        assert_eq!(stacking_offset(&view, &"a".into(), opts), 68.0);
        assert_eq!(stacking_offset(&view, &"u".into(), opts), 0.0);
    }

    #[test]
    fn offsets_partition_by_position() {
        let mut bottom = measured("bottom", 50.0, true);
        bottom.position = Some(ToastPosition::Bottom);
        let state = state_with(vec![measured("a", 40.0, true), bottom, measured("c", 60.0, true)]);
        let view = derive_view(&state, None, &ToastDefaults::new());
        let opts = OffsetOptions::default();
        // The bottom-anchored toast does not push the top stack down.
        assert_eq!(stacking_offset(&view, &"a".into(), opts), 68.0);
        assert_eq!(stacking_offset(&view, &"bottom".into(), opts), 0.0);
    }
}
