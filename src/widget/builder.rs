//! Fluent construction of widgets.

use super::{OverlapPolicy, RuntimeState, Widget, WidgetId, WidgetInner};
use crate::core::{InteractionFlags, InteractionLog, InteractionState, WidgetVariant};
use crate::features::{FeatureExecutor, FeatureSet};
use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;

/// Why a widget could not be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// `Click` is a feature pulse and can never be held as current state.
    #[error("`Click` is a feature pulse and cannot be a widget's initial state")]
    ClickNotHoldable,
    /// The event channel needs room for at least one event.
    #[error("event capacity must be at least 1")]
    ZeroEventCapacity,
    /// A zero deadline would fail every batch.
    #[error("deadline must be greater than zero")]
    ZeroDeadline,
}

/// Builds a [`Widget`].
///
/// The configured initial state is applied before the widget is returned:
/// flags are set to match, and the features' terminal values for that state
/// are applied instantly (no animation, no audio), so a widget never flashes
/// a transition on construction.
///
/// # Example
///
/// ```rust
/// use petal_ui::core::{InteractionState, WidgetVariant};
/// use petal_ui::widget::WidgetBuilder;
///
/// let widget = WidgetBuilder::new()
///     .variant(WidgetVariant::Checkbox)
///     .initial_state(InteractionState::Select)
///     .build()
///     .unwrap();
///
/// assert_eq!(widget.variant(), WidgetVariant::Checkbox);
/// assert!(widget.flags().is_selected);
/// ```
pub struct WidgetBuilder {
    variant: WidgetVariant,
    initial_state: InteractionState,
    policy: OverlapPolicy,
    deadline: Option<Duration>,
    event_capacity: usize,
    features: FeatureSet,
}

impl Default for WidgetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetBuilder {
    pub fn new() -> Self {
        Self {
            variant: WidgetVariant::Button,
            initial_state: InteractionState::Default,
            policy: OverlapPolicy::Replace,
            deadline: None,
            event_capacity: 16,
            features: FeatureSet::new(),
        }
    }

    /// Select semantics. Defaults to [`WidgetVariant::Button`].
    pub fn variant(mut self, variant: WidgetVariant) -> Self {
        self.variant = variant;
        self
    }

    /// State the widget starts in. Defaults to `Default`; `Click` is
    /// rejected at build time.
    pub fn initial_state(mut self, state: InteractionState) -> Self {
        self.initial_state = state;
        self
    }

    /// What happens to a superseded batch. Defaults to
    /// [`OverlapPolicy::Replace`].
    pub fn overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Per-executor response deadline. Unset by default: a stalled
    /// executor then stalls its batch's fan-in indefinitely.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Capacity of the event broadcast channel. Defaults to 16.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn color_feature(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.features = self.features.with_color(executor);
        self
    }

    pub fn sprite_feature(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.features = self.features.with_sprite(executor);
        self
    }

    pub fn transform_feature(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.features = self.features.with_transform(executor);
        self
    }

    /// Attach the audio slot. It participates only in batches dispatched
    /// with audio enabled.
    pub fn audio_feature(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.features = self.features.with_audio(executor);
        self
    }

    pub fn animation_feature(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.features = self.features.with_animation(executor);
        self
    }

    pub fn build(self) -> Result<Widget, BuildError> {
        if self.event_capacity == 0 {
            return Err(BuildError::ZeroEventCapacity);
        }
        if matches!(self.deadline, Some(deadline) if deadline.is_zero()) {
            return Err(BuildError::ZeroDeadline);
        }

        let mut flags = InteractionFlags {
            is_interactive: true,
            ..InteractionFlags::default()
        };
        let mut visible = true;
        match self.initial_state {
            InteractionState::Show => {}
            InteractionState::Hide => {
                visible = false;
                flags.is_interactive = false;
            }
            InteractionState::Interactive => {
                self.features
                    .apply_instant_all(InteractionState::Interactive, false);
            }
            InteractionState::NonInteractive => {
                flags.is_interactive = false;
                self.features
                    .apply_instant_all(InteractionState::NonInteractive, false);
            }
            InteractionState::Default => {
                self.features
                    .apply_instant_all(InteractionState::Default, false);
            }
            InteractionState::Hover => {
                flags.is_hovered = true;
                self.features.apply_instant_all(InteractionState::Hover, false);
            }
            InteractionState::Press => {
                flags.is_pressed = true;
                self.features.apply_instant_all(InteractionState::Press, false);
            }
            InteractionState::Select => {
                flags.is_selected = true;
                self.features
                    .apply_instant_all(InteractionState::Select, false);
            }
            InteractionState::Click => return Err(BuildError::ClickNotHoldable),
        }

        let (events, _) = broadcast::channel(self.event_capacity);
        Ok(Widget {
            inner: Arc::new(WidgetInner {
                id: WidgetId::new(),
                variant: self.variant,
                policy: self.policy,
                deadline: self.deadline,
                features: self.features,
                events,
                state: Mutex::new(RuntimeState {
                    current: self.initial_state,
                    flags,
                    visible,
                    log: InteractionLog::new(),
                }),
                pending: Mutex::new(None),
                sequence: AtomicU64::new(0),
            }),
        })
    }
}
