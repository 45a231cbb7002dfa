//! The widget: current state, pointer flags, and the operations that drive
//! both through the feature executors.
//!
//! A [`Widget`] is a cheap cloneable handle; clones share one underlying
//! state machine. Operations commit their decision synchronously (state,
//! flags, log, event) and then fan the feature response out on a spawned
//! task, so they must be called from within a Tokio runtime. Await
//! [`Widget::settle`] to observe the widget after all in-flight responses
//! and their chain actions have finished.

mod builder;
mod orchestration;

pub use builder::{BuildError, WidgetBuilder};
pub use orchestration::{Orchestration, OverlapPolicy};

use crate::core::{
    InteractionFlags, InteractionLog, InteractionRecord, InteractionState, SelectOutcome,
    TransitionCause, WidgetVariant,
};
use crate::events::{WidgetEvent, WidgetSignal};
use crate::features::FeatureSet;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Stable identity of one widget, carried in its events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(Uuid);

impl WidgetId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a batch does once every executor has fanned back in.
#[derive(Clone, Copy, Debug)]
enum ChainAction {
    None,
    /// Grant interactivity, then enter `Default` (activation chains).
    EnableThenDefault { play_audio: bool, raise_event: bool },
    /// Clear visibility (the hide chain).
    HideVisual,
}

struct RuntimeState {
    current: InteractionState,
    flags: InteractionFlags,
    visible: bool,
    log: InteractionLog,
}

impl RuntimeState {
    fn commit(&mut self, to: InteractionState, cause: TransitionCause) {
        let from = self.current;
        self.current = to;
        self.log = self.log.record(InteractionRecord {
            from,
            to,
            at: Utc::now(),
            cause,
        });
    }
}

struct WidgetInner {
    id: WidgetId,
    variant: WidgetVariant,
    policy: OverlapPolicy,
    deadline: Option<Duration>,
    features: FeatureSet,
    events: broadcast::Sender<WidgetEvent>,
    state: Mutex<RuntimeState>,
    pending: Mutex<Option<Orchestration>>,
    sequence: AtomicU64,
}

/// An interactive widget driven through a fixed set of interaction states.
///
/// # Example
///
/// ```rust
/// use petal_ui::core::InteractionState;
/// use petal_ui::widget::WidgetBuilder;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let widget = WidgetBuilder::new().build().unwrap();
///
/// widget.pointer_enter();
/// widget.settle().await;
///
/// assert_eq!(widget.current_state(), InteractionState::Hover);
/// assert!(widget.flags().is_hovered);
/// # }
/// ```
#[derive(Clone)]
pub struct Widget {
    inner: Arc<WidgetInner>,
}

impl Widget {
    pub fn id(&self) -> WidgetId {
        self.inner.id
    }

    pub fn variant(&self) -> WidgetVariant {
        self.inner.variant
    }

    /// The authoritative current state.
    pub fn current_state(&self) -> InteractionState {
        self.inner.state.lock().unwrap().current
    }

    /// Snapshot of the pointer flags.
    pub fn flags(&self) -> InteractionFlags {
        self.inner.state.lock().unwrap().flags
    }

    pub fn is_interactive(&self) -> bool {
        self.inner.state.lock().unwrap().flags.is_interactive
    }

    pub fn is_visible(&self) -> bool {
        self.inner.state.lock().unwrap().visible
    }

    /// Snapshot of the committed-transition log.
    pub fn log(&self) -> InteractionLog {
        self.inner.state.lock().unwrap().log.clone()
    }

    /// Subscribe to this widget's events. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.inner.events.subscribe()
    }

    /// Handle to the most recently dispatched batch, if any.
    pub fn orchestration(&self) -> Option<Orchestration> {
        self.inner.pending.lock().unwrap().clone()
    }

    /// Wait until the most recent batch and everything it chains into have
    /// completed. Returns immediately if nothing is in flight.
    pub async fn settle(&self) {
        let mut seen = None;
        loop {
            let current = self.inner.pending.lock().unwrap().clone();
            let Some(orchestration) = current else { break };
            if seen == Some(orchestration.sequence()) {
                break;
            }
            seen = Some(orchestration.sequence());
            orchestration.completed().await;
        }
    }

    /// Show or hide the widget. Runs regardless of interactivity.
    ///
    /// Showing makes the widget visible before any effect starts, responds
    /// with `Show`, and on completion grants interactivity and chains into
    /// `Default`. Hiding revokes interactivity immediately, responds with
    /// `Hide`, and clears visibility only after the hide effects finish.
    pub fn set_active(&self, active: bool, play_audio: bool, raise_event: bool) {
        if active {
            {
                let mut state = self.inner.state.lock().unwrap();
                state.visible = true;
                state.commit(InteractionState::Show, TransitionCause::Api);
            }
            if raise_event {
                self.raise(WidgetSignal::Show);
            }
            self.dispatch(
                InteractionState::Show,
                play_audio,
                ChainAction::EnableThenDefault {
                    play_audio,
                    raise_event,
                },
            );
        } else {
            {
                let mut state = self.inner.state.lock().unwrap();
                state.flags.is_interactive = false;
                state.commit(InteractionState::Hide, TransitionCause::Api);
            }
            if raise_event {
                self.raise(WidgetSignal::Hide);
            }
            self.dispatch(InteractionState::Hide, play_audio, ChainAction::HideVisual);
        }
    }

    /// Grant or revoke interactivity without hiding. Runs regardless of
    /// current interactivity and forces the widget visible either way.
    ///
    /// Enabling responds with `Interactive` and only grants the flag once
    /// the response completes, chaining into `Default`. Disabling revokes
    /// the flag immediately. Both directions raise the same `Interactive`
    /// signal.
    pub fn set_interactive(&self, interactive: bool, play_audio: bool, raise_event: bool) {
        if interactive {
            {
                let mut state = self.inner.state.lock().unwrap();
                state.visible = true;
                state.commit(InteractionState::Interactive, TransitionCause::Api);
            }
            if raise_event {
                self.raise(WidgetSignal::Interactive);
            }
            self.dispatch(
                InteractionState::Interactive,
                play_audio,
                ChainAction::EnableThenDefault {
                    play_audio,
                    raise_event,
                },
            );
        } else {
            {
                let mut state = self.inner.state.lock().unwrap();
                state.visible = true;
                state.flags.is_interactive = false;
                state.commit(InteractionState::NonInteractive, TransitionCause::Api);
            }
            if raise_event {
                self.raise(WidgetSignal::Interactive);
            }
            self.dispatch(InteractionState::NonInteractive, play_audio, ChainAction::None);
        }
    }

    /// Return to `Default`, clearing the hovered, pressed, and selected
    /// flags. No-op while not interactive.
    pub fn default_state(&self, play_audio: bool, raise_event: bool) {
        self.enter_default(play_audio, raise_event, TransitionCause::Api);
    }

    /// Enter `Hover`. No-op while not interactive.
    pub fn hover(&self, play_audio: bool, raise_event: bool) {
        self.enter_hover(play_audio, raise_event, TransitionCause::Api);
    }

    /// Enter `Press`. No-op while not interactive.
    pub fn press(&self, play_audio: bool, raise_event: bool) {
        self.enter_press(play_audio, raise_event, TransitionCause::Api);
    }

    /// Select per the widget's variant: buttons pulse the `Select` event
    /// without holding anything, checkboxes toggle, radios latch on.
    /// No-op while not interactive.
    pub fn select(&self, play_audio: bool, raise_event: bool) {
        self.enter_select(play_audio, raise_event, TransitionCause::Api);
    }

    /// Dispatch the `Click` feature response as a pulse. Current state,
    /// flags, events, and the log are all untouched. No-op while not
    /// interactive.
    pub fn pulse_click(&self, play_audio: bool) {
        if !self.is_interactive() {
            return;
        }
        self.dispatch(InteractionState::Click, play_audio, ChainAction::None);
    }

    /// Pointer entered the widget's bounds.
    pub fn pointer_enter(&self) {
        self.enter_hover(false, true, TransitionCause::Pointer);
    }

    /// Pointer left the widget's bounds. Clears the hovered flag, then
    /// falls back to `Select` or `Default`; while pressed, press visuals
    /// hold until release and no transition happens. Raises no event.
    pub fn pointer_exit(&self) {
        let to = {
            let mut state = self.inner.state.lock().unwrap();
            if !state.flags.is_interactive {
                return;
            }
            state.flags.is_hovered = false;
            if state.flags.is_pressed {
                return;
            }
            let to = state.flags.resolve_exit();
            state.commit(to, TransitionCause::Pointer);
            to
        };
        self.dispatch(to, false, ChainAction::None);
    }

    /// Pointer button went down over the widget.
    pub fn pointer_down(&self) {
        self.enter_press(false, true, TransitionCause::Pointer);
    }

    /// Pointer button released. Clears the pressed flag, then falls back
    /// to the most specific currently-true condition: `Hover`, else
    /// `Select`, else `Default`. Raises no event.
    pub fn pointer_up(&self) {
        let to = {
            let mut state = self.inner.state.lock().unwrap();
            if !state.flags.is_interactive {
                return;
            }
            state.flags.is_pressed = false;
            let to = state.flags.resolve_release();
            state.commit(to, TransitionCause::Pointer);
            to
        };
        self.dispatch(to, false, ChainAction::None);
    }

    /// A full press-release cycle completed over the widget.
    pub fn pointer_click(&self) {
        self.enter_select(false, true, TransitionCause::Pointer);
    }

    fn enter_default(&self, play_audio: bool, raise_event: bool, cause: TransitionCause) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if !state.flags.is_interactive {
                return;
            }
            state.flags.clear_transients();
            state.commit(InteractionState::Default, cause);
        }
        if raise_event {
            self.raise(WidgetSignal::Default);
        }
        self.dispatch(InteractionState::Default, play_audio, ChainAction::None);
    }

    fn enter_hover(&self, play_audio: bool, raise_event: bool, cause: TransitionCause) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if !state.flags.is_interactive {
                return;
            }
            state.flags.is_hovered = true;
            state.commit(InteractionState::Hover, cause);
        }
        if raise_event {
            self.raise(WidgetSignal::Hover);
        }
        self.dispatch(InteractionState::Hover, play_audio, ChainAction::None);
    }

    fn enter_press(&self, play_audio: bool, raise_event: bool, cause: TransitionCause) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if !state.flags.is_interactive {
                return;
            }
            state.flags.is_pressed = true;
            state.commit(InteractionState::Press, cause);
        }
        if raise_event {
            self.raise(WidgetSignal::Press);
        }
        self.dispatch(InteractionState::Press, play_audio, ChainAction::None);
    }

    fn enter_select(&self, play_audio: bool, raise_event: bool, cause: TransitionCause) {
        let outcome = {
            let mut state = self.inner.state.lock().unwrap();
            if !state.flags.is_interactive {
                return;
            }
            let outcome = self.inner.variant.resolve_select(state.flags.is_selected);
            match outcome {
                SelectOutcome::Pulse => {}
                SelectOutcome::Selected => {
                    state.flags.is_selected = true;
                    state.commit(InteractionState::Select, cause);
                }
                SelectOutcome::Deselected => {
                    // Checkbox off: only the selected flag drops; hover and
                    // press survive untouched.
                    state.flags.is_selected = false;
                    state.commit(InteractionState::Default, cause);
                }
            }
            outcome
        };
        match outcome {
            SelectOutcome::Pulse => {
                if raise_event {
                    self.raise(WidgetSignal::Select);
                }
            }
            SelectOutcome::Selected => {
                if raise_event {
                    self.raise(WidgetSignal::Select);
                }
                self.dispatch(InteractionState::Select, play_audio, ChainAction::None);
            }
            SelectOutcome::Deselected => {
                if raise_event {
                    self.raise(WidgetSignal::Default);
                }
                self.dispatch(InteractionState::Default, play_audio, ChainAction::None);
            }
        }
    }

    fn raise(&self, signal: WidgetSignal) {
        let _ = self.inner.events.send(WidgetEvent {
            widget: self.inner.id,
            signal,
        });
    }

    fn dispatch(&self, state: InteractionState, play_audio: bool, chain: ChainAction) {
        let sequence = self.inner.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();
        let (done_tx, done_rx) = watch::channel(None);
        let orchestration = Orchestration::new(sequence, state, token.clone(), done_rx);

        let superseded = self.inner.pending.lock().unwrap().replace(orchestration);
        if let Some(previous) = superseded {
            if self.inner.policy == OverlapPolicy::CancelPrevious {
                previous.cancel();
            }
        }

        log::trace!("widget {} dispatching {}", self.inner.id, state.name());
        let widget = self.clone();
        tokio::spawn(async move {
            let report = widget
                .inner
                .features
                .respond_all(state, &token, widget.inner.deadline, play_audio)
                .await;
            if !token.is_cancelled() {
                widget.run_chain(chain);
            }
            let _ = done_tx.send(Some(report));
        });
    }

    fn run_chain(&self, chain: ChainAction) {
        match chain {
            ChainAction::None => {}
            ChainAction::EnableThenDefault {
                play_audio,
                raise_event,
            } => {
                self.inner.state.lock().unwrap().flags.is_interactive = true;
                self.enter_default(play_audio, raise_event, TransitionCause::Chain);
            }
            ChainAction::HideVisual => {
                self.inner.state.lock().unwrap().visible = false;
            }
        }
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock().unwrap();
        f.debug_struct("Widget")
            .field("id", &self.inner.id)
            .field("variant", &self.inner.variant)
            .field("current", &state.current)
            .field("visible", &state.visible)
            .field("flags", &state.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn widget() -> Widget {
        WidgetBuilder::new().build().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn non_interactive_widget_ignores_steady_operations() {
        let widget = WidgetBuilder::new()
            .initial_state(InteractionState::NonInteractive)
            .build()
            .unwrap();

        widget.hover(false, true);
        widget.press(false, true);
        widget.select(false, true);
        widget.default_state(false, true);
        widget.settle().await;

        assert_eq!(widget.current_state(), InteractionState::NonInteractive);
        assert!(widget.log().records().is_empty());
        assert_eq!(widget.flags(), InteractionFlags::default());
    }

    #[tokio::test(start_paused = true)]
    async fn pulse_click_changes_nothing_observable() {
        let widget = widget();
        let mut events = widget.subscribe();

        widget.pulse_click(false);
        widget.settle().await;

        assert_eq!(widget.current_state(), InteractionState::Default);
        assert!(widget.log().records().is_empty());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn pointer_transitions_log_their_cause() {
        let widget = widget();

        widget.pointer_enter();
        widget.settle().await;

        let log = widget.log();
        let last = log.last().unwrap();
        assert_eq!(last.to, InteractionState::Hover);
        assert_eq!(last.cause, TransitionCause::Pointer);
    }

    #[tokio::test(start_paused = true)]
    async fn chained_default_logs_the_chain_cause() {
        let widget = widget();

        widget.set_active(true, false, false);
        widget.settle().await;

        let log = widget.log();
        let states: Vec<_> = log.records().iter().map(|r| r.to).collect();
        assert_eq!(states, vec![InteractionState::Show, InteractionState::Default]);
        assert_eq!(log.last().unwrap().cause, TransitionCause::Chain);
    }

    #[tokio::test(start_paused = true)]
    async fn hiding_clears_visibility_only_after_the_response() {
        let widget = widget();

        widget.set_active(false, false, false);
        assert!(widget.is_visible());
        assert!(!widget.is_interactive());

        widget.settle().await;
        assert!(!widget.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn disabling_interactivity_forces_visibility() {
        let widget = widget();
        widget.set_active(false, false, false);
        widget.settle().await;
        assert!(!widget.is_visible());

        widget.set_interactive(false, false, false);
        widget.settle().await;

        assert!(widget.is_visible());
        assert!(!widget.is_interactive());
        assert_eq!(widget.current_state(), InteractionState::NonInteractive);
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_the_same_widget() {
        let widget = widget();
        let observer = widget.clone();

        widget.pointer_enter();
        widget.settle().await;

        assert_eq!(observer.current_state(), InteractionState::Hover);
        assert_eq!(observer.id(), widget.id());
    }
}
