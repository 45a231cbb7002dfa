//! Animation executor: multiplexes per-state clips through a shared
//! trigger graph.
//!
//! Each element owns an [`AnimationGraph`]: a fixed bank of boolean
//! triggers, one per holdable interaction state, plus one clip slot per
//! state. Responding to a state binds the configured clip into its slot
//! (lazily, only when it differs from what is already bound), latches the
//! trigger bank, then holds the response open for the clip's length so
//! fan-in reflects real playback.
//!
//! Latching rules:
//! - `Hover` layers over the default visual: `Default` and `Hover` both
//!   end up set, and an in-flight `Press` trigger is left alone.
//! - Every other state sweeps the bank exclusively: its own trigger set,
//!   all others cleared. A stale `Hover` therefore cannot survive entering
//!   `Default` or `Click`.
//! - `Click` has no trigger of its own; the pulse leaves the whole bank
//!   cleared.

use super::{FeatureError, FeatureExecutor};
use crate::config::{AnimationClip, AnimationSetting, StateSettings};
use crate::core::InteractionState;
use async_trait::async_trait;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::time;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
struct GraphState {
    triggers: HashMap<InteractionState, bool>,
    slots: HashMap<InteractionState, AnimationClip>,
    rebinds: u64,
}

impl GraphState {
    fn latch(&mut self, state: InteractionState) {
        if state == InteractionState::Hover {
            self.triggers.insert(InteractionState::Default, true);
            self.triggers.insert(InteractionState::Hover, true);
            return;
        }
        for trigger in InteractionState::TRIGGER_BANK {
            self.triggers.insert(trigger, trigger == state);
        }
    }
}

/// Shared trigger-and-slot graph driving one animated element.
///
/// Clones share the same underlying graph; keep one to assert on trigger
/// values or rebinding behavior from outside the executor.
#[derive(Clone, Debug, Default)]
pub struct AnimationGraph {
    inner: Arc<Mutex<GraphState>>,
}

impl AnimationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `state`'s trigger is currently latched. `Click` always
    /// reads false.
    pub fn trigger(&self, state: InteractionState) -> bool {
        *self
            .inner
            .lock()
            .unwrap()
            .triggers
            .get(&state)
            .unwrap_or(&false)
    }

    /// The clip currently bound to `state`'s slot.
    pub fn bound_clip(&self, state: InteractionState) -> Option<AnimationClip> {
        self.inner.lock().unwrap().slots.get(&state).cloned()
    }

    /// How many slot rebinds have happened since creation. Repeated
    /// responses to the same state with an unchanged clip do not rebind.
    pub fn rebind_count(&self) -> u64 {
        self.inner.lock().unwrap().rebinds
    }

    fn respond_to(&self, state: InteractionState, clip: &AnimationClip) {
        let mut graph = self.inner.lock().unwrap();
        if graph.slots.get(&state) != Some(clip) {
            graph.slots.insert(state, clip.clone());
            graph.rebinds += 1;
        }
        graph.latch(state);
    }
}

struct AnimationElement {
    graph: AnimationGraph,
    settings: StateSettings<AnimationSetting>,
}

/// Plays per-state animation clips through each element's trigger graph.
#[derive(Default)]
pub struct AnimationFeature {
    elements: Vec<AnimationElement>,
}

impl AnimationFeature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an element. Keep a clone of `graph` to observe triggers.
    pub fn with_element(
        mut self,
        graph: AnimationGraph,
        settings: StateSettings<AnimationSetting>,
    ) -> Self {
        self.elements.push(AnimationElement { graph, settings });
        self
    }
}

#[async_trait]
impl FeatureExecutor for AnimationFeature {
    fn name(&self) -> &'static str {
        "animation"
    }

    async fn respond(
        &self,
        state: InteractionState,
        cancel: &CancellationToken,
    ) -> Result<(), FeatureError> {
        let plays = self.elements.iter().filter_map(|element| {
            element.settings.resolve(state).map(|setting| async move {
                element.graph.respond_to(state, &setting.clip);
                tokio::select! {
                    _ = cancel.cancelled() => Err(FeatureError::Cancelled),
                    _ = time::sleep(setting.clip.length) => Ok(()),
                }
            })
        });
        for result in join_all(plays).await {
            result?;
        }
        Ok(())
    }

    fn apply_instant(&self, state: InteractionState) {
        for element in &self.elements {
            if let Some(setting) = element.settings.resolve(state) {
                element.graph.respond_to(state, &setting.clip);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    fn clip(name: &str) -> AnimationClip {
        AnimationClip::new(name, Duration::from_millis(20))
    }

    fn full_settings() -> StateSettings<AnimationSetting> {
        let mut settings = StateSettings::new();
        for state in InteractionState::ALL {
            settings = settings.with(
                state,
                AnimationSetting {
                    clip: clip(state.name()),
                },
            );
        }
        settings
    }

    fn feature_with_graph() -> (AnimationFeature, AnimationGraph) {
        let graph = AnimationGraph::new();
        let feature = AnimationFeature::new().with_element(graph.clone(), full_settings());
        (feature, graph)
    }

    async fn respond(feature: &AnimationFeature, state: InteractionState) {
        feature
            .respond(state, &CancellationToken::new())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn non_hover_states_sweep_the_bank_exclusively() {
        let (feature, graph) = feature_with_graph();

        respond(&feature, InteractionState::Hover).await;
        respond(&feature, InteractionState::Select).await;

        for state in InteractionState::TRIGGER_BANK {
            assert_eq!(graph.trigger(state), state == InteractionState::Select);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hover_layers_over_default_and_spares_press() {
        let (feature, graph) = feature_with_graph();

        respond(&feature, InteractionState::Press).await;
        respond(&feature, InteractionState::Hover).await;

        assert!(graph.trigger(InteractionState::Default));
        assert!(graph.trigger(InteractionState::Hover));
        assert!(graph.trigger(InteractionState::Press));
        assert!(!graph.trigger(InteractionState::Select));
    }

    #[tokio::test(start_paused = true)]
    async fn default_clears_a_stale_hover() {
        let (feature, graph) = feature_with_graph();

        respond(&feature, InteractionState::Hover).await;
        assert!(graph.trigger(InteractionState::Hover));

        respond(&feature, InteractionState::Default).await;
        assert!(graph.trigger(InteractionState::Default));
        assert!(!graph.trigger(InteractionState::Hover));
    }

    #[tokio::test(start_paused = true)]
    async fn click_latches_nothing() {
        let (feature, graph) = feature_with_graph();

        respond(&feature, InteractionState::Press).await;
        respond(&feature, InteractionState::Click).await;

        assert!(!graph.trigger(InteractionState::Click));
        for state in InteractionState::TRIGGER_BANK {
            assert!(!graph.trigger(state));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slots_rebind_lazily() {
        let graph = AnimationGraph::new();
        let settings = StateSettings::new().with(
            InteractionState::Hover,
            AnimationSetting { clip: clip("wave") },
        );
        let feature = AnimationFeature::new().with_element(graph.clone(), settings);

        respond(&feature, InteractionState::Hover).await;
        respond(&feature, InteractionState::Hover).await;
        respond(&feature, InteractionState::Hover).await;

        assert_eq!(graph.rebind_count(), 1);
        assert_eq!(graph.bound_clip(InteractionState::Hover), Some(clip("wave")));
    }

    #[tokio::test(start_paused = true)]
    async fn rebinding_happens_when_the_clip_changes() {
        let graph = AnimationGraph::new();
        let first = StateSettings::new().with(
            InteractionState::Hover,
            AnimationSetting { clip: clip("wave") },
        );
        let second = StateSettings::new().with(
            InteractionState::Hover,
            AnimationSetting { clip: clip("bounce") },
        );
        let feature = AnimationFeature::new()
            .with_element(graph.clone(), first)
            .with_element(graph.clone(), second);

        respond(&feature, InteractionState::Hover).await;

        assert_eq!(graph.rebind_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn respond_holds_for_the_clip_length() {
        let (feature, _graph) = feature_with_graph();

        let started = Instant::now();
        respond(&feature, InteractionState::Show).await;
        assert_eq!(started.elapsed(), Duration::from_millis(20));
    }

    #[tokio::test(start_paused = true)]
    async fn instant_apply_latches_without_waiting() {
        let (feature, graph) = feature_with_graph();

        let started = Instant::now();
        feature.apply_instant(InteractionState::Select);

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert!(graph.trigger(InteractionState::Select));
    }
}
