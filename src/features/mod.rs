//! Feature executors: the effectful shell that animates a widget's response
//! to each interaction state.
//!
//! A widget owns a [`FeatureSet`] of up to five executors (color, sprite,
//! transform, audio, animation). On every transition the set fans the target
//! state out to all attached executors concurrently and fans back in once
//! every one of them has finished. One executor failing never aborts its
//! siblings; failures are collected into a [`BatchReport`] after the batch
//! settles and surfaced as warnings.

use crate::core::InteractionState;
use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

mod animation;
mod audio;
mod color;
mod sprite;
mod transform;

pub use animation::{AnimationFeature, AnimationGraph};
pub use audio::{AudioFeature, AudioSink, NullSink};
pub use color::ColorFeature;
pub use sprite::SpriteFeature;
pub use transform::TransformFeature;

/// Step interval for time-sliced value animation.
pub(crate) const TICK: Duration = Duration::from_millis(16);

/// Why a single executor's response did not complete normally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// The orchestration owning this response was cancelled.
    #[error("response cancelled before completion")]
    Cancelled,
    /// The response overran the configured per-batch deadline.
    #[error("response exceeded the {0:?} deadline")]
    DeadlineExceeded(Duration),
    /// An executor backend (e.g. an audio sink) reported a failure.
    #[error("backend failure: {0}")]
    Backend(String),
}

/// One aspect of a widget's visual or audible response.
///
/// Executors resolve their own per-state settings; a state with no enabled
/// setting contributes nothing and resolves immediately with `Ok`. An
/// executor may fan out over several elements internally, but from the
/// outside one `respond` call covers the whole executor.
#[async_trait]
pub trait FeatureExecutor: Send + Sync {
    /// Short stable name used in batch reports and log lines.
    fn name(&self) -> &'static str;

    /// Animate this feature's response to `state`. Stops at the next await
    /// point with [`FeatureError::Cancelled`] once `cancel` fires.
    async fn respond(
        &self,
        state: InteractionState,
        cancel: &CancellationToken,
    ) -> Result<(), FeatureError>;

    /// Apply the terminal value for `state` synchronously, with no
    /// animation. Used at widget initialization so the configured initial
    /// state does not flash a transition.
    fn apply_instant(&self, state: InteractionState);
}

/// Shared observable cell holding one animated value.
///
/// Executors write into cells; whoever constructed the widget keeps a clone
/// of the handle to read the live value (a render loop, a test assertion).
#[derive(Clone, Debug, Default)]
pub struct Target<T> {
    value: Arc<Mutex<T>>,
}

impl<T: Clone> Target<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(Mutex::new(value)),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.value.lock().unwrap().clone()
    }

    /// Overwrite the current value.
    pub fn set(&self, value: T) {
        *self.value.lock().unwrap() = value;
    }
}

/// Drive `cell` from its current value toward `to` over `duration`, one
/// step per tick, finishing on the exact target value.
pub(crate) async fn glide<T>(
    cell: &Target<T>,
    to: T,
    duration: Duration,
    cancel: &CancellationToken,
    lerp: fn(T, T, f32) -> T,
) -> Result<(), FeatureError>
where
    T: Clone + Send,
{
    if duration.is_zero() {
        cell.set(to);
        return Ok(());
    }
    let from = cell.get();
    let started = Instant::now();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Err(FeatureError::Cancelled),
            _ = time::sleep(TICK) => {}
        }
        let progress = started.elapsed().as_secs_f32() / duration.as_secs_f32();
        if progress >= 1.0 {
            cell.set(to);
            return Ok(());
        }
        cell.set(lerp(from.clone(), to.clone(), progress));
    }
}

/// A single executor's failure inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFailure {
    pub feature: &'static str,
    pub error: FeatureError,
}

/// Outcome of one fanned-out batch: the state every executor responded to,
/// plus whatever failures were collected after all of them finished.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub state: InteractionState,
    pub failures: Vec<FeatureFailure>,
}

impl BatchReport {
    pub fn fully_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether any executor stopped because the batch was cancelled.
    pub fn was_cancelled(&self) -> bool {
        self.failures
            .iter()
            .any(|failure| failure.error == FeatureError::Cancelled)
    }
}

/// Fixed-arity ordered slots for the five feature executors, each optional.
///
/// The audio slot participates in a batch only when the caller asked for
/// audio; the other slots always respond.
#[derive(Clone, Default)]
pub struct FeatureSet {
    color: Option<Arc<dyn FeatureExecutor>>,
    sprite: Option<Arc<dyn FeatureExecutor>>,
    transform: Option<Arc<dyn FeatureExecutor>>,
    audio: Option<Arc<dyn FeatureExecutor>>,
    animation: Option<Arc<dyn FeatureExecutor>>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.color = Some(Arc::new(executor));
        self
    }

    pub fn with_sprite(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.sprite = Some(Arc::new(executor));
        self
    }

    pub fn with_transform(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.transform = Some(Arc::new(executor));
        self
    }

    pub fn with_audio(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.audio = Some(Arc::new(executor));
        self
    }

    pub fn with_animation(mut self, executor: impl FeatureExecutor + 'static) -> Self {
        self.animation = Some(Arc::new(executor));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.sprite.is_none()
            && self.transform.is_none()
            && self.audio.is_none()
            && self.animation.is_none()
    }

    fn active(&self, play_audio: bool) -> Vec<Arc<dyn FeatureExecutor>> {
        let mut executors = Vec::new();
        if let Some(color) = &self.color {
            executors.push(Arc::clone(color));
        }
        if let Some(sprite) = &self.sprite {
            executors.push(Arc::clone(sprite));
        }
        if let Some(transform) = &self.transform {
            executors.push(Arc::clone(transform));
        }
        if play_audio {
            if let Some(audio) = &self.audio {
                executors.push(Arc::clone(audio));
            }
        }
        if let Some(animation) = &self.animation {
            executors.push(Arc::clone(animation));
        }
        executors
    }

    /// Fan `state` out to every participating executor concurrently and
    /// wait for all of them. Per-executor failures are isolated: siblings
    /// run to completion and failures are collected afterwards.
    ///
    /// `deadline` of `Some(limit)` wraps each executor individually; an
    /// overrun is reported as [`FeatureError::DeadlineExceeded`] rather
    /// than stalling the fan-in.
    pub async fn respond_all(
        &self,
        state: InteractionState,
        cancel: &CancellationToken,
        deadline: Option<Duration>,
        play_audio: bool,
    ) -> BatchReport {
        let responses = self.active(play_audio).into_iter().map(|executor| {
            let cancel = cancel.clone();
            async move {
                let name = executor.name();
                let result = match deadline {
                    Some(limit) => {
                        match time::timeout(limit, executor.respond(state, &cancel)).await {
                            Ok(result) => result,
                            Err(_) => Err(FeatureError::DeadlineExceeded(limit)),
                        }
                    }
                    None => executor.respond(state, &cancel).await,
                };
                (name, result)
            }
        });

        let mut failures = Vec::new();
        for (feature, result) in join_all(responses).await {
            if let Err(error) = result {
                match error {
                    FeatureError::Cancelled => {
                        log::debug!("{feature} response to {} cancelled", state.name());
                    }
                    _ => {
                        log::warn!("{feature} response to {} failed: {error}", state.name());
                    }
                }
                failures.push(FeatureFailure { feature, error });
            }
        }
        BatchReport { state, failures }
    }

    /// Synchronously apply the terminal value of `state` on every
    /// participating executor.
    pub fn apply_instant_all(&self, state: InteractionState, play_audio: bool) {
        for executor in self.active(play_audio) {
            executor.apply_instant(state);
        }
    }
}
