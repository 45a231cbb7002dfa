//! Audio executor: plays the per-state clip through a pluggable sink and
//! holds the response open for the clip's length.
//!
//! Device playback is out of scope for this crate; [`AudioSink`] is the
//! seam where a real audio backend plugs in.

use super::{FeatureError, FeatureExecutor};
use crate::config::{AudioClip, AudioSetting, StateSettings};
use crate::core::InteractionState;
use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use tokio::time;
use tokio_util::sync::CancellationToken;

/// Playback backend seam. Implementations start the clip and return
/// immediately; the executor owns the wait.
pub trait AudioSink: Send + Sync {
    /// Start playback of `clip`. Returning an error marks this element's
    /// response failed without affecting sibling executors.
    fn play(&self, clip: &AudioClip) -> Result<(), FeatureError>;
}

/// Sink that drops every clip. Stands in where no backend is wired up.
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&self, _clip: &AudioClip) -> Result<(), FeatureError> {
        Ok(())
    }
}

struct AudioElement {
    sink: Arc<dyn AudioSink>,
    settings: StateSettings<AudioSetting>,
}

/// Plays per-state audio clips.
#[derive(Default)]
pub struct AudioFeature {
    elements: Vec<AudioElement>,
}

impl AudioFeature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an element backed by `sink`.
    pub fn with_element(
        mut self,
        sink: Arc<dyn AudioSink>,
        settings: StateSettings<AudioSetting>,
    ) -> Self {
        self.elements.push(AudioElement { sink, settings });
        self
    }
}

#[async_trait]
impl FeatureExecutor for AudioFeature {
    fn name(&self) -> &'static str {
        "audio"
    }

    async fn respond(
        &self,
        state: InteractionState,
        cancel: &CancellationToken,
    ) -> Result<(), FeatureError> {
        let plays = self.elements.iter().filter_map(|element| {
            element.settings.resolve(state).map(|setting| async move {
                element.sink.play(&setting.clip)?;
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
                if let Err(error) = element.sink.play(&setting.clip) {
                    log::warn!("audio instant play failed: {error}");
                }
            }
        }
    }
}
