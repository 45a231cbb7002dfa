//! External effect triggering.
//!
//! Some widget decisions should fire an effect owned by a collaborator
//! outside the widget tree, like a camera nudge on selection. The
//! [`EffectRelay`] consumes play requests from a channel and plays its
//! configured [`EffectPreset`] against one shared target transform. A
//! relay with no preset bound logs a warning and drops the request; the
//! widget side never fails for it.

use crate::config::WidgetTransform;
use crate::events::{WidgetEvent, WidgetSignal};
use crate::features::Target;
use crate::widget::WidgetId;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// A request for a relay to play its preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayRequest {
    pub widget: WidgetId,
    pub signal: WidgetSignal,
}

impl From<WidgetEvent> for PlayRequest {
    fn from(event: WidgetEvent) -> Self {
        Self {
            widget: event.widget,
            signal: event.signal,
        }
    }
}

/// Ambient data handed to a preset when it plays.
#[derive(Clone, Debug)]
pub struct EffectContext {
    /// Label of the relay playing the preset.
    pub relay: String,
    /// The request that triggered playback.
    pub request: PlayRequest,
}

/// An effect that can be told to play against a transform.
pub trait EffectPreset: Send + Sync {
    fn name(&self) -> &str;

    /// Mutate `target` to express the effect.
    fn play(&self, context: &EffectContext, target: &mut WidgetTransform);
}

/// Consumes play requests against one preset and one target transform.
pub struct EffectRelay {
    label: String,
    preset: Option<Arc<dyn EffectPreset>>,
    target: Target<WidgetTransform>,
    requests: mpsc::Receiver<PlayRequest>,
}

impl EffectRelay {
    /// Create a relay with a request queue of `capacity` and return the
    /// sender that feeds it.
    pub fn new(
        label: impl Into<String>,
        preset: Option<Arc<dyn EffectPreset>>,
        target: Target<WidgetTransform>,
        capacity: usize,
    ) -> (Self, mpsc::Sender<PlayRequest>) {
        let (sender, requests) = mpsc::channel(capacity);
        (
            Self {
                label: label.into(),
                preset,
                target,
                requests,
            },
            sender,
        )
    }

    /// Consume requests until every sender is gone.
    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.play(request);
        }
    }

    fn play(&self, request: PlayRequest) {
        let Some(preset) = &self.preset else {
            log::warn!(
                "effect relay '{}' has no preset bound, dropping {} from widget {}",
                self.label,
                request.signal.name(),
                request.widget,
            );
            return;
        };
        log::trace!("effect relay '{}' playing '{}'", self.label, preset.name());
        let context = EffectContext {
            relay: self.label.clone(),
            request,
        };
        let mut pose = self.target.get();
        preset.play(&context, &mut pose);
        self.target.set(pose);
    }
}

/// Forward a widget's events into a relay until either side closes.
pub async fn forward_events(
    mut events: broadcast::Receiver<WidgetEvent>,
    requests: mpsc::Sender<PlayRequest>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if requests.send(event.into()).await.is_err() {
                    return;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                log::warn!("effect forwarding lagged, skipped {skipped} events");
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}
