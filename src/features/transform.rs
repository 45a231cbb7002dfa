//! Transform executor: moves each element's pose (position, rotation,
//! scale) to the per-state target over the configured duration.

use super::{glide, FeatureError, FeatureExecutor, Target};
use crate::config::{StateSettings, TransformSetting, WidgetTransform};
use crate::core::InteractionState;
use async_trait::async_trait;
use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;

struct TransformElement {
    cell: Target<WidgetTransform>,
    settings: StateSettings<TransformSetting>,
}

/// Moves widget poses between per-state targets.
#[derive(Default)]
pub struct TransformFeature {
    elements: Vec<TransformElement>,
}

impl TransformFeature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an element. Keep a clone of `cell` to observe the live pose.
    pub fn with_element(
        mut self,
        cell: Target<WidgetTransform>,
        settings: StateSettings<TransformSetting>,
    ) -> Self {
        self.elements.push(TransformElement { cell, settings });
        self
    }
}

#[async_trait]
impl FeatureExecutor for TransformFeature {
    fn name(&self) -> &'static str {
        "transform"
    }

    async fn respond(
        &self,
        state: InteractionState,
        cancel: &CancellationToken,
    ) -> Result<(), FeatureError> {
        let moves = self.elements.iter().filter_map(|element| {
            element.settings.resolve(state).map(|setting| {
                glide(
                    &element.cell,
                    setting.target,
                    setting.duration,
                    cancel,
                    WidgetTransform::lerp,
                )
            })
        });
        for result in join_all(moves).await {
            result?;
        }
        Ok(())
    }

    fn apply_instant(&self, state: InteractionState) {
        for element in &self.elements {
            if let Some(setting) = element.settings.resolve(state) {
                element.cell.set(setting.target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Vec3;
    use std::time::Duration;

    fn raised_pose() -> WidgetTransform {
        WidgetTransform {
            position: Vec3::new(0.0, 4.0, 0.0),
            rotation: Vec3::ZERO,
            scale: Vec3::new(1.1, 1.1, 1.1),
        }
    }

    fn hover_raise() -> StateSettings<TransformSetting> {
        StateSettings::new().with(
            InteractionState::Hover,
            TransformSetting {
                target: raised_pose(),
                duration: Duration::from_millis(60),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn respond_lands_on_the_configured_pose() {
        let cell = Target::new(WidgetTransform::IDENTITY);
        let feature = TransformFeature::new().with_element(cell.clone(), hover_raise());

        feature
            .respond(InteractionState::Hover, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(cell.get(), raised_pose());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_moves_immediately() {
        let cell = Target::new(WidgetTransform::IDENTITY);
        let settings = StateSettings::new().with(
            InteractionState::Press,
            TransformSetting {
                target: raised_pose(),
                duration: Duration::ZERO,
            },
        );
        let feature = TransformFeature::new().with_element(cell.clone(), settings);

        feature
            .respond(InteractionState::Press, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(cell.get(), raised_pose());
    }

    #[tokio::test(start_paused = true)]
    async fn instant_apply_matches_awaited_respond() {
        let animated = Target::new(WidgetTransform::IDENTITY);
        let instant = Target::new(WidgetTransform::IDENTITY);
        let feature = TransformFeature::new()
            .with_element(animated.clone(), hover_raise())
            .with_element(instant.clone(), hover_raise());

        feature
            .respond(InteractionState::Hover, &CancellationToken::new())
            .await
            .unwrap();
        feature.apply_instant(InteractionState::Hover);

        assert_eq!(animated.get(), instant.get());
    }
}
