//! Color executor: fades each element's color to the per-state target.
//!
//! Every element pairs an observable [`Target<Rgba>`] cell with its own
//! per-state table. Responding to a state fades all configured elements
//! concurrently over their configured durations; the batch resolves when
//! the slowest fade lands.

use super::{glide, FeatureError, FeatureExecutor, Target};
use crate::config::{ColorSetting, Rgba, StateSettings};
use crate::core::InteractionState;
use async_trait::async_trait;
use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;

struct ColorElement {
    cell: Target<Rgba>,
    settings: StateSettings<ColorSetting>,
}

/// Fades widget colors between per-state targets.
///
/// # Example
///
/// ```rust
/// use petal_ui::config::{ColorSetting, Rgba, StateSettings};
/// use petal_ui::core::InteractionState;
/// use petal_ui::features::{ColorFeature, Target};
/// use std::time::Duration;
///
/// let cell = Target::new(Rgba::WHITE);
/// let settings = StateSettings::new().with(
///     InteractionState::Press,
///     ColorSetting {
///         color: Rgba::new(0.6, 0.6, 0.6, 1.0),
///         duration: Duration::from_millis(80),
///     },
/// );
/// let feature = ColorFeature::new().with_element(cell.clone(), settings);
/// ```
#[derive(Default)]
pub struct ColorFeature {
    elements: Vec<ColorElement>,
}

impl ColorFeature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an element. Keep a clone of `cell` to observe the live color.
    pub fn with_element(
        mut self,
        cell: Target<Rgba>,
        settings: StateSettings<ColorSetting>,
    ) -> Self {
        self.elements.push(ColorElement { cell, settings });
        self
    }
}

#[async_trait]
impl FeatureExecutor for ColorFeature {
    fn name(&self) -> &'static str {
        "color"
    }

    async fn respond(
        &self,
        state: InteractionState,
        cancel: &CancellationToken,
    ) -> Result<(), FeatureError> {
        let fades = self.elements.iter().filter_map(|element| {
            element.settings.resolve(state).map(|setting| {
                glide(
                    &element.cell,
                    setting.color,
                    setting.duration,
                    cancel,
                    Rgba::lerp,
                )
            })
        });
        for result in join_all(fades).await {
            result?;
        }
        Ok(())
    }

    fn apply_instant(&self, state: InteractionState) {
        for element in &self.elements {
            if let Some(setting) = element.settings.resolve(state) {
                element.cell.set(setting.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    fn pressed_gray(duration_millis: u64) -> StateSettings<ColorSetting> {
        StateSettings::new().with(
            InteractionState::Press,
            ColorSetting {
                color: Rgba::new(0.5, 0.5, 0.5, 1.0),
                duration: Duration::from_millis(duration_millis),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn respond_lands_on_the_configured_color() {
        let cell = Target::new(Rgba::WHITE);
        let feature = ColorFeature::new().with_element(cell.clone(), pressed_gray(100));

        feature
            .respond(InteractionState::Press, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(cell.get(), Rgba::new(0.5, 0.5, 0.5, 1.0));
    }

    #[tokio::test(start_paused = true)]
    async fn unconfigured_state_leaves_the_cell_untouched() {
        let cell = Target::new(Rgba::WHITE);
        let feature = ColorFeature::new().with_element(cell.clone(), pressed_gray(100));

        feature
            .respond(InteractionState::Hover, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(cell.get(), Rgba::WHITE);
    }

    #[tokio::test(start_paused = true)]
    async fn elements_fade_concurrently() {
        let first = Target::new(Rgba::WHITE);
        let second = Target::new(Rgba::WHITE);
        let feature = ColorFeature::new()
            .with_element(first.clone(), pressed_gray(30))
            .with_element(second.clone(), pressed_gray(90));

        let started = Instant::now();
        feature
            .respond(InteractionState::Press, &CancellationToken::new())
            .await
            .unwrap();

        // Concurrent fades finish with the slowest element, not the sum.
        assert!(started.elapsed() < Duration::from_millis(120));
        assert_eq!(first.get(), second.get());
    }

    #[tokio::test(start_paused = true)]
    async fn instant_apply_matches_awaited_respond() {
        let animated = Target::new(Rgba::WHITE);
        let instant = Target::new(Rgba::WHITE);
        let feature = ColorFeature::new()
            .with_element(animated.clone(), pressed_gray(50))
            .with_element(instant.clone(), pressed_gray(50));

        feature
            .respond(InteractionState::Press, &CancellationToken::new())
            .await
            .unwrap();
        feature.apply_instant(InteractionState::Press);

        assert_eq!(animated.get(), instant.get());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_freezes_the_fade_mid_flight() {
        let cell = Target::new(Rgba::WHITE);
        let feature = ColorFeature::new().with_element(cell.clone(), pressed_gray(100));

        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = feature.respond(InteractionState::Press, &cancel).await;

        assert_eq!(result, Err(FeatureError::Cancelled));
        assert_eq!(cell.get(), Rgba::WHITE);
    }
}
