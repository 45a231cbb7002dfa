//! Sprite executor: swaps per-state sprites. Swaps are instantaneous, so
//! the async response resolves as soon as every element has swapped.

use super::{FeatureError, FeatureExecutor, Target};
use crate::config::{SpriteRef, SpriteSetting, StateSettings};
use crate::core::InteractionState;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

struct SpriteElement {
    cell: Target<SpriteRef>,
    settings: StateSettings<SpriteSetting>,
}

/// Swaps widget sprites between per-state variants.
#[derive(Default)]
pub struct SpriteFeature {
    elements: Vec<SpriteElement>,
}

impl SpriteFeature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an element. Keep a clone of `cell` to observe the live sprite.
    pub fn with_element(
        mut self,
        cell: Target<SpriteRef>,
        settings: StateSettings<SpriteSetting>,
    ) -> Self {
        self.elements.push(SpriteElement { cell, settings });
        self
    }

    fn swap(&self, state: InteractionState) {
        for element in &self.elements {
            if let Some(setting) = element.settings.resolve(state) {
                element.cell.set(setting.sprite.clone());
            }
        }
    }
}

#[async_trait]
impl FeatureExecutor for SpriteFeature {
    fn name(&self) -> &'static str {
        "sprite"
    }

    async fn respond(
        &self,
        state: InteractionState,
        _cancel: &CancellationToken,
    ) -> Result<(), FeatureError> {
        self.swap(state);
        Ok(())
    }

    fn apply_instant(&self, state: InteractionState) {
        self.swap(state);
    }
}
