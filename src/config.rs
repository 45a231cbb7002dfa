//! Per-state configuration payloads.
//!
//! Each feature executor is driven by a table mapping interaction states to
//! a payload: what color to fade to, which sprite to swap in, where to move
//! the transform, and so on. [`StateSettings`] is that table; entries can be
//! disabled without being removed, and a disabled entry resolves to nothing.

use crate::core::InteractionState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Linear RGBA color, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Component-wise interpolation, `t` clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

/// Three-component vector used for positions, Euler rotations, and scales.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise interpolation, `t` clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        Vec3 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Vec3::ZERO
    }
}

/// Spatial pose of a widget: position, Euler rotation, and scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl WidgetTransform {
    pub const IDENTITY: WidgetTransform = WidgetTransform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Interpolate every component toward `other`.
    pub fn lerp(self, other: WidgetTransform, t: f32) -> WidgetTransform {
        WidgetTransform {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.lerp(other.rotation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

impl Default for WidgetTransform {
    fn default() -> Self {
        WidgetTransform::IDENTITY
    }
}

/// Handle to a sprite asset, identified by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRef {
    pub name: String,
}

impl SpriteRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Handle to an audio asset, with the clip's play length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioClip {
    pub name: String,
    pub length: Duration,
}

impl AudioClip {
    pub fn new(name: impl Into<String>, length: Duration) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// Handle to an animation clip, with the clip's play length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub length: Duration,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, length: Duration) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// A single per-state entry: a payload plus an enabled switch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSetting<T> {
    pub enabled: bool,
    pub payload: T,
}

impl<T> StateSetting<T> {
    pub fn new(payload: T) -> Self {
        Self {
            enabled: true,
            payload,
        }
    }
}

/// Table mapping interaction states to feature payloads.
///
/// # Example
///
/// ```rust
/// use petal_ui::config::{Rgba, ColorSetting, StateSettings};
/// use petal_ui::core::InteractionState;
/// use std::time::Duration;
///
/// let settings = StateSettings::new()
///     .with(
///         InteractionState::Hover,
///         ColorSetting {
///             color: Rgba::new(0.9, 0.9, 1.0, 1.0),
///             duration: Duration::from_millis(120),
///         },
///     );
///
/// assert!(settings.resolve(InteractionState::Hover).is_some());
/// assert!(settings.resolve(InteractionState::Press).is_none());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateSettings<T> {
    entries: HashMap<InteractionState, StateSetting<T>>,
}

impl<T> StateSettings<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add an enabled entry for `state`, replacing any existing one.
    pub fn with(mut self, state: InteractionState, payload: T) -> Self {
        self.insert(state, StateSetting::new(payload));
        self
    }

    /// Insert an entry in place, keeping the caller's enabled switch.
    pub fn insert(&mut self, state: InteractionState, setting: StateSetting<T>) {
        self.entries.insert(state, setting);
    }

    /// Flip the enabled switch for `state` if an entry exists.
    pub fn set_enabled(&mut self, state: InteractionState, enabled: bool) {
        if let Some(entry) = self.entries.get_mut(&state) {
            entry.enabled = enabled;
        }
    }

    /// The payload for `state`, or `None` if absent or disabled.
    pub fn resolve(&self, state: InteractionState) -> Option<&T> {
        self.entries
            .get(&state)
            .filter(|entry| entry.enabled)
            .map(|entry| &entry.payload)
    }

    /// Whether `state` has an enabled entry.
    pub fn is_enabled(&self, state: InteractionState) -> bool {
        self.resolve(state).is_some()
    }

    /// Number of entries, enabled or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Color fade payload: target color and fade duration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorSetting {
    pub color: Rgba,
    pub duration: Duration,
}

/// Sprite swap payload. Swaps are instantaneous.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSetting {
    pub sprite: SpriteRef,
}

/// Transform move payload: target pose and move duration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformSetting {
    pub target: WidgetTransform,
    pub duration: Duration,
}

/// Audio payload: the clip to play on entering the state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSetting {
    pub clip: AudioClip,
}

/// Animation payload: the clip bound to the state's slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSetting {
    pub clip: AnimationClip,
}
