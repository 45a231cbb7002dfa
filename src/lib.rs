//! Petal UI: an interactive-widget state machine with async feature
//! orchestration
//!
//! Petal UI drives composable widgets (buttons, checkboxes, radios) through
//! a fixed set of interaction states. The state logic itself is a pure core
//! with no side effects; everything audible or visible happens in feature
//! executors, which respond to each transition asynchronously and are
//! fanned out and back in on a Tokio runtime.
//!
//! # Core Concepts
//!
//! - **States**: the nine `InteractionState` values a widget moves through,
//!   from activation (`Show`/`Hide`) to steady interaction
//!   (`Default`/`Hover`/`Press`/`Select`)
//! - **Flags**: advisory pointer projections that decide which steady state
//!   to fall back to when a transient condition ends
//! - **Variants**: `Button`, `Checkbox`, and `Radio` select semantics over
//!   one shared state machine
//! - **Features**: swappable async executors (color, sprite, transform,
//!   audio, animation) that each animate one aspect of a transition
//! - **Orchestration**: one in-flight batch handle per widget, replaced on
//!   every transition under a configurable overlap policy
//!
//! # Example
//!
//! ```rust
//! use petal_ui::config::{ColorSetting, Rgba, StateSettings};
//! use petal_ui::core::{InteractionState, WidgetVariant};
//! use petal_ui::features::{ColorFeature, Target};
//! use petal_ui::widget::WidgetBuilder;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let color = Target::new(Rgba::WHITE);
//! let settings = StateSettings::new().with(
//!     InteractionState::Select,
//!     ColorSetting {
//!         color: Rgba::new(0.3, 0.8, 0.4, 1.0),
//!         duration: Duration::from_millis(80),
//!     },
//! );
//!
//! let checkbox = WidgetBuilder::new()
//!     .variant(WidgetVariant::Checkbox)
//!     .color_feature(ColorFeature::new().with_element(color.clone(), settings))
//!     .build()
//!     .unwrap();
//!
//! checkbox.pointer_enter();
//! checkbox.pointer_click();
//! checkbox.settle().await;
//!
//! assert!(checkbox.flags().is_selected);
//! assert_eq!(checkbox.current_state(), InteractionState::Select);
//! assert_eq!(color.get(), Rgba::new(0.3, 0.8, 0.4, 1.0));
//! # }
//! ```

pub mod config;
pub mod core;
pub mod events;
pub mod features;
pub mod trigger;
pub mod widget;

// Re-export commonly used types
pub use core::{InteractionFlags, InteractionLog, InteractionState, WidgetVariant};
pub use events::{WidgetEvent, WidgetSignal};
pub use features::{FeatureError, FeatureExecutor, FeatureSet, Target};
pub use widget::{BuildError, Orchestration, OverlapPolicy, Widget, WidgetBuilder, WidgetId};
