//! Core interaction model: states, pointer flags, widget variants, and the
//! transition log.
//!
//! Everything here is synchronous and allocation-light. The async layers
//! ([`crate::widget`], [`crate::features`]) are built on top of these types
//! and never reach around them.

mod flags;
mod history;
mod state;
mod variant;

pub use flags::InteractionFlags;
pub use history::{InteractionLog, InteractionRecord, TransitionCause};
pub use state::InteractionState;
pub use variant::{SelectOutcome, WidgetVariant};
