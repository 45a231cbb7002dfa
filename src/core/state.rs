//! Interaction states a widget moves through.
//!
//! Every widget owns exactly one current state at any instant. The state is
//! authoritative for what the widget looks like; the flags in
//! [`crate::core::InteractionFlags`] only disambiguate where to fall back to
//! when a transient condition ends.

use serde::{Deserialize, Serialize};

/// One named phase of a widget's lifecycle and interaction response.
///
/// `Show` and `Hide` are transient activation states, `Interactive` and
/// `NonInteractive` gate input responsiveness, and `Default`, `Hover`,
/// `Press`, `Select` are the steady interaction states. `Click` is a
/// momentary pulse dispatched to feature executors only; it is never held as
/// a widget's current state, and the widget builder rejects it as an initial
/// state.
///
/// # Example
///
/// ```rust
/// use petal_ui::core::InteractionState;
///
/// assert_eq!(InteractionState::Hover.name(), "Hover");
/// assert!(InteractionState::Hover.is_steady());
/// assert!(!InteractionState::Click.is_steady());
/// assert!(InteractionState::Show.is_activation());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum InteractionState {
    /// Entering visibility; chains into `Default` once the show response ends.
    Show,
    /// Leaving visibility; the widget stays visible until the hide response ends.
    Hide,
    /// Input responsiveness being enabled; chains into `Default`.
    Interactive,
    /// Input responsiveness disabled.
    NonInteractive,
    /// The resting steady state.
    Default,
    /// Pointer is over the widget.
    Hover,
    /// Pointer is held down on the widget.
    Press,
    /// The widget is selected (semantics depend on the widget variant).
    Select,
    /// Momentary feedback pulse consumed by feature executors only.
    Click,
}

impl InteractionState {
    /// Every state, in declaration order.
    pub const ALL: [InteractionState; 9] = [
        Self::Show,
        Self::Hide,
        Self::Interactive,
        Self::NonInteractive,
        Self::Default,
        Self::Hover,
        Self::Press,
        Self::Select,
        Self::Click,
    ];

    /// The states backed by a boolean trigger on an animation graph.
    ///
    /// `Click` is excluded: it is a pulse and is never latched `true`.
    pub const TRIGGER_BANK: [InteractionState; 8] = [
        Self::Show,
        Self::Hide,
        Self::Interactive,
        Self::NonInteractive,
        Self::Default,
        Self::Hover,
        Self::Press,
        Self::Select,
    ];

    /// The state's name for display, logging and graph trigger lookup.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Show => "Show",
            Self::Hide => "Hide",
            Self::Interactive => "Interactive",
            Self::NonInteractive => "NonInteractive",
            Self::Default => "Default",
            Self::Hover => "Hover",
            Self::Press => "Press",
            Self::Select => "Select",
            Self::Click => "Click",
        }
    }

    /// Whether this is one of the steady interaction states a widget can
    /// rest in between pointer events.
    pub fn is_steady(&self) -> bool {
        matches!(
            self,
            Self::Default | Self::Hover | Self::Press | Self::Select
        )
    }

    /// Whether this is a visibility activation state (`Show`/`Hide`).
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Show | Self::Hide)
    }

    /// Whether a widget may hold this state as its current state.
    ///
    /// Everything but `Click`: `Click` exists only as a pulse to feature
    /// executors.
    pub fn is_holdable(&self) -> bool {
        !matches!(self, Self::Click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_matches_variant() {
        for state in InteractionState::ALL {
            assert_eq!(format!("{state:?}"), state.name());
        }
    }

    #[test]
    fn steady_states_are_the_four_interaction_states() {
        let steady: Vec<_> = InteractionState::ALL
            .into_iter()
            .filter(InteractionState::is_steady)
            .collect();
        assert_eq!(
            steady,
            vec![
                InteractionState::Default,
                InteractionState::Hover,
                InteractionState::Press,
                InteractionState::Select,
            ]
        );
    }

    #[test]
    fn only_click_is_not_holdable() {
        for state in InteractionState::ALL {
            assert_eq!(state.is_holdable(), state != InteractionState::Click);
        }
    }

    #[test]
    fn trigger_bank_excludes_click() {
        assert!(!InteractionState::TRIGGER_BANK.contains(&InteractionState::Click));
        assert_eq!(
            InteractionState::TRIGGER_BANK.len(),
            InteractionState::ALL.len() - 1
        );
    }

    #[test]
    fn state_serializes_as_name() {
        let json = serde_json::to_string(&InteractionState::NonInteractive).unwrap();
        assert_eq!(json, "\"NonInteractive\"");
        let back: InteractionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, InteractionState::NonInteractive);
    }
}
