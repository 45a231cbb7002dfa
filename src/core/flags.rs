//! Runtime interaction flags and pointer resolution rules.
//!
//! Flags are advisory projections of interaction history, not authoritative
//! state: the widget's current [`InteractionState`] decides what is rendered,
//! and the flags decide *which* steady state a resolution transition
//! (pointer-up, pointer-exit) falls back to. The rule is always "the most
//! specific currently-true condition wins".

use super::state::InteractionState;
use serde::{Deserialize, Serialize};

/// The four advisory flags tracked alongside a widget's current state.
///
/// Non-interactive widgets ignore every pointer-derived flag change.
///
/// # Example
///
/// ```rust
/// use petal_ui::core::{InteractionFlags, InteractionState};
///
/// let mut flags = InteractionFlags::default();
/// flags.is_hovered = true;
/// flags.is_selected = true;
///
/// // Hover beats Select on pointer release.
/// assert_eq!(flags.resolve_release(), InteractionState::Hover);
/// // Hover is irrelevant once the pointer has left.
/// assert_eq!(flags.resolve_exit(), InteractionState::Select);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionFlags {
    /// Whether the widget responds to pointer and API interaction at all.
    pub is_interactive: bool,
    /// Pointer is currently over the widget.
    pub is_hovered: bool,
    /// Pointer is currently held down on the widget.
    pub is_pressed: bool,
    /// The widget is selected (persisted per the widget variant's rules).
    pub is_selected: bool,
}

impl InteractionFlags {
    /// Target state after a pointer release.
    ///
    /// Priority: `Hover` if still hovered, else `Select` if selected, else
    /// `Default`. Assumes `is_pressed` was already cleared by the caller;
    /// this function never reads it.
    pub fn resolve_release(&self) -> InteractionState {
        if self.is_hovered {
            InteractionState::Hover
        } else if self.is_selected {
            InteractionState::Select
        } else {
            InteractionState::Default
        }
    }

    /// Target state after the pointer leaves the widget.
    ///
    /// Priority: `Select` if selected, else `Default`. Assumes `is_hovered`
    /// was already cleared by the caller.
    pub fn resolve_exit(&self) -> InteractionState {
        if self.is_selected {
            InteractionState::Select
        } else {
            InteractionState::Default
        }
    }

    /// Clear the transient interaction flags, keeping interactivity.
    ///
    /// Entering `Default` through the API resets hover, press and selection
    /// in one stroke.
    pub fn clear_transients(&mut self) {
        self.is_hovered = false;
        self.is_pressed = false;
        self.is_selected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(hovered: bool, pressed: bool, selected: bool) -> InteractionFlags {
        InteractionFlags {
            is_interactive: true,
            is_hovered: hovered,
            is_pressed: pressed,
            is_selected: selected,
        }
    }

    #[test]
    fn release_resolution_enumerates_all_flag_combinations() {
        // (hovered, selected) -> expected
        let cases = [
            (false, false, InteractionState::Default),
            (false, true, InteractionState::Select),
            (true, false, InteractionState::Hover),
            (true, true, InteractionState::Hover),
        ];
        for (hovered, selected, expected) in cases {
            assert_eq!(
                flags(hovered, false, selected).resolve_release(),
                expected,
                "hovered={hovered} selected={selected}"
            );
        }
    }

    #[test]
    fn exit_resolution_enumerates_selected_values() {
        assert_eq!(
            flags(false, false, false).resolve_exit(),
            InteractionState::Default
        );
        assert_eq!(
            flags(false, false, true).resolve_exit(),
            InteractionState::Select
        );
    }

    #[test]
    fn exit_resolution_ignores_hover() {
        // Callers clear is_hovered before resolving, but even a stale value
        // must not influence the outcome.
        assert_eq!(
            flags(true, false, false).resolve_exit(),
            InteractionState::Default
        );
    }

    #[test]
    fn release_resolution_ignores_pressed() {
        assert_eq!(
            flags(false, true, false).resolve_release(),
            InteractionState::Default
        );
    }

    #[test]
    fn clear_transients_keeps_interactivity() {
        let mut f = flags(true, true, true);
        f.clear_transients();
        assert!(f.is_interactive);
        assert!(!f.is_hovered);
        assert!(!f.is_pressed);
        assert!(!f.is_selected);
    }
}
