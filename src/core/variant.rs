//! Widget behavioral variants and their select semantics.
//!
//! The variant affects exactly one thing: what a select action means. Every
//! other transition behaves identically across variants.

use serde::{Deserialize, Serialize};

/// The behavioral type of a widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetVariant {
    /// Select is a one-shot pulse; nothing is persisted.
    #[default]
    Button,
    /// Select toggles the selected flag; toggling off returns to `Default`.
    Checkbox,
    /// Select always selects; deselection belongs to an external group
    /// controller.
    Radio,
}

/// What a select action resolved to, computed purely from the variant and
/// the widget's current selected flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Raise the select event and change nothing else (Button).
    Pulse,
    /// Persist selection and enter the `Select` state (Checkbox on, Radio).
    Selected,
    /// Drop selection and fall back to `Default` (Checkbox off).
    Deselected,
}

impl WidgetVariant {
    /// Resolve what selecting means right now.
    ///
    /// # Example
    ///
    /// ```rust
    /// use petal_ui::core::{SelectOutcome, WidgetVariant};
    ///
    /// assert_eq!(WidgetVariant::Button.resolve_select(false), SelectOutcome::Pulse);
    /// assert_eq!(WidgetVariant::Checkbox.resolve_select(false), SelectOutcome::Selected);
    /// assert_eq!(WidgetVariant::Checkbox.resolve_select(true), SelectOutcome::Deselected);
    /// // Radio selection is monotonic.
    /// assert_eq!(WidgetVariant::Radio.resolve_select(true), SelectOutcome::Selected);
    /// ```
    pub fn resolve_select(&self, currently_selected: bool) -> SelectOutcome {
        match self {
            Self::Button => SelectOutcome::Pulse,
            Self::Checkbox => {
                if currently_selected {
                    SelectOutcome::Deselected
                } else {
                    SelectOutcome::Selected
                }
            }
            Self::Radio => SelectOutcome::Selected,
        }
    }
}
