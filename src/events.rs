//! Widget event notification.
//!
//! Events are raised synchronously at the point the state machine commits a
//! decision, before the asynchronous feature response starts. Each widget
//! owns its own `tokio::sync::broadcast` channel; subscribe through
//! [`Widget::subscribe`](crate::widget::Widget::subscribe) and drop the
//! receiver to unsubscribe. There is no global registry.

use crate::widget::WidgetId;
use serde::{Deserialize, Serialize};

/// What a widget announces to its subscribers.
///
/// Pointer resolution transitions (release and exit) raise nothing, and
/// `Click` is a feature pulse with no announcement. Disabling interactivity
/// raises the same `Interactive` signal as enabling it; observers read the
/// widget's `is_interactive` flag for the direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetSignal {
    Show,
    Hide,
    Default,
    Hover,
    Press,
    Select,
    Interactive,
}

impl WidgetSignal {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetSignal::Show => "Show",
            WidgetSignal::Hide => "Hide",
            WidgetSignal::Default => "Default",
            WidgetSignal::Hover => "Hover",
            WidgetSignal::Press => "Press",
            WidgetSignal::Select => "Select",
            WidgetSignal::Interactive => "Interactive",
        }
    }
}

/// One announcement: which widget, and what it decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEvent {
    pub widget: WidgetId,
    pub signal: WidgetSignal,
}
