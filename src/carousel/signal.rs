//! Signals emitted by the controller for the view layer.

use crate::carousel::display::DisplayState;

/// Output of a controller operation, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselSignal {
    /// The active item changed
    DisplayUpdate(DisplayState),
    /// Navigation was refused; pulse the item at `index` without moving
    BoundaryBounce { index: usize },
    /// Non-committing preview offset for the active item, in px
    LiveFeedback { offset: f64 },
    /// Drop any preview offset
    FeedbackReset,
    /// The gesture is a vertical scroll; the page owns the pointer again
    PointerReleased,
}

impl CarouselSignal {
    pub fn is_display_update(&self) -> bool {
        matches!(self, CarouselSignal::DisplayUpdate(_))
    }

    pub fn is_bounce(&self) -> bool {
        matches!(self, CarouselSignal::BoundaryBounce { .. })
    }
}
