//! UI state management structures
//!
//! `ViewState` is what the terminal renderer paints. It is built only from the signals
//! the carousel emits; no navigation decisions are made here.

use crate::carousel::{CarouselSignal, DisplayState, Timestamp};
use crate::render::ui::controls::ControlLayout;
use ratatui::layout::Rect;

/// How long a boundary bounce keeps the active card highlighted.
pub const BOUNCE_PULSE_MS: u64 = 300;

/// Everything needed to draw one frame.
#[derive(Debug)]
pub struct ViewState {
    /// Card titles, one per carousel item
    pub titles: Vec<String>,

    /// Latest display state from the controller
    pub display: DisplayState,

    /// Preview offset (px) applied to the active card while dragging
    pub preview_offset: f64,

    /// Active card pulses until this time
    pub bounce_until: Option<Timestamp>,

    /// The last gesture was handed back to the page as a scroll
    pub pointer_released: bool,

    /// A committed transition is still running
    pub transitioning: bool,

    /// Status line content
    pub status_line: StatusLine,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(titles: Vec<String>, viewport_width: u16, viewport_height: u16) -> Self {
        let display = DisplayState::new(0, titles.len());
        Self {
            titles,
            display,
            preview_offset: 0.0,
            bounce_until: None,
            pointer_released: false,
            transitioning: false,
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
        }
    }

    /// Start over from a freshly built controller.
    pub fn reset(&mut self, display: DisplayState) {
        self.display = display;
        self.preview_offset = 0.0;
        self.bounce_until = None;
        self.pointer_released = false;
        self.transitioning = false;
    }

    /// Fold one controller signal into the view. Returns true when a redraw is needed.
    pub fn apply_signal(&mut self, signal: CarouselSignal, now: Timestamp) -> bool {
        match signal {
            CarouselSignal::DisplayUpdate(display) => {
                self.display = display;
                self.preview_offset = 0.0;
                self.transitioning = true;
                self.status_line.clear_message();
            }
            CarouselSignal::BoundaryBounce { .. } => {
                self.bounce_until = Some(now.saturating_add(BOUNCE_PULSE_MS));
            }
            CarouselSignal::LiveFeedback { offset } => {
                if self.preview_offset == offset {
                    return false;
                }
                self.preview_offset = offset;
                self.pointer_released = false;
            }
            CarouselSignal::FeedbackReset => {
                if self.preview_offset == 0.0 {
                    return false;
                }
                self.preview_offset = 0.0;
            }
            CarouselSignal::PointerReleased => {
                self.pointer_released = true;
            }
        }
        true
    }

    pub fn is_bouncing(&self, now: Timestamp) -> bool {
        self.bounce_until.is_some_and(|until| now < until)
    }

    /// Drop an expired bounce pulse. Returns true if one was cleared.
    pub fn expire_bounce(&mut self, now: Timestamp) -> bool {
        match self.bounce_until {
            Some(until) if now >= until => {
                self.bounce_until = None;
                true
            }
            _ => false,
        }
    }

    /// The transition lock was released.
    pub fn finish_transition(&mut self) {
        self.transitioning = false;
    }

    pub fn active_title(&self) -> &str {
        self.titles
            .get(self.display.active_index)
            .map(String::as_str)
            .unwrap_or("<untitled>")
    }

    /// Update terminal dimensions. Returns true if they actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }

    /// Clickable controls for the current viewport.
    pub fn controls(&self) -> ControlLayout {
        let area = Rect::new(0, 0, self.viewport_width, self.viewport_height);
        ControlLayout::new(area, self.display.item_count())
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        self.status_line.format_status_line(
            self.display.active_index,
            self.display.item_count(),
            self.pointer_released,
        )
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn format_status_line(&self, active: usize, total: usize, scrolling: bool) -> String {
        let position = format!("{}/{}", active + 1, total);
        let hint = if scrolling {
            "scroll"
        } else {
            "drag or ←/→ · 1-9 jump · r reload · q quit"
        };

        match &self.message {
            Some(message) => format!("{position} | {hint} | {message}"),
            None => format!("{position} | {hint}"),
        }
    }
}
