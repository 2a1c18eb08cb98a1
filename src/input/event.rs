//! Normalized input vocabulary shared by every input source.

use crate::carousel::Timestamp;

/// Pointer position (px) at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub timestamp: Timestamp,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, timestamp: Timestamp) -> Self {
        Self { x, y, timestamp }
    }
}

/// Discrete keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// High-level input actions consumed by the render coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    /// Pointer capture was lost mid-gesture
    PointerCancel,
    Key {
        key: Key,
        timestamp: Timestamp,
    },
    /// Direct jump, as from an indicator dot
    JumpTo {
        index: usize,
        timestamp: Timestamp,
    },
    /// Rebuild the carousel section from scratch
    Reload,
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
}

impl InputAction {
    /// Timestamp carried by the action, if it has one.
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            InputAction::PointerDown(event)
            | InputAction::PointerMove(event)
            | InputAction::PointerUp(event) => Some(event.timestamp),
            InputAction::Key { timestamp, .. } | InputAction::JumpTo { timestamp, .. } => {
                Some(*timestamp)
            }
            InputAction::PointerCancel
            | InputAction::Reload
            | InputAction::Resize { .. }
            | InputAction::Quit => None,
        }
    }
}
