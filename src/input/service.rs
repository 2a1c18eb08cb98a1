//! High-level input service.
//!
//! Consumes coalesced raw events, tracks the pointer button, and yields the normalized
//! `InputAction`s that the render coordinator feeds into the carousel.

use crate::carousel::{Clock, Timestamp};
use crate::error::Result;
use crate::input::event::{InputAction, Key, PointerEvent};
use crate::input::raw::{PointerPhase, RawInputCollector, RawInputEvent};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Width of one terminal cell in pointer pixels.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Height of one terminal cell in pointer pixels.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Translates terminal keys and mouse reports into carousel input.
#[derive(Debug, Default)]
pub struct InputMapper {
    pointer_down: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn map_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        match event {
            RawInputEvent::Key { event, timestamp } => Self::map_key(event, timestamp),
            RawInputEvent::Pointer {
                phase,
                column,
                row,
                timestamp,
            } => self.map_pointer(phase, column, row, timestamp),
            RawInputEvent::Resize { width, height } => Some(InputAction::Resize { width, height }),
            RawInputEvent::FocusLost => {
                if std::mem::take(&mut self.pointer_down) {
                    Some(InputAction::PointerCancel)
                } else {
                    None
                }
            }
        }
    }

    fn map_pointer(
        &mut self,
        phase: PointerPhase,
        column: u16,
        row: u16,
        timestamp: Timestamp,
    ) -> Option<InputAction> {
        let pointer = PointerEvent::new(
            column as f64 * CELL_WIDTH_PX,
            row as f64 * CELL_HEIGHT_PX,
            timestamp,
        );

        match phase {
            PointerPhase::Down => {
                self.pointer_down = true;
                Some(InputAction::PointerDown(pointer))
            }
            PointerPhase::Drag if self.pointer_down => Some(InputAction::PointerMove(pointer)),
            PointerPhase::Up if self.pointer_down => {
                self.pointer_down = false;
                Some(InputAction::PointerUp(pointer))
            }
            // Drag or release that started outside the terminal
            PointerPhase::Drag | PointerPhase::Up => None,
        }
    }

    fn map_key(key_event: KeyEvent, timestamp: Timestamp) -> Option<InputAction> {
        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(InputAction::Quit),
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) if plain => Some(InputAction::Quit),
            (KeyCode::Left, _) | (KeyCode::Char('h'), _) if plain => Some(InputAction::Key {
                key: Key::ArrowLeft,
                timestamp,
            }),
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) if plain => Some(InputAction::Key {
                key: Key::ArrowRight,
                timestamp,
            }),
            (KeyCode::Char(ch @ '1'..='9'), _) if plain => Some(InputAction::JumpTo {
                index: ch as usize - '1' as usize,
                timestamp,
            }),
            (KeyCode::Char('r'), _) if plain => Some(InputAction::Reload),
            _ => None,
        }
    }
}

/// Service responsible for producing `InputAction`s from terminal events.
pub struct InputService {
    mapper: InputMapper,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new(clock: Clock) -> Self {
        Self {
            mapper: InputMapper::new(),
            raw_input: RawInputCollector::new(clock),
        }
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.mapper.map_raw_event(raw_event));

            while let Some(extra_event) = self.raw_input.pop_pending() {
                actions.extend(self.mapper.map_raw_event(extra_event));
            }
        }

        Ok(actions)
    }
}
