//! Low-level input collection: crossterm polling, pointer-drag coalescing, and
//! translation into primitive events that the higher-level input service can consume.

use crate::carousel::{Clock, Timestamp};
use crate::error::Result;
use ratatui::crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use std::collections::VecDeque;
use std::time::Duration;

/// Default coalescing window in milliseconds for drag events.
const DEFAULT_COALESCE_WINDOW_MS: u64 = 8;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Phase of a primary-button pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Drag,
    Up,
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key {
        event: KeyEvent,
        timestamp: Timestamp,
    },
    Pointer {
        phase: PointerPhase,
        column: u16,
        row: u16,
        timestamp: Timestamp,
    },
    Resize {
        width: u16,
        height: u16,
    },
    FocusLost,
}

/// Collapses bursts of drag reports into the latest position.
///
/// Terminals report every cell crossed; the gesture tracker only needs a few samples per
/// frame.
#[derive(Debug, Clone)]
pub struct DragCoalescer {
    window_ms: u64,
    pending: Option<PendingDrag>,
}

#[derive(Debug, Clone, Copy)]
struct PendingDrag {
    column: u16,
    row: u16,
    first_seen: Timestamp,
    last_seen: Timestamp,
}

impl DragCoalescer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    pub fn with_default_window() -> Self {
        Self::new(DEFAULT_COALESCE_WINDOW_MS)
    }

    /// Register a drag, returning an older drag that has to go out first.
    pub fn push(&mut self, column: u16, row: u16, now: Timestamp) -> Option<RawInputEvent> {
        let flushed = match self.pending {
            Some(pending) if now.saturating_sub(pending.first_seen) >= self.window_ms => {
                self.flush()
            }
            _ => None,
        };

        match self.pending.as_mut() {
            Some(pending) => {
                pending.column = column;
                pending.row = row;
                pending.last_seen = now;
            }
            None => {
                self.pending = Some(PendingDrag {
                    column,
                    row,
                    first_seen: now,
                    last_seen: now,
                });
            }
        }

        flushed
    }

    /// Flush the pending drag if the coalescing window has expired.
    pub fn flush_if_stale(&mut self, now: Timestamp) -> Option<RawInputEvent> {
        match self.pending {
            Some(pending) if now.saturating_sub(pending.first_seen) >= self.window_ms => {
                self.flush()
            }
            _ => None,
        }
    }

    /// Flush the pending drag immediately.
    pub fn flush(&mut self) -> Option<RawInputEvent> {
        self.pending.take().map(|pending| RawInputEvent::Pointer {
            phase: PointerPhase::Drag,
            column: pending.column,
            row: pending.row,
            timestamp: pending.last_seen,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Collector that polls crossterm for events and applies drag coalescing.
#[derive(Debug)]
pub struct RawInputCollector {
    clock: Clock,
    coalescer: DragCoalescer,
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    /// Create a collector with the default coalescing window.
    pub fn new(clock: Clock) -> Self {
        Self::with_window(clock, DEFAULT_COALESCE_WINDOW_MS)
    }

    /// Create a collector with a custom coalescing window (useful for tests).
    pub fn with_window(clock: Clock, window_ms: u64) -> Self {
        Self {
            clock,
            coalescer: DragCoalescer::new(window_ms),
            pending_events: VecDeque::new(),
        }
    }

    /// Check whether the collector has no pending events or drag accumulation.
    pub fn is_idle(&self) -> bool {
        self.pending_events.is_empty() && self.coalescer.is_empty()
    }

    /// Process a synthetic event stamped with an explicit time.
    pub fn process_event_at(&mut self, event: Event, now: Timestamp) {
        self.enqueue_event(event, now);
    }

    /// Next ready event without polling crossterm.
    pub fn try_flush(&mut self) -> Option<RawInputEvent> {
        self.pop_pending().or_else(|| {
            let now = self.clock.now();
            self.coalescer.flush_if_stale(now)
        })
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_flush() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));

        if !event::poll(poll_timeout)? {
            // Idle: whatever drag is pending is as fresh as it will get
            return Ok(self.coalescer.flush());
        }

        let event = event::read()?;
        let now = self.clock.now();
        self.enqueue_event(event, now);
        Ok(self.pop_pending())
    }

    fn enqueue_event(&mut self, event: Event, now: Timestamp) {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.flush_pending_drag();
                self.pending_events.push_back(RawInputEvent::Key {
                    event: key_event,
                    timestamp: now,
                });
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event, now),
            Event::Resize(width, height) => {
                self.flush_pending_drag();
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            Event::FocusLost => {
                self.flush_pending_drag();
                self.pending_events.push_back(RawInputEvent::FocusLost);
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent, now: Timestamp) {
        let phase = match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
            MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Drag,
            MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
            _ => return,
        };

        if phase == PointerPhase::Drag {
            if let Some(flushed) = self.coalescer.push(mouse_event.column, mouse_event.row, now) {
                self.pending_events.push_back(flushed);
            }
            return;
        }

        // Down/up must not overtake a queued drag
        self.flush_pending_drag();
        self.pending_events.push_back(RawInputEvent::Pointer {
            phase,
            column: mouse_event.column,
            row: mouse_event.row,
            timestamp: now,
        });
    }

    fn flush_pending_drag(&mut self) {
        if let Some(drag) = self.coalescer.flush() {
            self.pending_events.push_back(drag);
        }
    }

    /// Pop the next pending raw event without touching the coalescer.
    pub fn pop_pending(&mut self) -> Option<RawInputEvent> {
        self.pending_events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key_press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn coalesces_drags_within_window() {
        let mut coalescer = DragCoalescer::new(10);
        assert!(coalescer.push(40, 5, 0).is_none());
        assert!(coalescer.push(38, 5, 4).is_none());
        assert!(coalescer.flush_if_stale(9).is_none());

        assert_eq!(
            coalescer.flush_if_stale(10),
            Some(RawInputEvent::Pointer {
                phase: PointerPhase::Drag,
                column: 38,
                row: 5,
                timestamp: 4,
            })
        );
        assert!(coalescer.is_empty());
    }

    #[test]
    fn stale_drag_is_emitted_before_new_one() {
        let mut coalescer = DragCoalescer::new(10);
        coalescer.push(40, 5, 0);
        let flushed = coalescer.push(30, 5, 12).unwrap();
        assert!(matches!(
            flushed,
            RawInputEvent::Pointer {
                column: 40,
                timestamp: 0,
                ..
            }
        ));
        assert!(!coalescer.is_empty());
    }

    #[test]
    fn pointer_up_flushes_pending_drag_first() {
        let mut collector = RawInputCollector::with_window(Clock::new(), 1_000);
        collector.process_event_at(mouse(MouseEventKind::Down(MouseButton::Left), 40, 5), 0);
        collector.process_event_at(mouse(MouseEventKind::Drag(MouseButton::Left), 35, 5), 5);
        collector.process_event_at(mouse(MouseEventKind::Up(MouseButton::Left), 30, 5), 9);

        let phases: Vec<PointerPhase> = std::iter::from_fn(|| collector.pop_pending())
            .map(|event| match event {
                RawInputEvent::Pointer { phase, .. } => phase,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(
            phases,
            vec![PointerPhase::Down, PointerPhase::Drag, PointerPhase::Up]
        );
        assert!(collector.is_idle());
    }

    #[test]
    fn ignores_other_buttons_and_scroll() {
        let mut collector = RawInputCollector::new(Clock::new());
        collector.process_event_at(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), 0);
        collector.process_event_at(mouse(MouseEventKind::ScrollDown, 1, 1), 0);
        assert!(collector.is_idle());
    }

    #[test]
    fn queues_key_events() {
        let mut collector = RawInputCollector::new(Clock::new());
        collector.process_event_at(key_press(KeyCode::Right), 42);

        match collector.try_flush().unwrap() {
            RawInputEvent::Key { event, timestamp } => {
                assert_eq!(event.code, KeyCode::Right);
                assert_eq!(timestamp, 42);
            }
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn handles_resize_after_drag() {
        let mut collector = RawInputCollector::with_window(Clock::new(), 1_000);
        collector.process_event_at(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 3), 0);
        collector.process_event_at(Event::Resize(80, 40), 1);

        assert!(matches!(
            collector.try_flush().unwrap(),
            RawInputEvent::Pointer {
                phase: PointerPhase::Drag,
                ..
            }
        ));
        assert_eq!(
            collector.try_flush().unwrap(),
            RawInputEvent::Resize {
                width: 80,
                height: 40
            }
        );
    }
}
