//! Render coordination helpers.
//!
//! Provides the state machine that mediates between input actions, the live carousel
//! controller, and view updates. The async loop itself lives in `Application::run`.

use crate::carousel::{CarouselSlot, Signals, Timestamp, TransitionScheduler, TransitionTicket};
use crate::error::Result;
use crate::input::{InputAction, PointerEvent, CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::render::ui::{Control, ViewState};
use log::{debug, trace};

/// Tracks render-related state that must persist across input actions and timer events.
#[derive(Debug, Default)]
pub struct RenderLoopState {
    needs_redraw: bool,

    /// Button or dot under a pointer that is still down. Such a press is a tap, never a swipe.
    pressed: Option<Control>,
}

impl RenderLoopState {
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            pressed: None,
        }
    }

    /// Route one input action. Returns `Ok(false)` when the application should quit.
    pub fn process_action<S>(
        &mut self,
        action: InputAction,
        slot: &mut CarouselSlot<S>,
        view_state: &mut ViewState,
        now: Timestamp,
    ) -> Result<bool>
    where
        S: TransitionScheduler + Clone,
    {
        trace!("input action: {action:?}");
        match action {
            InputAction::Quit => return Ok(false),
            InputAction::Reload => {
                self.pressed = None;
                let controller = slot.reload()?;
                view_state.reset(controller.display_state());
                view_state
                    .status_line
                    .set_message(format!("reloaded ({} items)", controller.item_count()));
                self.needs_redraw = true;
            }
            InputAction::Resize { width, height } => {
                if view_state.update_terminal_size(width, height) {
                    self.needs_redraw = true;
                }
            }
            InputAction::JumpTo { index, timestamp } => {
                let Some(controller) = slot.controller_mut() else {
                    return Ok(true);
                };
                let outcome = controller.go_to(index, timestamp);
                self.apply_outcome(outcome, view_state, now);
            }
            InputAction::PointerDown(event) if control_at(view_state, &event).is_some() => {
                self.pressed = control_at(view_state, &event);
                trace!("pressed {:?}", self.pressed);
            }
            InputAction::PointerMove(_) if self.pressed.is_some() => {}
            InputAction::PointerUp(event) if self.pressed.is_some() => {
                let pressed = self.pressed.take();
                match pressed {
                    Some(control) if control_at(view_state, &event) == pressed => {
                        self.activate_control(control, slot, view_state, event.timestamp, now);
                    }
                    _ => trace!("tap on {pressed:?} released elsewhere"),
                }
            }
            InputAction::PointerCancel if self.pressed.is_some() => {
                self.pressed = None;
            }
            other => {
                let Some(controller) = slot.controller_mut() else {
                    return Ok(true);
                };
                let signals = match other {
                    InputAction::PointerDown(event) => {
                        controller.begin_gesture(event.x, event.y, event.timestamp)
                    }
                    InputAction::PointerMove(event) => {
                        controller.update_gesture(event.x, event.y, event.timestamp)
                    }
                    InputAction::PointerUp(event) => {
                        controller.end_gesture(event.x, event.y, event.timestamp)
                    }
                    InputAction::PointerCancel => controller.cancel_gesture(),
                    InputAction::Key { key, timestamp } => controller.on_key(key, timestamp),
                    _ => Signals::new(),
                };
                self.apply_signals(signals, view_state, now);
            }
        }
        Ok(true)
    }

    /// Deliver a due transition ticket to the live controller.
    pub fn finish_transition<S>(
        &mut self,
        ticket: TransitionTicket,
        slot: &mut CarouselSlot<S>,
        view_state: &mut ViewState,
    ) -> bool
    where
        S: TransitionScheduler + Clone,
    {
        let finished = slot
            .controller_mut()
            .is_some_and(|controller| controller.finish_transition(ticket));
        if finished {
            view_state.finish_transition();
            self.needs_redraw = true;
        } else {
            trace!(
                "ignoring ticket {}/{} for a stale controller",
                ticket.instance(),
                ticket.sequence()
            );
        }
        finished
    }

    /// Frame tick: expire time-based decorations.
    pub fn tick(&mut self, view_state: &mut ViewState, now: Timestamp) {
        if view_state.expire_bounce(now) {
            self.needs_redraw = true;
        }
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Whether a redraw is pending; clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn activate_control<S>(
        &mut self,
        control: Control,
        slot: &mut CarouselSlot<S>,
        view_state: &mut ViewState,
        timestamp: Timestamp,
        now: Timestamp,
    ) where
        S: TransitionScheduler + Clone,
    {
        let Some(controller) = slot.controller_mut() else {
            return;
        };
        debug!("tap on {control:?}");
        let outcome = match control {
            Control::Previous => Ok(controller.move_previous(timestamp)),
            Control::Next => Ok(controller.move_next(timestamp)),
            Control::Indicator(index) => controller.go_to(index, timestamp),
        };
        self.apply_outcome(outcome, view_state, now);
    }

    fn apply_outcome(
        &mut self,
        outcome: Result<Signals>,
        view_state: &mut ViewState,
        now: Timestamp,
    ) {
        match outcome {
            Ok(signals) => self.apply_signals(signals, view_state, now),
            Err(err) => {
                debug!("jump rejected: {err}");
                view_state.status_line.set_message(err.to_string());
                self.needs_redraw = true;
            }
        }
    }

    fn apply_signals(&mut self, signals: Signals, view_state: &mut ViewState, now: Timestamp) {
        for signal in signals {
            if view_state.apply_signal(signal, now) {
                self.needs_redraw = true;
            }
        }
    }
}

/// The control under a pointer position, if any.
fn control_at(view_state: &ViewState, event: &PointerEvent) -> Option<Control> {
    if event.x < 0.0 || event.y < 0.0 {
        return None;
    }
    let column = (event.x / CELL_WIDTH_PX) as u16;
    let row = (event.y / CELL_HEIGHT_PX) as u16;
    view_state.controls().hit(column, row)
}
