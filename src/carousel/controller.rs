//! The carousel controller state machine.
//!
//! [`CarouselController`] owns the authoritative index and decides, from raw pointer and
//! key input, whether to move it. Every operation takes the timestamp of the triggering
//! event and returns the signals it emitted, in order. Nothing here is fatal: refused
//! navigation becomes a bounce, rate-limited commands are dropped, and gesture calls
//! without an open gesture do nothing.
//!
//! ```text
//!   Idle --commit--> Animating{ticket} --finish_transition(ticket)--> Idle
//! ```

use crate::carousel::display::DisplayState;
use crate::carousel::gesture::{GestureTracker, MoveClassification, SwipeDecision};
use crate::carousel::scheduler::{ManualScheduler, Timestamp, TransitionScheduler, TransitionTicket};
use crate::carousel::signal::CarouselSignal;
use crate::config::CarouselConfig;
use crate::error::{CarouselError, Result};
use crate::input::Key;
use log::{debug, trace};
use std::sync::atomic::{AtomicU64, Ordering};

/// Signals produced by one controller operation.
pub type Signals = Vec<CarouselSignal>;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionPhase {
    Idle,
    Animating { ticket: TransitionTicket },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Previous,
}

/// Swipeable carousel controller.
///
/// A fresh controller always starts at index 0; hosts that rebuild the carousel section
/// get a reset carousel.
#[derive(Debug)]
pub struct CarouselController<S = ManualScheduler> {
    instance: u64,
    item_count: usize,
    current_index: usize,
    config: CarouselConfig,
    phase: TransitionPhase,
    next_sequence: u64,
    last_command_at: Option<Timestamp>,
    gesture: Option<GestureTracker>,
    scheduler: S,
}

impl<S: TransitionScheduler> CarouselController<S> {
    pub fn new(item_count: usize, config: CarouselConfig, scheduler: S) -> Result<Self> {
        if item_count == 0 {
            return Err(CarouselError::EmptyCarousel);
        }
        config.validate()?;

        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        debug!("carousel #{instance} created with {item_count} items");

        Ok(Self {
            instance,
            item_count,
            current_index: 0,
            config,
            phase: TransitionPhase::Idle,
            next_sequence: 0,
            last_command_at: None,
            gesture: None,
            scheduler,
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, TransitionPhase::Animating { .. })
    }

    pub fn has_active_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn last_command_at(&self) -> Option<Timestamp> {
        self.last_command_at
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::new(self.current_index, self.item_count)
    }

    pub fn move_next(&mut self, now: Timestamp) -> Signals {
        self.step(Step::Next, now)
    }

    pub fn move_previous(&mut self, now: Timestamp) -> Signals {
        self.step(Step::Previous, now)
    }

    /// Jump straight to `target`.
    ///
    /// Out-of-range targets are an error and leave the controller untouched; jumping to
    /// the current item, or jumping while a transition runs, is a silent no-op.
    pub fn go_to(&mut self, target: usize, now: Timestamp) -> Result<Signals> {
        if target >= self.item_count {
            return Err(CarouselError::index_out_of_range(target, self.item_count));
        }
        if target == self.current_index {
            return Ok(Vec::new());
        }
        if self.is_animating() {
            trace!("carousel #{}: jump to {target} ignored during transition", self.instance);
            return Ok(Vec::new());
        }
        Ok(self.commit(target, now))
    }

    pub fn begin_gesture(&mut self, x: f64, y: f64, now: Timestamp) -> Signals {
        if self.is_animating() {
            trace!("carousel #{}: gesture ignored during transition", self.instance);
            return Vec::new();
        }
        self.gesture = Some(GestureTracker::begin(x, y, now, self.config.sample_window_ms));
        Vec::new()
    }

    pub fn update_gesture(&mut self, x: f64, y: f64, now: Timestamp) -> Signals {
        if self.is_animating() {
            return Vec::new();
        }
        let Some(gesture) = self.gesture.as_mut() else {
            return Vec::new();
        };
        if gesture.is_released() {
            return Vec::new();
        }

        match gesture.classify(x, y) {
            MoveClassification::Undecided => Vec::new(),
            MoveClassification::Vertical => {
                let had_feedback = gesture.feedback_shown();
                gesture.release();
                trace!("carousel #{}: vertical move, releasing pointer", self.instance);
                if had_feedback {
                    vec![CarouselSignal::FeedbackReset, CarouselSignal::PointerReleased]
                } else {
                    vec![CarouselSignal::PointerReleased]
                }
            }
            MoveClassification::Horizontal { dx } => {
                gesture.record(x, dx, now);
                gesture.mark_feedback_shown();
                trace!("carousel #{}: sample dx={dx} at {now}", self.instance);
                vec![CarouselSignal::LiveFeedback {
                    offset: self.config.feedback_offset(dx),
                }]
            }
        }
    }

    pub fn end_gesture(&mut self, x: f64, _y: f64, now: Timestamp) -> Signals {
        let Some(gesture) = self.gesture.take() else {
            return Vec::new();
        };
        if gesture.is_released() {
            return if gesture.feedback_shown() {
                vec![CarouselSignal::FeedbackReset]
            } else {
                Vec::new()
            };
        }

        let summary = gesture.finish(x, now);
        let decision = summary.decide(&self.config);
        debug!(
            "carousel #{}: gesture dx={} over {}ms v={:.3} -> {:?}",
            self.instance, summary.total_dx, summary.duration_ms, summary.velocity, decision
        );

        let mut signals = vec![CarouselSignal::FeedbackReset];
        match decision {
            SwipeDecision::Next => signals.extend(self.move_next(now)),
            SwipeDecision::Previous => signals.extend(self.move_previous(now)),
            SwipeDecision::Stay => {}
        }
        signals
    }

    /// Abandon an open gesture without a decision, e.g. when pointer capture is lost.
    pub fn cancel_gesture(&mut self) -> Signals {
        match self.gesture.take() {
            Some(gesture) if gesture.feedback_shown() && !gesture.is_released() => {
                vec![CarouselSignal::FeedbackReset]
            }
            _ => Vec::new(),
        }
    }

    pub fn on_key(&mut self, key: Key, now: Timestamp) -> Signals {
        if self.is_animating() {
            return Vec::new();
        }
        match key {
            Key::ArrowLeft => self.move_previous(now),
            Key::ArrowRight => self.move_next(now),
            Key::Other => Vec::new(),
        }
    }

    /// Release the navigation lock if `ticket` is the transition in flight.
    ///
    /// Tickets from other instances or from earlier transitions are ignored.
    pub fn finish_transition(&mut self, ticket: TransitionTicket) -> bool {
        match self.phase {
            TransitionPhase::Animating { ticket: current } if current == ticket => {
                self.phase = TransitionPhase::Idle;
                trace!("carousel #{}: transition {} done", self.instance, ticket.sequence());
                true
            }
            _ => false,
        }
    }

    fn step(&mut self, step: Step, now: Timestamp) -> Signals {
        let target = match step {
            Step::Next => Some(self.current_index + 1).filter(|&index| index < self.item_count),
            Step::Previous => self.current_index.checked_sub(1),
        };

        match target {
            Some(index) if !self.is_animating() => self.commit(index, now),
            Some(_) => self.bounce("navigation during transition"),
            None => self.bounce("boundary"),
        }
    }

    fn bounce(&self, reason: &str) -> Signals {
        debug!(
            "carousel #{}: bounce at {} ({reason})",
            self.instance, self.current_index
        );
        vec![CarouselSignal::BoundaryBounce {
            index: self.current_index,
        }]
    }

    fn commit(&mut self, target: usize, now: Timestamp) -> Signals {
        if let Some(last) = self.last_command_at {
            if now.saturating_sub(last) < self.config.min_command_interval_ms {
                debug!(
                    "carousel #{}: command at {now} dropped ({}ms since last)",
                    self.instance,
                    now.saturating_sub(last)
                );
                return Vec::new();
            }
        }

        debug!(
            "carousel #{}: {} -> {target}",
            self.instance, self.current_index
        );
        self.current_index = target;
        self.last_command_at = Some(now);

        let ticket = TransitionTicket::new(self.instance, self.next_sequence);
        self.next_sequence += 1;
        self.phase = TransitionPhase::Animating { ticket };
        self.scheduler
            .schedule(ticket, now.saturating_add(self.config.transition_duration_ms));

        vec![CarouselSignal::DisplayUpdate(self.display_state())]
    }
}

impl CarouselController<ManualScheduler> {
    /// Controller driven by a [`ManualScheduler`]; call [`advance`](Self::advance) to
    /// let time pass.
    pub fn with_manual_scheduler(item_count: usize, config: CarouselConfig) -> Result<Self> {
        Self::new(item_count, config, ManualScheduler::new())
    }

    /// Finish every transition due at `now`. Returns how many unlocked.
    pub fn advance(&mut self, now: Timestamp) -> usize {
        let due = self.scheduler.take_due(now);
        let mut finished = 0;
        for ticket in due {
            if self.finish_transition(ticket) {
                finished += 1;
            }
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::display::RelativeTag;

    fn controller(items: usize) -> CarouselController {
        CarouselController::with_manual_scheduler(items, CarouselConfig::default()).unwrap()
    }

    fn bounces(signals: &[CarouselSignal]) -> usize {
        signals.iter().filter(|s| s.is_bounce()).count()
    }

    #[test]
    fn rejects_empty_carousel_and_bad_config() {
        assert!(matches!(
            CarouselController::with_manual_scheduler(0, CarouselConfig::default()),
            Err(CarouselError::EmptyCarousel)
        ));

        let bad = CarouselConfig {
            sample_window_ms: 0,
            ..CarouselConfig::default()
        };
        assert!(CarouselController::with_manual_scheduler(3, bad).is_err());
    }

    #[test]
    fn starts_at_first_item() {
        let carousel = controller(6);
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.is_animating());
        let state = carousel.display_state();
        assert!(!state.can_go_previous);
        assert!(state.can_go_next);
    }

    #[test]
    fn move_next_commits_and_locks() {
        let mut carousel = controller(6);
        let signals = carousel.move_next(1_000);

        assert_eq!(carousel.current_index(), 1);
        assert!(carousel.is_animating());
        assert_eq!(carousel.last_command_at(), Some(1_000));
        assert_eq!(
            signals,
            vec![CarouselSignal::DisplayUpdate(DisplayState::new(1, 6))]
        );
        assert_eq!(carousel.scheduler().next_due(), Some(1_300));
    }

    #[test]
    fn navigation_while_animating_bounces() {
        let mut carousel = controller(6);
        carousel.move_next(1_000);

        let signals = carousel.move_next(1_100);
        assert_eq!(signals, vec![CarouselSignal::BoundaryBounce { index: 1 }]);
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.last_command_at(), Some(1_000));
    }

    #[test]
    fn advance_unlocks_after_duration() {
        let mut carousel = controller(6);
        carousel.move_next(1_000);

        assert_eq!(carousel.advance(1_299), 0);
        assert!(carousel.is_animating());
        assert_eq!(carousel.advance(1_300), 1);
        assert!(!carousel.is_animating());

        carousel.move_next(1_300);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn boundaries_never_wrap() {
        let mut carousel = controller(2);
        let signals = carousel.move_previous(0);
        assert_eq!(bounces(&signals), 1);
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.last_command_at(), None);

        carousel.move_next(0);
        carousel.advance(1_000);
        let signals = carousel.move_next(1_000);
        assert_eq!(signals, vec![CarouselSignal::BoundaryBounce { index: 1 }]);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn debounce_drops_fast_commands_silently() {
        let config = CarouselConfig::builder()
            .transition_duration_ms(100)
            .min_command_interval_ms(300)
            .build()
            .unwrap();
        let mut carousel = CarouselController::with_manual_scheduler(6, config).unwrap();

        carousel.move_next(0);
        carousel.advance(150);
        assert!(!carousel.is_animating());

        assert!(carousel.move_next(200).is_empty());
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.last_command_at(), Some(0));

        assert_eq!(carousel.move_next(300).len(), 1);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn go_to_validates_and_jumps() {
        let mut carousel = controller(6);

        let err = carousel.go_to(6, 0).unwrap_err();
        assert!(matches!(
            err,
            CarouselError::IndexOutOfRange {
                index: 6,
                item_count: 6
            }
        ));
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.is_animating());

        assert!(carousel.go_to(0, 0).unwrap().is_empty());

        let signals = carousel.go_to(4, 0).unwrap();
        assert_eq!(carousel.current_index(), 4);
        match &signals[..] {
            [CarouselSignal::DisplayUpdate(state)] => {
                assert_eq!(state.tag(3), Some(RelativeTag::Before));
                assert_eq!(state.tag(5), Some(RelativeTag::After));
                assert_eq!(state.tag(0), Some(RelativeTag::Far));
            }
            other => panic!("unexpected signals: {other:?}"),
        }

        assert!(carousel.go_to(2, 10).unwrap().is_empty());
        assert_eq!(carousel.current_index(), 4);
    }

    #[test]
    fn jump_during_transition_is_silent() {
        let mut carousel = controller(6);
        carousel.move_next(0);

        let signals = carousel.go_to(4, 50).unwrap();
        assert!(signals.is_empty());
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.last_command_at(), Some(0));

        carousel.advance(300);
        assert_eq!(carousel.go_to(4, 400).unwrap().len(), 1);
        assert_eq!(carousel.current_index(), 4);
    }

    #[test]
    fn horizontal_drag_emits_clamped_feedback() {
        let mut carousel = controller(6);
        carousel.begin_gesture(300.0, 100.0, 0);

        assert_eq!(
            carousel.update_gesture(250.0, 102.0, 16),
            vec![CarouselSignal::LiveFeedback { offset: -10.0 }]
        );
        assert_eq!(
            carousel.update_gesture(0.0, 104.0, 32),
            vec![CarouselSignal::LiveFeedback { offset: -40.0 }]
        );
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn vertical_drag_releases_pointer() {
        let mut carousel = controller(6);
        carousel.begin_gesture(300.0, 100.0, 0);
        carousel.update_gesture(290.0, 101.0, 10);

        assert_eq!(
            carousel.update_gesture(292.0, 160.0, 20),
            vec![CarouselSignal::FeedbackReset, CarouselSignal::PointerReleased]
        );
        // Page owns it now
        assert!(carousel.update_gesture(100.0, 160.0, 30).is_empty());
        assert!(carousel.end_gesture(100.0, 160.0, 40).len() == 1);
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.has_active_gesture());
    }

    #[test]
    fn swipe_left_advances() {
        let mut carousel = controller(6);
        carousel.begin_gesture(300.0, 100.0, 0);
        carousel.update_gesture(270.0, 100.0, 50);
        let signals = carousel.end_gesture(230.0, 100.0, 150);

        assert_eq!(signals[0], CarouselSignal::FeedbackReset);
        assert!(signals[1].is_display_update());
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        let mut carousel = controller(6);
        carousel.begin_gesture(300.0, 100.0, 0);
        carousel.update_gesture(295.0, 100.0, 100);
        carousel.update_gesture(290.0, 100.0, 200);

        assert_eq!(
            carousel.end_gesture(290.0, 100.0, 250),
            vec![CarouselSignal::FeedbackReset]
        );
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn gesture_during_transition_is_ignored() {
        let mut carousel = controller(6);
        carousel.move_next(0);

        assert!(carousel.begin_gesture(300.0, 100.0, 10).is_empty());
        assert!(!carousel.has_active_gesture());
        assert!(carousel.end_gesture(100.0, 100.0, 50).is_empty());
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn gesture_calls_without_gesture_are_noops() {
        let mut carousel = controller(6);
        assert!(carousel.update_gesture(10.0, 10.0, 0).is_empty());
        assert!(carousel.end_gesture(10.0, 10.0, 0).is_empty());
        assert!(carousel.cancel_gesture().is_empty());
    }

    #[test]
    fn cancel_resets_preview() {
        let mut carousel = controller(6);
        carousel.begin_gesture(300.0, 100.0, 0);
        carousel.update_gesture(280.0, 100.0, 10);

        assert_eq!(carousel.cancel_gesture(), vec![CarouselSignal::FeedbackReset]);
        assert!(!carousel.has_active_gesture());
    }

    #[test]
    fn arrow_keys_navigate() {
        let mut carousel = controller(6);
        carousel.on_key(Key::ArrowRight, 0);
        assert_eq!(carousel.current_index(), 1);

        // Locked: ignored without a bounce
        assert!(carousel.on_key(Key::ArrowLeft, 100).is_empty());

        carousel.advance(400);
        carousel.on_key(Key::ArrowLeft, 400);
        assert_eq!(carousel.current_index(), 0);
        assert!(carousel.on_key(Key::Other, 2_000).is_empty());
    }

    #[test]
    fn stale_tickets_do_not_unlock() {
        let mut first = controller(6);
        let mut second = controller(6);
        first.move_next(0);
        second.move_next(0);

        let foreign = first.scheduler_mut().take_due(10_000);
        assert_eq!(foreign.len(), 1);
        assert!(!second.finish_transition(foreign[0]));
        assert!(second.is_animating());

        assert!(first.finish_transition(foreign[0]));
        assert!(!first.finish_transition(foreign[0]));
    }
}
