//! Pointer gesture tracking and swipe decisions.
//!
//! A [`GestureTracker`] lives from pointer-down to pointer-up. It classifies moves as
//! horizontal (ours) or vertical (page scroll), keeps a short window of displacement
//! samples for release velocity, and summarises the gesture for the commit decision.

use crate::carousel::scheduler::Timestamp;
use crate::config::CarouselConfig;
use std::collections::VecDeque;

/// One horizontal displacement observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub timestamp: Timestamp,
    pub dx: f64,
}

/// How a pointer move relates to the gesture origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveClassification {
    /// Pointer has not left the origin yet
    Undecided,
    /// `|dx| <= |dy|`: the page should scroll
    Vertical,
    /// Horizontal drag with displacement `dx` from the origin
    Horizontal { dx: f64 },
}

/// Outcome of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    Next,
    Previous,
    Stay,
}

/// Measurements taken when the pointer is lifted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSummary {
    pub total_dx: f64,
    pub duration_ms: u64,
    /// Release velocity in px/ms, from the two most recent samples
    pub velocity: f64,
}

impl GestureSummary {
    /// Apply the distance/velocity thresholds.
    ///
    /// Either the travel alone is long enough, or a fast flick covered at least the
    /// secondary distance. Gestures held past `max_gesture_time_ms` never commit.
    /// Moving the finger left (negative `total_dx`) advances.
    pub fn decide(&self, config: &CarouselConfig) -> SwipeDecision {
        let distance = self.total_dx.abs();
        let long_enough = distance > config.distance_threshold;
        let flick = self.velocity.abs() > config.velocity_threshold
            && distance > config.secondary_distance_threshold;

        if !(long_enough || flick) || self.duration_ms > config.max_gesture_time_ms {
            SwipeDecision::Stay
        } else if self.total_dx < 0.0 {
            SwipeDecision::Next
        } else {
            SwipeDecision::Previous
        }
    }
}

/// State of an open pointer interaction.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    origin_x: f64,
    origin_y: f64,
    origin_timestamp: Timestamp,
    current_x: f64,
    samples: VecDeque<GestureSample>,
    window_ms: u64,
    feedback_shown: bool,
    released: bool,
}

impl GestureTracker {
    pub fn begin(x: f64, y: f64, timestamp: Timestamp, window_ms: u64) -> Self {
        Self {
            origin_x: x,
            origin_y: y,
            origin_timestamp: timestamp,
            current_x: x,
            samples: VecDeque::new(),
            window_ms,
            feedback_shown: false,
            released: false,
        }
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    pub fn origin_timestamp(&self) -> Timestamp {
        self.origin_timestamp
    }

    pub fn current_x(&self) -> f64 {
        self.current_x
    }

    pub fn classify(&self, x: f64, y: f64) -> MoveClassification {
        let dx = x - self.origin_x;
        let dy = y - self.origin_y;

        if dx == 0.0 && dy == 0.0 {
            MoveClassification::Undecided
        } else if dx.abs() <= dy.abs() {
            MoveClassification::Vertical
        } else {
            MoveClassification::Horizontal { dx }
        }
    }

    /// Record a horizontal move and drop samples that aged out of the window.
    pub fn record(&mut self, x: f64, dx: f64, timestamp: Timestamp) {
        self.current_x = x;
        self.samples.push_back(GestureSample { timestamp, dx });

        while let Some(front) = self.samples.front() {
            if timestamp.saturating_sub(front.timestamp) >= self.window_ms {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = &GestureSample> {
        self.samples.iter()
    }

    /// Δdx/Δt across the last two samples; zero without two distinct timestamps.
    pub fn velocity(&self) -> f64 {
        let len = self.samples.len();
        if len < 2 {
            return 0.0;
        }
        let previous = self.samples[len - 2];
        let latest = self.samples[len - 1];
        let dt = latest.timestamp.saturating_sub(previous.timestamp);
        if dt == 0 {
            0.0
        } else {
            (latest.dx - previous.dx) / dt as f64
        }
    }

    pub fn mark_feedback_shown(&mut self) {
        self.feedback_shown = true;
    }

    pub fn feedback_shown(&self) -> bool {
        self.feedback_shown
    }

    /// Hand the pointer back to the page; later moves are ignored.
    pub fn release(&mut self) {
        self.released = true;
        self.samples.clear();
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn finish(&self, x: f64, timestamp: Timestamp) -> GestureSummary {
        GestureSummary {
            total_dx: x - self.origin_x,
            duration_ms: timestamp.saturating_sub(self.origin_timestamp),
            velocity: self.velocity(),
        }
    }
}
