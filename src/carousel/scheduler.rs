//! Transition timing.
//!
//! A committed navigation holds the controller's animation lock until the transition
//! duration elapses. The controller never sleeps itself: it hands a [`TransitionTicket`]
//! to a [`TransitionScheduler`] and the host feeds the ticket back through
//! `CarouselController::finish_transition` once it is due.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Milliseconds since an arbitrary, host-chosen origin.
pub type Timestamp = u64;

/// Identifies one committed transition of one controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTicket {
    instance: u64,
    sequence: u64,
}

impl TransitionTicket {
    pub(crate) fn new(instance: u64, sequence: u64) -> Self {
        Self { instance, sequence }
    }

    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Arranges for a ticket to come back once `due_at` has passed.
pub trait TransitionScheduler {
    fn schedule(&mut self, ticket: TransitionTicket, due_at: Timestamp);
}

/// Scheduler that only queues tickets; the owner polls [`take_due`](Self::take_due).
///
/// Suited to hosts that already run a frame loop, and to deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: VecDeque<(Timestamp, TransitionTicket)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every ticket due at or before `now`, in scheduling order.
    pub fn take_due(&mut self, now: Timestamp) -> Vec<TransitionTicket> {
        let mut due = Vec::new();
        self.pending.retain(|&(due_at, ticket)| {
            if due_at <= now {
                due.push(ticket);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Earliest due time among queued tickets.
    pub fn next_due(&self) -> Option<Timestamp> {
        self.pending.iter().map(|&(due_at, _)| due_at).min()
    }
}

impl TransitionScheduler for ManualScheduler {
    fn schedule(&mut self, ticket: TransitionTicket, due_at: Timestamp) {
        self.pending.push_back((due_at, ticket));
    }
}

/// Monotonic millisecond clock shared by the input thread and the scheduler.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.stamp(Instant::now())
    }

    /// Convert an instant observed elsewhere into this clock's timeline.
    pub fn stamp(&self, instant: Instant) -> Timestamp {
        instant.saturating_duration_since(self.origin).as_millis() as Timestamp
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Scheduler backed by tokio timers; due tickets arrive on an unbounded channel.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct ChannelScheduler {
    tx: UnboundedSender<TransitionTicket>,
    clock: Clock,
}

impl ChannelScheduler {
    pub fn new(clock: Clock) -> (Self, UnboundedReceiver<TransitionTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, clock }, rx)
    }
}

impl TransitionScheduler for ChannelScheduler {
    fn schedule(&mut self, ticket: TransitionTicket, due_at: Timestamp) {
        let delay = Duration::from_millis(due_at.saturating_sub(self.clock.now()));
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the host shut down; nothing left to unlock.
            let _ = tx.send(ticket);
        });
    }
}
