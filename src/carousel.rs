//! Carousel core: controller, gesture interpretation and transition timing.
//!
//! The controller is UI-agnostic. Input sources forward normalized pointer and key events,
//! and view renderers apply the [`CarouselSignal`]s that come back.

pub mod controller;
pub mod display;
pub mod gesture;
pub mod scheduler;
pub mod signal;
pub mod slot;

pub use controller::{CarouselController, Signals};
pub use display::{DisplayState, RelativeTag};
pub use gesture::{GestureSummary, GestureTracker, SwipeDecision};
pub use scheduler::{
    ChannelScheduler, Clock, ManualScheduler, Timestamp, TransitionScheduler, TransitionTicket,
};
pub use signal::CarouselSignal;
pub use slot::CarouselSlot;
