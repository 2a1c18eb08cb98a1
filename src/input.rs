//! Input subsystem.
//!
//! `event` defines the normalized vocabulary the carousel consumes, `raw` polls the
//! terminal, and `service` maps one onto the other.

pub mod event;
pub mod raw;
pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use event::{InputAction, Key, PointerEvent};
pub use service::{InputMapper, InputService, CELL_HEIGHT_PX, CELL_WIDTH_PX};
