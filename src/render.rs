//! Rendering subsystem.
//!
//! `service` folds input actions and controller signals into the view state, and `ui`
//! paints that state to the terminal.

pub mod service;
pub mod ui;

pub use service::RenderLoopState;
