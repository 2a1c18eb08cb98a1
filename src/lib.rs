//! # swipedeck - Swipeable Carousel Controller
//!
//! A UI-agnostic carousel controller that turns pointer drags, arrow keys and direct jumps
//! into index changes, with a ratatui front-end for trying it in a terminal.
//!
//! ## Features
//!
//! - **Gesture Interpretation**: Distance or flick (velocity) swipes, with a duration cap
//! - **Transition Lock**: Navigation bounces while a transition is running
//! - **Rate Limiting**: Commands closer together than the minimum interval are dropped
//! - **Live Feedback**: Scaled, clamped preview offset while dragging
//! - **Terminal UI**: Mouse drag and keyboard navigation over a card deck
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Thresholds, timings and named profiles
//! - [`carousel`] - Controller, gesture tracking and transition scheduling
//! - [`input`] - Terminal events normalized into pointer and key actions
//! - [`render::ui`](crate::render::ui) - Terminal user interface components
//! - [`app`] - Application core and component coordination

// Core modules
pub mod config;
pub mod error;

// Carousel core
pub mod carousel;

// Terminal front-end
pub mod input;
pub mod render;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{CarouselError, Result};

// Public API surface for external usage
pub use app::Application;
pub use carousel::{CarouselController, CarouselSignal, CarouselSlot, DisplayState};
pub use config::{CarouselConfig, ConfigProfile};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
