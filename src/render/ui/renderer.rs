//! Renderer seam between the carousel view model and a concrete output.

use crate::carousel::Timestamp;
use crate::error::Result;
use crate::render::ui::state::ViewState;

/// Paints [`ViewState`] snapshots and owns the output device's lifecycle.
pub trait UIRenderer {
    /// Draw one frame: neighbouring cards, the (possibly offset) active card,
    /// indicators, prev/next buttons and the status line. `now` decides whether a
    /// bounce pulse is still showing.
    fn render(&mut self, view_state: &ViewState, now: Timestamp) -> Result<()>;

    /// Acquire the output (raw mode, alternate screen, mouse capture).
    fn initialize(&mut self) -> Result<()>;

    /// Give the output back. Safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;

    /// Output size as `(columns, rows)`.
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}
