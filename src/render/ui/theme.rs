//! Color theme and styling definitions using ratatui colors
//!
//! Styles for cards, indicators, buttons and the status line, using ratatui's color
//! system directly.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Border and title of the active card
    pub active_card: Style,

    /// Cards immediately before/after the active one
    pub side_card: Style,

    /// Active card while a boundary bounce is pulsing
    pub bounce_card: Style,

    /// Highlighted indicator dot
    pub indicator_active: Color,

    /// Other indicator dots
    pub indicator_idle: Color,

    /// Enabled prev/next button
    pub button_enabled: Style,

    /// Disabled prev/next button
    pub button_disabled: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            active_card: Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
            side_card: Style::default().fg(Color::DarkGray),
            bounce_card: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            indicator_active: Color::LightMagenta,
            indicator_idle: Color::DarkGray,
            button_enabled: Style::default().fg(Color::White),
            button_disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            status_bg: Color::Blue,
            status_fg: Color::White,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            active_card: Style::default().add_modifier(Modifier::BOLD),
            side_card: Style::default(),
            bounce_card: Style::default().add_modifier(Modifier::REVERSED),
            indicator_active: Color::White,
            indicator_idle: Color::Gray,
            button_enabled: Style::default(),
            button_disabled: Style::default().add_modifier(Modifier::DIM),
            status_bg: Color::Black,
            status_fg: Color::White,
        }
    }
}
