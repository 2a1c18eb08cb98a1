//! Terminal UI implementation using ratatui
//!
//! Concrete `UIRenderer` that paints the carousel: the active card flanked by its
//! neighbours, indicator dots, prev/next buttons and a status line. It only reads
//! `ViewState`; navigation stays in the controller.

use crate::carousel::{RelativeTag, Timestamp};
use crate::error::{CarouselError, Result};
use crate::input::CELL_WIDTH_PX;
use crate::render::ui::controls::{
    ControlLayout, ScreenLayout, ACTIVE_DOT, IDLE_DOT, NEXT_LABEL, PREV_LABEL,
};
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use ratatui::crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// Draw one full frame. Buttons and dots go exactly where [`ControlLayout`] says,
    /// so pointer hit-testing agrees with what is on screen.
    pub fn draw_frame(
        frame: &mut Frame,
        view_state: &ViewState,
        theme: &ColorTheme,
        now: Timestamp,
    ) {
        let area = frame.size();
        let screen = ScreenLayout::new(area);
        let controls = ControlLayout::new(area, view_state.display.item_count());

        Self::render_cards(frame, screen.cards, view_state, theme, now);
        Self::render_indicators(frame, &controls, view_state, theme);
        Self::render_buttons(frame, &controls, view_state, theme);
        Self::render_status(frame, screen.status, view_state, theme);
    }

    fn render_cards(
        frame: &mut Frame,
        area: Rect,
        view_state: &ViewState,
        theme: &ColorTheme,
        now: Timestamp,
    ) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let display = &view_state.display;
        for (tag, column) in [
            (RelativeTag::Before, columns[0]),
            (RelativeTag::After, columns[2]),
        ] {
            if let Some(index) = display.position_of(tag) {
                Self::render_card(frame, column, view_state, index, theme.side_card);
            }
        }

        let active_style = if view_state.is_bouncing(now) {
            theme.bounce_card
        } else {
            theme.active_card
        };
        let active_area = shifted_rect(columns[1], area, view_state.preview_offset);
        Self::render_card(
            frame,
            active_area,
            view_state,
            display.active_index,
            active_style,
        );
    }

    fn render_card(
        frame: &mut Frame,
        area: Rect,
        view_state: &ViewState,
        index: usize,
        style: Style,
    ) {
        let title = view_state
            .titles
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Card {}", index + 1));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(format!(" {}/{} ", index + 1, view_state.titles.len()));
        let body = Paragraph::new(Line::from(Span::styled(title, style)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(body, area);
    }

    fn render_indicators(
        frame: &mut Frame,
        controls: &ControlLayout,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        for (item, &dot) in controls.dots.iter().enumerate() {
            frame.render_widget(Self::indicator_dot(view_state, theme, item), dot);
        }
    }

    fn indicator_dot(view_state: &ViewState, theme: &ColorTheme, item: usize) -> Span<'static> {
        if view_state.display.is_indicator_active(item) {
            Span::styled(ACTIVE_DOT, Style::default().fg(theme.indicator_active))
        } else {
            Span::styled(IDLE_DOT, Style::default().fg(theme.indicator_idle))
        }
    }

    fn render_buttons(
        frame: &mut Frame,
        controls: &ControlLayout,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let [previous, next] = Self::button_spans(view_state, theme);
        frame.render_widget(previous, controls.previous);
        frame.render_widget(next, controls.next);
    }

    fn button_spans(view_state: &ViewState, theme: &ColorTheme) -> [Span<'static>; 2] {
        let style_for = |enabled: bool| {
            if enabled {
                theme.button_enabled
            } else {
                theme.button_disabled
            }
        };
        [
            Span::styled(PREV_LABEL, style_for(view_state.display.can_go_previous)),
            Span::styled(NEXT_LABEL, style_for(view_state.display.can_go_next)),
        ]
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }
}

/// Move `rect` horizontally by a pixel offset, keeping it inside `bounds`.
pub fn shifted_rect(rect: Rect, bounds: Rect, offset_px: f64) -> Rect {
    let shift = (offset_px / CELL_WIDTH_PX).round() as i32;
    let min_x = bounds.x as i32;
    let max_x = (bounds.x + bounds.width).saturating_sub(rect.width) as i32;
    let x = (rect.x as i32 + shift).clamp(min_x, max_x.max(min_x));
    Rect { x: x as u16, ..rect }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState, now: Timestamp) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal
                .draw(|frame| Self::draw_frame(frame, view_state, theme, now))
                .map_err(|err| CarouselError::ui(format!("failed to draw frame: {err}")))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(
                io::stdout(),
                LeaveAlternateScreen,
                DisableMouseCapture,
                DisableFocusChange
            )?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
