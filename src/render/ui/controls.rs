//! Screen layout and clickable controls.
//!
//! The renderer draws from [`ScreenLayout`] and [`ControlLayout`], and the render loop
//! hit-tests pointer presses against the same rectangles, so a click always lands on
//! what is drawn there.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const PREV_LABEL: &str = "◀ prev";
pub const NEXT_LABEL: &str = "next ▶";
pub const ACTIVE_DOT: &str = "●";
pub const IDLE_DOT: &str = "○";

const BUTTON_WIDTH: u16 = 6;
const BUTTON_GAP: u16 = 4;
const DOT_STRIDE: u16 = 2;

/// Rows of the carousel screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub cards: Rect,
    pub indicators: Rect,
    pub buttons: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            cards: rows[0],
            indicators: rows[1],
            buttons: rows[2],
            status: rows[3],
        }
    }
}

/// Something a tap can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    /// Indicator dot for item `n`
    Indicator(usize),
}

/// Where the prev/next buttons and the indicator dots sit on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLayout {
    pub previous: Rect,
    pub next: Rect,
    pub dots: Vec<Rect>,
}

impl ControlLayout {
    pub fn new(area: Rect, item_count: usize) -> Self {
        let screen = ScreenLayout::new(area);

        let row = screen.buttons;
        let start = centered_start(row, 2 * BUTTON_WIDTH + BUTTON_GAP);
        let previous = Rect::new(start, row.y, BUTTON_WIDTH, 1).intersection(row);
        let next =
            Rect::new(start + BUTTON_WIDTH + BUTTON_GAP, row.y, BUTTON_WIDTH, 1).intersection(row);

        let row = screen.indicators;
        let count = u16::try_from(item_count).unwrap_or(u16::MAX);
        let span = count.saturating_mul(DOT_STRIDE).saturating_sub(1);
        let start = centered_start(row, span);
        let dots = (0..count)
            .map(|i| {
                let x = start.saturating_add(i.saturating_mul(DOT_STRIDE));
                Rect::new(x, row.y, 1, 1).intersection(row)
            })
            .collect();

        Self {
            previous,
            next,
            dots,
        }
    }

    /// Control under the terminal cell `(column, row)`, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<Control> {
        if covers(self.previous, column, row) {
            return Some(Control::Previous);
        }
        if covers(self.next, column, row) {
            return Some(Control::Next);
        }
        self.dots
            .iter()
            .position(|&dot| covers(dot, column, row))
            .map(Control::Indicator)
    }
}

fn centered_start(row: Rect, width: u16) -> u16 {
    row.x + row.width.saturating_sub(width) / 2
}

fn covers(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_sit_on_the_bottom_rows() {
        let screen = ScreenLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(screen.cards.height, 21);
        assert_eq!(screen.indicators.y, 21);
        assert_eq!(screen.buttons.y, 22);
        assert_eq!(screen.status.y, 23);
    }

    #[test]
    fn buttons_are_centered() {
        let controls = ControlLayout::new(Rect::new(0, 0, 80, 24), 6);
        assert_eq!(controls.previous, Rect::new(32, 22, 6, 1));
        assert_eq!(controls.next, Rect::new(42, 22, 6, 1));

        assert_eq!(controls.hit(32, 22), Some(Control::Previous));
        assert_eq!(controls.hit(44, 22), Some(Control::Next));
        assert_eq!(controls.hit(39, 22), None);
    }

    #[test]
    fn dots_are_spaced_and_hit_individually() {
        let controls = ControlLayout::new(Rect::new(0, 0, 80, 24), 6);
        assert_eq!(controls.dots.len(), 6);
        assert_eq!(controls.dots[0].x, 34);
        assert_eq!(controls.dots[3].x, 40);

        assert_eq!(controls.hit(40, 21), Some(Control::Indicator(3)));
        assert_eq!(controls.hit(41, 21), None);
        assert_eq!(controls.hit(40, 10), None);
    }

    #[test]
    fn many_items_stay_inside_the_row() {
        let controls = ControlLayout::new(Rect::new(0, 0, 10, 8), 40);
        for dot in &controls.dots {
            assert!(dot.right() <= 10);
        }
    }
}
