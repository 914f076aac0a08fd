//! User interface rendering.

mod chart;
mod formatters;
mod graphics;
mod keymap_bar;
mod status_bar;
mod theme;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use chart::{decimate, step_points};
pub use graphics::{TerminalErrorBars, TerminalSeries};
pub use theme::{pen_style, ThemeColors};

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    let colors = ThemeColors::from_theme(&app.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    chart::draw_chart(f, chunks[0], app, &colors);
    status_bar::draw_status(f, chunks[1], &app.status(), &colors);
    keymap_bar::draw_keymap(f, chunks[2], &colors);
}
