use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};
use throbber_widgets_tui::{BRAILLE_EIGHT, Throbber, ThrobberState};

/// Renders a bordered loading panel with a spinner in the middle
pub fn render_loading(
    frame: &mut Frame,
    area: Rect,
    state: &mut ThrobberState,
    title: &str,
    label: &str,
) {
    let loading_block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .style(Style::default());
    let inner = loading_block.inner(area);
    frame.render_widget(loading_block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);
    let label_width = label.chars().count() as u16 + 2;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(label_width),
            Constraint::Fill(1),
        ])
        .split(rows[1]);

    render_spinner(frame, columns[1], state, label);
}

/// A single spinner line, used inline for "loading more" rows
pub fn render_spinner(frame: &mut Frame, area: Rect, state: &mut ThrobberState, label: &str) {
    let throbber = Throbber::default()
        .label(label.to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .throbber_style(Style::default().fg(Color::Cyan))
        .throbber_set(BRAILLE_EIGHT);
    frame.render_stateful_widget(throbber, area, state);
}
