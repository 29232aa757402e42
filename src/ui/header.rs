use crate::app::{App, Section};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the navbar: one entry per section, the active one highlighted
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());
    let inner = title_block.inner(area);
    frame.render_widget(title_block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(24)])
        .split(inner);

    let active = app.current_screen.section();
    let mut spans = vec![Span::styled(
        "Movie Explorer ",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];
    for (index, section) in Section::ALL.iter().enumerate() {
        let style = if active == Some(*section) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} {} ", index + 1, section.title()),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    if let Some(updated) = app.last_updated {
        let stamp = Paragraph::new(Line::from(Span::styled(
            format!("Updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(stamp, chunks[1]);
    }
}
