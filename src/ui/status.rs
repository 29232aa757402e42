use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Renders a failed fetch with the normalized message and the retry hint
pub fn render_error(frame: &mut Frame, area: Rect, title: &str, message: &str, note: Option<&str>) {
    let error_block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let mut error_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Something went wrong",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        Line::from(""),
    ];
    if let Some(note) = note {
        error_text.push(Line::from(Span::styled(
            note,
            Style::default().fg(Color::Yellow),
        )));
        error_text.push(Line::from(""));
    }
    error_text.push(Line::from(Span::styled(
        "Press (r) to Try Again",
        Style::default().fg(Color::Gray),
    )));

    let error_paragraph = Paragraph::new(error_text)
        .block(error_block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

/// Renders the "nothing matched" panel
pub fn render_empty(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let empty_block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .style(Style::default());

    let empty_text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
    ];

    let empty_paragraph = Paragraph::new(empty_text)
        .block(empty_block)
        .alignment(Alignment::Center);

    frame.render_widget(empty_paragraph, area);
}
