use crate::app::PosterState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

/// Renders a poster or portrait, or a placeholder when there is none
pub fn render_poster(frame: &mut Frame, area: Rect, poster: &mut PosterState, title: &str) {
    let poster_block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string());

    if let Some(protocol) = &mut poster.protocol {
        let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));
        let inner_area = poster_block.inner(area);
        frame.render_widget(poster_block, area);
        frame.render_stateful_widget(image, inner_area, protocol);
        return;
    }

    let message = if poster.loading {
        Span::styled(
            "Downloading image...",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else if poster.failed {
        Span::styled("Image could not be loaded", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("No image available", Style::default().fg(Color::Gray))
    };
    let placeholder = Paragraph::new(vec![Line::from(""), Line::from(""), Line::from(message)])
        .alignment(Alignment::Center)
        .block(poster_block);

    frame.render_widget(placeholder, area);
}
