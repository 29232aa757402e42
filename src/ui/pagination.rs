use crate::api::PaginationMeta;
use crate::app::{PageSlot, PageWindow};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::focus_style;

/// Renders the page strip. Nothing is drawn for a single page.
pub fn render_pagination(
    frame: &mut Frame,
    area: Rect,
    meta: Option<PaginationMeta>,
    cursor: usize,
    focused: bool,
) {
    let Some(window) = meta.and_then(|meta| PageWindow::new(meta.current_page, meta.total_pages))
    else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(format!("Page {} of {}", window.current(), window.total()));

    let paragraph = Paragraph::new(page_strip(&window, focused.then_some(cursor)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Previous, the page window and Next as styled spans. `cursor` indexes the
/// targets of the window (gaps are skipped).
fn page_strip(window: &PageWindow, cursor: Option<usize>) -> Line<'static> {
    let mut spans = Vec::new();
    let mut target = 0;

    let push = |spans: &mut Vec<Span<'static>>, text: String, style: Style, index: usize| {
        let style = if cursor == Some(index) {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    };

    push(
        &mut spans,
        "◀ Prev".to_string(),
        enabled_style(window.previous_enabled()),
        target,
    );
    target += 1;

    for slot in window.slots() {
        match slot {
            PageSlot::Page(page) => {
                let style = if *page == window.current() {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                push(&mut spans, format!(" {page} "), style, target);
                target += 1;
            }
            PageSlot::Gap => {
                spans.push(Span::styled("…", Style::default().fg(Color::DarkGray)));
                spans.push(Span::raw(" "));
            }
        }
    }

    push(
        &mut spans,
        "Next ▶".to_string(),
        enabled_style(window.next_enabled()),
        target,
    );
    spans.pop();
    Line::from(spans)
}

fn enabled_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
