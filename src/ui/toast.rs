use crate::app::{App, ToastKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const TOAST_WIDTH: u16 = 44;

/// Stacks the live toasts in the top right corner, newest at the bottom
pub fn render_toasts(frame: &mut Frame, app: &App, area: Rect) {
    if app.toasts.is_empty() {
        return;
    }

    let width = TOAST_WIDTH.min(area.width);
    let text_width = width.saturating_sub(2).max(1) as usize;
    let mut y = area.y + 1;

    for toast in app.toasts.iter() {
        let lines = (toast.message.chars().count() / text_width) as u16 + 1;
        let height = lines + 2;
        if y + height > area.y + area.height {
            break;
        }
        let toast_area = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height,
        };

        let color = kind_color(toast.kind);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                kind_title(toast.kind),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(
                "(x) dismiss",
                Style::default().fg(Color::DarkGray),
            )));
        let paragraph = Paragraph::new(toast.message.as_str())
            .block(block)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, toast_area);
        frame.render_widget(paragraph, toast_area);
        y += height;
    }
}

fn kind_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Error => Color::Red,
        ToastKind::Info => Color::Cyan,
    }
}

fn kind_title(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Error => "Error",
        ToastKind::Info => "Info",
    }
}
