use crate::app::{InfiniteSelect, SelectOption};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::focus_style;

const POPUP_HEIGHT: u16 = 14;
const POPUP_MIN_WIDTH: u16 = 28;

/// Renders the closed control: a label and the current pick
pub fn render_select_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    select: &InfiniteSelect,
    focused: bool,
) {
    let marker = if select.is_open() { "▴" } else { "▾" };
    let field = Paragraph::new(Line::from(vec![
        Span::styled(select.display_label(), Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(marker, Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(focus_style(focused)),
    );
    frame.render_widget(field, area);
}

/// Renders the open dropdown under `anchor`, clipped to `bounds`. Reports
/// the visible row count back to the select.
pub fn render_select_popup(
    frame: &mut Frame,
    anchor: Rect,
    bounds: Rect,
    select: &mut InfiniteSelect,
    loading_more: bool,
) {
    let Some(area) = popup_area(anchor, bounds) else {
        return;
    };

    let search = select.search();
    let title = if search.is_empty() {
        "Search: (type to filter)".to_string()
    } else {
        format!("Search: {search}")
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let reserved = u16::from(loading_more);
    select.set_viewport(inner.height.saturating_sub(reserved) as usize);

    let rows = select.rows();
    let visible = inner.height.saturating_sub(reserved) as usize;
    let mut lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(select.offset())
        .take(visible)
        .map(|(index, option)| option_line(select, option, index == select.cursor()))
        .collect();

    if rows.len() == 1 && !select.search().is_empty() {
        lines.push(Line::from(Span::styled(
            "  No matches",
            Style::default().fg(Color::DarkGray),
        )));
    }
    if loading_more {
        lines.truncate(visible);
        lines.push(Line::from(Span::styled(
            "  Loading more...",
            Style::default().fg(Color::Cyan),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn option_line<'a>(select: &InfiniteSelect, option: &'a SelectOption, under_cursor: bool) -> Line<'a> {
    let check = if select.is_selected(option) { "✓ " } else { "  " };
    let mut style = match option {
        SelectOption::All { .. } => Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        SelectOption::Entity { .. } => Style::default().fg(Color::White),
    };
    if under_cursor {
        style = style
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(check, Style::default().fg(Color::Green)),
        Span::styled(option.label(), style),
    ])
}

fn popup_area(anchor: Rect, bounds: Rect) -> Option<Rect> {
    let top = anchor.y + anchor.height;
    let bottom = bounds.y + bounds.height;
    if top >= bottom {
        return None;
    }
    let width = anchor.width.max(POPUP_MIN_WIDTH).min(bounds.width);
    let x = anchor.x.min(bounds.x + bounds.width - width);
    Some(Rect {
        x,
        y: top,
        width,
        height: POPUP_HEIGHT.min(bottom - top),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_opens_below_and_stays_inside() {
        let bounds = Rect::new(0, 0, 100, 30);
        let anchor = Rect::new(90, 3, 12, 3);
        let area = popup_area(anchor, bounds).unwrap();
        assert_eq!(area, Rect::new(72, 6, 28, 14));
    }

    #[test]
    fn popup_is_clipped_at_the_bottom() {
        let bounds = Rect::new(0, 0, 100, 10);
        let area = popup_area(Rect::new(0, 3, 30, 3), bounds).unwrap();
        assert_eq!(area.height, 4);
        assert_eq!(popup_area(Rect::new(0, 7, 30, 3), bounds), None);
    }
}
