use crate::api::Person;
use crate::app::{App, PeopleFocus, PersonKind};
use crate::store::FetchStatus;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::focus_style;
use super::loading::render_loading;
use super::movies_list::render_text_input;
use super::pagination::render_pagination;
use super::status::{render_empty, render_error};

/// Renders the actors or directors list with its name search
pub fn render_people_list(frame: &mut Frame, app: &mut App, kind: PersonKind, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(3),    // Results
            Constraint::Length(3), // Pagination
        ])
        .split(area);

    let title = match kind {
        PersonKind::Actor => "Actors",
        PersonKind::Director => "Directors",
    };

    let view = app.people_view(kind);
    render_text_input(
        frame,
        chunks[0],
        "Search by name",
        view.filters.get("name").unwrap_or_default(),
        view.focus == PeopleFocus::Search,
    );

    let (state, view) = match kind {
        PersonKind::Actor => (&app.store.actors, &mut app.actors_view),
        PersonKind::Director => (&app.store.directors, &mut app.directors_view),
    };

    match state.status {
        FetchStatus::Idle | FetchStatus::Loading => {
            let label = format!("Loading {}...", title.to_lowercase());
            render_loading(frame, chunks[1], &mut app.throbber, title, &label);
        }
        FetchStatus::Failed => {
            let message = state.error.clone().unwrap_or_default();
            render_error(frame, chunks[1], title, &message, None);
        }
        FetchStatus::Succeeded if state.items.is_empty() => {
            render_empty(frame, chunks[1], title, "Nobody matches this search");
        }
        FetchStatus::Succeeded => {
            let items: Vec<ListItem> = state.items.iter().map(person_item).collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .title(format!("{title} ({})", state.items.len()))
                        .borders(Borders::ALL)
                        .border_style(focus_style(view.focus == PeopleFocus::Results)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");
            frame.render_stateful_widget(list, chunks[1], &mut view.list_state);
        }
    }

    render_pagination(
        frame,
        chunks[2],
        state.pagination,
        view.pager_cursor,
        view.focus == PeopleFocus::Pagination,
    );
}

fn person_item(person: &Person) -> ListItem<'_> {
    let mut line = vec![Span::styled(
        person.name.as_str(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(born) = person.date_of_birth {
        line.push(Span::styled(
            format!("  b. {}", born.format("%Y")),
            Style::default().fg(Color::Gray),
        ));
    }
    ListItem::new(Line::from(line))
}
