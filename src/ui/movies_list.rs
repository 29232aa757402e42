use crate::api::Movie;
use crate::app::{App, MoviesFocus};
use crate::store::FetchStatus;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::loading::render_loading;
use super::pagination::render_pagination;
use super::select::{render_select_field, render_select_popup};
use super::status::{render_empty, render_error};
use super::{focus_style, rating_color};

/// Renders the movies screen: filter bar, results and the page strip
pub fn render_movies_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filters
            Constraint::Min(3),    // Results
            Constraint::Length(3), // Pagination
        ])
        .split(area);

    let filters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
        ])
        .split(chunks[0]);

    let view = &app.movies_view;
    render_text_input(
        frame,
        filters[0],
        "Title",
        view.filters.get("title").unwrap_or_default(),
        view.focus == MoviesFocus::Title,
    );
    render_select_field(frame, filters[1], "Genre", &view.genre, view.focus == MoviesFocus::Genre);
    render_select_field(frame, filters[2], "Actor", &view.actor, view.focus == MoviesFocus::Actor);
    render_select_field(
        frame,
        filters[3],
        "Director",
        &view.director,
        view.focus == MoviesFocus::Director,
    );
    render_text_input(
        frame,
        filters[4],
        "Year",
        view.filters.get("release_year").unwrap_or_default(),
        view.focus == MoviesFocus::Year,
    );

    render_results(frame, app, chunks[1]);

    let focused = app.movies_view.focus == MoviesFocus::Pagination;
    render_pagination(
        frame,
        chunks[2],
        app.store.movies.pagination,
        app.movies_view.pager_cursor,
        focused,
    );

    // The dropdown is drawn last so it covers the results.
    let (anchor, select, loading_more) = match app.movies_view.focus {
        MoviesFocus::Genre => (
            filters[1],
            &mut app.movies_view.genre,
            app.store.genre_options.is_loading(),
        ),
        MoviesFocus::Actor => (
            filters[2],
            &mut app.movies_view.actor,
            app.store.actor_options.is_loading(),
        ),
        MoviesFocus::Director => (
            filters[3],
            &mut app.movies_view.director,
            app.store.director_options.is_loading(),
        ),
        _ => return,
    };
    if select.is_open() {
        render_select_popup(frame, anchor, area, select, loading_more);
    }
}

/// Renders a single-line text filter with a cursor when focused
pub(super) fn render_text_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    focused: bool,
) {
    let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(Color::White))];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Gray)));
    } else if value.is_empty() {
        spans.push(Span::styled("Any", Style::default().fg(Color::DarkGray)));
    }
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(focus_style(focused)),
    );
    frame.render_widget(input, area);
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let state = &app.store.movies;
    match state.status {
        FetchStatus::Idle | FetchStatus::Loading => {
            render_loading(frame, area, &mut app.throbber, "Movies", "Loading movies...");
            return;
        }
        FetchStatus::Failed => {
            let message = state.error.clone().unwrap_or_default();
            render_error(frame, area, "Movies", &message, None);
            return;
        }
        FetchStatus::Succeeded if state.items.is_empty() => {
            render_empty(frame, area, "Movies", "No movies match these filters");
            return;
        }
        FetchStatus::Succeeded => {}
    }

    let title = match state.pagination.and_then(|meta| meta.total_items) {
        Some(total) => format!("Movies ({total})"),
        None => format!("Movies ({})", state.items.len()),
    };
    let items: Vec<ListItem> = state.items.iter().map(movie_item).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(focus_style(app.movies_view.focus == MoviesFocus::Results)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.movies_view.list_state);
}

/// Title, year and rating on the first line; genres and director below
pub(super) fn movie_item(movie: &Movie) -> ListItem<'_> {
    let mut details = movie.genre_names().join(", ");
    if let Some(director) = &movie.director_info {
        if !details.is_empty() {
            details.push_str(" · ");
        }
        details.push_str(&director.name);
    }

    let content = vec![
        Line::from(vec![
            Span::styled(
                movie.title.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", movie.year_label()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(
                format!("★ {}", movie.rating_label()),
                Style::default().fg(rating_color(movie.rating)),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {details}"),
            Style::default().fg(Color::Gray),
        )),
    ];

    ListItem::new(content)
}
