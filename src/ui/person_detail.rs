use crate::api::Person;
use crate::app::{App, Filmography, NOT_FOUND_REDIRECT_DELAY, sentinel_visible};
use crate::store::FetchStatus;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use throbber_widgets_tui::ThrobberState;

use super::loading::{render_loading, render_spinner};
use super::poster::render_poster;
use super::rating_color;
use super::status::render_error;

/// Renders an actor or director: portrait, bio and the growing filmography
pub fn render_person_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(view) = app.person_detail.as_mut() else {
        return;
    };
    let title = format!("{} Details", view.kind.title());

    match view.detail.status {
        FetchStatus::Idle | FetchStatus::Loading => {
            let label = format!("Loading {}...", view.kind.title().to_lowercase());
            render_loading(frame, area, &mut app.throbber, &title, &label);
            return;
        }
        FetchStatus::Failed => {
            let failure = view.detail.error.clone().unwrap_or_default();
            let note = failure.is_not_found().then(|| {
                format!(
                    "Returning to the {} list in {} seconds",
                    view.kind.title().to_lowercase(),
                    NOT_FOUND_REDIRECT_DELAY.as_secs()
                )
            });
            render_error(frame, area, &title, &failure.message, note.as_deref());
            return;
        }
        FetchStatus::Succeeded => {}
    }

    let Some(person) = view.detail.entity.as_ref() else {
        return;
    };

    let outer_block = Block::default()
        .title(format!("{} - {}", title, person.name))
        .borders(Borders::ALL)
        .style(Style::default());
    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Portrait
            Constraint::Min(30),        // Bio and movies
        ])
        .split(inner_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // Bio
            Constraint::Min(5),         // Filmography
        ])
        .split(columns[1]);

    render_bio(frame, rows[0], person);
    view.sentinel_visible = match view.filmography.as_ref() {
        Some(films) => render_filmography(
            frame,
            rows[1],
            films,
            &mut view.list_state,
            &mut app.throbber,
        ),
        None => false,
    };
    render_poster(frame, columns[0], &mut view.poster, "Photo");
}

fn render_bio(frame: &mut Frame, area: Rect, person: &Person) {
    let mut content = vec![Line::from(Span::styled(
        person.name.as_str(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))];

    if let Some(born) = person.date_of_birth {
        content.push(Line::from(vec![
            Span::styled("Born: ", Style::default().fg(Color::Gray)),
            Span::styled(
                born.format("%B %-d, %Y").to_string(),
                Style::default().fg(Color::White),
            ),
        ]));
    }
    content.push(Line::from(""));
    match person.bio.as_deref().filter(|bio| !bio.trim().is_empty()) {
        Some(bio) => content.push(Line::from(Span::styled(
            bio,
            Style::default().fg(Color::White),
        ))),
        None => content.push(Line::from(Span::styled(
            "No biography available.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let bio = Paragraph::new(content)
        .block(Block::default().title("Biography").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(bio, area);
}

/// Renders the movies plus a trailing sentinel row. Returns whether the
/// sentinel made it on screen and more movies are waiting.
fn render_filmography(
    frame: &mut Frame,
    area: Rect,
    films: &Filmography,
    state: &mut ratatui::widgets::ListState,
    throbber: &mut ThrobberState,
) -> bool {
    let mut items: Vec<ListItem> = films
        .movies
        .iter()
        .map(|movie| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4}", movie.year_label()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw("  "),
                Span::styled(movie.title.as_str(), Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    movie.rating_label(),
                    Style::default().fg(rating_color(movie.rating)),
                ),
            ]))
        })
        .collect();

    let sentinel = if films.is_loading_more() || films.has_more() {
        ""
    } else if films.movies.is_empty() {
        "No movies found"
    } else {
        "End of filmography"
    };
    items.push(ListItem::new(Line::from(Span::styled(
        sentinel,
        Style::default().fg(Color::DarkGray),
    ))));

    let block = Block::default()
        .title(format!("Movies ({})", films.movies.len()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, area, state);

    let count = films.movies.len();
    let viewport = inner.height as usize;
    let visible = sentinel_visible(state.offset(), viewport, count);

    // The sentinel row may sit just below the window when the list is full.
    let sentinel_row = count.saturating_sub(state.offset());
    if visible && films.is_loading_more() && sentinel_row < viewport {
        let row = Rect {
            y: inner.y + sentinel_row as u16,
            height: 1,
            ..inner
        };
        render_spinner(frame, row, throbber, "Loading more movies...");
    }

    visible && films.has_more()
}
