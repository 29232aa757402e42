use crate::api::Movie;
use crate::app::{App, MovieLink, NOT_FOUND_REDIRECT_DELAY};
use crate::store::FetchStatus;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::loading::render_loading;
use super::poster::render_poster;
use super::rating_color;
use super::status::render_error;

/// Renders the movie detail screen
pub fn render_movie_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(view) = app.movie_detail.as_mut() else {
        return;
    };

    match view.detail.status {
        FetchStatus::Idle | FetchStatus::Loading => {
            render_loading(
                frame,
                area,
                &mut app.throbber,
                "Movie Details",
                "Loading movie...",
            );
            return;
        }
        FetchStatus::Failed => {
            let failure = view.detail.error.clone().unwrap_or_default();
            let note = failure.is_not_found().then(|| {
                format!(
                    "Returning to the movie list in {} seconds",
                    NOT_FOUND_REDIRECT_DELAY.as_secs()
                )
            });
            render_error(frame, area, "Movie Details", &failure.message, note.as_deref());
            return;
        }
        FetchStatus::Succeeded => {}
    }

    let links = view.links();
    let Some(movie) = view.detail.entity.as_ref() else {
        return;
    };

    let outer_block = Block::default()
        .title(format!("Movie Details - {}", movie.title))
        .borders(Borders::ALL)
        .style(Style::default());
    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Poster
            Constraint::Min(30),        // Info and links
        ])
        .split(inner_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Title info
            Constraint::Min(3),    // Director and cast
        ])
        .split(columns[1]);

    render_title_section(frame, rows[0], movie);
    render_links(frame, rows[1], &links, &mut view.link_state);
    render_poster(frame, columns[0], &mut view.poster, "Poster");
}

/// Renders the title section with basic info
fn render_title_section(frame: &mut Frame, area: Rect, movie: &Movie) {
    let genres = movie.genre_names();
    let genres = if genres.is_empty() {
        "Unknown".to_string()
    } else {
        genres.join(", ")
    };

    let title_info = vec![
        Line::from(vec![
            Span::styled(
                movie.title.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("({})", movie.year_label()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Rating: ", Style::default().fg(Color::Gray)),
            Span::styled(
                movie.rating_label(),
                Style::default()
                    .fg(rating_color(movie.rating))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Genres: ", Style::default().fg(Color::Gray)),
            Span::styled(genres, Style::default().fg(Color::White)),
        ]),
    ];

    let title_paragraph = Paragraph::new(title_info).wrap(Wrap { trim: true });
    frame.render_widget(title_paragraph, area);
}

/// Director first, then the cast; Enter follows the highlighted link
fn render_links(
    frame: &mut Frame,
    area: Rect,
    links: &[MovieLink],
    state: &mut ratatui::widgets::ListState,
) {
    let items: Vec<ListItem> = links
        .iter()
        .map(|link| match link {
            MovieLink::Director { name, .. } => ListItem::new(Line::from(vec![
                Span::styled(
                    "Director: ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(name.as_str(), Style::default().fg(Color::White)),
            ])),
            MovieLink::Actor {
                name, character, ..
            } => {
                let mut spans = vec![Span::styled(
                    name.as_str(),
                    Style::default().fg(Color::White),
                )];
                if let Some(character) = character.as_deref().filter(|c| !c.is_empty()) {
                    spans.push(Span::styled(
                        format!(" as {character}"),
                        Style::default().fg(Color::Gray),
                    ));
                }
                ListItem::new(Line::from(spans))
            }
        })
        .collect();

    let title = if links.is_empty() {
        "No director or cast listed"
    } else {
        "Director & Cast"
    };
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, state);
}
