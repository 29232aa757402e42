mod footer;
mod header;
mod loading;
mod movie_detail;
mod movies_list;
mod not_found;
mod pagination;
mod people_list;
mod person_detail;
mod poster;
mod select;
mod status;
mod toast;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
};

use crate::app::{App, CurrentScreen, PersonKind};

use footer::render_footer;
use header::render_header;
use movie_detail::render_movie_detail;
use movies_list::render_movies_list;
use not_found::render_not_found;
use people_list::render_people_list;
use person_detail::render_person_detail;
use toast::render_toasts;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navbar
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    match app.current_screen.clone() {
        CurrentScreen::Movies => render_movies_list(frame, app, chunks[1]),
        CurrentScreen::Actors => render_people_list(frame, app, PersonKind::Actor, chunks[1]),
        CurrentScreen::Directors => {
            render_people_list(frame, app, PersonKind::Director, chunks[1])
        }
        CurrentScreen::MovieDetail(_) => render_movie_detail(frame, app, chunks[1]),
        CurrentScreen::ActorDetail(_) | CurrentScreen::DirectorDetail(_) => {
            render_person_detail(frame, app, chunks[1])
        }
        CurrentScreen::NotFound(path) => render_not_found(frame, &path, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
    render_toasts(frame, app, area);
}

/// Rating colours on the 0-10 scale.
fn rating_color(rating: Option<f64>) -> Color {
    match rating {
        Some(score) if score >= 7.0 => Color::Green,
        Some(score) if score >= 5.0 => Color::Yellow,
        Some(_) => Color::Red,
        None => Color::Gray,
    }
}

/// Border style of a block that can hold the keyboard focus.
fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}
