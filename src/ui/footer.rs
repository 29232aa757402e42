use crate::app::{App, CurrentScreen, MoviesFocus, PeopleFocus, PersonKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    match &app.current_screen {
        CurrentScreen::Movies => {
            if app.movies_view.open_select().is_some() {
                return "type to search, (↑↓) move, (Enter) pick, (Esc) close";
            }
            match app.movies_view.focus {
                MoviesFocus::Results => {
                    "(↑↓/jk) scroll, (Enter) open, (/) search, (c) clear, ([ ]) page, (Tab) filters, (r) reload, (q) quit"
                }
                MoviesFocus::Pagination => "(←→/hl) move, (Enter) go to page, (Tab) next field",
                MoviesFocus::Title => "type a title, (Enter/Esc) done, (Tab) next field",
                MoviesFocus::Year => "type a year, (Enter/Esc) done, (Tab) next field",
                MoviesFocus::Genre | MoviesFocus::Actor | MoviesFocus::Director => {
                    "(Enter) open list, (Tab) next field, (Esc) back to results"
                }
            }
        }
        CurrentScreen::Actors | CurrentScreen::Directors => {
            let kind = if app.current_screen == CurrentScreen::Actors {
                PersonKind::Actor
            } else {
                PersonKind::Director
            };
            match app.people_view(kind).focus {
                PeopleFocus::Results => {
                    "(↑↓/jk) scroll, (Enter) open, (/) search, (c) clear, ([ ]) page, (Tab) pager, (r) reload, (q) quit"
                }
                PeopleFocus::Pagination => "(←→/hl) move, (Enter) go to page, (Tab) next field",
                PeopleFocus::Search => "type a name, (Enter/Esc) done, (Tab) next field",
            }
        }
        CurrentScreen::MovieDetail(_) => {
            "(↑↓/jk) cast, (Enter) open, (r) reload, (Esc/b) back, (x) dismiss, (q) quit"
        }
        CurrentScreen::ActorDetail(_) | CurrentScreen::DirectorDetail(_) => {
            "(↑↓/jk) movies, (Enter) open, (r) reload, (Esc/b) back, (x) dismiss, (q) quit"
        }
        CurrentScreen::NotFound(_) => "(Enter) back to movies, (:) go to path, (q) quit",
    }
}

/// Renders the footer with instructions, or the `:` prompt while it is open
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let bottom = match &app.command {
        Some(command) => Paragraph::new(Line::from(vec![
            Span::styled(":", Style::default().fg(Color::Yellow)),
            Span::raw(command.as_str()),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ])),
        None => Paragraph::new(Text::styled(get_instruction_text(app), Style::default())),
    }
    .block(bottom_block);

    frame.render_widget(bottom, area);
}
