use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;

use super::{
    App, CurrentScreen, MovieLink, MoviesFocus, PageWindow, PeopleFocus, PersonKind, Section,
};
use crate::api::PaginationMeta;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.exit = true;
            return;
        }
        if self.command.is_some() {
            self.handle_command_key(key);
            return;
        }

        if !self.captures_text() {
            match key.code {
                KeyCode::Char('q') => {
                    self.exit = true;
                    return;
                }
                KeyCode::Char(':') => {
                    self.command = Some(String::new());
                    return;
                }
                KeyCode::Char('x') => {
                    self.toasts.dismiss_latest();
                    return;
                }
                KeyCode::Char(c @ '1'..='3') => {
                    let index = c as usize - '1' as usize;
                    self.navigate(Section::ALL[index].screen());
                    return;
                }
                _ => {}
            }
        }

        match self.current_screen {
            CurrentScreen::Movies => self.handle_movies_key(key),
            CurrentScreen::Actors => self.handle_people_key(PersonKind::Actor, key),
            CurrentScreen::Directors => self.handle_people_key(PersonKind::Director, key),
            CurrentScreen::MovieDetail(_) => self.handle_movie_detail_key(key),
            CurrentScreen::ActorDetail(_) | CurrentScreen::DirectorDetail(_) => {
                self.handle_person_detail_key(key)
            }
            CurrentScreen::NotFound(_) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('h') => {
                    self.navigate(CurrentScreen::Movies)
                }
                _ => {}
            },
        }
    }

    fn captures_text(&self) -> bool {
        match self.current_screen {
            CurrentScreen::Movies => self.movies_view.captures_text(),
            CurrentScreen::Actors => self.actors_view.captures_text(),
            CurrentScreen::Directors => self.directors_view.captures_text(),
            _ => false,
        }
    }

    /// `:` prompt: a path such as `/movies/3` or `directors`.
    fn handle_command_key(&mut self, key: KeyEvent) {
        let Some(command) = self.command.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => command.push(c),
            KeyCode::Backspace => {
                if command.pop().is_none() {
                    self.command = None;
                }
            }
            KeyCode::Esc => self.command = None,
            KeyCode::Enter => {
                let path = std::mem::take(command);
                self.command = None;
                let path = if path.starts_with('/') {
                    path
                } else {
                    format!("/{path}")
                };
                self.navigate(CurrentScreen::parse(&path));
            }
            _ => {}
        }
    }

    fn handle_movies_key(&mut self, key: KeyEvent) {
        let select_open = self.movies_view.open_select().is_some();
        match key.code {
            KeyCode::Tab if !select_open => {
                let focus = self.movies_view.focus.next();
                self.movies_view.set_focus(focus);
                return;
            }
            KeyCode::BackTab if !select_open => {
                let focus = self.movies_view.focus.previous();
                self.movies_view.set_focus(focus);
                return;
            }
            _ => {}
        }

        match self.movies_view.focus {
            MoviesFocus::Results => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    let len = self.store.movies.items.len();
                    select_next(&mut self.movies_view.list_state, len);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    let len = self.store.movies.items.len();
                    select_previous(&mut self.movies_view.list_state, len);
                }
                KeyCode::Enter => {
                    let id = self
                        .movies_view
                        .list_state
                        .selected()
                        .and_then(|index| self.store.movies.items.get(index))
                        .map(|movie| movie.id);
                    if let Some(id) = id {
                        self.navigate(CurrentScreen::MovieDetail(id));
                    }
                }
                KeyCode::Char('/') => self.movies_view.set_focus(MoviesFocus::Title),
                KeyCode::Char('c') => self.clear_movie_filters(),
                KeyCode::Char('r') => self.retry(),
                KeyCode::Char('[') | KeyCode::Char(']') => self.movies_page_shortcut(key.code),
                _ => {}
            },
            MoviesFocus::Pagination => {
                let window = page_window(self.store.movies.pagination);
                let cursor = &mut self.movies_view.pager_cursor;
                if let Some(page) = pager_key(window.as_ref(), cursor, key.code) {
                    self.change_movies_page(page);
                }
            }
            MoviesFocus::Title | MoviesFocus::Year => self.handle_movie_text_key(key),
            MoviesFocus::Genre | MoviesFocus::Actor | MoviesFocus::Director => {
                self.handle_select_key(key)
            }
        }
    }

    fn movies_page_shortcut(&mut self, code: KeyCode) {
        let Some(window) = page_window(self.store.movies.pagination) else {
            return;
        };
        let page = if code == KeyCode::Char('[') {
            window.previous()
        } else {
            window.next()
        };
        if let Some(page) = page {
            self.change_movies_page(page);
        }
    }

    fn handle_movie_text_key(&mut self, key: KeyEvent) {
        let Some(field) = self.movies_view.text_field() else {
            return;
        };
        let mut value = self
            .movies_view
            .filters
            .get(field)
            .unwrap_or_default()
            .to_string();
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                self.movies_view.set_focus(MoviesFocus::Results);
                return;
            }
            KeyCode::Backspace => {
                if value.pop().is_none() {
                    return;
                }
            }
            // Release year only takes digits.
            KeyCode::Char(c) if field == "release_year" && !c.is_ascii_digit() => return,
            KeyCode::Char(c) => value.push(c),
            _ => return,
        }
        self.apply_movie_filter(field, value);
    }

    fn handle_select_key(&mut self, key: KeyEvent) {
        let Some(select) = self.movies_view.focused_select() else {
            return;
        };

        if !select.is_open() {
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => select.open(),
                KeyCode::Esc => self.movies_view.set_focus(MoviesFocus::Results),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => select.close(),
            KeyCode::Up => select.move_cursor(-1),
            KeyCode::Down => select.move_cursor(1),
            KeyCode::PageUp => select.move_cursor(-5),
            KeyCode::PageDown => select.move_cursor(5),
            KeyCode::Backspace => select.pop_search(),
            KeyCode::Char(c) => select.push_search(c),
            KeyCode::Enter => {
                let field = select.field();
                if let Some(selection) = select.confirm() {
                    self.apply_movie_filter(field, selection.filter_value().to_string());
                }
                return;
            }
            _ => {}
        }
        self.load_more_options_if_needed();
    }

    /// Asks for another page of options once the open list is scrolled far
    /// enough.
    pub fn load_more_options_if_needed(&mut self) {
        let Some(select) = self.movies_view.open_select() else {
            return;
        };
        let field = select.field();
        let (has_more, loading) = self.option_progress(field);
        if select.wants_more(has_more, loading) {
            self.load_more_options(field);
        }
    }

    fn handle_people_key(&mut self, kind: PersonKind, key: KeyEvent) {
        let focus = self.people_view(kind).focus;
        match key.code {
            KeyCode::Tab => {
                self.people_view_mut(kind).focus = focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.people_view_mut(kind).focus = focus.previous();
                return;
            }
            _ => {}
        }

        let (len, pagination) = {
            let state = match kind {
                PersonKind::Actor => &self.store.actors,
                PersonKind::Director => &self.store.directors,
            };
            (state.items.len(), state.pagination)
        };

        match focus {
            PeopleFocus::Results => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    select_next(&mut self.people_view_mut(kind).list_state, len)
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    select_previous(&mut self.people_view_mut(kind).list_state, len)
                }
                KeyCode::Enter => {
                    let state = match kind {
                        PersonKind::Actor => &self.store.actors,
                        PersonKind::Director => &self.store.directors,
                    };
                    let id = self
                        .people_view(kind)
                        .list_state
                        .selected()
                        .and_then(|index| state.items.get(index))
                        .map(|person| person.id);
                    if let Some(id) = id {
                        self.navigate(match kind {
                            PersonKind::Actor => CurrentScreen::ActorDetail(id),
                            PersonKind::Director => CurrentScreen::DirectorDetail(id),
                        });
                    }
                }
                KeyCode::Char('/') => self.people_view_mut(kind).focus = PeopleFocus::Search,
                KeyCode::Char('c') => self.clear_people_filters(kind),
                KeyCode::Char('r') => self.retry(),
                KeyCode::Char('[') | KeyCode::Char(']') => {
                    let window = page_window(pagination);
                    let page = window.and_then(|window| {
                        if key.code == KeyCode::Char('[') {
                            window.previous()
                        } else {
                            window.next()
                        }
                    });
                    if let Some(page) = page {
                        self.change_people_page(kind, page);
                    }
                }
                _ => {}
            },
            PeopleFocus::Pagination => {
                let window = page_window(pagination);
                let cursor = &mut self.people_view_mut(kind).pager_cursor;
                if let Some(page) = pager_key(window.as_ref(), cursor, key.code) {
                    self.change_people_page(kind, page);
                }
            }
            PeopleFocus::Search => {
                let mut value = self
                    .people_view(kind)
                    .filters
                    .get("name")
                    .unwrap_or_default()
                    .to_string();
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                        self.people_view_mut(kind).focus = PeopleFocus::Results;
                        return;
                    }
                    KeyCode::Backspace => {
                        if value.pop().is_none() {
                            return;
                        }
                    }
                    KeyCode::Char(c) => value.push(c),
                    _ => return,
                }
                self.apply_people_search(kind, value);
            }
        }
    }

    fn handle_movie_detail_key(&mut self, key: KeyEvent) {
        let Some(view) = self.movie_detail.as_mut() else {
            return;
        };
        let links = view.links();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => select_next(&mut view.link_state, links.len()),
            KeyCode::Up | KeyCode::Char('k') => select_previous(&mut view.link_state, links.len()),
            KeyCode::Enter => {
                let link = view
                    .link_state
                    .selected()
                    .and_then(|index| links.get(index));
                match link {
                    Some(MovieLink::Director { id, .. }) => {
                        self.navigate(CurrentScreen::DirectorDetail(*id))
                    }
                    Some(MovieLink::Actor { id, .. }) => {
                        self.navigate(CurrentScreen::ActorDetail(*id))
                    }
                    None => {}
                }
            }
            KeyCode::Char('r') => self.retry(),
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => self.go_back(),
            _ => {}
        }
    }

    fn handle_person_detail_key(&mut self, key: KeyEvent) {
        let Some(view) = self.person_detail.as_mut() else {
            return;
        };
        let len = view
            .filmography
            .as_ref()
            .map_or(0, |films| films.movies.len());
        match key.code {
            // No wrap-around here; the list grows as the end comes into view.
            KeyCode::Down | KeyCode::Char('j') => {
                let next = view
                    .list_state
                    .selected()
                    .map_or(0, |index| (index + 1).min(len.saturating_sub(1)));
                if len > 0 {
                    view.list_state.select(Some(next));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let previous = view
                    .list_state
                    .selected()
                    .map_or(0, |index| index.saturating_sub(1));
                if len > 0 {
                    view.list_state.select(Some(previous));
                }
            }
            KeyCode::Enter => {
                let id = view
                    .list_state
                    .selected()
                    .and_then(|index| view.filmography.as_ref()?.movies.get(index))
                    .map(|movie| movie.id);
                if let Some(id) = id {
                    self.navigate(CurrentScreen::MovieDetail(id));
                }
            }
            KeyCode::Char('r') => self.retry(),
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => self.go_back(),
            _ => {}
        }
    }
}

fn page_window(meta: Option<PaginationMeta>) -> Option<PageWindow> {
    meta.and_then(|meta| PageWindow::new(meta.current_page, meta.total_pages))
}

/// Moves the pager cursor or activates the slot under it. Returns the page
/// to load, if any.
fn pager_key(window: Option<&PageWindow>, cursor: &mut usize, code: KeyCode) -> Option<u32> {
    let window = window?;
    let targets = window.targets();
    let last = targets.len().saturating_sub(1);
    match code {
        KeyCode::Left | KeyCode::Char('h') => {
            *cursor = cursor.saturating_sub(1).min(last);
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            *cursor = (*cursor + 1).min(last);
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let target = targets.get((*cursor).min(last))?;
            window.activate_target(*target)
        }
        KeyCode::Char('[') => window.previous(),
        KeyCode::Char(']') => window.next(),
        _ => None,
    }
}

fn select_next(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let next = state.selected().map_or(0, |index| (index + 1) % len);
    state.select(Some(next));
}

fn select_previous(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let previous = state
        .selected()
        .map_or(0, |index| if index == 0 { len - 1 } else { index - 1 });
    state.select(Some(previous));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Genre, Movie, Page};
    use crate::app::AppMessage;
    use crate::config::Config;
    use std::time::Instant;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn typed(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn meta(current: u32, total: u32) -> Option<PaginationMeta> {
        Some(PaginationMeta {
            current_page: current,
            total_pages: total,
            total_items: None,
            page_size: None,
        })
    }

    fn movies(app: &mut App, ids: &[u64], current: u32, total: u32) {
        let ticket = app.store.movies.begin_fetch();
        let results = ids
            .iter()
            .map(|id| Movie {
                id: *id,
                title: format!("Movie {id}"),
                release_year: None,
                rating: None,
                image_url: None,
                genres_info: Vec::new(),
                actors_info: Vec::new(),
                director_info: None,
            })
            .collect();
        app.handle_message(
            AppMessage::Movies(ticket, Ok(Page::new(results, meta(current, total)))),
            Instant::now(),
        );
    }

    fn app() -> App {
        App::new(Config::default()).unwrap()
    }

    #[test]
    fn typing_a_title_filters_and_resets_page() {
        let mut app = app();
        app.movies_view.filters.set_page(4);
        press(&mut app, KeyCode::Char('/'));
        typed(&mut app, "qx");

        assert_eq!(app.movies_view.filters.get("title"), Some("qx"));
        assert_eq!(app.movies_view.filters.page(), 1);
        // Shortcut keys are plain text while the input has focus.
        assert!(!app.exit);
    }

    #[test]
    fn year_input_ignores_non_digits() {
        let mut app = app();
        app.movies_view.set_focus(MoviesFocus::Year);
        typed(&mut app, "19a79");
        assert_eq!(app.movies_view.filters.get("release_year"), Some("1979"));
    }

    #[test]
    fn bracket_keys_page_through_results() {
        let mut app = app();
        movies(&mut app, &[1, 2], 2, 5);

        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.movies_view.filters.page(), 3);

        movies(&mut app, &[1, 2], 1, 5);
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.movies_view.filters.page(), 3);
    }

    #[test]
    fn pager_cursor_activates_pages() {
        let mut app = app();
        movies(&mut app, &[1], 1, 3);
        app.movies_view.set_focus(MoviesFocus::Pagination);

        // Cursor rests on page 1; activating it is a no-op.
        press(&mut app, KeyCode::Enter);
        assert!(!app.store.movies.is_loading());

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.movies_view.filters.page(), 2);
        assert!(app.store.movies.is_loading());
    }

    #[test]
    fn select_pick_sets_the_filter() {
        let mut app = app();
        let ticket = app.store.genre_options.begin_fetch();
        app.handle_message(
            AppMessage::GenreOptions(
                ticket,
                Ok(Page::new(
                    vec![
                        Genre { id: 1, name: "Drama".into() },
                        Genre { id: 2, name: "Horror".into() },
                    ],
                    meta(1, 1),
                )),
            ),
            Instant::now(),
        );
        app.movies_view.set_focus(MoviesFocus::Genre);

        press(&mut app, KeyCode::Enter);
        typed(&mut app, "hor");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.movies_view.filters.get("genre"), Some("Horror"));
        assert!(!app.movies_view.genre.is_open());
        assert_eq!(app.movies_view.genre.display_label(), "Horror");
    }

    #[test]
    fn clearing_drops_every_filter() {
        let mut app = app();
        app.movies_view.set_focus(MoviesFocus::Year);
        typed(&mut app, "1982");
        app.movies_view.set_focus(MoviesFocus::Results);

        press(&mut app, KeyCode::Char('c'));

        assert_eq!(app.movies_view.filters.get("release_year"), None);
        assert_eq!(app.store.movies.filters.page(), 1);
        assert_eq!(app.movies_view.genre.display_label(), "All Genres");
    }

    #[test]
    fn tab_away_closes_the_select() {
        let mut app = app();
        app.movies_view.set_focus(MoviesFocus::Genre);
        press(&mut app, KeyCode::Enter);
        assert!(app.movies_view.genre.is_open());

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Tab);

        assert!(!app.movies_view.genre.is_open());
        assert_eq!(app.movies_view.focus, MoviesFocus::Actor);
    }

    #[test]
    fn enter_opens_the_selected_movie() {
        let mut app = app();
        movies(&mut app, &[7, 8], 1, 1);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_screen, CurrentScreen::MovieDetail(8));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.current_screen, CurrentScreen::Movies);
    }

    #[test]
    fn command_prompt_navigates() {
        let mut app = app();
        press(&mut app, KeyCode::Char(':'));
        typed(&mut app, "actors/12");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.command, None);
        assert_eq!(app.current_screen, CurrentScreen::ActorDetail(12));
    }

    #[test]
    fn number_keys_switch_sections() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_screen, CurrentScreen::Directors);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.exit);
    }

    #[test]
    fn list_selection_wraps() {
        let mut state = ListState::default();
        select_previous(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
        select_previous(&mut state, 3);
        assert_eq!(state.selected(), Some(2));
        select_next(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
    }
}
