mod detail;
mod input;
mod pagination;
mod route;
mod select;
mod toast;
mod views;

pub use detail::{Filmography, NOT_FOUND_REDIRECT_DELAY, sentinel_visible};
pub use pagination::{PageSlot, PageWindow};
pub use route::{CurrentScreen, Section};
pub use select::{InfiniteSelect, SelectOption};
pub use toast::{ToastKind, Toasts};
pub use views::{
    MovieDetailView, MovieLink, MoviesFocus, MoviesListView, PeopleFocus, PeopleListView,
    PersonDetailView, PersonKind, PosterState,
};

use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Instant;

use chrono::{DateTime, Local};
use image::DynamicImage;
use ratatui_image::picker::Picker;
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, FetchFailure, Genre, Movie, Page, PaginationMeta, Person};
use crate::config::Config;
use crate::store::{FetchStatus, FilterSet, ResourceState, Store, Ticket};

type Outcome<T> = Result<T, FetchFailure>;

/// Screens kept for back navigation.
const HISTORY_LIMIT: usize = 50;

/// Results sent back to the UI thread by the worker threads.
pub enum AppMessage {
    Movies(Ticket, Outcome<Page<Movie>>),
    People(PersonKind, Ticket, Outcome<Page<Person>>),
    GenreOptions(Ticket, Outcome<Page<Genre>>),
    PersonOptions(PersonKind, Ticket, Outcome<Page<Person>>),
    Movie {
        id: u64,
        ticket: Ticket,
        outcome: Outcome<Movie>,
    },
    Person {
        kind: PersonKind,
        id: u64,
        ticket: Ticket,
        outcome: Outcome<Person>,
    },
    Filmography {
        kind: PersonKind,
        id: u64,
        ticket: Ticket,
        outcome: Outcome<Page<Movie>>,
    },
    Poster {
        url: String,
        outcome: Result<DynamicImage, String>,
    },
}

pub struct App {
    pub config: Config,
    client: Arc<ApiClient>,
    sender: mpsc::Sender<AppMessage>,
    receiver: mpsc::Receiver<AppMessage>,
    pub store: Store,
    pub current_screen: CurrentScreen,
    history: Vec<CurrentScreen>,
    /// Last filmography ticket handed out, across every person visited.
    filmography_ticket: Ticket,
    pub movies_view: MoviesListView,
    pub actors_view: PeopleListView,
    pub directors_view: PeopleListView,
    pub movie_detail: Option<MovieDetailView>,
    pub person_detail: Option<PersonDetailView>,
    pub toasts: Toasts,
    /// Text of the `:` prompt while it is open.
    pub command: Option<String>,
    pub throbber: ThrobberState,
    pub picker: Option<Picker>,
    pub last_updated: Option<DateTime<Local>>,
    pub exit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = ApiClient::new(&config.api_url, config.timeout())?;
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            config,
            client: Arc::new(client),
            sender,
            receiver,
            store: Store::new(),
            current_screen: CurrentScreen::Movies,
            history: Vec::new(),
            filmography_ticket: 0,
            movies_view: MoviesListView::new(),
            actors_view: PeopleListView::new(),
            directors_view: PeopleListView::new(),
            movie_detail: None,
            person_detail: None,
            toasts: Toasts::new(),
            command: None,
            throbber: ThrobberState::default(),
            picker: None,
            last_updated: None,
            exit: false,
        })
    }

    /// Opens the first screen without recording history.
    pub fn start(&mut self, screen: CurrentScreen) {
        info!(path = %screen.path(), api = %self.client.base_url(), "starting");
        self.enter(screen);
    }

    pub fn navigate(&mut self, screen: CurrentScreen) {
        if screen == self.current_screen {
            return;
        }
        let previous = std::mem::replace(&mut self.current_screen, CurrentScreen::Movies);
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(previous);
        self.enter(screen);
    }

    pub fn go_back(&mut self) {
        let target = self
            .history
            .pop()
            .unwrap_or_else(|| self.current_screen.parent());
        if target != self.current_screen {
            self.enter(target);
        }
    }

    /// Switches screens and starts whatever the new screen loads on mount.
    fn enter(&mut self, screen: CurrentScreen) {
        debug!(path = %screen.path(), "enter screen");
        self.command = None;
        self.current_screen = screen.clone();
        match screen {
            CurrentScreen::Movies => {
                self.ensure_options_loaded();
                self.fetch_movies();
            }
            CurrentScreen::Actors => self.fetch_people(PersonKind::Actor),
            CurrentScreen::Directors => self.fetch_people(PersonKind::Director),
            CurrentScreen::MovieDetail(id) => {
                self.movie_detail = Some(MovieDetailView::new(id));
                self.fetch_movie_detail();
            }
            CurrentScreen::ActorDetail(id) => {
                self.person_detail = Some(PersonDetailView::new(PersonKind::Actor, id));
                self.fetch_person_detail();
            }
            CurrentScreen::DirectorDetail(id) => {
                self.person_detail = Some(PersonDetailView::new(PersonKind::Director, id));
                self.fetch_person_detail();
            }
            CurrentScreen::NotFound(path) => warn!(%path, "no screen for path"),
        }
    }

    /// Re-issues the fetch behind the current screen ("Try Again").
    pub fn retry(&mut self) {
        match self.current_screen {
            CurrentScreen::Movies => {
                self.ensure_options_loaded();
                self.fetch_movies();
            }
            CurrentScreen::Actors => self.fetch_people(PersonKind::Actor),
            CurrentScreen::Directors => self.fetch_people(PersonKind::Director),
            CurrentScreen::MovieDetail(_) => self.fetch_movie_detail(),
            CurrentScreen::ActorDetail(_) | CurrentScreen::DirectorDetail(_) => {
                self.fetch_person_detail()
            }
            CurrentScreen::NotFound(_) => {}
        }
    }

    /// Runs `request` on a worker thread and posts its outcome back.
    fn spawn_request<T, R, W>(&self, label: &'static str, request: R, wrap: W)
    where
        T: Send + 'static,
        R: FnOnce(&ApiClient) -> Result<T, ApiError> + Send + 'static,
        W: FnOnce(Outcome<T>) -> AppMessage + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let outcome = request(client.as_ref()).map_err(|e| {
                warn!(request = label, error = %e, "fetch failed");
                FetchFailure::from(e)
            });
            let _ = sender.send(wrap(outcome));
        });
    }

    pub fn fetch_movies(&mut self) {
        let filters = self.movies_view.filters.clone();
        self.store.movies.set_filters(filters.clone());
        let ticket = self.store.movies.begin_fetch();
        self.spawn_request(
            "movies",
            move |client| client.list_movies(&filters),
            move |outcome| AppMessage::Movies(ticket, outcome),
        );
    }

    pub fn fetch_people(&mut self, kind: PersonKind) {
        let filters = self.people_view(kind).filters.clone();
        let state = self.people_store(kind);
        state.set_filters(filters.clone());
        let ticket = state.begin_fetch();
        self.spawn_request(
            "people",
            move |client| match kind {
                PersonKind::Actor => client.list_actors(&filters),
                PersonKind::Director => client.list_directors(&filters),
            },
            move |outcome| AppMessage::People(kind, ticket, outcome),
        );
    }

    pub fn people_view(&self, kind: PersonKind) -> &PeopleListView {
        match kind {
            PersonKind::Actor => &self.actors_view,
            PersonKind::Director => &self.directors_view,
        }
    }

    pub fn people_view_mut(&mut self, kind: PersonKind) -> &mut PeopleListView {
        match kind {
            PersonKind::Actor => &mut self.actors_view,
            PersonKind::Director => &mut self.directors_view,
        }
    }

    fn people_store(&mut self, kind: PersonKind) -> &mut ResourceState<Person> {
        match kind {
            PersonKind::Actor => &mut self.store.actors,
            PersonKind::Director => &mut self.store.directors,
        }
    }

    fn option_store(&mut self, kind: PersonKind) -> &mut ResourceState<Person> {
        match kind {
            PersonKind::Actor => &mut self.store.actor_options,
            PersonKind::Director => &mut self.store.director_options,
        }
    }

    /// Applies a page change on the movies list.
    pub fn change_movies_page(&mut self, page: u32) {
        self.movies_view.filters.set_page(page);
        self.fetch_movies();
    }

    pub fn change_people_page(&mut self, kind: PersonKind, page: u32) {
        self.people_view_mut(kind).filters.set_page(page);
        self.fetch_people(kind);
    }

    /// Sets one movie filter; the page goes back to 1.
    pub fn apply_movie_filter(&mut self, field: &str, value: String) {
        self.movies_view.filters.set(field, value);
        self.fetch_movies();
    }

    pub fn apply_people_search(&mut self, kind: PersonKind, value: String) {
        self.people_view_mut(kind).filters.set("name", value);
        self.fetch_people(kind);
    }

    /// Drops every movie filter and starts over from page 1.
    pub fn clear_movie_filters(&mut self) {
        self.movies_view.filters = FilterSet::new();
        self.movies_view.genre.reset();
        self.movies_view.actor.reset();
        self.movies_view.director.reset();
        self.store.movies.clear_filters();
        self.fetch_movies();
    }

    pub fn clear_people_filters(&mut self, kind: PersonKind) {
        self.people_view_mut(kind).filters = FilterSet::new();
        self.people_store(kind).clear_filters();
        self.fetch_people(kind);
    }

    /// Loads the select options that are missing: the first page when none
    /// arrived yet, or the page that failed last time.
    fn ensure_options_loaded(&mut self) {
        let first_page = FilterSet::new().with("page_size", self.config.option_page_size.to_string());
        if let Some(filters) = options_to_load(&self.store.genre_options, &first_page) {
            self.fetch_genre_options(filters);
        }
        for kind in [PersonKind::Actor, PersonKind::Director] {
            if let Some(filters) = options_to_load(self.option_store(kind), &first_page) {
                self.fetch_person_options(kind, filters);
            }
        }
    }

    fn fetch_genre_options(&mut self, filters: FilterSet) {
        self.store.genre_options.set_filters(filters.clone());
        let ticket = self.store.genre_options.begin_fetch();
        self.spawn_request(
            "genre options",
            move |client| client.list_genres(&filters),
            move |outcome| AppMessage::GenreOptions(ticket, outcome),
        );
    }

    fn fetch_person_options(&mut self, kind: PersonKind, filters: FilterSet) {
        let state = self.option_store(kind);
        state.set_filters(filters.clone());
        let ticket = state.begin_fetch();
        self.spawn_request(
            "person options",
            move |client| match kind {
                PersonKind::Actor => client.list_actors(&filters),
                PersonKind::Director => client.list_directors(&filters),
            },
            move |outcome| AppMessage::PersonOptions(kind, ticket, outcome),
        );
    }

    /// Next page of options for the select bound to `field`, unless one is
    /// already in flight or the list is complete.
    pub fn load_more_options(&mut self, field: &str) {
        match field {
            "genre" => {
                let state = &self.store.genre_options;
                if state.is_loading() {
                    return;
                }
                if let Some(filters) = state.next_page_filters() {
                    self.fetch_genre_options(filters);
                }
            }
            "actor" | "director" => {
                let kind = if field == "actor" {
                    PersonKind::Actor
                } else {
                    PersonKind::Director
                };
                let state = self.option_store(kind);
                if state.is_loading() {
                    return;
                }
                if let Some(filters) = state.next_page_filters() {
                    self.fetch_person_options(kind, filters);
                }
            }
            _ => {}
        }
    }

    /// `(has_more, loading)` of the container feeding the select for `field`.
    pub fn option_progress(&self, field: &str) -> (bool, bool) {
        let state: &ResourceState<_> = match field {
            "genre" => return progress(&self.store.genre_options),
            "actor" => &self.store.actor_options,
            "director" => &self.store.director_options,
            _ => return (false, false),
        };
        progress(state)
    }

    pub fn fetch_movie_detail(&mut self) {
        let Some(view) = self.movie_detail.as_mut() else {
            return;
        };
        let id = view.detail.id;
        let ticket = view.detail.begin_fetch();
        self.spawn_request(
            "movie",
            move |client| client.get_movie(id),
            move |outcome| AppMessage::Movie {
                id,
                ticket,
                outcome,
            },
        );
    }

    pub fn fetch_person_detail(&mut self) {
        let Some(view) = self.person_detail.as_mut() else {
            return;
        };
        let (kind, id) = (view.kind, view.detail.id);
        let ticket = view.detail.begin_fetch();
        self.spawn_request(
            "person",
            move |client| match kind {
                PersonKind::Actor => client.get_actor(id),
                PersonKind::Director => client.get_director(id),
            },
            move |outcome| AppMessage::Person {
                kind,
                id,
                ticket,
                outcome,
            },
        );
    }

    /// Fetches the next filmography page if one is left and none is in flight.
    pub fn load_more_filmography(&mut self) {
        let Some(view) = self.person_detail.as_mut() else {
            return;
        };
        let ticket = self.filmography_ticket + 1;
        let Some(filters) = view
            .filmography
            .as_mut()
            .and_then(|films| films.begin_load_more(ticket))
        else {
            return;
        };
        self.filmography_ticket = ticket;
        let (kind, id) = (view.kind, view.detail.id);
        debug!(page = filters.page(), "loading more filmography");
        self.spawn_request(
            "filmography",
            move |client| client.list_movies(&filters),
            move |outcome| AppMessage::Filmography {
                kind,
                id,
                ticket,
                outcome,
            },
        );
    }

    fn fetch_poster(&self, url: String) {
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let outcome = client
                .fetch_bytes(&url)
                .map_err(|e| e.to_string())
                .and_then(|bytes| image::load_from_memory(&bytes).map_err(|e| e.to_string()));
            let _ = sender.send(AppMessage::Poster { url, outcome });
        });
    }

    /// Starts the poster download for a detail screen when posters are on.
    fn request_poster(&mut self, url: Option<String>, poster_of: PosterOwner) {
        let Some(url) = url.filter(|url| !url.trim().is_empty()) else {
            return;
        };
        if !self.config.posters_enabled() || self.picker.is_none() {
            return;
        }
        let poster = match poster_of {
            PosterOwner::Movie => self.movie_detail.as_mut().map(|view| &mut view.poster),
            PosterOwner::Person => self.person_detail.as_mut().map(|view| &mut view.poster),
        };
        let Some(poster) = poster else {
            return;
        };
        *poster = PosterState {
            url: Some(url.clone()),
            loading: true,
            ..PosterState::default()
        };
        self.fetch_poster(url);
    }

    /// Applies one worker result to the state it belongs to.
    pub fn handle_message(&mut self, message: AppMessage, now: Instant) {
        match message {
            AppMessage::Movies(ticket, outcome) => {
                let applied = settle(&mut self.store.movies, ticket, outcome);
                if let Some(result) = applied {
                    self.after_list_settled(result);
                    let meta = self.store.movies.pagination;
                    let len = self.store.movies.items.len();
                    reset_list_cursor(
                        &mut self.movies_view.list_state,
                        &mut self.movies_view.pager_cursor,
                        len,
                        meta,
                    );
                }
            }
            AppMessage::People(kind, ticket, outcome) => {
                let applied = settle(self.people_store(kind), ticket, outcome);
                if let Some(result) = applied {
                    self.after_list_settled(result);
                    let state = match kind {
                        PersonKind::Actor => &self.store.actors,
                        PersonKind::Director => &self.store.directors,
                    };
                    let (len, meta) = (state.items.len(), state.pagination);
                    let view = self.people_view_mut(kind);
                    reset_list_cursor(&mut view.list_state, &mut view.pager_cursor, len, meta);
                }
            }
            AppMessage::GenreOptions(ticket, outcome) => {
                if let Some(result) = settle(&mut self.store.genre_options, ticket, outcome) {
                    self.after_list_settled(result);
                    self.movies_view
                        .genre
                        .set_options(&self.store.genre_options.items);
                }
            }
            AppMessage::PersonOptions(kind, ticket, outcome) => {
                if let Some(result) = settle(self.option_store(kind), ticket, outcome) {
                    self.after_list_settled(result);
                    match kind {
                        PersonKind::Actor => self
                            .movies_view
                            .actor
                            .set_options(&self.store.actor_options.items),
                        PersonKind::Director => self
                            .movies_view
                            .director
                            .set_options(&self.store.director_options.items),
                    }
                }
            }
            AppMessage::Movie {
                id,
                ticket,
                outcome,
            } => {
                let Some(view) = self
                    .movie_detail
                    .as_mut()
                    .filter(|view| view.detail.id == id)
                else {
                    return;
                };
                match outcome {
                    Ok(movie) => {
                        let poster = movie.image_url.clone();
                        if view.detail.fetch_succeeded(ticket, movie) {
                            view.link_state.select(Some(0));
                            self.last_updated = Some(Local::now());
                            self.request_poster(poster, PosterOwner::Movie);
                        }
                    }
                    Err(failure) => {
                        let message = failure.message.clone();
                        if view.detail.fetch_failed(ticket, failure, now) {
                            self.toasts.show(message, ToastKind::Error);
                        }
                    }
                }
            }
            AppMessage::Person {
                kind,
                id,
                ticket,
                outcome,
            } => {
                let page_size = self.config.filmography_page_size;
                let Some(view) = self
                    .person_detail
                    .as_mut()
                    .filter(|view| view.kind == kind && view.detail.id == id)
                else {
                    return;
                };
                match outcome {
                    Ok(person) => {
                        let filmography = Filmography::new(kind.movie_filter(), &person, page_size);
                        let poster = person.image_url.clone();
                        if view.detail.fetch_succeeded(ticket, person) {
                            if !filmography.movies.is_empty() {
                                view.list_state.select(Some(0));
                            }
                            view.filmography = Some(filmography);
                            view.sentinel_visible = false;
                            self.last_updated = Some(Local::now());
                            self.request_poster(poster, PosterOwner::Person);
                        }
                    }
                    Err(failure) => {
                        let message = failure.message.clone();
                        if view.detail.fetch_failed(ticket, failure, now) {
                            self.toasts.show(message, ToastKind::Error);
                        }
                    }
                }
            }
            AppMessage::Filmography {
                kind,
                id,
                ticket,
                outcome,
            } => {
                let Some(films) = self
                    .person_detail
                    .as_mut()
                    .filter(|view| view.kind == kind && view.detail.id == id)
                    .and_then(|view| view.filmography.as_mut())
                else {
                    return;
                };
                match outcome {
                    Ok(page) => films.load_more_succeeded(ticket, page),
                    Err(failure) => {
                        films.load_more_failed(ticket);
                        self.toasts.show(failure.message, ToastKind::Error);
                    }
                }
            }
            AppMessage::Poster { url, outcome } => self.poster_loaded(url, outcome),
        }
    }

    fn poster_loaded(&mut self, url: String, outcome: Result<DynamicImage, String>) {
        let candidates = [
            self.movie_detail.as_mut().map(|view| &mut view.poster),
            self.person_detail.as_mut().map(|view| &mut view.poster),
        ];
        let Some(poster) = candidates
            .into_iter()
            .flatten()
            .find(|poster| poster.url.as_deref() == Some(url.as_str()))
        else {
            return;
        };
        poster.loading = false;
        match (outcome, self.picker.as_ref()) {
            (Ok(image), Some(picker)) => poster.protocol = Some(picker.new_resize_protocol(image)),
            (Ok(_), None) => poster.failed = true,
            (Err(error), _) => {
                debug!(%url, %error, "poster unavailable");
                poster.failed = true;
            }
        }
    }

    fn after_list_settled(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.last_updated = Some(Local::now()),
            Err(message) => {
                self.toasts.show(message, ToastKind::Error);
            }
        }
    }

    /// One turn of the event loop: drain worker results, expire toasts, run
    /// due redirects and grow the filmography when its end is on screen.
    pub fn tick(&mut self, now: Instant) {
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_message(message, now);
        }
        self.toasts.expire(now);

        if self.redirect_due(now) {
            let parent = self.current_screen.parent();
            info!(from = %self.current_screen.path(), to = %parent.path(), "not found, going back");
            self.toasts.show(
                format!("Returned to {}", parent.path()),
                ToastKind::Info,
            );
            if self.history.last() == Some(&parent) {
                self.history.pop();
            }
            self.enter(parent);
        }

        if self.current_screen == CurrentScreen::Movies {
            self.load_more_options_if_needed();
        }

        let wants_more = matches!(
            self.current_screen,
            CurrentScreen::ActorDetail(_) | CurrentScreen::DirectorDetail(_)
        ) && self
            .person_detail
            .as_ref()
            .is_some_and(|view| view.sentinel_visible);
        if wants_more {
            self.load_more_filmography();
        }

        if self.is_busy() {
            self.throbber.calc_next();
        }
    }

    fn redirect_due(&self, now: Instant) -> bool {
        match self.current_screen {
            CurrentScreen::MovieDetail(_) => self
                .movie_detail
                .as_ref()
                .is_some_and(|view| view.detail.redirect_due(now)),
            CurrentScreen::ActorDetail(_) | CurrentScreen::DirectorDetail(_) => self
                .person_detail
                .as_ref()
                .is_some_and(|view| view.detail.redirect_due(now)),
            _ => false,
        }
    }

    /// Whether the current screen waits on a request.
    pub fn is_busy(&self) -> bool {
        match self.current_screen {
            CurrentScreen::Movies => self.store.movies.is_loading(),
            CurrentScreen::Actors => self.store.actors.is_loading(),
            CurrentScreen::Directors => self.store.directors.is_loading(),
            CurrentScreen::MovieDetail(_) => self.movie_detail.as_ref().is_some_and(|view| {
                view.detail.status == FetchStatus::Loading
            }),
            CurrentScreen::ActorDetail(_) | CurrentScreen::DirectorDetail(_) => {
                self.person_detail.as_ref().is_some_and(|view| {
                    view.detail.status == FetchStatus::Loading
                        || view
                            .filmography
                            .as_ref()
                            .is_some_and(Filmography::is_loading_more)
                })
            }
            CurrentScreen::NotFound(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PosterOwner {
    Movie,
    Person,
}

/// Settles a container. `None` for stale tickets, otherwise `Ok` or the
/// failure message to surface.
fn settle<T>(
    state: &mut ResourceState<T>,
    ticket: Ticket,
    outcome: Outcome<Page<T>>,
) -> Option<Result<(), String>> {
    match outcome {
        Ok(page) => state.fetch_succeeded(ticket, page).then_some(Ok(())),
        Err(failure) => state
            .fetch_failed(ticket, failure.message.clone())
            .then_some(Err(failure.message)),
    }
}

/// Filters for the option page a container still needs, if any. A failed
/// continuation page is retried as is; a container with nothing in it starts
/// over from the first page.
fn options_to_load<T>(state: &ResourceState<T>, first_page: &FilterSet) -> Option<FilterSet> {
    match state.status {
        FetchStatus::Idle => Some(first_page.clone()),
        FetchStatus::Failed if state.items.is_empty() => Some(first_page.clone()),
        FetchStatus::Failed => Some(state.filters.clone()),
        FetchStatus::Loading | FetchStatus::Succeeded => None,
    }
}

fn progress<T>(state: &ResourceState<T>) -> (bool, bool) {
    (state.has_more(), state.is_loading())
}

fn reset_list_cursor(
    list_state: &mut ratatui::widgets::ListState,
    pager_cursor: &mut usize,
    len: usize,
    meta: Option<PaginationMeta>,
) {
    list_state.select(if len == 0 { None } else { Some(0) });
    *list_state.offset_mut() = 0;
    *pager_cursor = meta
        .and_then(|meta| PageWindow::new(meta.current_page, meta.total_pages))
        .map(|window| window.current_target_index())
        .unwrap_or(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_app() -> App {
        App::new(Config::default()).unwrap()
    }

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            release_year: Some(2000),
            rating: None,
            image_url: None,
            genres_info: Vec::new(),
            actors_info: Vec::new(),
            director_info: None,
        }
    }

    fn person(id: u64, movies: u64, count: u32) -> Person {
        Person {
            id,
            name: format!("Person {id}"),
            bio: None,
            date_of_birth: None,
            image_url: None,
            movies: (1..=movies).map(movie).collect(),
            movies_count: Some(count),
        }
    }

    fn page<T>(results: Vec<T>, current: u32, total: u32) -> Page<T> {
        Page::new(
            results,
            Some(PaginationMeta {
                current_page: current,
                total_pages: total,
                total_items: None,
                page_size: None,
            }),
        )
    }

    fn failure(code: Option<&str>) -> FetchFailure {
        FetchFailure {
            message: "Requested resource was not found".into(),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn stale_movies_response_is_dropped() {
        let mut app = test_app();
        let now = Instant::now();
        let old = app.store.movies.begin_fetch();
        let new = app.store.movies.begin_fetch();

        app.handle_message(AppMessage::Movies(new, Ok(page(vec![movie(2)], 1, 1))), now);
        app.handle_message(AppMessage::Movies(old, Ok(page(vec![movie(1)], 1, 1))), now);

        assert_eq!(app.store.movies.items[0].id, 2);
        assert_eq!(app.movies_view.list_state.selected(), Some(0));
    }

    #[test]
    fn list_failure_raises_a_toast_and_keeps_items() {
        let mut app = test_app();
        let now = Instant::now();
        let ticket = app.store.movies.begin_fetch();
        app.handle_message(AppMessage::Movies(ticket, Ok(page(vec![movie(1)], 1, 2))), now);

        let ticket = app.store.movies.begin_fetch();
        app.handle_message(AppMessage::Movies(ticket, Err(failure(None))), now);

        assert_eq!(app.store.movies.status, FetchStatus::Failed);
        assert_eq!(app.store.movies.items.len(), 1);
        assert_eq!(app.toasts.iter().count(), 1);
    }

    #[test]
    fn option_pages_accumulate_in_the_select() {
        let mut app = test_app();
        let now = Instant::now();
        let genres = |ids: std::ops::RangeInclusive<u64>| {
            ids.map(|id| Genre {
                id,
                name: format!("Genre {id}"),
            })
            .collect::<Vec<_>>()
        };

        let ticket = app.store.genre_options.begin_fetch();
        app.handle_message(AppMessage::GenreOptions(ticket, Ok(page(genres(1..=20), 1, 2))), now);
        let ticket = app.store.genre_options.begin_fetch();
        app.handle_message(AppMessage::GenreOptions(ticket, Ok(page(genres(21..=25), 2, 2))), now);

        assert_eq!(app.store.genre_options.items.len(), 25);
        assert_eq!(app.movies_view.genre.filtered().len(), 25);
        assert!(!app.store.genre_options.has_more());
    }

    #[test]
    fn not_found_detail_redirects_to_parent_list() {
        let mut app = test_app();
        let now = Instant::now();
        app.current_screen = CurrentScreen::DirectorDetail(9);
        let mut view = PersonDetailView::new(PersonKind::Director, 9);
        let ticket = view.detail.begin_fetch();
        app.person_detail = Some(view);

        app.handle_message(
            AppMessage::Person {
                kind: PersonKind::Director,
                id: 9,
                ticket,
                outcome: Err(failure(Some("NOT_FOUND"))),
            },
            now,
        );
        assert_eq!(app.toasts.iter().count(), 1);

        app.tick(now + Duration::from_millis(2000));
        assert_eq!(app.current_screen, CurrentScreen::DirectorDetail(9));

        app.tick(now + NOT_FOUND_REDIRECT_DELAY);
        assert_eq!(app.current_screen, CurrentScreen::Directors);
    }

    #[test]
    fn person_detail_seeds_the_filmography() {
        let mut app = test_app();
        let now = Instant::now();
        app.current_screen = CurrentScreen::DirectorDetail(4);
        let mut view = PersonDetailView::new(PersonKind::Director, 4);
        let ticket = view.detail.begin_fetch();
        app.person_detail = Some(view);

        app.handle_message(
            AppMessage::Person {
                kind: PersonKind::Director,
                id: 4,
                ticket,
                outcome: Ok(person(4, 12, 20)),
            },
            now,
        );

        let view = app.person_detail.as_ref().unwrap();
        let films = view.filmography.as_ref().unwrap();
        assert_eq!(films.movies.len(), 12);
        assert!(films.has_more());
        assert_eq!(view.list_state.selected(), Some(0));
    }

    #[test]
    fn response_for_another_person_is_ignored() {
        let mut app = test_app();
        let now = Instant::now();
        let mut view = PersonDetailView::new(PersonKind::Actor, 1);
        let ticket = view.detail.begin_fetch();
        app.person_detail = Some(view);

        app.handle_message(
            AppMessage::Person {
                kind: PersonKind::Director,
                id: 1,
                ticket,
                outcome: Ok(person(1, 0, 0)),
            },
            now,
        );

        let view = app.person_detail.as_ref().unwrap();
        assert_eq!(view.detail.status, FetchStatus::Loading);
    }

    #[test]
    fn filmography_failure_toasts_and_stops() {
        let mut app = test_app();
        let now = Instant::now();
        let mut view = PersonDetailView::new(PersonKind::Director, 4);
        view.filmography = Some(Filmography::new("director", &person(4, 12, 30), 12));
        app.person_detail = Some(view);
        app.load_more_filmography();
        let ticket = app.filmography_ticket;

        app.handle_message(
            AppMessage::Filmography {
                kind: PersonKind::Director,
                id: 4,
                ticket,
                outcome: Err(failure(None)),
            },
            now,
        );

        let films = app.person_detail.as_ref().unwrap().filmography.as_ref().unwrap();
        assert!(!films.has_more());
        assert_eq!(app.toasts.iter().count(), 1);
    }

    #[test]
    fn back_uses_history_then_parent() {
        let mut app = test_app();
        app.current_screen = CurrentScreen::Actors;
        app.history.push(CurrentScreen::Movies);

        app.go_back();
        assert_eq!(app.current_screen, CurrentScreen::Movies);

        app.current_screen = CurrentScreen::ActorDetail(3);
        app.go_back();
        assert_eq!(app.current_screen, CurrentScreen::Actors);
    }

    #[test]
    fn filmography_page_from_before_a_retry_is_ignored() {
        let mut app = test_app();
        let now = Instant::now();
        let mut view = PersonDetailView::new(PersonKind::Director, 4);
        view.filmography = Some(Filmography::new("director", &person(4, 12, 30), 12));
        app.person_detail = Some(view);
        app.load_more_filmography();
        let early = app.filmography_ticket;

        // Retry: the detail comes back and the filmography is seeded again.
        let view = app.person_detail.as_mut().unwrap();
        view.filmography = Some(Filmography::new("director", &person(4, 12, 30), 12));
        app.load_more_filmography();

        let late_page = page((13..=24).map(movie).collect(), 2, 3);
        app.handle_message(
            AppMessage::Filmography {
                kind: PersonKind::Director,
                id: 4,
                ticket: early,
                outcome: Ok(late_page),
            },
            now,
        );

        let films = app.person_detail.as_ref().unwrap().filmography.as_ref().unwrap();
        assert_eq!(films.movies.len(), 12);
        assert!(films.is_loading_more());
    }

    #[test]
    fn failed_options_reload_on_retry() {
        let mut app = test_app();
        let now = Instant::now();
        let ticket = app.store.genre_options.begin_fetch();
        app.handle_message(AppMessage::GenreOptions(ticket, Err(failure(None))), now);
        assert_eq!(app.store.genre_options.status, FetchStatus::Failed);

        app.current_screen = CurrentScreen::Movies;
        app.retry();

        assert!(app.store.genre_options.is_loading());
        assert_eq!(app.store.genre_options.filters.page(), 1);
    }

    #[test]
    fn failed_continuation_page_is_requested_again() {
        let mut app = test_app();
        let now = Instant::now();
        let genres = vec![Genre {
            id: 1,
            name: "Drama".into(),
        }];
        let ticket = app.store.genre_options.begin_fetch();
        app.handle_message(AppMessage::GenreOptions(ticket, Ok(page(genres, 1, 3))), now);
        app.load_more_options("genre");
        let ticket = app.store.genre_options.begin_fetch();
        app.handle_message(AppMessage::GenreOptions(ticket, Err(failure(None))), now);

        app.current_screen = CurrentScreen::Actors;
        app.navigate(CurrentScreen::Movies);

        assert!(app.store.genre_options.is_loading());
        assert_eq!(app.store.genre_options.filters.page(), 2);
        assert_eq!(app.store.genre_options.items.len(), 1);
    }

    #[test]
    fn redirect_pops_the_list_it_returns_to() {
        let mut app = test_app();
        let now = Instant::now();
        app.current_screen = CurrentScreen::ActorDetail(5);
        app.history.push(CurrentScreen::Actors);
        let mut view = PersonDetailView::new(PersonKind::Actor, 5);
        let ticket = view.detail.begin_fetch();
        app.person_detail = Some(view);

        app.handle_message(
            AppMessage::Person {
                kind: PersonKind::Actor,
                id: 5,
                ticket,
                outcome: Err(failure(Some("NOT_FOUND"))),
            },
            now,
        );
        app.tick(now + NOT_FOUND_REDIRECT_DELAY);
        assert_eq!(app.current_screen, CurrentScreen::Actors);
        assert!(app.history.is_empty());

        app.go_back();
        assert_eq!(app.current_screen, CurrentScreen::Movies);
    }

    #[test]
    fn history_is_capped() {
        let mut app = test_app();
        for _ in 0..HISTORY_LIMIT {
            app.navigate(CurrentScreen::NotFound("/a".into()));
            app.navigate(CurrentScreen::NotFound("/b".into()));
        }
        assert_eq!(app.history.len(), HISTORY_LIMIT);
    }

    #[test]
    fn filter_change_resets_page_and_fetches() {
        let mut app = test_app();
        app.movies_view.filters.set_page(3);

        app.apply_movie_filter("title", "Alien".into());

        assert_eq!(app.movies_view.filters.page(), 1);
        assert_eq!(app.store.movies.filters.get("title"), Some("Alien"));
        assert!(app.store.movies.is_loading());
    }
}
