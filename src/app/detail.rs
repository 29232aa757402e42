use std::time::{Duration, Instant};

use crate::api::{FetchFailure, Movie, Page, Person};
use crate::store::{FetchStatus, FilterSet, Ticket};

/// How long a "not found" detail screen stays up before going back.
pub const NOT_FOUND_REDIRECT_DELAY: Duration = Duration::from_millis(3000);

/// A single entity fetched by id.
#[derive(Debug, Clone)]
pub struct DetailState<T> {
    pub id: u64,
    pub status: FetchStatus,
    pub entity: Option<T>,
    pub error: Option<FetchFailure>,
    pub redirect_at: Option<Instant>,
    latest: Ticket,
}

impl<T> DetailState<T> {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            status: FetchStatus::Idle,
            entity: None,
            error: None,
            redirect_at: None,
            latest: 0,
        }
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.latest += 1;
        self.status = FetchStatus::Loading;
        self.error = None;
        self.redirect_at = None;
        self.latest
    }

    pub fn fetch_succeeded(&mut self, ticket: Ticket, entity: T) -> bool {
        if ticket != self.latest {
            return false;
        }
        self.entity = Some(entity);
        self.status = FetchStatus::Succeeded;
        true
    }

    /// Stores the failure; a `NOT_FOUND` code schedules the way back.
    pub fn fetch_failed(&mut self, ticket: Ticket, failure: FetchFailure, now: Instant) -> bool {
        if ticket != self.latest {
            return false;
        }
        if failure.is_not_found() {
            self.redirect_at = Some(now + NOT_FOUND_REDIRECT_DELAY);
        }
        self.error = Some(failure);
        self.status = FetchStatus::Failed;
        true
    }

    pub fn redirect_due(&self, now: Instant) -> bool {
        self.redirect_at.is_some_and(|at| now >= at)
    }
}

/// A person's movies, seeded from the detail response and extended through
/// the movies endpoint once the end of the list comes into view.
#[derive(Debug, Clone)]
pub struct Filmography {
    /// Movie filter the person is matched on (`director` or `actor`).
    field: &'static str,
    person: String,
    pub movies: Vec<Movie>,
    page: u32,
    page_size: u32,
    has_more: bool,
    loading_more: bool,
    latest: Ticket,
}

impl Filmography {
    pub fn new(field: &'static str, person: &Person, page_size: u32) -> Self {
        Self {
            field,
            person: person.name.clone(),
            movies: person.movies.clone(),
            page: 1,
            page_size,
            has_more: person.has_more_movies(),
            loading_more: false,
            latest: 0,
        }
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Starts the next page under `ticket` unless one is in flight or none is
    /// left. `ticket` must come from a counter that outlives this filmography.
    pub fn begin_load_more(&mut self, ticket: Ticket) -> Option<FilterSet> {
        if self.loading_more || !self.has_more {
            return None;
        }
        self.loading_more = true;
        self.latest = ticket;
        let filters = FilterSet::new()
            .with(self.field, self.person.clone())
            .with("page_size", self.page_size.to_string())
            .with("ordering", "-release_year")
            .with_page(self.page + 1);
        Some(filters)
    }

    pub fn load_more_succeeded(&mut self, ticket: Ticket, page: Page<Movie>) {
        if ticket != self.latest {
            return;
        }
        self.loading_more = false;
        if page.results.is_empty() {
            self.has_more = false;
            return;
        }
        self.movies.extend(page.results);
        self.page += 1;
        self.has_more = page.pagination.is_some_and(|meta| meta.has_next());
    }

    pub fn load_more_failed(&mut self, ticket: Ticket) {
        if ticket != self.latest {
            return;
        }
        self.loading_more = false;
        self.has_more = false;
    }
}

/// The sentinel row sits right after the last movie. It counts as visible
/// once the last movie is inside the rendered window.
pub fn sentinel_visible(offset: usize, viewport_rows: usize, item_count: usize) -> bool {
    offset <= item_count && item_count <= offset + viewport_rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PaginationMeta;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            release_year: None,
            rating: None,
            image_url: None,
            genres_info: Vec::new(),
            actors_info: Vec::new(),
            director_info: None,
        }
    }

    fn director(embedded: u64, count: u32) -> Person {
        Person {
            id: 1,
            name: "Agnès Varda".to_string(),
            bio: None,
            date_of_birth: None,
            image_url: None,
            movies: (1..=embedded).map(movie).collect(),
            movies_count: Some(count),
        }
    }

    fn page(ids: std::ops::RangeInclusive<u64>, current: u32, total: u32) -> Page<Movie> {
        Page::new(
            ids.map(movie).collect(),
            Some(PaginationMeta {
                current_page: current,
                total_pages: total,
                total_items: None,
                page_size: None,
            }),
        )
    }

    #[test]
    fn not_found_schedules_redirect() {
        let now = Instant::now();
        let mut state: DetailState<Movie> = DetailState::new(42);
        let ticket = state.begin_fetch();
        state.fetch_failed(
            ticket,
            FetchFailure {
                message: "Requested resource was not found".into(),
                code: Some("NOT_FOUND".into()),
            },
            now,
        );

        assert_eq!(state.status, FetchStatus::Failed);
        assert!(!state.redirect_due(now + Duration::from_millis(2999)));
        assert!(state.redirect_due(now + NOT_FOUND_REDIRECT_DELAY));
    }

    #[test]
    fn other_failures_do_not_redirect() {
        let now = Instant::now();
        let mut state: DetailState<Movie> = DetailState::new(1);
        let ticket = state.begin_fetch();
        state.fetch_failed(
            ticket,
            FetchFailure {
                message: "Network Error".into(),
                code: None,
            },
            now,
        );
        assert_eq!(state.redirect_at, None);
    }

    #[test]
    fn retry_cancels_pending_redirect() {
        let now = Instant::now();
        let mut state: DetailState<Movie> = DetailState::new(1);
        let ticket = state.begin_fetch();
        state.fetch_failed(
            ticket,
            FetchFailure {
                message: "gone".into(),
                code: Some("NOT_FOUND".into()),
            },
            now,
        );
        let ticket = state.begin_fetch();
        assert!(state.fetch_succeeded(ticket, movie(1)));
        assert_eq!(state.redirect_at, None);
        assert_eq!(state.error, None);
    }

    #[test]
    fn stale_detail_response_is_ignored() {
        let mut state: DetailState<Movie> = DetailState::new(1);
        let old = state.begin_fetch();
        let new = state.begin_fetch();
        assert!(!state.fetch_succeeded(old, movie(1)));
        assert_eq!(state.status, FetchStatus::Loading);
        assert!(state.fetch_succeeded(new, movie(2)));
        assert_eq!(state.entity.unwrap().id, 2);
    }

    #[test]
    fn filmography_requests_next_page() {
        let mut films = Filmography::new("director", &director(12, 30), 12);
        assert!(films.has_more());

        let filters = films.begin_load_more(1).unwrap();
        assert_eq!(filters.page(), 2);
        assert_eq!(filters.get("director"), Some("Agnès Varda"));
        assert_eq!(filters.get("page_size"), Some("12"));
        assert_eq!(filters.get("ordering"), Some("-release_year"));
    }

    #[test]
    fn filmography_load_is_gated_while_in_flight() {
        let mut films = Filmography::new("director", &director(12, 30), 12);
        assert!(films.begin_load_more(1).is_some());
        assert!(films.begin_load_more(2).is_none());
    }

    #[test]
    fn filmography_appends_and_tracks_remaining_pages() {
        let mut films = Filmography::new("director", &director(12, 30), 12);
        films.begin_load_more(1).unwrap();
        films.load_more_succeeded(1, page(13..=24, 2, 3));
        assert_eq!(films.movies.len(), 24);
        assert!(films.has_more());

        let filters = films.begin_load_more(2).unwrap();
        assert_eq!(filters.page(), 3);
        films.load_more_succeeded(2, page(25..=30, 3, 3));
        assert_eq!(films.movies.len(), 30);
        assert!(!films.has_more());
        assert!(films.begin_load_more(3).is_none());
    }

    #[test]
    fn empty_page_stops_loading() {
        let mut films = Filmography::new("actor", &director(12, 30), 12);
        films.begin_load_more(1).unwrap();
        films.load_more_succeeded(1, Page::new(Vec::new(), None));
        assert!(!films.has_more());
        assert!(!films.is_loading_more());
    }

    #[test]
    fn failure_stops_loading() {
        let mut films = Filmography::new("director", &director(12, 30), 12);
        films.begin_load_more(1).unwrap();
        films.load_more_failed(1);
        assert!(!films.has_more());
        assert!(!films.is_loading_more());
    }

    #[test]
    fn page_for_an_earlier_ticket_is_ignored() {
        let mut films = Filmography::new("director", &director(12, 30), 12);
        films.begin_load_more(7).unwrap();
        films.load_more_succeeded(1, page(13..=24, 2, 3));
        assert_eq!(films.movies.len(), 12);
        assert!(films.is_loading_more());

        films.load_more_succeeded(7, page(13..=24, 2, 3));
        assert_eq!(films.movies.len(), 24);
    }

    #[test]
    fn complete_filmography_has_nothing_to_load() {
        let films = Filmography::new("director", &director(3, 3), 12);
        assert!(!films.has_more());
    }

    #[test]
    fn sentinel_visibility() {
        assert!(sentinel_visible(0, 10, 5));
        assert!(sentinel_visible(0, 10, 10));
        assert!(sentinel_visible(2, 10, 12));
        assert!(!sentinel_visible(1, 10, 12));
        assert!(!sentinel_visible(0, 5, 12));
    }
}
