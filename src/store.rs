//! Client-side state of every resource, owned by the UI thread.

mod filters;
mod resource;

pub use filters::FilterSet;
pub use resource::{FetchStatus, ResourceState, Ticket};

use crate::api::{Genre, Movie, Person};

/// Every resource container of the application, created once at start.
///
/// The `*_options` containers feed the filter selects of the movies view and
/// grow page by page; the others back the page-numbered list views.
#[derive(Debug)]
pub struct Store {
    pub movies: ResourceState<Movie>,
    pub actors: ResourceState<Person>,
    pub directors: ResourceState<Person>,
    pub genre_options: ResourceState<Genre>,
    pub actor_options: ResourceState<Person>,
    pub director_options: ResourceState<Person>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            movies: ResourceState::paged(),
            actors: ResourceState::paged(),
            directors: ResourceState::paged(),
            genre_options: ResourceState::incremental(),
            actor_options: ResourceState::incremental(),
            director_options: ResourceState::incremental(),
        }
    }
}
