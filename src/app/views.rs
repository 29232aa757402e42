use ratatui::widgets::ListState;
use ratatui_image::protocol::StatefulProtocol;

use super::detail::{DetailState, Filmography};
use super::select::InfiniteSelect;
use crate::api::{Movie, Person};
use crate::store::FilterSet;

/// Element of the movies screen that receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoviesFocus {
    Results,
    Pagination,
    Title,
    Genre,
    Actor,
    Director,
    Year,
}

impl MoviesFocus {
    const ORDER: [MoviesFocus; 7] = [
        MoviesFocus::Results,
        MoviesFocus::Pagination,
        MoviesFocus::Title,
        MoviesFocus::Genre,
        MoviesFocus::Actor,
        MoviesFocus::Director,
        MoviesFocus::Year,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ORDER, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ORDER, self, Self::ORDER.len() - 1)
    }

    pub fn is_text_input(self) -> bool {
        matches!(self, MoviesFocus::Title | MoviesFocus::Year)
    }
}

/// Element of the actors/directors screens that receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeopleFocus {
    Results,
    Pagination,
    Search,
}

impl PeopleFocus {
    const ORDER: [PeopleFocus; 3] = [
        PeopleFocus::Results,
        PeopleFocus::Pagination,
        PeopleFocus::Search,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ORDER, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ORDER, self, Self::ORDER.len() - 1)
    }
}

fn cycle<T: Copy + PartialEq>(order: &[T], current: T, step: usize) -> T {
    let index = order.iter().position(|f| *f == current).unwrap_or(0);
    order[(index + step) % order.len()]
}

/// Local state of the movies list: filter inputs and the three selects.
pub struct MoviesListView {
    pub focus: MoviesFocus,
    pub filters: FilterSet,
    pub genre: InfiniteSelect,
    pub actor: InfiniteSelect,
    pub director: InfiniteSelect,
    pub list_state: ListState,
    pub pager_cursor: usize,
}

impl MoviesListView {
    pub fn new() -> Self {
        Self {
            focus: MoviesFocus::Results,
            filters: FilterSet::new(),
            genre: InfiniteSelect::new("genre", "All Genres"),
            actor: InfiniteSelect::new("actor", "All Actors"),
            director: InfiniteSelect::new("director", "All Directors"),
            list_state: ListState::default(),
            pager_cursor: 0,
        }
    }

    pub fn focused_select(&mut self) -> Option<&mut InfiniteSelect> {
        match self.focus {
            MoviesFocus::Genre => Some(&mut self.genre),
            MoviesFocus::Actor => Some(&mut self.actor),
            MoviesFocus::Director => Some(&mut self.director),
            _ => None,
        }
    }

    pub fn open_select(&self) -> Option<&InfiniteSelect> {
        [&self.genre, &self.actor, &self.director]
            .into_iter()
            .find(|select| select.is_open())
    }

    /// Moving focus away counts as clicking outside the dropdowns.
    pub fn set_focus(&mut self, focus: MoviesFocus) {
        self.genre.close();
        self.actor.close();
        self.director.close();
        self.focus = focus;
    }

    /// Whether typed characters belong to an input rather than to shortcuts.
    pub fn captures_text(&self) -> bool {
        self.focus.is_text_input() || self.open_select().is_some()
    }

    pub fn text_field(&self) -> Option<&'static str> {
        match self.focus {
            MoviesFocus::Title => Some("title"),
            MoviesFocus::Year => Some("release_year"),
            _ => None,
        }
    }
}

impl Default for MoviesListView {
    fn default() -> Self {
        Self::new()
    }
}

/// Local state of the actors or directors list.
pub struct PeopleListView {
    pub focus: PeopleFocus,
    pub filters: FilterSet,
    pub list_state: ListState,
    pub pager_cursor: usize,
}

impl PeopleListView {
    pub fn new() -> Self {
        Self {
            focus: PeopleFocus::Results,
            filters: FilterSet::new(),
            list_state: ListState::default(),
            pager_cursor: 0,
        }
    }

    pub fn captures_text(&self) -> bool {
        self.focus == PeopleFocus::Search
    }
}

impl Default for PeopleListView {
    fn default() -> Self {
        Self::new()
    }
}

/// Poster or portrait of the entity on a detail screen.
#[derive(Default)]
pub struct PosterState {
    pub url: Option<String>,
    pub protocol: Option<StatefulProtocol>,
    pub loading: bool,
    pub failed: bool,
}

/// A cross-link on the movie detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieLink {
    Director { id: u64, name: String },
    Actor {
        id: u64,
        name: String,
        character: Option<String>,
    },
}

pub struct MovieDetailView {
    pub detail: DetailState<Movie>,
    pub link_state: ListState,
    pub poster: PosterState,
}

impl MovieDetailView {
    pub fn new(id: u64) -> Self {
        Self {
            detail: DetailState::new(id),
            link_state: ListState::default(),
            poster: PosterState::default(),
        }
    }

    /// Director first, then the cast in billing order.
    pub fn links(&self) -> Vec<MovieLink> {
        let Some(movie) = &self.detail.entity else {
            return Vec::new();
        };
        movie
            .director_info
            .iter()
            .map(|director| MovieLink::Director {
                id: director.id,
                name: director.name.clone(),
            })
            .chain(movie.actors_info.iter().map(|cast| MovieLink::Actor {
                id: cast.person.id,
                name: cast.person.name.clone(),
                character: cast.character_name.clone(),
            }))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonKind {
    Actor,
    Director,
}

impl PersonKind {
    /// Movie filter that matches this person's films.
    pub fn movie_filter(&self) -> &'static str {
        match self {
            PersonKind::Actor => "actor",
            PersonKind::Director => "director",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PersonKind::Actor => "Actor",
            PersonKind::Director => "Director",
        }
    }
}

pub struct PersonDetailView {
    pub kind: PersonKind,
    pub detail: DetailState<Person>,
    pub filmography: Option<Filmography>,
    pub list_state: ListState,
    /// Set by the renderer when the row after the last movie is on screen.
    pub sentinel_visible: bool,
    pub poster: PosterState,
}

impl PersonDetailView {
    pub fn new(kind: PersonKind, id: u64) -> Self {
        Self {
            kind,
            detail: DetailState::new(id),
            filmography: None,
            list_state: ListState::default(),
            sentinel_visible: false,
            poster: PosterState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::CastMember;

    fn person(id: u64, name: &str) -> Person {
        Person {
            id,
            name: name.to_string(),
            bio: None,
            date_of_birth: None,
            image_url: None,
            movies: Vec::new(),
            movies_count: None,
        }
    }

    #[test]
    fn focus_cycles_both_ways() {
        assert_eq!(MoviesFocus::Year.next(), MoviesFocus::Results);
        assert_eq!(MoviesFocus::Results.previous(), MoviesFocus::Year);
        assert_eq!(PeopleFocus::Search.next(), PeopleFocus::Results);
    }

    #[test]
    fn leaving_a_select_closes_it() {
        let mut view = MoviesListView::new();
        view.set_focus(MoviesFocus::Genre);
        view.focused_select().unwrap().open();
        assert!(view.captures_text());

        view.set_focus(MoviesFocus::Results);

        assert!(!view.genre.is_open());
        assert!(!view.captures_text());
    }

    #[test]
    fn movie_links_put_director_first() {
        let mut view = MovieDetailView::new(1);
        view.detail.entity = Some(Movie {
            id: 1,
            title: "Chinatown".into(),
            release_year: Some(1974),
            rating: None,
            image_url: None,
            genres_info: Vec::new(),
            actors_info: vec![CastMember {
                person: person(3, "Jack Nicholson"),
                character_name: Some("J.J. Gittes".into()),
            }],
            director_info: Some(person(2, "Roman Polanski")),
        });

        let links = view.links();

        assert_eq!(
            links,
            vec![
                MovieLink::Director {
                    id: 2,
                    name: "Roman Polanski".into()
                },
                MovieLink::Actor {
                    id: 3,
                    name: "Jack Nicholson".into(),
                    character: Some("J.J. Gittes".into())
                },
            ]
        );
    }
}
