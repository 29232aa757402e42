/// Which screen is on display. Mirrors the catalog's URL paths so a screen
/// can be opened from the command line or the `:` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentScreen {
    Movies,
    MovieDetail(u64),
    Actors,
    ActorDetail(u64),
    Directors,
    DirectorDetail(u64),
    NotFound(String),
}

impl CurrentScreen {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => CurrentScreen::Movies,
            ["movies", id] => id
                .parse()
                .map(CurrentScreen::MovieDetail)
                .unwrap_or_else(|_| CurrentScreen::NotFound(trimmed.to_string())),
            ["actors"] => CurrentScreen::Actors,
            ["actors", id] => id
                .parse()
                .map(CurrentScreen::ActorDetail)
                .unwrap_or_else(|_| CurrentScreen::NotFound(trimmed.to_string())),
            ["directors"] => CurrentScreen::Directors,
            ["directors", id] => id
                .parse()
                .map(CurrentScreen::DirectorDetail)
                .unwrap_or_else(|_| CurrentScreen::NotFound(trimmed.to_string())),
            _ => CurrentScreen::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            CurrentScreen::Movies => "/".to_string(),
            CurrentScreen::MovieDetail(id) => format!("/movies/{}", id),
            CurrentScreen::Actors => "/actors".to_string(),
            CurrentScreen::ActorDetail(id) => format!("/actors/{}", id),
            CurrentScreen::Directors => "/directors".to_string(),
            CurrentScreen::DirectorDetail(id) => format!("/directors/{}", id),
            CurrentScreen::NotFound(path) => path.clone(),
        }
    }

    /// List a detail screen belongs to; lists and the not-found page go home.
    pub fn parent(&self) -> CurrentScreen {
        match self {
            CurrentScreen::ActorDetail(_) => CurrentScreen::Actors,
            CurrentScreen::DirectorDetail(_) => CurrentScreen::Directors,
            _ => CurrentScreen::Movies,
        }
    }

    /// Navbar section this screen is highlighted under.
    pub fn section(&self) -> Option<Section> {
        match self {
            CurrentScreen::Movies | CurrentScreen::MovieDetail(_) => Some(Section::Movies),
            CurrentScreen::Actors | CurrentScreen::ActorDetail(_) => Some(Section::Actors),
            CurrentScreen::Directors | CurrentScreen::DirectorDetail(_) => {
                Some(Section::Directors)
            }
            CurrentScreen::NotFound(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Movies,
    Actors,
    Directors,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Movies, Section::Actors, Section::Directors];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Movies => "Movies",
            Section::Actors => "Actors",
            Section::Directors => "Directors",
        }
    }

    pub fn screen(&self) -> CurrentScreen {
        match self {
            Section::Movies => CurrentScreen::Movies,
            Section::Actors => CurrentScreen::Actors,
            Section::Directors => CurrentScreen::Directors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_round_trip() {
        for screen in [
            CurrentScreen::Movies,
            CurrentScreen::MovieDetail(3),
            CurrentScreen::Actors,
            CurrentScreen::ActorDetail(14),
            CurrentScreen::Directors,
            CurrentScreen::DirectorDetail(159),
        ] {
            assert_eq!(CurrentScreen::parse(&screen.path()), screen);
        }
    }

    #[test]
    fn trailing_slashes_are_accepted() {
        assert_eq!(CurrentScreen::parse("/movies/7/"), CurrentScreen::MovieDetail(7));
        assert_eq!(CurrentScreen::parse("actors/"), CurrentScreen::Actors);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(
            CurrentScreen::parse("/genres"),
            CurrentScreen::NotFound("/genres".to_string())
        );
        assert_eq!(
            CurrentScreen::parse("/movies/abc"),
            CurrentScreen::NotFound("/movies/abc".to_string())
        );
        assert!(matches!(
            CurrentScreen::parse("/movies/1/cast"),
            CurrentScreen::NotFound(_)
        ));
    }

    #[test]
    fn details_go_back_to_their_list() {
        assert_eq!(CurrentScreen::MovieDetail(1).parent(), CurrentScreen::Movies);
        assert_eq!(CurrentScreen::ActorDetail(1).parent(), CurrentScreen::Actors);
        assert_eq!(CurrentScreen::DirectorDetail(1).parent(), CurrentScreen::Directors);
    }
}
