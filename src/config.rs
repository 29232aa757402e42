use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::CurrentScreen;

/// Terminal browser for a movie catalog REST API
#[derive(Parser, Debug, Clone)]
#[command(name = "movie_explorer", version)]
pub struct Config {
    /// Base URL of the catalog API
    #[arg(
        long,
        env = "MOVIE_EXPLORER_API_URL",
        default_value = "http://127.0.0.1:8000/api"
    )]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Options fetched per page by the genre/actor/director selects
    #[arg(long, default_value_t = 20)]
    pub option_page_size: u32,

    /// Movies fetched per page when a filmography grows
    #[arg(long, default_value_t = 12)]
    pub filmography_page_size: u32,

    /// Log filter directive, e.g. `debug` or `movie_explorer=trace`
    #[arg(long, env = "MOVIE_EXPLORER_LOG", default_value = "info")]
    pub log_level: String,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Do not download poster images
    #[arg(long, default_value_t = false)]
    pub no_posters: bool,

    /// Screen to open first, e.g. `/movies/3` or `/directors`
    #[arg(default_value = "/")]
    pub route: String,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn start_screen(&self) -> CurrentScreen {
        CurrentScreen::parse(&self.route)
    }

    pub fn posters_enabled(&self) -> bool {
        !self.no_posters
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["movie_explorer"])
    }
}
