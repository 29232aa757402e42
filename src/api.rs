//! Access to the catalog REST API.

mod client;
pub mod error;
pub mod models;
mod resources;

pub use client::ApiClient;
pub use error::{ApiError, FetchFailure};
pub use models::{Genre, Movie, Named, Page, PaginationMeta, Person};
