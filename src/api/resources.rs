//! One list/get pair per backend resource.

use super::client::ApiClient;
use super::error::ApiError;
use super::models::{Genre, Movie, Page, Person};
use crate::store::FilterSet;

impl ApiClient {
    pub fn list_movies(&self, filters: &FilterSet) -> Result<Page<Movie>, ApiError> {
        self.get_json("/movies/", Some(filters))
    }

    pub fn get_movie(&self, id: u64) -> Result<Movie, ApiError> {
        self.get_json(&format!("/movies/{}/", id), None)
    }

    pub fn list_actors(&self, filters: &FilterSet) -> Result<Page<Person>, ApiError> {
        self.get_json("/actors/", Some(filters))
    }

    pub fn get_actor(&self, id: u64) -> Result<Person, ApiError> {
        self.get_json(&format!("/actors/{}/", id), None)
    }

    pub fn list_directors(&self, filters: &FilterSet) -> Result<Page<Person>, ApiError> {
        self.get_json("/directors/", Some(filters))
    }

    pub fn get_director(&self, id: u64) -> Result<Person, ApiError> {
        self.get_json(&format!("/directors/{}/", id), None)
    }

    pub fn list_genres(&self, filters: &FilterSet) -> Result<Page<Genre>, ApiError> {
        self.get_json("/genres/", Some(filters))
    }
}
