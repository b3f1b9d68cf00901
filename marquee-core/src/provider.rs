use async_trait::async_trait;
use thiserror::Error;

use crate::{
    Credits, DiscoveryQuery, Genre, Movie, MovieDetails, MovieId, Page, Person, Video,
};

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider could not be reached, or replied with something unexpected
    #[error("Movie provider is unavailable: {0}")]
    Unavailable(String),

    #[error("{resource}:{identifier} was not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },
}

/// Represents a source of movie data, such as a movie database API
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Returns the catalog of movie genres
    async fn genres(&self) -> ProviderResult<Vec<Genre>>;

    /// Returns a page of popular movies, ranked by the provider
    async fn popular(&self, page: u32) -> ProviderResult<Page<Movie>>;

    /// Searches movies by title
    async fn search(&self, query: &str, page: u32) -> ProviderResult<Page<Movie>>;

    /// Returns movies matching the given discovery parameters
    async fn discover(&self, query: &DiscoveryQuery) -> ProviderResult<Page<Movie>>;

    /// Searches people by name, best match first
    async fn search_person(&self, name: &str) -> ProviderResult<Vec<Person>>;

    async fn credits(&self, movie_id: MovieId) -> ProviderResult<Credits>;

    async fn details(&self, movie_id: MovieId) -> ProviderResult<MovieDetails>;

    async fn videos(&self, movie_id: MovieId) -> ProviderResult<Vec<Video>>;
}
