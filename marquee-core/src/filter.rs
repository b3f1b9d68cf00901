use async_trait::async_trait;
use thiserror::Error;

use crate::{FilterCriteria, Movie, ProviderError};

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("No actor/director found with the name {0}")]
    PersonNotFound(String),

    #[error("Genre {0} not found")]
    GenreNotFound(String),

    #[error("No movies found with the given filters")]
    NoResults,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Represents a way of turning filter criteria into a list of matching movies
#[async_trait]
pub trait FilterStrategy {
    async fn filter(&self, criteria: &FilterCriteria) -> Result<Vec<Movie>, FilterError>;
}

/// Filters a list of movies that has already been fetched
pub struct LocalFilter<'a> {
    movies: &'a [Movie],
}

impl<'a> LocalFilter<'a> {
    pub fn new(movies: &'a [Movie]) -> Self {
        Self { movies }
    }
}

#[async_trait]
impl FilterStrategy for LocalFilter<'_> {
    async fn filter(&self, criteria: &FilterCriteria) -> Result<Vec<Movie>, FilterError> {
        Ok(apply_filters(self.movies, criteria))
    }
}

/// Returns the movies matching every non-blank field of the criteria
pub fn apply_filters(movies: &[Movie], criteria: &FilterCriteria) -> Vec<Movie> {
    movies
        .iter()
        .filter(|m| matches(m, criteria))
        .cloned()
        .collect()
}

/// Returns true if the movie satisfies every non-blank field of the criteria
pub fn matches(movie: &Movie, criteria: &FilterCriteria) -> bool {
    let director_ok = criteria
        .actor_director()
        .map_or(true, |name| matches_director(movie, name));

    let year_ok = criteria
        .year()
        .map_or(true, |year| matches_year(movie, year));

    let genre_ok = criteria
        .genre()
        .map_or(true, |genre| matches_genre(movie, genre));

    director_ok && year_ok && genre_ok && matches_rating(movie, criteria)
}

fn matches_director(movie: &Movie, name: &str) -> bool {
    let name = name.to_lowercase();

    movie
        .directors()
        .any(|d| d.name.to_lowercase().contains(&name))
}

fn matches_year(movie: &Movie, year: &str) -> bool {
    movie.release_date().map_or(false, |d| d.starts_with(year))
}

// Only resolved genre names can be matched, bare ids never pass
fn matches_genre(movie: &Movie, genre: &str) -> bool {
    let genre = genre.to_lowercase();

    movie
        .genres
        .iter()
        .any(|g| g.name.to_lowercase().contains(&genre))
}

/// Keeps movies rated at or above the threshold. Unrated movies are excluded
/// whenever a threshold is set.
pub fn matches_rating(movie: &Movie, criteria: &FilterCriteria) -> bool {
    match criteria.min_rating() {
        Some(threshold) => movie.rating().map_or(false, |r| r >= threshold),
        None => true,
    }
}
