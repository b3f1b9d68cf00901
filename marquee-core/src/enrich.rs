use futures_util::future::join_all;
use log::warn;

use crate::{Genre, GenreId, Movie, MovieProvider};

/// The provider's list of genres, used to resolve genre ids to names and back
#[derive(Debug, Clone, Default)]
pub struct GenreCatalog {
    genres: Vec<Genre>,
}

impl GenreCatalog {
    pub fn new(genres: Vec<Genre>) -> Self {
        Self { genres }
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn by_id(&self, id: GenreId) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == id)
    }

    /// Finds a genre whose name equals the given name, ignoring case and surrounding whitespace
    pub fn by_name(&self, name: &str) -> Option<&Genre> {
        let name = name.trim().to_lowercase();
        self.genres.iter().find(|g| g.name.to_lowercase() == name)
    }

    /// Fills in `genres` from `genre_ids`, dropping ids the catalog doesn't know.
    /// Movies without ids, or an empty catalog, leave the movie untouched.
    pub fn resolve(&self, mut movie: Movie) -> Movie {
        if movie.genre_ids.is_empty() || self.is_empty() {
            return movie;
        }

        movie.genres = movie
            .genre_ids
            .iter()
            .filter_map(|id| self.by_id(*id))
            .cloned()
            .collect();

        movie
    }

    pub fn resolve_all(&self, movies: Vec<Movie>) -> Vec<Movie> {
        movies.into_iter().map(|m| self.resolve(m)).collect()
    }
}

/// Fetches the credits of every movie concurrently and waits for all of them.
/// A failed lookup leaves that movie without credits.
pub async fn attach_credits<P>(provider: &P, movies: Vec<Movie>) -> Vec<Movie>
where
    P: MovieProvider + ?Sized,
{
    let lookups = movies.into_iter().map(|mut movie| async move {
        match provider.credits(movie.id).await {
            Ok(credits) => movie.credits = Some(credits),
            Err(e) => warn!("Could not fetch credits of movie #{}: {}", movie.id, e),
        }

        movie
    });

    join_all(lookups).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{movie, FakeProvider};

    fn catalog() -> GenreCatalog {
        GenreCatalog::new(vec![
            Genre {
                id: 28,
                name: "Action".to_string(),
            },
            Genre {
                id: 878,
                name: "Science Fiction".to_string(),
            },
        ])
    }

    #[test]
    fn test_resolve_genres() {
        let mut matrix = movie(603);
        matrix.genre_ids = vec![28, 878, 9999];

        let resolved = catalog().resolve(matrix);
        let names: Vec<_> = resolved.genres.iter().map(|g| g.name.as_str()).collect();

        assert_eq!(names, vec!["Action", "Science Fiction"]);
    }

    #[test]
    fn test_resolve_with_empty_catalog() {
        let mut matrix = movie(603);
        matrix.genre_ids = vec![28];

        let resolved = GenreCatalog::default().resolve(matrix.clone());

        assert_eq!(resolved, matrix);
    }

    #[test]
    fn test_by_name() {
        let catalog = catalog();

        assert_eq!(catalog.by_name(" science fiction ").map(|g| g.id), Some(878));
        assert_eq!(catalog.by_name("science"), None);
    }

    #[tokio::test]
    async fn test_attach_credits() {
        let provider = FakeProvider::default()
            .with_director(1, "Christopher Nolan")
            .failing_credits(2);

        let movies = attach_credits(&provider, vec![movie(1), movie(2), movie(3)]).await;

        assert_eq!(movies.len(), 3);
        assert_eq!(
            movies[0].directors().next().map(|d| d.name.as_str()),
            Some("Christopher Nolan")
        );
        assert_eq!(movies[1].credits, None);
        assert_eq!(movies[2].credits, Some(Default::default()));
    }
}
