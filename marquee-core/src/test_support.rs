use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    Credits, CrewMember, DiscoveryQuery, Genre, Movie, MovieDetails, MovieId, MovieProvider,
    Page, Person, ProviderError, ProviderResult, Video, DIRECTOR_JOB,
};

/// Returns a bare movie with nothing but an id and a title
pub fn movie(id: MovieId) -> Movie {
    Movie {
        id,
        title: format!("Movie {}", id),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        release_date: None,
        vote_average: None,
        genre_ids: vec![],
        genres: vec![],
        credits: None,
    }
}

pub fn with_director(mut movie: Movie, name: &str) -> Movie {
    movie.credits = Some(directed_by(name));
    movie
}

fn directed_by(name: &str) -> Credits {
    Credits {
        cast: vec![],
        crew: vec![CrewMember {
            id: 1,
            name: name.to_string(),
            job: DIRECTOR_JOB.to_string(),
            department: Some("Directing".to_string()),
        }],
    }
}

/// An in-memory provider for tests
#[derive(Default)]
pub struct FakeProvider {
    credits: HashMap<MovieId, Credits>,
    failing_credits: HashSet<MovieId>,
    people: Vec<Person>,
    discovery: Vec<Movie>,
    last_discovery: Mutex<Option<DiscoveryQuery>>,
}

impl FakeProvider {
    pub fn with_director(mut self, movie_id: MovieId, name: &str) -> Self {
        self.credits.insert(movie_id, directed_by(name));
        self
    }

    pub fn failing_credits(mut self, movie_id: MovieId) -> Self {
        self.failing_credits.insert(movie_id);
        self
    }

    pub fn with_people(mut self, people: Vec<Person>) -> Self {
        self.people = people;
        self
    }

    pub fn with_discovery(mut self, movies: Vec<Movie>) -> Self {
        self.discovery = movies;
        self
    }

    pub fn last_discovery(&self) -> Option<DiscoveryQuery> {
        self.last_discovery.lock().clone()
    }
}

fn page(results: Vec<Movie>) -> Page<Movie> {
    Page {
        page: 1,
        total_pages: 1,
        total_results: results.len() as u32,
        results,
    }
}

#[async_trait]
impl MovieProvider for FakeProvider {
    async fn genres(&self) -> ProviderResult<Vec<Genre>> {
        Ok(vec![])
    }

    async fn popular(&self, _page: u32) -> ProviderResult<Page<Movie>> {
        Ok(page(vec![]))
    }

    async fn search(&self, _query: &str, _page: u32) -> ProviderResult<Page<Movie>> {
        Ok(page(vec![]))
    }

    async fn discover(&self, query: &DiscoveryQuery) -> ProviderResult<Page<Movie>> {
        *self.last_discovery.lock() = Some(query.clone());
        Ok(page(self.discovery.clone()))
    }

    async fn search_person(&self, _name: &str) -> ProviderResult<Vec<Person>> {
        Ok(self.people.clone())
    }

    async fn credits(&self, movie_id: MovieId) -> ProviderResult<Credits> {
        if self.failing_credits.contains(&movie_id) {
            return Err(ProviderError::Unavailable("connection reset".to_string()));
        }

        Ok(self.credits.get(&movie_id).cloned().unwrap_or_default())
    }

    async fn details(&self, movie_id: MovieId) -> ProviderResult<MovieDetails> {
        Err(ProviderError::NotFound {
            resource: "movie",
            identifier: movie_id.to_string(),
        })
    }

    async fn videos(&self, _movie_id: MovieId) -> ProviderResult<Vec<Video>> {
        Ok(vec![])
    }
}
