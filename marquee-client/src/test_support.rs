use std::{collections::HashMap, sync::Arc};

use argon2::Params;
use async_trait::async_trait;
use marquee_collab::AuthConfig;
use marquee_core::{
    Credits, CrewMember, DiscoveryQuery, Genre, Movie, MovieDetails, MovieId, MovieProvider,
    Page, Person, ProviderError, ProviderResult, Video, DIRECTOR_JOB,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// An auth config with the cheapest password hash, to keep tests fast
pub fn fast_auth() -> AuthConfig {
    AuthConfig {
        hash_params: Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
            .expect("params are valid"),
        ..Default::default()
    }
}

pub fn movie(id: MovieId) -> Movie {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("Movie {}", id),
    }))
    .expect("movie is valid")
}

/// An in-memory provider for tests
#[derive(Default)]
pub struct FakeProvider {
    pub genres: Vec<Genre>,
    pub popular: Vec<Movie>,
    pub search: Vec<Movie>,
    pub discovery: Vec<Movie>,
    pub people: Vec<Person>,
    pub directors: HashMap<MovieId, String>,
    pub details: HashMap<MovieId, MovieDetails>,
    pub videos: Vec<Video>,
    /// Makes every listing fail
    pub unavailable: bool,
    /// If set, listings wait until notified
    pub gate: Option<Arc<Notify>>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn record(&self, request: impl Into<String>) {
        self.requests.lock().push(request.into());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    async fn listing(&self, movies: &[Movie]) -> ProviderResult<Page<Movie>> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.unavailable {
            return Err(ProviderError::Unavailable("connection refused".to_string()));
        }

        Ok(Page {
            page: 1,
            results: movies.to_vec(),
            total_pages: 1,
            total_results: movies.len() as u32,
        })
    }
}

#[async_trait]
impl MovieProvider for FakeProvider {
    async fn genres(&self) -> ProviderResult<Vec<Genre>> {
        self.record("genres");
        Ok(self.genres.clone())
    }

    async fn popular(&self, page: u32) -> ProviderResult<Page<Movie>> {
        self.record(format!("popular:{}", page));
        self.listing(&self.popular).await
    }

    async fn search(&self, query: &str, _page: u32) -> ProviderResult<Page<Movie>> {
        self.record(format!("search:{}", query));
        self.listing(&self.search).await
    }

    async fn discover(&self, query: &DiscoveryQuery) -> ProviderResult<Page<Movie>> {
        self.record(format!("discover:{:?}", query.params()));
        self.listing(&self.discovery).await
    }

    async fn search_person(&self, name: &str) -> ProviderResult<Vec<Person>> {
        self.record(format!("person:{}", name));
        Ok(self.people.clone())
    }

    async fn credits(&self, movie_id: MovieId) -> ProviderResult<Credits> {
        let crew = self
            .directors
            .get(&movie_id)
            .map(|name| CrewMember {
                id: movie_id * 100,
                name: name.clone(),
                job: DIRECTOR_JOB.to_string(),
                department: None,
            })
            .into_iter()
            .collect();

        Ok(Credits { cast: vec![], crew })
    }

    async fn details(&self, movie_id: MovieId) -> ProviderResult<MovieDetails> {
        self.details
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                resource: "movie",
                identifier: movie_id.to_string(),
            })
    }

    async fn videos(&self, _movie_id: MovieId) -> ProviderResult<Vec<Video>> {
        Ok(self.videos.clone())
    }
}
