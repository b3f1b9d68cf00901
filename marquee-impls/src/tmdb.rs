use async_trait::async_trait;
use log::debug;
use marquee_core::{
    Config, Credits, DiscoveryQuery, Genre, Movie, MovieDetails, MovieId, MovieProvider, Page,
    Person, ProviderError, ProviderResult, Video,
};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

/// A movie provider backed by the TMDB v3 API
pub struct TmdbProvider {
    client: Client,
    config: Config,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct VideoList {
    results: Vec<Video>,
}

type Params = Vec<(&'static str, String)>;

impl TmdbProvider {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the parameters every request carries
    fn base_params(&self) -> Params {
        vec![
            ("api_key", self.config.api_key.clone()),
            ("language", self.config.language.clone()),
        ]
    }

    fn search_params(&self, query: &str, page: u32) -> Params {
        let mut params = self.base_params();

        params.push(("query", query.to_string()));
        params.push(("page", page.to_string()));
        params.push(("include_adult", self.config.include_adult.to_string()));

        params
    }

    async fn fetch<T>(&self, path: &str, params: Params, resource: &'static str) -> ProviderResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_base, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(handle_unsuccessful_request(response, status, resource, path).await);
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl MovieProvider for TmdbProvider {
    async fn genres(&self) -> ProviderResult<Vec<Genre>> {
        let list: GenreList = self
            .fetch("/genre/movie/list", self.base_params(), "genres")
            .await?;

        Ok(list.genres)
    }

    async fn popular(&self, page: u32) -> ProviderResult<Page<Movie>> {
        let mut params = self.base_params();
        params.push(("page", page.to_string()));

        self.fetch("/movie/popular", params, "popular").await
    }

    async fn search(&self, query: &str, page: u32) -> ProviderResult<Page<Movie>> {
        self.fetch("/search/movie", self.search_params(query, page), "search")
            .await
    }

    async fn discover(&self, query: &DiscoveryQuery) -> ProviderResult<Page<Movie>> {
        let mut params = self.base_params();
        params.extend(query.params());

        self.fetch("/discover/movie", params, "discover").await
    }

    async fn search_person(&self, name: &str) -> ProviderResult<Vec<Person>> {
        let page: Page<Person> = self
            .fetch("/search/person", self.search_params(name, 1), "person")
            .await?;

        Ok(page.results)
    }

    async fn credits(&self, movie_id: MovieId) -> ProviderResult<Credits> {
        let path = format!("/movie/{}/credits", movie_id);
        self.fetch(&path, self.base_params(), "credits").await
    }

    async fn details(&self, movie_id: MovieId) -> ProviderResult<MovieDetails> {
        let path = format!("/movie/{}", movie_id);
        self.fetch(&path, self.base_params(), "movie").await
    }

    async fn videos(&self, movie_id: MovieId) -> ProviderResult<Vec<Video>> {
        let path = format!("/movie/{}/videos", movie_id);
        let list: VideoList = self.fetch(&path, self.base_params(), "videos").await?;

        Ok(list.results)
    }
}

async fn handle_unsuccessful_request(
    response: Response,
    status: StatusCode,
    resource: &'static str,
    path: &str,
) -> ProviderError {
    if status == StatusCode::NOT_FOUND {
        return ProviderError::NotFound {
            resource,
            identifier: path.to_string(),
        };
    }

    let result = response.text().await;

    match result {
        Ok(text) => ProviderError::Unavailable(format!("{}: {}", status, text)),
        Err(e) => ProviderError::Unavailable(e.to_string()),
    }
}
