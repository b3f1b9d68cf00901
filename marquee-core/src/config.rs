/// The configuration of the movie data provider
#[derive(Debug, Clone)]
pub struct Config {
    /// Base url of the provider's REST API, without a trailing slash
    pub api_base: String,
    /// Base url images are served from, without a trailing slash
    pub image_base: String,
    /// The key sent with every request
    pub api_key: String,
    /// Language tag requested for titles and overviews
    pub language: String,
    /// Whether searches should include adult titles
    pub include_adult: bool,
}

/// The sizes the provider renders posters, backdrops and profile pictures in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Cast thumbnails
    W200,
    /// Posters
    W500,
    /// Backdrops
    Original,
}

impl Config {
    pub const DEFAULT_API_BASE: &'static str = "https://api.themoviedb.org/3";
    pub const DEFAULT_IMAGE_BASE: &'static str = "https://image.tmdb.org/t/p";

    /// Returns the default config with the given api key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Returns the full url of an image path as returned by the provider
    pub fn image_url(&self, path: &str, size: ImageSize) -> String {
        format!("{}/{}{}", self.image_base, size.as_str(), path)
    }
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W200 => "w200",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: Self::DEFAULT_API_BASE.to_string(),
            image_base: Self::DEFAULT_IMAGE_BASE.to_string(),
            api_key: String::new(),
            language: "en-US".to_string(),
            include_adult: false,
        }
    }
}
