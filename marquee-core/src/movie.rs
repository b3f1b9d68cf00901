use serde::{Deserialize, Serialize};

use crate::{Config, ImageSize};

pub type MovieId = u64;
pub type PersonId = u64;
pub type GenreId = u32;

/// The crew job that marks a director
pub const DIRECTOR_JOB: &str = "Director";

/// A movie as listed by the provider, optionally enriched with genre names and credits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Usually formatted as `YYYY-MM-DD`, but the provider sends an empty string for unknown dates
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Unresolved genre ids, as sent by listings
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    /// Resolved genres, filled in by enrichment or sent directly by detail lookups
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

/// A genre from the provider's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Cast and crew of a movie
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: Option<String>,
}

/// The full record of a single movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Length in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// A video attached to a movie, such as a trailer or a teaser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A trailer that can be embedded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub key: String,
}

/// A person as returned by a person search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub known_for_department: Option<String>,
}

/// A page of results from a paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl Movie {
    /// Returns the rating, if the movie has been rated.
    /// The provider reports unrated movies with an average of zero.
    pub fn rating(&self) -> Option<f64> {
        self.vote_average.filter(|v| *v > 0.0)
    }

    /// Returns the release date, if known
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref().filter(|d| !d.is_empty())
    }

    /// Returns the directors listed in the credits, if credits are attached
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.credits.iter().flat_map(|c| c.directors())
    }

    pub fn poster_url(&self, config: &Config) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| config.image_url(p, ImageSize::W500))
    }
}

impl MovieDetails {
    pub fn poster_url(&self, config: &Config) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| config.image_url(p, ImageSize::W500))
    }

    pub fn backdrop_url(&self, config: &Config) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|p| config.image_url(p, ImageSize::Original))
    }
}

impl From<MovieDetails> for Movie {
    fn from(details: MovieDetails) -> Self {
        Self {
            id: details.id,
            title: details.title,
            overview: details.overview,
            poster_path: details.poster_path,
            backdrop_path: details.backdrop_path,
            release_date: details.release_date,
            vote_average: details.vote_average,
            genre_ids: details.genres.iter().map(|g| g.id).collect(),
            genres: details.genres,
            credits: None,
        }
    }
}

impl CastMember {
    /// Returns the url of the profile picture, if the provider has one
    pub fn profile_url(&self, config: &Config) -> Option<String> {
        self.profile_path
            .as_deref()
            .map(|p| config.image_url(p, ImageSize::W200))
    }
}

impl Credits {
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|c| c.job == DIRECTOR_JOB)
    }

    /// The first listed director
    pub fn director(&self) -> Option<&CrewMember> {
        self.directors().next()
    }

    /// Names of the first `count` billed cast members
    pub fn top_cast(&self, count: usize) -> Vec<&str> {
        self.cast
            .iter()
            .take(count)
            .map(|c| c.name.as_str())
            .collect()
    }
}

impl Video {
    fn is_youtube_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube"
    }
}

impl Trailer {
    /// Picks the first YouTube trailer from a list of videos
    pub fn find(videos: &[Video]) -> Option<Self> {
        videos
            .iter()
            .find(|v| v.is_youtube_trailer())
            .map(|v| Self { key: v.key.clone() })
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url() {
        let config = Config::default();
        let member: CastMember =
            serde_json::from_str(r#"{"id": 1, "name": "Al Pacino", "profile_path": "/al.jpg"}"#)
                .unwrap();

        assert_eq!(
            member.profile_url(&config).as_deref(),
            Some("https://image.tmdb.org/t/p/w200/al.jpg")
        );
        assert_eq!(
            CastMember {
                profile_path: None,
                ..member
            }
            .profile_url(&config),
            None
        );
    }

    #[test]
    fn test_movie_from_details() {
        let details: MovieDetails = serde_json::from_str(
            r#"{"id": 949, "title": "Heat", "runtime": 170, "genres": [{"id": 80, "name": "Crime"}]}"#,
        )
        .unwrap();

        let movie = Movie::from(details);

        assert_eq!(movie.id, 949);
        assert_eq!(movie.genre_ids, vec![80]);
        assert_eq!(movie.genres[0].name, "Crime");
        assert_eq!(movie.credits, None);
    }

    #[test]
    fn test_deserialize_listing() {
        let json = r#"{
            "page": 1,
            "results": [{
                "id": 603,
                "title": "The Matrix",
                "overview": "Set in the 22nd century...",
                "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
                "backdrop_path": null,
                "release_date": "1999-03-30",
                "vote_average": 8.2,
                "genre_ids": [28, 878],
                "adult": false,
                "popularity": 71.3
            }],
            "total_pages": 1,
            "total_results": 1
        }"#;

        let page: Page<Movie> = serde_json::from_str(json).unwrap();
        let movie = &page.results[0];

        assert_eq!(movie.id, 603);
        assert_eq!(movie.genre_ids, vec![28, 878]);
        assert!(movie.genres.is_empty());
        assert_eq!(movie.credits, None);
        assert_eq!(movie.backdrop_path, None);
    }

    #[test]
    fn test_unrated_and_undated() {
        let movie: Movie =
            serde_json::from_str(r#"{"id": 1, "vote_average": 0, "release_date": ""}"#).unwrap();

        assert_eq!(movie.rating(), None);
        assert_eq!(movie.release_date(), None);
    }

    #[test]
    fn test_trailer_selection() {
        let videos: Vec<Video> = serde_json::from_str(
            r#"[
                {"key": "t1", "site": "Vimeo", "type": "Trailer"},
                {"key": "t2", "site": "YouTube", "type": "Teaser"},
                {"key": "t3", "site": "YouTube", "type": "Trailer"},
                {"key": "t4", "site": "YouTube", "type": "Trailer"}
            ]"#,
        )
        .unwrap();

        let trailer = Trailer::find(&videos).unwrap();

        assert_eq!(trailer.key, "t3");
        assert_eq!(trailer.watch_url(), "https://www.youtube.com/watch?v=t3");
        assert_eq!(trailer.embed_url(), "https://www.youtube.com/embed/t3");
        assert_eq!(Trailer::find(&videos[..2]), None);
    }

    #[test]
    fn test_director_and_top_cast() {
        let credits: Credits = serde_json::from_str(
            r#"{
                "id": 603,
                "cast": [
                    {"id": 1, "name": "Keanu Reeves", "character": "Neo"},
                    {"id": 2, "name": "Laurence Fishburne"},
                    {"id": 3, "name": "Carrie-Anne Moss"}
                ],
                "crew": [
                    {"id": 4, "name": "Joel Silver", "job": "Producer"},
                    {"id": 5, "name": "Lana Wachowski", "job": "Director"},
                    {"id": 6, "name": "Lilly Wachowski", "job": "Director"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(credits.director().map(|d| d.name.as_str()), Some("Lana Wachowski"));
        assert_eq!(credits.directors().count(), 2);
        assert_eq!(credits.top_cast(2), vec!["Keanu Reeves", "Laurence Fishburne"]);
    }
}
