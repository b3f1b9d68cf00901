use futures_util::future::try_join3;
use marquee_core::{CastMember, Credits, MovieDetails, MovieId, MovieProvider, Trailer};

use crate::ClientResult;

/// Everything the detail page of a movie shows
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub details: MovieDetails,
    pub credits: Credits,
    pub trailer: Option<Trailer>,
}

impl DetailView {
    /// How many actors are listed in the summary
    pub const SUMMARY_CAST: usize = 5;
    /// How many actors get a card with their picture
    pub const GALLERY_CAST: usize = 12;

    /// Fetches details, credits and videos concurrently
    pub async fn fetch<P>(provider: &P, movie_id: MovieId) -> ClientResult<Self>
    where
        P: MovieProvider + ?Sized,
    {
        let (details, credits, videos) = try_join3(
            provider.details(movie_id),
            provider.credits(movie_id),
            provider.videos(movie_id),
        )
        .await?;

        Ok(Self {
            details,
            credits,
            trailer: Trailer::find(&videos),
        })
    }

    pub fn director(&self) -> Option<&str> {
        self.credits.director().map(|d| d.name.as_str())
    }

    /// The first few billed actors, joined for display
    pub fn actors(&self) -> Option<String> {
        let cast = self.credits.top_cast(Self::SUMMARY_CAST);
        (!cast.is_empty()).then(|| cast.join(", "))
    }

    /// The first billed actors, in billing order
    pub fn cast_gallery(&self) -> &[CastMember] {
        let cast = &self.credits.cast;
        &cast[..cast.len().min(Self::GALLERY_CAST)]
    }

    pub fn runtime(&self) -> Option<String> {
        self.details.runtime.map(|r| format!("{}m", r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_support::FakeProvider, Activity};
    use marquee_core::{Config, Video};

    fn details(id: MovieId) -> MovieDetails {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": "Heat",
            "runtime": 170,
        }))
        .unwrap()
    }

    fn video(key: &str, site: &str, kind: &str) -> Video {
        Video {
            key: key.to_string(),
            site: site.to_string(),
            kind: kind.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch() {
        let provider = FakeProvider {
            details: [(949, details(949))].into(),
            directors: [(949, "Michael Mann".to_string())].into(),
            videos: vec![
                video("teaser", "YouTube", "Teaser"),
                video("vimeo", "Vimeo", "Trailer"),
                video("trailer", "YouTube", "Trailer"),
            ],
            ..Default::default()
        };

        let view = DetailView::fetch(&provider, 949).await.unwrap();

        assert_eq!(view.director(), Some("Michael Mann"));
        assert_eq!(view.runtime().as_deref(), Some("170m"));
        assert_eq!(view.actors(), None);
        assert_eq!(view.trailer.map(|t| t.key).as_deref(), Some("trailer"));
    }

    #[test]
    fn test_cast_gallery() {
        let cast = (1..=15)
            .map(|id| CastMember {
                id,
                name: format!("Actor {}", id),
                character: None,
                profile_path: (id % 2 == 0).then(|| format!("/{}.jpg", id)),
            })
            .collect();

        let view = DetailView {
            details: details(949),
            credits: Credits { cast, crew: vec![] },
            trailer: None,
        };

        let gallery = view.cast_gallery();
        let config = Config::default();

        assert_eq!(gallery.len(), DetailView::GALLERY_CAST);
        assert_eq!(gallery[11].name, "Actor 12");
        assert_eq!(gallery[0].profile_url(&config), None);
        assert_eq!(
            gallery[1].profile_url(&config).as_deref(),
            Some("https://image.tmdb.org/t/p/w200/2.jpg")
        );
        assert_eq!(
            view.actors().as_deref(),
            Some("Actor 1, Actor 2, Actor 3, Actor 4, Actor 5")
        );
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let provider = FakeProvider::default();

        let error = DetailView::fetch(&provider, 949).await.unwrap_err();

        assert_eq!(
            error.message(Activity::Details),
            "Failed to fetch movie details."
        );
    }
}
