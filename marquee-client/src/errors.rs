use marquee_collab::{AuthError, StorageError};
use marquee_core::{FilterError, ProviderError};
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Sign in to browse movies")]
    NotSignedIn,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What the browser was doing when something went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Popular,
    Search,
    Discover,
    Details,
}

impl ClientError {
    /// Returns the message shown to the user for a failure during the given activity.
    /// Provider failures are not shown in detail.
    pub fn message(&self, activity: Activity) -> String {
        match self {
            Self::Filter(FilterError::PersonNotFound(_)) => {
                "No actor/director found with that name.".to_string()
            }
            Self::Filter(FilterError::GenreNotFound(_)) => "Genre not found.".to_string(),
            Self::Filter(FilterError::NoResults) => {
                "No movies found with the given filters.".to_string()
            }
            Self::Filter(FilterError::Provider(_)) | Self::Provider(_) => {
                activity.failure_message().to_string()
            }
            e => e.to_string(),
        }
    }
}

impl Activity {
    fn failure_message(&self) -> &'static str {
        match self {
            Activity::Popular => "Error fetching popular movies.",
            Activity::Search => "Error searching movies.",
            Activity::Discover => "Error fetching filtered movies.",
            Activity::Details => "Failed to fetch movie details.",
        }
    }
}
