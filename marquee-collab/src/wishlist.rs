use std::sync::Arc;

use log::{info, warn};
use marquee_core::{Movie, MovieId};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Storage, StorageError, StorageExt};

/// The movies each account wants to watch, in the order they were added
pub struct Wishlist<S> {
    storage: Arc<S>,
}

/// What the wishlist remembers about a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

impl<S> Wishlist<S>
where
    S: Storage,
{
    pub const KEY_PREFIX: &'static str = "marquee_wishlist_";

    pub fn new(storage: &Arc<S>) -> Self {
        Self {
            storage: storage.clone(),
        }
    }

    /// Returns the wishlist of an account. An unreadable list counts as empty.
    pub fn entries(&self, account: AccountId) -> Vec<WishlistEntry> {
        self.read(account).unwrap_or_else(|e| {
            warn!("Could not read wishlist of #{}: {}", account, e);
            vec![]
        })
    }

    pub fn contains(&self, account: AccountId, movie_id: MovieId) -> bool {
        self.entries(account).iter().any(|e| e.id == movie_id)
    }

    /// Adds the movie if it isn't on the wishlist, removes it otherwise.
    /// Returns true if the movie is on the wishlist afterwards.
    pub fn toggle(&self, account: AccountId, movie: &Movie) -> Result<bool, StorageError> {
        let mut entries = self.read(account)?;
        let before = entries.len();

        entries.retain(|e| e.id != movie.id);

        let added = entries.len() == before;
        if added {
            entries.push(movie.into());
        }

        self.storage.set_json(&Self::key(account), &entries)?;

        info!(
            "{} movie #{} for #{}",
            if added { "Wishlisted" } else { "Unwishlisted" },
            movie.id,
            account
        );

        Ok(added)
    }

    /// Reads the stored list. Only a corrupt list is replaced with an empty one.
    fn read(&self, account: AccountId) -> Result<Vec<WishlistEntry>, StorageError> {
        match self.storage.get_json(&Self::key(account)) {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(StorageError::Corrupt { reason, .. }) => {
                warn!("Ignoring corrupt wishlist of #{}: {}", account, reason);
                Ok(vec![])
            }
            Err(e) => Err(e),
        }
    }

    fn key(account: AccountId) -> String {
        format!("{}{}", Self::KEY_PREFIX, account)
    }
}

impl From<&Movie> for WishlistEntry {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
        }
    }
}
