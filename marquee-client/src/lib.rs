mod browser;
mod detail;
mod errors;
mod view;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use marquee_collab::{Auth, AuthConfig, FormValue, Storage, User, Wishlist, WishlistEntry};
use marquee_core::{Movie, MovieId, MovieProvider};

pub use browser::*;
pub use detail::*;
pub use errors::*;
pub use view::*;

/// The marquee client, gating movie browsing behind a local account.
pub struct Marquee<S, P: ?Sized> {
    provider: Arc<P>,

    pub auth: Auth<S>,
    pub wishlist: Wishlist<S>,
}

impl<S, P> Marquee<S, P>
where
    S: Storage,
    P: MovieProvider + ?Sized,
{
    pub fn new(storage: S, provider: Arc<P>, auth_config: AuthConfig) -> Self {
        let storage = Arc::new(storage);

        Self {
            auth: Auth::with_config(&storage, auth_config),
            wishlist: Wishlist::new(&storage),
            provider,
        }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    pub fn current_user(&self) -> Option<User> {
        self.auth.current_user()
    }

    pub async fn sign_up(
        &self,
        username: impl Into<FormValue>,
        password: impl Into<FormValue>,
    ) -> ClientResult<User> {
        Ok(self.auth.sign_up(username, password).await?)
    }

    pub async fn sign_in(
        &self,
        username: impl Into<FormValue>,
        password: impl Into<FormValue>,
    ) -> ClientResult<User> {
        Ok(self.auth.sign_in(username, password).await?)
    }

    pub fn sign_out(&self) -> ClientResult<()> {
        Ok(self.auth.sign_out()?)
    }

    /// Returns a browser, if someone is signed in
    pub fn browser(&self) -> ClientResult<Browser<P>> {
        self.signed_in()?;
        Ok(Browser::new(self.provider.clone()))
    }

    /// Adds or removes a movie from the signed in user's wishlist.
    /// Returns true if the movie is on the wishlist afterwards.
    pub fn toggle_wishlist(&self, movie: &Movie) -> ClientResult<bool> {
        let user = self.signed_in()?;
        Ok(self.wishlist.toggle(user.id, movie)?)
    }

    pub fn wishlist(&self) -> ClientResult<Vec<WishlistEntry>> {
        let user = self.signed_in()?;
        Ok(self.wishlist.entries(user.id))
    }

    pub fn is_wishlisted(&self, movie_id: MovieId) -> bool {
        self.current_user()
            .map_or(false, |u| self.wishlist.contains(u.id, movie_id))
    }

    fn signed_in(&self) -> ClientResult<User> {
        self.current_user().ok_or(ClientError::NotSignedIn)
    }
}
