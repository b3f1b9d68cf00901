use std::sync::Arc;

use log::{error, info, warn};
use marquee_core::{
    attach_credits, FilterCriteria, FilterError, FilterStrategy, GenreCatalog, LocalFilter,
    Movie, MovieId, MovieProvider, RemoteDiscovery,
};
use tokio::sync::watch;

use crate::{Activity, ClientError, ClientResult, DetailView, ViewState};

/// Browses the provider's movies on behalf of a signed in user
pub struct Browser<P: ?Sized> {
    provider: Arc<P>,
    catalog: GenreCatalog,
    /// The popular list that local filters are applied to
    popular: Vec<Movie>,
    criteria: FilterCriteria,
    state: watch::Sender<ViewState>,
}

impl<P> Browser<P>
where
    P: MovieProvider + ?Sized,
{
    pub fn new(provider: Arc<P>) -> Self {
        let (state, _) = watch::channel(ViewState::default());

        Self {
            provider,
            catalog: GenreCatalog::default(),
            popular: vec![],
            criteria: FilterCriteria::default(),
            state,
        }
    }

    /// Returns a receiver that observes every change of the view state
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn catalog(&self) -> &GenreCatalog {
        &self.catalog
    }

    /// The criteria last applied, cleared by [Browser::recent]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Loads the genre catalog, then the popular list
    pub async fn start(&mut self) {
        self.load_genres().await;
        self.load_popular().await;
    }

    /// Loads the genre catalog. Without it, genres can't be resolved,
    /// but browsing still works.
    pub async fn load_genres(&mut self) {
        match self.provider.genres().await {
            Ok(genres) => {
                info!("Loaded {} genres", genres.len());
                self.catalog = GenreCatalog::new(genres);
            }
            Err(e) => warn!("Could not load genres: {}", e),
        }
    }

    pub async fn load_popular(&mut self) {
        self.set_state(ViewState::Loading);

        let result = async {
            let page = self.provider.popular(1).await?;
            let movies = self.catalog.resolve_all(page.results);

            Ok::<_, ClientError>(attach_credits(self.provider.as_ref(), movies).await)
        }
        .await;

        match result {
            Ok(movies) => {
                info!("Loaded {} popular movies", movies.len());
                self.popular = movies.clone();
                self.set_state(ViewState::from_movies(movies));
            }
            Err(e) => self.fail(Activity::Popular, e),
        }
    }

    /// Clears the criteria and shows the popular list again
    pub async fn recent(&mut self) {
        self.criteria = FilterCriteria::default();
        self.load_popular().await;
    }

    /// Searches movies by title. A blank query clears the results.
    pub async fn search(&mut self, query: &str) {
        let query = query.trim();

        if query.is_empty() {
            self.set_state(ViewState::Empty);
            return;
        }

        self.set_state(ViewState::Loading);

        let result = async {
            let page = self.provider.search(query, 1).await?;
            let movies = self.catalog.resolve_all(page.results);

            Ok::<_, ClientError>(attach_credits(self.provider.as_ref(), movies).await)
        }
        .await;

        match result {
            Ok(movies) => self.set_state(ViewState::from_movies(movies)),
            Err(e) => self.fail(Activity::Search, e),
        }
    }

    /// Filters the popular list locally. Filters never stack, each call starts
    /// from the full popular list.
    pub async fn suggest(&mut self, criteria: FilterCriteria) {
        let result = LocalFilter::new(&self.popular).filter(&criteria).await;
        self.criteria = criteria;

        match result {
            Ok(movies) => self.set_state(ViewState::from_movies(movies)),
            Err(e) => self.fail(Activity::Discover, e.into()),
        }
    }

    /// Asks the provider for movies matching the criteria
    pub async fn discover(&mut self, criteria: FilterCriteria) {
        self.set_state(ViewState::Loading);

        let result = RemoteDiscovery::new(self.provider.as_ref(), &self.catalog)
            .filter(&criteria)
            .await;
        self.criteria = criteria;

        match result {
            Ok(movies) => self.set_state(ViewState::from_movies(movies)),
            Err(FilterError::NoResults) => self.set_state(ViewState::Empty),
            Err(e) => self.fail(Activity::Discover, e.into()),
        }
    }

    /// Fetches the detail page of a movie. This does not touch the list state.
    /// Use [ClientError::message] with [Activity::Details] to describe a failure.
    pub async fn details(&self, movie_id: MovieId) -> ClientResult<DetailView> {
        DetailView::fetch(self.provider.as_ref(), movie_id)
            .await
            .map_err(|e| {
                error!("Could not fetch details of movie #{}: {}", movie_id, e);
                e
            })
    }

    fn set_state(&self, state: ViewState) {
        self.state.send_replace(state);
    }

    fn fail(&self, activity: Activity, error: ClientError) {
        error!("{:?} failed: {}", activity, error);
        self.set_state(ViewState::Error(error.message(activity)));
    }
}
