use async_trait::async_trait;
use log::info;

use crate::{
    attach_credits, matches_rating, FilterCriteria, FilterError, FilterStrategy, GenreCatalog,
    GenreId, Movie, MovieProvider, PersonId,
};

/// The parameters of a discovery query, with names already resolved to ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryQuery {
    pub page: u32,
    pub year: Option<String>,
    pub genre_id: Option<GenreId>,
    pub person_id: Option<PersonId>,
}

impl DiscoveryQuery {
    /// Resolves the criteria into a query.
    /// The person is looked up through the provider, the genre through the catalog.
    pub async fn resolve<P>(
        provider: &P,
        catalog: &GenreCatalog,
        criteria: &FilterCriteria,
    ) -> Result<Self, FilterError>
    where
        P: MovieProvider + ?Sized,
    {
        let person_id = match criteria.actor_director() {
            Some(name) => {
                let people = provider.search_person(name).await?;
                let person = people
                    .into_iter()
                    .next()
                    .ok_or_else(|| FilterError::PersonNotFound(name.to_string()))?;

                Some(person.id)
            }
            None => None,
        };

        let genre_id = match criteria.genre() {
            Some(name) => {
                let genre = catalog
                    .by_name(name)
                    .ok_or_else(|| FilterError::GenreNotFound(name.to_string()))?;

                Some(genre.id)
            }
            None => None,
        };

        Ok(Self {
            page: 1,
            year: criteria.year().map(str::to_string),
            genre_id,
            person_id,
        })
    }

    /// Returns the query as provider parameters
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string())];

        if let Some(year) = &self.year {
            params.push(("primary_release_year", year.clone()));
        }

        if let Some(genre_id) = self.genre_id {
            params.push(("with_genres", genre_id.to_string()));
        }

        if let Some(person_id) = self.person_id {
            params.push(("with_cast", person_id.to_string()));
        }

        params
    }
}

/// Resolves criteria by querying the provider again instead of filtering a fetched list.
/// The provider has no rating parameter, so the rating is applied to the results afterwards.
pub struct RemoteDiscovery<'a, P: ?Sized> {
    provider: &'a P,
    catalog: &'a GenreCatalog,
}

impl<'a, P> RemoteDiscovery<'a, P>
where
    P: MovieProvider + ?Sized,
{
    pub fn new(provider: &'a P, catalog: &'a GenreCatalog) -> Self {
        Self { provider, catalog }
    }
}

#[async_trait]
impl<P> FilterStrategy for RemoteDiscovery<'_, P>
where
    P: MovieProvider + ?Sized,
{
    async fn filter(&self, criteria: &FilterCriteria) -> Result<Vec<Movie>, FilterError> {
        let query = DiscoveryQuery::resolve(self.provider, self.catalog, criteria).await?;

        info!("Discovering movies with {:?}", query.params());

        let page = self.provider.discover(&query).await?;

        if page.results.is_empty() {
            return Err(FilterError::NoResults);
        }

        let rated: Vec<_> = self
            .catalog
            .resolve_all(page.results)
            .into_iter()
            .filter(|m| matches_rating(m, criteria))
            .collect();

        Ok(attach_credits(self.provider, rated).await)
    }
}
