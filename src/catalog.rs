use tracing::debug;

use crate::{
    config::CatalogVariant,
    error::StoreError,
    filter::{SearchFilter, SortOrder},
    models::{FormOptions, Movie, bson_label},
    store::Gateway,
};

/// Upper bound on the number of records a listing returns.
pub const LIST_LIMIT: i64 = 10;

#[derive(Clone, Debug, Default)]
pub struct Listing {
    pub movies: Vec<Movie>,
    /// Every genre in the collection, independent of the active filter.
    pub genres: Vec<String>,
}

pub async fn list(
    gateway: &Gateway,
    filter: &SearchFilter,
    sort: SortOrder,
) -> Result<Listing, StoreError> {
    let store = gateway.store()?;

    let movies = store.find(filter, sort, LIST_LIMIT).await?;
    let genres = distinct_labels(gateway, "genres").await?;

    debug!(
        filtered = !filter.is_empty(),
        sort = ?sort,
        count = movies.len(),
        genres = genres.len(),
        "listed movies"
    );

    Ok(Listing { movies, genres })
}

pub async fn form_options(
    gateway: &Gateway,
    variant: CatalogVariant,
) -> Result<FormOptions, StoreError> {
    let titles = distinct_labels(gateway, "title").await?;
    let released = distinct_labels(gateway, "released").await?;
    let posters = distinct_labels(gateway, "poster").await?;
    let genres = if variant.genre_options() {
        distinct_labels(gateway, "genres").await?
    } else {
        Vec::new()
    };

    Ok(FormOptions { titles, released, posters, genres })
}

async fn distinct_labels(gateway: &Gateway, field: &str) -> Result<Vec<String>, StoreError> {
    let values = gateway.store()?.distinct(field).await?;
    let mut labels: Vec<String> = values.iter().filter_map(bson_label).collect();
    labels.sort();
    labels.dedup();
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::memory::MemoryStore;

    fn movie(title: &str, year: i32, genres: &[&str]) -> Movie {
        Movie {
            title: title.to_string(),
            year: Some(year),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            kind: Some("movie".to_string()),
            ..Default::default()
        }
    }

    fn gateway(movies: Vec<Movie>) -> Gateway {
        Gateway::connected(Arc::new(MemoryStore::with_movies(movies)))
    }

    fn years(listing: &Listing) -> Vec<Option<i32>> {
        listing.movies.iter().map(|m| m.year).collect()
    }

    #[tokio::test]
    async fn lists_at_most_ten_newest_first() {
        let movies = (1990..2005).map(|y| movie(&format!("Film {y}"), y, &["Drama"])).collect();
        let listing = list(&gateway(movies), &SearchFilter::default(), SortOrder::Descending)
            .await
            .unwrap();

        assert_eq!(listing.movies.len(), 10);
        assert_eq!(listing.movies[0].year, Some(2004));
        assert_eq!(listing.movies[9].year, Some(1995));
    }

    #[tokio::test]
    async fn ascending_when_requested() {
        let movies = vec![movie("B", 2001, &[]), movie("A", 1999, &[]), movie("C", 2010, &[])];
        let listing =
            list(&gateway(movies), &SearchFilter::default(), SortOrder::Ascending).await.unwrap();
        assert_eq!(years(&listing), vec![Some(1999), Some(2001), Some(2010)]);
    }

    #[tokio::test]
    async fn genre_vocabulary_ignores_filter() {
        let movies = vec![
            movie("Heat", 1995, &["Crime", "Drama"]),
            movie("Up", 2009, &["Animation", "Comedy"]),
        ];
        let filter = SearchFilter { genre: Some("Crime".into()), ..Default::default() };
        let listing = list(&gateway(movies), &filter, SortOrder::Descending).await.unwrap();

        assert_eq!(listing.movies.len(), 1);
        assert_eq!(listing.genres, vec!["Animation", "Comedy", "Crime", "Drama"]);
    }

    #[tokio::test]
    async fn inverted_year_range_is_empty() {
        let movies = vec![movie("Heat", 1995, &[])];
        let filter =
            SearchFilter { year_from: Some(2000), year_to: Some(1990), ..Default::default() };
        let listing = list(&gateway(movies), &filter, SortOrder::Descending).await.unwrap();
        assert!(listing.movies.is_empty());
    }

    #[tokio::test]
    async fn disconnected_gateway_reports_condition() {
        let err = list(&Gateway::disconnected(), &SearchFilter::default(), SortOrder::Descending)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotConnected));

        let err = form_options(&Gateway::disconnected(), CatalogVariant::Full).await.unwrap_err();
        assert!(matches!(err, StoreError::NotConnected));
    }

    #[tokio::test]
    async fn query_failure_is_returned() {
        let gateway = Gateway::connected(Arc::new(MemoryStore::failing("node is recovering")));
        let err =
            list(&gateway, &SearchFilter::default(), SortOrder::Descending).await.unwrap_err();
        assert!(err.to_string().contains("node is recovering"));
    }

    #[tokio::test]
    async fn form_options_follow_variant() {
        let mut heat = movie("Heat", 1995, &["Crime"]);
        heat.poster = Some("https://img.example/heat.jpg".into());
        let movies = vec![heat, movie("Alien", 1979, &["Horror"])];

        let full = form_options(&gateway(movies.clone()), CatalogVariant::Full).await.unwrap();
        assert_eq!(full.titles, vec!["Alien", "Heat"]);
        assert_eq!(full.posters, vec!["https://img.example/heat.jpg"]);
        assert_eq!(full.genres, vec!["Crime", "Horror"]);
        assert!(full.released.is_empty());

        let basic = form_options(&gateway(movies), CatalogVariant::Basic).await.unwrap();
        assert_eq!(basic.titles.len(), 2);
        assert!(basic.genres.is_empty());
    }
}
