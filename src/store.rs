use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Bson, doc},
    options::ClientOptions,
};
use tracing::{error, info};

use crate::{
    error::StoreError,
    filter::{SearchFilter, SortOrder},
    models::Movie,
};

pub const MOVIES: &str = "movies";

/// Operations the catalog needs from the `movies` collection.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn find(
        &self,
        filter: &SearchFilter,
        sort: SortOrder,
        limit: i64,
    ) -> Result<Vec<Movie>, StoreError>;

    /// Every distinct value of `field` across the whole collection.
    async fn distinct(&self, field: &str) -> Result<Vec<Bson>, StoreError>;

    /// Inserts `movie` and returns the hex of the assigned identifier.
    async fn insert(&self, movie: &Movie) -> Result<String, StoreError>;
}

/// Handle shared by every request. A gateway whose connection failed at
/// startup stays disconnected for the lifetime of the process.
#[derive(Clone)]
pub struct Gateway {
    store: Option<Arc<dyn MovieStore>>,
}

impl Gateway {
    pub fn connected(store: Arc<dyn MovieStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn disconnected() -> Self {
        Self { store: None }
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Result<&dyn MovieStore, StoreError> {
        self.store.as_deref().ok_or(StoreError::NotConnected)
    }
}

pub async fn connect(uri: &str, database: &str) -> Gateway {
    match MongoStore::open(uri, database).await {
        Ok(store) => Gateway::connected(Arc::new(store)),
        Err(err) => {
            error!(error = %err, "MongoDB connection failed");
            Gateway::disconnected()
        },
    }
}

pub struct MongoStore {
    movies: Collection<Movie>,
}

impl MongoStore {
    pub async fn open(uri: &str, database: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;

        let movies = db.collection::<Movie>(MOVIES);
        let count = movies.count_documents(doc! {}).await?;
        info!(database, count, "connected to MongoDB");

        Ok(Self { movies })
    }
}

#[async_trait]
impl MovieStore for MongoStore {
    async fn find(
        &self,
        filter: &SearchFilter,
        sort: SortOrder,
        limit: i64,
    ) -> Result<Vec<Movie>, StoreError> {
        let cursor = self
            .movies
            .find(filter.to_document())
            .sort(sort.to_document())
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn distinct(&self, field: &str) -> Result<Vec<Bson>, StoreError> {
        Ok(self.movies.distinct(field, doc! {}).await?)
    }

    async fn insert(&self, movie: &Movie) -> Result<String, StoreError> {
        let result = self.movies.insert_one(movie).await?;
        Ok(match result.inserted_id {
            Bson::ObjectId(id) => id.to_hex(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
pub mod memory {
    use std::sync::Mutex;

    use mongodb::bson::{self, oid::ObjectId};

    use super::*;

    /// In-process stand-in for the `movies` collection.
    #[derive(Default)]
    pub struct MemoryStore {
        movies: Mutex<Vec<Movie>>,
        fail_with: Option<String>,
    }

    impl MemoryStore {
        pub fn with_movies(movies: Vec<Movie>) -> Self {
            Self { movies: Mutex::new(movies), fail_with: None }
        }

        /// A store whose every call fails as if the server rejected it.
        pub fn failing(reason: &str) -> Self {
            Self { movies: Mutex::default(), fail_with: Some(reason.to_string()) }
        }

        pub fn all(&self) -> Vec<Movie> {
            self.movies.lock().unwrap().clone()
        }

        fn check(&self) -> Result<(), StoreError> {
            match &self.fail_with {
                Some(reason) => {
                    Err(StoreError::Database(std::io::Error::other(reason.clone()).into()))
                },
                None => Ok(()),
            }
        }
    }

    pub fn matches(filter: &SearchFilter, movie: &Movie) -> bool {
        let contains = |hay: Option<&str>, needle: &str| {
            hay.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        };

        filter.genre.as_ref().is_none_or(|g| movie.genres.contains(g))
            && filter.kind.as_ref().is_none_or(|k| movie.kind.as_ref() == Some(k))
            && filter.year_from.is_none_or(|from| movie.year.is_some_and(|y| y >= from))
            && filter.year_to.is_none_or(|to| movie.year.is_some_and(|y| y <= to))
            && filter.title.as_ref().is_none_or(|t| contains(Some(movie.title.as_str()), t))
            && filter.plot.as_ref().is_none_or(|p| contains(movie.plot.as_deref(), p))
    }

    #[async_trait]
    impl MovieStore for MemoryStore {
        async fn find(
            &self,
            filter: &SearchFilter,
            sort: SortOrder,
            limit: i64,
        ) -> Result<Vec<Movie>, StoreError> {
            self.check()?;
            let mut found: Vec<Movie> =
                self.all().into_iter().filter(|m| matches(filter, m)).collect();
            found.sort_by_key(|m| m.year);
            if sort == SortOrder::Descending {
                found.reverse();
            }
            found.truncate(limit as usize);
            Ok(found)
        }

        async fn distinct(&self, field: &str) -> Result<Vec<Bson>, StoreError> {
            self.check()?;
            let mut values = Vec::new();
            for movie in self.all() {
                let doc = bson::to_document(&movie).unwrap();
                let items = match doc.get(field) {
                    Some(Bson::Array(items)) => items.clone(),
                    Some(value) => vec![value.clone()],
                    None => continue,
                };
                for item in items {
                    if !values.contains(&item) {
                        values.push(item);
                    }
                }
            }
            Ok(values)
        }

        async fn insert(&self, movie: &Movie) -> Result<String, StoreError> {
            self.check()?;
            let id = ObjectId::new();
            let mut stored = movie.clone();
            stored.id = Some(id);
            self.movies.lock().unwrap().push(stored);
            Ok(id.to_hex())
        }
    }
}
