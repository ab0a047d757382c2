use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;

/// Which of the two catalog flavours this process serves.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CatalogVariant {
    /// Plot search, comma-separated credits and genre options on the add form.
    #[default]
    Full,
    Basic,
}

impl CatalogVariant {
    pub fn plot_search(self) -> bool {
        self == CatalogVariant::Full
    }

    pub fn splits_credits(self) -> bool {
        self == CatalogVariant::Full
    }

    pub fn genre_options(self) -> bool {
        self == CatalogVariant::Full
    }
}

impl FromStr for CatalogVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(CatalogVariant::Full),
            "basic" => Ok(CatalogVariant::Basic),
            other => anyhow::bail!("unknown catalog variant {other:?}"),
        }
    }
}

/// Values filled in when a submitted movie leaves them blank.
#[derive(Clone, Debug)]
pub struct CreationDefaults {
    pub language: String,
    pub country: String,
    pub rated: String,
}

impl Default for CreationDefaults {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            country: "USA".to_string(),
            rated: "NOT RATED".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub mongodb_uri: String,
    pub database: String,
    pub variant: CatalogVariant,
    pub defaults: CreationDefaults,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3001".to_string()).parse().context("PORT")?;

        let mongodb_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database =
            std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "sample_mflix".to_string());

        let variant = match std::env::var("CATALOG_VARIANT") {
            Ok(raw) => raw.parse().context("CATALOG_VARIANT")?,
            Err(_) => CatalogVariant::default(),
        };

        let mut defaults = CreationDefaults::default();
        if let Ok(language) = std::env::var("DEFAULT_LANGUAGE") {
            defaults.language = language;
        }
        if let Ok(country) = std::env::var("DEFAULT_COUNTRY") {
            defaults.country = country;
        }

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            mongodb_uri,
            database,
            variant,
            defaults,
        })
    }
}
