use tracing::info;

use crate::{
    config::{CatalogVariant, CreationDefaults},
    error::CreateError,
    models::{Movie, MovieForm, MovieKind},
    store::Gateway,
};

/// Validates a submitted form into the record that will be stored.
///
/// `lastupdated` is left empty here; [`create`] stamps it at insert time.
pub fn build_movie(
    form: MovieForm,
    variant: CatalogVariant,
    defaults: &CreationDefaults,
) -> Result<Movie, CreateError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(invalid("title is required"));
    }

    let year = form
        .year
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid(format!("year must be a whole number, got {:?}", form.year.trim())))?;

    let runtime = match form.runtime.trim() {
        "" => None,
        raw => Some(
            raw.parse::<i32>()
                .map_err(|_| invalid(format!("runtime must be a whole number, got {raw:?}")))?,
        ),
    };

    let kind = match form.kind.trim() {
        "" => None,
        raw => Some(
            MovieKind::parse(raw)
                .ok_or_else(|| invalid(format!("type must be movie or series, got {raw:?}")))?,
        ),
    };

    let split = variant.splits_credits();
    let mut languages = list(&form.languages, false);
    if languages.is_empty() {
        languages.push(defaults.language.clone());
    }
    let mut countries = list(&form.countries, split);
    if countries.is_empty() {
        countries.push(defaults.country.clone());
    }

    Ok(Movie {
        id: None,
        title: title.to_string(),
        year: Some(year),
        runtime,
        genres: list(&form.genres, false),
        cast: list(&form.cast, split),
        plot: text(&form.plot),
        kind: kind.map(|k| k.as_str().to_string()),
        directors: list(&form.directors, split),
        languages,
        countries,
        rated: Some(text(&form.rated).unwrap_or_else(|| defaults.rated.clone())),
        poster: text(&form.poster),
        lastupdated: None,
    })
}

pub async fn create(
    gateway: &Gateway,
    form: MovieForm,
    variant: CatalogVariant,
    defaults: &CreationDefaults,
) -> Result<String, CreateError> {
    let store = gateway.store()?;

    let mut movie = build_movie(form, variant, defaults)?;
    movie.lastupdated = Some(jiff::Timestamp::now().to_string());

    let id = store.insert(&movie).await?;
    info!(id = %id, title = %movie.title, year = ?movie.year, "inserted movie");
    Ok(id)
}

fn invalid(msg: impl Into<String>) -> CreateError {
    CreateError::Validation(msg.into())
}

fn text(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Normalises one or many submitted values into trimmed, non-empty entries,
/// optionally splitting each value on commas.
fn list(values: &[String], split_commas: bool) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| {
            if split_commas { v.split(',').collect::<Vec<_>>() } else { vec![v.as_str()] }
        })
        .filter_map(text)
        .collect()
}
