use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;
use tracing::error;

use crate::{
    AppState, catalog, creation,
    error::{AppError, AppResult, StoreError},
    filter::{SearchFilter, SortOrder},
    models::{ListQuery, MovieForm},
    templates::{self, ListingView},
};

pub const ADDED_MESSAGE: &str = "Movie added successfully!";

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Html<String> {
    let query = ListQuery::from_pairs(pairs);
    let variant = state.config.variant;
    let filter = SearchFilter::from_query(&query, variant.plot_search());
    let sort = SortOrder::from_param(ListQuery::param(&query.sort));

    let (listing, error) = match catalog::list(&state.gateway, &filter, sort).await {
        Ok(listing) => (listing, None),
        Err(StoreError::NotConnected) => {
            (Default::default(), Some("Database not connected. Please try again later."))
        },
        Err(err) => {
            error!(error = %err, "failed to load movies");
            (Default::default(), Some("Error loading movies"))
        },
    };

    Html(templates::index_page(&ListingView {
        movies: &listing.movies,
        genres: &listing.genres,
        query: &query,
        error,
        variant,
    }))
}

pub async fn add_form(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let variant = state.config.variant;
    let options = catalog::form_options(&state.gateway, variant)
        .await
        .map_err(|err| AppError::store("Error loading form", err))?;
    Ok(Html(templates::add_movie_page(&options, variant)))
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MovieForm>,
) -> AppResult<Redirect> {
    creation::create(&state.gateway, form, state.config.variant, &state.config.defaults).await?;
    Ok(Redirect::to(&format!("/?success={}", urlencoding::encode(ADDED_MESSAGE))))
}
