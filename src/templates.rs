use maud::{DOCTYPE, Markup, html};

use crate::{
    config::CatalogVariant,
    models::{FormOptions, ListQuery, Movie, MovieKind},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const LABEL: &str = "block text-sm font-medium text-gray-700";

pub struct ListingView<'a> {
    pub movies: &'a [Movie],
    pub genres: &'a [String],
    pub query: &'a ListQuery,
    pub error: Option<&'a str>,
    pub variant: CatalogVariant,
}

pub fn index_page(view: &ListingView<'_>) -> String {
    let success = ListQuery::param(&view.query.success);

    page(
        "Movie Catalog",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-5xl mx-auto px-6 py-10" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "Movie Catalog" }
                            p class="mt-2 text-gray-600" { "Browse and search the movies collection." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 text-sm font-semibold text-white hover:bg-blue-700" href="/movies/add-form" { "Add movie" }
                    }

                    @if let Some(message) = success {
                        div class="mt-6 rounded-md border border-green-300 bg-green-50 px-4 py-3 text-green-800" { (message) }
                    }
                    @if let Some(message) = view.error {
                        div class="mt-6 rounded-md border border-red-300 bg-red-50 px-4 py-3 text-red-800" { (message) }
                    }

                    (search_form(view))

                    @if view.movies.is_empty() {
                        div class="mt-8 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies found." }
                        }
                    } @else {
                        div class="mt-8 grid gap-4 md:grid-cols-2" {
                            @for movie in view.movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_movie_page(options: &FormOptions, variant: CatalogVariant) -> String {
    let credits_hint = if variant.splits_credits() { "Separate names with commas." } else { "" };

    page(
        "Add movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        div class="flex items-start justify-between" {
                            h1 class="text-3xl font-bold text-gray-900" { "Add movie" }
                            a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to catalog" }
                        }

                        form class="mt-8 space-y-5" method="post" action="/movies/add-form" {
                            (text_field("title", "Title", Some("titles"), true))
                            datalist id="titles" {
                                @for title in &options.titles { option value=(title) {} }
                            }

                            div class="grid gap-4 md:grid-cols-2" {
                                div {
                                    label class=(LABEL) for="year" { "Year" }
                                    input class=(INPUT) type="number" name="year" id="year" required;
                                }
                                div {
                                    label class=(LABEL) for="runtime" { "Runtime (minutes)" }
                                    input class=(INPUT) type="number" name="runtime" id="runtime" min="0";
                                }
                            }

                            div {
                                label class=(LABEL) for="released" { "Released" }
                                input class=(INPUT) name="released_hint" id="released" list="released-dates" placeholder="Existing release dates";
                                datalist id="released-dates" {
                                    @for date in &options.released { option value=(date) {} }
                                }
                            }

                            div {
                                label class=(LABEL) for="genres" { "Genres" }
                                @if options.genres.is_empty() {
                                    input class=(INPUT) name="genres" id="genres";
                                } @else {
                                    select class=(INPUT) name="genres" id="genres" multiple size="6" {
                                        @for genre in &options.genres { option value=(genre) { (genre) } }
                                    }
                                }
                            }

                            div {
                                label class=(LABEL) for="type" { "Type" }
                                select class=(INPUT) name="type" id="type" {
                                    @for kind in MovieKind::ALL { option value=(kind.as_str()) { (kind.as_str()) } }
                                }
                            }

                            div {
                                label class=(LABEL) for="plot" { "Plot" }
                                textarea class=(INPUT) name="plot" id="plot" rows="4" {}
                            }

                            (text_field("cast", "Cast", None, false))
                            (text_field("directors", "Directors", None, false))
                            @if !credits_hint.is_empty() {
                                p class="text-xs text-gray-500" { (credits_hint) }
                            }

                            div class="grid gap-4 md:grid-cols-2" {
                                (text_field("languages", "Language", None, false))
                                (text_field("countries", "Countries", None, false))
                            }

                            (text_field("rated", "Rated", None, false))
                            (text_field("poster", "Poster URL", Some("posters"), false))
                            datalist id="posters" {
                                @for poster in &options.posters { option value=(poster) {} }
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Add movie" }
                        }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn search_form(view: &ListingView<'_>) -> Markup {
    let q = view.query;
    let selected_genre = ListQuery::param(&q.genre);
    let selected_kind = ListQuery::param(&q.kind);
    let ascending = ListQuery::param(&q.sort) == Some("asc");

    html! {
        form class="mt-8 bg-white shadow rounded-lg p-6 grid gap-4 md:grid-cols-3" method="get" action="/" {
            div {
                label class=(LABEL) for="title" { "Title" }
                input class=(INPUT) name="title" id="title" value=[ListQuery::param(&q.title)];
            }
            @if view.variant.plot_search() {
                div {
                    label class=(LABEL) for="plot" { "Plot" }
                    input class=(INPUT) name="plot" id="plot" value=[ListQuery::param(&q.plot)];
                }
            }
            div {
                label class=(LABEL) for="genre" { "Genre" }
                select class=(INPUT) name="genre" id="genre" {
                    option value="" { "All genres" }
                    @for genre in view.genres {
                        option value=(genre) selected[selected_genre == Some(genre.as_str())] { (genre) }
                    }
                }
            }
            div {
                label class=(LABEL) for="type" { "Type" }
                select class=(INPUT) name="type" id="type" {
                    option value="" { "Any" }
                    @for kind in MovieKind::ALL {
                        option value=(kind.as_str()) selected[selected_kind == Some(kind.as_str())] { (kind.as_str()) }
                    }
                }
            }
            div {
                label class=(LABEL) for="yearFrom" { "Year from" }
                input class=(INPUT) type="number" name="yearFrom" id="yearFrom" value=[ListQuery::param(&q.year_from)];
            }
            div {
                label class=(LABEL) for="yearTo" { "Year to" }
                input class=(INPUT) type="number" name="yearTo" id="yearTo" value=[ListQuery::param(&q.year_to)];
            }
            div {
                label class=(LABEL) for="sort" { "Sort" }
                select class=(INPUT) name="sort" id="sort" {
                    option value="desc" selected[!ascending] { "Newest first" }
                    option value="asc" selected[ascending] { "Oldest first" }
                }
            }
            div class="md:col-span-3 flex gap-4" {
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
                a class="px-4 py-2 text-sm text-gray-600 hover:text-gray-900" href="/" { "Reset" }
            }
        }
    }
}

fn text_field(name: &str, label: &str, list: Option<&str>, required: bool) -> Markup {
    html! {
        div {
            label class=(LABEL) for=(name) { (label) }
            input class=(INPUT) name=(name) id=(name) list=[list] required[required];
        }
    }
}

fn movie_card(movie: &Movie) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-4" {
            @if let Some(poster) = &movie.poster {
                img class="h-36 w-24 flex-none rounded object-cover" src=(poster) alt=(movie.title) loading="lazy";
            }
            div class="min-w-0" {
                h2 class="text-xl font-semibold text-gray-900" {
                    (movie.title)
                    @if let Some(year) = movie.year {
                        span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                    }
                }
                p class="mt-1 text-sm text-gray-500" {
                    @if let Some(kind) = &movie.kind { span { (kind) } }
                    @if let Some(rated) = &movie.rated { span { " · " (rated) } }
                    @if let Some(runtime) = movie.runtime { span { " · " (runtime) " min" } }
                }
                @if !movie.genres.is_empty() {
                    p class="mt-2 text-sm text-gray-700" { (movie.genres.join(", ")) }
                }
                @if !movie.directors.is_empty() {
                    p class="mt-1 text-sm text-gray-600" { "Directed by " (movie.directors.join(", ")) }
                }
                @if !movie.cast.is_empty() {
                    p class="mt-1 text-sm text-gray-600" { "With " (movie.cast.join(", ")) }
                }
                @if let Some(plot) = &movie.plot {
                    p class="mt-3 text-sm text-gray-700" { (plot) }
                }
            }
        }
    }
}
