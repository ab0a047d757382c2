use mongodb::bson::{Document, doc};

use crate::models::ListQuery;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// Anything but `asc` means newest first.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("asc") => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }

    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }

    pub fn to_document(self) -> Document {
        doc! { "year": self.direction() }
    }
}

/// Predicates of a listing request. `None` means the predicate is not applied.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchFilter {
    pub genre: Option<String>,
    pub kind: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub title: Option<String>,
    pub plot: Option<String>,
}

impl SearchFilter {
    pub fn from_query(query: &ListQuery, plot_search: bool) -> Self {
        let text = |v: &Option<String>| ListQuery::param(v).map(str::to_string);
        let year = |v: &Option<String>| ListQuery::param(v).and_then(|s| s.parse::<i32>().ok());

        Self {
            genre: text(&query.genre),
            kind: text(&query.kind),
            year_from: year(&query.year_from),
            year_to: year(&query.year_to),
            title: text(&query.title),
            plot: if plot_search { text(&query.plot) } else { None },
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SearchFilter::default()
    }

    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();

        if let Some(genre) = &self.genre {
            filter.insert("genres", doc! { "$in": [genre.as_str()] });
        }
        if let Some(kind) = &self.kind {
            filter.insert("type", kind.as_str());
        }
        if self.year_from.is_some() || self.year_to.is_some() {
            let mut range = Document::new();
            if let Some(from) = self.year_from {
                range.insert("$gte", from);
            }
            if let Some(to) = self.year_to {
                range.insert("$lte", to);
            }
            filter.insert("year", range);
        }
        if let Some(title) = &self.title {
            filter.insert("title", substring(title));
        }
        if let Some(plot) = &self.plot {
            filter.insert("plot", substring(plot));
        }

        filter
    }
}

fn substring(needle: &str) -> Document {
    doc! { "$regex": regex::escape(needle), "$options": "i" }
}
