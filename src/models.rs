use mongodb::bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize};

/// A document of the `movies` collection.
///
/// Decoding is lenient so that records written by other tools (missing
/// fields, null lists, years stored as strings) still list.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Movie {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub runtime: Option<i32>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub cast: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub directors: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub countries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub lastupdated: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MovieKind {
    Movie,
    Series,
}

impl MovieKind {
    pub const ALL: [MovieKind; 2] = [MovieKind::Movie, MovieKind::Series];

    pub fn as_str(self) -> &'static str {
        match self {
            MovieKind::Movie => "movie",
            MovieKind::Series => "series",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(MovieKind::Movie),
            "series" => Some(MovieKind::Series),
            _ => None,
        }
    }
}

/// Query string of the listing page. Every field is optional; empty values
/// count as absent.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    pub genre: Option<String>,
    pub kind: Option<String>,
    pub year_from: Option<String>,
    pub year_to: Option<String>,
    pub title: Option<String>,
    pub plot: Option<String>,
    pub sort: Option<String>,
    pub success: Option<String>,
}

impl ListQuery {
    /// Builds the query from raw `key=value` pairs. Unknown keys are ignored
    /// and a repeated key keeps its first non-blank value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "genre" => &mut query.genre,
                "type" => &mut query.kind,
                "yearFrom" => &mut query.year_from,
                "yearTo" => &mut query.year_to,
                "title" => &mut query.title,
                "plot" => &mut query.plot,
                "sort" => &mut query.sort,
                "success" => &mut query.success,
                _ => continue,
            };
            if Self::param(slot).is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// The value of a parameter if it was supplied and is not blank.
    pub fn param(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Body of the add-movie form. List fields may be submitted once or repeated.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub plot: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub rated: String,
    #[serde(default)]
    pub poster: String,
}

/// Data for the dropdowns of the add-movie form.
#[derive(Clone, Debug, Default)]
pub struct FormOptions {
    pub titles: Vec<String>,
    pub released: Vec<String>,
    pub posters: Vec<String>,
    pub genres: Vec<String>,
}

/// Display label for a distinct value returned by the database.
pub fn bson_label(value: &Bson) -> Option<String> {
    match value {
        Bson::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        },
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(n) if n.is_finite() => Some(n.to_string()),
        Bson::DateTime(dt) => {
            let ts = jiff::Timestamp::from_millisecond(dt.timestamp_millis()).ok()?;
            Some(ts.strftime("%Y-%m-%d").to_string())
        },
        _ => None,
    }
}

fn bson_int(value: &Bson) -> Option<i32> {
    match value {
        Bson::Int32(n) => Some(*n),
        Bson::Int64(n) => i32::try_from(*n).ok(),
        Bson::Double(n) if n.is_finite() => Some(n.trunc() as i32),
        Bson::String(s) => {
            let digits: String = s
                .trim()
                .char_indices()
                .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '-'))
                .map(|(_, c)| c)
                .collect();
            digits.parse().ok()
        },
        _ => None,
    }
}

fn lenient_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Ok(bson_int(&Bson::deserialize(d)?))
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Bson::deserialize(d)? {
        Bson::String(s) => s,
        other => bson_label(&other).unwrap_or_default(),
    })
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Bson::deserialize(d)? {
        Bson::String(s) => Some(s),
        Bson::DateTime(dt) => jiff::Timestamp::from_millisecond(dt.timestamp_millis())
            .ok()
            .map(|ts| ts.to_string()),
        _ => None,
    })
}

fn lenient_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Bson::deserialize(d)? {
        Bson::Array(items) => items.iter().filter_map(bson_label).collect(),
        other => bson_label(&other).into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{self, doc};

    use super::*;

    #[test]
    fn decodes_sample_data_quirks() {
        let movie: Movie = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "title": "The Garden",
            "year": "2008è",
            "runtime": 92.0,
            "genres": "Documentary",
            "cast": Bson::Null,
            "type": "movie",
        })
        .unwrap();

        assert_eq!(movie.year, Some(2008));
        assert_eq!(movie.runtime, Some(92));
        assert_eq!(movie.genres, vec!["Documentary"]);
        assert!(movie.cast.is_empty());
        assert_eq!(movie.kind.as_deref(), Some("movie"));
        assert!(movie.languages.is_empty());
    }

    #[test]
    fn unparseable_year_is_absent() {
        let movie: Movie = bson::from_document(doc! { "title": "x", "year": "unknown" }).unwrap();
        assert_eq!(movie.year, None);
    }

    #[test]
    fn serializes_without_empty_optionals() {
        let movie = Movie { title: "Inception".into(), year: Some(2010), ..Default::default() };
        let doc = bson::to_document(&movie).unwrap();
        assert!(!doc.contains_key("_id"));
        assert!(!doc.contains_key("runtime"));
        assert_eq!(doc.get_i32("year").unwrap(), 2010);
        assert_eq!(doc.get_array("genres").unwrap().len(), 0);
    }

    #[test]
    fn labels_dates_as_days() {
        let dt = bson::DateTime::from_millis(1_279_238_400_000);
        assert_eq!(bson_label(&Bson::DateTime(dt)).as_deref(), Some("2010-07-16"));
        assert_eq!(bson_label(&Bson::String("  ".into())), None);
        assert_eq!(bson_label(&Bson::Null), None);
    }

    #[test]
    fn list_query_keeps_first_non_blank_value() {
        let query = ListQuery::from_pairs([
            ("genre", "Crime"),
            ("genre", "Drama"),
            ("title", ""),
            ("title", "heat"),
            ("yearFrom", "1990"),
            ("unknown", "x"),
        ]);
        assert_eq!(query.genre.as_deref(), Some("Crime"));
        assert_eq!(query.title.as_deref(), Some("heat"));
        assert_eq!(query.year_from.as_deref(), Some("1990"));
        assert_eq!(query.sort, None);
    }

    #[test]
    fn movie_kind_parses() {
        assert_eq!(MovieKind::parse("Series"), Some(MovieKind::Series));
        assert_eq!(MovieKind::parse("documentary"), None);
    }
}
