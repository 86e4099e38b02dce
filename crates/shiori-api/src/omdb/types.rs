//! OMDb wire types and their conversion into domain records.
//!
//! OMDb marks absent values with the literal string `"N/A"` and reports
//! runtimes as `"142 min"`; conversion normalizes both.

use serde::Deserialize;

use crate::traits::{MovieDetail, MovieSummary};

/// Body of an `s=<title>` search response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<RawSummary>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl SearchEnvelope {
    /// The canonical "no match" sentinel: `Response: "False"`.
    pub fn is_not_found(&self) -> bool {
        self.response.eq_ignore_ascii_case("false")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

impl RawSummary {
    pub fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster_url: self.poster.and_then(present),
        }
    }
}

/// Body of an `i=<id>` lookup response. The sentinel fields share the
/// envelope, so everything else is optional.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDetail {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "Released")]
    pub released: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
}

impl RawDetail {
    pub fn is_not_found(&self) -> bool {
        self.response.eq_ignore_ascii_case("false")
    }

    pub fn into_detail(self) -> MovieDetail {
        MovieDetail {
            id: self.imdb_id,
            title: self.title,
            poster_url: self.poster.and_then(present),
            released: self.released.and_then(present),
            runtime_minutes: self.runtime.as_deref().and_then(parse_runtime),
            genre: self.genre.and_then(present),
            director: self.director.and_then(present),
            actors: self.actors.and_then(present),
            plot: self.plot.and_then(present),
            catalog_rating: self.imdb_rating.as_deref().and_then(parse_rating),
        }
    }
}

/// `"N/A"` and empty strings count as absent.
fn present(s: String) -> Option<String> {
    if s.is_empty() || s == "N/A" {
        None
    } else {
        Some(s)
    }
}

/// Parse `"142 min"` into minutes.
fn parse_runtime(s: &str) -> Option<u32> {
    s.split_whitespace().next()?.parse().ok()
}

fn parse_rating(s: &str) -> Option<f32> {
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_envelope_parses() {
        let body = r#"{
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784",
                 "Type": "movie", "Poster": "https://img.example/bb.jpg"},
                {"Title": "Batman", "Year": "1989", "imdbID": "tt0096895",
                 "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;
        let env: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert!(!env.is_not_found());
        assert_eq!(env.search.len(), 2);

        let first = env.search.into_iter().next().unwrap().into_summary();
        assert_eq!(first.id, "tt0372784");
        assert_eq!(first.year, "2005");
        assert_eq!(first.poster_url.as_deref(), Some("https://img.example/bb.jpg"));
    }

    #[test]
    fn test_not_found_sentinel() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let env: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert!(env.is_not_found());
        assert_eq!(env.error.as_deref(), Some("Movie not found!"));
        assert!(env.search.is_empty());
    }

    #[test]
    fn test_detail_conversion() {
        let body = r#"{
            "Title": "Inception", "Year": "2010", "Released": "16 Jul 2010",
            "Runtime": "148 min", "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt",
            "Plot": "A thief who steals corporate secrets...",
            "Poster": "https://img.example/inception.jpg",
            "imdbRating": "8.8", "imdbID": "tt1375666", "Response": "True"
        }"#;
        let raw: RawDetail = serde_json::from_str(body).unwrap();
        assert!(!raw.is_not_found());

        let detail = raw.into_detail();
        assert_eq!(detail.id, "tt1375666");
        assert_eq!(detail.runtime_minutes, Some(148));
        assert_eq!(detail.catalog_rating, Some(8.8));
        assert_eq!(detail.director.as_deref(), Some("Christopher Nolan"));
    }

    #[test]
    fn test_detail_na_fields_become_none() {
        let body = r#"{
            "Title": "Obscure Short", "Runtime": "N/A", "Genre": "N/A",
            "Director": "N/A", "Actors": "N/A", "Plot": "N/A", "Poster": "N/A",
            "imdbRating": "N/A", "imdbID": "tt0000001", "Response": "True"
        }"#;
        let detail: MovieDetail = serde_json::from_str::<RawDetail>(body)
            .unwrap()
            .into_detail();
        assert_eq!(detail.runtime_minutes, None);
        assert_eq!(detail.catalog_rating, None);
        assert_eq!(detail.poster_url, None);
        assert_eq!(detail.plot, None);
    }

    #[test]
    fn test_runtime_parsing() {
        assert_eq!(parse_runtime("148 min"), Some(148));
        assert_eq!(parse_runtime("90"), Some(90));
        assert_eq!(parse_runtime("N/A"), None);
        assert_eq!(parse_runtime(""), None);
    }
}
