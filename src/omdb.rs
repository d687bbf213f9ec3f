//! OMDb API client and rating aggregation.

use serde::Deserialize;

use crate::error::{BotError, Result};
use crate::MovieInfoSource;

const OMDB_URL: &str = "https://www.omdbapi.com/";

/// The sentinel OMDb puts in its `Error` field when a title has no match.
/// Kept in one place; everything else asks [`MovieRecord::is_found`].
const NOT_FOUND_SENTINEL: &str = "Movie not found!";

/// One entry of the OMDb `Ratings` array, e.g.
/// `{"Source": "Rotten Tomatoes", "Value": "77%"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingEntry {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Parsed OMDb payload. Every field is optional at this layer; the
/// found-check and the rating aggregation enforce what they need.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Rated")]
    pub rated: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
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
    #[serde(rename = "Metascore")]
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<RatingEntry>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl MovieRecord {
    /// Whether this record describes an actual movie rather than the API's
    /// "no match" response.
    pub fn is_found(&self) -> bool {
        self.error.as_deref() != Some(NOT_FOUND_SENTINEL)
    }
}

/// Blend the three rating sources into one 0-100 score:
/// `round((Metascore + imdbRating*10 + RottenTomatoes%) / 3)`.
///
/// A missing or malformed source is a contract violation upstream and
/// surfaces as [`BotError::MissingField`]; no default score is ever
/// substituted, since that would silently corrupt the blend.
pub fn blended_score(record: &MovieRecord) -> Result<i64> {
    let metascore: f64 = record
        .metascore
        .as_deref()
        .and_then(|s| s.trim().parse().ok())
        .ok_or(BotError::MissingField { field: "Metascore" })?;
    let imdb: f64 = record
        .imdb_rating
        .as_deref()
        .and_then(|s| s.trim().parse().ok())
        .ok_or(BotError::MissingField { field: "imdbRating" })?;
    // Rotten Tomatoes sits at index 1 of the Ratings array, value "NN%".
    let tomatoes: f64 = record
        .ratings
        .get(1)
        .and_then(|r| r.value.strip_suffix('%'))
        .and_then(|s| s.trim().parse().ok())
        .ok_or(BotError::MissingField {
            field: "Ratings[1].Value",
        })?;
    Ok(((metascore + imdb * 10.0 + tomatoes) / 3.0).round() as i64)
}

/// OMDb client: one GET per lookup, title passed as the `t` query param.
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, OMDB_URL)
    }

    pub fn with_base_url(
        client: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait::async_trait]
impl MovieInfoSource for OmdbClient {
    async fn lookup(&self, title: &str) -> Result<MovieRecord> {
        let record = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?
            .error_for_status()?
            .json::<MovieRecord>()
            .await?;
        Ok(record)
    }
}
