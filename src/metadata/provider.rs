//! Trait definition and types for movie lookups.
//!
//! [`MovieLookup`] is the seam between the calling layer and an external
//! metadata service. [`RetrievedMovie`] is what a successful lookup yields:
//! the raw fields as the service sent them plus a canonical detail link.

use async_trait::async_trait;
use popcorn_common::{Error, Result, UserId};
use popcorn_db::NewMovie;
use serde::{Deserialize, Serialize};

/// Link used when the service returns no IMDb id.
pub const IMDB_ROOT: &str = "https://www.imdb.com";

/// OMDb's placeholder for a missing value.
const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Lookup result
// ---------------------------------------------------------------------------

/// The six fields a lookup extracts, kept as the text the service sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieFields {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "imdbID", default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
}

/// A successful lookup: fields and detail link always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedMovie {
    pub fields: MovieFields,
    pub link: String,
}

impl RetrievedMovie {
    /// Pair `fields` with the IMDb link derived from their id.
    pub fn new(fields: MovieFields) -> Self {
        let link = imdb_link(fields.imdb_id.as_deref());
        Self { fields, link }
    }

    /// Normalize into a record for `user_id`'s list.
    ///
    /// `Year` keeps its first four digits (`"2010–2013"` becomes 2010), an
    /// unavailable rating becomes 0.0 and an unavailable poster is dropped.
    pub fn to_new_movie(&self, user_id: UserId) -> Result<NewMovie> {
        let year = parse_year(&self.fields.year).ok_or_else(|| {
            Error::invalid_input(format!("unusable year '{}'", self.fields.year))
        })?;

        let rating = match self.fields.imdb_rating.trim() {
            NOT_AVAILABLE | "" => 0.0,
            raw => raw.parse::<f64>().map_err(|_| {
                Error::invalid_input(format!("unusable rating '{raw}'"))
            })?,
        };

        let img_url = match self.fields.poster.trim() {
            NOT_AVAILABLE | "" => None,
            url => Some(url.to_string()),
        };

        Ok(NewMovie {
            user_id,
            title: self.fields.title.clone(),
            director: self.fields.director.clone(),
            year,
            rating,
            img_url,
            link: Some(self.link.clone()),
        })
    }
}

/// `https://www.imdb.com/title/{id}/`, or the site root without an id.
pub fn imdb_link(imdb_id: Option<&str>) -> String {
    match imdb_id.map(str::trim) {
        Some(id) if !id.is_empty() => format!("{IMDB_ROOT}/title/{id}/"),
        _ => IMDB_ROOT.to_string(),
    }
}

/// Leading four-digit year of a field like `"1994"` or `"2010–2013"`.
fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().get(..4).and_then(|y| y.parse::<i32>().ok())
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a lookup produced no movie.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The service answered with a non-success status.
    #[error("HTTP error occurred: status {status}")]
    Http { status: u16 },

    /// The service could not be reached.
    #[error("Connection error: unable to connect to the API: {0}")]
    Connect(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The body was not a usable field map.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Any other transport failure.
    #[error("Request failed: {0}")]
    Request(String),

    /// The service reported that nothing matched the title.
    #[error("Movie not found or invalid title: {title}")]
    NotFound { title: String },
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key.
        let e = e.without_url();
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Http {
                status: status.as_u16(),
            }
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup trait
// ---------------------------------------------------------------------------

/// Async trait implemented by every movie metadata backend.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    /// Short, lowercase identifier for this backend (e.g. `"omdb"`).
    fn name(&self) -> &'static str;

    /// One request for `title`, with the failure kind preserved.
    async fn lookup(&self, title: &str) -> std::result::Result<RetrievedMovie, LookupError>;

    /// Fail-soft lookup: logs the cause of any failure and returns `None`.
    async fn retrieve_movie_data(&self, title: &str) -> Option<RetrievedMovie> {
        match self.lookup(title).await {
            Ok(movie) => {
                tracing::info!(provider = self.name(), title, "Successfully retrieved movie data");
                Some(movie)
            }
            Err(e @ LookupError::NotFound { .. }) => {
                tracing::warn!(provider = self.name(), title, "{e}");
                None
            }
            Err(e) => {
                tracing::error!(provider = self.name(), title, error = ?e, "{e}");
                None
            }
        }
    }
}
