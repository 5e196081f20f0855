//! OMDb (Open Movie Database) lookup provider.
//!
//! Implements [`MovieLookup`] with a single title search against the OMDb
//! REST API:
//! - `GET {base_url}?apikey=..&t=<title>`, exactly one attempt, no retry.
//! - Explicit request timeout from [`OmdbConfig`].
//! - The API key is checked at construction, so a provider that exists can
//!   always issue its request.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, Instrument, Span};

use crate::config::{ConfigError, OmdbConfig};
use crate::metadata::provider::{LookupError, MovieFields, MovieLookup, RetrievedMovie};

/// Query parameter selecting OMDb's by-title search.
const TITLE_SEARCH_PARAM: &str = "t";

// ---------------------------------------------------------------------------
// OMDb response type (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

impl OmdbResponse {
    fn is_success(&self) -> bool {
        self.response.as_deref() == Some("True")
    }

    fn into_fields(self) -> Result<MovieFields, LookupError> {
        Ok(MovieFields {
            title: required(self.title, "Title")?,
            year: required(self.year, "Year")?,
            director: required(self.director, "Director")?,
            imdb_rating: required(self.imdb_rating, "imdbRating")?,
            poster: required(self.poster, "Poster")?,
            imdb_id: self.imdb_id,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, LookupError> {
    value.ok_or_else(|| LookupError::Decode(format!("missing field '{name}'")))
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// OMDb lookup provider.
///
/// # Examples
///
/// ```no_run
/// use popcorn::config::OmdbConfig;
/// use popcorn::metadata::providers::OmdbProvider;
///
/// let config = OmdbConfig {
///     api_key: Some("your-api-key".into()),
///     ..OmdbConfig::default()
/// };
/// let provider = OmdbProvider::new(&config).unwrap();
/// ```
pub struct OmdbProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    span: Span,
}

impl std::fmt::Debug for OmdbProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OmdbProvider {
    /// Create a provider from configuration.
    ///
    /// Fails with [`ConfigError::MissingApiKey`] when no key is configured.
    pub fn new(config: &OmdbConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                tracing::error!("OMDb API key not found. Check your environment variables");
                ConfigError::MissingApiKey
            })?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            span: tracing::info_span!("metadata", provider = "omdb"),
        })
    }

    async fn fetch(&self, title: &str) -> Result<RetrievedMovie, LookupError> {
        debug!(title, "OMDb title search");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), (TITLE_SEARCH_PARAM, title)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
            });
        }

        let body: OmdbResponse = resp.json().await?;
        if !body.is_success() {
            debug!(title, reason = ?body.error, "OMDb reported no match");
            return Err(LookupError::NotFound {
                title: title.to_string(),
            });
        }

        Ok(RetrievedMovie::new(body.into_fields()?))
    }
}

#[async_trait]
impl MovieLookup for OmdbProvider {
    fn name(&self) -> &'static str {
        "omdb"
    }

    async fn lookup(&self, title: &str) -> Result<RetrievedMovie, LookupError> {
        self.fetch(title).instrument(self.span.clone()).await
    }
}
