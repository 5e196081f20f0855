//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wraps an in-memory data manager, and
//! [`MockOmdb`], a wiremock server standing in for the OMDb API. The
//! [`TestHarness::with_server`] constructor starts Axum on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use popcorn::config::OmdbConfig;
use popcorn::metadata::OmdbProvider;
use popcorn::server::{create_router, AppContext};
use popcorn_common::UserId;
use popcorn_db::{DataManager, SqliteDataManager};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-key";

/// Test harness wrapping a data manager backed by an in-memory database.
pub struct TestHarness {
    pub manager: Arc<SqliteDataManager>,
}

impl TestHarness {
    pub fn new() -> Self {
        let manager =
            SqliteDataManager::open_in_memory().expect("failed to create in-memory database");
        Self {
            manager: Arc::new(manager),
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let manager: Arc<dyn DataManager> = harness.manager.clone();
        let app = create_router(AppContext { manager });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Create a user and return its id.
    pub fn create_user(&self, name: &str) -> UserId {
        self.manager
            .add_user(name)
            .ok()
            .expect("failed to create user")
            .id
    }
}

/// Wiremock server answering OMDb title searches.
pub struct MockOmdb {
    pub server: MockServer,
}

impl MockOmdb {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Provider pointed at this mock with the given timeout.
    pub fn provider_with_timeout(&self, timeout_secs: u64) -> OmdbProvider {
        OmdbProvider::new(&OmdbConfig {
            api_key: Some(TEST_API_KEY.to_string()),
            base_url: format!("{}/", self.server.uri()),
            timeout_secs,
        })
        .expect("failed to build provider")
    }

    pub fn provider(&self) -> OmdbProvider {
        self.provider_with_timeout(5)
    }

    /// Answer a search for `title` with `body` and HTTP 200.
    pub async fn respond(&self, title: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(query_param("apikey", TEST_API_KEY))
            .and(query_param("t", title))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer every request with `template`.
    pub async fn respond_with(&self, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    /// Answer every request after `delay`.
    pub async fn respond_slowly(&self, delay: Duration) {
        self.respond_with(
            ResponseTemplate::new(200)
                .set_body_json(shawshank())
                .set_delay(delay),
        )
        .await;
    }
}

/// A successful OMDb title search body.
pub fn shawshank() -> serde_json::Value {
    serde_json::json!({
        "Title": "The Shawshank Redemption",
        "Year": "1994",
        "Rated": "R",
        "Director": "Frank Darabont",
        "Poster": "https://m.media-amazon.com/images/M/shawshank.jpg",
        "imdbRating": "9.3",
        "imdbID": "tt0111161",
        "Type": "movie",
        "Response": "True"
    })
}

/// OMDb's body for a title it cannot resolve.
pub fn not_found() -> serde_json::Value {
    serde_json::json!({
        "Response": "False",
        "Error": "Movie not found!"
    })
}
