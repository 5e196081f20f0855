//! Integration tests for adding movies by title: lookup, then store.

mod common;

use common::{not_found, shawshank, MockOmdb, TestHarness};
use popcorn::library::add_movie_by_title;
use popcorn_common::{Error, Outcome, UserId};
use popcorn_db::DataManager;

#[tokio::test]
async fn adds_looked_up_movie_to_users_list() {
    let h = TestHarness::new();
    let user_id = h.create_user("Alice");
    let omdb = MockOmdb::start().await;
    omdb.respond("The Shawshank Redemption", shawshank()).await;

    let outcome = add_movie_by_title(
        &omdb.provider(),
        h.manager.as_ref(),
        user_id,
        "The Shawshank Redemption",
    )
    .await;
    let movie = outcome.ok().expect("movie should be stored");

    assert_eq!(movie.user_id, user_id);
    assert_eq!(movie.title, "The Shawshank Redemption");
    assert_eq!(movie.director, "Frank Darabont");
    assert_eq!(movie.year, 1994);
    assert_eq!(movie.rating, 9.3);
    assert_eq!(
        movie.img_url.as_deref(),
        Some("https://m.media-amazon.com/images/M/shawshank.jpg")
    );
    assert_eq!(
        movie.link.as_deref(),
        Some("https://www.imdb.com/title/tt0111161/")
    );

    let listed = h.manager.get_user_movies(user_id).unwrap_or_default();
    assert_eq!(listed, vec![movie]);
}

#[tokio::test]
async fn unresolved_title_stores_nothing() {
    let h = TestHarness::new();
    let user_id = h.create_user("Alice");
    let omdb = MockOmdb::start().await;
    omdb.respond("Nonexistent Film", not_found()).await;

    let outcome =
        add_movie_by_title(&omdb.provider(), h.manager.as_ref(), user_id, "Nonexistent Film")
            .await;

    assert!(outcome.is_not_found());
    assert!(h.manager.get_user_movies(user_id).unwrap_or_default().is_empty());
}

#[tokio::test]
async fn unknown_user_skips_lookup() {
    let h = TestHarness::new();
    let omdb = MockOmdb::start().await;

    let outcome = add_movie_by_title(
        &omdb.provider(),
        h.manager.as_ref(),
        UserId::new(42),
        "The Shawshank Redemption",
    )
    .await;

    assert!(outcome.is_not_found());
    let requests = omdb.server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn second_add_of_same_title_conflicts() {
    let h = TestHarness::new();
    let user_id = h.create_user("Alice");
    let omdb = MockOmdb::start().await;
    omdb.respond_with(wiremock::ResponseTemplate::new(200).set_body_json(shawshank()))
        .await;
    let provider = omdb.provider();

    let first =
        add_movie_by_title(&provider, h.manager.as_ref(), user_id, "The Shawshank Redemption")
            .await;
    assert!(first.is_done());

    let second =
        add_movie_by_title(&provider, h.manager.as_ref(), user_id, "The Shawshank Redemption")
            .await;
    assert!(matches!(second, Outcome::Failed(Error::Conflict(_))));
    assert_eq!(h.manager.get_user_movies(user_id).unwrap_or_default().len(), 1);
}
