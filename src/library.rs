//! Operations that combine a metadata lookup with a store write.

use popcorn_common::{Outcome, UserId};
use popcorn_db::{DataManager, Movie};
use tracing::warn;

use crate::metadata::MovieLookup;

/// Look `title` up and add the result to `user_id`'s list.
///
/// The lookup finishes before any write starts. An unknown user or a title
/// the service cannot resolve yields [`Outcome::NotFound`] and leaves the
/// store untouched; duplicates and store faults come back from the data
/// manager as [`Outcome::Failed`].
pub async fn add_movie_by_title(
    lookup: &dyn MovieLookup,
    manager: &dyn DataManager,
    user_id: UserId,
    title: &str,
) -> Outcome<Movie> {
    match manager.get_user(user_id) {
        Outcome::Done(_) => {}
        Outcome::NotFound => {
            warn!(user_id = %user_id, "Cannot add a movie for an unknown user");
            return Outcome::NotFound;
        }
        Outcome::Failed(e) => return Outcome::Failed(e),
    }

    let Some(retrieved) = lookup.retrieve_movie_data(title).await else {
        return Outcome::NotFound;
    };

    let record = match retrieved.to_new_movie(user_id) {
        Ok(record) => record,
        Err(e) => {
            warn!(title, error = %e, "Lookup result cannot be stored");
            return Outcome::Failed(e);
        }
    };

    manager.add_movie(record)
}
