//! Movie database queries.
//!
//! This module provides CRUD operations for the entries in users' lists.

use popcorn_common::{Error, MovieId, Result, UserId};
use rusqlite::Connection;

use crate::models::{Movie, NewMovie};

/// Column list matching [`Movie::from_row`].
pub(crate) const MOVIE_COLUMNS: &str =
    "id, user_id, title, director, year, rating, img_url, link";

/// Insert a movie and return it with its assigned id.
///
/// # Returns
///
/// * `Ok(Movie)` - The stored movie
/// * `Err(Error::InvalidInput)` - If the owning user does not exist
/// * `Err(Error::Database)` - On any other database error
pub fn create_movie(conn: &Connection, movie: &NewMovie) -> Result<Movie> {
    conn.execute(
        "INSERT INTO movies (user_id, title, director, year, rating, img_url, link)
         VALUES (:user_id, :title, :director, :year, :rating, :img_url, :link)",
        rusqlite::named_params! {
            ":user_id": movie.user_id.get(),
            ":title": movie.title,
            ":director": movie.director,
            ":year": movie.year,
            ":rating": movie.rating,
            ":img_url": movie.img_url,
            ":link": movie.link,
        },
    )
    .map_err(|e| {
        if e.to_string().contains("FOREIGN KEY constraint failed") {
            Error::InvalidInput(format!("User {} does not exist", movie.user_id))
        } else {
            Error::database(e.to_string())
        }
    })?;

    Ok(Movie {
        id: MovieId::new(conn.last_insert_rowid()),
        user_id: movie.user_id,
        title: movie.title.clone(),
        director: movie.director.clone(),
        year: movie.year,
        rating: movie.rating,
        img_url: movie.img_url.clone(),
        link: movie.link.clone(),
    })
}

/// Get a movie by ID.
pub fn get_movie(conn: &Connection, id: MovieId) -> Result<Option<Movie>> {
    let result = conn.query_row(
        &format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = :id"),
        rusqlite::named_params! { ":id": id.get() },
        Movie::from_row,
    );

    match result {
        Ok(movie) => Ok(Some(movie)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List the movies owned by `user_id` in insertion order.
///
/// An unknown user simply has no movies.
pub fn list_movies_for_user(conn: &Connection, user_id: UserId) -> Result<Vec<Movie>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE user_id = :user_id ORDER BY id"
        ))
        .map_err(|e| Error::database(e.to_string()))?;

    let movies = stmt
        .query_map(
            rusqlite::named_params! { ":user_id": user_id.get() },
            Movie::from_row,
        )
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(movies)
}

/// Find a movie in `user_id`'s list whose title equals `title` exactly.
///
/// The comparison is case-sensitive (SQLite's default `BINARY` collation).
pub fn find_movie_by_title(
    conn: &Connection,
    user_id: UserId,
    title: &str,
) -> Result<Option<Movie>> {
    let result = conn.query_row(
        &format!(
            "SELECT {MOVIE_COLUMNS} FROM movies
             WHERE user_id = :user_id AND title = :title
             ORDER BY id LIMIT 1"
        ),
        rusqlite::named_params! { ":user_id": user_id.get(), ":title": title },
        Movie::from_row,
    );

    match result {
        Ok(movie) => Ok(Some(movie)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Write every updatable column of `movie` back to its row.
///
/// # Returns
///
/// * `Ok(())` - If the row was updated
/// * `Err(Error::NotFound)` - If no row has `movie.id`
/// * `Err(Error::Database)` - If a database error occurs
pub fn update_movie(conn: &Connection, movie: &Movie) -> Result<()> {
    let rows_affected = conn
        .execute(
            "UPDATE movies
             SET title = :title, director = :director, year = :year,
                 rating = :rating, img_url = :img_url, link = :link
             WHERE id = :id",
            rusqlite::named_params! {
                ":id": movie.id.get(),
                ":title": movie.title,
                ":director": movie.director,
                ":year": movie.year,
                ":rating": movie.rating,
                ":img_url": movie.img_url,
                ":link": movie.link,
            },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    if rows_affected == 0 {
        return Err(Error::not_found(format!("movie {}", movie.id)));
    }

    Ok(())
}

/// Delete a movie.
///
/// # Returns
///
/// * `Ok(true)` - If the movie was deleted
/// * `Ok(false)` - If the movie did not exist
/// * `Err(Error)` - If a database error occurs
pub fn delete_movie(conn: &Connection, id: MovieId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM movies WHERE id = :id",
            rusqlite::named_params! { ":id": id.get() },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}
