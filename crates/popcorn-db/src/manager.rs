//! The data manager: every read and write of users and movies.
//!
//! [`DataManager`] is the surface the request-handling layer talks to. It
//! never returns `Err`. Faults are logged where they occur and reported as
//! [`Outcome::Failed`]; missing rows are [`Outcome::NotFound`].
//!
//! Each mutating operation runs inside one transaction. The closure passed
//! to the internal `write` helper either returns a value, in which case the
//! transaction commits, or returns `None` / an error, in which case the
//! transaction is dropped and SQLite rolls it back.

use popcorn_common::{Error, MovieId, Outcome, Result, UserId};
use rusqlite::{Connection, Transaction};
use tracing::{debug, error, info, warn, Span};

use crate::models::{Movie, MovieUpdate, NewMovie, User};
use crate::pool::{self, DbPool};
use crate::queries::{movies, users};

/// Store-agnostic access to users and their movie lists.
pub trait DataManager: Send + Sync {
    /// All users, oldest first.
    fn get_all_users(&self) -> Outcome<Vec<User>>;

    /// A single user.
    fn get_user(&self, user_id: UserId) -> Outcome<User>;

    /// Movies owned by `user_id`. An unknown user yields an empty list.
    fn get_user_movies(&self, user_id: UserId) -> Outcome<Vec<Movie>>;

    /// A single movie.
    fn get_movie(&self, movie_id: MovieId) -> Outcome<Movie>;

    /// Create a user named `name`. Blank names are rejected.
    fn add_user(&self, name: &str) -> Outcome<User>;

    /// Store a fully populated movie.
    ///
    /// Fails with [`Error::Conflict`] when the owner already lists a movie
    /// with exactly the same title, and with [`Error::InvalidInput`] when the
    /// owner does not exist.
    fn add_movie(&self, movie: NewMovie) -> Outcome<Movie>;

    /// Overwrite the fields present in `update`.
    fn update_movie(&self, movie_id: MovieId, update: MovieUpdate) -> Outcome<Movie>;

    /// Remove a movie. `NotFound` when there was nothing to remove.
    fn delete_movie(&self, movie_id: MovieId) -> Outcome<()>;
}

/// [`DataManager`] backed by a pooled SQLite database.
#[derive(Clone)]
pub struct SqliteDataManager {
    pool: DbPool,
    span: Span,
}

impl SqliteDataManager {
    /// Wrap an initialized pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            span: tracing::info_span!("data_manager", backend = "sqlite"),
        }
    }

    /// Open (or create) the database file at `db_path`.
    pub fn open(db_path: &str) -> Result<Self> {
        let pool = pool::init_pool(db_path)?;
        let manager = Self::new(pool);
        manager.span.in_scope(|| info!(path = db_path, "Opened movie database"));
        Ok(manager)
    }

    /// Fresh private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(pool::init_memory_pool()?))
    }

    /// The underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn read<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&Connection) -> Result<Option<T>>,
    ) -> Outcome<T> {
        let _entered = self.span.enter();
        let result = pool::get_conn(&self.pool).and_then(|conn| f(&*conn));
        match result {
            Ok(Some(value)) => Outcome::Done(value),
            Ok(None) => {
                debug!(op, "No matching row");
                Outcome::NotFound
            }
            Err(e) => {
                error!(op, error = %e, "Read failed");
                Outcome::Failed(e)
            }
        }
    }

    fn write<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&Transaction<'_>) -> Result<Option<T>>,
    ) -> Outcome<T> {
        let _entered = self.span.enter();
        let result = pool::get_conn(&self.pool).and_then(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| Error::database(format!("Failed to begin transaction: {e}")))?;
            match f(&tx)? {
                Some(value) => {
                    tx.commit()
                        .map_err(|e| Error::database(format!("Failed to commit: {e}")))?;
                    Ok(Some(value))
                }
                // Dropping the transaction rolls it back.
                None => Ok(None),
            }
        });

        match result {
            Ok(Some(value)) => Outcome::Done(value),
            Ok(None) => {
                warn!(op, "Target row does not exist, nothing written");
                Outcome::NotFound
            }
            Err(e) => {
                match e {
                    Error::InvalidInput(_) | Error::Conflict(_) => {
                        warn!(op, error = %e, "Write rejected, rolled back")
                    }
                    _ => error!(op, error = %e, "Write failed, rolled back"),
                }
                Outcome::Failed(e)
            }
        }
    }
}

impl DataManager for SqliteDataManager {
    fn get_all_users(&self) -> Outcome<Vec<User>> {
        self.read("get_all_users", |conn| users::list_users(conn).map(Some))
    }

    fn get_user(&self, user_id: UserId) -> Outcome<User> {
        self.read("get_user", |conn| users::get_user(conn, user_id))
    }

    fn get_user_movies(&self, user_id: UserId) -> Outcome<Vec<Movie>> {
        self.read("get_user_movies", |conn| {
            movies::list_movies_for_user(conn, user_id).map(Some)
        })
    }

    fn get_movie(&self, movie_id: MovieId) -> Outcome<Movie> {
        self.read("get_movie", |conn| movies::get_movie(conn, movie_id))
    }

    fn add_user(&self, name: &str) -> Outcome<User> {
        self.write("add_user", |tx| {
            if name.trim().is_empty() {
                return Err(Error::invalid_input("user name must not be empty"));
            }
            let user = users::create_user(tx, name)?;
            info!(user_id = %user.id, name = %user.name, "Added user");
            Ok(Some(user))
        })
    }

    fn add_movie(&self, movie: NewMovie) -> Outcome<Movie> {
        self.write("add_movie", |tx| {
            movie.validate()?;
            if movies::find_movie_by_title(tx, movie.user_id, &movie.title)?.is_some() {
                return Err(Error::conflict(format!(
                    "'{}' is already in user {}'s list",
                    movie.title, movie.user_id
                )));
            }
            let stored = movies::create_movie(tx, &movie)?;
            info!(
                movie_id = %stored.id,
                user_id = %stored.user_id,
                title = %stored.title,
                "Added movie"
            );
            Ok(Some(stored))
        })
    }

    fn update_movie(&self, movie_id: MovieId, update: MovieUpdate) -> Outcome<Movie> {
        self.write("update_movie", |tx| {
            let Some(mut movie) = movies::get_movie(tx, movie_id)? else {
                return Ok(None);
            };
            if update.is_empty() {
                debug!(movie_id = %movie_id, "Empty update, nothing to write");
                return Ok(Some(movie));
            }

            if let Some(ref title) = update.title {
                if let Some(existing) = movies::find_movie_by_title(tx, movie.user_id, title)? {
                    if existing.id != movie.id {
                        return Err(Error::conflict(format!(
                            "'{}' is already in user {}'s list",
                            title, movie.user_id
                        )));
                    }
                }
            }

            update.apply_to(&mut movie);
            movies::update_movie(tx, &movie)?;
            info!(movie_id = %movie_id, fields = ?update.fields(), "Updated movie");
            Ok(Some(movie))
        })
    }

    fn delete_movie(&self, movie_id: MovieId) -> Outcome<()> {
        self.write("delete_movie", |tx| {
            if movies::delete_movie(tx, movie_id)? {
                info!(movie_id = %movie_id, "Deleted movie");
                Ok(Some(()))
            } else {
                Ok(None)
            }
        })
    }
}
