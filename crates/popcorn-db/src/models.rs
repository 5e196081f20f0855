//! Rust models matching the database schema.
//!
//! [`User`] and [`Movie`] mirror the `users` and `movies` tables. [`NewMovie`]
//! is the fully populated field set accepted on insert, and [`MovieUpdate`]
//! is the partial update over the closed set of [`MovieField`]s.

use popcorn_common::{Error, MovieId, Result, UserId};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// User account model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    /// Map a `SELECT id, name` row.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: UserId::new(row.get(0)?),
            name: row.get(1)?,
        })
    }
}

/// Movie entry in a user's list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub user_id: UserId,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f64,
    pub img_url: Option<String>,
    pub link: Option<String>,
}

impl Movie {
    /// Map a row selected with [`MOVIE_COLUMNS`](crate::queries::movies::MOVIE_COLUMNS).
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: MovieId::new(row.get(0)?),
            user_id: UserId::new(row.get(1)?),
            title: row.get(2)?,
            director: row.get(3)?,
            year: row.get(4)?,
            rating: row.get(5)?,
            img_url: row.get(6)?,
            link: row.get(7)?,
        })
    }
}

/// Field set for a movie that has not been stored yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMovie {
    pub user_id: UserId,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f64,
    pub img_url: Option<String>,
    pub link: Option<String>,
}

impl NewMovie {
    /// Reject field sets the `movies` table would accept but the model does not.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::invalid_input("movie title must not be empty"));
        }
        if self.director.trim().is_empty() {
            return Err(Error::invalid_input("movie director must not be empty"));
        }
        if !self.rating.is_finite() {
            return Err(Error::invalid_input(format!(
                "movie rating must be a finite number, got {}",
                self.rating
            )));
        }
        Ok(())
    }
}

/// The movie columns a [`MovieUpdate`] may overwrite.
///
/// `id` and `user_id` are deliberately absent: an entry never changes owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieField {
    Title,
    Director,
    Year,
    Rating,
    ImgUrl,
    Link,
}

impl MovieField {
    /// Every updatable field, in column order.
    pub const ALL: [MovieField; 6] = [
        Self::Title,
        Self::Director,
        Self::Year,
        Self::Rating,
        Self::ImgUrl,
        Self::Link,
    ];

    /// Column / form key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Director => "director",
            Self::Year => "year",
            Self::Rating => "rating",
            Self::ImgUrl => "img_url",
            Self::Link => "link",
        }
    }
}

impl std::fmt::Display for MovieField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovieField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "unknown movie field '{}' (expected one of: {})",
                    s,
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }
}

/// Partial update of a movie. `None` leaves the column untouched.
///
/// For the optional columns the inner `None` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub img_url: Option<Option<String>>,
    pub link: Option<Option<String>>,
}

impl MovieUpdate {
    /// Build an update from textual key/value pairs such as form input.
    ///
    /// Unknown keys and values that do not parse for their field are
    /// rejected. An empty value clears `img_url` or `link`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut update = Self::default();
        for (key, value) in pairs {
            let field: MovieField = key.as_ref().parse()?;
            update.set(field, value.as_ref())?;
        }
        Ok(update)
    }

    /// Parse `raw` for `field` and record it in this update.
    pub fn set(&mut self, field: MovieField, raw: &str) -> Result<()> {
        match field {
            MovieField::Title => self.title = Some(required_text(field, raw)?),
            MovieField::Director => self.director = Some(required_text(field, raw)?),
            MovieField::Year => {
                let year = raw.trim().parse::<i32>().map_err(|_| {
                    Error::invalid_input(format!("year must be an integer, got '{raw}'"))
                })?;
                self.year = Some(year);
            }
            MovieField::Rating => {
                let rating = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|r| r.is_finite())
                    .ok_or_else(|| {
                        Error::invalid_input(format!("rating must be a number, got '{raw}'"))
                    })?;
                self.rating = Some(rating);
            }
            MovieField::ImgUrl => self.img_url = Some(optional_text(raw)),
            MovieField::Link => self.link = Some(optional_text(raw)),
        }
        Ok(())
    }

    /// Fields this update touches.
    pub fn fields(&self) -> Vec<MovieField> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push(MovieField::Title);
        }
        if self.director.is_some() {
            fields.push(MovieField::Director);
        }
        if self.year.is_some() {
            fields.push(MovieField::Year);
        }
        if self.rating.is_some() {
            fields.push(MovieField::Rating);
        }
        if self.img_url.is_some() {
            fields.push(MovieField::ImgUrl);
        }
        if self.link.is_some() {
            fields.push(MovieField::Link);
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Overwrite the supplied fields on `movie`.
    pub fn apply_to(&self, movie: &mut Movie) {
        if let Some(ref title) = self.title {
            movie.title = title.clone();
        }
        if let Some(ref director) = self.director {
            movie.director = director.clone();
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(rating) = self.rating {
            movie.rating = rating;
        }
        if let Some(ref img_url) = self.img_url {
            movie.img_url = img_url.clone();
        }
        if let Some(ref link) = self.link {
            movie.link = link.clone();
        }
    }
}

fn required_text(field: MovieField, raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(Error::invalid_input(format!("{field} must not be empty")));
    }
    Ok(raw.to_string())
}

fn optional_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
