//! Three-way result returned by the data manager.
//!
//! Store faults never cross the data manager boundary as `Err`. They are
//! logged where they happen and reported as [`Outcome::Failed`], kept apart
//! from [`Outcome::NotFound`] so callers can branch on which one occurred.
//! Callers that only want the old sentinel view can use [`Outcome::ok`],
//! [`Outcome::unwrap_or_default`] or [`Outcome::is_done`].

use crate::Error;

/// Result of a data manager operation.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The operation succeeded.
    Done(T),
    /// The addressed entity does not exist. Nothing was written.
    NotFound,
    /// The operation failed and any transaction was rolled back.
    Failed(Error),
}

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Done`].
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Returns `true` for [`Outcome::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns `true` for [`Outcome::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Sentinel view: the value on success, `None` otherwise.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    /// The error carried by a failed outcome.
    pub fn err(&self) -> Option<&Error> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Maps the success value, leaving the other variants untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Done(value) => Outcome::Done(f(value)),
            Self::NotFound => Outcome::NotFound,
            Self::Failed(e) => Outcome::Failed(e),
        }
    }

    /// Converts into a `Result`, turning `NotFound` into [`Error::NotFound`]
    /// described by `what`.
    pub fn into_result(self, what: &str) -> crate::Result<T> {
        match self {
            Self::Done(value) => Ok(value),
            Self::NotFound => Err(Error::not_found(what)),
            Self::Failed(e) => Err(e),
        }
    }
}

impl<T: Default> Outcome<T> {
    /// Sentinel view for collections: the value on success, empty otherwise.
    pub fn unwrap_or_default(self) -> T {
        self.ok().unwrap_or_default()
    }
}

impl<T> From<crate::Result<Option<T>>> for Outcome<T> {
    fn from(result: crate::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Self::Done(value),
            Ok(None) => Self::NotFound,
            Err(e) => Self::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_views() {
        let done: Outcome<Vec<i32>> = Outcome::Done(vec![1, 2]);
        assert!(done.is_done());
        assert_eq!(done.unwrap_or_default(), vec![1, 2]);

        let missing: Outcome<Vec<i32>> = Outcome::NotFound;
        assert!(missing.is_not_found());
        assert!(missing.unwrap_or_default().is_empty());

        let failed: Outcome<Vec<i32>> = Outcome::Failed(Error::database("locked"));
        assert!(failed.is_failed());
        assert!(failed.err().is_some());
        assert!(failed.ok().is_none());
    }

    #[test]
    fn test_map_keeps_variant() {
        let done = Outcome::Done(2).map(|n| n * 10);
        assert!(matches!(done, Outcome::Done(20)));

        let missing: Outcome<i32> = Outcome::NotFound;
        assert!(missing.map(|n| n + 1).is_not_found());
    }

    #[test]
    fn test_from_result_option() {
        let outcome: Outcome<i32> = Ok(Some(1)).into();
        assert!(outcome.is_done());

        let outcome: Outcome<i32> = Ok(None).into();
        assert!(outcome.is_not_found());

        let outcome: Outcome<i32> = Err(Error::internal("boom")).into();
        assert!(outcome.is_failed());
    }

    #[test]
    fn test_into_result() {
        let missing: Outcome<i32> = Outcome::NotFound;
        let err = missing.into_result("movie 4").unwrap_err();
        assert_eq!(err.to_string(), "Not found: movie 4");
    }
}
