//! Three-way result for single-entity reads.

use crate::error::TrailmatchError;

/// Outcome of reading one entity by key.
///
/// Keeps "the document does not exist" apart from "the store could not
/// answer", so callers can retry only on the latter.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The entity exists.
    Found(T),
    /// The store answered and the entity does not exist.
    NotFound,
    /// The store failed to answer, or returned a document that could not be read.
    Failed(TrailmatchError),
}

impl<T> Lookup<T> {
    /// Collapses to the legacy nullable convention: anything but `Found` is `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Failed(_) => None,
        }
    }

    /// Turns `NotFound` into `Ok(None)` and `Failed` into an error.
    pub fn into_result(self) -> Result<Option<T>, TrailmatchError> {
        match self {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::NotFound => Ok(None),
            Lookup::Failed(err) => Err(err),
        }
    }

    /// Like [`Lookup::into_result`], but a missing entity is also an error.
    pub fn require(self, entity_type: &'static str, id: &str) -> Result<T, TrailmatchError> {
        self.into_result()?
            .ok_or_else(|| TrailmatchError::not_found(entity_type, id))
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Lookup::Failed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Failed(err) => Lookup::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_option_hides_failure() {
        let lookup: Lookup<u8> = Lookup::Failed(TrailmatchError::unavailable("timeout"));
        assert_eq!(lookup.into_option(), None);
    }

    #[test]
    fn test_require_reports_not_found() {
        let lookup: Lookup<u8> = Lookup::NotFound;
        let err = lookup.require("user", "missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_into_result_surfaces_unavailable() {
        let lookup: Lookup<u8> = Lookup::Failed(TrailmatchError::unavailable("down"));
        assert!(lookup.into_result().unwrap_err().is_transient());
    }
}
