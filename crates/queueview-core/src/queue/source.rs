//! Snapshot sources.

use crate::error::{Error, Result};
use crate::request::Record;

/// Supplies the request manager's global request snapshot.
pub trait RequestSource {
    /// Returns every global request in the manager's order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PersistenceDisabled`] when the manager keeps no
    /// persistent requests.
    fn global_requests(&self) -> Result<Vec<Record>>;
}

impl<S: RequestSource + ?Sized> RequestSource for &S {
    fn global_requests(&self) -> Result<Vec<Record>> {
        (**self).global_requests()
    }
}

impl<S: RequestSource + ?Sized> RequestSource for std::sync::Arc<S> {
    fn global_requests(&self) -> Result<Vec<Record>> {
        (**self).global_requests()
    }
}

/// A fixed, in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Record>,
    persistence_enabled: bool,
}

impl StaticSource {
    /// Creates a source that always yields `records`.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            persistence_enabled: true,
        }
    }

    /// Creates a source whose manager has persistence turned off.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Decodes a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Snapshot`] if the JSON is not an array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Returns the number of records in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RequestSource for StaticSource {
    fn global_requests(&self) -> Result<Vec<Record>> {
        if !self.persistence_enabled {
            return Err(Error::PersistenceDisabled);
        }
        Ok(self.records.clone())
    }
}

impl FromIterator<Record> for StaticSource {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
