//! Request priority classes.

use serde::{Deserialize, Serialize};

/// Scheduling priority of a request.
///
/// Lower values are served first. The node defines seven classes from
/// [`Priority::MAXIMUM`] (0) to [`Priority::PAUSED`] (6); requests in the
/// paused class are never started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub i16);

impl Priority {
    /// Highest priority, used for user-facing fetches that block a page.
    pub const MAXIMUM: Self = Self(0);
    /// Interactive requests.
    pub const INTERACTIVE: Self = Self(1);
    /// Splitfiles the user is waiting for.
    pub const IMMEDIATE_SPLITFILE: Self = Self(2);
    /// Software and plugin updates.
    pub const UPDATE: Self = Self(3);
    /// Bulk splitfile transfers, the default for queued downloads.
    pub const BULK_SPLITFILE: Self = Self(4);
    /// Speculative prefetches.
    pub const PREFETCH: Self = Self(5);
    /// Paused; the numerically largest class.
    pub const PAUSED: Self = Self(6);

    /// Create a priority from its raw value.
    #[must_use]
    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    /// Return the raw priority value.
    #[must_use]
    pub const fn value(self) -> i16 {
        self.0
    }

    /// Returns true if the value is one of the seven defined classes.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::MAXIMUM.0 && self.0 <= Self::PAUSED.0
    }

    /// Localization key naming this class.
    #[must_use]
    pub fn l10n_key(self) -> String {
        format!("{}.{}", crate::inspect::l10n::PRIORITY_PREFIX, self.0)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::BULK_SPLITFILE
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
