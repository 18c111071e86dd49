//! Transfer progress derived from block counters.

use serde::{Deserialize, Serialize};

use crate::request::Record;

/// Progress of a request, as shown in a queue listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestProgress {
    /// Blocks transferred so far.
    pub fetched: u32,
    /// Blocks needed to complete.
    pub required: u32,
    /// Total blocks.
    pub total: u32,
    /// Blocks that failed but may be retried.
    pub failed: u32,
    /// Blocks that failed permanently.
    pub fatally_failed: u32,
    /// Whether the totals are final.
    pub finalized: bool,
    /// Whether the request has completed successfully.
    pub succeeded: bool,
}

impl RequestProgress {
    /// Derives progress from a record.
    #[must_use]
    pub const fn of(record: &Record) -> Self {
        let blocks = record.common().blocks;
        Self {
            fetched: blocks.fetched,
            required: blocks.required,
            total: blocks.total,
            failed: blocks.failed,
            fatally_failed: blocks.fatally_failed,
            finalized: blocks.finalized,
            succeeded: record.has_succeeded(),
        }
    }

    /// Fraction of required blocks fetched, in `0.0..=1.0`.
    ///
    /// A succeeded request is always complete; nothing is known when no
    /// blocks are required yet.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.succeeded {
            return 1.0;
        }
        if self.required == 0 {
            return 0.0;
        }
        (f64::from(self.fetched) / f64::from(self.required)).clamp(0.0, 1.0)
    }

    /// Whole percent complete, rounded down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        // fraction() is clamped to 0..=1.
        (self.fraction() * 100.0).floor() as u8
    }

    /// Returns true while the block totals may still change.
    #[must_use]
    pub const fn is_estimate(&self) -> bool {
        !self.finalized
    }
}
