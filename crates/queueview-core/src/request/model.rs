//! Request record models.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::priority::Priority;
use super::uri::ContentUri;

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// Still queued or transferring.
    #[default]
    Running,
    /// Completed successfully.
    Succeeded,
    /// Terminally failed.
    Failed,
}

/// How long the request manager keeps a request around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persistence {
    /// Dropped when the client disconnects.
    None,
    /// Survives until the node restarts.
    Reboot,
    /// Survives restarts.
    #[default]
    Forever,
}

/// Block counters reported for a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockProgress {
    /// Total blocks in the transfer.
    pub total: u32,
    /// Blocks needed to complete it.
    pub required: u32,
    /// Blocks transferred so far.
    pub fetched: u32,
    /// Blocks that failed but may be retried.
    pub failed: u32,
    /// Blocks that failed permanently.
    pub fatally_failed: u32,
    /// Whether `total` is final or still an estimate.
    pub finalized: bool,
}

/// Attributes shared by every request variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestCommon {
    /// Client-chosen request identifier.
    pub identifier: String,
    /// Scheduling priority.
    pub priority: Priority,
    /// Lifecycle state.
    pub state: RequestState,
    /// Last time the transfer made progress, if known.
    pub last_activity: Option<DateTime<Utc>>,
    /// Persistence class.
    pub persistence: Persistence,
    /// Block counters.
    pub blocks: BlockProgress,
}

impl RequestCommon {
    /// A queued or transferring request at the given priority.
    #[must_use]
    pub fn running(identifier: impl Into<String>, priority: Priority) -> Self {
        Self {
            identifier: identifier.into(),
            priority,
            ..Self::default()
        }
    }

    /// A request that completed successfully.
    #[must_use]
    pub fn succeeded(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            state: RequestState::Succeeded,
            ..Self::default()
        }
    }

    /// A request that failed terminally.
    #[must_use]
    pub fn failed(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            state: RequestState::Failed,
            ..Self::default()
        }
    }

    /// Sets the persistence class.
    #[must_use]
    pub const fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    /// Sets the block counters.
    #[must_use]
    pub const fn with_blocks(mut self, blocks: BlockProgress) -> Self {
        self.blocks = blocks;
        self
    }

    /// Sets the last activity from milliseconds since the epoch.
    ///
    /// The request manager reports `0` when it has no timestamp.
    #[must_use]
    pub fn with_last_activity_millis(mut self, millis: i64) -> Self {
        self.last_activity = if millis == 0 {
            None
        } else {
            DateTime::from_timestamp_millis(millis)
        };
        self
    }
}

/// Why a download failed.
///
/// Only the content-validation codes drive classification; the rest are
/// carried for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    /// No node had the data.
    DataNotFound,
    /// The request could not be routed.
    RouteNotFound,
    /// Peers rejected the request because they were overloaded.
    RejectedOverload,
    /// Not enough blocks of a splitfile could be found.
    AllDataNotFound,
    /// The content exceeded the size limit.
    TooBig,
    /// The request was cancelled.
    Cancelled,
    /// The key redirects permanently elsewhere.
    PermanentRedirect,
    /// Too many metadata redirects were followed.
    TooManyRedirects,
    /// The key could not be parsed.
    InvalidUri,
    /// The declared content type has no filter.
    ContentValidationUnknownMime,
    /// The content filter rejected the data.
    ContentValidationBadMime,
    /// Any other failure code, by number.
    Other(i32),
}

/// Compression progress of a file upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressState {
    /// Waiting for a compression slot.
    Waiting,
    /// Compressing the data.
    Compressing,
    /// Compression done; inserting.
    #[default]
    Working,
    /// Nothing to do.
    Idle,
}

/// A download (fetch) request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadRecord {
    /// Shared attributes.
    #[serde(flatten)]
    pub common: RequestCommon,
    /// Size in bytes, if known.
    pub data_size: Option<u64>,
    /// Declared content type, possibly with parameters. May be empty.
    pub mime_type: String,
    /// Failure reason for failed downloads.
    pub failure_code: Option<FailureCode>,
    /// Whether the data is kept in temporary space instead of on disk.
    pub to_temp_space: bool,
    /// Destination file on disk.
    pub dest_filename: Option<PathBuf>,
    /// Key being fetched.
    pub uri: Option<ContentUri>,
}

/// A single-file upload (insert) request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadFileRecord {
    /// Shared attributes.
    #[serde(flatten)]
    pub common: RequestCommon,
    /// Size in bytes, if known.
    pub data_size: Option<u64>,
    /// Declared content type. May be empty.
    pub mime_type: String,
    /// File the data was read from.
    pub orig_filename: Option<PathBuf>,
    /// Resulting key, once known.
    pub final_uri: Option<ContentUri>,
    /// Compression progress.
    pub compress_state: CompressState,
}

/// A directory (site) upload request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadDirRecord {
    /// Shared attributes.
    #[serde(flatten)]
    pub common: RequestCommon,
    /// Combined size of all files in bytes, if known.
    pub total_data_size: Option<u64>,
    /// Resulting key, once known.
    pub final_uri: Option<ContentUri>,
}

/// A request as reported in a global request snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    /// Download request.
    Download(DownloadRecord),
    /// File upload request.
    UploadFile(UploadFileRecord),
    /// Directory upload request.
    UploadDir(UploadDirRecord),
}

impl Record {
    /// Shared attributes of any variant.
    #[must_use]
    pub const fn common(&self) -> &RequestCommon {
        match self {
            Self::Download(r) => &r.common,
            Self::UploadFile(r) => &r.common,
            Self::UploadDir(r) => &r.common,
        }
    }

    /// Request identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.common().identifier
    }

    /// Scheduling priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.common().priority
    }

    /// Returns true if the request completed successfully.
    #[must_use]
    pub const fn has_succeeded(&self) -> bool {
        matches!(self.common().state, RequestState::Succeeded)
    }

    /// Returns true if the request reached a terminal state, successful or not.
    #[must_use]
    pub const fn has_finished(&self) -> bool {
        !matches!(self.common().state, RequestState::Running)
    }

    /// Last time the transfer made progress, if known.
    #[must_use]
    pub const fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.common().last_activity
    }

    /// Returns true if the request survives at least until reboot.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        !matches!(self.common().persistence, Persistence::None)
    }

    /// Returns true if the request survives restarts.
    #[must_use]
    pub const fn is_persistent_forever(&self) -> bool {
        matches!(self.common().persistence, Persistence::Forever)
    }

    /// Returns true if this is a download.
    #[must_use]
    pub const fn is_download(&self) -> bool {
        matches!(self, Self::Download(_))
    }
}

impl From<DownloadRecord> for Record {
    fn from(r: DownloadRecord) -> Self {
        Self::Download(r)
    }
}

impl From<UploadFileRecord> for Record {
    fn from(r: UploadFileRecord) -> Self {
        Self::UploadFile(r)
    }
}

impl From<UploadDirRecord> for Record {
    fn from(r: UploadDirRecord) -> Self {
        Self::UploadDir(r)
    }
}
