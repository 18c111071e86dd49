//! # queueview-core
//!
//! Read-only views of a peer-to-peer node's global request queue.
//!
//! This crate provides:
//! - Request records for downloads, file uploads and directory uploads
//! - The bit-encoded category algebra used to select queue partitions
//! - [`RequestQueue`], a one-shot partitioned snapshot of the queue
//! - The [`inspect`] functions deriving display attributes from a record
//!
//! ## Example
//!
//! ```
//! use queueview_core::{
//!     Category, DownloadRecord, Priority, Record, RequestCommon, RequestQueue, StaticSource,
//!     inspect,
//! };
//!
//! let source = StaticSource::new(vec![Record::from(DownloadRecord {
//!     common: RequestCommon::running("fetch-1", Priority::UPDATE),
//!     data_size: Some(100),
//!     ..Default::default()
//! })]);
//!
//! let queue = RequestQueue::new(Category::DL_UC, &source)?;
//! assert_eq!(queue.total_download_bytes(), 100);
//! assert_eq!(queue.lowest_queued_priority(), Priority::UPDATE);
//!
//! for record in queue.get_list(Category::DL_UC)?.unwrap_or_default() {
//!     assert_eq!(inspect::priority(record), "3");
//! }
//! # Ok::<(), queueview_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod error;
pub mod inspect;
pub mod queue;
pub mod request;
pub mod time;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use inspect::{KeyLink, LastActivity, RequestProgress};
pub use queue::{Category, MimeBuckets, Placement, RequestQueue, RequestSource, StaticSource};
pub use request::{
    BlockProgress, CompressState, ContentUri, DownloadRecord, FailureCode, Persistence, Priority,
    Record, RequestCommon, RequestState, UploadDirRecord, UploadFileRecord,
};
