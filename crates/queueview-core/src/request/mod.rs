//! Request records as reported by the request manager.
//!
//! A global snapshot mixes three kinds of requests: downloads, single-file
//! uploads and directory uploads. They share a priority, a lifecycle state,
//! a persistence class and block counters ([`RequestCommon`]); everything
//! else is variant specific and reached by matching on [`Record`].

mod model;
mod priority;
mod uri;

pub use model::{
    BlockProgress, CompressState, DownloadRecord, FailureCode, Persistence, Record,
    RequestCommon, RequestState, UploadDirRecord, UploadFileRecord,
};
pub use priority::Priority;
pub use uri::ContentUri;
