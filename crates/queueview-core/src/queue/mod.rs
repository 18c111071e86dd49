//! Global request queue, partitioned by category.
//!
//! A [`RequestQueue`] pulls one snapshot from a [`RequestSource`] and
//! sorts every request whose category is in the requested mask into:
//!
//! - a list per concrete [`Category`], or
//! - for content-validation failures, a map from stripped content type to
//!   requests, one for unknown types and one for types whose filter
//!   rejected the data.
//!
//! ```
//! use queueview_core::{Category, RequestQueue, StaticSource};
//!
//! let source = StaticSource::new(Vec::new());
//! let queue = RequestQueue::new(Category::DL_ALL | Category::UP_F, &source)?;
//!
//! assert!(queue.is_empty());
//! assert!(queue.get_list(Category::DL_ALL).is_err());
//! # Ok::<(), queueview_core::Error>(())
//! ```

mod category;
mod helper;
mod source;

pub use category::{Category, DOWNLOAD_CATEGORIES, LABELS, UPLOAD_CATEGORIES, matches};
pub use helper::{MimeBuckets, Placement, RequestQueue, classify};
pub use source::{RequestSource, StaticSource};
