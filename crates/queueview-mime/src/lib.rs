//! # queueview-mime
//!
//! Content-type handling for request queue views.
//!
//! ## Features
//!
//! - **Stripping**: reduce a declared content type to `type/subtype`
//! - **Filter registry**: decide whether the node has a filter for a type
//! - **Handler tables**: load additional filters from JSON
//!
//! ## Quick Start
//!
//! ```
//! use queueview_mime::{FilterRegistry, MimeRegistry};
//!
//! let registry = FilterRegistry::builtin();
//! let stripped = registry.strip_mime_type("image/png; q=1");
//!
//! assert_eq!(stripped, "image/png");
//! assert!(registry.handler(stripped).is_some());
//! assert!(registry.handler("application/xyz").is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod error;
mod filter;

pub use content_type::strip_mime_type;
pub use error::{Error, Result};
pub use filter::{FilterRegistry, MimeHandler, MimeRegistry};
