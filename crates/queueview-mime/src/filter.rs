//! Content filter registry.
//!
//! The node only lets content through when a filter exists for its type.
//! A request that failed content validation reports either an unknown
//! type (no filter at all) or a bad type (a filter exists but rejected the
//! data). The registry answers which of the two a stripped type really is.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content_type::strip_mime_type;
use crate::error::{Error, Result};

/// Description of a content type the node knows how to filter.
///
/// In a JSON handler table only `primary_type` is required:
///
/// ```json
/// [{"primary_type": "application/pdf", "aliases": ["application/x-pdf"]}]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeHandler {
    /// Canonical `type/subtype`.
    pub primary_type: String,
    /// Other names the same content is declared under.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Whether the content can be displayed without filtering.
    #[serde(default)]
    pub safe_to_read: bool,
    /// Whether a read filter is available.
    #[serde(default = "default_read_filter")]
    pub has_read_filter: bool,
    /// Whether the type takes a `charset` parameter.
    #[serde(default)]
    pub takes_charset: bool,
    /// File extension used when saving, without the dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_extension: Option<String>,
}

const fn default_read_filter() -> bool {
    true
}

/// Returns true if `name` is a bare, complete `type/subtype`.
fn is_bare_type(name: &str) -> bool {
    strip_mime_type(name) == name
        && name
            .split_once('/')
            .is_some_and(|(main, sub)| !main.is_empty() && !sub.is_empty() && !sub.contains('/'))
}

impl MimeHandler {
    /// Creates a handler with a read filter and no aliases.
    #[must_use]
    pub fn new(primary_type: impl Into<String>) -> Self {
        Self {
            primary_type: primary_type.into(),
            aliases: Vec::new(),
            safe_to_read: false,
            has_read_filter: true,
            takes_charset: false,
            default_extension: None,
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the default file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.default_extension = Some(extension.into());
        self
    }

    /// Marks the type as safe to display unfiltered.
    #[must_use]
    pub const fn safe(mut self) -> Self {
        self.safe_to_read = true;
        self
    }

    /// Marks the type as taking a charset parameter.
    #[must_use]
    pub const fn with_charset(mut self) -> Self {
        self.takes_charset = true;
        self
    }

    /// Iterates the primary type followed by all aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_type.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Lookup interface for content-type handlers.
///
/// Implement this to plug a different filter table into queue
/// classification.
pub trait MimeRegistry {
    /// Removes parameters from a content-type string.
    fn strip_mime_type<'a>(&self, mime_type: &'a str) -> &'a str {
        strip_mime_type(mime_type)
    }

    /// Returns the handler registered for a stripped type, if any.
    fn handler(&self, mime_type: &str) -> Option<&MimeHandler>;
}

/// Registry of built-in and user-registered content filters.
///
/// Lookups are ASCII case-insensitive and resolve aliases.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    handlers: Vec<MimeHandler>,
    by_name: HashMap<String, usize>,
}

impl FilterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding the node's built-in filters.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for handler in builtin_handlers() {
            registry.register(handler);
        }
        registry
    }

    /// Registers a handler under its primary type and aliases.
    ///
    /// A later registration replaces earlier ones for the names it claims.
    pub fn register(&mut self, handler: MimeHandler) {
        let idx = self.handlers.len();
        for name in handler.names() {
            if self
                .by_name
                .insert(name.to_ascii_lowercase(), idx)
                .is_some()
            {
                debug!(name, "Replacing content filter registration");
            }
        }
        self.handlers.push(handler);
    }

    /// Creates a registry from a JSON array of handlers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the table does not decode and
    /// [`Error::InvalidHandler`] if a handler name is not a bare
    /// `type/subtype`.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut registry = Self::empty();
        registry.extend_from_json(json)?;
        Ok(registry)
    }

    /// Registers every handler of a JSON array on top of this registry.
    ///
    /// The table is validated as a whole; nothing is registered if any
    /// entry is rejected.
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json).
    pub fn extend_from_json(&mut self, json: &str) -> Result<()> {
        let handlers: Vec<MimeHandler> = serde_json::from_str(json)?;
        if let Some(bad) = handlers
            .iter()
            .flat_map(MimeHandler::names)
            .find(|name| !is_bare_type(name))
        {
            return Err(Error::InvalidHandler(bad.to_string()));
        }
        debug!(count = handlers.len(), "Loading content filter table");
        for handler in handlers {
            self.register(handler);
        }
        Ok(())
    }

    /// Encodes the registered handlers as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.handlers)?)
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates registered handlers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &MimeHandler> {
        self.handlers.iter()
    }
}

impl MimeRegistry for FilterRegistry {
    fn handler(&self, mime_type: &str) -> Option<&MimeHandler> {
        self.by_name
            .get(&mime_type.to_ascii_lowercase())
            .and_then(|&idx| self.handlers.get(idx))
    }
}

fn builtin_handlers() -> Vec<MimeHandler> {
    vec![
        MimeHandler::new("text/plain")
            .safe()
            .with_charset()
            .with_extension("txt"),
        MimeHandler::new("text/html")
            .with_alias("application/xhtml+xml")
            .with_charset()
            .with_extension("html"),
        MimeHandler::new("text/css").with_charset().with_extension("css"),
        MimeHandler::new("image/png").safe().with_extension("png"),
        MimeHandler::new("image/jpeg")
            .with_alias("image/jpg")
            .with_alias("image/pjpeg")
            .safe()
            .with_extension("jpg"),
        MimeHandler::new("image/gif").safe().with_extension("gif"),
        MimeHandler::new("image/bmp")
            .with_alias("image/x-bmp")
            .safe()
            .with_extension("bmp"),
        MimeHandler::new("image/webp").with_extension("webp"),
        MimeHandler::new("application/ogg")
            .with_alias("audio/ogg")
            .with_alias("video/ogg")
            .with_extension("ogg"),
        MimeHandler::new("audio/mpeg")
            .with_alias("audio/mp3")
            .with_extension("mp3"),
        MimeHandler::new("audio/flac")
            .with_alias("audio/x-flac")
            .with_extension("flac"),
        MimeHandler::new("application/atom+xml")
            .with_alias("application/rss+xml")
            .with_charset()
            .with_extension("xml"),
        MimeHandler::new("application/x-bittorrent").with_extension("torrent"),
    ]
}
