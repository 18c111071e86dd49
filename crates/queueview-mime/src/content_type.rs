//! Declared content types of transfers.
//!
//! Requests carry the content type their metadata declared, which may
//! include parameters (`text/plain; charset=utf-8`). Queue views group
//! failures by the bare `type/subtype` form.

/// Strips parameters from a content-type string.
///
/// Everything from the first `;` onward is discarded and the remainder is
/// trimmed. Case is preserved, so the result can be used as a grouping key
/// that matches what the request declared.
///
/// ```
/// use queueview_mime::strip_mime_type;
///
/// assert_eq!(strip_mime_type("text/plain; charset=x"), "text/plain");
/// assert_eq!(strip_mime_type("  image/png "), "image/png");
/// ```
#[must_use]
pub fn strip_mime_type(mime_type: &str) -> &str {
    let essence = match mime_type.find(';') {
        Some(idx) => &mime_type[..idx],
        None => mime_type,
    };
    essence.trim()
}
