//! Localization keys returned by the inspector.
//!
//! These are keys into the node's translation tables, not display text.

/// Request survives restarts.
pub const PERSISTENCE_FOREVER: &str = "QueueToadlet.persistenceForever";
/// Request survives until the node restarts.
pub const PERSISTENCE_REBOOT: &str = "QueueToadlet.persistenceReboot";
/// Request is not persistent.
pub const PERSISTENCE_NONE: &str = "QueueToadlet.persistenceNone";
/// Generic "none"; the translated form of [`NO_FILE_NAME`](super::NO_FILE_NAME).
pub const NONE: &str = "QueueToadlet.none";
/// Generic "unknown"; the translated form of [`UNKNOWN_LINK`](super::UNKNOWN_LINK).
pub const UNKNOWN: &str = "QueueToadlet.unknown";
/// No last-activity timestamp.
pub const LAST_ACTIVITY_UNKNOWN: &str = "QueueToadlet.lastActivity.unknown";
/// Last activity some time ago; takes the formatted interval.
pub const LAST_ACTIVITY_AGO: &str = "QueueToadlet.lastActivity.ago";
/// Prefix of the per-class priority keys, `QueueToadlet.priority.<n>`.
pub const PRIORITY_PREFIX: &str = "QueueToadlet.priority";
