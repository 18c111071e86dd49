//! Display attributes of individual requests.
//!
//! Every function here accepts any [`Record`] variant and returns a
//! normalized value, substituting a sentinel when the variant has no such
//! attribute. Nothing is mutated; each derivation is traced.

use std::borrow::Cow;
use std::fmt;

use chrono::Duration;
use tracing::trace;

use crate::request::{CompressState, Record};
use crate::time::{Clock, format_duration};

pub mod l10n;
mod progress;

pub use progress::RequestProgress;

/// Content type reported for variants that carry none.
pub const NO_MIME: &str = "NO_MIME";

/// File name reported for variants without a local file.
///
/// Reported untranslated, as the node does; [`l10n::NONE`] is the key
/// for pages that localize it.
pub const NO_FILE_NAME: &str = "None";

/// Link text and target reported when a request has no key yet.
///
/// Reported untranslated, as the node does; [`l10n::UNKNOWN`] is the key
/// for pages that localize it.
pub const UNKNOWN_LINK: &str = "Unknown";

/// Numeric priority as a string.
#[must_use]
pub fn priority(record: &Record) -> String {
    let result = record.priority().to_string();
    trace!(identifier = record.identifier(), %result, "Priority");
    result
}

/// Localization key naming the request's priority class.
#[must_use]
pub fn priority_key(record: &Record) -> String {
    record.priority().l10n_key()
}

/// Size in bytes of a download or file upload.
///
/// `None` for directory uploads and for transfers of unknown size.
#[must_use]
pub fn size(record: &Record) -> Option<u64> {
    let result = match record {
        Record::Download(r) => r.data_size,
        Record::UploadFile(r) => r.data_size,
        Record::UploadDir(_) => None,
    };
    trace!(identifier = record.identifier(), ?result, "Size");
    result
}

/// Declared content type, or [`NO_MIME`] for directory uploads.
#[must_use]
pub fn mime(record: &Record) -> &str {
    let result = match record {
        Record::Download(r) => r.mime_type.as_str(),
        Record::UploadFile(r) => r.mime_type.as_str(),
        Record::UploadDir(_) => NO_MIME,
    };
    trace!(identifier = record.identifier(), result, "MIME");
    result
}

/// Compression state of a file upload; [`CompressState::Working`] otherwise.
#[must_use]
pub fn compress_state(record: &Record) -> CompressState {
    let result = match record {
        Record::UploadFile(r) => r.compress_state,
        Record::Download(_) | Record::UploadDir(_) => CompressState::Working,
    };
    trace!(identifier = record.identifier(), ?result, "Compress state");
    result
}

/// Block progress of the request.
#[must_use]
pub const fn progress(record: &Record) -> RequestProgress {
    RequestProgress::of(record)
}

/// When a request last made progress, relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastActivity {
    /// No timestamp was reported.
    Unknown,
    /// Time elapsed since the last progress.
    Ago(Duration),
}

impl LastActivity {
    /// Localization key for the phrase around the formatted interval.
    #[must_use]
    pub const fn l10n_key(&self) -> &'static str {
        match self {
            Self::Unknown => l10n::LAST_ACTIVITY_UNKNOWN,
            Self::Ago(_) => l10n::LAST_ACTIVITY_AGO,
        }
    }
}

impl fmt::Display for LastActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("Unknown"),
            Self::Ago(elapsed) => f.write_str(&format_duration(*elapsed)),
        }
    }
}

/// Time since the request last made progress.
#[must_use]
pub fn last_activity(record: &Record, clock: &dyn Clock) -> LastActivity {
    let result = record
        .last_activity()
        .map_or(LastActivity::Unknown, |at| LastActivity::Ago(clock.elapsed(at)));
    trace!(identifier = record.identifier(), %result, "Last activity");
    result
}

/// Localization key for the persistence class. Forever wins over reboot.
#[must_use]
pub fn persistence(record: &Record) -> &'static str {
    let key = if record.is_persistent_forever() {
        l10n::PERSISTENCE_FOREVER
    } else if record.is_persistent() {
        l10n::PERSISTENCE_REBOOT
    } else {
        l10n::PERSISTENCE_NONE
    };
    trace!(identifier = record.identifier(), key, "Persistence key");
    key
}

/// Destination of a download or source of a file upload.
///
/// [`NO_FILE_NAME`] when the variant has no file or it is not known.
#[must_use]
pub fn file_name(record: &Record) -> Cow<'_, str> {
    let path = match record {
        Record::Download(r) => r.dest_filename.as_deref(),
        Record::UploadFile(r) => r.orig_filename.as_deref(),
        Record::UploadDir(_) => None,
    };
    let result = path.map_or(Cow::Borrowed(NO_FILE_NAME), |p| p.to_string_lossy());
    trace!(identifier = record.identifier(), %result, "File name");
    result
}

/// A link to a request's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLink {
    /// Abbreviated key for the link body.
    pub text: String,
    /// Link target.
    pub href: String,
}

impl From<KeyLink> for [String; 2] {
    fn from(link: KeyLink) -> Self {
        [link.text, link.href]
    }
}

/// Link to the key a request fetches or produced.
///
/// Directory uploads link to the site root with a trailing `/`. Both
/// fields are [`UNKNOWN_LINK`] when no key is known.
#[must_use]
pub fn key_link(record: &Record) -> KeyLink {
    let (uri, postfix) = match record {
        Record::Download(r) => (r.uri.as_ref(), ""),
        Record::UploadFile(r) => (r.final_uri.as_ref(), ""),
        Record::UploadDir(r) => (r.final_uri.as_ref(), "/"),
    };
    let result = uri.map_or_else(
        || KeyLink {
            text: UNKNOWN_LINK.to_string(),
            href: UNKNOWN_LINK.to_string(),
        },
        |uri| KeyLink {
            text: uri.short(),
            href: format!("/{uri}{postfix}"),
        },
    );
    trace!(identifier = record.identifier(), href = %result.href, "Link");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{
        ContentUri, DownloadRecord, Persistence, Priority, RequestCommon, UploadDirRecord,
        UploadFileRecord,
    };
    use crate::time::MockClock;
    use chrono::TimeZone;
    use chrono::Utc;
    use std::path::PathBuf;

    fn download() -> DownloadRecord {
        DownloadRecord {
            common: RequestCommon::running("dl", Priority::UPDATE),
            data_size: Some(1024),
            mime_type: "text/plain; charset=utf-8".to_string(),
            dest_filename: Some(PathBuf::from("/downloads/a.txt")),
            uri: Some(ContentUri::new("CHK@abc,def,AAMC--8/a.txt")),
            ..Default::default()
        }
    }

    fn upload_file() -> UploadFileRecord {
        UploadFileRecord {
            common: RequestCommon::running("up", Priority::BULK_SPLITFILE),
            data_size: Some(2048),
            mime_type: "image/png".to_string(),
            orig_filename: Some(PathBuf::from("/home/u/pic.png")),
            final_uri: Some(ContentUri::new("CHK@xyz,uvw,AAMC--8/pic.png")),
            compress_state: CompressState::Compressing,
        }
    }

    fn upload_dir() -> UploadDirRecord {
        UploadDirRecord {
            common: RequestCommon::running("site", Priority::INTERACTIVE),
            total_data_size: Some(4096),
            final_uri: Some(ContentUri::new("USK@key,crypto,AQACAAE/site/3")),
        }
    }

    #[test]
    fn test_priority() {
        let record = Record::from(download());
        assert_eq!(priority(&record), "3");
        assert_eq!(priority_key(&record), "QueueToadlet.priority.3");
    }

    #[test]
    fn test_size_per_variant() {
        assert_eq!(size(&download().into()), Some(1024));
        assert_eq!(size(&upload_file().into()), Some(2048));
        assert_eq!(size(&upload_dir().into()), None);

        let unknown = DownloadRecord {
            data_size: None,
            ..download()
        };
        assert_eq!(size(&unknown.into()), None);
    }

    #[test]
    fn test_mime_per_variant() {
        let dl = Record::from(download());
        assert_eq!(mime(&dl), "text/plain; charset=utf-8");
        assert_eq!(mime(&upload_file().into()), "image/png");
        assert_eq!(mime(&upload_dir().into()), NO_MIME);
    }

    #[test]
    fn test_compress_state_per_variant() {
        assert_eq!(
            compress_state(&upload_file().into()),
            CompressState::Compressing
        );
        assert_eq!(compress_state(&download().into()), CompressState::Working);
        assert_eq!(compress_state(&upload_dir().into()), CompressState::Working);
    }

    #[test]
    fn test_last_activity() {
        let clock = MockClock::at(Utc.with_ymd_and_hms(2024, 1, 1, 1, 5, 0).unwrap());

        let never = Record::from(download());
        let unknown = last_activity(&never, &clock);
        assert_eq!(unknown, LastActivity::Unknown);
        assert_eq!(unknown.l10n_key(), "QueueToadlet.lastActivity.unknown");

        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let active = Record::from(DownloadRecord {
            common: RequestCommon::running("dl", Priority::UPDATE)
                .with_last_activity_millis(at.timestamp_millis()),
            ..download()
        });
        let ago = last_activity(&active, &clock);
        assert_eq!(ago, LastActivity::Ago(Duration::minutes(65)));
        assert_eq!(ago.l10n_key(), "QueueToadlet.lastActivity.ago");
        assert_eq!(ago.to_string(), "1h5m");
    }

    #[test]
    fn test_persistence_keys() {
        let with = |p: Persistence| -> Record {
            DownloadRecord {
                common: RequestCommon::running("dl", Priority::UPDATE).with_persistence(p),
                ..download()
            }
            .into()
        };
        assert_eq!(
            persistence(&with(Persistence::Forever)),
            l10n::PERSISTENCE_FOREVER
        );
        assert_eq!(
            persistence(&with(Persistence::Reboot)),
            l10n::PERSISTENCE_REBOOT
        );
        assert_eq!(persistence(&with(Persistence::None)), l10n::PERSISTENCE_NONE);
    }

    #[test]
    fn test_file_name_per_variant() {
        let dl = Record::from(download());
        assert_eq!(file_name(&dl), "/downloads/a.txt");
        let up = Record::from(upload_file());
        assert_eq!(file_name(&up), "/home/u/pic.png");
        let dir = Record::from(upload_dir());
        assert_eq!(file_name(&dir), NO_FILE_NAME);

        let unnamed = Record::from(DownloadRecord {
            dest_filename: None,
            ..download()
        });
        assert_eq!(file_name(&unnamed), NO_FILE_NAME);
    }

    #[test]
    fn test_key_link_per_variant() {
        let link = key_link(&download().into());
        assert_eq!(link.text, "CHK@.../a.txt");
        assert_eq!(link.href, "/CHK@abc,def,AAMC--8/a.txt");

        let link = key_link(&upload_file().into());
        assert_eq!(link.href, "/CHK@xyz,uvw,AAMC--8/pic.png");

        let link = key_link(&upload_dir().into());
        assert_eq!(link.text, "USK@.../site/3");
        assert_eq!(link.href, "/USK@key,crypto,AQACAAE/site/3/");
    }

    #[test]
    fn test_sentinels_have_localization_keys() {
        assert_eq!(l10n::NONE, "QueueToadlet.none");
        assert_eq!(l10n::UNKNOWN, "QueueToadlet.unknown");
        assert_eq!(NO_FILE_NAME, "None");
        assert_eq!(UNKNOWN_LINK, "Unknown");
    }

    #[test]
    fn test_key_link_unknown() {
        let pending = Record::from(UploadFileRecord {
            final_uri: None,
            ..upload_file()
        });
        let pair: [String; 2] = key_link(&pending).into();
        assert_eq!(pair, [UNKNOWN_LINK, UNKNOWN_LINK]);
    }
}
