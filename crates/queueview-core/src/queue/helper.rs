//! Partitioned queue view.

use std::collections::BTreeMap;

use queueview_mime::{FilterRegistry, MimeRegistry};
use tracing::{debug, trace, warn};

use super::category::Category;
use super::source::RequestSource;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::request::{FailureCode, Priority, Record};

/// Requests grouped by stripped content type.
pub type MimeBuckets = BTreeMap<String, Vec<Record>>;

/// Where classification puts a record, independent of any mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A list keyed by category.
    List(Category),
    /// Failed on a content type the node cannot filter.
    UnknownMime(String),
    /// Rejected by the filter registered for its content type.
    BadMime(String),
}

impl Placement {
    /// The category this placement belongs to.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::List(category) => *category,
            Self::UnknownMime(_) => Category::DL_F_U_MIME,
            Self::BadMime(_) => Category::DL_F_B_MIME,
        }
    }
}

/// Derives the placement of a single record.
///
/// A bad-content-type failure whose stripped type has no registered
/// handler is inconsistent upstream data; it is logged and treated as an
/// unknown content type.
pub fn classify<R: MimeRegistry + ?Sized>(record: &Record, registry: &R) -> Placement {
    match record {
        Record::Download(download) => {
            if record.has_succeeded() {
                if download.to_temp_space {
                    Placement::List(Category::DL_C_TEMP)
                } else {
                    Placement::List(Category::DL_C_DISK)
                }
            } else if record.has_finished() {
                match download.failure_code {
                    Some(FailureCode::ContentValidationUnknownMime) => Placement::UnknownMime(
                        registry.strip_mime_type(&download.mime_type).to_string(),
                    ),
                    Some(FailureCode::ContentValidationBadMime) => {
                        let mime = registry.strip_mime_type(&download.mime_type);
                        if registry.handler(mime).is_some() {
                            Placement::BadMime(mime.to_string())
                        } else {
                            warn!(
                                identifier = record.identifier(),
                                mime, "Bad MIME failure code yet MIME type has no handler"
                            );
                            Placement::UnknownMime(mime.to_string())
                        }
                    }
                    _ => Placement::List(Category::DL_F),
                }
            } else {
                Placement::List(Category::DL_UC)
            }
        }
        Record::UploadFile(_) => Placement::List(if record.has_succeeded() {
            Category::UP_C
        } else if record.has_finished() {
            Category::UP_F
        } else {
            Category::UP_UC
        }),
        Record::UploadDir(_) => Placement::List(if record.has_succeeded() {
            Category::UP_C_DIR
        } else if record.has_finished() {
            Category::UP_F_DIR
        } else {
            Category::UP_UC_DIR
        }),
    }
}

const fn is_uncompleted(category: Category) -> bool {
    matches!(
        category,
        Category::DL_UC | Category::UP_UC | Category::UP_UC_DIR
    )
}

fn queued_bytes(record: &Record) -> u64 {
    let size = match record {
        Record::Download(r) => r.data_size,
        Record::UploadFile(r) => r.data_size,
        Record::UploadDir(r) => r.total_data_size,
    };
    size.unwrap_or(0)
}

fn ensure_single(category: Category) -> Result<()> {
    let ones = category.bits().count_ones();
    if ones != 2 {
        return Err(Error::InvalidArgument(format!(
            "Complex target classes cannot be accepted. Only one list at a time. \
             You seem to query {} lists.",
            ones.saturating_sub(1)
        )));
    }
    if !category.is_single() {
        return Err(Error::InvalidArgument(format!(
            "{category} is not a queue category"
        )));
    }
    Ok(())
}

/// Mutable state filled while walking the snapshot.
#[derive(Debug)]
struct Partitions {
    mask: Category,
    by_category: BTreeMap<Category, Vec<Record>>,
    by_unknown_mime: MimeBuckets,
    by_bad_mime: MimeBuckets,
    queue_size: usize,
    lowest_queued_priority: Option<Priority>,
    paused_priority: Priority,
    total_download_bytes: u64,
    total_upload_bytes: u64,
}

impl Partitions {
    fn new(config: &Config) -> Self {
        Self {
            mask: config.mask,
            by_category: BTreeMap::new(),
            by_unknown_mime: BTreeMap::new(),
            by_bad_mime: BTreeMap::new(),
            queue_size: 0,
            lowest_queued_priority: None,
            paused_priority: config.paused_priority,
            total_download_bytes: 0,
            total_upload_bytes: 0,
        }
    }

    fn accept<R: MimeRegistry + ?Sized>(&mut self, record: Record, registry: &R) {
        let family = if record.is_download() {
            Category::DL
        } else {
            Category::UP
        };
        if !self.mask.matches(family) {
            return;
        }

        let placement = classify(&record, registry);
        let category = placement.category();
        if !self.mask.matches(category) {
            return;
        }

        if is_uncompleted(category) {
            let priority = record.priority();
            self.lowest_queued_priority = Some(
                self.lowest_queued_priority
                    .map_or(priority, |lowest| lowest.min(priority)),
            );
            let bytes = queued_bytes(&record);
            if family == Category::DL {
                self.total_download_bytes = self.total_download_bytes.saturating_add(bytes);
            } else {
                self.total_upload_bytes = self.total_upload_bytes.saturating_add(bytes);
            }
        }

        trace!(
            identifier = record.identifier(),
            category = format_args!("{:b}", category.bits()),
            "Added request"
        );
        match placement {
            Placement::List(category) => {
                self.by_category.entry(category).or_default().push(record);
            }
            Placement::UnknownMime(mime) => {
                self.by_unknown_mime.entry(mime).or_default().push(record);
            }
            Placement::BadMime(mime) => {
                self.by_bad_mime.entry(mime).or_default().push(record);
            }
        }
        self.queue_size += 1;
    }
}

/// Read-only view of the global request queue, partitioned by category.
///
/// The view is built in one pass over a snapshot and never changes
/// afterwards. Only categories contained in the configured mask are
/// retained:
///
/// ```
/// use queueview_core::{Category, DownloadRecord, Record, RequestCommon, RequestQueue, StaticSource};
///
/// let source = StaticSource::new(vec![Record::from(DownloadRecord {
///     common: RequestCommon::succeeded("fetch-1"),
///     data_size: Some(1024),
///     ..Default::default()
/// })]);
///
/// let queue = RequestQueue::new(Category::DL_C_DISK, &source)?;
/// assert_eq!(queue.queue_size(), 1);
/// assert_eq!(queue.get_list(Category::DL_C_DISK)?.map(<[_]>::len), Some(1));
/// # Ok::<(), queueview_core::Error>(())
/// ```
#[derive(Debug)]
pub struct RequestQueue<S> {
    source: S,
    mask: Category,
    by_category: BTreeMap<Category, Vec<Record>>,
    by_unknown_mime: MimeBuckets,
    by_bad_mime: MimeBuckets,
    queue_size: usize,
    lowest_queued_priority: Priority,
    total_download_bytes: u64,
    total_upload_bytes: u64,
}

impl<S: RequestSource> RequestQueue<S> {
    /// Builds a view of `mask` using the built-in content filters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PersistenceDisabled`] if the source has no snapshot.
    pub fn new(mask: Category, source: S) -> Result<Self> {
        Self::with_config(&Config::new(mask), source, &FilterRegistry::builtin())
    }

    /// Builds a view with explicit settings and content filter registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PersistenceDisabled`] if the source has no snapshot.
    pub fn with_config<R: MimeRegistry + ?Sized>(
        config: &Config,
        source: S,
        registry: &R,
    ) -> Result<Self> {
        debug!(
            mask = format_args!("{:b}", config.mask.bits()),
            "Getting request queue"
        );
        let records = source.global_requests()?;

        let mut partitions = Partitions::new(config);
        for record in records {
            partitions.accept(record, registry);
        }

        let Partitions {
            mask,
            by_category,
            by_unknown_mime,
            by_bad_mime,
            queue_size,
            lowest_queued_priority,
            paused_priority,
            total_download_bytes,
            total_upload_bytes,
        } = partitions;
        let lowest_queued_priority = lowest_queued_priority.unwrap_or(paused_priority);
        debug!(queue_size, "Request queue ready");

        Ok(Self {
            source,
            mask,
            by_category,
            by_unknown_mime,
            by_bad_mime,
            queue_size,
            lowest_queued_priority,
            total_download_bytes,
            total_upload_bytes,
        })
    }
}

impl<S> RequestQueue<S> {
    /// Requests of a single list category.
    ///
    /// Returns `Ok(None)` when no request of that category was retained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `category` is not exactly one
    /// concrete category, or is one of the content-type keyed categories
    /// served by [`get_map`](Self::get_map).
    pub fn get_list(&self, category: Category) -> Result<Option<&[Record]>> {
        ensure_single(category)?;
        if category.is_mime_keyed() {
            return Err(Error::InvalidArgument(format!(
                "{category} is keyed by content type; use get_map"
            )));
        }
        Ok(self.by_category.get(&category).map(Vec::as_slice))
    }

    /// Requests of a content-type keyed category, grouped by stripped type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless `category` is
    /// [`Category::DL_F_U_MIME`] or [`Category::DL_F_B_MIME`].
    pub fn get_map(&self, category: Category) -> Result<&MimeBuckets> {
        match category {
            Category::DL_F_U_MIME => Ok(&self.by_unknown_mime),
            Category::DL_F_B_MIME => Ok(&self.by_bad_mime),
            _ => Err(Error::InvalidArgument(format!(
                "Only applicable for values {} and {}",
                Category::DL_F_B_MIME.bits(),
                Category::DL_F_U_MIME.bits()
            ))),
        }
    }

    /// Requests of any single category as one flat list.
    ///
    /// Content-type keyed categories are flattened in key order, then in
    /// snapshot order within each key, and always return `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `category` is not exactly one
    /// concrete category.
    pub fn get(&self, category: Category) -> Result<Option<Vec<&Record>>> {
        ensure_single(category)?;
        if category.is_mime_keyed() {
            let buckets = self.get_map(category)?;
            return Ok(Some(buckets.values().flatten().collect()));
        }
        Ok(self.get_list(category)?.map(|list| list.iter().collect()))
    }

    /// Total number of retained requests.
    #[must_use]
    pub const fn queue_size(&self) -> usize {
        self.queue_size
    }

    /// Returns true if no request was retained.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.queue_size == 0
    }

    /// Most urgent priority among retained uncompleted requests, or the
    /// configured paused sentinel when there are none.
    ///
    /// Out-of-range priorities reported by the source are kept as is, so
    /// the value always belongs to a retained request when one exists.
    #[must_use]
    pub const fn lowest_queued_priority(&self) -> Priority {
        self.lowest_queued_priority
    }

    /// Bytes of retained uncompleted downloads with a known size.
    #[must_use]
    pub const fn total_download_bytes(&self) -> u64 {
        self.total_download_bytes
    }

    /// Bytes of retained uncompleted file and directory uploads with a known size.
    #[must_use]
    pub const fn total_upload_bytes(&self) -> u64 {
        self.total_upload_bytes
    }

    /// The mask this view was built with.
    #[must_use]
    pub const fn mask(&self) -> Category {
        self.mask
    }

    /// The source the snapshot came from, for follow-up operations.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Iterates populated list categories in numeric order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[Record])> {
        self.by_category
            .iter()
            .map(|(&category, records)| (category, records.as_slice()))
    }
}
