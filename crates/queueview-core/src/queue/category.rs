//! Queue categories and masks.
//!
//! A category is a small bit set. Bit 0 ([`Category::DL`]) marks the
//! download family and bit 7 ([`Category::UP`]) the upload family; every
//! concrete category is its family bit plus one unique bit, so it has
//! exactly two bits set. A mask is the bitwise OR of any concrete
//! categories, and a mask *matches* a target when it contains all of the
//! target's bits:
//!
//! ```
//! use queueview_core::Category;
//!
//! let mask = Category::DL_C_DISK | Category::UP_F_DIR;
//! assert!(mask.matches(Category::DL));
//! assert!(mask.matches(Category::UP_F_DIR));
//! assert!(!mask.matches(Category::DL_UC));
//! ```
//!
//! The numeric values are part of the external contract and must not
//! change.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// A queue category or a mask of categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Category(u32);

impl Category {
    /// The empty mask.
    pub const NONE: Self = Self(0);

    /// Download family marker (1).
    pub const DL: Self = Self(1);
    /// Download completed to disk (3).
    pub const DL_C_DISK: Self = Self(Self::DL.0 << 1 | Self::DL.0);
    /// Download completed to temporary space (5).
    pub const DL_C_TEMP: Self = Self(Self::DL.0 << 2 | Self::DL.0);
    /// Failed download (9).
    pub const DL_F: Self = Self(Self::DL.0 << 3 | Self::DL.0);
    /// Uncompleted download (17).
    pub const DL_UC: Self = Self(Self::DL.0 << 4 | Self::DL.0);
    /// Download failed on a content type without a filter (33).
    pub const DL_F_U_MIME: Self = Self(Self::DL.0 << 5 | Self::DL.0);
    /// Download rejected by its content filter (65).
    pub const DL_F_B_MIME: Self = Self(Self::DL.0 << 6 | Self::DL.0);
    /// Every download category (127).
    pub const DL_ALL: Self = Self(
        Self::DL_C_DISK.0
            | Self::DL_C_TEMP.0
            | Self::DL_F.0
            | Self::DL_UC.0
            | Self::DL_F_U_MIME.0
            | Self::DL_F_B_MIME.0,
    );

    /// Upload family marker (128).
    pub const UP: Self = Self(Self::DL.0 << 7);
    /// Completed file upload (384).
    pub const UP_C: Self = Self(Self::UP.0 << 1 | Self::UP.0);
    /// Completed directory upload (640).
    pub const UP_C_DIR: Self = Self(Self::UP.0 << 2 | Self::UP.0);
    /// Failed file upload (1152).
    pub const UP_F: Self = Self(Self::UP.0 << 3 | Self::UP.0);
    /// Failed directory upload (2176).
    pub const UP_F_DIR: Self = Self(Self::UP.0 << 4 | Self::UP.0);
    /// Uncompleted file upload (4224).
    pub const UP_UC: Self = Self(Self::UP.0 << 5 | Self::UP.0);
    /// Uncompleted directory upload (8320).
    pub const UP_UC_DIR: Self = Self(Self::UP.0 << 6 | Self::UP.0);
    /// Every upload category (16256).
    pub const UP_ALL: Self = Self(
        Self::UP_C.0
            | Self::UP_C_DIR.0
            | Self::UP_F.0
            | Self::UP_F_DIR.0
            | Self::UP_UC.0
            | Self::UP_UC_DIR.0,
    );

    /// Every category of both families.
    pub const ALL: Self = Self(Self::DL_ALL.0 | Self::UP_ALL.0);

    /// Wraps raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if `self` contains every bit of `target`.
    #[must_use]
    pub const fn matches(self, target: Self) -> bool {
        matches(self.0, target.0)
    }

    /// Returns true if this is exactly one concrete category.
    #[must_use]
    pub fn is_single(self) -> bool {
        self.0.count_ones() == 2 && LABELS.iter().any(|&(c, _)| c == self)
    }

    /// Returns true if the mask is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true for the two content-type keyed failure categories.
    #[must_use]
    pub const fn is_mime_keyed(self) -> bool {
        self.0 == Self::DL_F_U_MIME.0 || self.0 == Self::DL_F_B_MIME.0
    }

    /// Label of a concrete category.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        LABELS
            .iter()
            .find(|&&(c, _)| c == self)
            .map(|&(_, label)| label)
    }

    /// Concrete category for a label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        LABELS
            .iter()
            .find(|&&(_, l)| l == label)
            .map(|&(c, _)| c)
    }

    /// Iterates the concrete categories contained in this mask.
    pub fn iter(self) -> impl Iterator<Item = Self> {
        LABELS
            .iter()
            .map(|&(c, _)| c)
            .filter(move |&c| self.matches(c))
    }
}

/// Returns true if `base` contains every bit of `target`.
#[must_use]
pub const fn matches(base: u32, target: u32) -> bool {
    base & target == target
}

impl BitOr for Category {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Category {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for Category {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "{:#b}", self.0),
        }
    }
}

/// Concrete download categories.
pub const DOWNLOAD_CATEGORIES: [Category; 6] = [
    Category::DL_C_DISK,
    Category::DL_C_TEMP,
    Category::DL_F,
    Category::DL_UC,
    Category::DL_F_U_MIME,
    Category::DL_F_B_MIME,
];

/// Concrete upload categories.
pub const UPLOAD_CATEGORIES: [Category; 6] = [
    Category::UP_C,
    Category::UP_C_DIR,
    Category::UP_F,
    Category::UP_F_DIR,
    Category::UP_UC,
    Category::UP_UC_DIR,
];

/// Bidirectional mapping between concrete categories and their labels.
pub const LABELS: [(Category, &str); 12] = [
    (Category::DL_C_DISK, "completedDownloadToDisk"),
    (Category::DL_C_TEMP, "completedDownloadToTemp"),
    (Category::DL_F, "failedDownload"),
    (Category::DL_UC, "uncompletedDownload"),
    (Category::DL_F_U_MIME, "failedUnknownMIMEType"),
    (Category::DL_F_B_MIME, "failedBadMIMEType"),
    (Category::UP_C, "completedUpload"),
    (Category::UP_C_DIR, "completedDirUpload"),
    (Category::UP_F, "failedUpload"),
    (Category::UP_F_DIR, "failedUploadDir"),
    (Category::UP_UC, "uncompletedUpload"),
    (Category::UP_UC_DIR, "uncompletedDirUpload"),
];
