//! Queue view configuration.

use crate::error::{Error, Result};
use crate::queue::Category;
use crate::request::Priority;

/// Settings for building a [`RequestQueue`](crate::RequestQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Categories to retain.
    pub mask: Category,
    /// Value reported as the lowest queued priority when no uncompleted
    /// request is retained. Defaults to [`Priority::PAUSED`], the
    /// numerically largest class.
    pub paused_priority: Priority,
}

impl Config {
    /// Creates a configuration retaining `mask` with default settings.
    #[must_use]
    pub const fn new(mask: Category) -> Self {
        Self {
            mask,
            paused_priority: Priority::PAUSED,
        }
    }

    /// Creates a configuration builder.
    #[must_use]
    pub const fn builder(mask: Category) -> ConfigBuilder {
        ConfigBuilder::new(mask)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Category::NONE)
    }
}

/// Builder for queue view configuration.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    mask: Category,
    paused_priority: Option<Priority>,
}

impl ConfigBuilder {
    /// Creates a new builder retaining `mask`.
    #[must_use]
    pub const fn new(mask: Category) -> Self {
        Self {
            mask,
            paused_priority: None,
        }
    }

    /// Adds categories to the mask.
    #[must_use]
    pub fn include(mut self, categories: Category) -> Self {
        self.mask |= categories;
        self
    }

    /// Overrides the lowest-priority sentinel.
    #[must_use]
    pub const fn paused_priority(mut self, priority: Priority) -> Self {
        self.paused_priority = Some(priority);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the sentinel is not a defined priority
    /// class.
    pub fn build(self) -> Result<Config> {
        let paused_priority = self.paused_priority.unwrap_or(Priority::PAUSED);
        if !paused_priority.is_valid() {
            return Err(Error::Config(format!(
                "paused priority {paused_priority} is outside {}..={}",
                Priority::MAXIMUM,
                Priority::PAUSED
            )));
        }
        Ok(Config {
            mask: self.mask,
            paused_priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(Category::DL_ALL);
        assert_eq!(config.mask, Category::DL_ALL);
        assert_eq!(config.paused_priority, Priority::PAUSED);
        assert_eq!(Config::default().mask, Category::NONE);
    }

    #[test]
    fn test_builder_accumulates_mask() {
        let config = Config::builder(Category::DL_UC)
            .include(Category::UP_UC)
            .include(Category::UP_UC_DIR)
            .paused_priority(Priority::PREFETCH)
            .build()
            .unwrap();
        assert_eq!(
            config.mask,
            Category::DL_UC | Category::UP_UC | Category::UP_UC_DIR
        );
        assert_eq!(config.paused_priority, Priority::PREFETCH);
    }

    #[test]
    fn test_builder_rejects_undefined_priority() {
        let err = Config::builder(Category::ALL)
            .paused_priority(Priority::new(9))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
