//! Pagination parameters for listing tasks.

use crate::task::ports::TaskPipeline;

/// Window of the task collection requested by a list call.
///
/// Non-positive or unparsable sizes fall back to the defaults. An explicit
/// start index overrides the position computed from the page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    record_per_page: u64,
    page: u64,
    start_index: Option<u64>,
}

impl PageRequest {
    /// Records per page used when none, or a non-positive value, is given.
    pub const DEFAULT_RECORD_PER_PAGE: u64 = 10;
    /// Page used when none, or a non-positive value, is given.
    pub const DEFAULT_PAGE: u64 = 1;

    /// Creates a request for a one-based page of `record_per_page` tasks.
    #[must_use]
    pub fn new(record_per_page: i64, page: i64) -> Self {
        Self {
            record_per_page: positive_or(record_per_page, Self::DEFAULT_RECORD_PER_PAGE),
            page: positive_or(page, Self::DEFAULT_PAGE),
            start_index: None,
        }
    }

    /// Builds a request from raw query-string values.
    #[must_use]
    pub fn from_query(
        record_per_page: Option<&str>,
        page: Option<&str>,
        start_index: Option<&str>,
    ) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|value| value.parse::<i64>().ok());
        let request = Self::new(parse(record_per_page).unwrap_or(0), parse(page).unwrap_or(0));
        match start_index.and_then(|value| value.parse::<u64>().ok()) {
            Some(start) => request.with_start_index(start),
            None => request,
        }
    }

    /// Overrides the computed start position.
    #[must_use]
    pub const fn with_start_index(mut self, start_index: u64) -> Self {
        self.start_index = Some(start_index);
        self
    }

    /// Returns the number of records per page.
    #[must_use]
    pub const fn record_per_page(self) -> u64 {
        self.record_per_page
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(self) -> u64 {
        self.page
    }

    /// Returns the first collection position of the window.
    #[must_use]
    pub const fn start_index(self) -> u64 {
        match self.start_index {
            Some(start) => start,
            None => self.page.saturating_sub(1).saturating_mul(self.record_per_page),
        }
    }

    /// Returns the count-and-slice aggregation for this window.
    #[must_use]
    pub const fn pipeline(self) -> TaskPipeline {
        TaskPipeline::count_and_slice(self.start_index(), self.record_per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

fn positive_or(value: i64, default: u64) -> u64 {
    u64::try_from(value)
        .ok()
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
