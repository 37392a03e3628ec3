//! Fixed-size listing windows.

use super::PAGE_SIZE;

/// One page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: i64,
}

impl Page {
    /// Page `number`; negative values clamp to the first page.
    pub fn new(number: i64) -> Self {
        Self {
            number: number.max(0),
        }
    }

    /// Parse a raw query value. Missing or malformed input means page 0.
    pub fn parse(raw: Option<&str>) -> Self {
        let number = raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0);
        Self::new(number)
    }

    /// Zero-based page number.
    pub fn number(&self) -> i64 {
        self.number
    }

    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        self.number.saturating_mul(PAGE_SIZE)
    }

    /// Rows to return.
    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0)
    }
}
