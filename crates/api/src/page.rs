//! Spring-style pagination envelope.

use serde::Deserialize;

/// One page of results as served by the backend's paged endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Total items across all pages.
    pub total_elements: u64,
    /// Total page count.
    pub total_pages: u32,
    /// Zero-based index of this page.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether this is the last page.
    pub last: bool,
}
