//! Configurable sort engine for paginated view records
//!
//! The listing endpoints of the commerce backend hand this crate one bounded
//! page of view records (products, orders, categories, inventory, users) plus
//! the raw `sortBy`, `ascending` and `algorithm` request parameters. The page
//! is reordered in place; unrecognized field or algorithm names leave it
//! untouched.
//!
//! ```
//! use page_sort::{apply, Outcome, ProductView};
//!
//! let mut page = vec![
//!     ProductView::new(1, "b", 5.0, 1),
//!     ProductView::new(2, "a", 5.0, 1),
//!     ProductView::new(3, "c", 1.0, 1),
//! ];
//! assert_eq!(apply(&mut page, "price", "mergesort", true), Outcome::Sorted);
//! let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
//! assert_eq!(ids, vec![3, 1, 2]);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;

// Sort core
pub mod comparator;
pub mod dispatch;
pub mod field;
pub mod merge_sort;
pub mod quick_sort;
pub mod record;

pub mod page_sort;

// Re-export commonly used types
pub use config::{EntityKind, SortConfig, SortOrder};
pub use dispatch::{apply, Algorithm, Outcome, SortPlan};
pub use error::{SortError, SortResult};
pub use field::{FieldRegistry, FieldTag, Resolution, SortKey, ViewRecord};
pub use merge_sort::merge_sort;
pub use quick_sort::quick_sort;
pub use record::{
    CategoryView, InventoryView, OrderStatus, OrderView, ProductView, UserRole, UserSummaryView,
};

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;

/// Run the page pipeline described by `config`
pub fn sort(config: &SortConfig) -> SortResult<i32> {
    page_sort::PageSort::new(config.clone()).run()?;
    Ok(EXIT_SUCCESS)
}
