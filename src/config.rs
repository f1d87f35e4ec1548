//! Configuration management for page sort operations

use crate::dispatch::Algorithm;
use crate::error::{SortError, SortResult};
use std::fmt;
use std::str::FromStr;

/// Largest page the pipeline accepts unless configured otherwise
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Upper bound for `max_page_size`; pages are meant to stay small
pub const MAX_PAGE_SIZE_LIMIT: usize = 10_000;

/// Sort order enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortOrder::Ascending
    }
}

/// Kind of view record carried by a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Products,
    Orders,
    Categories,
    Inventory,
    Users,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Products,
        EntityKind::Orders,
        EntityKind::Categories,
        EntityKind::Inventory,
        EntityKind::Users,
    ];

    /// Algorithm used when a request names none
    pub fn default_algorithm(self) -> Algorithm {
        match self {
            EntityKind::Products => Algorithm::QuickSort,
            _ => Algorithm::MergeSort,
        }
    }

    /// Direction used when a request names none. Orders list newest first.
    pub fn default_order(self) -> SortOrder {
        match self {
            EntityKind::Orders => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

impl FromStr for EntityKind {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "products" | "product" => Ok(EntityKind::Products),
            "orders" | "order" => Ok(EntityKind::Orders),
            "categories" | "category" => Ok(EntityKind::Categories),
            "inventory" | "inventories" => Ok(EntityKind::Inventory),
            "users" | "user" => Ok(EntityKind::Users),
            _ => Err(SortError::unknown_entity(s)),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Products => "products",
            EntityKind::Orders => "orders",
            EntityKind::Categories => "categories",
            EntityKind::Inventory => "inventory",
            EntityKind::Users => "users",
        };
        write!(f, "{name}")
    }
}

/// Main configuration structure for page sort operations
///
/// `sort_by`, `algorithm` and `order` are kept as the caller supplied them.
/// Unknown names are not a configuration error: the page is passed through
/// unchanged.
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Entity kind of every input page
    pub entity: EntityKind,
    /// Field token; no sorting happens when absent
    pub sort_by: Option<String>,
    /// Algorithm token; entity default when absent
    pub algorithm: Option<String>,
    /// Direction; entity default when absent
    pub order: Option<SortOrder>,
    /// Check if pages are already sorted instead of sorting them
    pub check: bool,
    /// Largest accepted page
    pub max_page_size: usize,
    /// Output file path
    pub output_file: Option<String>,
    /// Number of pages sorted concurrently
    pub parallel_threads: Option<usize>,
    /// Files to read from (if not specified, use stdin)
    pub input_files: Vec<String>,
    /// Pretty-print single page output
    pub pretty: bool,
    /// Debug logging
    pub debug: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            entity: EntityKind::Products,
            sort_by: None,
            algorithm: None,
            order: None,
            check: false,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            output_file: None,
            parallel_threads: None,
            input_files: Vec::new(),
            pretty: false,
            debug: false,
        }
    }
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: EntityKind) -> Self {
        self.entity = entity;
        self
    }

    pub fn with_sort_by(mut self, sort_by: Option<String>) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Option<String>) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_order(mut self, order: Option<SortOrder>) -> Self {
        self.order = order;
        self
    }

    /// Enable check mode
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Set output file
    pub fn with_output_file(mut self, output_file: Option<String>) -> Self {
        self.output_file = output_file;
        self
    }

    /// Set parallel threads
    pub fn with_parallel_threads(mut self, threads: Option<usize>) -> Self {
        self.parallel_threads = threads;
        self
    }

    /// Set input files
    pub fn with_input_files(mut self, files: Vec<String>) -> Self {
        self.input_files = files;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if self.check && self.sort_by.is_none() {
            return Err(SortError::conflicting_options(
                "--check requires --sort-by",
            ));
        }

        if self.check && self.output_file.is_some() {
            return Err(SortError::conflicting_options(
                "--check does not write output",
            ));
        }

        if self.max_page_size == 0 {
            return Err(SortError::conflicting_options(
                "maximum page size must be positive",
            ));
        }
        if self.max_page_size > MAX_PAGE_SIZE_LIMIT {
            return Err(SortError::conflicting_options(&format!(
                "maximum page size too large (maximum {MAX_PAGE_SIZE_LIMIT})"
            )));
        }

        // Validate thread count
        if let Some(threads) = self.parallel_threads {
            if threads == 0 {
                return Err(SortError::thread_pool_error(
                    "thread count must be positive",
                ));
            }
            if threads > 1024 {
                return Err(SortError::thread_pool_error(
                    "too many threads (maximum 1024)",
                ));
            }
        }

        Ok(())
    }

    /// Algorithm token to hand to the dispatcher
    pub fn effective_algorithm(&self) -> &str {
        self.algorithm
            .as_deref()
            .unwrap_or_else(|| self.entity.default_algorithm().name())
    }

    /// Get the effective sort order
    pub fn sort_order(&self) -> SortOrder {
        self.order.unwrap_or_else(|| self.entity.default_order())
    }

    /// Check if reading from stdin
    pub fn reading_from_stdin(&self) -> bool {
        self.input_files.is_empty() || (self.input_files.len() == 1 && self.input_files[0] == "-")
    }

    /// Default log directives when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "page_sort=debug,info"
        } else {
            "warn"
        }
    }

    /// Get effective thread count
    pub fn effective_thread_count(&self) -> usize {
        self.parallel_threads.unwrap_or_else(num_cpus::get)
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    pub fn entity(mut self, entity: EntityKind) -> Self {
        self.config.entity = entity;
        self
    }

    pub fn sort_by(mut self, field: &str) -> Self {
        self.config.sort_by = Some(field.to_string());
        self
    }

    pub fn algorithm(mut self, algorithm: &str) -> Self {
        self.config.algorithm = Some(algorithm.to_string());
        self
    }

    pub fn ascending(mut self) -> Self {
        self.config.order = Some(SortOrder::Ascending);
        self
    }

    pub fn descending(mut self) -> Self {
        self.config.order = Some(SortOrder::Descending);
        self
    }

    /// Enable check mode
    pub fn check(mut self) -> Self {
        self.config.check = true;
        self
    }

    pub fn max_page_size(mut self, size: usize) -> Self {
        self.config.max_page_size = size;
        self
    }

    /// Set output file
    pub fn output_file(mut self, file: String) -> Self {
        self.config.output_file = Some(file);
        self
    }

    pub fn parallel_threads(mut self, threads: usize) -> Self {
        self.config.parallel_threads = Some(threads);
        self
    }

    pub fn input_files(mut self, files: Vec<String>) -> Self {
        self.config.input_files = files;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.config.pretty = true;
        self
    }

    pub fn debug(mut self) -> Self {
        self.config.debug = true;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset configurations matching the listing endpoints
pub mod presets {
    use super::*;

    /// Product listing: quicksort, ascending
    pub fn products(sort_by: &str) -> SortConfig {
        SortConfig::new()
            .with_entity(EntityKind::Products)
            .with_sort_by(Some(sort_by.to_string()))
    }

    /// Order listing: merge sort, newest first
    pub fn orders(sort_by: &str) -> SortConfig {
        SortConfig::new()
            .with_entity(EntityKind::Orders)
            .with_sort_by(Some(sort_by.to_string()))
    }

    /// Verify a product page is already ordered
    pub fn check_products(sort_by: &str) -> SortConfig {
        products(sort_by).with_check(true)
    }
}
