//! Error handling for the page sort pipeline
//!
//! The sort core itself never fails: unknown field or algorithm names leave the
//! page untouched. These errors belong to the layer around it that reads pages,
//! validates options and writes results.

use std::io;
use thiserror::Error;

/// Custom error type for page sort operations
#[derive(Error, Debug)]
pub enum SortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Permission denied: {file}")]
    PermissionDenied { file: String },

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("Invalid page in {source_name}: {message}")]
    InvalidPage {
        source_name: String,
        message: String,
    },

    #[error("Unknown entity kind: {name}")]
    UnknownEntity { name: String },

    #[error("Input {source_name} exceeds the limit of {limit} bytes")]
    InputTooLarge { source_name: String, limit: u64 },

    #[error("Page of {len} records exceeds the maximum page size of {max}")]
    PageTooLarge { len: usize, max: usize },

    #[error("Conflicting sort options: {message}")]
    ConflictingOptions { message: String },

    #[error("Thread pool error: {message}")]
    ThreadPoolError { message: String },

    #[error("Page {source_name} is not sorted at record {index}")]
    NotSorted { source_name: String, index: usize },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::PermissionDenied { .. }
            | SortError::FileNotFound { .. }
            | SortError::InvalidPage { .. }
            | SortError::Io(_) => crate::SORT_FAILURE,

            SortError::NotSorted { .. } => crate::EXIT_FAILURE,

            _ => crate::SORT_FAILURE,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(file: &str) -> Self {
        SortError::PermissionDenied {
            file: file.to_string(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    /// Create an invalid page error from a decode failure
    pub fn invalid_page(source_name: &str, err: &serde_json::Error) -> Self {
        SortError::InvalidPage {
            source_name: source_name.to_string(),
            message: err.to_string(),
        }
    }

    /// Create an unknown entity error
    pub fn unknown_entity(name: &str) -> Self {
        SortError::UnknownEntity {
            name: name.to_string(),
        }
    }

    pub fn input_too_large(source_name: &str, limit: u64) -> Self {
        SortError::InputTooLarge {
            source_name: source_name.to_string(),
            limit,
        }
    }

    pub fn page_too_large(len: usize, max: usize) -> Self {
        SortError::PageTooLarge { len, max }
    }

    /// Create a conflicting options error
    pub fn conflicting_options(message: &str) -> Self {
        SortError::ConflictingOptions {
            message: message.to_string(),
        }
    }

    /// Create a thread pool error
    pub fn thread_pool_error(message: &str) -> Self {
        SortError::ThreadPoolError {
            message: message.to_string(),
        }
    }

    /// Create a not sorted error
    pub fn not_sorted(source_name: &str, index: usize) -> Self {
        SortError::NotSorted {
            source_name: source_name.to_string(),
            index,
        }
    }
}

/// Result type for page sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Context trait for adding file context to I/O errors
pub trait SortContext<T> {
    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| match io_err.kind() {
            io::ErrorKind::PermissionDenied => SortError::permission_denied(filename),
            io::ErrorKind::NotFound => SortError::file_not_found(filename),
            _ => SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{filename}: {io_err}"),
            )),
        })
    }
}
