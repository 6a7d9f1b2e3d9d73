//! Core types shared by extraction and generation
//!
//! ## `error` - Error Handling
//!
//! - [`ChartError`] - every failure mode of a run, grouped by [`ErrorCategory`]
//! - [`ErrorContext`] - user-friendly wrapper with details and suggestions
//! - [`user_friendly_error`] - convert any error into an [`ErrorContext`]
//!
//! ## `file_error` - File Operations
//!
//! - [`FileOperation`] - what was being done when an I/O error happened
//! - [`read_file`], [`write_file`], [`ensure_dir`] - path-naming wrappers over `std::fs`

pub mod error;
pub mod file_error;

pub use error::{ChartError, ErrorCategory, ErrorContext, FieldProblem, user_friendly_error};
pub use file_error::{FileOperation, ensure_dir, read_file, write_file};
