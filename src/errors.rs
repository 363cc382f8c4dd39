//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`FlipbookError`] covers the few failure modes a book
//! can run into:
//! - Invalid configuration (zero segments, empty page list, bad dimensions)
//! - Page requests outside the book
//! - Configuration parsing errors
//!
//! Conditions that resolve themselves on a later frame (a page whose textures
//! are still loading, a mesh that is not assembled yet) are not errors and are
//! skipped silently.
//!
//! # Usage
//!
//! Fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, FlipbookError>`.
//!
//! ```rust,ignore
//! use flipbook::errors::Result;
//!
//! fn open_book() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the flipbook crate.
#[derive(Error, Debug)]
pub enum FlipbookError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A configuration value cannot produce a valid book.
    #[error("Invalid book configuration: {0}")]
    InvalidConfig(String),

    /// A bone list does not form a valid parent chain.
    #[error("Invalid skeleton: {0}")]
    InvalidSkeleton(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Interaction Errors
    // ========================================================================
    /// A page index outside the book was requested.
    #[error("Page out of range: {page} (page count: {page_count})")]
    PageOutOfRange {
        /// The rejected page index
        page: usize,
        /// Number of pages in the book
        page_count: usize,
    },
}

/// Alias for `Result<T, FlipbookError>`.
pub type Result<T> = std::result::Result<T, FlipbookError>;
