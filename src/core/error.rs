//! Error types for seed-remap
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for seed-remap operations
#[derive(Debug, Error)]
pub enum SeedRemapError {
    /// Almanac parsing errors
    #[error("Almanac error: {0}")]
    Almanac(#[from] AlmanacError),

    /// Search setup errors
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reading an almanac
#[derive(Debug, Error)]
pub enum AlmanacError {
    /// Failed to parse integer
    #[error("Failed to parse integer '{value}' at line {line}")]
    InvalidNumber { line: usize, value: String },

    /// Mapping line without exactly three fields
    #[error("Invalid mapping at line {line}: expected 3 fields, got {fields}")]
    InvalidMapping { line: usize, fields: usize },

    /// Mapping line seen before the first stage marker
    #[error("Mapping at line {line} does not belong to any stage")]
    MappingOutsideStage { line: usize },

    /// More stage markers than the chain has stages
    #[error("Unexpected stage marker at line {line}: only {max} stages are supported")]
    TooManyStages { line: usize, max: usize },

    /// Input ended before every stage was declared
    #[error("Expected {expected} stages, found {found}")]
    MissingStages { expected: usize, found: usize },

    /// No `seeds:` line in the input
    #[error("Missing seeds line")]
    MissingSeeds,

    /// A second `seeds:` line
    #[error("Duplicate seeds line at line {line}")]
    DuplicateSeeds { line: usize },

    /// Seeds interpreted as ranges must come in `begin length` pairs
    #[error("Seed ranges must be pairs, got {count} numbers")]
    UnpairedSeed { count: usize },

    /// File not found
    #[error("Almanac file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while setting up a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// Worker pool could not be built
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias for seed-remap operations
pub type Result<T> = std::result::Result<T, SeedRemapError>;

/// Result type alias for almanac parsing operations
pub type AlmanacResult<T> = std::result::Result<T, AlmanacError>;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;
