/*!
 * Error types for the locsmith application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with translation provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while reading .strings documents.
///
/// Deliberately uninhabited: parsing is total, malformed lines degrade to
/// verbatim passthrough content instead of failing.
#[derive(Error, Debug)]
pub enum StringsFileError {}

/// Errors that can occur during translation backfill
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors that can occur while harmonizing keys against a source document
#[derive(Error, Debug)]
pub enum HarmonizationError {
    /// The harmonization source file could not be read
    #[error("Failed to read harmonization source '{path}': {message}")]
    SourceUnreadable {
        /// Path of the source document
        path: String,
        /// Underlying read failure
        message: String,
    },

    /// The harmonization source parsed to zero entries
    #[error("Harmonization source contains no entries")]
    NoEntries,
}

/// Errors that can occur while driving the external string extractors
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The extractor binary could not be launched
    #[error("Failed to launch {tool}: {message}")]
    Launch {
        /// Extractor command name
        tool: String,
        /// Launch failure detail
        message: String,
    },

    /// The extractor ran but exited with a failure status
    #[error("{tool} failed: {message}")]
    CommandFailed {
        /// Extractor command name
        tool: String,
        /// Captured stderr or status description
        message: String,
    },

    /// The extractor did not finish within the allowed time
    #[error("{tool} timed out after {seconds}s")]
    Timeout {
        /// Extractor command name
        tool: String,
        /// Timeout that was exceeded
        seconds: u64,
    },

    /// The extractor finished without producing any strings output
    #[error("No strings were extracted by {tool}")]
    NoOutput {
        /// Extractor command name
        tool: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from strings file handling
    #[error("Strings file error: {0}")]
    StringsFile(#[from] StringsFileError),

    /// Error from translation backfill
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from key harmonization
    #[error("Harmonization error: {0}")]
    Harmonization(#[from] HarmonizationError),

    /// Error from string extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
