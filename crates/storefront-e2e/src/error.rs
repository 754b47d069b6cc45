// Error types for storefront-e2e

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for suite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum Error {
    /// Failure surfaced by the browser automation layer
    ///
    /// Covers elements that never became actionable, assertion timeouts from
    /// `expect()`, navigation failures and closed targets. These are passed
    /// through untouched so the report shows Playwright's own message.
    #[error(transparent)]
    Playwright(#[from] playwright_rs::Error),

    /// A suite-level check failed (expected vs. actual)
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Fixture file could not be read
    #[error("Failed to read fixture file '{path}': {source}")]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fixture file is not valid JSON or is missing a key
    #[error("Invalid fixture file '{path}': {source}")]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration value in the environment
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A scenario needed the registered identity before registration ran
    ///
    /// Scenarios after "Register as a new Customer" log in with the account
    /// it creates. If registration failed or was skipped there is nothing to
    /// log in with.
    #[error("No customer identity registered yet. The registration scenario must run first.")]
    IdentityNotRegistered,

    /// Category pagination never reached its last page
    #[error("Pagination did not finish: 'Next' was still enabled after {pages} pages")]
    PaginationExhausted { pages: usize },

    /// I/O error (report output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (report output)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }
}
