//! Common types shared across the pith workspace.
//!
//! This crate defines the shared error taxonomy and the centralised
//! tracing/logging initialisation. It is intentionally lightweight so every
//! other crate can depend on it without pulling in heavy transitive costs.
//!
//! # Overview
//!
//! - [`PithError`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! Note the taxonomy is deliberately small. A scrape that finds no content
//! is *not* an error; callers see that as an absent value, never as a
//! [`PithError`].

pub mod observability;

/// Error types used across the pith system.
///
/// Fetch and oracle failures are fatal to a scrape call and propagate to the
/// caller unchanged; nothing in the core wraps or retries them.
#[derive(thiserror::Error, Debug)]
pub enum PithError {
    /// Page retrieval failed: transport error or non-success HTTP status.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Boundary identification failed: service error, non-JSON output, or
    /// a response missing the expected fields.
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`PithError`].
pub type Result<T> = std::result::Result<T, PithError>;
