//! Error types for the synckit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. a cache capacity of zero).
//! - [`DuplicateKeyError`]: Returned by the strict cache insert when the key
//!   is already present.
//! - [`Cancelled`]: Returned by a cancellable blocking take that observed its
//!   cancellation signal before an element became available.
//!
//! ## Example Usage
//!
//! ```
//! use synckit::cache::BoundedFifoCache;
//! use synckit::error::ConfigError;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<BoundedFifoCache<String, i32>, ConfigError> =
//!     BoundedFifoCache::new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = BoundedFifoCache::<String, i32>::new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`BoundedFifoCache::new`](crate::cache::BoundedFifoCache::new).
/// Carries a human-readable description of which parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// DuplicateKeyError
// ---------------------------------------------------------------------------

/// Error returned by the strict cache insert when the key already exists.
///
/// Produced by
/// [`BoundedFifoCache::try_insert`](crate::cache::BoundedFifoCache::try_insert).
/// The upsert path ([`BoundedFifoCache::insert`](crate::cache::BoundedFifoCache::insert))
/// never produces this error; callers choose which semantics they want.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKeyError(String);

impl DuplicateKeyError {
    /// Creates a new `DuplicateKeyError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DuplicateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for DuplicateKeyError {}

// ---------------------------------------------------------------------------
// Cancelled
// ---------------------------------------------------------------------------

/// Error returned when a cancellable blocking take observed its cancellation
/// signal before returning an element.
///
/// Produced by
/// [`BlockingPriorityQueue::take_with`](crate::queue::BlockingPriorityQueue::take_with).
/// Distinct from the "queue is empty" condition: non-blocking variants report
/// emptiness as `None`, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("blocking take was cancelled")
    }
}

impl std::error::Error for Cancelled {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
