//! Error types for the provider seams.
//!
//! Variants mirror the failure modes of the HTTP adapters: timeouts, non-2xx
//! statuses, transport failures and malformed payloads, plus the per-seam
//! "service answered but had nothing" conditions. All types are `Clone` and
//! `PartialEq` so test doubles can replay them.

use thiserror::Error;

/// Errors from [`crate::GeocodeBackend::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The query string was empty or all whitespace.
    #[error("place name must not be empty")]
    EmptyQuery,
    /// The request exceeded its deadline.
    #[error("geocoding request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service returned a non-success status.
    #[error("geocoding request to {url} failed with status {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The request failed before an HTTP response arrived.
    #[error("geocoding request to {url} failed: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error detail.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse geocoding response: {message}")]
    Parse {
        /// Decoder error detail.
        message: String,
    },
    /// The service answered but had no match for the query.
    #[error("no geocoding match for '{query}'")]
    NoMatch {
        /// The query that found nothing.
        query: String,
    },
}

/// Errors from [`crate::RouteProvider::routes`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The request exceeded its deadline.
    #[error("routing request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service returned a non-success status.
    #[error("routing request to {url} failed with status {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The request failed before an HTTP response arrived.
    #[error("routing request to {url} failed: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error detail.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Decoder error detail.
        message: String,
    },
    /// The service reported an application-level error code.
    #[error("routing service returned {code}: {message}")]
    Service {
        /// Service status code, e.g. `NoRoute`.
        code: String,
        /// Error detail.
        message: String,
    },
    /// The service answered `Ok` with an empty routes array.
    #[error("routing service found no route between the given coordinates")]
    NoRoute,
}

/// Errors from [`crate::PoiSource::fetch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoiFetchError {
    /// The query requested no categories.
    #[error("POI query must request at least one category")]
    NoCategories,
    /// The response body could not be decoded.
    #[error("failed to parse POI response: {message}")]
    Parse {
        /// Decoder error detail.
        message: String,
    },
    /// Every configured endpoint failed.
    #[error("all {attempts} POI endpoints failed; last error: {last_error}")]
    AllEndpointsFailed {
        /// How many endpoints were tried.
        attempts: usize,
        /// Failure detail from the final attempt.
        last_error: String,
    },
}
