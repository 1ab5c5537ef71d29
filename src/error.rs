//! Error types for the argo-colocation crate.

use thiserror::Error;

/// Error type for the crate.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum AnalysisError {
    /// A profile identifier string was not of the `platform_cycle` form.
    #[error("invalid profile id: {0}")]
    InvalidProfileId(String),
    /// A depth grid was requested with a non-positive step or an empty range.
    #[error("invalid depth grid: {0}")]
    InvalidDepthGrid(&'static str),
    /// The event-track service returned no track for the requested storm.
    #[error("no track found for storm {name} {year}")]
    NoSuchStorm {
        /// Storm name as passed to the fetcher.
        name: String,
        /// Storm season year.
        year: i32,
    },
    /// A fetch failure that could not be recovered by degrading to an
    /// empty result, e.g. the track lookup a whole analysis hangs off of.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Failures reported by the remote-service collaborators.
///
/// The co-location walk never treats these as fatal; they degrade to empty
/// results and are recorded on the output (see
/// [`Colocation::failures`](crate::Colocation::failures)).
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum FetchError {
    /// The service answered with a non-2xx status.
    #[error("unexpected response status {0}")]
    Status(u16),
    /// The request never completed (connection, timeout, DNS and friends).
    #[error("transport error: {0}")]
    Transport(String),
    /// The payload arrived but did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Shorthand for results.
pub type Result<T> = std::result::Result<T, AnalysisError>;
