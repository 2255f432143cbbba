//! Error type for the extractor library.
//!
//! Mirrors the taxonomy the teacher's sibling `feap_ecs` crate uses for its
//! `ScheduleBuildError`/`RunSystemError` types: a `thiserror`-derived,
//! `#[non_exhaustive]` enum with one variant per failure category, each
//! carrying a human-readable message.

use thiserror::Error;

/// Alias for [`core::result::Result`] with [`Error`] as the error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by the extractors and their parameter-derivation helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An input violates a documented precondition: wrong length, `n` not
    /// prime / not in na_set, `log2_error >= 0`, and similar programmer
    /// errors that are nonetheless surfaced as a `Result` rather than a
    /// panic, so callers exploring parameters dynamically can recover.
    #[error("precondition violation: {0}")]
    PreconditionViolation(String),

    /// `from_params` could not derive a positive output length `m` from the
    /// given entropy budget.
    #[error("infeasible parameters: {0} (try increasing k1, k2, or |log2_error|)")]
    InfeasibleParameters(String),

    /// Raz was asked for a field width with no known irreducible trinomial,
    /// and none was supplied explicitly.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),
}
