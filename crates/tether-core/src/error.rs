//! Error types for rect measurement

use thiserror::Error;

/// Why a host could not report a usable rect
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RectError {
    /// The element was removed from the tree while its overlay was open
    #[error("element is detached from the tree")]
    Detached,

    /// The host reported NaN or an infinite value
    #[error("non-finite value for {field}")]
    NonFinite {
        /// Name of the offending field
        field: &'static str,
    },
}

/// Result type for rect measurement
pub type RectResult<T> = Result<T, RectError>;
