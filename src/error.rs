//! Crate-wide error type.

use thiserror::Error;

/// Errors produced by the mapping engine and pipeline.
///
/// Every failure here is deterministic for a given input; there is no
/// transient class to retry.
#[derive(Error, Debug)]
pub enum CosmoError {
  /// Schema or mapping defect that the caller must fix. Never retried,
  /// never silently defaulted.
  #[error("mapping configuration: {0}")]
  Configuration(String),

  /// Entity could not be serialized into a member map.
  #[error("serialization: {0}")]
  Serialization(String),

  /// Service payload could not be coerced into the requested type.
  #[error("graphson conversion: {0}")]
  Conversion(String),
}

pub type Result<T> = std::result::Result<T, CosmoError>;
