//! Error and result types for the variant data gateway.
//!

use std::result;

use thiserror::Error;

use beacon_config::types::ErrorInfo;

/// The result type for gateway calls.
pub type Result<T> = result::Result<T, GatewayError>;

/// A connectivity or protocol failure of a remote lookup. Each variant records
/// which lookup failed and for which id. Always fatal to the current query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
  #[error("searching variants in variant set `{0}`: {1}")]
  SearchVariants(String, String),

  #[error("loading variant set `{0}`: {1}")]
  VariantSet(String, String),

  #[error("loading variant annotation set `{0}`: {1}")]
  VariantAnnotationSet(String, String),

  #[error("loading reference set `{0}`: {1}")]
  ReferenceSet(String, String),

  #[error("loading call set `{0}`: {1}")]
  CallSet(String, String),

  #[error("parsing url: `{0}`")]
  UrlParse(String),

  #[error("internal error: `{0}`")]
  Internal(String),
}

impl From<GatewayError> for ErrorInfo {
  fn from(err: GatewayError) -> Self {
    ErrorInfo::new(500, err.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn error_info_from_gateway_error() {
    let err = GatewayError::CallSet("cs1".to_string(), "connection refused".to_string());
    let info = ErrorInfo::from(err);

    assert_eq!(info.error_code, 500);
    assert_eq!(info.message, "loading call set `cs1`: connection refused");
  }
}
