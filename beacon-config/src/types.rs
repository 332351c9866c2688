//! Types making up the beacon protocol envelope: the allele query, per-dataset
//! outcomes and the aggregate answer.
//!

use std::result;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The result type returning a `BeaconError`.
pub type Result<T> = result::Result<T, BeaconError>;

/// Errors reported synchronously to the caller of the adapter. Remote failures
/// are never surfaced here, they are embedded in the answer as an [ErrorInfo].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BeaconError {
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("internal error: {0}")]
  InternalError(String),
}

impl BeaconError {
  /// Create an `InvalidInput` error.
  pub fn invalid_input<S: Into<String>>(message: S) -> Self {
    Self::InvalidInput(message.into())
  }

  /// Create an `InternalError` error.
  pub fn internal_error<S: Into<String>>(message: S) -> Self {
    Self::InternalError(message.into())
  }
}

/// A query asking whether an allele is present at a position, across a set of
/// datasets. Immutable once constructed, one logical request.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct AlleleQuery {
  reference_name: String,
  start: u64,
  reference_bases: String,
  alternate_bases: String,
  assembly_id: String,
  dataset_ids: Vec<String>,
  include_dataset_responses: bool,
}

impl AlleleQuery {
  /// Create a new allele query.
  pub fn new(
    reference_name: impl Into<String>,
    start: u64,
    reference_bases: impl Into<String>,
    alternate_bases: impl Into<String>,
    assembly_id: impl Into<String>,
  ) -> Self {
    Self {
      reference_name: reference_name.into(),
      start,
      reference_bases: reference_bases.into(),
      alternate_bases: alternate_bases.into(),
      assembly_id: assembly_id.into(),
      ..Default::default()
    }
  }

  /// Set the dataset ids to query.
  pub fn with_dataset_ids(mut self, dataset_ids: Vec<impl Into<String>>) -> Self {
    self.dataset_ids = dataset_ids.into_iter().map(|id| id.into()).collect();
    self
  }

  /// Set whether per-dataset outcomes should be returned in the answer.
  pub fn with_include_dataset_responses(mut self, include_dataset_responses: bool) -> Self {
    self.include_dataset_responses = include_dataset_responses;
    self
  }

  /// Reference name.
  pub fn reference_name(&self) -> &str {
    &self.reference_name
  }

  /// The 0-based start position.
  pub fn start(&self) -> u64 {
    self.start
  }

  /// Reference bases.
  pub fn reference_bases(&self) -> &str {
    &self.reference_bases
  }

  /// Alternate bases.
  pub fn alternate_bases(&self) -> &str {
    &self.alternate_bases
  }

  /// Assembly id.
  pub fn assembly_id(&self) -> &str {
    &self.assembly_id
  }

  /// Dataset ids, in input order.
  pub fn dataset_ids(&self) -> &[String] {
    &self.dataset_ids
  }

  /// Whether per-dataset outcomes should be returned.
  pub fn include_dataset_responses(&self) -> bool {
    self.include_dataset_responses
  }
}

/// An error embedded in the answer envelope when a remote lookup failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ErrorInfo {
  pub error_code: i32,
  pub message: String,
}

impl ErrorInfo {
  /// Create a new `ErrorInfo`.
  pub fn new(error_code: i32, message: impl Into<String>) -> Self {
    Self {
      error_code,
      message: message.into(),
    }
  }
}

/// The outcome for a single dataset that resolved to a variant collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DatasetOutcome {
  pub dataset_id: String,
  pub exists: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub frequency: Option<f64>,
  pub call_count: u64,
  pub variant_count: u64,
  pub sample_count: u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<ErrorInfo>,
}

impl DatasetOutcome {
  /// Create a new dataset outcome.
  pub fn new(
    dataset_id: impl Into<String>,
    exists: bool,
    frequency: Option<f64>,
    call_count: u64,
    variant_count: u64,
    sample_count: u64,
  ) -> Self {
    Self {
      dataset_id: dataset_id.into(),
      exists,
      frequency,
      call_count,
      variant_count,
      sample_count,
      error: None,
    }
  }
}

/// The aggregate answer for one allele query. `exists` is unset exactly when
/// `error` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AggregateAnswer {
  pub beacon_id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exists: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<ErrorInfo>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub allele_request: Option<AlleleQuery>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dataset_allele_responses: Option<Vec<DatasetOutcome>>,
}

impl AggregateAnswer {
  /// Create a new answer for the beacon with the given id.
  pub fn new(beacon_id: impl Into<String>) -> Self {
    Self {
      beacon_id: beacon_id.into(),
      exists: None,
      error: None,
      allele_request: None,
      dataset_allele_responses: None,
    }
  }

  /// Set the top-level existence flag.
  pub fn with_exists(mut self, exists: bool) -> Self {
    self.exists = Some(exists);
    self
  }

  /// Set the error.
  pub fn with_error(mut self, error: ErrorInfo) -> Self {
    self.error = Some(error);
    self
  }

  /// Echo the originating request.
  pub fn with_allele_request(mut self, allele_request: AlleleQuery) -> Self {
    self.allele_request = Some(allele_request);
    self
  }

  /// Set the per-dataset outcomes.
  pub fn with_dataset_allele_responses(mut self, responses: Vec<DatasetOutcome>) -> Self {
    self.dataset_allele_responses = Some(responses);
    self
  }
}
