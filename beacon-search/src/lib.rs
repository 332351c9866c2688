//! The aggregation and evidence-resolution pipeline behind the beacon: given
//! an allele query and a set of dataset ids, resolve each dataset to a variant
//! collection, gather matching variant records and merge per-dataset
//! statistics into one answer.
//!

use async_trait::async_trait;

use beacon_config::config::service_info::Beacon;
use beacon_config::types::{AggregateAnswer, AlleleQuery, Result};

pub use crate::adapter::AnnotationsBeacon;

pub mod adapter;
pub mod evidence;
pub mod resolver;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_utils;

/// Trait representing a beacon which can answer allele queries.
#[async_trait]
pub trait BeaconAdapter {
  /// The identity of this beacon.
  fn beacon(&self) -> &Beacon;

  /// Answer an allele query. Fails only on caller misuse. Remote failures are
  /// embedded in the returned answer, which is then indeterminate rather than
  /// a "not found".
  async fn allele_response(&self, query: AlleleQuery) -> Result<AggregateAnswer>;
}
