//! Client for a remote GA4GH variant data service. The [VariantDataGateway]
//! trait is the boundary the aggregation pipeline runs against, and
//! [Ga4ghClient] implements it over JSON HTTP.
//!

use async_trait::async_trait;

pub use crate::error::{GatewayError, Result};
pub use crate::ga4gh::Ga4ghClient;
use crate::types::{CallSet, ReferenceSet, Variant, VariantAnnotationSet, VariantSet};

pub mod error;
pub mod ga4gh;
pub mod types;

/// The remote lookups needed to answer a beacon query. `Ok(None)` means the
/// remote has no such resource, which is a legitimate non-error outcome.
/// `Err` is a connectivity or protocol failure, fatal to the current query.
#[async_trait]
pub trait VariantDataGateway: Send + Sync {
  /// Search variants in a variant set, scoped to a reference name and start
  /// position. Position filtering is performed by the remote service.
  async fn search_variants(
    &self,
    variant_set_id: &str,
    reference_name: &str,
    start: u64,
  ) -> Result<Vec<Variant>>;

  /// Fetch a variant set by id.
  async fn variant_set(&self, id: &str) -> Result<Option<VariantSet>>;

  /// Fetch a variant annotation set by id.
  async fn variant_annotation_set(&self, id: &str) -> Result<Option<VariantAnnotationSet>>;

  /// Fetch a reference set by id.
  async fn reference_set(&self, id: &str) -> Result<Option<ReferenceSet>>;

  /// Fetch a call set by id.
  async fn call_set(&self, id: &str) -> Result<Option<CallSet>>;
}
