//! Resolves a dataset id to the variant collection to search, validated
//! against the requested genome assembly.
//!

use tracing::{debug, instrument};

use beacon_client::{Result, VariantDataGateway};

/// A resolved handle on a remote variant set, carrying the reference and
/// assembly identity its coordinates are expressed against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantCollection {
  variant_set_id: String,
  reference_set_id: String,
  assembly_id: String,
}

impl VariantCollection {
  /// Create a new variant collection.
  pub fn new(
    variant_set_id: impl Into<String>,
    reference_set_id: impl Into<String>,
    assembly_id: impl Into<String>,
  ) -> Self {
    Self {
      variant_set_id: variant_set_id.into(),
      reference_set_id: reference_set_id.into(),
      assembly_id: assembly_id.into(),
    }
  }

  /// The id of the remote variant set.
  pub fn variant_set_id(&self) -> &str {
    &self.variant_set_id
  }

  /// The id of the reference set the variant set points at.
  pub fn reference_set_id(&self) -> &str {
    &self.reference_set_id
  }

  /// The assembly id of the reference set.
  pub fn assembly_id(&self) -> &str {
    &self.assembly_id
  }
}

/// Resolve a dataset id to a variant collection. Dataset ids name variant
/// annotation sets directly. `Ok(None)` means the dataset has no data for the
/// requested assembly, which produces no outcome and no error. Gateway
/// failures propagate.
#[instrument(level = "debug", skip(gateway))]
pub async fn resolve<G>(
  gateway: &G,
  dataset_id: &str,
  assembly_id: &str,
) -> Result<Option<VariantCollection>>
where
  G: VariantDataGateway,
{
  let Some(annotation_set) = gateway.variant_annotation_set(dataset_id).await? else {
    return Ok(None);
  };
  let Some(variant_set) = gateway.variant_set(&annotation_set.variant_set_id).await? else {
    return Ok(None);
  };
  let Some(reference_set) = gateway.reference_set(&variant_set.reference_set_id).await? else {
    return Ok(None);
  };

  if reference_set.assembly_id != assembly_id {
    debug!(
      dataset_id,
      dataset_assembly = reference_set.assembly_id.as_str(),
      requested_assembly = assembly_id,
      "dataset assembly does not match the requested assembly"
    );
    return Ok(None);
  }

  Ok(Some(VariantCollection::new(
    variant_set.id,
    reference_set.id,
    reference_set.assembly_id,
  )))
}
