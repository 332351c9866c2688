//! Computes existence, frequency and count statistics over the matching
//! variant records of one dataset.
//!

use std::collections::HashSet;

use tracing::instrument;

use beacon_client::types::Variant;
use beacon_client::{Result, VariantDataGateway};

/// Statistics aggregated over the matching variants of one dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetStats {
  exists: bool,
  frequency: Option<f64>,
  call_count: u64,
  variant_count: u64,
  sample_count: u64,
}

impl DatasetStats {
  /// Whether any matching variant exists.
  pub fn exists(&self) -> bool {
    self.exists
  }

  /// The allele frequency, unset when no genotype likelihood data is present.
  pub fn frequency(&self) -> Option<f64> {
    self.frequency
  }

  /// The total number of calls across the matching variants.
  pub fn call_count(&self) -> u64 {
    self.call_count
  }

  /// The number of matching variants.
  pub fn variant_count(&self) -> u64 {
    self.variant_count
  }

  /// The number of distinct biosamples behind the matching calls.
  pub fn sample_count(&self) -> u64 {
    self.sample_count
  }
}

/// Aggregate statistics over the matching variants. The sample count resolves
/// call sets through the gateway, so this can fail with a gateway error.
#[instrument(level = "debug", skip(gateway, matching))]
pub async fn aggregate<G>(
  gateway: &G,
  matching: &[Variant],
  alternate_bases: &str,
) -> Result<DatasetStats>
where
  G: VariantDataGateway,
{
  let variant_count = matching.len() as u64;
  let call_count = matching
    .iter()
    .map(|variant| variant.calls.len() as u64)
    .sum();

  Ok(DatasetStats {
    exists: !matching.is_empty(),
    frequency: calculate_frequency(matching, alternate_bases),
    call_count,
    variant_count,
    sample_count: count_samples(gateway, matching).await?,
  })
}

/// Count distinct biosamples across the matching calls, resolving each
/// distinct call set id through the gateway once. Distinctness is on the
/// resolved biosample id, not the call set id.
async fn count_samples<G>(gateway: &G, matching: &[Variant]) -> Result<u64>
where
  G: VariantDataGateway,
{
  let mut looked_up = HashSet::new();
  let mut biosamples = HashSet::new();

  for call in matching.iter().flat_map(|variant| variant.calls.iter()) {
    if !looked_up.insert(call.call_set_id.as_str()) {
      continue;
    }

    if let Some(call_set) = gateway.call_set(&call.call_set_id).await? {
      biosamples.insert(call_set.biosample_id);
    }
  }

  Ok(biosamples.len() as u64)
}

/// The fraction of genotype likelihood entries equal to the requested genotype
/// index, over all calls of all matching variants. Unset when there are no
/// likelihood entries at all.
fn calculate_frequency(matching: &[Variant], alternate_bases: &str) -> Option<f64> {
  let total: u64 = matching
    .iter()
    .flat_map(|variant| variant.calls.iter())
    .map(|call| call.genotype_likelihood.len() as u64)
    .sum();

  if total == 0 {
    return None;
  }

  let matching_genotypes: u64 = matching
    .iter()
    .map(|variant| {
      // An alternate absent from the list degrades to the reference index 0.
      // Known oddity, kept for compatibility.
      let requested_genotype = variant
        .alternate_bases
        .iter()
        .position(|base| base == alternate_bases)
        .map_or(0, |index| index + 1) as f64;

      variant
        .calls
        .iter()
        .flat_map(|call| call.genotype_likelihood.iter())
        .filter(|likelihood| **likelihood == requested_genotype)
        .count() as u64
    })
    .sum();

  Some(matching_genotypes as f64 / total as f64)
}
