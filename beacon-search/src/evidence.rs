//! Gathers the variant records in a collection which match the requested
//! allele exactly.
//!

use tracing::{debug, instrument};

use beacon_client::types::Variant;
use beacon_client::{Result, VariantDataGateway};

use crate::resolver::VariantCollection;

/// Search the collection at the given position and keep the records whose
/// reference bases equal the requested reference bases and whose alternate
/// list contains the requested alternate bases. No partial matching; the
/// order of the remote response is preserved.
#[instrument(level = "debug", skip(gateway, collection))]
pub async fn collect<G>(
  gateway: &G,
  collection: &VariantCollection,
  reference_name: &str,
  start: u64,
  reference_bases: &str,
  alternate_bases: &str,
) -> Result<Vec<Variant>>
where
  G: VariantDataGateway,
{
  let variants = gateway
    .search_variants(collection.variant_set_id(), reference_name, start)
    .await?;

  let matching = variants
    .into_iter()
    .filter(|variant| {
      variant.reference_bases == reference_bases
        && variant
          .alternate_bases
          .iter()
          .any(|base| base == alternate_bases)
    })
    .collect::<Vec<_>>();

  debug!(
    variant_set_id = collection.variant_set_id(),
    count = matching.len(),
    "variants matching the requested allele"
  );

  Ok(matching)
}
