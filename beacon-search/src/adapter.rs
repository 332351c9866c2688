//! The response assembler: fans an allele query out across the requested
//! datasets and merges per-dataset outcomes into one answer.
//!

use async_trait::async_trait;
use tracing::{debug, instrument};

use beacon_client::{Result as GatewayResult, VariantDataGateway};
use beacon_config::config::service_info::Beacon;
use beacon_config::config::Config;
use beacon_config::types::{
  AggregateAnswer, AlleleQuery, BeaconError, DatasetOutcome, ErrorInfo, Result,
};

use crate::{evidence, resolver, stats, BeaconAdapter};

/// A beacon which answers allele queries by querying a variant data gateway.
/// Each query builds a fresh object graph; only the gateway outlives a query.
#[derive(Debug, Clone)]
pub struct AnnotationsBeacon<G> {
  gateway: G,
  beacon: Beacon,
}

impl<G> AnnotationsBeacon<G>
where
  G: VariantDataGateway,
{
  /// Create a new beacon over the gateway, with the given identity.
  pub fn new(gateway: G, beacon: Beacon) -> Self {
    Self { gateway, beacon }
  }

  /// Create a new beacon taking its identity from the config.
  pub fn with_config(gateway: G, config: &Config) -> Self {
    Self::new(gateway, config.beacon().clone())
  }

  /// Get the gateway.
  pub fn gateway(&self) -> &G {
    &self.gateway
  }

  /// Run the pipeline for one dataset id. `Ok(None)` means the dataset did
  /// not resolve for the requested assembly and contributes nothing.
  async fn dataset_outcome(
    &self,
    query: &AlleleQuery,
    dataset_id: &str,
  ) -> GatewayResult<Option<DatasetOutcome>> {
    let Some(collection) =
      resolver::resolve(&self.gateway, dataset_id, query.assembly_id()).await?
    else {
      return Ok(None);
    };

    let matching = evidence::collect(
      &self.gateway,
      &collection,
      query.reference_name(),
      query.start(),
      query.reference_bases(),
      query.alternate_bases(),
    )
    .await?;

    let stats = stats::aggregate(&self.gateway, &matching, query.alternate_bases()).await?;

    Ok(Some(DatasetOutcome::new(
      dataset_id,
      stats.exists(),
      stats.frequency(),
      stats.call_count(),
      stats.variant_count(),
      stats.sample_count(),
    )))
  }
}

fn validate(query: &AlleleQuery) -> Result<()> {
  fn require(value: &str, field: &str) -> Result<()> {
    if value.is_empty() {
      Err(BeaconError::invalid_input(format!(
        "{} must not be empty",
        field
      )))
    } else {
      Ok(())
    }
  }

  require(query.reference_name(), "referenceName")?;
  require(query.reference_bases(), "referenceBases")?;
  require(query.alternate_bases(), "alternateBases")?;
  require(query.assembly_id(), "assemblyId")
}

#[async_trait]
impl<G> BeaconAdapter for AnnotationsBeacon<G>
where
  G: VariantDataGateway,
{
  fn beacon(&self) -> &Beacon {
    &self.beacon
  }

  #[instrument(level = "debug", skip(self))]
  async fn allele_response(&self, query: AlleleQuery) -> Result<AggregateAnswer> {
    validate(&query)?;

    let mut outcomes = vec![];
    let mut error: Option<ErrorInfo> = None;

    for dataset_id in query.dataset_ids() {
      match self.dataset_outcome(&query, dataset_id).await {
        Ok(Some(outcome)) => outcomes.push(outcome),
        Ok(None) => debug!(dataset_id = dataset_id.as_str(), "dataset produces no outcome"),
        Err(err) => {
          // The first gateway failure aborts the run. Outcomes gathered so
          // far stay in the returned list, but the answer is indeterminate.
          error = Some(err.into());
          break;
        }
      }
    }

    let mut answer = AggregateAnswer::new(self.beacon.id());

    match error {
      Some(error) => answer = answer.with_error(error),
      None => answer = answer.with_exists(outcomes.iter().any(|outcome| outcome.exists)),
    }

    if query.include_dataset_responses() {
      answer = answer.with_dataset_allele_responses(outcomes);
    }

    Ok(answer.with_allele_request(query))
  }
}
