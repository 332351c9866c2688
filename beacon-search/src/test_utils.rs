//! An in-memory gateway for exercising the pipeline without a remote service.
//!

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use beacon_client::types::{CallSet, ReferenceSet, Variant, VariantAnnotationSet, VariantSet};
use beacon_client::{GatewayError, Result, VariantDataGateway};

/// A gateway serving fixtures from memory, with optional injected failures.
#[derive(Debug, Default)]
pub(crate) struct TestGateway {
  variants: Vec<Variant>,
  variant_sets: HashMap<String, VariantSet>,
  annotation_sets: HashMap<String, VariantAnnotationSet>,
  reference_sets: HashMap<String, ReferenceSet>,
  call_sets: HashMap<String, CallSet>,
  fail_search: bool,
  fail_search_for: HashSet<String>,
  fail_reference_sets: bool,
  call_set_lookups: AtomicUsize,
}

impl TestGateway {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Link a dataset id to a variant set and its reference set with the given
  /// assembly.
  pub(crate) fn with_dataset(
    mut self,
    dataset_id: &str,
    variant_set_id: &str,
    reference_set_id: &str,
    assembly_id: &str,
  ) -> Self {
    self.annotation_sets.insert(
      dataset_id.to_string(),
      VariantAnnotationSet {
        id: dataset_id.to_string(),
        variant_set_id: variant_set_id.to_string(),
      },
    );
    self.variant_sets.insert(
      variant_set_id.to_string(),
      VariantSet {
        id: variant_set_id.to_string(),
        reference_set_id: reference_set_id.to_string(),
      },
    );
    self.reference_sets.insert(
      reference_set_id.to_string(),
      ReferenceSet {
        id: reference_set_id.to_string(),
        assembly_id: assembly_id.to_string(),
      },
    );
    self
  }

  pub(crate) fn with_variant(mut self, variant: Variant) -> Self {
    self.variants.push(variant);
    self
  }

  pub(crate) fn with_call_set(mut self, id: &str, biosample_id: &str) -> Self {
    self.call_sets.insert(
      id.to_string(),
      CallSet {
        id: id.to_string(),
        biosample_id: biosample_id.to_string(),
      },
    );
    self
  }

  pub(crate) fn with_search_failure(mut self) -> Self {
    self.fail_search = true;
    self
  }

  /// Fail searches against one variant set only, leaving other datasets
  /// untouched.
  pub(crate) fn with_search_failure_for(mut self, variant_set_id: &str) -> Self {
    self.fail_search_for.insert(variant_set_id.to_string());
    self
  }

  pub(crate) fn with_reference_set_failure(mut self) -> Self {
    self.fail_reference_sets = true;
    self
  }

  /// How many call set lookups the gateway has served.
  pub(crate) fn call_set_lookups(&self) -> usize {
    self.call_set_lookups.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl VariantDataGateway for TestGateway {
  async fn search_variants(
    &self,
    variant_set_id: &str,
    _reference_name: &str,
    _start: u64,
  ) -> Result<Vec<Variant>> {
    if self.fail_search || self.fail_search_for.contains(variant_set_id) {
      return Err(GatewayError::SearchVariants(
        variant_set_id.to_string(),
        "connection refused".to_string(),
      ));
    }

    Ok(self.variants.clone())
  }

  async fn variant_set(&self, id: &str) -> Result<Option<VariantSet>> {
    Ok(self.variant_sets.get(id).cloned())
  }

  async fn variant_annotation_set(&self, id: &str) -> Result<Option<VariantAnnotationSet>> {
    Ok(self.annotation_sets.get(id).cloned())
  }

  async fn reference_set(&self, id: &str) -> Result<Option<ReferenceSet>> {
    if self.fail_reference_sets {
      return Err(GatewayError::ReferenceSet(
        id.to_string(),
        "connection refused".to_string(),
      ));
    }

    Ok(self.reference_sets.get(id).cloned())
  }

  async fn call_set(&self, id: &str) -> Result<Option<CallSet>> {
    self.call_set_lookups.fetch_add(1, Ordering::SeqCst);
    Ok(self.call_sets.get(id).cloned())
  }
}
