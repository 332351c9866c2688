//! GA4GH wire types used by the gateway. Field names follow the protobuf JSON
//! mapping of the GA4GH schemas, and absent fields deserialize to defaults.
//!

use serde::{Deserialize, Serialize};

/// A genotype call made against a variant, associated with a call set.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Call {
  pub call_set_id: String,
  pub genotype_likelihood: Vec<f64>,
}

impl Call {
  /// Create a new call.
  pub fn new(call_set_id: impl Into<String>, genotype_likelihood: Vec<f64>) -> Self {
    Self {
      call_set_id: call_set_id.into(),
      genotype_likelihood,
    }
  }
}

/// An observed variant at a position, with the calls made against it.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Variant {
  pub id: String,
  pub reference_bases: String,
  pub alternate_bases: Vec<String>,
  pub calls: Vec<Call>,
}

impl Variant {
  /// Create a new variant.
  pub fn new(
    id: impl Into<String>,
    reference_bases: impl Into<String>,
    alternate_bases: Vec<impl Into<String>>,
    calls: Vec<Call>,
  ) -> Self {
    Self {
      id: id.into(),
      reference_bases: reference_bases.into(),
      alternate_bases: alternate_bases.into_iter().map(|base| base.into()).collect(),
      calls,
    }
  }
}

/// A collection of variants, pointing at the reference set its coordinates are
/// expressed against.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantSet {
  pub id: String,
  pub reference_set_id: String,
}

/// A set of variant annotations, pointing at the variant set it annotates.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantAnnotationSet {
  pub id: String,
  pub variant_set_id: String,
}

/// A reference set, identifying a genome assembly.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceSet {
  pub id: String,
  pub assembly_id: String,
}

/// A call set, associating genotype calls with a biological sample.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallSet {
  pub id: String,
  pub biosample_id: String,
}

/// The body of a `variants/search` request.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchVariantsRequest {
  pub variant_set_id: String,
  pub reference_name: String,
  pub start: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub page_size: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub page_token: Option<String>,
}

impl SearchVariantsRequest {
  /// Create a new search request scoped to a variant set, reference name and
  /// start position.
  pub fn new(
    variant_set_id: impl Into<String>,
    reference_name: impl Into<String>,
    start: u64,
  ) -> Self {
    Self {
      variant_set_id: variant_set_id.into(),
      reference_name: reference_name.into(),
      start,
      ..Default::default()
    }
  }

  /// Set the page token for the next page of results.
  pub fn with_page_token(mut self, page_token: impl Into<String>) -> Self {
    self.page_token = Some(page_token.into());
    self
  }
}

/// One page of a `variants/search` response. An empty `nextPageToken` marks
/// the last page.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchVariantsResponse {
  pub variants: Vec<Variant>,
  pub next_page_token: String,
}

impl SearchVariantsResponse {
  /// Create a new search response page.
  pub fn new(variants: Vec<Variant>, next_page_token: impl Into<String>) -> Self {
    Self {
      variants,
      next_page_token: next_page_token.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::{from_value, json, to_value};

  use super::*;

  #[test]
  fn deserialize_variant_with_absent_fields() {
    let variant: Variant = from_value(json!({
      "referenceBases": "A",
      "alternateBases": ["T"]
    }))
    .unwrap();

    assert_eq!(variant.reference_bases, "A");
    assert_eq!(variant.alternate_bases, vec!["T".to_string()]);
    assert!(variant.calls.is_empty());
  }

  #[test]
  fn deserialize_variant_ignores_unknown_fields() {
    let variant: Variant = from_value(json!({
      "referenceBases": "A",
      "alternateBases": ["T"],
      "referenceName": "chr1",
      "created": "0"
    }))
    .unwrap();

    assert_eq!(variant.reference_bases, "A");
  }

  #[test]
  fn serialize_search_request_omits_unset_paging() {
    assert_eq!(
      to_value(SearchVariantsRequest::new("vs1", "chr1", 1000)).unwrap(),
      json!({
        "variantSetId": "vs1",
        "referenceName": "chr1",
        "start": 1000
      })
    );
  }

  #[test]
  fn serialize_search_request_with_page_token() {
    let value = to_value(SearchVariantsRequest::new("vs1", "chr1", 1000).with_page_token("p2"))
      .unwrap();

    assert_eq!(value.get("pageToken").unwrap(), "p2");
  }

  #[test]
  fn deserialize_call_genotype_likelihood() {
    let call: Call = from_value(json!({
      "callSetId": "cs1",
      "genotypeLikelihood": [0.1, 0.8, 0.1]
    }))
    .unwrap();

    assert_eq!(call, Call::new("cs1", vec![0.1, 0.8, 0.1]));
  }
}
