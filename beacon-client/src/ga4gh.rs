//! A gateway implementation which queries a GA4GH service over HTTP.
//!

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use beacon_config::config::GatewayConfig;

use crate::error::GatewayError::{SearchVariants, UrlParse};
use crate::error::{GatewayError, Result};
use crate::types::{
  CallSet, ReferenceSet, SearchVariantsRequest, SearchVariantsResponse, Variant,
  VariantAnnotationSet, VariantSet,
};
use crate::VariantDataGateway;

pub const VARIANTS_SEARCH_PATH: &str = "variants/search";
pub const VARIANT_SETS_PATH: &str = "variantsets";
pub const VARIANT_ANNOTATION_SETS_PATH: &str = "variantannotationsets";
pub const REFERENCE_SETS_PATH: &str = "referencesets";
pub const CALL_SETS_PATH: &str = "callsets";

/// A client which issues variant data lookups against a GA4GH base endpoint.
/// Configured once at startup and reused across queries.
#[derive(Debug, Clone)]
pub struct Ga4ghClient {
  client: Client,
  url: Url,
}

impl Ga4ghClient {
  /// Construct a new client from an existing reqwest client and base url.
  pub fn new(client: Client, mut url: Url) -> Self {
    // Relative endpoint paths resolve against the last path segment, so the
    // base must end with a slash.
    if !url.path().ends_with('/') {
      url.set_path(&format!("{}/", url.path()));
    }

    Self { client, url }
  }

  /// Construct a new client with a default reqwest client.
  pub fn new_with_default_client(url: impl AsRef<str>) -> Result<Self> {
    let url = url
      .as_ref()
      .parse::<Url>()
      .map_err(|err| UrlParse(err.to_string()))?;

    let client = ClientBuilder::new()
      .build()
      .map_err(|err| GatewayError::Internal(format!("failed to build reqwest client: {}", err)))?;

    Ok(Self::new(client, url))
  }

  /// Construct a new client from the gateway config.
  pub fn from_config(config: &GatewayConfig) -> Result<Self> {
    Self::new_with_default_client(config.url())
  }

  /// Get the base url of this client.
  pub fn url(&self) -> &Url {
    &self.url
  }

  /// Resolve an endpoint path against the base url.
  pub fn endpoint(&self, path: &str) -> Result<Url> {
    self
      .url
      .join(path)
      .map_err(|err| UrlParse(err.to_string()))
  }

  /// Fetch a single resource by id. A 404 response is `Ok(None)`, any other
  /// failure maps through `on_err` with the failing id.
  async fn get_resource<T>(
    &self,
    path: &str,
    id: &str,
    on_err: fn(String, String) -> GatewayError,
  ) -> Result<Option<T>>
  where
    T: DeserializeOwned,
  {
    let url = self.endpoint(&format!("{}/{}", path, id))?;

    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|err| on_err(id.to_string(), err.to_string()))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if status.is_client_error() || status.is_server_error() {
      return Err(on_err(
        id.to_string(),
        format!("gateway returned {}", status),
      ));
    }

    let resource = response
      .json()
      .await
      .map_err(|err| on_err(id.to_string(), err.to_string()))?;

    Ok(Some(resource))
  }
}

#[async_trait]
impl VariantDataGateway for Ga4ghClient {
  #[instrument(level = "trace", skip(self))]
  async fn search_variants(
    &self,
    variant_set_id: &str,
    reference_name: &str,
    start: u64,
  ) -> Result<Vec<Variant>> {
    let url = self.endpoint(VARIANTS_SEARCH_PATH)?;

    let mut request = SearchVariantsRequest::new(variant_set_id, reference_name, start);
    let mut variants = vec![];

    loop {
      let response = self
        .client
        .post(url.clone())
        .json(&request)
        .send()
        .await
        .map_err(|err| SearchVariants(variant_set_id.to_string(), err.to_string()))?;

      let status = response.status();
      if status.is_client_error() || status.is_server_error() {
        return Err(SearchVariants(
          variant_set_id.to_string(),
          format!("gateway returned {}", status),
        ));
      }

      let page: SearchVariantsResponse = response
        .json()
        .await
        .map_err(|err| SearchVariants(variant_set_id.to_string(), err.to_string()))?;

      variants.extend(page.variants);

      if page.next_page_token.is_empty() {
        break;
      }
      request = request.with_page_token(page.next_page_token);
    }

    debug!(
      variant_set_id,
      count = variants.len(),
      "fetched variants from gateway"
    );

    Ok(variants)
  }

  #[instrument(level = "trace", skip(self))]
  async fn variant_set(&self, id: &str) -> Result<Option<VariantSet>> {
    self
      .get_resource(VARIANT_SETS_PATH, id, GatewayError::VariantSet)
      .await
  }

  #[instrument(level = "trace", skip(self))]
  async fn variant_annotation_set(&self, id: &str) -> Result<Option<VariantAnnotationSet>> {
    self
      .get_resource(
        VARIANT_ANNOTATION_SETS_PATH,
        id,
        GatewayError::VariantAnnotationSet,
      )
      .await
  }

  #[instrument(level = "trace", skip(self))]
  async fn reference_set(&self, id: &str) -> Result<Option<ReferenceSet>> {
    self
      .get_resource(REFERENCE_SETS_PATH, id, GatewayError::ReferenceSet)
      .await
  }

  #[instrument(level = "trace", skip(self))]
  async fn call_set(&self, id: &str) -> Result<Option<CallSet>> {
    self
      .get_resource(CALL_SETS_PATH, id, GatewayError::CallSet)
      .await
  }
}

#[cfg(test)]
mod tests {
  use std::future::Future;

  use axum::extract::Path;
  use axum::http::StatusCode;
  use axum::routing::{get, post};
  use axum::{Json, Router};
  use tokio::net::TcpListener;

  use crate::types::Call;

  use super::*;

  #[test]
  fn endpoint_from_base_without_trailing_slash() {
    let client = Ga4ghClient::new_with_default_client("http://example.com/ga4gh").unwrap();

    assert_eq!(
      client.endpoint("variantsets/vs1").unwrap().as_str(),
      "http://example.com/ga4gh/variantsets/vs1"
    );
  }

  #[test]
  fn endpoint_from_base_with_trailing_slash() {
    let client = Ga4ghClient::new_with_default_client("http://example.com/ga4gh/").unwrap();

    assert_eq!(
      client.endpoint("variants/search").unwrap().as_str(),
      "http://example.com/ga4gh/variants/search"
    );
  }

  #[tokio::test]
  async fn variant_set_found() {
    with_test_client(|client| async move {
      assert_eq!(
        client.variant_set("vs1").await.unwrap(),
        Some(VariantSet {
          id: "vs1".to_string(),
          reference_set_id: "rs1".to_string()
        })
      );
    })
    .await;
  }

  #[tokio::test]
  async fn variant_set_not_found_is_none() {
    with_test_client(|client| async move {
      assert_eq!(client.variant_set("missing").await.unwrap(), None);
    })
    .await;
  }

  #[tokio::test]
  async fn call_set_found() {
    with_test_client(|client| async move {
      assert_eq!(
        client.call_set("cs1").await.unwrap(),
        Some(CallSet {
          id: "cs1".to_string(),
          biosample_id: "bs1".to_string()
        })
      );
    })
    .await;
  }

  #[tokio::test]
  async fn reference_set_server_error() {
    with_test_client(|client| async move {
      assert!(matches!(
        client.reference_set("rs1").await.unwrap_err(),
        GatewayError::ReferenceSet(id, _) if id == "rs1"
      ));
    })
    .await;
  }

  #[tokio::test]
  async fn search_variants_concatenates_pages() {
    with_test_client(|client| async move {
      let variants = client.search_variants("vs1", "chr1", 1000).await.unwrap();

      assert_eq!(variants.len(), 2);
      assert_eq!(variants[0].id, "v1");
      assert_eq!(variants[1].id, "v2");
    })
    .await;
  }

  #[tokio::test]
  async fn search_variants_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Ga4ghClient::new_with_default_client(format!("http://{}", addr)).unwrap();

    assert!(matches!(
      client.search_variants("vs1", "chr1", 1000).await.unwrap_err(),
      GatewayError::SearchVariants(id, _) if id == "vs1"
    ));
  }

  fn test_router() -> Router {
    Router::new()
      .route(
        "/variantsets/:id",
        get(|Path(id): Path<String>| async move {
          if id == "vs1" {
            Ok(Json(VariantSet {
              id: "vs1".to_string(),
              reference_set_id: "rs1".to_string(),
            }))
          } else {
            Err(StatusCode::NOT_FOUND)
          }
        }),
      )
      .route(
        "/callsets/:id",
        get(|Path(id): Path<String>| async move {
          Json(CallSet {
            id,
            biosample_id: "bs1".to_string(),
          })
        }),
      )
      .route(
        "/referencesets/:id",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
      )
      .route(
        "/variants/search",
        post(|Json(request): Json<SearchVariantsRequest>| async move {
          let page = match request.page_token.as_deref() {
            None => SearchVariantsResponse::new(
              vec![Variant::new(
                "v1",
                "A",
                vec!["T"],
                vec![Call::new("cs1", vec![0.1, 0.8, 0.1])],
              )],
              "page-2",
            ),
            Some("page-2") => {
              SearchVariantsResponse::new(vec![Variant::new("v2", "A", vec!["C"], vec![])], "")
            }
            Some(_) => SearchVariantsResponse::default(),
          };

          Json(page)
        }),
      )
  }

  async fn with_test_client<F, Fut>(test: F)
  where
    F: FnOnce(Ga4ghClient) -> Fut,
    Fut: Future<Output = ()>,
  {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move { axum::serve(listener, test_router().into_make_service()).await });

    test(Ga4ghClient::new_with_default_client(format!("http://{}", addr)).unwrap()).await;
  }
}
