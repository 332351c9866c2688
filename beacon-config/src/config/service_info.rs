//! The beacon identity record returned alongside every answer.
//!

use serde::{Deserialize, Serialize};

fn default_beacon_id() -> String {
  "sample-beacon".to_string()
}

fn default_beacon_name() -> String {
  "Sample Beacon".to_string()
}

fn default_api_version() -> String {
  "0.3.0".to_string()
}

fn default_date_time() -> String {
  "01.01.2016".to_string()
}

fn default_organization_id() -> String {
  "sample-organization".to_string()
}

fn default_organization_name() -> String {
  "Sample Organization".to_string()
}

/// The organization running the beacon.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all(serialize = "camelCase"), default)]
pub struct Organization {
  id: String,
  name: String,
}

impl Organization {
  /// Create a new organization.
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
    }
  }

  /// Get the id.
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Get the name.
  pub fn name(&self) -> &str {
    &self.name
  }
}

impl Default for Organization {
  fn default() -> Self {
    Self {
      id: default_organization_id(),
      name: default_organization_name(),
    }
  }
}

/// The identity of this beacon. Injected once at startup and immutable
/// afterwards. Config keys stay snake_case, the camelCase renaming only
/// applies when serializing into an answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all(serialize = "camelCase"), default)]
pub struct Beacon {
  id: String,
  name: String,
  api_version: String,
  organization: Organization,
  create_date_time: String,
  update_date_time: String,
}

impl Beacon {
  /// Create a new beacon identity.
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    api_version: impl Into<String>,
    organization: Organization,
    create_date_time: impl Into<String>,
    update_date_time: impl Into<String>,
  ) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      api_version: api_version.into(),
      organization,
      create_date_time: create_date_time.into(),
      update_date_time: update_date_time.into(),
    }
  }

  /// Get the id.
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Get the name.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Get the api version.
  pub fn api_version(&self) -> &str {
    &self.api_version
  }

  /// Get the organization.
  pub fn organization(&self) -> &Organization {
    &self.organization
  }

  /// Get the creation date time.
  pub fn create_date_time(&self) -> &str {
    &self.create_date_time
  }

  /// Get the update date time.
  pub fn update_date_time(&self) -> &str {
    &self.update_date_time
  }
}

impl Default for Beacon {
  fn default() -> Self {
    Self {
      id: default_beacon_id(),
      name: default_beacon_name(),
      api_version: default_api_version(),
      organization: Organization::default(),
      create_date_time: default_date_time(),
      update_date_time: default_date_time(),
    }
  }
}
