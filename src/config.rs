//! Connection configuration for the remote service.
//!
//! Parsing and defaults only; establishing connections, authentication and
//! provisioning calls live outside this crate.

use crate::constants::DEFAULT_PARTITION_KEY_FIELD;
use crate::error::{CosmoError, Result};

const KEY_ACCOUNT_ENDPOINT: &str = "AccountEndpoint";
const KEY_ACCOUNT_KEY: &str = "AccountKey";

/// Resolved connection settings for one database/container pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
  pub endpoint: String,
  pub auth_key: String,
  pub database: String,
  pub container: String,
}

impl ConnectionConfig {
  /// Build from an account name or a full endpoint URL.
  pub fn from_account_name(account: &str, auth_key: &str, database: &str, container: &str) -> Self {
    let endpoint = if account.starts_with("https://") {
      account.to_string()
    } else {
      format!("https://{account}.documents.azure.com:443/")
    };

    Self {
      endpoint,
      auth_key: auth_key.to_string(),
      database: database.to_string(),
      container: container.to_string(),
    }
  }

  /// Parse an `AccountEndpoint=...;AccountKey=...;` connection string.
  ///
  /// Unknown segments are ignored; a missing endpoint or key is a
  /// configuration error.
  pub fn from_connection_string(
    connection_string: &str,
    database: &str,
    container: &str,
  ) -> Result<Self> {
    let mut endpoint = None;
    let mut auth_key = None;

    for segment in connection_string.split(';') {
      let segment = segment.trim();
      if segment.is_empty() {
        continue;
      }

      // keys never contain '='; values (base64 keys) may end with padding
      let Some((key, value)) = segment.split_once('=') else {
        return Err(CosmoError::Configuration(format!(
          "malformed connection string segment: {segment}"
        )));
      };

      match key.trim() {
        KEY_ACCOUNT_ENDPOINT => endpoint = Some(value.to_string()),
        KEY_ACCOUNT_KEY => auth_key = Some(value.to_string()),
        _ => {}
      }
    }

    let endpoint = endpoint.ok_or_else(|| {
      CosmoError::Configuration(format!("connection string has no {KEY_ACCOUNT_ENDPOINT}"))
    })?;
    let auth_key = auth_key.ok_or_else(|| {
      CosmoError::Configuration(format!("connection string has no {KEY_ACCOUNT_KEY}"))
    })?;

    Ok(Self {
      endpoint,
      auth_key,
      database: database.to_string(),
      container: container.to_string(),
    })
  }
}

/// Options for creating a missing database/container.
///
/// Throughput left unset means the service default applies at container
/// level; the values are never validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
  pub database: String,
  pub container: String,
  pub partition_key_path: String,
  pub database_throughput: Option<u32>,
  pub container_throughput: Option<u32>,
}

impl CreateOptions {
  pub fn new(database: impl Into<String>, container: impl Into<String>) -> Self {
    Self {
      database: database.into(),
      container: container.into(),
      partition_key_path: format!("/{DEFAULT_PARTITION_KEY_FIELD}"),
      database_throughput: None,
      container_throughput: None,
    }
  }

  pub fn partition_key_path(mut self, path: impl Into<String>) -> Self {
    self.partition_key_path = path.into();
    self
  }

  pub fn database_throughput(mut self, request_units: u32) -> Self {
    self.database_throughput = Some(request_units);
    self
  }

  pub fn container_throughput(mut self, request_units: u32) -> Self {
    self.container_throughput = Some(request_units);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn connection_string_round_trips_endpoint_and_key() {
    let config = ConnectionConfig::from_connection_string(
      "AccountEndpoint=https://acme.documents.azure.com:443/;AccountKey=c2VjcmV0cGFkZGluZw==;",
      "core",
      "test1",
    )
    .expect("parse connection string");

    assert_eq!(config.endpoint, "https://acme.documents.azure.com:443/");
    assert_eq!(config.auth_key, "c2VjcmV0cGFkZGluZw==", "key padding must survive");
    assert_eq!(config.database, "core");
    assert_eq!(config.container, "test1");
  }

  #[test]
  fn missing_endpoint_or_key_is_a_configuration_error() {
    let missing = [
      "AccountKey=abc;",
      "AccountEndpoint=https://acme.documents.azure.com:443/;",
      "",
    ];

    for raw in missing {
      assert!(
        ConnectionConfig::from_connection_string(raw, "db", "c").is_err(),
        "should fail: {raw}"
      );
    }
  }

  #[test]
  fn account_name_expands_to_the_service_endpoint() {
    let config = ConnectionConfig::from_account_name("acme", "key", "db", "c");
    assert_eq!(config.endpoint, "https://acme.documents.azure.com:443/");

    let passthrough =
      ConnectionConfig::from_account_name("https://acme.documents.azure.com:443/", "key", "db", "c");
    assert_eq!(passthrough.endpoint, "https://acme.documents.azure.com:443/");
  }

  #[test]
  fn create_options_default_to_the_partition_key_path() {
    let options = CreateOptions::new("db", "c");
    assert_eq!(options.partition_key_path, "/PartitionKey");
    assert_eq!(options.database_throughput, None);
    assert_eq!(options.container_throughput, None);

    let tuned = CreateOptions::new("db", "c")
      .partition_key_path("/pk")
      .container_throughput(1000);
    assert_eq!(tuned.partition_key_path, "/pk");
    assert_eq!(tuned.container_throughput, Some(1000));
  }
}
