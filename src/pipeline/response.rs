//! Per-operation response telemetry.

use std::time::Duration;

/// Outcome of a single document operation against the remote service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentResponse {
  pub status_code: u16,
  /// Cost of the operation in request units.
  pub request_charge: f64,
  pub execution_time: Duration,
  pub activity_id: Option<String>,
  pub etag: Option<String>,
  /// Back-off hint surfaced by the service when throttled.
  pub retry_after: Option<Duration>,
  pub error: Option<String>,
}

impl DocumentResponse {
  pub fn success(status_code: u16, request_charge: f64, execution_time: Duration) -> Self {
    Self {
      status_code,
      request_charge,
      execution_time,
      ..Self::default()
    }
  }

  pub fn failure(status_code: u16, error: impl Into<String>) -> Self {
    Self {
      status_code,
      error: Some(error.into()),
      ..Self::default()
    }
  }

  pub fn is_successful(&self) -> bool {
    (200..300).contains(&self.status_code)
  }
}

/// Typed read/query outcome, with an optional continuation token for paging.
#[derive(Debug, Clone)]
pub struct ReadResponse<T> {
  pub response: DocumentResponse,
  pub result: Option<T>,
  pub continuation_token: Option<String>,
}

impl<T> ReadResponse<T> {
  pub fn new(response: DocumentResponse, result: Option<T>) -> Self {
    Self {
      response,
      result,
      continuation_token: None,
    }
  }

  pub fn with_continuation(mut self, token: impl Into<String>) -> Self {
    self.continuation_token = Some(token.into());
    self
  }

  pub fn is_successful(&self) -> bool {
    self.response.is_successful()
  }
}
