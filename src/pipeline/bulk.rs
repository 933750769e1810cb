//! Paged bulk writes with partial-failure aggregation.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use super::response::DocumentResponse;

/// Items per page before the progress callback fires. 201 items make 3
/// pages.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Write disposition for a bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
  /// Fails on an existing document id.
  Insert,
  /// Replaces an existing document with the same id.
  Upsert,
}

/// Transport seam: one document write against the remote service.
///
/// Implementations own connection, auth and retry-on-throttle concerns; the
/// pipeline only schedules calls and aggregates their outcomes.
pub trait DocumentStore {
  fn write(&self, mode: WriteMode, document: &Value) -> DocumentResponse;
}

/// Aggregated totals for a set of responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkSummary {
  pub total: usize,
  pub succeeded: usize,
  pub failed: usize,
  pub total_request_charge: f64,
  pub total_execution_time: Duration,
}

impl BulkSummary {
  pub fn from_responses(responses: &[DocumentResponse]) -> Self {
    let mut summary = Self {
      total: responses.len(),
      ..Self::default()
    };

    for response in responses {
      if response.is_successful() {
        summary.succeeded += 1;
      } else {
        summary.failed += 1;
      }
      summary.total_request_charge += response.request_charge;
      summary.total_execution_time += response.execution_time;
    }

    summary
  }
}

/// Pages an input sequence through a [`DocumentStore`].
///
/// A failed item never aborts the run; every response is returned so callers
/// can aggregate or retry selectively.
pub struct BulkExecutor<'a, S: DocumentStore> {
  store: &'a S,
  page_size: usize,
}

impl<'a, S: DocumentStore> BulkExecutor<'a, S> {
  pub fn new(store: &'a S) -> Self {
    Self {
      store,
      page_size: DEFAULT_PAGE_SIZE,
    }
  }

  /// Override the page size (minimum 1).
  pub fn page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size.max(1);
    self
  }

  /// Insert every document, reporting each completed page via `on_page`.
  pub fn insert_all(
    &self,
    documents: impl IntoIterator<Item = Value>,
    on_page: impl FnMut(&[DocumentResponse]),
  ) -> Vec<DocumentResponse> {
    self.run(WriteMode::Insert, documents, on_page)
  }

  /// Upsert every document, reporting each completed page via `on_page`.
  pub fn upsert_all(
    &self,
    documents: impl IntoIterator<Item = Value>,
    on_page: impl FnMut(&[DocumentResponse]),
  ) -> Vec<DocumentResponse> {
    self.run(WriteMode::Upsert, documents, on_page)
  }

  fn run(
    &self,
    mode: WriteMode,
    documents: impl IntoIterator<Item = Value>,
    mut on_page: impl FnMut(&[DocumentResponse]),
  ) -> Vec<DocumentResponse> {
    let mut responses = Vec::new();
    let mut page = Vec::with_capacity(self.page_size);
    let mut page_index = 0_usize;

    for document in documents {
      page.push(self.store.write(mode, &document));
      if page.len() == self.page_size {
        finish_page(&mut responses, &mut page, &mut on_page, page_index);
        page_index += 1;
      }
    }

    if !page.is_empty() {
      finish_page(&mut responses, &mut page, &mut on_page, page_index);
    }

    responses
  }
}

fn finish_page(
  responses: &mut Vec<DocumentResponse>,
  page: &mut Vec<DocumentResponse>,
  on_page: &mut impl FnMut(&[DocumentResponse]),
  page_index: usize,
) {
  on_page(page);

  let summary = BulkSummary::from_responses(page);
  debug!(
    page = page_index,
    items = summary.total,
    failed = summary.failed,
    request_charge = summary.total_request_charge,
    "bulk page complete"
  );

  responses.append(page);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn summary_totals_add_up() {
    let responses = [
      DocumentResponse::success(201, 5.2, Duration::from_millis(10)),
      DocumentResponse::failure(409, "conflict"),
      DocumentResponse::success(200, 4.8, Duration::from_millis(6)),
    ];

    let summary = BulkSummary::from_responses(&responses);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert!((summary.total_request_charge - 10.0).abs() < 1e-9);
    assert_eq!(summary.total_execution_time, Duration::from_millis(16));
  }
}
