use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};

use cosmograph::pipeline::{
  BulkExecutor, BulkSummary, DocumentResponse, DocumentStore, WriteMode,
};
use cosmograph::{EntityMapping, EntitySerializer, GraphEntity};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Movie {
  movie_id: String,
  title: String,
}

impl GraphEntity for Movie {
  fn mapping() -> EntityMapping {
    EntityMapping::new("Movie").id("MovieId").partition_key("Title")
  }
}

/// In-memory store: records every write, fails ids containing "bad",
/// charges a flat 5 RU per successful write.
#[derive(Default)]
struct RecordingStore {
  writes: Mutex<Vec<(WriteMode, String)>>,
}

impl RecordingStore {
  fn written_ids(&self) -> Vec<String> {
    self.writes.lock().iter().map(|(_, id)| id.clone()).collect()
  }
}

impl DocumentStore for RecordingStore {
  fn write(&self, mode: WriteMode, document: &Value) -> DocumentResponse {
    let id = document["id"].as_str().unwrap_or_default().to_string();
    self.writes.lock().push((mode, id.clone()));

    if id.contains("bad") {
      DocumentResponse::failure(409, format!("conflict on {id}"))
    } else {
      DocumentResponse::success(201, 5.0, Duration::from_millis(2))
    }
  }
}

fn documents(count: usize) -> Vec<Value> {
  let serializer = EntitySerializer::default();
  (0..count)
    .map(|i| {
      let movie = Movie {
        movie_id: format!("m-{i}"),
        title: format!("Movie {i}"),
      };
      let document = serializer.to_document(&movie).expect("to_document");
      serde_json::to_value(&document).expect("serialize document")
    })
    .collect()
}

#[test]
fn two_hundred_one_documents_make_three_pages() {
  let store = RecordingStore::default();
  let executor = BulkExecutor::new(&store);

  let mut page_sizes = Vec::new();
  let responses = executor.upsert_all(documents(201), |page| page_sizes.push(page.len()));

  assert_eq!(page_sizes, [100, 100, 1]);
  assert_eq!(responses.len(), 201);
  assert!(responses.iter().all(DocumentResponse::is_successful));

  let summary = BulkSummary::from_responses(&responses);
  assert_eq!(summary.succeeded, 201);
  assert_eq!(summary.failed, 0);
  assert!((summary.total_request_charge - 201.0 * 5.0).abs() < 1e-9);
  assert_eq!(summary.total_execution_time, Duration::from_millis(402));
}

#[test]
fn a_failed_item_does_not_stop_the_run() {
  let store = RecordingStore::default();
  let executor = BulkExecutor::new(&store).page_size(2);

  let mut docs = documents(4);
  docs.insert(2, json!({"id": "bad-doc", "Title": "Broken"}));

  let responses = executor.insert_all(docs, |_| {});

  assert_eq!(responses.len(), 5, "every item must be attempted");
  assert_eq!(store.written_ids().len(), 5);

  let summary = BulkSummary::from_responses(&responses);
  assert_eq!(summary.succeeded, 4);
  assert_eq!(summary.failed, 1);

  let failed: Vec<_> = responses.iter().filter(|r| !r.is_successful()).collect();
  assert_eq!(failed.len(), 1);
  assert_eq!(failed[0].status_code, 409);
  assert!(failed[0].error.as_deref().is_some_and(|e| e.contains("bad-doc")));

  // items after the failure were still written
  assert_eq!(store.written_ids().last().map(String::as_str), Some("m-3"));
}

#[test]
fn write_mode_reaches_the_store() {
  let store = RecordingStore::default();
  let executor = BulkExecutor::new(&store).page_size(10);

  executor.insert_all(documents(3), |_| {});
  executor.upsert_all(documents(3), |_| {});

  let writes = store.writes.lock();
  assert!(writes[..3].iter().all(|(mode, _)| *mode == WriteMode::Insert));
  assert!(writes[3..].iter().all(|(mode, _)| *mode == WriteMode::Upsert));
}

#[test]
fn progress_callback_sees_each_page_once_in_order() {
  let store = RecordingStore::default();
  let executor = BulkExecutor::new(&store).page_size(3);

  let mut seen = Vec::new();
  executor.upsert_all(documents(7), |page| {
    seen.push(page.iter().filter(|r| r.is_successful()).count());
  });

  assert_eq!(seen, [3, 3, 1]);
}

#[test]
fn empty_input_yields_no_pages_and_no_responses() {
  let store = RecordingStore::default();
  let executor = BulkExecutor::new(&store);

  let mut pages = 0;
  let responses = executor.upsert_all(Vec::new(), |_| pages += 1);

  assert_eq!(pages, 0);
  assert!(responses.is_empty());
  assert!(store.written_ids().is_empty());
}
