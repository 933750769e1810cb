//! Bulk document pipeline.
//!
//! Pages large sequences of documents through a caller-provided transport,
//! tolerating partial failure and aggregating per-page cost/latency
//! telemetry. The transport itself (network, auth, sessions) lives outside
//! this crate behind [`DocumentStore`].

pub mod bulk;
pub mod response;

pub use bulk::{BulkExecutor, BulkSummary, DocumentStore, WriteMode, DEFAULT_PAGE_SIZE};
pub use response::{DocumentResponse, ReadResponse};
