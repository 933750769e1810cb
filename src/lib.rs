//! Client-side mapping and access layer for a multi-model document/graph
//! database service.
//!
//! Two halves:
//!
//! - [`mapping`] — the entity-to-graph serialization engine. Typed entities
//!   declare a static [`EntityMapping`]; the [`EntitySerializer`] turns them
//!   into the vertex/edge document shapes the property-graph API expects
//!   (reserved `id`/`label`/partition-key fields plus `{id, _value, meta}`
//!   property envelopes) and reads either of the service's two response
//!   shapes back into typed entities.
//! - [`pipeline`] — a paged, partial-failure-tolerant bulk write pipeline
//!   over a caller-provided [`pipeline::DocumentStore`] transport, with
//!   per-page progress and cost/latency aggregation.
//!
//! [`config`] carries connection settings; no networking happens in this
//! crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod mapping;
pub mod pipeline;

pub use error::{CosmoError, Result};
pub use mapping::{
  EntityMapping, EntitySerializer, GraphDocument, GraphEntity, GraphItemBase, VertexOptions,
};
