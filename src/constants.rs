//! Reserved wire field names and addressing rules.
//!
//! These names are part of the remote service's document format; changing
//! any of them breaks interoperability.

/// Reserved identity field on every document.
pub const FIELD_ID: &str = "id";
/// Reserved display label field on every document.
pub const FIELD_LABEL: &str = "label";
/// Default name of the partition-key field. Configurable per serializer.
pub const DEFAULT_PARTITION_KEY_FIELD: &str = "PartitionKey";

/// Marks a document as an edge.
pub const FIELD_IS_EDGE: &str = "_isEdge";
/// Source endpoint identity on an edge document.
pub const FIELD_VERTEX_ID: &str = "_vertexId";
/// Source endpoint label on an edge document.
pub const FIELD_VERTEX_LABEL: &str = "_vertexLabel";
/// Destination endpoint identity on an edge document.
pub const FIELD_SINK: &str = "_sink";
/// Destination endpoint label on an edge document.
pub const FIELD_SINK_LABEL: &str = "_sinkLabel";
/// Destination endpoint partition key on an edge document.
pub const FIELD_SINK_PARTITION: &str = "_sinkPartition";

/// Property envelope entry: generated property id.
pub const ENVELOPE_ID: &str = "id";
/// Property envelope entry: the wrapped value.
pub const ENVELOPE_VALUE: &str = "_value";
/// Property envelope entry: metadata mapping (emitted empty).
pub const ENVELOPE_META: &str = "meta";

/// Container key of the traversal-surface response shape.
pub const GRAPHSON_PROPERTIES: &str = "properties";
/// Value key inside a traversal-surface property entry.
pub const GRAPHSON_VALUE: &str = "value";

/// Characters the service's addressing scheme disallows in member names.
/// Members carrying such names are dropped from output, never renamed.
pub const ILLEGAL_NAME_CHARS: &[char] = &['/', '\\', '#', '?'];
