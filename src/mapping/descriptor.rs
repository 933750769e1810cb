//! Static entity mapping descriptors and the per-type descriptor cache.
//!
//! Every convertible type declares an [`EntityMapping`] once; the serializer
//! resolves it into an [`EntityDescriptor`] the first time the type is seen
//! and caches the result by `TypeId`.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::constants::ILLEGAL_NAME_CHARS;

/// A type that can be mapped onto the graph.
///
/// Serialization provides the member set; the mapping declares which members
/// play the reserved identity/label/partition-key roles.
pub trait GraphEntity: Serialize {
  fn mapping() -> EntityMapping;
}

/// Declarative mapping for one entity type.
///
/// Member names refer to *serialized* field names, so serde renames apply.
#[derive(Debug, Clone)]
pub struct EntityMapping {
  type_name: &'static str,
  id: Option<&'static str>,
  label_member: Option<&'static str>,
  label_class: Option<&'static str>,
  partition_key: Option<&'static str>,
  ignored: Vec<&'static str>,
}

impl EntityMapping {
  pub fn new(type_name: &'static str) -> Self {
    Self {
      type_name,
      id: None,
      label_member: None,
      label_class: None,
      partition_key: None,
      ignored: Vec::new(),
    }
  }

  /// Mark a member as the identity source.
  pub fn id(mut self, member: &'static str) -> Self {
    self.id = Some(member);
    self
  }

  /// Take the label from a member's value. The member itself is removed
  /// from the emittable set.
  pub fn label_member(mut self, member: &'static str) -> Self {
    self.label_member = Some(member);
    self
  }

  /// Fixed class-level label. A member-level label wins over this.
  pub fn label(mut self, label: &'static str) -> Self {
    self.label_class = Some(label);
    self
  }

  /// Mark a member as the partition-key source.
  pub fn partition_key(mut self, member: &'static str) -> Self {
    self.partition_key = Some(member);
    self
  }

  /// Exclude a member from output entirely.
  pub fn ignore(mut self, member: &'static str) -> Self {
    self.ignored.push(member);
    self
  }
}

/// Where the reserved `label` field takes its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LabelSource {
  /// Value of a member, which is removed from the emittable set.
  Member(String),
  /// Fixed class-level override.
  Class(String),
  /// The entity's type name, unless a per-call selector replaces it.
  TypeName,
}

/// Resolved, validated form of an [`EntityMapping`].
///
/// Identity and partition-key members stay emittable as ordinary properties;
/// only label-source members, ignored members and illegally named members
/// leave the emittable set.
#[derive(Debug)]
pub(crate) struct EntityDescriptor {
  pub type_name: &'static str,
  pub id_member: Option<String>,
  pub label: LabelSource,
  pub partition_key_member: Option<String>,
  pub ignored: HashSet<String>,
}

impl EntityDescriptor {
  fn from_mapping(mapping: &EntityMapping) -> Self {
    let label = match (mapping.label_member, mapping.label_class) {
      (Some(member), _) => LabelSource::Member(member.to_string()),
      (None, Some(class)) => LabelSource::Class(class.to_string()),
      (None, None) => LabelSource::TypeName,
    };

    Self {
      type_name: mapping.type_name,
      id_member: mapping.id.map(str::to_string),
      label,
      partition_key_member: mapping.partition_key.map(str::to_string),
      ignored: mapping.ignored.iter().map(|member| (*member).to_string()).collect(),
    }
  }

  /// Whether a serialized member belongs in the output property set.
  pub fn emits(&self, member: &str) -> bool {
    if self.ignored.contains(member) {
      return false;
    }
    if let LabelSource::Member(label_member) = &self.label {
      if label_member == member {
        return false;
      }
    }
    legal_member_name(member)
  }
}

/// Member names containing service-reserved characters are dropped from
/// output rather than renamed; callers must not rely on them round-tripping.
pub(crate) fn legal_member_name(name: &str) -> bool {
  !name
    .chars()
    .any(|ch| ILLEGAL_NAME_CHARS.contains(&ch) || ch.is_ascii_control())
}

/// Read-mostly process-wide cache of resolved descriptors.
///
/// Population is atomic per key with first-writer-wins semantics; a racing
/// build produces an equivalent descriptor, so duplicate work is harmless.
#[derive(Debug, Default)]
pub(crate) struct DescriptorCache {
  descriptors: RwLock<HashMap<TypeId, Arc<EntityDescriptor>>>,
}

impl DescriptorCache {
  pub fn resolve<T: GraphEntity + 'static>(&self) -> Arc<EntityDescriptor> {
    let key = TypeId::of::<T>();
    if let Some(descriptor) = self.descriptors.read().get(&key) {
      return Arc::clone(descriptor);
    }

    let descriptor = Arc::new(EntityDescriptor::from_mapping(&T::mapping()));
    let mut descriptors = self.descriptors.write();
    Arc::clone(descriptors.entry(key).or_insert(descriptor))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Serialize)]
  struct Sample {
    name: String,
  }

  impl GraphEntity for Sample {
    fn mapping() -> EntityMapping {
      EntityMapping::new("Sample")
        .id("SampleId")
        .label_member("Kind")
        .label("SampleClass")
        .partition_key("Name")
        .ignore("Secret")
    }
  }

  #[test]
  fn member_label_wins_over_class_label() {
    let cache = DescriptorCache::default();
    let descriptor = cache.resolve::<Sample>();

    assert_eq!(descriptor.label, LabelSource::Member("Kind".to_string()));
    assert_eq!(descriptor.id_member.as_deref(), Some("SampleId"));
    assert_eq!(descriptor.partition_key_member.as_deref(), Some("Name"));
  }

  #[test]
  fn label_and_ignored_members_are_not_emitted() {
    let cache = DescriptorCache::default();
    let descriptor = cache.resolve::<Sample>();

    assert!(!descriptor.emits("Kind"), "label member must not be emitted");
    assert!(!descriptor.emits("Secret"), "ignored member must not be emitted");
    assert!(descriptor.emits("SampleId"), "id member stays emittable");
    assert!(descriptor.emits("Name"), "partition-key member stays emittable");
  }

  #[test]
  fn illegal_member_names_are_rejected() {
    for name in ["a/b", "a\\b", "tag#line", "why?", "ctl\u{7}"] {
      assert!(!legal_member_name(name), "name should be illegal: {name}");
    }
    for name in ["Title", "release_date", "Cast List", "émigré"] {
      assert!(legal_member_name(name), "name should be legal: {name}");
    }
  }

  #[test]
  fn cache_returns_the_same_descriptor_instance() {
    let cache = DescriptorCache::default();
    let first = cache.resolve::<Sample>();
    let second = cache.resolve::<Sample>();
    assert!(Arc::ptr_eq(&first, &second));
  }
}
