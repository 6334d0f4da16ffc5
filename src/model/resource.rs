use super::Document;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use std::hash::{Hash, Hasher};

/// The normalized representation of one domain object.
///
/// Identity is `(type, id)` only: two resources with the same type and id are
/// interchangeable for deduplication even if their attributes differ.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    type_name: String,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes: Option<IndexMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relationships: Option<IndexMap<String, Document>>,
}

impl Resource {
    /// An identifier-only resource, as used for relationship linkage.
    pub fn identifier(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
            attributes: None,
            relationships: None,
        }
    }

    pub(crate) fn with_members(
        mut self,
        attributes: IndexMap<String, Value>,
        relationships: IndexMap<String, Document>,
    ) -> Self {
        self.attributes = (!attributes.is_empty()).then_some(attributes);
        self.relationships = (!relationships.is_empty()).then_some(relationships);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> Option<&IndexMap<String, Value>> {
        self.attributes.as_ref()
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.as_ref()?.get(name)
    }

    pub fn relationships(&self) -> Option<&IndexMap<String, Document>> {
        self.relationships.as_ref()
    }

    pub fn relationship(&self, name: &str) -> Option<&Document> {
        self.relationships.as_ref()?.get(name)
    }

    /// True if this resource carries neither attributes nor relationships.
    pub fn is_identifier(&self) -> bool {
        self.attributes.is_none() && self.relationships.is_none()
    }

    pub fn is(&self, type_name: &str, id: &str) -> bool {
        self.type_name == type_name && self.id == id
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.id == other.id
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        self.id.hash(state);
    }
}

/// An insertion-ordered set of resources, deduplicated by `(type, id)`.
///
/// The first resource inserted for an identity wins.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ResourceCollection {
    resources: IndexSet<Resource>,
}

impl ResourceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if a resource with the same identity was already present.
    pub fn insert(&mut self, resource: Resource) -> bool {
        self.resources.insert(resource)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn get(&self, type_name: &str, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.is(type_name, id))
    }

    pub fn contains(&self, type_name: &str, id: &str) -> bool {
        self.get(type_name, id).is_some()
    }
}

impl Extend<Resource> for ResourceCollection {
    fn extend<I: IntoIterator<Item = Resource>>(&mut self, iter: I) {
        self.resources.extend(iter);
    }
}

impl FromIterator<Resource> for ResourceCollection {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResourceCollection {
    type Item = Resource;
    type IntoIter = indexmap::set::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResourceCollection {
    type Item = &'a Resource;
    type IntoIter = indexmap::set::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

/// The primary data of a document: one resource or a collection.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Data {
    Resource(Resource),
    Collection(ResourceCollection),
}

impl Data {
    /// Flattens the data into a collection.
    pub fn into_collection(self) -> ResourceCollection {
        match self {
            Data::Resource(resource) => std::iter::once(resource).collect(),
            Data::Collection(collection) => collection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_attributes() {
        let named = Resource::identifier("Category", "1")
            .with_members(IndexMap::from([("Name".to_string(), Value::from("A"))]), IndexMap::new());
        let bare = Resource::identifier("Category", "1");
        assert_eq!(named, bare);

        let mut set = ResourceCollection::new();
        assert!(set.insert(named));
        assert!(!set.insert(bare));
        assert_eq!(set.len(), 1);
        let kept = set.get("Category", "1").unwrap();
        assert_eq!(kept.attribute("Name"), Some(&Value::from("A")));
    }

    #[test]
    fn empty_members_are_absent() {
        let resource = Resource::identifier("Category", "1").with_members(IndexMap::new(), IndexMap::new());
        assert!(resource.is_identifier());
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json, serde_json::json!({"type": "Category", "id": "1"}));
    }
}
