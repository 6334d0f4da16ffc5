use super::{Data, Meta, Resource, ResourceCollection};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;

/// The output envelope: primary data, side-loaded resources and metadata.
///
/// `included` is deduplicated by `(type, id)` across the whole traversal and
/// is absent while empty. `append`, `include` and `add_meta` are the only
/// public mutation points.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    data: Option<Data>,
    #[serde(skip_serializing_if = "Option::is_none")]
    included: Option<IndexSet<Resource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document whose data is an empty collection.
    pub fn collection() -> Self {
        Self {
            data: Some(Data::Collection(ResourceCollection::new())),
            ..Self::default()
        }
    }

    pub fn from_resource(resource: Resource) -> Self {
        Self {
            data: Some(Data::Resource(resource)),
            ..Self::default()
        }
    }

    pub fn data(&self) -> Option<&Data> {
        self.data.as_ref()
    }

    /// The primary data if it is a single resource.
    pub fn resource(&self) -> Option<&Resource> {
        match &self.data {
            Some(Data::Resource(resource)) => Some(resource),
            _ => None,
        }
    }

    /// The primary data if it is a collection.
    pub fn resources(&self) -> Option<&ResourceCollection> {
        match &self.data {
            Some(Data::Collection(collection)) => Some(collection),
            _ => None,
        }
    }

    pub fn included(&self) -> Option<&IndexSet<Resource>> {
        self.included.as_ref()
    }

    pub fn included_resource(&self, type_name: &str, id: &str) -> Option<&Resource> {
        self.included
            .as_ref()?
            .iter()
            .find(|resource| resource.is(type_name, id))
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// Merges `other`'s data and included set into this document.
    ///
    /// A single resource is promoted to a collection when a second item
    /// arrives. `other`'s metadata is not carried over.
    pub fn append(&mut self, other: Document) {
        let Document { data, included, .. } = other;
        if let Some(data) = data {
            self.append_data(data);
        }
        if let Some(included) = included {
            self.include_all(included);
        }
    }

    /// Upserts a metadata entry.
    pub fn add_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.meta
            .get_or_insert_with(Meta::new)
            .insert(key.into(), value.into());
    }

    fn append_data(&mut self, data: Data) {
        self.data = Some(match self.data.take() {
            None => data,
            Some(Data::Resource(existing)) => {
                let mut collection = ResourceCollection::new();
                collection.insert(existing);
                collection.extend(data.into_collection());
                Data::Collection(collection)
            }
            Some(Data::Collection(mut collection)) => {
                collection.extend(data.into_collection());
                Data::Collection(collection)
            }
        });
    }

    /// Side-loads a related document: its data and its own included set.
    ///
    /// The primary data of this document is left untouched.
    pub fn include(&mut self, related: Document) {
        if let Some(data) = related.data {
            self.include_all(data.into_collection());
        }
        if let Some(included) = related.included {
            self.include_all(included);
        }
    }

    /// Folds resources into the included set, keeping the first copy of each identity.
    pub(crate) fn include_all(&mut self, resources: impl IntoIterator<Item = Resource>) {
        let mut resources = resources.into_iter().peekable();
        if resources.peek().is_none() {
            return;
        }
        self.included
            .get_or_insert_with(IndexSet::new)
            .extend(resources);
    }
}

impl From<Resource> for Document {
    fn from(resource: Resource) -> Self {
        Self::from_resource(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str) -> Resource {
        Resource::identifier("Category", id)
    }

    #[test]
    fn second_resource_promotes_data_to_collection() {
        let mut document = Document::from_resource(category("1"));
        document.append(Document::from_resource(category("2")));

        let collection = document.resources().expect("collection");
        assert_eq!(collection.len(), 2);
        assert!(collection.contains("Category", "1"));
        assert!(collection.contains("Category", "2"));
    }

    #[test]
    fn appending_into_empty_document_keeps_shape() {
        let mut document = Document::new();
        document.append(Document::from_resource(category("1")));
        assert_eq!(document.resource().map(Resource::id), Some("1"));
    }

    #[test]
    fn appending_duplicates_keeps_one_copy() {
        let mut document = Document::collection();
        document.append(Document::from_resource(category("1")));
        document.append(Document::from_resource(category("1")));
        assert_eq!(document.resources().map(ResourceCollection::len), Some(1));
    }

    #[test]
    fn included_is_absent_until_something_is_included() {
        let mut document = Document::collection();
        document.append(Document::collection());
        assert!(document.included().is_none());

        let mut other = Document::new();
        other.include_all([category("1"), category("1"), category("2")]);
        document.append(other);
        assert_eq!(document.included().map(IndexSet::len), Some(2));
    }

    #[test]
    fn include_side_loads_data_and_nested_included() {
        let mut related = Document::from_resource(Resource::identifier("Product", "1"));
        related.include_all([category("1")]);

        let mut document = Document::from_resource(category("1"));
        document.include(related);

        assert_eq!(document.resource().map(Resource::id), Some("1"));
        let included = document.included().unwrap();
        assert_eq!(included.len(), 2);
        assert!(document.included_resource("Product", "1").is_some());
    }

    #[test]
    fn add_meta_overwrites_existing_keys() {
        let mut document = Document::new();
        document.add_meta("TotalCount", 4);
        document.add_meta("Page", 1);
        document.add_meta("TotalCount", 5);

        let meta = document.meta().unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta["TotalCount"], Value::from(5));
        assert_eq!(meta.get_index(0).map(|(key, _)| key.as_str()), Some("TotalCount"));
    }

    #[test]
    fn absent_data_serializes_as_null() {
        let json = serde_json::to_value(Document::new()).unwrap();
        assert_eq!(json, serde_json::json!({ "data": null }));
    }
}
