//! # Resource Definitions
//!
//! A [`ResourceDefinition`] is the compiled mapping for one type: identifier
//! accessor, type tag, and the named attribute and relationship accessors.
//! Definitions are owned by the [`Registry`](crate::Registry) and edited only
//! through its builder, which publishes a fresh copy for every change.
//!
//! A name is never an attribute and a relationship at the same time: adding it
//! to one side removes it from the other.

use crate::convert::Converter;
use crate::error::MappingError;
use crate::fields::{FieldSelector, Selection};
use crate::model::{Document, Resource};
use crate::reflect::{properties_of, Accessor, DeclaredType, Properties, PropertyInfo, Reflect, Shape, TypeKey};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

const DEFAULT_ID_PROPERTY: &str = "Id";

/// A named accessor together with its declared type.
#[derive(Debug, Clone)]
pub struct Member {
    declared: DeclaredType,
    accessor: Accessor,
}

impl Member {
    pub fn new(declared: DeclaredType, accessor: Accessor) -> Self {
        Self { declared, accessor }
    }

    pub fn declared(&self) -> DeclaredType {
        self.declared
    }
}

impl From<&PropertyInfo> for Member {
    fn from(property: &PropertyInfo) -> Self {
        Self::new(property.declared(), property.accessor().clone())
    }
}

/// The compiled mapping configuration of one type.
#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    ty: TypeKey,
    type_name: Option<String>,
    properties: Arc<[PropertyInfo]>,
    id: Option<Member>,
    attributes: IndexMap<String, Member>,
    relationships: IndexMap<String, Member>,
}

impl ResourceDefinition {
    /// An empty definition for `T`.
    ///
    /// The identifier defaults to a property named `Id`, then `{TypeName}Id`;
    /// with neither present it stays unset and conversions fail later with
    /// [`MappingError::MissingIdentifier`].
    pub fn new<T: Properties>() -> Self {
        let ty = TypeKey::of::<T>();
        let mut definition = Self {
            ty,
            type_name: None,
            properties: properties_of::<T>(),
            id: None,
            attributes: IndexMap::new(),
            relationships: IndexMap::new(),
        };
        if !definition.set_id(DEFAULT_ID_PROPERTY) {
            definition.set_id(&format!("{}{}", ty.name(), DEFAULT_ID_PROPERTY));
        }
        definition
    }

    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    /// The tag emitted as `type` on every resource of this definition.
    pub fn type_name(&self) -> &str {
        match self.type_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.ty.name(),
        }
    }

    pub fn has_identifier(&self) -> bool {
        self.id.is_some()
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn relationship_names(&self) -> impl Iterator<Item = &str> {
        self.relationships.keys().map(String::as_str)
    }

    pub fn is_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn is_relationship(&self, name: &str) -> bool {
        self.relationships.contains_key(name)
    }

    pub fn attribute_type(&self, name: &str) -> Option<DeclaredType> {
        self.attributes.get(name).map(Member::declared)
    }

    pub fn relationship_type(&self, name: &str) -> Option<DeclaredType> {
        self.relationships.get(name).map(Member::declared)
    }

    /// The readable members of the mapped type.
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    pub(crate) fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|property| property.name() == name)
    }

    // --- Edits (applied by the registry builder on a private copy) ---

    /// Returns `false` and leaves the identifier untouched if no such property exists.
    pub(crate) fn set_id(&mut self, name: &str) -> bool {
        match self.property(name).map(Member::from) {
            Some(member) => {
                self.id = Some(member);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_id_member(&mut self, member: Member) {
        self.id = Some(member);
    }

    pub(crate) fn set_type_name(&mut self, name: Option<String>) {
        self.type_name = name;
    }

    pub(crate) fn add_attribute(&mut self, name: String, member: Member) {
        self.relationships.shift_remove(&name);
        self.attributes.insert(name, member);
    }

    pub(crate) fn add_relationship(&mut self, name: String, member: Member) {
        self.attributes.shift_remove(&name);
        self.relationships.insert(name, member);
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.attributes.shift_remove(name);
        self.relationships.shift_remove(name);
    }

    pub(crate) fn has_attribute_of(&self, target: TypeKey) -> bool {
        self.attributes
            .values()
            .any(|member| member.declared.refers_to(target))
    }

    /// Moves every attribute declared as `target` (or a container of it) to the relationships.
    ///
    /// Returns the names that moved.
    pub(crate) fn promote_attributes_of(&mut self, target: TypeKey) -> Vec<String> {
        let promoted: Vec<String> = self
            .attributes
            .iter()
            .filter(|(_, member)| member.declared.refers_to(target))
            .map(|(name, _)| name.clone())
            .collect();
        for name in &promoted {
            if let Some(member) = self.attributes.shift_remove(name) {
                self.relationships.insert(name.clone(), member);
            }
        }
        promoted
    }

    // --- Conversion ---

    fn identifier(&self, target: &dyn Reflect) -> Result<String, MappingError> {
        let missing = || MappingError::MissingIdentifier(self.ty.name().to_owned());
        let member = self.id.as_ref().ok_or_else(missing)?;
        match self.read(member, target)?.to_value() {
            Value::Null => Err(missing()),
            Value::String(id) => Ok(id),
            other => Ok(other.to_string()),
        }
    }

    fn read<'a>(&self, member: &Member, target: &'a dyn Reflect) -> Result<&'a dyn Reflect, MappingError> {
        member
            .accessor
            .get(target.as_any())
            .ok_or_else(|| self.mismatch(target))
    }

    fn mismatch(&self, target: &dyn Reflect) -> MappingError {
        MappingError::TypeMismatch {
            expected: self.ty.name().to_owned(),
            found: target.type_key().name().to_owned(),
        }
    }

    /// Builds the document for one instance of the mapped type.
    pub(crate) fn to_document(
        &self,
        converter: &Converter<'_>,
        target: &dyn Reflect,
        identifier_only: bool,
        fields: Option<&FieldSelector>,
    ) -> Result<Document, MappingError> {
        if target.type_key() != self.ty {
            return Err(self.mismatch(target));
        }

        let id = self.identifier(target)?;
        let resource = Resource::identifier(self.type_name(), id);
        if identifier_only {
            return Ok(Document::from_resource(resource));
        }

        let mut attributes = IndexMap::new();
        for (name, member) in &self.attributes {
            if fields.is_some_and(|fields| !fields.selects_attribute(name)) {
                continue;
            }
            attributes.insert(name.clone(), self.read(member, target)?.to_value());
        }

        let mut relationships = IndexMap::new();
        let mut included = Vec::new();
        for (name, member) in &self.relationships {
            let nested = match fields.map(|fields| fields.select_relationship(name)) {
                None | Some(Selection::Full) => None,
                Some(Selection::Narrowed(nested)) => Some(nested),
                Some(Selection::Skip) => continue,
            };

            let related = self.read(member, target)?;
            if matches!(related.shape(), Shape::Null) {
                continue;
            }

            relationships.insert(name.clone(), converter.convert(related, true, None)?);

            let side_loaded = converter.convert(related, false, nested.as_ref())?;
            included.push(side_loaded);
        }

        let mut document = Document::from_resource(resource.with_members(attributes, relationships));
        for side_loaded in included {
            document.include(side_loaded);
        }
        Ok(document)
    }
}
