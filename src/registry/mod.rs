//! # Definition Registry
//!
//! The [`Registry`] maps types to their [`ResourceDefinition`], envelope types
//! to their [`WrapperDefinition`], and keeps the per-type set of ignored
//! property names used by default mapping.
//!
//! ## Publication model
//!
//! The registry state is an immutable [`Snapshot`] behind an [`ArcSwap`].
//! Every configuration call builds a modified copy and publishes it with a
//! read-copy-update loop, so:
//!
//! - readers never observe a half-applied edit;
//! - concurrent writers never lose each other's updates;
//! - a conversion pins one snapshot for its whole traversal.
//!
//! ## Promotion
//!
//! Registering a type `T` first rewrites every registered definition: any
//! attribute declared as `T` (or a container of `T`) becomes a relationship.
//! Together with [`DefinitionBuilder::map_with_defaults`], which classifies
//! properties against the types registered so far, this makes the final
//! mapping independent of registration order.
//!
//! ```rust
//! use flat_results::{properties, Registry};
//!
//! pub struct Category { pub id: u32, pub name: String }
//! pub struct Product { pub id: u32, pub category: Option<Category> }
//!
//! properties!(Category { id: u32, name: String });
//! properties!(Product { id: u32, category: Option<Category> });
//!
//! let registry = Registry::new();
//! registry.register_new::<Product>().map_with_defaults();
//! assert!(registry.lookup::<Product>().unwrap().is_attribute("Category"));
//!
//! registry.register_new::<Category>().map_with_defaults();
//! assert!(registry.lookup::<Product>().unwrap().is_relationship("Category"));
//! ```

mod builder;

pub use builder::DefinitionBuilder;

use crate::convert::Converter;
use crate::definition::ResourceDefinition;
use crate::error::MappingError;
use crate::fields::FieldSelector;
use crate::model::{Document, Meta};
use crate::reflect::{Accessor, DeclaredType, Properties, Reflect, TypeKey, Typed};
use arc_swap::ArcSwap;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

type MetaExtractor = Arc<dyn Fn(&dyn Any) -> Option<Meta> + Send + Sync>;

/// How to unwrap one envelope type: payload accessor plus optional metadata.
#[derive(Clone)]
pub struct WrapperDefinition {
    ty: TypeKey,
    payload: Accessor,
    meta: Option<MetaExtractor>,
}

impl WrapperDefinition {
    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    pub fn has_meta(&self) -> bool {
        self.meta.is_some()
    }

    /// The payload of `envelope`, or `None` if it is not of the wrapper type.
    pub fn payload<'a>(&self, envelope: &'a dyn Any) -> Option<&'a dyn Reflect> {
        self.payload.get(envelope)
    }

    pub fn meta(&self, envelope: &dyn Any) -> Option<Meta> {
        self.meta.as_ref().and_then(|meta| meta(envelope))
    }
}

impl fmt::Debug for WrapperDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperDefinition")
            .field("ty", &self.ty)
            .field("has_meta", &self.has_meta())
            .finish()
    }
}

/// Immutable registry state published as a unit.
#[derive(Debug, Clone, Default)]
pub(crate) struct Snapshot {
    definitions: HashMap<TypeKey, Arc<ResourceDefinition>>,
    ignored: HashMap<TypeKey, HashSet<String>>,
    wrappers: HashMap<TypeKey, Arc<WrapperDefinition>>,
}

impl Snapshot {
    pub(crate) fn definition(&self, key: TypeKey) -> Result<&Arc<ResourceDefinition>, MappingError> {
        self.definitions
            .get(&key)
            .ok_or_else(|| MappingError::ConfigNotFound(key.name().to_owned()))
    }

    pub(crate) fn wrapper(&self, key: TypeKey) -> Option<&Arc<WrapperDefinition>> {
        self.wrappers.get(&key)
    }

    /// True if the declared type (or its element type) has a resource definition.
    pub(crate) fn is_resource(&self, declared: DeclaredType) -> bool {
        self.definitions.contains_key(&declared.ty)
            || declared
                .element
                .is_some_and(|element| self.definitions.contains_key(&element))
    }

    /// True if the declared type (or its element type) is a registered wrapper.
    fn is_wrapper(&self, declared: DeclaredType) -> bool {
        self.wrappers.contains_key(&declared.ty)
            || declared
                .element
                .is_some_and(|element| self.wrappers.contains_key(&element))
    }

    fn is_ignored(&self, key: TypeKey, name: &str) -> bool {
        self.ignored.get(&key).is_some_and(|names| names.contains(name))
    }

    fn definition_mut(&mut self, key: TypeKey) -> Option<&mut ResourceDefinition> {
        self.definitions.get_mut(&key).map(Arc::make_mut)
    }

    /// Promotes attributes declared as `target` in every definition.
    ///
    /// Returns the owning type and name of each promoted member.
    fn promote(&mut self, target: TypeKey) -> Vec<(TypeKey, String)> {
        let mut promoted = Vec::new();
        for definition in self.definitions.values_mut() {
            if !definition.has_attribute_of(target) {
                continue;
            }
            let definition = Arc::make_mut(definition);
            let owner = definition.type_key();
            promoted.extend(
                definition
                    .promote_attributes_of(target)
                    .into_iter()
                    .map(|name| (owner, name)),
            );
        }
        promoted
    }
}

fn log_promoted(target: TypeKey, promoted: &[(TypeKey, String)]) {
    for (owner, name) in promoted {
        info!(
            resource_type = %owner,
            property = %name,
            related_type = %target,
            "Attribute promoted to relationship"
        );
    }
}

/// Process-wide mapping configuration and conversion entry point.
///
/// Construct one at startup, configure it, and share it (for example as
/// `Arc<Registry>`) with everything that converts values. Tests can create
/// independent registries instead of resetting a global one.
pub struct Registry {
    snapshot: ArcSwap<Snapshot>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot.load();
        f.debug_struct("Registry")
            .field("definitions", &snapshot.definitions.len())
            .field("wrappers", &snapshot.wrappers.len())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::default()),
        }
    }

    /// Publishes one edit as a new snapshot.
    ///
    /// The edit may run more than once if another writer publishes first, so
    /// it must only touch the snapshot it is given.
    pub(crate) fn publish(&self, mut edit: impl FnMut(&mut Snapshot)) {
        self.snapshot.rcu(|current| {
            let mut next = Snapshot::clone(current);
            edit(&mut next);
            next
        });
    }

    pub(crate) fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    // --- Configuration ---

    /// Replaces any definition of `T` with a fresh one and returns its builder.
    ///
    /// Attributes of other types declared as `T` are promoted to relationships.
    pub fn register_new<T: Properties>(&self) -> DefinitionBuilder<'_, T> {
        let key = TypeKey::of::<T>();
        let fresh = Arc::new(ResourceDefinition::new::<T>());
        let mut promoted = Vec::new();
        self.publish(|snapshot| {
            promoted = snapshot.promote(key);
            snapshot.definitions.insert(key, Arc::clone(&fresh));
            snapshot.ignored.insert(key, HashSet::new());
        });
        debug!(resource_type = %key, "Definition registered");
        log_promoted(key, &promoted);
        DefinitionBuilder::new(self)
    }

    /// Like [`register_new`](Self::register_new) but keeps an existing definition of `T`.
    pub fn extend_existing<T: Properties>(&self) -> DefinitionBuilder<'_, T> {
        let key = TypeKey::of::<T>();
        let fresh = Arc::new(ResourceDefinition::new::<T>());
        let mut promoted = Vec::new();
        self.publish(|snapshot| {
            promoted = snapshot.promote(key);
            snapshot
                .definitions
                .entry(key)
                .or_insert_with(|| Arc::clone(&fresh));
            snapshot.ignored.entry(key).or_default();
        });
        debug!(resource_type = %key, "Definition extended");
        log_promoted(key, &promoted);
        DefinitionBuilder::new(self)
    }

    /// Drops every definition, ignored-field set and wrapper registration.
    pub fn clear_all(&self) {
        self.snapshot.store(Arc::new(Snapshot::default()));
        info!("Registry cleared");
    }

    /// Registers an envelope type without metadata.
    ///
    /// Re-registering the same envelope type replaces the previous entry.
    pub fn register_wrapper<W: Any, P: Reflect>(&self, payload: fn(&W) -> &P) {
        self.install_wrapper(WrapperDefinition {
            ty: TypeKey::of::<W>(),
            payload: Accessor::new(payload),
            meta: None,
        });
    }

    /// Registers an envelope type whose metadata is merged into the document.
    pub fn register_wrapper_with_meta<W: Any, P: Reflect>(
        &self,
        payload: fn(&W) -> &P,
        meta: impl Fn(&W) -> Meta + Send + Sync + 'static,
    ) {
        let meta: MetaExtractor = Arc::new(move |envelope: &dyn Any| envelope.downcast_ref::<W>().map(&meta));
        self.install_wrapper(WrapperDefinition {
            ty: TypeKey::of::<W>(),
            payload: Accessor::new(payload),
            meta: Some(meta),
        });
    }

    fn install_wrapper(&self, wrapper: WrapperDefinition) {
        let key = wrapper.ty;
        let wrapper = Arc::new(wrapper);
        self.publish(|snapshot| {
            snapshot.wrappers.insert(key, Arc::clone(&wrapper));
        });
        info!(wrapper_type = %key, "Wrapper registered");
    }

    // --- Lookup ---

    pub fn lookup<T: Any>(&self) -> Result<Arc<ResourceDefinition>, MappingError> {
        self.snapshot
            .load()
            .definition(TypeKey::of::<T>())
            .map(Arc::clone)
    }

    pub fn lookup_wrapper<W: Any>(&self) -> Result<Arc<WrapperDefinition>, MappingError> {
        let key = TypeKey::of::<W>();
        self.snapshot
            .load()
            .wrapper(key)
            .map(Arc::clone)
            .ok_or_else(|| MappingError::ConfigNotFound(key.name().to_owned()))
    }

    /// True if values of type `T` can be turned into a document.
    ///
    /// That is: `T` is [`Document`], an envelope (registered or through
    /// [`Envelope`](crate::reflect::Envelope)), a registered resource type, or a
    /// container whose element type is registered.
    pub fn is_convertible<T: Typed>(&self) -> bool {
        let declared = T::declared();
        if declared.ty == TypeKey::of::<Document>() || T::is_envelope() {
            return true;
        }
        let snapshot = self.snapshot.load();
        snapshot.is_wrapper(declared) || snapshot.is_resource(declared)
    }

    // --- Conversion ---

    /// Converts a value with its full mapping.
    pub fn to_document(&self, value: &dyn Reflect) -> Result<Document, MappingError> {
        self.to_document_with(value, false, None)
    }

    /// Converts a value, optionally as identifiers only or restricted to `fields`.
    pub fn to_document_with(
        &self,
        value: &dyn Reflect,
        identifier_only: bool,
        fields: Option<&FieldSelector>,
    ) -> Result<Document, MappingError> {
        let snapshot = self.snapshot();
        let value_type = value.type_key();
        debug!(%value_type, identifier_only, filtered = fields.is_some(), "Convert");
        Converter::new(&snapshot)
            .convert(value, identifier_only, fields)
            .inspect_err(|e| warn!(%value_type, error = %e, "Conversion failed"))
    }

    /// Converts a sequence of values into one collection document, fully mapped.
    pub fn to_document_all<'a, T, I>(&self, values: I) -> Result<Document, MappingError>
    where
        T: Reflect + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.to_document_all_with(values, false, None)
    }

    /// Sequence form of [`to_document_with`](Self::to_document_with).
    pub fn to_document_all_with<'a, T, I>(
        &self,
        values: I,
        identifier_only: bool,
        fields: Option<&FieldSelector>,
    ) -> Result<Document, MappingError>
    where
        T: Reflect + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let snapshot = self.snapshot();
        let converter = Converter::new(&snapshot);
        let value_type = TypeKey::of::<T>();
        debug!(%value_type, identifier_only, filtered = fields.is_some(), "Convert sequence");
        let mut document = Document::collection();
        for value in values {
            let item = converter
                .convert(value, identifier_only, fields)
                .inspect_err(|e| warn!(%value_type, error = %e, "Conversion failed"))?;
            document.append(item);
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties;

    struct Unit {
        id: u32,
    }

    struct Shelf {
        id: u32,
        units: Vec<Unit>,
    }

    properties!(Unit { id: u32 });
    properties!(Shelf { id: u32, units: Vec<Unit> });

    #[test]
    fn promotion_reports_each_member_once() {
        let registry = Registry::new();
        registry.register_new::<Shelf>().with_id("Id").with_attribute("Units");

        let mut snapshot = Snapshot::clone(&registry.snapshot());
        let promoted = snapshot.promote(TypeKey::of::<Unit>());
        assert_eq!(promoted, [(TypeKey::of::<Shelf>(), "Units".to_owned())]);
        assert!(snapshot.promote(TypeKey::of::<Unit>()).is_empty());

        // The published snapshot is untouched until a registration publishes.
        assert!(registry.lookup::<Shelf>().unwrap().is_attribute("Units"));
        registry.register_new::<Unit>();
        assert!(registry.lookup::<Shelf>().unwrap().is_relationship("Units"));
    }
}
