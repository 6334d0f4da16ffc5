use super::{Registry, Snapshot};
use crate::definition::{Member, ResourceDefinition};
use crate::reflect::{properties_of, Accessor, Properties, TypeKey, Typed};
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Fluent configuration of one type's [`ResourceDefinition`].
///
/// Each call publishes its edit to the registry immediately, so a builder can
/// be dropped at any point. Names refer to property names as produced by
/// [`properties!`](crate::properties) and are matched case-sensitively;
/// unknown names are ignored.
///
/// ```rust
/// use flat_results::{properties, Registry};
///
/// pub struct Unit { pub code: String, pub name: String, pub factor: f64 }
/// properties!(Unit { code: String, name: String, factor: f64 });
///
/// let registry = Registry::new();
/// registry
///     .register_new::<Unit>()
///     .with_id("Code")
///     .with_type_name("unitOfMeasure")
///     .map_with_defaults()
///     .ignore("Factor");
///
/// let definition = registry.lookup::<Unit>().unwrap();
/// assert_eq!(definition.type_name(), "unitOfMeasure");
/// assert!(definition.is_attribute("Name"));
/// assert!(!definition.is_attribute("Factor"));
/// ```
pub struct DefinitionBuilder<'r, T> {
    registry: &'r Registry,
    _type: PhantomData<fn() -> T>,
}

impl<'r, T: Properties> DefinitionBuilder<'r, T> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            _type: PhantomData,
        }
    }

    fn key() -> TypeKey {
        TypeKey::of::<T>()
    }

    /// Applies `edit` to this type's definition in a new snapshot.
    fn edit(self, mut edit: impl FnMut(&mut ResourceDefinition)) -> Self {
        let key = Self::key();
        let mut found = true;
        self.registry.publish(|snapshot| match snapshot.definition_mut(key) {
            Some(definition) => {
                found = true;
                edit(definition);
            }
            None => found = false,
        });
        if !found {
            warn!(resource_type = %key, "Definition no longer registered, edit dropped");
        }
        self
    }

    fn member(name: &str) -> Option<Member> {
        let member = properties_of::<T>()
            .iter()
            .find(|property| property.name() == name)
            .map(Member::from);
        if member.is_none() {
            debug!(resource_type = %Self::key(), property = name, "Unknown property ignored");
        }
        member
    }

    fn member_by<F: Typed>(getter: fn(&T) -> &F) -> Member {
        Member::new(F::declared(), Accessor::new(getter))
    }

    /// Uses the named property as the identifier.
    pub fn with_id(self, name: &str) -> Self {
        match Self::member(name) {
            Some(member) => self.edit(|definition| definition.set_id_member(member.clone())),
            None => self,
        }
    }

    /// Uses a custom accessor as the identifier.
    pub fn with_id_by<F: Typed>(self, getter: fn(&T) -> &F) -> Self {
        let member = Self::member_by(getter);
        self.edit(|definition| definition.set_id_member(member.clone()))
    }

    /// Sets the emitted `type` tag. An empty name restores the bare type name.
    pub fn with_type_name(self, name: impl Into<String>) -> Self {
        let name = Some(name.into()).filter(|name| !name.is_empty());
        self.edit(|definition| definition.set_type_name(name.clone()))
    }

    pub fn with_attribute(self, name: &str) -> Self {
        match Self::member(name) {
            Some(member) => self.edit(|definition| definition.add_attribute(name.to_owned(), member.clone())),
            None => self,
        }
    }

    /// Adds an attribute read through `getter` under `name`.
    pub fn with_attribute_by<F: Typed>(self, name: impl Into<String>, getter: fn(&T) -> &F) -> Self {
        let name = name.into();
        let member = Self::member_by(getter);
        self.edit(|definition| definition.add_attribute(name.clone(), member.clone()))
    }

    pub fn with_relationship(self, name: &str) -> Self {
        match Self::member(name) {
            Some(member) => self.edit(|definition| definition.add_relationship(name.to_owned(), member.clone())),
            None => self,
        }
    }

    /// Adds a relationship read through `getter` under `name`.
    pub fn with_relationship_by<F: Typed>(self, name: impl Into<String>, getter: fn(&T) -> &F) -> Self {
        let name = name.into();
        let member = Self::member_by(getter);
        self.edit(|definition| definition.add_relationship(name.clone(), member.clone()))
    }

    /// Maps every property that is neither ignored nor already a relationship.
    ///
    /// Properties whose declared type (or element type) is registered become
    /// relationships, all others attributes. Existing attributes keep their
    /// accessor unless they are promoted.
    pub fn map_with_defaults(self) -> Self {
        let key = Self::key();
        let mut mapped = (0, 0);
        self.registry.publish(|snapshot| {
            mapped = (0, 0);
            let plan = default_plan(snapshot, key);
            let Some(definition) = snapshot.definition_mut(key) else {
                return;
            };
            for (name, member, related) in plan {
                if related {
                    definition.add_relationship(name.to_owned(), member);
                    mapped.1 += 1;
                } else if !definition.is_attribute(name) {
                    definition.add_attribute(name.to_owned(), member);
                    mapped.0 += 1;
                }
            }
        });
        debug!(
            resource_type = %key,
            attributes = mapped.0,
            relationships = mapped.1,
            "Default mapping applied"
        );
        self
    }

    /// Excludes the named property from the mapping, now and for later default mapping.
    pub fn ignore(self, name: &str) -> Self {
        let key = Self::key();
        self.registry.publish(|snapshot| {
            snapshot
                .ignored
                .entry(key)
                .or_default()
                .insert(name.to_owned());
            if let Some(definition) = snapshot.definition_mut(key) {
                definition.remove(name);
            }
        });
        debug!(resource_type = %key, property = name, "Property ignored");
        self
    }
}

/// Classifies the unmapped properties of `key`: `(name, member, is_relationship)`.
fn default_plan(snapshot: &Snapshot, key: TypeKey) -> Vec<(&'static str, Member, bool)> {
    let Ok(definition) = snapshot.definition(key) else {
        return Vec::new();
    };
    definition
        .properties()
        .iter()
        .filter(|property| !snapshot.is_ignored(key, property.name()))
        .filter(|property| !definition.is_relationship(property.name()))
        .map(|property| {
            (
                property.name(),
                Member::from(property),
                snapshot.is_resource(property.declared()),
            )
        })
        .collect()
}
