//! # Reflection Surface
//!
//! The engine never looks properties up by name while converting. Instead every
//! mapped type exposes a fixed list of typed field accessors, built once and
//! cached per type, and every value reports its [`Shape`] so the engine can pick
//! a conversion branch without chains of runtime type tests.
//!
//! ## Key types
//!
//! - [`TypeKey`] - runtime identity of a type plus its bare name
//! - [`DeclaredType`] - the static type of a property (and its element type for containers)
//! - [`Reflect`] - object-safe view over any value the engine can walk
//! - [`Typed`] - static type information for a [`Reflect`] type
//! - [`Properties`] - the readable members of a mapped struct
//! - [`Envelope`] - compile-time envelope types carrying a payload plus metadata
//!
//! Mapped structs normally get all three traits from the [`properties!`](crate::properties) macro:
//!
//! ```rust
//! use flat_results::properties;
//!
//! pub struct Category {
//!     pub id: u32,
//!     pub name: String,
//! }
//!
//! properties!(Category { id: u32, name: String });
//! ```

mod cache;
mod impls;
mod macros;
mod property;

pub use cache::properties_of;
pub use property::{Accessor, Properties, PropertyInfo};

use crate::model::{Document, Meta};
use serde_json::Value;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a type.
///
/// Equality and hashing only consider the [`TypeId`]; the name is kept for
/// diagnostics and as the default resource type tag.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: bare_type_name(std::any::type_name::<T>()),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The bare type name (e.g. `Category` for `my_app::model::Category`).
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// `alloc::vec::Vec<app::Category>` -> `Vec`
fn bare_type_name(full: &'static str) -> &'static str {
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

/// The static type of a property.
///
/// `element` is set for single-argument containers and always names the
/// innermost element, so `Option<Vec<Unit>>` declares `Unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    pub ty: TypeKey,
    pub element: Option<TypeKey>,
}

impl DeclaredType {
    /// A non-container type.
    pub fn scalar<T: 'static>() -> Self {
        Self {
            ty: TypeKey::of::<T>(),
            element: None,
        }
    }

    /// A container `C` holding `E`.
    pub fn container<C: 'static, E: Typed>() -> Self {
        Self {
            ty: TypeKey::of::<C>(),
            element: Some(E::declared().target()),
        }
    }

    /// The element type for containers, the type itself otherwise.
    pub fn target(&self) -> TypeKey {
        self.element.unwrap_or(self.ty)
    }

    /// True if this is `key` or a container of `key`.
    pub fn refers_to(&self, key: TypeKey) -> bool {
        self.ty == key || self.element == Some(key)
    }
}

/// How a value should be walked by the conversion engine.
pub enum Shape<'a> {
    /// An absent value (`None`).
    Null,
    /// A plain value with no resource semantics (numbers, strings, ...).
    Scalar,
    /// A single object that may have a resource definition.
    Object(&'a dyn Reflect),
    /// A sequence of values.
    Sequence(Vec<&'a dyn Reflect>),
    /// An envelope carrying a payload and optional metadata.
    Envelope(&'a dyn Envelope),
    /// An already built document.
    Document(&'a Document),
}

/// Object-safe view over a value the engine can walk.
pub trait Reflect: Any {
    /// The runtime type of this value.
    fn type_key(&self) -> TypeKey;

    fn as_any(&self) -> &dyn Any;

    fn shape(&self) -> Shape<'_>;

    /// JSON rendering used when the value is emitted as an attribute.
    fn to_value(&self) -> Value;
}

/// Static type information for a [`Reflect`] type.
pub trait Typed: Reflect + Sized {
    fn declared() -> DeclaredType;

    /// True for types implementing [`Envelope`].
    fn is_envelope() -> bool {
        false
    }
}

/// A non-resource container whose payload must be unwrapped before conversion.
///
/// Generic envelope families implement this once for every payload type, for
/// example a paged result `ResultModel<T>`. Their [`Reflect::shape`] returns
/// [`Shape::Envelope`] and their [`Typed::is_envelope`] returns `true`.
pub trait Envelope {
    fn payload(&self) -> &dyn Reflect;

    /// Top-level metadata merged into the produced document.
    fn meta(&self) -> Option<Meta> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unit;

    #[test]
    fn bare_names_strip_paths_and_generics() {
        assert_eq!(TypeKey::of::<Unit>().name(), "Unit");
        assert_eq!(TypeKey::of::<Vec<Unit>>().name(), "Vec");
        assert_eq!(TypeKey::of::<String>().name(), "String");
    }

    #[test]
    fn declared_containers_point_at_innermost_element() {
        let declared = <Option<Vec<u32>>>::declared();
        assert_eq!(declared.ty, TypeKey::of::<Option<Vec<u32>>>());
        assert_eq!(declared.element, Some(TypeKey::of::<u32>()));
        assert!(declared.refers_to(TypeKey::of::<u32>()));
        assert!(!declared.refers_to(TypeKey::of::<Vec<u32>>()));
    }
}
