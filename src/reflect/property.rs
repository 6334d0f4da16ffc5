use super::{DeclaredType, Reflect, Typed};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased, typed field accessor.
///
/// Built from a plain `fn(&T) -> &F`; reading downcasts the target to `T`
/// and returns `None` for any other type.
#[derive(Clone)]
pub struct Accessor {
    getter: Arc<dyn ErasedGetter>,
}

impl Accessor {
    pub fn new<T: Any, F: Reflect>(getter: fn(&T) -> &F) -> Self {
        Self {
            getter: Arc::new(FieldGetter { getter }),
        }
    }

    pub fn get<'a>(&self, target: &'a dyn Any) -> Option<&'a dyn Reflect> {
        self.getter.get(target)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor")
    }
}

trait ErasedGetter: Send + Sync {
    fn get<'a>(&self, target: &'a dyn Any) -> Option<&'a dyn Reflect>;
}

struct FieldGetter<T: 'static, F: 'static> {
    getter: fn(&T) -> &F,
}

impl<T: Any, F: Reflect> ErasedGetter for FieldGetter<T, F> {
    fn get<'a>(&self, target: &'a dyn Any) -> Option<&'a dyn Reflect> {
        target
            .downcast_ref::<T>()
            .map(|value| (self.getter)(value) as &dyn Reflect)
    }
}

/// One public readable member of a mapped type.
#[derive(Debug, Clone)]
pub struct PropertyInfo {
    name: &'static str,
    declared: DeclaredType,
    accessor: Accessor,
}

impl PropertyInfo {
    pub fn new<T: Any, F: Typed>(name: &'static str, getter: fn(&T) -> &F) -> Self {
        Self {
            name,
            declared: F::declared(),
            accessor: Accessor::new(getter),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declared(&self) -> DeclaredType {
        self.declared
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }
}

/// The readable members of a mapped struct, in declaration order.
///
/// Implemented by the [`properties!`](crate::properties) macro. Callers should
/// go through [`properties_of`](super::properties_of), which memoizes the list.
pub trait Properties: Typed {
    fn properties() -> Vec<PropertyInfo>;
}
