use flat_results::reflect::{DeclaredType, Shape, TypeKey};
use flat_results::{Envelope, Meta, Reflect, Typed};
use serde_json::Value;
use std::any::Any;

/// Response envelope: the payload plus the total number of matching items.
///
/// Unwrapped by the mapper for every payload type; `TotalCount` is added to
/// the document meta only when positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultModel<T> {
    pub data: T,
    pub total_count: usize,
}

impl<T> ResultModel<T> {
    pub fn new(data: T) -> Self {
        Self { data, total_count: 0 }
    }

    pub fn with_total_count(mut self, total_count: usize) -> Self {
        self.total_count = total_count;
        self
    }
}

impl<T: Typed> Reflect for ResultModel<T> {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Envelope(self)
    }

    fn to_value(&self) -> Value {
        self.data.to_value()
    }
}

impl<T: Typed> Typed for ResultModel<T> {
    fn declared() -> DeclaredType {
        DeclaredType::scalar::<Self>()
    }

    fn is_envelope() -> bool {
        true
    }
}

impl<T: Typed> Envelope for ResultModel<T> {
    fn payload(&self) -> &dyn Reflect {
        &self.data
    }

    fn meta(&self) -> Option<Meta> {
        if self.total_count == 0 {
            return None;
        }
        let mut meta = Meta::new();
        meta.insert("TotalCount".to_owned(), self.total_count.into());
        Some(meta)
    }
}
