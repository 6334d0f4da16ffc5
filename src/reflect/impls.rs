//! [`Reflect`] and [`Typed`] for std scalars and containers.

use super::{DeclaredType, Reflect, Shape, TypeKey, Typed};
use crate::model::Document;
use serde_json::Value;
use std::any::Any;
use std::collections::VecDeque;
use std::sync::Arc;

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_key(&self) -> TypeKey {
                    TypeKey::of::<Self>()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar
                }

                fn to_value(&self) -> Value {
                    serde_json::to_value(self).unwrap_or(Value::Null)
                }
            }

            impl Typed for $ty {
                fn declared() -> DeclaredType {
                    DeclaredType::scalar::<Self>()
                }
            }
        )*
    };
}

impl_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str, Value,
);

impl<T: Typed> Reflect for Option<T> {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Null,
        }
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, Reflect::to_value)
    }
}

impl<T: Typed> Typed for Option<T> {
    fn declared() -> DeclaredType {
        DeclaredType::container::<Self, T>()
    }
}

macro_rules! impl_sequence {
    ($($container:ident),*) => {
        $(
            impl<T: Typed> Reflect for $container<T> {
                fn type_key(&self) -> TypeKey {
                    TypeKey::of::<Self>()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Sequence(self.iter().map(|item| item as &dyn Reflect).collect())
                }

                fn to_value(&self) -> Value {
                    Value::Array(self.iter().map(Reflect::to_value).collect())
                }
            }

            impl<T: Typed> Typed for $container<T> {
                fn declared() -> DeclaredType {
                    DeclaredType::container::<Self, T>()
                }
            }
        )*
    };
}

impl_sequence!(Vec, VecDeque);

// Smart pointers are transparent: they walk like the value they point to.
macro_rules! impl_pointer {
    ($($pointer:ident),*) => {
        $(
            impl<T: Typed> Reflect for $pointer<T> {
                fn type_key(&self) -> TypeKey {
                    TypeKey::of::<Self>()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn to_value(&self) -> Value {
                    (**self).to_value()
                }
            }

            impl<T: Typed> Typed for $pointer<T> {
                fn declared() -> DeclaredType {
                    DeclaredType::container::<Self, T>()
                }
            }
        )*
    };
}

impl_pointer!(Box, Arc);

impl Reflect for Document {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Document(self)
    }

    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Typed for Document {
    fn declared() -> DeclaredType {
        DeclaredType::scalar::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_null_or_transparent() {
        let none: Option<u32> = None;
        assert!(matches!(none.shape(), Shape::Null));
        assert_eq!(none.to_value(), Value::Null);
        assert_eq!(Some(3u32).to_value(), serde_json::json!(3));
        assert!(matches!(Some(3u32).shape(), Shape::Scalar));
    }

    #[test]
    fn sequences_expose_their_items() {
        let items = vec![1u8, 2, 3];
        match items.shape() {
            Shape::Sequence(values) => assert_eq!(values.len(), 3),
            _ => panic!("expected a sequence"),
        }
        assert_eq!(items.to_value(), serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn non_finite_floats_render_as_null() {
        assert_eq!(f64::NAN.to_value(), Value::Null);
        assert_eq!(1.5f32.to_value(), serde_json::json!(1.5));
    }
}
