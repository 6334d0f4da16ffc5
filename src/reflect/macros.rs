/// Implements [`Reflect`](crate::reflect::Reflect), [`Typed`](crate::reflect::Typed)
/// and [`Properties`](crate::reflect::Properties) for a plain struct.
///
/// List the fields that should be visible to the mapper together with their
/// types. Property names are the PascalCase form of the field identifier
/// (`unit_id` becomes `UnitId`); `field as "Name": Type` overrides it.
///
/// ```rust
/// use flat_results::{properties, Registry};
///
/// pub struct Category {
///     pub id: u32,
///     pub name: String,
///     pub description: Option<String>,
/// }
///
/// properties!(Category {
///     id: u32,
///     name: String,
///     description as "Summary": Option<String>,
/// });
///
/// let registry = Registry::new();
/// registry.register_new::<Category>().map_with_defaults();
///
/// let definition = registry.lookup::<Category>().unwrap();
/// assert!(definition.is_attribute("Summary"));
/// ```
#[macro_export]
macro_rules! properties {
    ($ty:ident { $( $field:ident $(as $rename:literal)? : $fty:ty ),* $(,)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn type_key(&self) -> $crate::reflect::TypeKey {
                $crate::reflect::TypeKey::of::<Self>()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn shape(&self) -> $crate::reflect::Shape<'_> {
                $crate::reflect::Shape::Object(self)
            }

            fn to_value(&self) -> $crate::__private::Value {
                let mut object = $crate::__private::Map::new();
                $(
                    object.insert(
                        $crate::__property_name!($field $($rename)?).to_owned(),
                        $crate::reflect::Reflect::to_value(&self.$field),
                    );
                )*
                $crate::__private::Value::Object(object)
            }
        }

        impl $crate::reflect::Typed for $ty {
            fn declared() -> $crate::reflect::DeclaredType {
                $crate::reflect::DeclaredType::scalar::<Self>()
            }
        }

        impl $crate::reflect::Properties for $ty {
            fn properties() -> ::std::vec::Vec<$crate::reflect::PropertyInfo> {
                $crate::__private::paste! {
                    $(
                        fn [<read_ $field>](this: &$ty) -> &$fty {
                            &this.$field
                        }
                    )*
                    ::std::vec![
                        $(
                            $crate::reflect::PropertyInfo::new::<$ty, $fty>(
                                $crate::__property_name!($field $($rename)?),
                                [<read_ $field>],
                            ),
                        )*
                    ]
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __property_name {
    ($field:ident) => {
        $crate::__private::paste! { stringify!([<$field:camel>]) }
    };
    ($field:ident $rename:literal) => {
        $rename
    };
}
