//! Process-wide memo of [`Properties::properties`] per type.
//!
//! Entries are never evicted. Two threads racing on the same type may both
//! build the list; the first insert wins and the other copy is dropped.

use super::{Properties, PropertyInfo};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static PROPERTY_CACHE: LazyLock<RwLock<HashMap<TypeId, Arc<[PropertyInfo]>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// The readable members of `T`, computed once per process.
pub fn properties_of<T: Properties>() -> Arc<[PropertyInfo]> {
    let key = TypeId::of::<T>();
    if let Some(cached) = PROPERTY_CACHE.read().get(&key) {
        return Arc::clone(cached);
    }

    let computed: Arc<[PropertyInfo]> = T::properties().into();
    let mut cache = PROPERTY_CACHE.write();
    Arc::clone(cache.entry(key).or_insert(computed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties;

    struct Unit {
        id: u32,
        unit_name: String,
        ratio: Option<f64>,
    }

    properties!(Unit {
        id: u32,
        unit_name: String,
        ratio as "Factor": Option<f64>,
    });

    #[test]
    fn properties_keep_declaration_order_and_names() {
        let props = properties_of::<Unit>();
        let names: Vec<_> = props.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Id", "UnitName", "Factor"]);
    }

    #[test]
    fn lookups_share_the_cached_list() {
        let first = properties_of::<Unit>();
        let second = properties_of::<Unit>();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn accessors_read_the_field() {
        let unit = Unit {
            id: 7,
            unit_name: "Box".into(),
            ratio: None,
        };
        let props = properties_of::<Unit>();
        let name = props[1].accessor().get(&unit).map(|v| v.to_value());
        assert_eq!(name, Some(serde_json::json!("Box")));
        assert_eq!(props[0].accessor().get(&unit).map(|v| v.to_value()), Some(serde_json::json!(7)));
        assert!(props[0].accessor().get(&"not a unit").is_none());
    }
}
