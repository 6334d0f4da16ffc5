//! Property tests: the final mapping does not depend on registration order.

mod common;

use common::*;
use flat_results::reflect::TypeKey;
use flat_results::Registry;
use proptest::prelude::*;

/// Sorted `(type, attributes, relationships)` for every test type.
type Classification = Vec<(String, Vec<String>, Vec<String>)>;

fn register(registry: &Registry, index: usize) {
    match index {
        0 => {
            registry.register_new::<Category>().map_with_defaults();
        }
        1 => {
            registry.register_new::<Unit>().map_with_defaults();
        }
        2 => {
            registry.register_new::<Product>().map_with_defaults();
        }
        _ => {
            registry
                .register_new::<Supplier>()
                .with_id("Code")
                .map_with_defaults();
        }
    }
}

fn classify(registry: &Registry) -> Classification {
    let definitions = [
        registry.lookup::<Category>(),
        registry.lookup::<Unit>(),
        registry.lookup::<Product>(),
        registry.lookup::<Supplier>(),
    ];
    definitions
        .into_iter()
        .map(|definition| {
            let definition = definition.expect("every type is registered");
            let mut attributes: Vec<String> = definition.attribute_names().map(str::to_owned).collect();
            let mut relationships: Vec<String> = definition.relationship_names().map(str::to_owned).collect();
            attributes.sort();
            relationships.sort();
            (definition.type_name().to_owned(), attributes, relationships)
        })
        .collect()
}

fn in_order(order: &[usize]) -> Classification {
    let registry = Registry::new();
    for &index in order {
        register(&registry, index);
    }
    classify(&registry)
}

#[test]
fn dependents_first_matches_dependencies_first() {
    assert_eq!(in_order(&[3, 2, 1, 0]), in_order(&[0, 1, 2, 3]));

    let registry = Registry::new();
    register(&registry, 3);
    register(&registry, 2);
    let product = registry.lookup::<Product>().unwrap();
    assert!(product.is_attribute("Category"));

    register(&registry, 0);
    let product = registry.lookup::<Product>().unwrap();
    assert!(product.is_relationship("Category"));
    assert_eq!(
        product.relationship_type("Category").map(|declared| declared.target()),
        Some(TypeKey::of::<Category>())
    );
}

#[test]
fn expected_classification() {
    let classification = in_order(&[0, 1, 2, 3]);
    let product = &classification[2];
    assert_eq!(product.1, ["Id", "InStock", "Name", "Price"]);
    assert_eq!(product.2, ["Category", "Units"]);
    let supplier = &classification[3];
    assert_eq!(supplier.2, ["Products"]);
}

/// The document as JSON with `included` sorted; its order follows relationship order.
fn normalized(registry: &Registry, value: &Product) -> serde_json::Value {
    let mut json = serde_json::to_value(registry.to_document(value).unwrap()).unwrap();
    if let Some(included) = json.get_mut("included").and_then(|included| included.as_array_mut()) {
        included.sort_by_key(|resource| resource.to_string());
    }
    json
}

proptest! {
    #[test]
    fn any_registration_order_converges(order in Just(vec![0usize, 1, 2, 3]).prop_shuffle()) {
        prop_assert_eq!(in_order(&order), in_order(&[0, 1, 2, 3]));
    }

    #[test]
    fn conversions_agree_across_orders(
        order in Just(vec![0usize, 1, 2, 3]).prop_shuffle(),
        id in 1u32..50,
        category_id in proptest::option::of(1u32..5),
    ) {
        let reference = Registry::new();
        let shuffled = Registry::new();
        for index in 0..4 {
            register(&reference, index);
        }
        for &index in &order {
            register(&shuffled, index);
        }

        let value = product(id, category_id, &[1, 2]);
        let expected = normalized(&reference, &value);
        let actual = normalized(&shuffled, &value);
        prop_assert_eq!(actual, expected);
    }
}
