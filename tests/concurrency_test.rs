mod common;

use common::*;
use flat_results::Registry;
use std::sync::Arc;

/// Conversions running while definitions are republished always see a
/// complete snapshot: every document is one of the two valid mappings.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn conversions_during_republication_see_whole_snapshots() {
    let registry = Arc::new(catalog_registry());

    let writer = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            for round in 0..200 {
                if round % 2 == 0 {
                    registry.extend_existing::<Product>().ignore("Price");
                } else {
                    registry.extend_existing::<Product>().with_attribute("Price");
                }
                tokio::task::yield_now().await;
            }
        })
    };

    let mut readers = Vec::new();
    for reader in 0..8u32 {
        let registry = Arc::clone(&registry);
        readers.push(tokio::spawn(async move {
            for round in 0..100 {
                let value = product(reader * 100 + round, Some(1), &[1]);
                let document = registry.to_document(&value).expect("product stays registered");
                let resource = document.resource().expect("single resource");

                assert_eq!(resource.type_name(), "product");
                assert!(resource.relationship("Category").is_some());
                let attributes = resource.attributes().expect("attributes");
                assert!(attributes.len() == 3 || attributes.len() == 4);
                assert_eq!(
                    attributes.contains_key("Price"),
                    attributes.len() == 4,
                    "a half-applied edit leaked"
                );
                tokio::task::yield_now().await;
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
}

/// Concurrent writers registering different types never lose each other's updates.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_are_all_kept() {
    let registry = Arc::new(Registry::new());

    let tasks: Vec<_> = (0..4usize)
        .map(|index| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
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
                        registry.register_wrapper(paged_data);
                    }
                }
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert!(registry.lookup::<Category>().is_ok());
    assert!(registry.lookup::<Unit>().is_ok());
    assert!(registry.lookup::<Product>().is_ok());
    assert!(registry.lookup_wrapper::<Paged>().is_ok());

    // Promotion already ran, or map_with_defaults saw the registered type.
    let product = registry.lookup::<Product>().unwrap();
    assert!(product.is_relationship("Category"));
    assert!(product.is_relationship("Units"));
}
