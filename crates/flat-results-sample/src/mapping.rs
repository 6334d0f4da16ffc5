//! Startup mapping configuration for the catalog models.

use crate::model::{CategoryModel, ProductModel, UnitOfMeasureModel};
use flat_results::Registry;
use tracing::info;

/// Registers every catalog model with its wire type name and default mapping.
///
/// `ProductModel::units` is mapped as an attribute first and promoted to a
/// relationship when `UnitOfMeasureModel` is registered.
pub fn configure(registry: &Registry) {
    registry
        .register_new::<CategoryModel>()
        .with_type_name("category")
        .map_with_defaults();
    registry
        .register_new::<ProductModel>()
        .with_type_name("product")
        .map_with_defaults();
    registry
        .register_new::<UnitOfMeasureModel>()
        .with_type_name("unitOfMeasure")
        .map_with_defaults();

    info!("Catalog mapping configured");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResultModel;

    #[test]
    fn product_links_category_and_units() {
        let registry = Registry::new();
        configure(&registry);

        let product = registry.lookup::<ProductModel>().unwrap();
        assert_eq!(product.type_name(), "product");
        assert_eq!(product.relationship_names().collect::<Vec<_>>(), ["Category", "Units"]);
        assert_eq!(
            product.attribute_names().collect::<Vec<_>>(),
            ["Id", "Name", "Description", "Cost", "Price", "Active"]
        );
    }

    #[test]
    fn result_envelopes_are_convertible() {
        let registry = Registry::new();
        configure(&registry);
        assert!(registry.is_convertible::<ResultModel<ProductModel>>());
        assert!(registry.is_convertible::<ResultModel<Vec<ProductModel>>>());
        assert!(registry.is_convertible::<Vec<CategoryModel>>());
    }
}
