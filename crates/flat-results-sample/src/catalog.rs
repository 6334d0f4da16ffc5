//! # Seeded Catalog
//!
//! An in-memory, read-only data set: two categories, three units of measure
//! and four products referencing them.

use crate::model::{CategoryModel, ProductModel, UnitOfMeasureModel};

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<CategoryModel>,
    units: Vec<UnitOfMeasureModel>,
    products: Vec<ProductModel>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Catalog {
    pub fn seeded() -> Self {
        let categories: Vec<CategoryModel> = (1..=2)
            .map(|id| CategoryModel {
                id,
                name: format!("Category{id}"),
                description: format!("Category{id} description"),
            })
            .collect();
        let units: Vec<UnitOfMeasureModel> = (1..=3)
            .map(|id| UnitOfMeasureModel {
                id,
                name: format!("Unit{id}"),
                description: format!("Unit{id} description"),
            })
            .collect();

        // (id, category index, cost, price, unit indexes, active)
        let rows: [(u32, usize, f64, f64, &[usize], bool); 4] = [
            (1, 0, 5.0, 6.5, &[0, 1], true),
            (2, 1, 3.5, 4.0, &[0, 2], false),
            (3, 0, 3.3, 4.4, &[1], false),
            (4, 1, 2.0, 2.0, &[1, 2], true),
        ];
        let products = rows
            .into_iter()
            .map(|(id, category, cost, price, unit_indexes, active)| ProductModel {
                id,
                name: format!("Product{id}"),
                category: categories.get(category).cloned(),
                description: format!("Product{id} description"),
                cost,
                price,
                units: unit_indexes
                    .iter()
                    .filter_map(|&index| units.get(index).cloned())
                    .collect(),
                active,
            })
            .collect();

        Self {
            categories,
            units,
            products,
        }
    }

    pub fn categories(&self) -> &[CategoryModel] {
        &self.categories
    }

    pub fn units(&self) -> &[UnitOfMeasureModel] {
        &self.units
    }

    pub fn products(&self) -> &[ProductModel] {
        &self.products
    }

    pub fn category(&self, id: u32) -> Option<&CategoryModel> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn product(&self, id: u32) -> Option<&ProductModel> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products whose category is `category_id`, in catalog order.
    pub fn products_in_category(&self, category_id: u32) -> Vec<ProductModel> {
        self.products
            .iter()
            .filter(|product| product.category.as_ref().is_some_and(|c| c.id == category_id))
            .cloned()
            .collect()
    }
}
