//! # Catalog Models
//!
//! Plain data structures served by the sample API. None of them knows about
//! documents: the mapping lives in [`crate::mapping`].

mod result;

pub use result::ResultModel;

use flat_results::properties;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryModel {
    pub id: u32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitOfMeasureModel {
    pub id: u32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductModel {
    pub id: u32,
    pub name: String,
    pub category: Option<CategoryModel>,
    pub description: String,
    pub cost: f64,
    pub price: f64,
    pub units: Vec<UnitOfMeasureModel>,
    pub active: bool,
}

properties!(CategoryModel {
    id: u32,
    name: String,
    description: String,
});

properties!(UnitOfMeasureModel {
    id: u32,
    name: String,
    description: String,
});

properties!(ProductModel {
    id: u32,
    name: String,
    category: Option<CategoryModel>,
    description: String,
    cost: f64,
    price: f64,
    units: Vec<UnitOfMeasureModel>,
    active: bool,
});
