#![allow(dead_code)]

use flat_results::{properties, Meta, Registry};

pub struct Category {
    pub id: u32,
    pub name: String,
    pub description: String,
}

pub struct Unit {
    pub id: u32,
    pub name: String,
    pub ratio: f64,
}

pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub in_stock: bool,
    pub category: Option<Category>,
    pub units: Vec<Unit>,
}

pub struct Supplier {
    pub code: String,
    pub name: String,
    pub products: Vec<Product>,
}

/// A paged listing, registered as a wrapper in the tests that need it.
pub struct Paged {
    pub data: Vec<Product>,
    pub total_count: u32,
}

properties!(Category {
    id: u32,
    name: String,
    description: String,
});

properties!(Unit {
    id: u32,
    name: String,
    ratio: f64,
});

properties!(Product {
    id: u32,
    name: String,
    price: f64,
    in_stock: bool,
    category: Option<Category>,
    units: Vec<Unit>,
});

properties!(Paged {
    data: Vec<Product>,
    total_count: u32,
});

properties!(Supplier {
    code: String,
    name: String,
    products: Vec<Product>,
});

pub fn category(id: u32) -> Category {
    Category {
        id,
        name: format!("Category{id}"),
        description: format!("Description of category {id}"),
    }
}

pub fn unit(id: u32) -> Unit {
    Unit {
        id,
        name: format!("Unit{id}"),
        ratio: f64::from(id) * 0.5,
    }
}

pub fn product(id: u32, category_id: Option<u32>, unit_ids: &[u32]) -> Product {
    Product {
        id,
        name: format!("Product{id}"),
        price: f64::from(id) * 10.25,
        in_stock: id % 2 == 0,
        category: category_id.map(category),
        units: unit_ids.iter().copied().map(unit).collect(),
    }
}

pub fn paged_data(paged: &Paged) -> &Vec<Product> {
    &paged.data
}

pub fn paged_meta(paged: &Paged) -> Meta {
    let mut meta = Meta::new();
    if paged.total_count > 0 {
        meta.insert("TotalCount".to_owned(), paged.total_count.into());
    }
    meta
}

/// Registry with every test type mapped by default, lowercase type names.
pub fn catalog_registry() -> Registry {
    let registry = Registry::new();
    registry
        .register_new::<Category>()
        .with_type_name("category")
        .map_with_defaults();
    registry
        .register_new::<Unit>()
        .with_type_name("unit")
        .map_with_defaults();
    registry
        .register_new::<Product>()
        .with_type_name("product")
        .map_with_defaults();
    registry
        .register_new::<Supplier>()
        .with_type_name("supplier")
        .with_id("Code")
        .map_with_defaults();
    registry
}
