//! # Controllers
//!
//! Request handlers for the catalog. A request is a path plus an optional
//! query string, for example `/products/1?fields=name,category.name`; the
//! answer is a [`Response`] carrying a formatted document.
//!
//! | Route | Body |
//! |-------|------|
//! | `/products` | every product in a [`ResultModel`] with `TotalCount` |
//! | `/products/{id}` | one product in a [`ResultModel`] |
//! | `/categories` | every category |
//! | `/categories/{id}` | one category; `includeRelatedProducts=true` side-loads its products |

use crate::catalog::Catalog;
use crate::model::ResultModel;
use flat_results::format::{DocumentFormatter, FormatterConfig};
use flat_results::{FormatError, MappingError, Registry};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

const INCLUDE_RELATED_PRODUCTS: &str = "includeRelatedProducts";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No row with this id.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: u32 },

    /// The path matches no route.
    #[error("No route for path: {0}")]
    UnknownRoute(String),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::NotFound { .. } | ApiError::UnknownRoute(_) => 404,
            ApiError::Mapping(_) | ApiError::Format(_) => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The catalog endpoints over a shared registry.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    catalog: Arc<Catalog>,
    registry: Arc<Registry>,
    formatter: DocumentFormatter,
}

impl CatalogApi {
    pub fn new(catalog: Arc<Catalog>, registry: Arc<Registry>, config: FormatterConfig) -> Self {
        let formatter = DocumentFormatter::new(Arc::clone(&registry), config);
        Self {
            catalog,
            registry,
            formatter,
        }
    }

    /// Routes `target` (path and optional query) and renders the outcome.
    pub fn handle(&self, target: &str) -> Response {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        debug!(path, query, "Handle request");

        match self.route(path, query) {
            Ok(body) => Response {
                status: 200,
                content_type: self.formatter.media_type().to_owned(),
                body,
            },
            Err(e) => {
                warn!(path, error = %e, "Request failed");
                Response {
                    status: e.status(),
                    content_type: "application/json".to_owned(),
                    body: serde_json::json!({ "error": e.to_string() }).to_string(),
                }
            }
        }
    }

    fn route(&self, path: &str, query: &str) -> Result<String, ApiError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let unknown = || ApiError::UnknownRoute(path.to_owned());
        match segments.as_slice() {
            ["products"] => self.list_products(query),
            ["products", id] => self.get_product(id.parse().map_err(|_| unknown())?, query),
            ["categories"] => self.list_categories(query),
            ["categories", id] => self.get_category(id.parse().map_err(|_| unknown())?, query),
            _ => Err(unknown()),
        }
    }

    pub fn list_products(&self, query: &str) -> Result<String, ApiError> {
        let products = self.catalog.products().to_vec();
        let total_count = products.len();
        let result = ResultModel::new(products).with_total_count(total_count);
        Ok(self.formatter.write_for_query(&result, query)?)
    }

    pub fn get_product(&self, id: u32, query: &str) -> Result<String, ApiError> {
        let product = self
            .catalog
            .product(id)
            .cloned()
            .ok_or(ApiError::NotFound { resource: "product", id })?;
        Ok(self.formatter.write_for_query(&ResultModel::new(product), query)?)
    }

    pub fn list_categories(&self, query: &str) -> Result<String, ApiError> {
        let categories = self.catalog.categories().to_vec();
        Ok(self.formatter.write_for_query(&categories, query)?)
    }

    /// One category, optionally with its products side-loaded into `included`.
    pub fn get_category(&self, id: u32, query: &str) -> Result<String, ApiError> {
        let category = self
            .catalog
            .category(id)
            .ok_or(ApiError::NotFound { resource: "category", id })?;
        if !flag(query, INCLUDE_RELATED_PRODUCTS) {
            return Ok(self.formatter.write_for_query(category, query)?);
        }

        let fields = self.formatter.fields_from_query(query);
        let mut document = self.registry.to_document_with(category, false, fields.as_ref())?;
        let products = self.catalog.products_in_category(id);
        document.include(self.registry.to_document(&products)?);
        Ok(self.formatter.write(&document, None)?)
    }
}

fn flag(query: &str, name: &str) -> bool {
    url::form_urlencoded::parse(query.as_bytes())
        .any(|(key, value)| key == name && value.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_case_insensitive_and_default_off() {
        assert!(flag("includeRelatedProducts=True", INCLUDE_RELATED_PRODUCTS));
        assert!(!flag("includeRelatedProducts=false", INCLUDE_RELATED_PRODUCTS));
        assert!(!flag("fields=name", INCLUDE_RELATED_PRODUCTS));
    }

    #[test]
    fn error_statuses() {
        assert_eq!(ApiError::NotFound { resource: "product", id: 9 }.status(), 404);
        assert_eq!(ApiError::UnknownRoute("/".to_owned()).status(), 404);
        assert_eq!(
            ApiError::Mapping(MappingError::ConfigNotFound("ProductModel".to_owned())).status(),
            500
        );
    }
}
