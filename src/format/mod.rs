//! # Output Formatter
//!
//! [`DocumentFormatter`] is the transport-side adapter: it decides whether a
//! value can be written, reads the sparse fieldset from a request query
//! string, converts the value through the [`Registry`] and serializes the
//! resulting [`Document`](crate::Document) to JSON.
//!
//! It does not bind to any HTTP framework; a server hands it the value and the
//! raw query string and sends the returned body with
//! [`DocumentFormatter::media_type`].
//!
//! ```rust
//! use flat_results::format::{DocumentFormatter, FormatterConfig};
//! use flat_results::{properties, Registry};
//! use std::sync::Arc;
//!
//! pub struct Category { pub id: u32, pub name: String, pub description: String }
//! properties!(Category { id: u32, name: String, description: String });
//!
//! let registry = Arc::new(Registry::new());
//! registry.register_new::<Category>().with_type_name("category").map_with_defaults();
//!
//! let formatter = DocumentFormatter::new(registry, FormatterConfig::default());
//! let category = Category { id: 1, name: "Bikes".into(), description: "Two wheels".into() };
//!
//! let body = formatter.write_for_query(&category, "fields=name").unwrap();
//! assert_eq!(body, r#"{"data":{"type":"category","id":"1","attributes":{"name":"Bikes"}}}"#);
//! ```

mod casing;

pub use casing::{camel_case, camel_case_keys};

use crate::error::FormatError;
use crate::fields::FieldSelector;
use crate::reflect::{Reflect, Typed};
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// The media type announced for formatted documents.
pub const MEDIA_TYPE: &str = "application/x.flatresults+json";

/// How object keys are cased in the written JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCasing {
    /// Leading capitals lowered (`TotalCount` -> `totalCount`).
    #[default]
    Camel,
    /// Keys written exactly as mapped.
    Preserve,
}

/// Output settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Query parameter holding the comma-separated field list.
    pub fields_parameter: String,
    pub media_type: String,
    pub key_casing: KeyCasing,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            fields_parameter: "fields".to_owned(),
            media_type: MEDIA_TYPE.to_owned(),
            key_casing: KeyCasing::default(),
        }
    }
}

impl FormatterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FormatError> {
        serde_json::from_str(json).map_err(FormatError::Config)
    }
}

/// Writes convertible values as JSON documents.
#[derive(Debug, Clone)]
pub struct DocumentFormatter {
    registry: Arc<Registry>,
    config: FormatterConfig,
}

impl DocumentFormatter {
    pub fn new(registry: Arc<Registry>, config: FormatterConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn media_type(&self) -> &str {
        &self.config.media_type
    }

    /// True if values of type `T` can be written.
    pub fn can_write<T: Typed>(&self) -> bool {
        self.registry.is_convertible::<T>()
    }

    /// Reads the field list from a raw query string (with or without the leading `?`).
    ///
    /// Repeated parameters are joined as one list. Returns `None` when the
    /// parameter is absent.
    pub fn fields_from_query(&self, query: &str) -> Option<FieldSelector> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let lists: Vec<String> = url::form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| *key == self.config.fields_parameter)
            .map(|(_, value)| value.into_owned())
            .collect();
        if lists.is_empty() {
            return None;
        }
        Some(FieldSelector::parse(&lists.join(",")))
    }

    /// Converts `value` and renders it as a JSON value with the configured key casing.
    pub fn to_json(
        &self,
        value: &dyn Reflect,
        fields: Option<&FieldSelector>,
    ) -> Result<serde_json::Value, FormatError> {
        let document = self.registry.to_document_with(value, false, fields)?;
        let json = serde_json::to_value(&document).map_err(FormatError::Serialize)?;
        Ok(match self.config.key_casing {
            KeyCasing::Camel => camel_case_keys(json),
            KeyCasing::Preserve => json,
        })
    }

    /// Converts `value` and serializes it to a JSON body.
    pub fn write(&self, value: &dyn Reflect, fields: Option<&FieldSelector>) -> Result<String, FormatError> {
        let body = serde_json::to_string(&self.to_json(value, fields)?).map_err(FormatError::Serialize)?;
        debug!(value_type = %value.type_key(), bytes = body.len(), "Document written");
        Ok(body)
    }

    /// [`write`](Self::write) with the field list taken from `query`.
    pub fn write_for_query(&self, value: &dyn Reflect, query: &str) -> Result<String, FormatError> {
        let fields = self.fields_from_query(query);
        self.write(value, fields.as_ref())
    }
}
