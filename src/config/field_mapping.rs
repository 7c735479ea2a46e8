//! Per-transport field mapping.
//!
//! Built from the raw tree section `<rpc type>-fieldmapping`:
//!
//! ```yaml
//! grpc-fieldmapping:
//!   Name: [first, last]
//!   Id:
//! ```
//!
//! A field mapped to null still gets an (empty) entry: presence means the
//! field was declared. Key order is not significant; value order follows
//! the source list.

use std::collections::HashMap;

use serde::Serialize;
use serde_yaml::Value;

use crate::config::document::scalar_text;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::RpcType;

/// Suffix appended to the transport tag to form the section name.
pub const FIELD_MAPPING_SUFFIX: &str = "-fieldmapping";

/// Logical field name to ordered list of mapped sub-fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldMappingTable {
    fields: HashMap<String, Vec<String>>,
}

impl FieldMappingTable {
    /// Section name for a transport, e.g. "grpc-fieldmapping".
    pub fn section_name(rpc_type: RpcType) -> String {
        format!("{}{}", rpc_type.as_str(), FIELD_MAPPING_SUFFIX)
    }

    /// Build from the raw descriptor tree.
    ///
    /// An absent section yields an empty table. A section that is not a
    /// mapping, or an entry that is neither null nor a list of scalars,
    /// fails the whole build.
    pub fn from_tree(root: &Value, rpc_type: RpcType) -> ConfigResult<Self> {
        let section = Self::section_name(rpc_type);

        let node = match root.as_mapping().and_then(|m| m.get(section.as_str())) {
            Some(node) => node,
            None => {
                tracing::debug!(section = %section, "No field mapping section");
                return Ok(Self::default());
            }
        };

        let map = match node {
            Value::Mapping(map) => map,
            Value::Null => return Ok(Self::default()),
            _ => {
                return Err(ConfigError::MalformedSection {
                    section,
                    reason: "expected a mapping of field name to list".to_string(),
                })
            }
        };

        let mut fields = HashMap::with_capacity(map.len());
        for (key, value) in map {
            let field = scalar_text(key).ok_or_else(|| ConfigError::MalformedSection {
                section: section.clone(),
                reason: "field name must be a scalar".to_string(),
            })?;
            let targets = mapped_values(&section, &field, value)?;
            fields.insert(field, targets);
        }

        Ok(Self { fields })
    }

    /// Mapped sub-fields for `field`, `None` when the field was never declared.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, targets: Vec<String>) {
        self.fields.insert(field.into(), targets);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

fn mapped_values(section: &str, field: &str, value: &Value) -> ConfigResult<Vec<String>> {
    let malformed = |reason: String| ConfigError::MalformedFieldMapping {
        section: section.to_string(),
        field: field.to_string(),
        reason,
    };

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                scalar_text(item)
                    .map(|text| text.trim().to_string())
                    .ok_or_else(|| malformed(format!("item {} is not a scalar", i)))
            })
            .collect(),
        _ => Err(malformed("expected a list or null".to_string())),
    }
}
