//! Descriptor document readers.
//!
//! The descriptor is read from disk once into a [`DescriptorSource`]; both
//! parsing models then run against that same buffer:
//!
//! ```text
//! <service root>/<file>.yaml
//!     → DescriptorSource (single read)
//!         → flat_view()  keys lower-cased, scalars rendered as text
//!                        (urlmapping, config)
//!         → tree()       raw YAML nodes, key case preserved
//!                        (<rpc>-fieldmapping)
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::config::error::{ConfigError, ConfigResult};

/// In-memory copy of a descriptor file.
#[derive(Debug, Clone)]
pub struct DescriptorSource {
    path: PathBuf,
    content: String,
}

impl DescriptorSource {
    /// Read the descriptor at `path`.
    pub fn read(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_string(path, content))
    }

    /// Wrap already-loaded content; `path` is used for diagnostics only.
    pub fn from_string(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Parse into the raw tree, preserving key case and node structure.
    pub fn tree(&self) -> ConfigResult<Value> {
        serde_yaml::from_str(&self.content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Parse into the flattened, case-insensitive view.
    pub fn flat_view(&self) -> ConfigResult<FlatView> {
        let root: Value = serde_yaml::from_str(&self.content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        FlatView::from_value(root)
    }
}

/// Case-insensitive view of a descriptor.
///
/// Mapping keys are lower-cased at every level, and lookups accept dotted
/// paths (`"config.http_port"`).
#[derive(Debug, Clone, Default)]
pub struct FlatView {
    root: Mapping,
}

impl FlatView {
    pub fn from_value(root: Value) -> ConfigResult<Self> {
        match lower_keys(root) {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            _ => Err(ConfigError::MalformedSection {
                section: "<root>".to_string(),
                reason: "descriptor must be a mapping".to_string(),
            }),
        }
    }

    /// Node at a dotted, case-insensitive key path.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.').map(str::to_lowercase);
        let first = segments.next()?;
        let mut node = self.root.get(first.as_str())?;
        for segment in segments {
            node = node.as_mapping()?.get(segment.as_str())?;
        }
        Some(node)
    }

    /// List of strings at `key`; empty when absent.
    pub fn get_string_slice(&self, key: &str) -> ConfigResult<Vec<String>> {
        let seq = match self.get(key) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Sequence(seq)) => seq,
            Some(_) => {
                return Err(ConfigError::MalformedSection {
                    section: key.to_string(),
                    reason: "expected a list".to_string(),
                })
            }
        };

        seq.iter()
            .enumerate()
            .map(|(i, item)| {
                scalar_text(item).ok_or_else(|| ConfigError::MalformedSection {
                    section: key.to_string(),
                    reason: format!("item {} is not a scalar", i),
                })
            })
            .collect()
    }

    /// Flat `key -> text` map at `key`; empty when absent.
    ///
    /// Null values become `""`. Nested lists and maps have no textual form
    /// here and are skipped with a warning.
    pub fn get_string_map_string(&self, key: &str) -> ConfigResult<HashMap<String, String>> {
        let map = match self.get(key) {
            None | Some(Value::Null) => return Ok(HashMap::new()),
            Some(Value::Mapping(map)) => map,
            Some(_) => {
                return Err(ConfigError::MalformedSection {
                    section: key.to_string(),
                    reason: "expected a mapping".to_string(),
                })
            }
        };

        let mut out = HashMap::with_capacity(map.len());
        for (k, v) in map {
            let Some(k) = scalar_text(k) else {
                tracing::warn!(section = key, "Skipping non-scalar key");
                continue;
            };
            match v {
                Value::Null => {
                    out.insert(k, String::new());
                }
                other => match scalar_text(other) {
                    Some(text) => {
                        out.insert(k, text);
                    }
                    None => {
                        tracing::warn!(section = key, key = %k, "Skipping non-scalar value");
                    }
                },
            }
        }
        Ok(out)
    }
}

/// Text form of a scalar node. `None` for null, sequences and mappings.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn lower_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match scalar_text(&k) {
                        Some(text) => Value::String(text.to_lowercase()),
                        None => k,
                    };
                    (k, lower_keys(v))
                })
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"
URLMapping:
  - GET /users/:id GetUser
  - POST /users CreateUser
Config:
  HTTP_Port: 8080
  grpc_service_name: Users
  filter_proto_json: true
  empty_value:
  nested:
    a: b
grpc-fieldmapping:
  Name: [first, last]
"#;

    fn source() -> DescriptorSource {
        DescriptorSource::from_string("service.yaml", DESCRIPTOR)
    }

    #[test]
    fn test_flat_view_lowercases_keys() {
        let view = source().flat_view().unwrap();
        assert!(view.get("urlmapping").is_some());
        assert!(view.get("URLMAPPING").is_some());
        assert_eq!(
            view.get("config.http_port").and_then(scalar_text),
            Some("8080".to_string())
        );
    }

    #[test]
    fn test_get_string_slice() {
        let view = source().flat_view().unwrap();
        let lines = view.get_string_slice("urlmapping").unwrap();
        assert_eq!(lines, vec!["GET /users/:id GetUser", "POST /users CreateUser"]);
        assert!(view.get_string_slice("missing").unwrap().is_empty());
        assert!(matches!(
            view.get_string_slice("config"),
            Err(ConfigError::MalformedSection { .. })
        ));
    }

    #[test]
    fn test_get_string_map_string() {
        let view = source().flat_view().unwrap();
        let config = view.get_string_map_string("config").unwrap();
        assert_eq!(config.get("http_port").map(String::as_str), Some("8080"));
        assert_eq!(config.get("grpc_service_name").map(String::as_str), Some("Users"));
        assert_eq!(config.get("filter_proto_json").map(String::as_str), Some("true"));
        assert_eq!(config.get("empty_value").map(String::as_str), Some(""));
        assert!(!config.contains_key("nested"));
    }

    #[test]
    fn test_tree_preserves_case() {
        let tree = source().tree().unwrap();
        let fields = tree.get("grpc-fieldmapping").and_then(Value::as_mapping).unwrap();
        assert!(fields.contains_key("Name"));
        assert!(tree.get("urlmapping").is_none());
    }

    #[test]
    fn test_empty_document() {
        let src = DescriptorSource::from_string("empty.yaml", "");
        let view = src.flat_view().unwrap();
        assert!(view.get_string_slice("urlmapping").unwrap().is_empty());
        assert!(view.get_string_map_string("config").unwrap().is_empty());
    }

    #[test]
    fn test_non_mapping_root_rejected() {
        let src = DescriptorSource::from_string("list.yaml", "- a\n- b\n");
        assert!(matches!(
            src.flat_view(),
            Err(ConfigError::MalformedSection { .. })
        ));
    }

    #[test]
    fn test_parse_error_names_path() {
        let src = DescriptorSource::from_string("broken.yaml", "config: [unclosed");
        let err = src.tree().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = DescriptorSource::read(Path::new("/nonexistent/service.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
