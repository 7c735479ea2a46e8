//! Scalar configuration store.
//!
//! A flat `key -> string` map read from the descriptor's `config` section,
//! with typed accessors and defaults. Keys are compared case-insensitively.
//!
//! Two read styles are offered for converted values:
//! - `try_*` returns `Result<Option<T>, ScalarError>` so callers can tell
//!   "absent" from "present but unconvertible"
//! - the plain accessor is best-effort: it logs a warning and falls back
//!   to the default

use std::collections::HashMap;

use serde::Serialize;

use crate::config::error::ScalarError;

pub const GRPC_SERVICE_NAME: &str = "grpc_service_name";
pub const GRPC_SERVICE_ADDRESS: &str = "grpc_service_address";
pub const THRIFT_SERVICE_NAME: &str = "thrift_service_name";
pub const THRIFT_SERVICE_ADDRESS: &str = "thrift_service_address";
pub const HTTP_PORT: &str = "http_port";
pub const FILTER_PROTO_JSON: &str = "filter_proto_json";
pub const FILTER_PROTO_JSON_EMIT_ZERO_VALUES: &str = "filter_proto_json_emit_zerovalues";
pub const FILTER_PROTO_JSON_INT64_AS_NUMBER: &str = "filter_proto_json_int64_as_number";

/// Flat map of configuration scalars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScalarConfig {
    values: HashMap<String, String>,
}

impl ScalarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Store a raw value, replacing any previous one.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_lowercase(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// String value, empty when absent.
    pub fn get_string(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// Integer value; `Ok(None)` when absent.
    pub fn try_int(&self, key: &str) -> Result<Option<i64>, ScalarError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ScalarError::InvalidInteger {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    /// Integer value, zero when absent or unconvertible.
    pub fn get_int(&self, key: &str) -> i64 {
        best_effort(self.try_int(key))
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, value.to_string());
    }

    /// Strict boolean: only "true" and "false" convert.
    pub fn try_bool(&self, key: &str) -> Result<Option<bool>, ScalarError> {
        match self.get(key) {
            None => Ok(None),
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(raw) => Err(ScalarError::InvalidBool {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, value.to_string());
    }

    // --- Service endpoints ---

    pub fn grpc_service_name(&self) -> String {
        self.get_string(GRPC_SERVICE_NAME)
    }

    pub fn set_grpc_service_name(&mut self, name: impl Into<String>) {
        self.set(GRPC_SERVICE_NAME, name);
    }

    pub fn grpc_service_address(&self) -> String {
        self.get_string(GRPC_SERVICE_ADDRESS)
    }

    pub fn set_grpc_service_address(&mut self, address: impl Into<String>) {
        self.set(GRPC_SERVICE_ADDRESS, address);
    }

    pub fn thrift_service_name(&self) -> String {
        self.get_string(THRIFT_SERVICE_NAME)
    }

    pub fn set_thrift_service_name(&mut self, name: impl Into<String>) {
        self.set(THRIFT_SERVICE_NAME, name);
    }

    pub fn thrift_service_address(&self) -> String {
        self.get_string(THRIFT_SERVICE_ADDRESS)
    }

    pub fn set_thrift_service_address(&mut self, address: impl Into<String>) {
        self.set(THRIFT_SERVICE_ADDRESS, address);
    }

    // --- HTTP port ---

    /// Port number; `Ok(None)` when absent, error when not a valid port.
    pub fn try_http_port(&self) -> Result<Option<u16>, ScalarError> {
        match self.get(HTTP_PORT) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map(Some)
                .map_err(|_| ScalarError::InvalidInteger {
                    key: HTTP_PORT.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    /// Port number, zero when absent or invalid.
    pub fn http_port(&self) -> u16 {
        best_effort(self.try_http_port())
    }

    /// Listen address form of the port, e.g. ":8080". Recomputed per call.
    pub fn http_port_str(&self) -> String {
        format!(":{}", self.http_port())
    }

    pub fn set_http_port(&mut self, port: u16) {
        self.set(HTTP_PORT, port.to_string());
    }

    // --- JSON filter flags ---

    /// True only when stored exactly as "true".
    pub fn filter_proto_json(&self) -> bool {
        self.get(FILTER_PROTO_JSON) == Some("true")
    }

    pub fn set_filter_proto_json(&mut self, enabled: bool) {
        self.set_bool(FILTER_PROTO_JSON, enabled);
    }

    /// Defaults to true, but always false while `filter_proto_json` is off.
    pub fn filter_proto_json_emit_zero_values(&self) -> bool {
        self.filter_sub_option(FILTER_PROTO_JSON_EMIT_ZERO_VALUES)
    }

    pub fn set_filter_proto_json_emit_zero_values(&mut self, emit: bool) {
        self.set_bool(FILTER_PROTO_JSON_EMIT_ZERO_VALUES, emit);
    }

    /// Defaults to true, but always false while `filter_proto_json` is off.
    pub fn filter_proto_json_int64_as_number(&self) -> bool {
        self.filter_sub_option(FILTER_PROTO_JSON_INT64_AS_NUMBER)
    }

    pub fn set_filter_proto_json_int64_as_number(&mut self, as_number: bool) {
        self.set_bool(FILTER_PROTO_JSON_INT64_AS_NUMBER, as_number);
    }

    fn filter_sub_option(&self, key: &str) -> bool {
        if !self.filter_proto_json() {
            return false;
        }
        self.get(key) != Some("false")
    }
}

impl FromIterator<(String, String)> for ScalarConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (k, v) in iter {
            config.set(&k, v);
        }
        config
    }
}

fn best_effort<T: Default>(result: Result<Option<T>, ScalarError>) -> T {
    match result {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Scalar conversion failed, using default");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_port() {
        let mut config = ScalarConfig::new();
        config.set(HTTP_PORT, "8080");
        assert_eq!(config.http_port(), 8080);
        assert_eq!(config.http_port_str(), ":8080");

        config.set_http_port(9090);
        assert_eq!(config.get(HTTP_PORT), Some("9090"));
        assert_eq!(config.http_port_str(), ":9090");
    }

    #[test]
    fn test_http_port_invalid_defaults_to_zero() {
        let mut config = ScalarConfig::new();
        assert_eq!(config.try_http_port(), Ok(None));
        assert_eq!(config.http_port(), 0);

        config.set(HTTP_PORT, "80a");
        assert!(matches!(
            config.try_http_port(),
            Err(ScalarError::InvalidInteger { .. })
        ));
        assert_eq!(config.http_port(), 0);

        config.set(HTTP_PORT, "70000");
        assert!(config.try_http_port().is_err());
    }

    #[test]
    fn test_keys_case_insensitive() {
        let mut config = ScalarConfig::new();
        config.set("GRPC_Service_Name", "Users");
        assert_eq!(config.grpc_service_name(), "Users");
        assert!(config.contains_key("grpc_service_name"));
    }

    #[test]
    fn test_service_endpoints() {
        let mut config = ScalarConfig::new();
        assert_eq!(config.grpc_service_address(), "");

        config.set_grpc_service_name("Users");
        config.set_grpc_service_address("127.0.0.1:50051");
        config.set_thrift_service_name("UsersThrift");
        config.set_thrift_service_address("127.0.0.1:50052");

        assert_eq!(config.grpc_service_name(), "Users");
        assert_eq!(config.grpc_service_address(), "127.0.0.1:50051");
        assert_eq!(config.thrift_service_name(), "UsersThrift");
        assert_eq!(config.thrift_service_address(), "127.0.0.1:50052");
    }

    #[test]
    fn test_filter_proto_json_default() {
        let config = ScalarConfig::new();
        assert!(!config.filter_proto_json());
        assert!(!config.filter_proto_json_emit_zero_values());
        assert!(!config.filter_proto_json_int64_as_number());
    }

    #[test]
    fn test_sub_options_forced_false_without_parent() {
        let mut config = ScalarConfig::new();
        config.set(FILTER_PROTO_JSON_EMIT_ZERO_VALUES, "true");
        config.set_filter_proto_json_int64_as_number(true);
        assert!(!config.filter_proto_json_emit_zero_values());
        assert!(!config.filter_proto_json_int64_as_number());

        config.set_filter_proto_json(false);
        assert!(!config.filter_proto_json_emit_zero_values());
    }

    #[test]
    fn test_sub_options_with_parent() {
        let mut config = ScalarConfig::new();
        config.set_filter_proto_json(true);
        // Absent sub-options default to true.
        assert!(config.filter_proto_json_emit_zero_values());
        assert!(config.filter_proto_json_int64_as_number());

        for value in [true, false] {
            config.set_filter_proto_json_emit_zero_values(value);
            config.set_filter_proto_json_int64_as_number(value);
            assert_eq!(config.filter_proto_json_emit_zero_values(), value);
            assert_eq!(config.filter_proto_json_int64_as_number(), value);
        }
    }

    #[test]
    fn test_bool_roundtrip() {
        let mut config = ScalarConfig::new();
        for value in [true, false] {
            config.set_filter_proto_json(value);
            assert_eq!(config.filter_proto_json(), value);
            config.set_bool("custom_flag", value);
            assert_eq!(config.try_bool("custom_flag"), Ok(Some(value)));
        }
    }

    #[test]
    fn test_parent_flag_exact_match() {
        let mut config = ScalarConfig::new();
        config.set(FILTER_PROTO_JSON, "True");
        assert!(!config.filter_proto_json());
        assert!(matches!(
            config.try_bool(FILTER_PROTO_JSON),
            Err(ScalarError::InvalidBool { .. })
        ));
    }

    #[test]
    fn test_get_int() {
        let mut config = ScalarConfig::new();
        config.set_int("workers", 8);
        assert_eq!(config.get_int("workers"), 8);
        config.set("workers", "eight");
        assert_eq!(config.get_int("workers"), 0);
        assert_eq!(config.get_int("missing"), 0);
    }

    #[test]
    fn test_from_iter() {
        let config: ScalarConfig = vec![
            ("HTTP_PORT".to_string(), "8080".to_string()),
            ("extra".to_string(), "kept".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(config.len(), 2);
        assert_eq!(config.http_port(), 8080);
        assert_eq!(config.get("extra"), Some("kept"));
    }
}
