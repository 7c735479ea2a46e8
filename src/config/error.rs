//! Error types for descriptor loading and scalar conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a descriptor load.
///
/// None of these leave a partially built configuration behind: the loader
/// either returns a complete `ServiceConfiguration` or one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The search path variable is unset, empty, or starts with an empty entry.
    #[error("search path `{var}` is empty; cannot resolve service root")]
    EmptySearchPath { var: String },

    /// Transport tag other than "grpc" or "thrift".
    #[error("unknown rpc type `{0}` (expected \"grpc\" or \"thrift\")")]
    UnknownRpcType(String),

    /// Descriptor file could not be read.
    #[error("failed to read descriptor {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Descriptor file is not valid YAML.
    #[error("failed to parse descriptor {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A section exists but has the wrong shape for its reader.
    #[error("malformed section `{section}`: {reason}")]
    MalformedSection { section: String, reason: String },

    /// A `urlmapping` line is not "<METHOD> <URL> <RPC-METHOD>".
    #[error("malformed urlmapping line {index} ({line:?}): {reason}")]
    MalformedRoute {
        index: usize,
        line: String,
        reason: String,
    },

    /// A field-mapping entry cannot be converted.
    #[error("malformed field mapping `{field}` in `{section}`: {reason}")]
    MalformedFieldMapping {
        section: String,
        field: String,
        reason: String,
    },
}

/// Result alias for descriptor loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A stored scalar that could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarError {
    #[error("config `{key}` = {value:?} is not a valid integer")]
    InvalidInteger { key: String, value: String },

    #[error("config `{key}` = {value:?} is not \"true\" or \"false\"")]
    InvalidBool { key: String, value: String },
}
