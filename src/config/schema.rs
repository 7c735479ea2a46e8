//! Configuration schema definitions.
//!
//! `ServiceConfiguration` is the aggregate produced by one descriptor load:
//! resolved paths, the active transport, and the three derived tables.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::config::error::ConfigError;
use crate::config::field_mapping::FieldMappingTable;
use crate::config::paths::ServicePaths;
use crate::config::scalar::ScalarConfig;
use crate::routing::RouteTable;

/// Active RPC transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcType {
    Grpc,
    Thrift,
}

impl RpcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcType::Grpc => "grpc",
            RpcType::Thrift => "thrift",
        }
    }
}

impl FromStr for RpcType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grpc" => Ok(RpcType::Grpc),
            "thrift" => Ok(RpcType::Thrift),
            other => Err(ConfigError::UnknownRpcType(other.to_string())),
        }
    }
}

impl fmt::Display for RpcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs of a descriptor load, kept so the same load can be repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadRequest {
    /// Active transport.
    pub rpc_type: RpcType,
    /// Logical package path, e.g. "github.com/acme/users".
    pub package_path: String,
    /// Descriptor base name without extension.
    pub file_name: String,
    /// Explicit search path; `None` reads the environment at load time.
    pub search_path: Option<String>,
}

impl LoadRequest {
    pub fn new(rpc_type: RpcType, package_path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            rpc_type,
            package_path: package_path.into(),
            file_name: file_name.into(),
            search_path: None,
        }
    }

    /// Use `search_path` instead of the environment variable.
    pub fn with_search_path(mut self, search_path: impl Into<String>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }
}

/// Root configuration for one loaded service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceConfiguration {
    /// Resolved search root and service root.
    pub paths: ServicePaths,

    /// Active transport.
    pub rpc_type: RpcType,

    /// Descriptor base name without extension.
    pub config_file_name: String,

    /// Scalars from the `config` section.
    pub scalars: ScalarConfig,

    /// Ordered routes from the `urlmapping` section.
    pub routes: RouteTable,

    /// Field mappings for the active transport.
    pub field_mappings: FieldMappingTable,
}

impl ServiceConfiguration {
    /// First entry of the search path.
    pub fn search_root(&self) -> &Path {
        &self.paths.search_root
    }

    /// Absolute service directory.
    pub fn service_root_path(&self) -> &Path {
        &self.paths.service_root
    }

    pub fn service_pkg_path(&self) -> &str {
        &self.paths.package_path
    }

    /// Full path of the descriptor this configuration was loaded from.
    pub fn descriptor_path(&self) -> PathBuf {
        self.paths.descriptor_path(&self.config_file_name)
    }

    /// Service name for the active transport.
    pub fn service_name(&self) -> String {
        match self.rpc_type {
            RpcType::Grpc => self.scalars.grpc_service_name(),
            RpcType::Thrift => self.scalars.thrift_service_name(),
        }
    }

    /// Service address for the active transport.
    pub fn service_address(&self) -> String {
        match self.rpc_type {
            RpcType::Grpc => self.scalars.grpc_service_address(),
            RpcType::Thrift => self.scalars.thrift_service_address(),
        }
    }
}
