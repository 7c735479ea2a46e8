//! Service root resolution.
//!
//! # Responsibilities
//! - Read the colon-separated search path (first entry only)
//! - Compose `<root>/src/<package>` as the service root
//! - Locate `<service root>/<file>.yaml`
//!
//! # Design Decisions
//! - Only the first search path entry is honored, no fallback
//! - An empty root is rejected here rather than surfacing later as a
//!   missing file

use std::path::{Path, PathBuf};

use crate::config::error::{ConfigError, ConfigResult};

/// Environment variable holding the search path.
pub const SEARCH_PATH_VAR: &str = "GOPATH";

/// Descriptor file extension.
pub const DESCRIPTOR_EXTENSION: &str = "yaml";

/// Resolved filesystem locations for one service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ServicePaths {
    /// First entry of the search path.
    pub search_root: PathBuf,
    /// Absolute service directory, `<search_root>/src/<package_path>`.
    pub service_root: PathBuf,
    /// Logical package path, e.g. "github.com/acme/users".
    pub package_path: String,
}

impl ServicePaths {
    /// Resolve from the process environment.
    pub fn from_env(package_path: &str) -> ConfigResult<Self> {
        let value = std::env::var(SEARCH_PATH_VAR).unwrap_or_default();
        Self::resolve(&value, package_path)
    }

    /// Resolve from an explicit search path value.
    pub fn resolve(search_path: &str, package_path: &str) -> ConfigResult<Self> {
        let first = search_path.split(':').next().unwrap_or_default().trim();
        if first.is_empty() {
            return Err(ConfigError::EmptySearchPath {
                var: SEARCH_PATH_VAR.to_string(),
            });
        }

        let search_root = PathBuf::from(first);
        let service_root = search_root
            .join("src")
            .join(package_path.trim_matches('/'));

        Ok(Self {
            search_root,
            service_root,
            package_path: package_path.to_string(),
        })
    }

    /// Path of the descriptor `<service_root>/<file_name>.yaml`.
    pub fn descriptor_path(&self, file_name: &str) -> PathBuf {
        descriptor_path_in(&self.service_root, file_name)
    }
}

fn descriptor_path_in(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", file_name, DESCRIPTOR_EXTENSION))
}
