//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! GOPATH + package path
//!     → paths.rs (service root)
//!     → document.rs (read <root>/<file>.yaml once)
//!         → flattened view → urlmapping → routing::RouteTable
//!                          → config     → scalar.rs ScalarConfig
//!         → raw tree       → <rpc>-fieldmapping → field_mapping.rs
//!     → loader.rs assembles ServiceConfiguration (schema.rs)
//!     → shared via Arc to the dispatcher and RPC client (shared.rs)
//!
//! On explicit reload:
//!     loader.rs builds a complete new ServiceConfiguration
//!     → atomic swap of Arc<ServiceConfiguration>
//! ```
//!
//! # Design Decisions
//! - Config is immutable once published; changes require a full reload
//! - Absent sections and keys fall back to defaults
//! - Malformed sections abort the load

pub mod document;
pub mod error;
pub mod field_mapping;
pub mod loader;
pub mod paths;
pub mod scalar;
pub mod schema;
pub mod shared;

pub use error::{ConfigError, ConfigResult, ScalarError};
pub use field_mapping::FieldMappingTable;
pub use loader::{load, load_file, load_service_config};
pub use paths::{ServicePaths, SEARCH_PATH_VAR};
pub use scalar::ScalarConfig;
pub use schema::{LoadRequest, RpcType, ServiceConfiguration};
pub use shared::SharedServiceConfig;
