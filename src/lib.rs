//! Service descriptor loading for an HTTP-to-RPC gateway.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::{
    load_service_config, ConfigError, FieldMappingTable, LoadRequest, RpcType, ScalarConfig,
    ServiceConfiguration, SharedServiceConfig,
};
pub use routing::{Route, RouteTable};
