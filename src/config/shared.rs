//! Shared, atomically replaceable configuration.
//!
//! Readers take an `Arc` snapshot and never see a half-updated
//! configuration: a reload builds a complete `ServiceConfiguration` first
//! and publishes it with a single store. A failed reload keeps the current
//! snapshot.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::error::ConfigResult;
use crate::config::loader;
use crate::config::schema::{LoadRequest, ServiceConfiguration};

/// Process-wide handle to the current configuration.
#[derive(Debug)]
pub struct SharedServiceConfig {
    request: LoadRequest,
    current: ArcSwap<ServiceConfiguration>,
}

impl SharedServiceConfig {
    /// Perform the initial load.
    pub fn load(request: LoadRequest) -> ConfigResult<Self> {
        let config = loader::load(&request)?;
        Ok(Self {
            request,
            current: ArcSwap::from_pointee(config),
        })
    }

    /// Wrap an already built configuration; `request` is used by `reload`.
    pub fn new(request: LoadRequest, config: ServiceConfiguration) -> Self {
        Self {
            request,
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Current snapshot.
    pub fn current(&self) -> Arc<ServiceConfiguration> {
        self.current.load_full()
    }

    pub fn request(&self) -> &LoadRequest {
        &self.request
    }

    /// Re-run the full load and publish the result.
    pub fn reload(&self) -> ConfigResult<Arc<ServiceConfiguration>> {
        match loader::load(&self.request) {
            Ok(config) => {
                let config = Arc::new(config);
                self.current.store(config.clone());
                tracing::info!(routes = config.routes.len(), "Configuration reloaded");
                Ok(config)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to reload configuration. Keeping current configuration.");
                Err(e)
            }
        }
    }

    /// Publish a configuration built elsewhere.
    pub fn replace(&self, config: ServiceConfiguration) {
        self.current.store(Arc::new(config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::field_mapping::FieldMappingTable;
    use crate::config::paths::ServicePaths;
    use crate::config::scalar::ScalarConfig;
    use crate::config::schema::RpcType;
    use crate::routing::RouteTable;

    fn config_with_port(port: u16) -> ServiceConfiguration {
        let mut scalars = ScalarConfig::new();
        scalars.set_http_port(port);
        ServiceConfiguration {
            paths: ServicePaths::resolve("/go", "svc").unwrap(),
            rpc_type: RpcType::Grpc,
            config_file_name: "service".to_string(),
            scalars,
            routes: RouteTable::default(),
            field_mappings: FieldMappingTable::default(),
        }
    }

    #[test]
    fn test_replace_keeps_old_snapshot_alive() {
        let request = LoadRequest::new(RpcType::Grpc, "svc", "service").with_search_path("/go");
        let shared = SharedServiceConfig::new(request, config_with_port(8080));

        let before = shared.current();
        shared.replace(config_with_port(9090));

        assert_eq!(before.scalars.http_port(), 8080);
        assert_eq!(shared.current().scalars.http_port(), 9090);
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let request = LoadRequest::new(RpcType::Grpc, "svc", "service")
            .with_search_path("/nonexistent-search-root");
        let shared = SharedServiceConfig::new(request, config_with_port(8080));

        assert!(shared.reload().is_err());
        assert_eq!(shared.current().scalars.http_port(), 8080);
    }
}
