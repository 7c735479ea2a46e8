//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the service descriptor before anything serves traffic
//! - Turn any load failure into a diagnostic and a process exit
//!
//! # Design Decisions
//! - Fail fast: a service without a valid descriptor must not start
//! - The library returns `Result`; only this wrapper exits

use crate::config::{loader, LoadRequest, ServiceConfiguration, SharedServiceConfig};

/// Exit code used when the descriptor cannot be loaded.
pub const EXIT_CONFIG_ERROR: i32 = 78;

/// Load the descriptor or terminate the process.
pub fn load_service_config_or_exit(
    rpc_type: &str,
    package_path: &str,
    file_name: &str,
) -> ServiceConfiguration {
    match loader::load_service_config(rpc_type, package_path, file_name) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start without a valid service descriptor");
            eprintln!("fatal: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    }
}

/// Load into a shared handle or terminate the process.
pub fn load_shared_or_exit(request: LoadRequest) -> SharedServiceConfig {
    match SharedServiceConfig::load(request) {
        Ok(shared) => shared,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start without a valid service descriptor");
            eprintln!("fatal: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    }
}
