//! Service descriptor loading.
//!
//! One load resolves the service root, reads `<root>/<file>.yaml` once, and
//! builds the scalar store, route table and field mapping table from that
//! single buffer. The result is a fresh `ServiceConfiguration`; nothing is
//! merged with an earlier load.

use std::path::Path;

use crate::config::document::DescriptorSource;
use crate::config::error::ConfigResult;
use crate::config::field_mapping::FieldMappingTable;
use crate::config::paths::ServicePaths;
use crate::config::scalar::ScalarConfig;
use crate::config::schema::{LoadRequest, RpcType, ServiceConfiguration};
use crate::routing::RouteTable;

/// Section holding route lines.
pub const URL_MAPPING_SECTION: &str = "urlmapping";

/// Section holding scalar configuration.
pub const CONFIG_SECTION: &str = "config";

/// Load a descriptor, resolving the service root from the environment.
pub fn load_service_config(
    rpc_type: &str,
    package_path: &str,
    file_name: &str,
) -> ConfigResult<ServiceConfiguration> {
    let rpc_type: RpcType = rpc_type.parse()?;
    load(&LoadRequest::new(rpc_type, package_path, file_name))
}

/// Load according to `request`.
pub fn load(request: &LoadRequest) -> ConfigResult<ServiceConfiguration> {
    let paths = match &request.search_path {
        Some(search_path) => ServicePaths::resolve(search_path, &request.package_path)?,
        None => ServicePaths::from_env(&request.package_path)?,
    };

    let descriptor_path = paths.descriptor_path(&request.file_name);
    let source = DescriptorSource::read(&descriptor_path)?;
    let config = build(paths, request.rpc_type, &request.file_name, &source)?;

    tracing::info!(
        path = %descriptor_path.display(),
        rpc_type = %config.rpc_type,
        routes = config.routes.len(),
        scalars = config.scalars.len(),
        field_mappings = config.field_mappings.len(),
        "Service descriptor loaded"
    );
    Ok(config)
}

/// Build a configuration from descriptor content already in memory.
pub fn build(
    paths: ServicePaths,
    rpc_type: RpcType,
    file_name: &str,
    source: &DescriptorSource,
) -> ConfigResult<ServiceConfiguration> {
    let flat = source.flat_view()?;
    let routes = RouteTable::from_lines(flat.get_string_slice(URL_MAPPING_SECTION)?)?;
    let scalars: ScalarConfig = flat
        .get_string_map_string(CONFIG_SECTION)?
        .into_iter()
        .collect();

    let tree = source.tree()?;
    let field_mappings = FieldMappingTable::from_tree(&tree, rpc_type)?;

    if let Err(e) = scalars.try_http_port() {
        tracing::warn!(error = %e, "http_port is not a valid port, it will read as 0");
    }

    Ok(ServiceConfiguration {
        paths,
        rpc_type,
        config_file_name: file_name.to_string(),
        scalars,
        routes,
        field_mappings,
    })
}

/// Load a descriptor file directly, bypassing search path resolution.
///
/// The service root is the file's parent directory and the package path
/// is left empty.
pub fn load_file(path: &Path, rpc_type: RpcType) -> ConfigResult<ServiceConfiguration> {
    let source = DescriptorSource::read(path)?;
    let service_root = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let file_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let paths = ServicePaths {
        search_root: service_root.clone(),
        service_root,
        package_path: String::new(),
    };
    build(paths, rpc_type, &file_name, &source)
}
