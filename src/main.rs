//! Descriptor inspection tool.
//!
//! Loads a service descriptor the same way the gateway does at startup and
//! prints what it resolved: routes, scalar settings and field mappings.
//! Exits non-zero if the descriptor cannot be loaded.

use clap::Parser;

use rpc_gateway_config::config::{LoadRequest, RpcType};
use rpc_gateway_config::lifecycle::load_shared_or_exit;
use rpc_gateway_config::observability::logging::{init_logging, DEFAULT_DIRECTIVE};

#[derive(Parser)]
#[command(name = "gateway-config")]
#[command(about = "Load and inspect an RPC gateway service descriptor", long_about = None)]
struct Cli {
    /// Active transport: "grpc" or "thrift".
    #[arg(short, long)]
    rpc_type: RpcType,

    /// Package path below `<search root>/src`.
    #[arg(short, long)]
    package: String,

    /// Descriptor base name, without ".yaml".
    #[arg(short, long, default_value = "service")]
    file: String,

    /// Search path to use instead of $GOPATH.
    #[arg(long)]
    search_path: Option<String>,

    /// Print the loaded configuration as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(DEFAULT_DIRECTIVE);

    let cli = Cli::parse();
    let mut request = LoadRequest::new(cli.rpc_type, cli.package, cli.file);
    if let Some(search_path) = cli.search_path {
        request = request.with_search_path(search_path);
    }

    let shared = load_shared_or_exit(request);
    let config = shared.current();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(config.as_ref())?);
        return Ok(());
    }

    println!("descriptor:   {}", config.descriptor_path().display());
    println!("rpc type:     {}", config.rpc_type);
    println!("service:      {} @ {}", config.service_name(), config.service_address());
    println!("listen:       {}", config.scalars.http_port_str());
    println!(
        "json filter:  {} (emit zero values: {}, int64 as number: {})",
        config.scalars.filter_proto_json(),
        config.scalars.filter_proto_json_emit_zero_values(),
        config.scalars.filter_proto_json_int64_as_number(),
    );

    println!("routes ({}):", config.routes.len());
    for route in &config.routes {
        println!("  {:<7} {:<32} -> {}", route.http_method, route.url_pattern, route.rpc_method);
    }

    let mut fields: Vec<_> = config.field_mappings.iter().collect();
    fields.sort_by_key(|(name, _)| *name);
    println!("field mappings ({}):", fields.len());
    for (name, targets) in fields {
        println!("  {} -> [{}]", name, targets.join(", "));
    }

    Ok(())
}
