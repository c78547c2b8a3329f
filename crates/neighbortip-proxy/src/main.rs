//! Neighbortip Directory Proxy
//!
//! Starts the HTTP server that relays FID lookups to the hosted directory.

use neighbortip_proxy::{config::ProxyConfig, start_server, ProxyError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ProxyError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ProxyConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: neighbortip-proxy --config <path-to-config.toml>");
        eprintln!();
        ProxyConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Neighbortip Directory Proxy - FID lookup pass-through");
    println!();
    println!("USAGE:");
    println!("    neighbortip-proxy --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    GET /api/farcaster?fid=<fid>   Relay a directory lookup");
    println!("    GET /health                    Liveness check");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default: '127.0.0.1')");
    println!("    - bind_port: Port number (default: 3000)");
    println!("    - upstream_url: Directory endpoint (default: Pinata hub userNameProofsByFid)");
    println!("    - request_timeout_secs: Outbound timeout in seconds (default: 10)");
    println!();
}
