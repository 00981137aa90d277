//! Credence Server CLI
//!
//! Starts the HTTP server for fact checking and topic research.

use credence_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: credence-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Credence Server - Fact Checking and Topic Research");
    println!();
    println!("USAGE:");
    println!("    credence-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /fact_check   {{\"content\": \"...\"}}");
    println!("    POST /research     {{\"topic\": \"...\", \"max_sources\": 5}}");
    println!("    GET  /health");
    println!();
    println!("CONFIGURATION:");
    println!("    - bind_address, bind_port: where to listen");
    println!("    - log_filter: tracing filter when RUST_LOG is unset (default: info)");
    println!("    - [nlp] enabled, lexicon_path");
    println!("    - [wikipedia] endpoint, article_base_url, user_agent");
    println!("    - [news] endpoint, api_key (NEWS_API_KEY overrides)");
    println!("    - [summarizer] enabled");
    println!("    - [checker] lookup_timeout_secs, news_language, news_sort_by");
    println!();
}
