//! md-provision entry point

use tracing_subscriber::EnvFilter;

use md_provision::executor::HttpExecutor;
use md_provision::provision::{Orchestrator, STORE_COUNT};
use md_provision::report;

/// Environment variable consulted when no credential argument is given.
const ADMIN_TOKEN_ENV: &str = "MOTHERDUCK_ADMIN_TOKEN";

/// Print usage information
fn print_usage() {
    eprintln!("Usage: md-provision <admin-token>");
    eprintln!();
    eprintln!("md-provision - Create MotherDuck service accounts and read-write tokens");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  admin-token    MotherDuck admin API token");
    eprintln!("                 (falls back to {ADMIN_TOKEN_ENV} when omitted)");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  md-provision $MOTHERDUCK_ADMIN_TOKEN");
}

#[tokio::main]
async fn main() {
    // The env var is consulted only when the argument is entirely absent;
    // an empty argument is passed through as-is.
    let admin_token = match std::env::args().nth(1) {
        Some(token) => token,
        None => match std::env::var(ADMIN_TOKEN_ENV) {
            Ok(token) => token,
            Err(_) => {
                eprintln!("Error: Admin token is required");
                print_usage();
                std::process::exit(1);
            }
        },
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("{}", "=".repeat(60));
    println!("MotherDuck Service Account & Token Generator");
    println!("{}", "=".repeat(60));
    println!("\nGenerating {STORE_COUNT} service accounts and tokens...\n");

    let executor = match HttpExecutor::new(admin_token) {
        Ok(executor) => executor,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let results = Orchestrator::new(&executor).run(STORE_COUNT).await;

    // Per-store failures are logged as they happen; a completed run always
    // exits 0.
    report::print(&results, STORE_COUNT);
}
