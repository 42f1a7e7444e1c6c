pub mod auth;
pub mod cli;
pub mod error;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod relay;
pub mod scanner;
pub mod server;
pub mod store;

use cli::Args;
use error::RadarError;
use log::info;
use server::Server;

pub async fn run(args: Args) -> Result<(), RadarError> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat Model: {}", args.chat_model);
    info!("Chat Base URL: {}", args.chat_base_url);
    info!("Store Type: {}", args.store_type);
    info!("Scan Timeout: {}s", args.scan_timeout_secs);
    info!("Scheduled Scan Gate Configured: {}", !args.cron_secret.is_empty());
    info!("-------------------------");

    let addr = args.server_addr.clone();
    let server = Server::new(addr, args);
    server.run().await
}
