use clap::Parser;
use dev_radar::cli::Args;
use dev_radar::error::RadarError;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), RadarError> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    dev_radar::run(args).await
}
