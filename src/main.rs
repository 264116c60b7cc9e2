use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use parley::core::config;
use parley::tui;

#[derive(Parser)]
#[command(name = "parley", about = "Terminal client for payment assistance sessions")]
struct Args {
    /// Backend base URL (e.g. http://localhost:8000/api)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to parley.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("parley.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Config load failed, using defaults: {e}");
            Default::default()
        }
    };
    let resolved = config::resolve(&file_config, args.base_url.as_deref());
    log::info!("Parley starting up against {}", resolved.base_url);

    tui::run(resolved)
}
