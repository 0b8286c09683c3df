use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use deepsite_chat::core::config::{ChatConfig, CliOverrides, load_config, resolve};
use deepsite_chat::core::options::{Mode, Model};
use deepsite_chat::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "deepsite-chat", about = "Terminal chat composer")]
struct Args {
    /// Search mode to start in
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Model to start with
    #[arg(long, value_enum)]
    model: Option<Model>,

    /// Command that records one utterance and prints the transcript
    #[arg(long)]
    voice_command: Option<String>,

    /// Config file to read instead of ~/.deepsite/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to deepsite.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("deepsite.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config(args.config.as_deref()).unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        ChatConfig::default()
    });
    let cli = CliOverrides {
        mode: args.mode,
        model: args.model,
        voice_command: args.voice_command,
    };
    let config = resolve(&file_config, &cli);

    log::info!(
        "DeepSite chat starting up (mode: {:?}, model: {:?})",
        config.mode,
        config.model
    );

    tui::run(config)
}
