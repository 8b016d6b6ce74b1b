use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use lectern::api::{ArchiveClient, LibrarySource};
use lectern::core::config::{self, CliOverrides};
use lectern::core::view::{render_library, render_plain};
use lectern::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "lectern", about = "Browse and play a recorded-lecture archive")]
struct Args {
    /// Archive server URL (overrides config and LECTERN_SERVER_URL)
    #[arg(short, long)]
    server: Option<String>,

    /// Media player command; "" disables playback
    #[arg(short, long)]
    player: Option<String>,

    /// Config file to use instead of ~/.lectern/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, default_value = "lectern.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Print the library and exit instead of starting the interface
    #[arg(short, long)]
    list: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config(args.config.as_deref()).map_err(|e| {
        eprintln!("lectern: {e}");
        std::io::Error::other(e)
    })?;
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            server: args.server.as_deref(),
            player: args.player.as_deref(),
        },
    );

    log::info!("Lectern starting up against {}", resolved.server_url);

    if args.list {
        return list_library(&resolved).await;
    }

    tui::run(resolved)
}

/// Headless mode: prints the library cards to stdout.
async fn list_library(config: &config::ResolvedConfig) -> std::io::Result<()> {
    let client = ArchiveClient::new(config.server_url.clone(), config.timeout);
    let library = client.fetch_library().await.map_err(|e| {
        eprintln!("lectern: Failed to load video library: {e}");
        std::io::Error::other(e)
    })?;

    let width = crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80);
    let view = render_library(&library, std::time::Duration::ZERO);
    println!("{}", render_plain(&view, width));
    Ok(())
}
