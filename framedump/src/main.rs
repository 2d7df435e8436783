use std::process::ExitCode;

use clap::Parser;
use ffmpeg_next::util::log::{self as av_log, Level};
use log::debug;
use tracing_subscriber::EnvFilter;

use framedump::Config;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    // FFmpeg's own logging goes straight to stderr; keep it quiet unless asked
    av_log::set_level(if config.dump_format {
        Level::Info
    } else {
        Level::Error
    });

    match framedump::run(&config) {
        Ok(summary) => {
            debug!("{summary:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("framedump: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
