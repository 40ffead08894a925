//! streamcodec-inspect
//!
//! Loads codec settings, registers the configured profile and prints the
//! resulting codec list for every model key.
//!
//! Usage:
//!   streamcodec-inspect --config streamcodec.toml --roundtrip

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use streamcodec_inspect::{codec_table, render_table, roundtrip};
use streamcodec_registry::{CodecRegistry, CodecSettings};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "streamcodec-inspect")]
#[command(about = "Show which codecs a streamcodec profile registers")]
struct Args {
    /// Path to the settings file
    #[arg(short, long, default_value = "streamcodec.toml")]
    config: PathBuf,

    /// Profile to use instead of the configured one
    #[arg(short, long)]
    profile: Option<String>,

    /// Encode a sample frame with the active writer and read it back
    #[arg(long)]
    roundtrip: bool,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let settings = CodecSettings::load_from(&args.config)
        .and_then(|s| s.with_override(args.profile.as_deref()))
        .with_context(|| format!("loading settings from {}", args.config.display()))?;
    info!("Using codec profile {}", settings.profile);

    let registry = CodecRegistry::global();
    settings
        .apply(registry)
        .context("registering codec profile")?;

    let table = codec_table(registry)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("profile: {}", settings.profile);
        print!("{}", render_table(&table));
    }

    if args.roundtrip {
        let report = roundtrip(registry).context("sample round trip")?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "\n{}: wrote {} bytes with {}, read back {}",
                report.key,
                report.bytes,
                report.writer,
                if report.matches { "intact" } else { "CHANGED" }
            );
        }
        anyhow::ensure!(report.matches, "sample frame changed in round trip");
    }

    Ok(())
}
