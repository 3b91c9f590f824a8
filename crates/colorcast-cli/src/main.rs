//! ColorCast: move the colors of one image toward another.
//!
//! `transfer` runs a single pass, `methods` lists the algorithms, and `tune`
//! keeps both images loaded and re-renders as intensity or method change.

mod config;
mod debounce;
mod error;
mod tune;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colorcast_core::{Conversion, TransferConfig, TransferEngine, TransferImage, TransferMethod};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, DEFAULT_INTENSITY_PERCENT, percent_to_intensity};
use crate::error::CliError;
use crate::tune::TuneSession;

#[derive(Parser)]
#[command(name = "colorcast")]
#[command(version, about = "Color transfer between images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transfer the colors of STYLE onto CONTENT
    Transfer {
        /// Image whose structure is kept
        #[arg(value_name = "CONTENT")]
        content: PathBuf,

        /// Image whose colors are borrowed
        #[arg(value_name = "STYLE")]
        style: PathBuf,

        /// Output file; the extension picks the format
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// Transfer method (see `colorcast methods`)
        #[arg(short, long, value_name = "METHOD", default_value = "histogram")]
        method: String,

        /// Blend strength, 0-100
        #[arg(short, long, value_name = "PERCENT", default_value_t = DEFAULT_INTENSITY_PERCENT)]
        intensity: f32,

        /// JSON transfer config (thresholds, resample filter)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List available transfer methods
    Methods,

    /// Interactively adjust intensity and method, rewriting OUT on each change
    Tune {
        #[arg(value_name = "CONTENT")]
        content: PathBuf,

        #[arg(value_name = "STYLE")]
        style: PathBuf,

        /// Output file, rewritten after every settled change
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// Starting transfer method
        #[arg(short, long, value_name = "METHOD", default_value = "histogram")]
        method: String,

        /// JSON transfer config (thresholds, resample filter)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let app_config = AppConfig::default();
    init_tracing(&app_config.log_filter);

    match run(cli, &app_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("ignoring COLORCAST_LOG={filter:?}: {e}");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, app_config: &AppConfig) -> Result<(), CliError> {
    match cli.command {
        Commands::Transfer {
            content,
            style,
            out,
            method,
            intensity,
            config,
        } => {
            let engine = build_engine(config.as_deref())?;
            let method = TransferMethod::from(method);
            let content = load_image(&content)?;
            let style = load_image(&style)?;

            let result = engine.transfer(&content, &style, &method, percent_to_intensity(intensity))?;
            colorcast_core::save(&result, &out)?;
            println!("{} at {intensity}% -> {}", method.label(), out.display());
            Ok(())
        }

        Commands::Methods => {
            for method in TransferMethod::all() {
                println!("{:<22}{}", method.id(), method.label());
            }
            Ok(())
        }

        Commands::Tune {
            content,
            style,
            out,
            method,
            config,
        } => {
            let engine = build_engine(config.as_deref())?;
            let session = Arc::new(TuneSession::new(
                engine,
                load_image(&content)?,
                load_image(&style)?,
                TransferMethod::from(method),
                out,
            ));

            println!("enter an intensity (0-100), `method <id>`, or `quit`");
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(tune::run(
                session,
                tokio::io::BufReader::new(tokio::io::stdin()),
                percent_to_intensity(DEFAULT_INTENSITY_PERCENT),
                app_config.debounce,
            ))
        }
    }
}

fn build_engine(config: Option<&Path>) -> Result<TransferEngine, CliError> {
    let config = match config {
        Some(path) => TransferConfig::from_file(path)?,
        None => TransferConfig::default(),
    };
    Ok(TransferEngine::new(config)?)
}

/// Load and normalize an input, telling the user about any conversion.
fn load_image(path: &Path) -> Result<TransferImage, CliError> {
    let (image, conversion) = colorcast_core::load_with_report(path)?;
    if conversion != Conversion::Unchanged {
        println!("{}: {conversion}", path.display());
    }
    Ok(image)
}
