//! slimstack-52991: KiCad footprint generator for Molex SlimStack 52991 receptacles
//!
//! Builds the footprint for one pin count and part number and writes it as
//! `<name>.kicad_mod` into the output directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use slimstack_footprint::config;
use slimstack_footprint::kicad::KicadFileHandler;
use slimstack_footprint::slimstack::{naming, Generator};

/// Footprint generator for Molex SlimStack 52991 receptacles.
///
/// Writes `Molex_SlimStack_Receptacle_2xNN_Pitch0.5mm_52991-PARTNUMBER.kicad_mod`.
#[derive(Parser, Debug)]
#[command(name = "slimstack-52991")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Total number of pins (even, at least 2)
    #[arg(value_name = "PINCOUNT")]
    pincount: u32,

    /// Part number suffix, e.g. 0200 for 52991-0200
    #[arg(value_name = "PARTNUMBER")]
    partnumber: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory (overrides the configuration file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print the footprint tree and increase logging verbosity
    /// (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Picks the output directory: CLI flag, then config, then the working directory.
fn output_directory(cli: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    cli.or(configured)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Entry point for the slimstack-52991 generator.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if config_path.is_none() {
                if let Some(default_path) = config::default_config_path() {
                    eprintln!("\nDefault config location: {}", default_path.display());
                }
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    let generator = Generator::from_config(&cfg);
    let footprint = match generator.generate(args.pincount, &args.partnumber) {
        Ok(fp) => fp,
        Err(e) => {
            error!(error = %e, "Cannot build footprint");
            return ExitCode::FAILURE;
        }
    };

    info!(name = %footprint.name, "Building footprint");

    if args.verbose > 0 {
        print!("{}", footprint.render_tree());
    }

    let dir = output_directory(args.output_dir.as_deref(), cfg.output.directory.as_deref());
    if let Err(e) = std::fs::create_dir_all(&dir) {
        error!(path = %dir.display(), error = %e, "Cannot create output directory");
        return ExitCode::FAILURE;
    }

    let path = dir.join(naming::file_name(&footprint.name));
    match KicadFileHandler::new(&footprint).write_file(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Cannot write footprint");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn parse_positional_arguments() {
        let args = Args::try_parse_from(["slimstack-52991", "40", "0200", "-vv"]).unwrap();
        assert_eq!(args.pincount, 40);
        assert_eq!(args.partnumber, "0200");
        assert_eq!(args.verbose, 2);
        assert!(!args.quiet);
    }

    #[test]
    fn reject_non_numeric_pin_count() {
        assert!(Args::try_parse_from(["slimstack-52991", "forty", "0200"]).is_err());
    }

    #[test]
    fn log_level_selection() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(1, false, "error"), Level::INFO);
        assert_eq!(get_log_level(5, false, "warn"), Level::TRACE);
    }

    #[test]
    fn output_directory_precedence() {
        let cli = Path::new("cli");
        let configured = Path::new("configured");
        assert_eq!(output_directory(Some(cli), Some(configured)), PathBuf::from("cli"));
        assert_eq!(output_directory(None, Some(configured)), PathBuf::from("configured"));
        assert_eq!(output_directory(None, None), PathBuf::from("."));
    }
}
