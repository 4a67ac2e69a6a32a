mod report; // Check report formatting

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error, info};
use plugframe_core::{ConfigFormat, ConfigReader};

/// Plugframe: check plugin configuration documents before loading them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print more log output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every plugin config in a document
    Check {
        /// Path of the config document (.json, .yaml, .yml or .toml)
        file: PathBuf,
    },
    /// Print a parsed config document, optionally converted to another format
    Show {
        /// Path of the config document
        file: PathBuf,
        /// Output format: json, yaml or toml (defaults to json)
        #[arg(long)]
        format: Option<String>,
    },
}

/// Exit status when a document was read but is not valid
const EXIT_INVALID: u8 = 1;
/// Exit status when a document could not be read
const EXIT_READ_ERROR: u8 = 2;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);
    debug!("Parsed args: {:?}", args);

    let reader = ConfigReader::default();

    match args.command {
        Commands::Check { file } => {
            let config = match reader.read_file(&file) {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to read {}: {}", file.display(), e);
                    return ExitCode::from(EXIT_READ_ERROR);
                }
            };

            let report = report::CheckReport::new(&config);
            print!("{}", report);

            if report.is_valid() {
                info!("{} is valid", file.display());
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_INVALID)
            }
        }
        Commands::Show { file, format } => {
            let format = match format.as_deref() {
                None => ConfigFormat::Json,
                Some(name) => match ConfigFormat::from_name(name) {
                    Some(format) => format,
                    None => {
                        error!("Unsupported output format: {}", name);
                        return ExitCode::from(EXIT_READ_ERROR);
                    }
                },
            };

            let output = reader
                .read_file(&file)
                .and_then(|config| reader.to_string(&config, format));
            match output {
                Ok(text) => {
                    println!("{}", text.trim_end());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("Failed to show {}: {}", file.display(), e);
                    ExitCode::from(EXIT_READ_ERROR)
                }
            }
        }
    }
}
