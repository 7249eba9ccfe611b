mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// ninjagen - Generate ninja manifests from templated build descriptions
#[derive(Parser)]
#[command(name = "ninjagen")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the build description
  #[arg(short, long, global = true, default_value = "build.cfg")]
  config: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate the build description and write the manifest
  Gen {
    /// Path of the manifest to write
    #[arg(short, long, default_value = "build.ninja")]
    output: PathBuf,
  },

  /// Print the manifest without writing it
  Show,

  /// Print every resolved variable, including published rule keys
  Vars {
    #[arg(long, value_enum, default_value_t)]
    output_format: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Gen { output } => cmd::cmd_gen(&cli.config, &output),
    Commands::Show => cmd::cmd_show(&cli.config),
    Commands::Vars { output_format } => cmd::cmd_vars(&cli.config, output_format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
