//! Compile YAML device definitions into a single JSON document.
//!
//! Usage:
//!   compile_devices [OPTIONS] [FILE.yml ...]
//!
//! Every file is decoded and validated; the first error stops the run with exit code 1
//! and nothing is written. On success all devices are written as one JSON array.
//!
//! Options:
//!   -o, --output <FILE>  Write to FILE instead of stdout
//!   --styled             Human-readable (indented) output
//!   -v, --verbose        More logging (repeat for more); RUST_LOG overrides

use clap::Parser;
use devprofile::compile::{compile_files, render, write_output, OutputStyle};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "compile_devices", version, about = "Compile YAML device definitions into JSON")]
struct Args {
    /// Output file (stdout if omitted).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output in human-readable format.
    #[arg(long)]
    styled: bool,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML device definitions, each holding one device or a list of devices.
    files: Vec<PathBuf>,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let devices = match compile_files(args.files.as_slice()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(false);
        }
    };

    let style = if args.styled {
        OutputStyle::Styled
    } else {
        OutputStyle::Compact
    };
    let rendered = render(&devices, style);

    match &args.output {
        Some(path) => {
            if let Err(e) = write_output(path, &rendered) {
                eprintln!("{}", e);
                return Ok(false);
            }
            tracing::info!(path = %path.display(), devices = devices.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(true)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    tracing::debug!(files = args.files.len(), styled = args.styled, "starting");

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Failed to write JSON: {e:#}");
            ExitCode::FAILURE
        }
    }
}
