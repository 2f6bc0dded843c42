//! Command-line interface for machcmd.
//!
//! Lists the load commands of a Mach-O file, optionally checking that every
//! slice re-encodes to the exact bytes it was read from.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use machcmd::{MachOFile, ReadOptions, Slice};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "machcmd")]
#[command(about = "Inspect Mach-O load commands")]
struct Cli {
    /// Input file (thin Mach-O or fat container)
    input: PathBuf,

    /// Re-encode every slice and fail if any bytes differ
    #[arg(long)]
    check: bool,

    /// Reject load commands not padded to the pointer width
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}: {}", cli.input.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when `--check` finds a slice that does not round-trip.
fn run(cli: &Cli) -> machcmd::Result<bool> {
    let options = ReadOptions::new().strict_alignment(cli.strict);
    let file = MachOFile::open_with(&cli.input, &options)?;
    debug!(fat = file.is_fat(), slices = file.slices().len(), "opened {}", cli.input.display());

    let mut ok = true;
    for slice in file.slices() {
        print_slice(slice, file.is_fat());
        if cli.check {
            if slice.round_trips()? {
                println!("  round trip: ok");
            } else {
                println!("  round trip: MISMATCH");
                ok = false;
            }
        }
    }
    Ok(ok)
}

fn print_slice(slice: &Slice, fat: bool) {
    let image = slice.image();
    let header = image.header();
    if fat {
        println!(
            "{} (offset {:#x}, size {:#x}):",
            slice.arch_name().unwrap_or("unknown"),
            slice.offset,
            slice.size
        );
    }
    println!(
        "  magic {:#x} filetype {:#x} ncmds {} sizeofcmds {} flags {:#x}",
        header.magic, header.filetype, header.ncmds, header.sizeofcmds, header.flags
    );
    for (i, command) in image.commands().iter().enumerate() {
        println!("  [{i:>3}] {command}");
    }
    if !image.slack().is_empty() {
        println!("  ({} bytes of slack after the last command)", image.slack().len());
    }
}
