use std::path::PathBuf;

use clap::Parser;

use aoc2021::{logging, scaffold, Error};

/// Lay out the source and input files for a new day.
#[derive(Debug, Parser)]
struct Args {
    /// Day number, 1 to 25.
    day: u32,

    #[arg(long, default_value = "src/bin")]
    bin_dir: PathBuf,

    #[arg(long, default_value = "input")]
    input_dir: PathBuf,
}

fn run() -> Result<(), Error> {
    logging::init()?;
    let args = Args::parse();
    let made = scaffold::scaffold(args.day, &args.bin_dir, &args.input_dir)?;
    println!("{}", made.source.display());
    println!("{}", made.input.display());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
