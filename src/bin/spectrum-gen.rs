//! spectrum-gen - Emit random bit patterns of a fixed width and weight
//!
//! # Usage
//!
//! ```bash
//! # Five 32-bit patterns with exactly 8 bits set
//! spectrum-gen --length 32 --weight 8 --count 5
//!
//! # Reproducible hex output using the sampling strategy
//! spectrum-gen -l 128 -w 100 --seed 7 --format hex --strategy exact
//! ```
//!
//! # Exit Codes
//!
//! - 0: Patterns written
//! - 1: Generation failed
//! - 2: Invalid arguments

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use spectrum::{Spectrum, WeightStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Bin,
    Hex,
    Dec,
}

#[derive(Debug)]
struct Options {
    length: usize,
    weight: usize,
    count: usize,
    seed: Option<u64>,
    format: Format,
    strategy: WeightStrategy,
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return ExitCode::SUCCESS;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {:#}\n", e);
            print_help();
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut length = None;
    let mut weight = None;
    let mut count = 1;
    let mut seed = None;
    let mut format = Format::Bin;
    let mut strategy = WeightStrategy::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = || {
            iter.next()
                .with_context(|| format!("missing value for {}", arg))
        };
        match arg.as_str() {
            "-l" | "--length" => {
                length = Some(value()?.parse::<usize>().context("--length must be an integer")?)
            }
            "-w" | "--weight" => {
                weight = Some(value()?.parse::<usize>().context("--weight must be an integer")?)
            }
            "-n" | "--count" => count = value()?.parse::<usize>().context("--count must be an integer")?,
            "--seed" => seed = Some(value()?.parse::<u64>().context("--seed must be an integer")?),
            "-f" | "--format" => {
                format = match value()?.as_str() {
                    "bin" => Format::Bin,
                    "hex" => Format::Hex,
                    "dec" => Format::Dec,
                    other => bail!("unknown format: {}", other),
                }
            }
            "-s" | "--strategy" => {
                let name = value()?;
                strategy = WeightStrategy::from_name(name)
                    .with_context(|| format!("unknown strategy: {}", name))?;
            }
            _ => bail!("unknown option: {}", arg),
        }
    }

    Ok(Options {
        length: length.context("--length is required")?,
        weight: weight.context("--weight is required")?,
        count,
        seed,
        format,
        strategy,
    })
}

fn run(options: &Options) -> Result<()> {
    let mut spectrum = Spectrum::with_strategy(options.length, options.strategy);
    if let Some(seed) = options.seed {
        spectrum.seed(seed);
    }

    for i in 0..options.count {
        // Start every pattern from zero so consecutive outputs are independent draws
        spectrum.set_u64(0)?;
        spectrum
            .adjust_ones_count(options.weight)
            .with_context(|| format!("pattern {}", i))?;

        let line = match options.format {
            Format::Bin => spectrum.binary_text(),
            Format::Hex => spectrum.hex_text(),
            Format::Dec => spectrum.text(10)?,
        };
        println!("{}", line);
    }

    Ok(())
}

fn print_help() {
    eprintln!("spectrum-gen - Generate fixed-width bit patterns with an exact weight");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    spectrum-gen --length <L> --weight <K> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -l, --length <L>       Bit width of each pattern");
    eprintln!("    -w, --weight <K>       Number of set bits (0..=L)");
    eprintln!("    -n, --count <N>        Number of patterns [default: 1]");
    eprintln!("        --seed <S>         Seed for reproducible output");
    eprintln!("    -f, --format <F>       bin | hex | dec [default: bin]");
    eprintln!("    -s, --strategy <S>     flip | fill | exact [default: flip]");
    eprintln!("    -h, --help             Print this help message");
    eprintln!();
    eprintln!("EXIT CODES:");
    eprintln!("    0    Patterns written");
    eprintln!("    1    Generation failed (e.g. weight exceeds length)");
    eprintln!("    2    Invalid arguments");
    eprintln!();
    eprintln!("ENVIRONMENT:");
    eprintln!("    RUST_LOG=trace    Log iteration counts per pattern");
}
