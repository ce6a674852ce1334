//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Default port of the REST API.
pub const DEFAULT_PORT: u16 = 3000;

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub days: Option<usize>,
    pub reduction_percent: Option<f64>,
    pub seed: Option<u64>,
    pub export: Option<PathBuf>,
    pub tui: bool,
    pub serve: bool,
    pub port: Option<u16>,
    pub help: bool,
}

impl CliOptions {
    /// API port, falling back to [`DEFAULT_PORT`].
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid or conflicting argument.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

/// Parses an argument list (without the program name).
///
/// # Errors
///
/// Returns a message describing the first invalid or conflicting argument.
pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--days" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --days (expected 1-30)")?;
                let days = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--days value \"{raw}\" is not a valid integer"))?;
                if opts.days.replace(days).is_some() {
                    return Err("--days provided more than once".to_string());
                }
            }
            "--reduction" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --reduction (expected 0-100)")?;
                let pct = raw
                    .parse::<f64>()
                    .map_err(|_| format!("--reduction value \"{raw}\" is not a valid number"))?;
                if opts.reduction_percent.replace(pct).is_some() {
                    return Err("--reduction provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                if opts.seed.replace(seed).is_some() {
                    return Err("--seed provided more than once".to_string());
                }
            }
            "--export" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --export (expected a file path)")?;
                if opts.export.replace(PathBuf::from(path)).is_some() {
                    return Err("--export provided more than once".to_string());
                }
            }
            "--tui" => opts.tui = true,
            "--serve" => opts.serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                if opts.port.replace(port).is_some() {
                    return Err("--port provided more than once".to_string());
                }
            }
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }
    if opts.tui && opts.serve {
        return Err("arguments `--tui` and `--serve` are mutually exclusive".to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("waste-sim: hourly energy waste simulator");
    eprintln!();
    eprintln!("Usage: waste-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>    Load scenario from TOML config file");
    eprintln!("  --preset <name>      Use a built-in preset (baseline, single_day, month)");
    eprintln!("  --days <1-30>        Override simulated days");
    eprintln!("  --reduction <0-100>  Override waste reduction percentage");
    eprintln!("  --seed <u64>         Override random seed");
    eprintln!("  --export <path>      Write the adjusted series to CSV");
    eprintln!("  --tui                Open the interactive dashboard (feature `tui`)");
    eprintln!("  --serve              Start the REST API (feature `api`)");
    eprintln!("  --port <u16>         API server port (default: {DEFAULT_PORT})");
    eprintln!("  --help               Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}
