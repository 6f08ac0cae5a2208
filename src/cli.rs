use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use city_energy_plan::config::{Overrides, ScenarioConfig};

/// Default API server port.
#[cfg(feature = "api")]
pub const DEFAULT_PORT: u16 = 8050;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub overrides: Overrides,
    pub csv_out: Option<PathBuf>,
    pub list_climates: bool,
    #[cfg(feature = "tui")]
    pub tui: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: Option<u16>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--climate" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --climate (expected a climate name)")?;
                opts.overrides.climate = Some(name.to_string());
            }
            "--budget" => {
                i += 1;
                opts.overrides.budget = Some(args.parse_at(i, "--budget", "a number")?);
            }
            "--price" => {
                i += 1;
                opts.overrides.price = Some(args.parse_at(i, "--price", "a number")?);
            }
            "--apartments" => {
                i += 1;
                opts.overrides.apartments = Some(args.parse_at(i, "--apartments", "an integer")?);
            }
            "--houses" => {
                i += 1;
                opts.overrides.houses = Some(args.parse_at(i, "--houses", "an integer")?);
            }
            "--public" => {
                i += 1;
                opts.overrides.public = Some(args.parse_at(i, "--public", "an integer")?);
            }
            "--csv-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --csv-out (expected a file path)")?;
                if opts.csv_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--csv-out provided more than once".to_string());
                }
            }
            "--list-climates" => opts.list_climates = true,
            #[cfg(feature = "tui")]
            "--tui" => opts.tui = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                opts.port = Some(args.parse_at(i, "--port", "a u16")?);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
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

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
    fn parse_at<T: FromStr>(&self, index: usize, flag: &str, expected: &str) -> Result<T, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }

    fn parse_at<T: FromStr>(&self, index: usize, flag: &str, expected: &str) -> Result<T, String> {
        let raw = self.next_or_err(index, &format!("missing value for {flag} (expected {expected})"))?;
        raw.parse()
            .map_err(|_| format!("invalid value for {flag}: \"{raw}\" is not {expected}"))
    }
}

pub fn print_usage() {
    eprintln!("city-energy-plan: ten-year city electricity projection under efficiency measures");
    eprintln!();
    eprintln!("Usage: city-energy-plan [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>      Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>        Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --climate <name>       Override the climate");
    eprintln!("  --budget <number>      Override the annual budget");
    eprintln!("  --price <number>       Override the price per unit of saved energy");
    eprintln!("  --apartments <n>       Override the apartment count");
    eprintln!("  --houses <n>           Override the private house count");
    eprintln!("  --public <n>           Override the public building count");
    eprintln!("  --csv-out <path>       Export yearly records to CSV");
    eprintln!("  --list-climates        Print the climate plan table and exit");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                  Explore the projection in a terminal UI");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                Start REST API server after the report");
        eprintln!("  --port <u16>           API server port (default: {DEFAULT_PORT})");
    }
    eprintln!("  --help                 Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the default preset is used.");
    eprintln!("Set RUST_LOG=debug to trace every simulated year.");
}
