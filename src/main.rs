//! Command-line entry point: scenario loading, report printing, optional UI and API.

mod cli;

use std::process;

use city_energy_plan::config::ScenarioConfig;
use city_energy_plan::io::export::export_csv;
use city_energy_plan::plan::climate::Bucket;
use city_energy_plan::plan::kpi::ProjectionSummary;
use city_energy_plan::report::{consumption_table, inventory_table, plan_table};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Logs to stderr so stdout carries only the report.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_scenario(opts: &cli::CliOptions) -> ScenarioConfig {
    let loaded = if let Some(ref path) = opts.scenario {
        ScenarioConfig::from_toml_file(path)
    } else if let Some(ref name) = opts.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::default_city())
    };
    let mut scenario = loaded.unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });
    scenario.apply(&opts.overrides);

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }
    scenario
}

fn print_climates(scenario: &ScenarioConfig) {
    let sim = scenario.simulator().unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });
    for plan in sim.plans().iter() {
        println!("{}", plan.name);
        for bucket in Bucket::ALL {
            println!("  {:<11} {}", bucket.to_string(), plan.measures(bucket).join(", "));
        }
    }
}

fn main() {
    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    #[cfg(feature = "tui")]
    init_tracing(if opts.tui { "off" } else { "info" });
    #[cfg(not(feature = "tui"))]
    init_tracing("info");

    let scenario = load_scenario(&opts);

    if opts.list_climates {
        print_climates(&scenario);
        return;
    }

    #[cfg(feature = "tui")]
    if opts.tui {
        if let Err(e) = city_energy_plan::tui::run(scenario) {
            eprintln!("error: TUI failed: {e}");
            process::exit(1);
        }
        return;
    }

    let inventory = scenario.inventory().unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });
    let projection = scenario.run().unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    println!("{}\n", inventory_table(&inventory));

    for year in &projection.years {
        println!("{year}");
    }
    println!("\n{}", ProjectionSummary::from_projection(&projection));
    println!("\n{}", consumption_table(&projection));
    println!("\n{}", plan_table(&projection));

    if let Some(ref path) = opts.csv_out {
        if let Err(e) = export_csv(&projection, path) {
            error!("failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "projection written");
    }

    #[cfg(feature = "api")]
    if opts.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = match city_energy_plan::api::AppState::new(scenario) {
            Ok(state) => Arc::new(state),
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], opts.port.unwrap_or(cli::DEFAULT_PORT)));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            error!("failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(city_energy_plan::api::serve(state, addr)) {
            error!("API server failed: {e}");
            process::exit(1);
        }
    }
}
