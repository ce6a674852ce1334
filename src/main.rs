//! waste-sim entry point: CLI wiring and config-driven engine runs.

use std::process;

use tracing::{error, info};
use waste_sim::cli::{self, CliOptions};
use waste_sim::config::ScenarioConfig;
use waste_sim::io::export::export_csv;
use waste_sim::sim::engine;
use waste_sim::telemetry;

/// Loads the scenario: `--scenario` takes priority, then `--preset`, then baseline.
fn load_scenario(cli: &CliOptions) -> Result<ScenarioConfig, String> {
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(days) = cli.days {
        scenario.simulation.days = days;
    }
    if let Some(pct) = cli.reduction_percent {
        scenario.simulation.reduction_percent = pct;
    }
    if let Some(seed) = cli.seed {
        scenario.simulation.seed = Some(seed);
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(messages.join("\n"));
    }
    Ok(scenario)
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        return;
    }

    telemetry::init_tracing(if cli.tui {
        telemetry::QUIET_FILTER
    } else {
        telemetry::DEFAULT_FILTER
    });

    let scenario = match load_scenario(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if cli.tui {
        #[cfg(feature = "tui")]
        {
            if let Err(e) = waste_sim::tui::run(&scenario) {
                eprintln!("error: TUI failed: {e}");
                process::exit(1);
            }
            return;
        }
        #[cfg(not(feature = "tui"))]
        {
            eprintln!("error: --tui requires building with `--features tui`");
            process::exit(1);
        }
    }

    let params = match scenario.run_params() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let output = match engine::run(&params) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    info!(
        days = output.days,
        seed = output.seed,
        reduction_percent = params.reduction.percent(),
        "Simulation complete"
    );

    // Waste hours
    println!("--- Waste Hours ---");
    for r in output.waste.waste_hours() {
        println!("{r}");
    }

    println!("\n{}", output.waste);
    println!("\n{}", output.attribution);
    if let Some(top) = output.attribution.top_device() {
        println!("\nTop waste device: {} ({:.2} kWh)", top.device, top.excess_kwh);
    }
    println!(
        "\nReduction applied: {}. Estimated savings: {:.2}",
        params.reduction, output.waste.savings_currency
    );

    if let Some(ref path) = cli.export {
        if let Err(e) = export_csv(output.series(), path) {
            error!(error = %e, "CSV export failed");
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Series written to {}", path.display());
    }

    if cli.serve {
        #[cfg(feature = "api")]
        {
            use std::net::SocketAddr;
            use std::sync::Arc;

            let state = Arc::new(waste_sim::api::AppState::new(&scenario));
            let addr = SocketAddr::from(([0, 0, 0, 0], cli.port()));
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("error: failed to create tokio runtime: {e}");
                    process::exit(1);
                }
            };
            if let Err(e) = rt.block_on(waste_sim::api::serve(state, addr)) {
                eprintln!("error: API server failed: {e}");
                process::exit(1);
            }
        }
        #[cfg(not(feature = "api"))]
        {
            eprintln!("error: --serve requires building with `--features api`");
            process::exit(1);
        }
    }
}
