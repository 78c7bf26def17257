use chrono::Utc;

use crate::config::{load_prices, load_request, resolve_settings, Settings};
use crate::parallel::{simulate_batches, WorkerPool};
use crate::simulation::export::write_ledger_csv;
use crate::simulation::simulate_with_ledger;

const USAGE: &str = "usage: warodds <simulate|validate> <request.{json,yaml}> [--prices <file>] \
[--config <file>] [--seed <n>] [--parallel] [--workers <n>] [--samples-csv <file>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

/// Flags shared by the subcommands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub request_path: Option<String>,
    pub prices_path: Option<String>,
    pub config_path: Option<String>,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub workers: Option<usize>,
    pub samples_csv: Option<String>,
}

pub fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut rest = args.iter().skip(2);
    while let Some(arg) = rest.next() {
        let mut value = |flag: &str| {
            rest.next()
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "--prices" => options.prices_path = Some(value("--prices")?),
            "--config" => options.config_path = Some(value("--config")?),
            "--samples-csv" => options.samples_csv = Some(value("--samples-csv")?),
            "--seed" => {
                let raw = value("--seed")?;
                options.seed = Some(raw.parse().map_err(|_| format!("invalid seed '{raw}'"))?);
            }
            "--workers" => {
                let raw = value("--workers")?;
                options.workers =
                    Some(raw.parse().map_err(|_| format!("invalid workers '{raw}'"))?);
            }
            "--parallel" => options.parallel = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag '{flag}'")),
            path if options.request_path.is_none() => options.request_path = Some(path.to_string()),
            extra => return Err(format!("unexpected argument '{extra}'")),
        }
    }
    Ok(options)
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return 2;
        }
    };
    let Some(request_path) = options.request_path.clone() else {
        eprintln!("{USAGE}");
        return 2;
    };

    match command {
        Command::Simulate => handle_simulate(&request_path, &options),
        Command::Validate => handle_validate(&request_path),
    }
}

fn handle_validate(path: &str) -> i32 {
    match load_request(path) {
        Ok(request) => {
            println!(
                "request valid: action={:?}, iterations={}",
                request.action.kind(),
                request.resolved_iterations()
            );
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn handle_simulate(path: &str, options: &Options) -> i32 {
    let mut request = match load_request(path) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("failed to load request: {err}");
            return 1;
        }
    };
    if options.seed.is_some() {
        request.seed = options.seed;
    }

    let settings = match effective_settings(options) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("failed to load configuration: {err}");
            return 1;
        }
    };

    let generated_at = Utc::now();
    let outcome = if settings.parallel {
        let pool = WorkerPool::with_workers(settings.workers);
        simulate_batches(&request, &settings.prices, generated_at, &pool)
    } else {
        simulate_with_ledger(&request, &settings.prices, generated_at)
    };
    let (report, ledger) = match outcome {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            return 1;
        }
    };

    if let Some(csv_path) = &options.samples_csv {
        if let Err(err) = write_ledger_csv(csv_path, &ledger) {
            eprintln!("failed to write samples to {csv_path}: {err}");
            return 1;
        }
    }

    match serde_json::to_string_pretty(&report) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize simulation report: {err}");
            1
        }
    }
}

/// Settings file merged with command-line overrides.
fn effective_settings(options: &Options) -> Result<Settings, crate::error::ConfigError> {
    let mut settings = resolve_settings(options.config_path.as_deref())?;
    if let Some(prices_path) = &options.prices_path {
        settings.prices = load_prices(prices_path)?;
    }
    if options.parallel {
        settings.parallel = true;
    }
    if let Some(workers) = options.workers {
        settings.workers = workers;
    }
    Ok(settings)
}
