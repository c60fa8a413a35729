//! Preview a bracket and its court schedule.
//!
//! Reads a plan request (bracket configuration plus optional seeded teams)
//! from a JSON file, schedules every match onto the configured courts and
//! prints the plan as JSON.

use std::path::PathBuf;

use anyhow::{Context, Error};
use pico_args::Arguments;
use tourney_planner::{
    config::{PlannerConfig, PlannerOverrides, parse_start},
    logging,
    request::{PlanRequest, plan},
};

const HELP: &str = "\
Preview a tournament bracket and its court schedule

USAGE:
  tourney_planner --input FILE [OPTIONS]

OPTIONS:
  --input          FILE     Plan request JSON (bracket config and teams)
  --output         FILE     Write the plan here instead of stdout
  --courts         N        Number of courts              [default: env PLANNER_COURTS or 4]
  --start          TIME     First slot, RFC 3339          [default: env PLANNER_START]
  --match-minutes  M        Match length                  [default: env PLANNER_MATCH_MINUTES or 15]
  --buffer-minutes B        Gap between slots on a court  [default: env PLANNER_BUFFER_MINUTES or 5]
  --slots          N        Slots per court               [default: env PLANNER_SLOTS_PER_COURT or 12]
  --min-rest       M        Minimum rest between matches  [default: env PLANNER_MIN_REST_MINUTES or 20]

FLAGS:
  --strict                  Hold back matches whose dependencies found no slot
  --pretty                  Pretty-print the JSON output
  -h, --help                Print help information

ENVIRONMENT:
  PLANNER_STRICT_DEPENDENCIES  Same as --strict when true
  RUST_LOG                     Log filter, e.g. tourney=debug
  (A .env file in the working directory is loaded if present)
";

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
    overrides: PlannerOverrides,
}

fn parse_args(mut pargs: Arguments) -> Result<Args, Error> {
    let start: Option<String> = pargs.opt_value_from_str("--start")?;

    let args = Args {
        input: pargs
            .value_from_str("--input")
            .context("--input FILE is required")?,
        output: pargs.opt_value_from_str("--output")?,
        pretty: pargs.contains("--pretty"),
        overrides: PlannerOverrides {
            courts: pargs.opt_value_from_str("--courts")?,
            start: start.as_deref().map(parse_start).transpose()?,
            match_minutes: pargs.opt_value_from_str("--match-minutes")?,
            buffer_minutes: pargs.opt_value_from_str("--buffer-minutes")?,
            slots_per_court: pargs.opt_value_from_str("--slots")?,
            min_rest_minutes: pargs.opt_value_from_str("--min-rest")?,
            strict_dependencies: pargs.contains("--strict"),
        },
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        anyhow::bail!("Unexpected arguments: {rest:?}");
    }

    Ok(args)
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = parse_args(pargs)?;

    logging::init();

    let config = PlannerConfig::from_env(args.overrides)?;
    config.validate()?;
    tracing::info!(
        courts = config.slots.courts.len(),
        slots_per_court = config.slots.slots_per_court,
        start = %config.slots.start,
        "Planner configured"
    );

    let request = PlanRequest::from_path(&args.input)?;
    tracing::info!(
        "Planning {} bracket for {} seeds",
        request.config.kind(),
        request.config.seeds()
    );

    let response = plan(&request, &config)?;
    let json = response.to_json(args.pretty)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Plan written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
