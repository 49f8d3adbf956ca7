use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;

use wayfarer_estimate::{Estimator, EstimatorConfig, RouteEstimate};

mod input;
mod output;

use input::{load_config, load_routes, parse_time};
use output::{print_json, print_table, RouteReport};

#[derive(Parser, Debug)]
#[command(
    name = "mode-estimate",
    author,
    version,
    about = "Compare car, transit, bike and walk durations for a driving route",
    long_about = "Derives transit, cycling and walking estimates from a driving route's \
                  distance and duration, adjusting for weekday rush hours.\n\n\
                  Pass a single route with --distance-km and --drive-min, or a JSON \
                  array of routes with --input."
)]
struct Args {
    /// Driving distance in kilometres
    #[arg(
        short,
        long,
        allow_negative_numbers = true,
        requires = "drive_min",
        conflicts_with = "input"
    )]
    distance_km: Option<f64>,

    /// Driving duration in minutes
    #[arg(
        short = 'm',
        long,
        allow_negative_numbers = true,
        requires = "distance_km",
        conflicts_with = "input"
    )]
    drive_min: Option<f64>,

    /// Local departure time (YYYY-MM-DDTHH:MM[:SS]); defaults to now
    #[arg(short, long, value_parser = parse_time)]
    at: Option<NaiveDateTime>,

    /// JSON file with an array of {distance_km, drive_duration_min, time_of_day?}
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON file overriding estimator coefficients
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print estimates as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
    )
    .format_timestamp(None)
    .init();

    let config = match &args.config {
        Some(path) => {
            log::info!("Config: {}", path.display());
            load_config(path).context("Failed to load estimator config")?
        }
        None => EstimatorConfig::default(),
    };
    let estimator = Estimator::with_config(config).context("Invalid estimator config")?;

    let mut routes = match (&args.input, args.distance_km, args.drive_min) {
        (Some(path), _, _) => {
            log::info!("Input: {}", path.display());
            load_routes(path).context("Failed to read routes")?
        }
        (None, Some(distance_km), Some(drive_min)) => {
            vec![RouteEstimate::new(distance_km, drive_min)]
        }
        _ => bail!("Provide --distance-km and --drive-min, or --input <file>"),
    };

    // An explicit --at pins routes that carry no time of their own
    let now = args.at.unwrap_or_else(|| estimator.now());
    for route in &mut routes {
        route.time_of_day.get_or_insert(now);
    }
    log::debug!("Estimating {} route(s)", routes.len());

    let reports: Vec<RouteReport> = routes
        .iter()
        .map(|route| {
            let peak = estimator.is_peak(&route.time_of_day.unwrap_or(now));
            RouteReport::new(route, peak, estimator.estimate(route))
        })
        .collect();

    if args.json {
        print_json(&reports)?;
    } else {
        print_table(&reports);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_route_values_parse() {
        let args =
            Args::try_parse_from(["mode-estimate", "--distance-km", "-1", "--drive-min", "5"])
                .unwrap();
        assert_eq!(args.distance_km, Some(-1.0));
        assert_eq!(args.drive_min, Some(5.0));

        let args = Args::try_parse_from(["mode-estimate", "-d", "2.5", "-m", "-3"]).unwrap();
        assert_eq!(args.drive_min, Some(-3.0));

        // Parsed, but the estimator still has nothing to offer
        let route = RouteEstimate::new(-1.0, 5.0);
        assert!(Estimator::default().estimate(&route).is_empty());
    }

    #[test]
    fn test_route_flags_need_each_other() {
        assert!(Args::try_parse_from(["mode-estimate", "--distance-km", "1"]).is_err());
        assert!(Args::try_parse_from([
            "mode-estimate",
            "--distance-km",
            "1",
            "--drive-min",
            "5",
            "--input",
            "routes.json"
        ])
        .is_err());
    }
}
