use clap::Args;
use std::path::PathBuf;
use tripwise_core::{GeoPoint, Location, LocationKind};

use super::CliResult;

#[derive(Args)]
pub struct TravelArgs {
    /// Origin as "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    from: GeoPoint,
    /// Destination as "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    to: GeoPoint,
    #[arg(long)]
    json: bool,
}

pub fn run(args: TravelArgs, config_path: Option<PathBuf>) -> CliResult {
    let calculator = super::preferences(config_path)?.distance_calculator();
    let from = Location::new("origin", args.from, LocationKind::Activity);
    let to = Location::new("destination", args.to, LocationKind::Activity);
    let estimate = calculator.estimate_travel(&from, &to);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    let cost = match estimate.cost_amount {
        Some(amount) => format!("${amount:.2}"),
        None => "free".to_string(),
    };
    println!(
        "{:.2} km by {}: {} min, {cost}",
        estimate.distance_km,
        estimate.method.as_str(),
        estimate.duration_minutes
    );
    Ok(())
}
