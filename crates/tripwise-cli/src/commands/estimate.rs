use clap::Args;
use std::path::PathBuf;
use tripwise_core::{ActivityCategory, DurationPolicy};

use super::CliResult;

#[derive(Args)]
pub struct EstimateArgs {
    /// Activity category (e.g. museum, outdoor, food); unknown values fall back to generic
    category: String,
    /// Number of travellers (defaults to the preference)
    #[arg(long)]
    party_size: Option<u32>,
    /// Book the midpoint instead of the minimum
    #[arg(long)]
    midpoint: bool,
    #[arg(long)]
    json: bool,
}

pub fn run(args: EstimateArgs, config_path: Option<PathBuf>) -> CliResult {
    let prefs = super::preferences(config_path)?;
    let category = ActivityCategory::from_label(&args.category);
    let party_size = args.party_size.unwrap_or(prefs.party_size);
    let estimate = prefs.duration_estimator().estimate(category, party_size);

    let policy = if args.midpoint {
        DurationPolicy::Midpoint
    } else {
        prefs.scheduler.duration_policy
    };
    let booked = estimate.resolve(policy);

    if args.json {
        let out = serde_json::json!({
            "category": category,
            "party_size": party_size,
            "estimate": estimate,
            "booked_minutes": booked,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "{category} (party of {party_size}): {}-{} min, booking {booked} min",
            estimate.minimum_minutes, estimate.maximum_minutes
        );
        println!("{}", estimate.description);
    }
    Ok(())
}
