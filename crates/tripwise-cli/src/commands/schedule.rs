use chrono::{DateTime, Utc};
use clap::Args;
use std::path::PathBuf;
use tripwise_core::{optimize_order, DayPlan, ScheduleItem};

use super::CliResult;

#[derive(Args)]
pub struct ScheduleArgs {
    /// JSON file with an array of itinerary items ("-" for stdin)
    items: PathBuf,
    /// Day start as RFC 3339 (e.g. 2025-03-15T08:00:00Z)
    #[arg(long)]
    day_start: DateTime<Utc>,
    /// Number of travellers (defaults to the preference)
    #[arg(long)]
    party_size: Option<u32>,
    /// Reorder flexible items between anchors to cut travel
    #[arg(long)]
    optimize: bool,
    #[arg(long)]
    json: bool,
}

pub fn run(args: ScheduleArgs, config_path: Option<PathBuf>) -> CliResult {
    let prefs = super::preferences(config_path)?;
    let mut items: Vec<ScheduleItem> = super::read_json(&args.items)?;
    if args.optimize {
        items = optimize_order(&items, None);
    }

    let party_size = args.party_size.unwrap_or(prefs.party_size);
    let plan = prefs.scheduler().plan_day(&items, args.day_start, party_size);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }
    Ok(())
}

fn print_plan(plan: &DayPlan) {
    for item in &plan.items {
        let Some(computed) = &item.computed else {
            continue;
        };
        let anchor = if item.is_anchor() { " [fixed]" } else { "" };
        println!(
            "{}-{}  {}{anchor}",
            computed.start_time.format("%H:%M"),
            computed.end_time.format("%H:%M"),
            item.name
        );
        if let Some(travel) = &computed.travel_to_next {
            println!(
                "             -> {} {} min ({:.1} km), buffer {} min",
                travel.method.as_str(),
                travel.duration_minutes,
                travel.distance_km,
                computed.buffer_after_minutes
            );
        }
    }

    println!();
    println!(
        "total {} min: {} activity, {} travel, {} buffer",
        plan.total_duration_minutes,
        plan.stats.total_activity_minutes,
        plan.stats.total_travel_minutes,
        plan.stats.total_buffer_minutes
    );
    for advisory in &plan.advisories {
        let detail = serde_json::to_string(&advisory.advisory).unwrap_or_default();
        println!("warning: {}: {detail}", advisory.item_id);
    }
}
