use chrono::NaiveDate;
use clap::Args;
use tripwise_core::plan_trip_days;

use super::CliResult;

#[derive(Args)]
pub struct TripArgs {
    /// First day (YYYY-MM-DD)
    start: NaiveDate,
    /// Last day, inclusive (YYYY-MM-DD)
    end: NaiveDate,
    #[arg(long)]
    json: bool,
}

pub fn run(args: TripArgs) -> CliResult {
    if args.end < args.start {
        return Err(format!("end date {} is before start date {}", args.end, args.start).into());
    }
    let days = plan_trip_days(args.start, args.end);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    for day in &days {
        println!(
            "day {} {} {:<9} {}-{} ({} min)",
            day.day,
            day.date,
            format!("{:?}", day.day_type).to_lowercase(),
            day.day_type.day_start().format("%H:%M"),
            day.day_type.day_end().format("%H:%M"),
            day.available_minutes()
        );
    }
    Ok(())
}
