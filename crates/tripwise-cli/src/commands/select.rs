use clap::Args;
use std::path::PathBuf;
use tripwise_core::{evaluate_step, AutomationLevel, Candidate, CandidateCategory, Package};

use super::CliResult;

#[derive(Args)]
pub struct SelectArgs {
    /// JSON file with an array of candidates ("-" for stdin)
    candidates: PathBuf,
    /// Step to select for: flight, hotel or activity
    #[arg(long)]
    category: CandidateCategory,
    /// Package override (cost, experience, time, custom)
    #[arg(long)]
    package: Option<Package>,
    /// Automation level override (1-4 or manual/assisted/smart/full)
    #[arg(long)]
    level: Option<AutomationLevel>,
    #[arg(long)]
    json: bool,
}

pub fn run(args: SelectArgs, config_path: Option<PathBuf>) -> CliResult {
    let prefs = super::preferences(config_path)?;
    let candidates: Vec<Candidate> = super::read_json(&args.candidates)?;

    let mut package = prefs.package_config();
    if let Some(p) = args.package {
        package.package = p;
    }
    let level = args.level.unwrap_or(prefs.automation_level);

    let outcome = evaluate_step(level, &package, args.category, &candidates);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("level {level}, package {}, step {}", package.package, args.category);
    if let Some(warning) = &outcome.weight_warning {
        println!("warning: {warning}");
    }
    for (rank, option) in outcome.options.iter().enumerate() {
        let picked = outcome
            .auto_selected
            .iter()
            .any(|s| s.input_index == option.input_index);
        let recommended = outcome
            .recommendation
            .as_ref()
            .is_some_and(|r| r.input_index == option.input_index);
        let marker = if picked {
            " (selected)"
        } else if recommended {
            " (recommended)"
        } else {
            ""
        };
        println!(
            "{:>2}. {:<30} {:>9.2}  rating {:.1}  score {:.3}{marker}",
            rank + 1,
            option.candidate.label(),
            option.candidate.price,
            option.candidate.rating,
            option.score
        );
    }
    if outcome.options.is_empty() {
        println!("no {} candidates", args.category);
    }
    if let Some(timeout) = outcome.timeout {
        println!("auto-advance in {} ms unless changed", timeout.timeout_ms);
    }
    Ok(())
}
