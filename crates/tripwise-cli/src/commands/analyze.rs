use clap::Args;
use std::path::PathBuf;
use tripwise_core::selection::CategorySummary;
use tripwise_core::{Candidate, CandidateCategory, SearchAnalysis};

use super::CliResult;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON file with an array of candidates ("-" for stdin)
    candidates: PathBuf,
    #[arg(long)]
    json: bool,
}

pub fn run(args: AnalyzeArgs) -> CliResult {
    let candidates: Vec<Candidate> = super::read_json(&args.candidates)?;
    let analysis = SearchAnalysis::from_candidates(&candidates);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    for category in CandidateCategory::ALL {
        print_summary(analysis.summary(category));
    }
    println!("confidence {:.2}", analysis.confidence);
    Ok(())
}

fn print_summary(summary: &CategorySummary) {
    print!("{:<9} {:>3}", summary.category.as_str(), summary.count);
    if let Some(price) = summary.price {
        print!("  price {:.2}-{:.2} (avg {:.2})", price.min, price.max, price.avg);
    }
    if let Some(rating) = summary.rating {
        print!("  rating {:.1}-{:.1}", rating.min, rating.max);
    }
    println!();
}
