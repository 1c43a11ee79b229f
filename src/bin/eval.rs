//! Evaluation CLI: infer kinship for every expected case and report accuracy.

use clap::Parser;
use famtree::{
    eval::{evaluate, load_cases},
    Config, FamilyDataset,
};
use std::path::PathBuf;

/// Evaluation framework: check inferred kinship terms against expected answers.
#[derive(Parser, Debug)]
#[command(name = "eval")]
struct Args {
    /// Dataset file (defaults to famtree.data_path from config).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Path to eval cases JSON (default: eval_cases.json).
    #[arg(long, default_value = "eval_cases.json")]
    cases: PathBuf,

    /// Minimum accuracy for a passing run.
    #[arg(long, default_value_t = 0.95)]
    threshold: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = Config::load_or_default()?;

    let data_path = args
        .data
        .or_else(|| config.data_path().map(PathBuf::from))
        .ok_or_else(|| anyhow::anyhow!("No dataset given (use --data or famtree.data_path)"))?;
    let dataset = FamilyDataset::load(&data_path)?;

    let cases = load_cases(&args.cases)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", args.cases.display(), e))?;

    if cases.is_empty() {
        anyhow::bail!("No cases in {}", args.cases.display());
    }

    println!("Running evaluation on {} cases\n", cases.len());

    let report = evaluate(&dataset, &cases, &config.kinship_engine());

    for miss in &report.mismatches {
        println!(
            "  {} -> {}: expected {:?}, got {:?} ({} hops)",
            miss.from, miss.to, miss.expected, miss.actual, miss.hops
        );
    }

    if !report.by_category.is_empty() {
        println!("\nBy category:");
        for (category, stats) in &report.by_category {
            println!("  {:<16} {}/{}", category, stats.correct, stats.total);
        }
    }

    println!("\n=== Evaluation Results ===");
    println!("Correct:  {}/{}", report.correct, report.total);
    println!("Accuracy: {:.2}%", report.accuracy() * 100.0);

    if report.accuracy() >= args.threshold {
        println!("\nAccuracy passes (>= {:.0}%).", args.threshold * 100.0);
        std::process::exit(0);
    } else {
        println!("\nAccuracy below threshold (>= {:.0}%).", args.threshold * 100.0);
        std::process::exit(1);
    }
}
