use crate::analysis::analyze_log;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Access log to analyze (plain or .gz)
    pub file: PathBuf,

    /// Abort when the share of unparsed lines exceeds this fraction
    #[arg(long)]
    pub errors_limit: Option<f64>,

    /// Maximum number of endpoints to print
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_report_size: u64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Analyze a single file and print the ranked rows as JSON on stdout.
pub fn analyze(args: AnalyzeArgs) -> Result<()> {
    let max_rows = usize::try_from(args.max_report_size).context("max report size too large")?;

    let analysis = analyze_log(&args.file, args.errors_limit, max_rows)
        .with_context(|| format!("failed to analyze {}", args.file.display()))?;

    let out = if args.pretty {
        serde_json::to_string_pretty(&analysis.rows)?
    } else {
        serde_json::to_string(&analysis.rows)?
    };
    println!("{out}");

    eprintln!(
        "{} lines, {} unparsed, {} endpoints",
        analysis.totals.total_records,
        analysis.totals.total_errors,
        analysis.rows.len()
    );

    Ok(())
}
