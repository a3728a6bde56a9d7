mod parser;
mod pdf;
mod report;
mod scan;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "minutes_agent",
    about = "Count public comments in the Open Forum sections of committee meeting minutes"
)]
struct Cli {
    /// Root folder containing YYYY-YYYY academic-year subfolders of PDF minutes
    folder: PathBuf,

    /// Detailed per-file processing output, including skip reasons
    #[arg(long)]
    debug: bool,

    /// Export results to CSV
    #[arg(long)]
    export_csv: bool,

    /// Output CSV filename
    #[arg(long, default_value = "open_forum_summary.csv")]
    csv_output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let t0 = Instant::now();
    println!("Processing folder: {}", cli.folder.display());

    // A missing root is the only fatal error; anything per-file or per-year
    // is recorded and the run continues.
    let output = scan::run(&cli.folder, &scan::PdfTextProvider)?;

    report::print_summary(&output, cli.debug);
    if cli.export_csv {
        report::export_csv(&output, &cli.csv_output)?;
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
