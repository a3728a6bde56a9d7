use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::scan::ScanOutput;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Academic_Year")]
    academic_year: &'a str,
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Comment_Count")]
    comment_count: usize,
}

/// Write the year → date → count mapping as CSV, rows ordered by year then
/// date (the BTreeMaps already hold them that way).
pub fn export_csv(output: &ScanOutput, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for (year, bucket) in &output.years {
        for (date, count) in bucket {
            writer.serialize(CsvRow {
                academic_year: year,
                date,
                comment_count: *count,
            })?;
        }
    }
    writer.flush()?;

    println!("Results exported to: {}", path.display());
    Ok(())
}

/// Console summary: overall totals, per-year breakdown, participation table.
/// Skip reasons are only listed in verbose mode.
pub fn print_summary(output: &ScanOutput, verbose: bool) {
    let rule = "=".repeat(70);

    println!("\n{rule}");
    println!("OPEN FORUM ANALYSIS - PUBLIC COMMENT SUMMARY");
    println!("{rule}");

    let total_meetings: usize = output.year_stats.values().map(|s| s.total_meetings).sum();
    let with_comments: usize = output.year_stats.values().map(|s| s.meetings_with_comments).sum();
    let total_comments: usize = output.year_stats.values().map(|s| s.total_comments).sum();

    println!("Total meetings across all years: {total_meetings}");
    println!("Meetings with public comments:   {with_comments}");
    println!("Meetings without comments:       {}", total_meetings - with_comments);
    if total_meetings > 0 {
        println!("Public participation rate:       {:.1}%", rate(with_comments, total_meetings));
    }
    println!("Total public comments found:     {total_comments}");

    for (year, stats) in &output.year_stats {
        println!("\n{year}");
        println!("{}", "-".repeat(50));
        if stats.total_meetings == 0 {
            println!("  (no meeting data found)");
            continue;
        }
        println!("  Total meetings held:        {}", stats.total_meetings);
        println!("  With public comments:       {}", stats.meetings_with_comments);
        println!("  With no comments:           {}", stats.meetings_no_comments);
        println!("  With no Open Forum section: {}", stats.meetings_no_open_forum);
        println!("  Total comments:             {}", stats.total_comments);

        match output.years.get(year) {
            Some(bucket) if !bucket.is_empty() => {
                for (date, count) in bucket {
                    let plural = if *count == 1 { "" } else { "s" };
                    println!("    {date}: {count} comment{plural}");
                }
            }
            _ => println!("    (no meetings with public comments)"),
        }
    }

    println!("\n{rule}");
    println!("PARTICIPATION SUMMARY");
    println!("{rule}");
    println!(
        "{:<12} {:>7} {:>12} {:>8} {:>10}",
        "Year", "Total", "w/Comments", "Rate", "Comments"
    );
    println!("{}", "-".repeat(70));

    for (year, stats) in &output.year_stats {
        println!(
            "{:<12} {:>7} {:>12} {:>7.1}% {:>10}",
            year,
            stats.total_meetings,
            stats.meetings_with_comments,
            rate(stats.meetings_with_comments, stats.total_meetings),
            stats.total_comments,
        );
    }

    println!("{}", "-".repeat(70));
    println!(
        "{:<12} {:>7} {:>12} {:>7.1}% {:>10}",
        "TOTAL",
        total_meetings,
        with_comments,
        rate(with_comments, total_meetings),
        total_comments,
    );

    if verbose && !output.skipped.is_empty() {
        println!("\nSkipped files ({}):", output.skipped.len());
        for entry in &output.skipped {
            println!("  - {}: {}", entry.filename, entry.reason);
        }
    }
}

fn rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

// ── Tests ──
