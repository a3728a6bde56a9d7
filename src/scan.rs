use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use regex::Regex;

use crate::parser::{self, dates, ForumOutcome};
use crate::pdf;

static YEAR_DIR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{4}").unwrap());

/// Bucket name used when the root has no `YYYY-YYYY` subfolders and is
/// processed as one flat collection.
pub const FLAT_BUCKET: &str = "All Files";

/// Source of extracted document text. The production implementation reads
/// PDFs; tests substitute a plain-text reader.
pub trait TextProvider: Sync {
    fn get_text(&self, path: &Path) -> Result<String>;
}

pub struct PdfTextProvider;

impl TextProvider for PdfTextProvider {
    fn get_text(&self, path: &Path) -> Result<String> {
        pdf::extract_text(path)
    }
}

/// Date → comment count for one academic year.
pub type YearBucket = BTreeMap<String, usize>;

#[derive(Debug, Clone, Copy, Default)]
pub struct YearStats {
    pub total_meetings: usize,
    pub meetings_with_comments: usize,
    pub meetings_no_comments: usize,
    pub meetings_no_open_forum: usize,
    pub total_comments: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessingStats {
    pub total_files: usize,
    pub processed_files: usize,
    pub skipped_files: usize,
    pub total_comments: usize,
}

#[derive(Debug, Clone)]
pub struct SkipEntry {
    pub filename: String,
    pub reason: &'static str,
}

pub const SKIP_NO_TEXT: &str = "Failed to extract text";
pub const SKIP_NO_SECTION: &str = "No Open Forum section found";
pub const SKIP_NO_COMMENTS: &str = "No comments or 'no comment' marker found";

/// Everything one run produces. Buckets and stats are keyed by academic-year
/// folder name; BTreeMaps keep presentation order independent of completion
/// order.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub years: BTreeMap<String, YearBucket>,
    pub year_stats: BTreeMap<String, YearStats>,
    pub stats: ProcessingStats,
    pub skipped: Vec<SkipEntry>,
}

/// Per-file result, computed in parallel and folded serially.
struct FileRecord {
    filename: String,
    date: String,
    outcome: ForumOutcome,
    text_failed: bool,
}

/// Walk the academic-year tree under `root` and aggregate comment counts.
/// Only a missing root is fatal; unreadable files and years without a
/// Minutes folder are logged and skipped.
pub fn run(root: &Path, provider: &dyn TextProvider) -> Result<ScanOutput> {
    if !root.exists() {
        bail!("Folder not found: {}", root.display());
    }

    let mut output = ScanOutput::default();

    let year_dirs = find_year_dirs(root)?;
    if year_dirs.is_empty() {
        tracing::warn!("no YYYY-YYYY subfolders found, processing {} as one flat collection", root.display());
        process_year(FLAT_BUCKET, root, provider, &mut output);
        return Ok(output);
    }

    println!(
        "Found {} yearly folders: {:?}",
        year_dirs.len(),
        year_dirs.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>()
    );

    for (year_name, year_path) in &year_dirs {
        let Some(minutes_dir) = resolve_minutes_dir(year_path) else {
            tracing::warn!(year = %year_name, "no 'Minutes' or 'Minute' folder, skipping year");
            continue;
        };
        process_year(year_name, &minutes_dir, provider, &mut output);
    }

    Ok(output)
}

/// Immediate subdirectories named like `YYYY-YYYY`, sorted by name.
fn find_year_dirs(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("reading {}", root.display()))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() && YEAR_DIR_RE.is_match(&name) {
            dirs.push((name, entry.path()));
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// `Minutes` preferred, `Minute` as fallback.
fn resolve_minutes_dir(year_path: &Path) -> Option<PathBuf> {
    for candidate in ["Minutes", "Minute"] {
        let dir = year_path.join(candidate);
        if dir.is_dir() {
            return Some(dir);
        }
    }
    None
}

fn process_year(
    year_name: &str,
    dir: &Path,
    provider: &dyn TextProvider,
    output: &mut ScanOutput,
) {
    let files = collect_pdfs(dir);
    tracing::debug!(year = year_name, files = files.len(), "processing year folder");

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Each file is a pure function of its bytes and name; process in
    // parallel, then fold serially so the accumulators stay single-writer.
    let records: Vec<FileRecord> = files
        .par_iter()
        .map(|path| {
            let record = process_file(path, provider);
            pb.inc(1);
            record
        })
        .collect();
    pb.finish_and_clear();

    let mut bucket = YearBucket::new();
    let mut stats = YearStats {
        total_meetings: records.len(),
        ..Default::default()
    };

    for record in records {
        match record.outcome {
            ForumOutcome::Comments(count) => {
                stats.meetings_with_comments += 1;
                stats.total_comments += count;
                bucket.insert(record.date, count);
                output.stats.processed_files += 1;
                output.stats.total_comments += count;
            }
            ForumOutcome::NoComments => {
                stats.meetings_no_comments += 1;
                output.stats.skipped_files += 1;
                output.skipped.push(SkipEntry {
                    filename: record.filename,
                    reason: SKIP_NO_COMMENTS,
                });
            }
            ForumOutcome::NoSection => {
                stats.meetings_no_open_forum += 1;
                output.stats.skipped_files += 1;
                output.skipped.push(SkipEntry {
                    filename: record.filename,
                    reason: if record.text_failed { SKIP_NO_TEXT } else { SKIP_NO_SECTION },
                });
            }
        }
    }

    output.stats.total_files += stats.total_meetings;
    output.years.insert(year_name.to_string(), bucket);
    output.year_stats.insert(year_name.to_string(), stats);
}

fn process_file(path: &Path, provider: &dyn TextProvider) -> FileRecord {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let date = dates::extract_date(&filename);
    tracing::debug!(file = %filename, date = %date, "processing");

    let text = match provider.get_text(path) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            return FileRecord { filename, date, outcome: ForumOutcome::NoSection, text_failed: true };
        }
        Err(e) => {
            tracing::debug!(file = %filename, "text extraction failed: {e:#}");
            return FileRecord { filename, date, outcome: ForumOutcome::NoSection, text_failed: true };
        }
    };

    let outcome = parser::analyze_text(&text);
    FileRecord { filename, date, outcome, text_failed: false }
}

/// Recursive walk for files with a case-insensitive `.pdf` extension,
/// sorted by path for deterministic order.
fn collect_pdfs(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(dir, &mut files);
    files.sort();
    files
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), "cannot read directory: {e}");
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files);
        } else if path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        {
            files.push(path);
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Reads the fixture "PDFs" as plain UTF-8 text.
    struct PlainTextProvider;

    impl TextProvider for PlainTextProvider {
        fn get_text(&self, path: &Path) -> Result<String> {
            Ok(fs::read_to_string(path)?)
        }
    }

    fn write_fixture(dir: &Path, name: &str, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    const TWO_COMMENT_MINUTES: &str = "I. Call to Order\nThe meeting opened at 6pm.\n\
        V. Open Forum\n\
        A resident asked about the crosswalk timing on Oak Avenue near the school.\n\n\
        Another attendee requested an update on the community garden waiting list.\n\
        VI. Discussion Items\nBudget review.";

    #[test]
    fn end_to_end_single_year() {
        let root = tempfile::TempDir::new().unwrap();
        let minutes = root.path().join("2022-2023").join("Minutes");
        write_fixture(&minutes, "Minutes 10.05.2022.pdf", TWO_COMMENT_MINUTES);

        let output = run(root.path(), &PlainTextProvider).unwrap();

        assert_eq!(output.stats.total_files, 1);
        assert_eq!(output.stats.processed_files, 1);
        assert_eq!(output.stats.total_comments, 2);

        let stats = output.year_stats.get("2022-2023").unwrap();
        assert_eq!(stats.total_meetings, 1);
        assert_eq!(stats.meetings_with_comments, 1);
        assert_eq!(stats.total_comments, 2);

        let bucket = output.years.get("2022-2023").unwrap();
        assert_eq!(bucket.get("10.05.2022"), Some(&2));
    }

    #[test]
    fn skip_reasons_are_recorded() {
        let root = tempfile::TempDir::new().unwrap();
        let minutes = root.path().join("2021-2022").join("Minutes");
        write_fixture(&minutes, "empty 1.10.22.pdf", "");
        write_fixture(&minutes, "no_forum 2.14.22.pdf", "I. Call to Order\nII. Roll Call");
        write_fixture(
            &minutes,
            "quiet 3.08.22.pdf",
            "V. Open Forum\nNo public comment.\nVI. Discussion Items",
        );

        let output = run(root.path(), &PlainTextProvider).unwrap();

        assert_eq!(output.stats.total_files, 3);
        assert_eq!(output.stats.processed_files, 0);
        assert_eq!(output.stats.skipped_files, 3);

        let reasons: Vec<&str> = output.skipped.iter().map(|s| s.reason).collect();
        assert!(reasons.contains(&SKIP_NO_TEXT));
        assert!(reasons.contains(&SKIP_NO_SECTION));
        assert!(reasons.contains(&SKIP_NO_COMMENTS));

        let stats = output.year_stats.get("2021-2022").unwrap();
        assert_eq!(stats.meetings_no_open_forum, 2);
        assert_eq!(stats.meetings_no_comments, 1);
    }

    #[test]
    fn minute_singular_fallback_and_missing_folder() {
        let root = tempfile::TempDir::new().unwrap();
        write_fixture(
            &root.path().join("2020-2021").join("Minute"),
            "Minutes 9.01.20.pdf",
            TWO_COMMENT_MINUTES,
        );
        // Year with neither folder contributes nothing but does not abort.
        fs::create_dir_all(root.path().join("2019-2020")).unwrap();

        let output = run(root.path(), &PlainTextProvider).unwrap();
        assert_eq!(output.stats.total_files, 1);
        assert!(output.years.contains_key("2020-2021"));
        assert!(!output.years.contains_key("2019-2020"));
    }

    #[test]
    fn flat_root_fallback() {
        let root = tempfile::TempDir::new().unwrap();
        write_fixture(root.path(), "March 5 2020 notes.pdf", TWO_COMMENT_MINUTES);

        let output = run(root.path(), &PlainTextProvider).unwrap();
        let bucket = output.years.get(FLAT_BUCKET).unwrap();
        assert_eq!(bucket.get("03.05.2020"), Some(&2));
    }

    #[test]
    fn missing_root_is_fatal() {
        assert!(run(Path::new("/definitely/not/a/real/root"), &PlainTextProvider).is_err());
    }

    #[test]
    fn non_pdf_files_are_ignored() {
        let root = tempfile::TempDir::new().unwrap();
        let minutes = root.path().join("2022-2023").join("Minutes");
        write_fixture(&minutes, "notes.txt", "not a pdf");
        write_fixture(&minutes, "Minutes 10.05.2022.PDF", TWO_COMMENT_MINUTES);

        let output = run(root.path(), &PlainTextProvider).unwrap();
        assert_eq!(output.stats.total_files, 1);
    }
}
