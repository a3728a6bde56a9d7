use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Numeric date patterns, most specific first. Each captures three groups
/// whose roles are resolved by `validate_candidate` (year position inferred
/// from group width).
static NUMERIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Separated M.D.YYYY / M-D-YYYY / M_D_YYYY / M/D/YYYY
        r"(\d{1,2})[.\-_/](\d{1,2})[.\-_/](\d{4})",
        // Separated M.D.YY
        r"(\d{1,2})[.\-_/](\d{1,2})[.\-_/](\d{2})",
        // Separated YYYY.M.D
        r"(\d{4})[.\-_/](\d{1,2})[.\-_/](\d{1,2})",
        // Whitespace tolerated around separators
        r"\s+(\d{1,2})[.\-_/]\s*(\d{1,2})[.\-_/]\s*(\d{4})",
        r"\s+(\d{1,2})[.\-_/]\s*(\d{1,2})[.\-_/]\s*(\d{2})",
        r"(\d{1,2})\s*[.\-_/]\s*(\d{1,2})\s*[.\-_/]\s*(\d{4})",
        r"(\d{1,2})\s*[.\-_/]\s*(\d{1,2})\s*[.\-_/]\s*(\d{2})",
        // Compact digit runs, decreasing length assumptions
        r"(\d{2})(\d{2})(\d{4})", // MMDDYYYY
        r"(\d)(\d{2})(\d{4})",    // MDDYYYY
        r"(\d{2})(\d)(\d{4})",    // MMDYYYY
        r"(\d)(\d)(\d{4})",       // MDYYYY
        r"(\d{2})(\d{2})(\d{2})", // MMDDYY
        // Words allowed around a separated date, e.g. "Minutes 1.2.21 draft"
        r"[a-zA-Z\s]+(\d{1,2})[.\-_/](\d{1,2})[.\-_/](\d{2,4})[a-zA-Z\s]*",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Month-name fallback: name, then a day and a year somewhere to its right.
/// Group 1 = day, group 2 = year (2 or 4 digits). Matched against the
/// lowercased filename.
static MONTH_PATTERNS: LazyLock<Vec<(Regex, u32)>> = LazyLock::new(|| {
    [
        (r"\b(?:jan|january)\b.*?(\d{1,2}).*?(\d{2,4})", 1u32),
        (r"\b(?:feb|february)\b.*?(\d{1,2}).*?(\d{2,4})", 2),
        (r"\b(?:mar|march)\b.*?(\d{1,2}).*?(\d{2,4})", 3),
        (r"\b(?:apr|april)\b.*?(\d{1,2}).*?(\d{2,4})", 4),
        (r"\b(?:may)\b.*?(\d{1,2}).*?(\d{2,4})", 5),
        (r"\b(?:jun|june)\b.*?(\d{1,2}).*?(\d{2,4})", 6),
        (r"\b(?:jul|july)\b.*?(\d{1,2}).*?(\d{2,4})", 7),
        (r"\b(?:aug|august)\b.*?(\d{1,2}).*?(\d{2,4})", 8),
        (r"\b(?:sep|september)\b.*?(\d{1,2}).*?(\d{2,4})", 9),
        (r"\b(?:oct|october)\b.*?(\d{1,2}).*?(\d{2,4})", 10),
        (r"\b(?:nov|november)\b.*?(\d{1,2}).*?(\d{2,4})", 11),
        (r"\b(?:dec|december)\b.*?(\d{1,2}).*?(\d{2,4})", 12),
    ]
    .iter()
    .map(|(p, m)| (Regex::new(p).unwrap(), *m))
    .collect()
});

/// Derive a `MM.DD.YYYY` date from a minutes filename. Total: falls back to
/// `"Unknown Date"` when nothing in the name validates as a real date.
pub fn extract_date(filename: &str) -> String {
    for re in NUMERIC_PATTERNS.iter() {
        for caps in re.captures_iter(filename) {
            let (g1, g2, g3) = (&caps[1], &caps[2], &caps[3]);
            if let Some(date) = validate_candidate(g1, g2, g3) {
                return date;
            }
        }
    }

    let lower = filename.to_lowercase();
    for (re, month) in MONTH_PATTERNS.iter() {
        if let Some(caps) = re.captures(&lower) {
            let Ok(day) = caps[1].parse::<u32>() else {
                continue;
            };
            let year_str = &caps[2];
            let Ok(mut year) = year_str.parse::<i32>() else {
                continue;
            };
            if year_str.len() == 2 {
                year = if year <= 50 { 2000 + year } else { 1900 + year };
            }
            if (1..=31).contains(&day) && (1990..=2030).contains(&year) {
                return format!("{:02}.{:02}.{}", month, day, year);
            }
        }
    }

    UNKNOWN_DATE.to_string()
}

/// Normalize one three-group candidate into `MM.DD.YYYY`, or reject it.
/// Group widths decide which group is the year; a 2-digit year is expanded
/// with a 1950 pivot. Month/day are swapped once if the month slot is out of
/// range but the day slot would fit.
fn validate_candidate(g1: &str, g2: &str, g3: &str) -> Option<String> {
    let (year, mut month, mut day): (i32, u32, u32) = if g3.len() == 4 {
        (g3.parse().ok()?, g1.parse().ok()?, g2.parse().ok()?)
    } else if g3.len() == 2 {
        let short: i32 = g3.parse().ok()?;
        let year = if short <= 50 { 2000 + short } else { 1900 + short };
        (year, g1.parse().ok()?, g2.parse().ok()?)
    } else if g1.len() == 4 {
        (g1.parse().ok()?, g2.parse().ok()?, g3.parse().ok()?)
    } else {
        return None;
    };

    if !(1..=12).contains(&month) {
        if (1..=12).contains(&day) {
            std::mem::swap(&mut month, &mut day);
        } else {
            return None;
        }
    }
    if !(1..=31).contains(&day) || !(1990..=2030).contains(&year) {
        return None;
    }
    // Rejects Feb 30 and friends.
    NaiveDate::from_ymd_opt(year, month, day)?;

    Some(format!("{:02}.{:02}.{}", month, day, year))
}

// ── Tests ──
