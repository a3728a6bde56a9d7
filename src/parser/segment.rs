use std::sync::LazyLock;

use regex::Regex;

use super::classify::{is_admin_paragraph, is_empty_section};

static PARA_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n|\r\n\s*\r\n").unwrap());

static PAGE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:page \d+|continued|end)\s*$").unwrap());

/// Speaker-change boundaries. The split point is the start of the captured
/// capitalized clause (the `regex` crate has no look-around, so the
/// sentence-ending period and newline are matched outright and the clause
/// offset is taken from the capture).
static BOUNDARY_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\.\s*\n([A-Z][a-zA-Z\s,&]+ (?:meeting times? were asked by|was asked by|asked by|stated by))",
        r"\.\s*\n(Per [A-Z][a-zA-Z\s,]+,)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const MIN_PARAGRAPH_CHARS: usize = 20;
const MIN_COMMENT_CHARS: usize = 30;

/// Estimate the number of distinct comments in a non-empty Open Forum span.
/// Paragraphs are blank-line separated; each surviving paragraph is further
/// split only at unambiguous speaker-attribution boundaries. Deliberately
/// conservative: under-counting beats fragmenting one comment into many.
pub fn count_comments(span: &str) -> usize {
    // Guard against being handed an unclassified span: an explicit "no
    // comments" statement or pure boilerplate counts as zero regardless of
    // who calls this.
    if span.trim().is_empty() || is_empty_section(span) {
        return 0;
    }

    let mut count = 0;
    for para in PARA_SPLIT_RE.split(span) {
        let para = para.trim();
        if para.chars().count() <= MIN_PARAGRAPH_CHARS
            || PAGE_MARKER_RE.is_match(para)
            || is_admin_paragraph(para)
        {
            continue;
        }
        count += split_at_speaker_boundaries(para).len();
    }
    count
}

/// Split one paragraph at clear speaker changes. Pieces of 30 chars or fewer
/// are dropped; when no boundary exists, or nothing substantial survives, the
/// whole paragraph stands as a single comment unit.
fn split_at_speaker_boundaries(paragraph: &str) -> Vec<String> {
    let mut split_points: Vec<usize> = Vec::new();
    for re in BOUNDARY_RES.iter() {
        for caps in re.captures_iter(paragraph) {
            if let Some(clause) = caps.get(1) {
                split_points.push(clause.start());
            }
        }
    }
    split_points.sort_unstable();
    split_points.dedup();

    if split_points.is_empty() {
        return single_unit(paragraph);
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for boundary in split_points {
        if start < boundary {
            push_if_substantial(&mut pieces, &paragraph[start..boundary]);
        }
        start = boundary;
    }
    if start < paragraph.len() {
        push_if_substantial(&mut pieces, &paragraph[start..]);
    }

    if pieces.is_empty() {
        return single_unit(paragraph);
    }
    pieces
}

fn push_if_substantial(pieces: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if piece.chars().count() > MIN_COMMENT_CHARS {
        pieces.push(piece.to_string());
    }
}

fn single_unit(paragraph: &str) -> Vec<String> {
    let trimmed = paragraph.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    }
}

// ── Tests ──
