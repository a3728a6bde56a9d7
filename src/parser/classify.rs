use std::sync::LazyLock;

use regex::Regex;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Phrases that explicitly declare an empty forum.
static NO_COMMENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:no open forum|no comments?|none|n/?a|not applicable)\b",
        r"(?i)\b(?:no public comment|no discussion|no speakers?)\b",
        r"(?i)\b(?:no one spoke|no attendees|no participants)\b",
        r"(?i)^\s*(?:none|n/?a)\s*\.?\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Whole-section shapes that are pure boilerplate.
static ADMIN_ONLY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^[A-Za-z0-9\s\-:]+envelope\s+id[:\s]*[A-Za-z0-9\-]+\s*$",
        r"(?i)^page\s+\d+\s*$",
        r"(?i)^continued\s*$",
        r"(?i)^end\s*$",
        r"^\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const ADMIN_WORDS: &[&str] = &["docusign", "envelope", "id", "page", "continued", "end"];

/// Short-paragraph administrative markers (applied below 50 chars).
static ADMIN_PARA_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"docusign\s+envelope\s+id:",
        r"page\s+\d+",
        r"^continued\s*$",
        r"^end\s*$",
        r"^\s*\d+\s*$",
        r"meeting\s+id:",
        r"zoom\s+call:",
        r"passcode:",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Boilerplate stripped from long paragraphs before measuring what is left.
static ADMIN_STRIP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"docusign\s+envelope\s+id:\s*[a-f0-9\-]+",
        r"page\s+\d+",
        r"meeting\s+id:\s*\d+",
        r"zoom\s+call:\s*https?://\S+",
        r"passcode:\s*\w+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// True when the section text explicitly states there were no comments.
pub fn has_explicit_no_comments(text: &str) -> bool {
    NO_COMMENT_PATTERNS.iter().any(|re| re.is_match(text))
}

/// True when the section holds nothing but document boilerplate: too short to
/// carry a comment, a single admin line, or fewer than three words once every
/// admin-marker token is discarded.
pub fn is_only_administrative(text: &str) -> bool {
    let clean = WS_RE.replace_all(text.trim(), " ").into_owned();

    if clean.chars().count() < 10 {
        return true;
    }
    if ADMIN_ONLY_PATTERNS.iter().any(|re| re.is_match(&clean)) {
        return true;
    }

    let lower = clean.to_lowercase();
    let non_admin = lower
        .split_whitespace()
        .filter(|w| !ADMIN_WORDS.iter().any(|a| w.contains(a)))
        .count();
    non_admin < 3
}

/// Section-level emptiness: explicit "no comments" first, then the
/// administrative-only check.
pub fn is_empty_section(text: &str) -> bool {
    has_explicit_no_comments(text) || is_only_administrative(text)
}

/// Per-paragraph administrative check used by the segmenter.
///
/// Short paragraphs (< 50 chars) are administrative if they contain any admin
/// marker. Long paragraphs (> 100 chars) are kept whenever at least 80 chars
/// of content remain after stripping the known boilerplate; note that the
/// long branch can only vote "not administrative" — a long paragraph stuffed
/// entirely with boilerplate still passes. That matches the observed source
/// behavior and is kept as-is pending clarification.
pub fn is_admin_paragraph(paragraph: &str) -> bool {
    let clean = paragraph.trim().to_lowercase();
    let len = clean.chars().count();

    if len < 50 {
        return ADMIN_PARA_PATTERNS.iter().any(|re| re.is_match(&clean));
    }

    if len > 100 {
        let mut residue = clean.clone();
        for re in ADMIN_STRIP_PATTERNS.iter() {
            residue = re.replace_all(&residue, "").into_owned();
        }
        let residue = WS_RE.replace_all(residue.trim(), " ").into_owned();
        if residue.chars().count() > 80 {
            return false;
        }
    }

    false
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_no_comment_phrases() {
        assert!(has_explicit_no_comments("No public comment this meeting."));
        assert!(has_explicit_no_comments("There were no speakers."));
        assert!(has_explicit_no_comments("  None.  "));
        assert!(has_explicit_no_comments("N/A"));
        assert!(!has_explicit_no_comments(
            "A resident asked about the new bus route and the committee responded."
        ));
    }

    #[test]
    fn short_text_is_administrative() {
        assert!(is_only_administrative("   \n "));
        assert!(is_only_administrative("end"));
    }

    #[test]
    fn admin_only_lines() {
        assert!(is_only_administrative("Page 3"));
        assert!(is_only_administrative("DocuSign Envelope ID: 5F2A-99C1-B2"));
    }

    #[test]
    fn few_non_admin_words() {
        // Everything except "of" is an admin-marker token.
        assert!(is_only_administrative("docusign envelope id of page continued"));
    }

    #[test]
    fn real_comments_are_not_administrative() {
        let text = "A parent asked whether the new crossing guard schedule would \
                    continue through the spring semester and requested an update.";
        assert!(!is_only_administrative(text));
        assert!(!has_explicit_no_comments(text));
    }

    #[test]
    fn predicates_are_pure() {
        let text = "Page 2";
        let first = is_only_administrative(text);
        for _ in 0..3 {
            assert_eq!(is_only_administrative(text), first);
        }
    }

    #[test]
    fn short_admin_paragraphs() {
        assert!(is_admin_paragraph("Meeting ID: 829 4412"));
        assert!(is_admin_paragraph("Passcode: forum22"));
        assert!(is_admin_paragraph("42"));
        assert!(!is_admin_paragraph("Jo asked about the pool hours."));
    }

    #[test]
    fn long_paragraph_with_substance_is_kept() {
        let text = "DocuSign Envelope ID: ab12-cd34 A community member spoke at length \
                    about pedestrian safety near the elementary school, citing three \
                    near-miss incidents and asking the committee to request a traffic study.";
        assert!(!is_admin_paragraph(text));
    }

    #[test]
    fn mid_length_paragraph_is_never_administrative() {
        // 50..=100 chars falls between both branches and is always kept.
        let text = "Page 2 Page 3 Page 4 Page 5 Page 6 Page 7 Page 8 Page 9 Page 10 and.";
        assert!(!is_admin_paragraph(text));
    }
}
