use std::sync::LazyLock;

use regex::Regex;

/// Boundary-pattern cascade for the Open Forum section, priority order.
/// Group 1 is the section body; the trailing non-capturing alternation is the
/// next-section terminator (consumed, but never returned, so it behaves like
/// the lookahead it replaces).
///
/// Some source PDFs come out with a constant letter shift ("Open Forum" →
/// "OSHQ FRUXP"); the middle entries match those corrupted headers by shape
/// or literally, without attempting any encoding repair.
static SECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Roman-numeral header
        r"(?is)V\.\s*Open Forum(.*?)(?:VI\.|Discussion Item|VII\.|Action Items|Motion|Adjournment|\z)",
        // Arabic header
        r"(?is)5\.\s*Open Forum(.*?)(?:6\.|Discussion Item|7\.|Action Items|Motion|Adjournment|\z)",
        // Bare header
        r"(?is)Open Forum(.*?)(?:Discussion Item|Action Items|Motion|Adjournment|Next Meeting|\z)",
        // Corrupted header shape: 4-letter + 5-letter all-caps tokens
        r"(?is)V\.\s*[A-Z]{4}\s+[A-Z]{5}(.*?)(?:VI\.|Discussion Item|VII\.|Action Items|Motion|Adjournment|\z)",
        r"(?is)5\.\s*[A-Z]{4}\s+[A-Z]{5}(.*?)(?:6\.|Discussion Item|7\.|Action Items|Motion|Adjournment|\z)",
        r"(?is)9\.\s*[A-Z]{4}\s+[A-Z]{5}(.*?)(?:VI\.|Discussion Item|VII\.|Action Items|Motion|Adjournment|9I\.|10\.|AQQRXQFHPHQWV|AGMRXUQPHQW|\z)",
        // Literal corrupted header observed in the wild
        r"(?is)9\.\s*OSHQ\s+FRUXP(.*?)(?:9I\.|VI\.|Discussion Item|VII\.|Action Items|Motion|Adjournment|AQQRXQFHPHQWV|AGMRXUQPHQW|\z)",
        // Maximally permissive fallbacks
        r"(?is)[IV]*\.\s*[Oo]pen\s+[Ff]orum(.*?)(?:[IV]*\.|Discussion|Action|Motion|Adjournment|Next Meeting|\z)",
        r"(?is)\d+\.\s*[Oo]pen\s+[Ff]orum(.*?)(?:\d+\.|Discussion|Action|Motion|Adjournment|Next Meeting|\z)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Locate the Open Forum span in a full minutes text. First pattern in
/// priority order wins; the captured body is returned trimmed. `None` when no
/// pattern matches anywhere.
pub fn locate_open_forum(text: &str) -> Option<String> {
    for (i, re) in SECTION_PATTERNS.iter().enumerate() {
        if let Some(caps) = re.captures(text) {
            let body = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            tracing::debug!(pattern = i + 1, chars = body.len(), "open forum section matched");
            return Some(body.to_string());
        }
    }
    None
}

// ── Tests ──
