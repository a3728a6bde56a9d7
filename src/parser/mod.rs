pub mod classify;
pub mod dates;
pub mod forum;
pub mod segment;

/// How one document's Open Forum section resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForumOutcome {
    /// Section found, with an estimated number of distinct comments.
    Comments(usize),
    /// Section found but explicitly empty or purely administrative, or no
    /// paragraph survived segmentation.
    NoComments,
    /// No Open Forum marker anywhere in the text (or the span was blank).
    NoSection,
}

/// Three-pass pipeline over one document's extracted text:
/// locate the Open Forum span, classify emptiness, segment into comments.
pub fn analyze_text(text: &str) -> ForumOutcome {
    let Some(span) = forum::locate_open_forum(text) else {
        return ForumOutcome::NoSection;
    };
    if span.is_empty() {
        return ForumOutcome::NoSection;
    }
    if classify::is_empty_section(&span) {
        return ForumOutcome::NoComments;
    }
    match segment::count_comments(&span) {
        0 => ForumOutcome::NoComments,
        n => ForumOutcome::Comments(n),
    }
}

// ── Tests ──
