//! Parsing of the two-section `Summary:` / `Keywords:` model output.

use super::Summary;

const SUMMARY_MARKER: &str = "Summary:";
const KEYWORDS_MARKER: &str = "Keywords:";

/// Maximum number of keywords kept from the model output.
pub const MAX_KEYWORDS: usize = 3;

/// Splits model output into a summary and up to [`MAX_KEYWORDS`] keywords.
///
/// When both markers are present, the summary is everything before the
/// first `Keywords:` with `Summary:` removed and whitespace trimmed, and
/// the keywords are the comma-separated entries up to the next `Keywords:`
/// (if any), each trimmed, keeping empty entries. Otherwise the whole
/// trimmed text is the summary and there are no keywords.
#[must_use]
pub fn parse_response(text: &str) -> Summary {
    let text = text.trim();

    if !(text.contains(SUMMARY_MARKER) && text.contains(KEYWORDS_MARKER)) {
        return Summary {
            summary: text.to_string(),
            keywords: Vec::new(),
        };
    }

    let mut sections = text.split(KEYWORDS_MARKER);
    let summary = sections
        .next()
        .unwrap_or_default()
        .replace(SUMMARY_MARKER, "")
        .trim()
        .to_string();

    let keywords = sections
        .next()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .take(MAX_KEYWORDS)
        .map(ToOwned::to_owned)
        .collect();

    Summary { summary, keywords }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_response() {
        let parsed = parse_response("Summary:\nA\nB\nC\nD\n\nKeywords: fun, great, funny");
        assert_eq!(parsed.summary, "A\nB\nC\nD");
        assert_eq!(parsed.keywords, vec!["fun", "great", "funny"]);
    }

    #[test]
    fn keeps_at_most_three_keywords() {
        let parsed = parse_response("Summary: ok\nKeywords: a, b, c, d, e");
        assert_eq!(parsed.keywords, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_keyword_entries_are_kept_in_position() {
        let parsed = parse_response("Summary: x\nKeywords: a,, b, c");
        assert_eq!(parsed.keywords, vec!["a", "", "b"]);

        let parsed = parse_response("Summary:  ok\nKeywords:  music , vibes  ,\n");
        assert_eq!(parsed.keywords, vec!["music", "vibes", ""]);
    }

    #[test]
    fn bare_keywords_marker_yields_one_empty_keyword() {
        let parsed = parse_response("Summary: x\nKeywords:");
        assert_eq!(parsed.summary, "x");
        assert_eq!(parsed.keywords, vec![""]);
    }

    #[test]
    fn missing_keywords_marker_falls_back_to_full_text() {
        let raw = "  Summary:\nPeople loved it.\n  ";
        let parsed = parse_response(raw);
        assert_eq!(parsed.summary, "Summary:\nPeople loved it.");
        assert!(parsed.keywords.is_empty());
    }

    #[test]
    fn missing_summary_marker_falls_back_to_full_text() {
        let parsed = parse_response("Viewers liked it.\nKeywords: a, b, c");
        assert_eq!(parsed.summary, "Viewers liked it.\nKeywords: a, b, c");
        assert!(parsed.keywords.is_empty());
    }

    #[test]
    fn empty_response_yields_empty_summary() {
        let parsed = parse_response("   ");
        assert_eq!(parsed.summary, "");
        assert!(parsed.keywords.is_empty());
    }

    #[test]
    fn only_first_keywords_section_is_used() {
        let parsed = parse_response("Summary: x\nKeywords: a, b\nKeywords: c");
        assert_eq!(parsed.summary, "x");
        assert_eq!(parsed.keywords, vec!["a", "b"]);
    }

    #[test]
    fn keywords_section_runs_to_end_of_text() {
        let parsed = parse_response("Intro\nKeywords: a, b, c\nSummary: late");
        assert_eq!(parsed.summary, "Intro");
        assert_eq!(parsed.keywords, vec!["a", "b", "c\nSummary: late"]);
    }
}
