//! Prompt construction from the most-liked comments.

use crate::types::CommentView;

/// Default number of comments included in the prompt.
pub const DEFAULT_TOP_COMMENTS: usize = 30;

/// Per-comment character budget inside the prompt.
pub const MAX_COMMENT_CHARS: usize = 300;

const INSTRUCTIONS: &str = "You are a helpful assistant that summarizes YouTube comment sections.\n\
From the comments below:\n\
- Write a 4-line summary of the viewer sentiment and feedback.\n\
- Then give exactly 3 relevant keywords that reflect the overall comment themes.\n\n\
Format:\n\
Summary:\n\
[line 1]\n[line 2]\n[line 3]\n[line 4]\n\n\
Keywords: [keyword1], [keyword2], [keyword3]\n\n\
Comments:\n";

/// Builds the summarization prompt.
///
/// Comments are ranked by `like_count` descending (ties keep their
/// original order) and the first `top_n` are rendered as `- text` lines,
/// each trimmed, with newlines flattened to spaces and cut to
/// [`MAX_COMMENT_CHARS`] characters.
#[must_use]
pub fn build_prompt(comments: &[CommentView], top_n: usize) -> String {
    let mut ranked: Vec<&CommentView> = comments.iter().collect();
    ranked.sort_by(|a, b| b.like_count.cmp(&a.like_count));

    let lines: Vec<String> = ranked
        .into_iter()
        .take(top_n)
        .map(|c| format!("- {}", prompt_line(&c.text)))
        .collect();

    format!("{INSTRUCTIONS}{}", lines.join("\n"))
}

fn prompt_line(text: &str) -> String {
    text.trim()
        .replace('\n', " ")
        .chars()
        .take(MAX_COMMENT_CHARS)
        .collect()
}
