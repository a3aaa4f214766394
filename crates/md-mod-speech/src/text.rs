use std::sync::LazyLock;

use regex::Regex;

/// Fenced code blocks, including one left open at the end of a turn
static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?(```|\z)").expect("invalid fence regex"));

static MARKDOWN_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_#`>~|]").expect("invalid markdown regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Plain narration text for a model turn: fenced blocks dropped, markdown
/// punctuation removed, whitespace collapsed.
pub fn narration_text(raw: &str) -> String {
    let without_blocks = FENCED_BLOCK.replace_all(raw, " ");
    let without_punct = MARKDOWN_PUNCT.replace_all(&without_blocks, "");
    WHITESPACE.replace_all(&without_punct, " ").trim().to_string()
}
