/// Typical reading speed for technical prose.
pub const WORDS_PER_MINUTE: usize = 200;

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated minutes to read `text`, never less than one.
pub fn minutes(text: &str) -> usize {
    word_count(text).div_ceil(WORDS_PER_MINUTE).max(1)
}

/// "4 min read"
pub fn label(text: &str) -> String {
    format!("{} min read", minutes(text))
}
