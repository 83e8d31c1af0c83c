use std::sync::OnceLock;

use regex::Regex;

/// Case-fold key used for every tag/category/query comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

struct SlugPatterns {
    disallowed: Regex,
    whitespace: Regex,
    hyphens: Regex,
}

fn patterns() -> &'static SlugPatterns {
    static PATTERNS: OnceLock<SlugPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SlugPatterns {
        disallowed: Regex::new(r"[^a-z0-9\s-]").expect("static slug pattern"),
        whitespace: Regex::new(r"\s+").expect("static slug pattern"),
        hyphens: Regex::new(r"-+").expect("static slug pattern"),
    })
}

/// URL-safe tag slug: `"Rust & Go "` -> `"rust-and-go"`.
///
/// Output only ever contains `[a-z0-9-]`, never starts or ends with a hyphen,
/// and slugifying a slug returns it unchanged. An empty result means the
/// text has no linkable form.
pub fn slugify(text: &str) -> String {
    let p = patterns();
    let s = normalize(text).replace('&', "and");
    let s = p.disallowed.replace_all(&s, "");
    let s = p.whitespace.replace_all(&s, "-");
    let s = p.hyphens.replace_all(&s, "-");
    s.trim_matches('-').to_string()
}
