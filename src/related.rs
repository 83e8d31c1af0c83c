use std::cmp::Ordering;

use log::debug;

use crate::models::PostRecord;
use crate::taxonomy::normalize;

pub const DEFAULT_MAX: usize = 3;
pub const MIN_MAX: usize = 1;
pub const MAX_MAX: usize = 6;

/// How a candidate relates to the post being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    pub tag_overlap: usize,
    pub same_category: bool,
}

impl Signals {
    pub fn between(candidate: &PostRecord, current: &PostRecord) -> Self {
        let cat_a = normalize(candidate.category.as_deref().unwrap_or(""));
        let cat_b = normalize(current.category.as_deref().unwrap_or(""));
        let same_category = !cat_a.is_empty() && !cat_b.is_empty() && cat_a == cat_b;

        let current_tags = current.tag_keys();
        let tag_overlap = candidate
            .tag_keys()
            .iter()
            .filter(|t| current_tags.contains(*t))
            .count();

        Signals {
            tag_overlap,
            same_category,
        }
    }

    pub fn score(&self) -> usize {
        self.tag_overlap + usize::from(self.same_category)
    }
}

/// Parse a page-supplied limit ("3", "4px", "abc") into the allowed 1..=6 range.
/// Only the leading integer counts ("2.9" is 2). Missing, digitless or zero
/// values mean the default of 3.
pub fn clamp_max(raw: Option<&str>) -> usize {
    let parsed = raw
        .and_then(leading_int)
        .filter(|n| *n != 0)
        .unwrap_or(DEFAULT_MAX as i64);
    parsed.clamp(MIN_MAX as i64, MAX_MAX as i64) as usize
}

/// Optional sign followed by at least one digit; the rest is ignored.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // Overflow still means "a lot", which clamps the same way.
    let n = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -n } else { n })
}

/// First post whose URL (trailing slash ignored) equals `url`.
pub fn find_current<'a>(posts: &'a [PostRecord], url: &str) -> Option<&'a PostRecord> {
    let wanted = url.strip_suffix('/').unwrap_or(url);
    if wanted.is_empty() {
        return None;
    }
    posts.iter().find(|p| p.normalized_url() == wanted)
}

/// Rank every other post against `current` and keep the best `max_results`.
///
/// Order: shared tags, then same category, then newest, then title. Posts
/// with no relation at all are dropped, so an empty result is normal.
pub fn rank(posts: &[PostRecord], current: &PostRecord, max_results: usize) -> Vec<PostRecord> {
    let mut ranked: Vec<(&PostRecord, Signals, i64)> = posts
        .iter()
        .filter(|p| !is_same_post(p, current))
        .map(|p| (p, Signals::between(p, current), p.effective_timestamp()))
        .filter(|(_, signals, _)| signals.score() > 0)
        .collect();

    ranked.sort_by(|(a, sa, da), (b, sb, db)| {
        sb.tag_overlap
            .cmp(&sa.tag_overlap)
            .then_with(|| sb.same_category.cmp(&sa.same_category))
            .then_with(|| db.cmp(da))
            .then_with(|| compare_titles(a, b))
    });

    ranked
        .into_iter()
        .take(max_results)
        .map(|(p, _, _)| p.clone())
        .collect()
}

/// Look up the post at `url` and rank against it. `None` when the page is
/// not in the index, which hides the related section.
pub fn related_for_url(
    posts: &[PostRecord],
    url: &str,
    max_results: usize,
) -> Option<Vec<PostRecord>> {
    let current = find_current(posts, url)?;
    let related = rank(posts, current, max_results);
    debug!("{} related post(s) for {}", related.len(), url);
    Some(related)
}

// Same URL when the current post has one; otherwise fall back to identity.
fn is_same_post(candidate: &PostRecord, current: &PostRecord) -> bool {
    if std::ptr::eq(candidate, current) || candidate == current {
        return true;
    }
    let url = current.normalized_url();
    !url.is_empty() && candidate.normalized_url() == url
}

fn compare_titles(a: &PostRecord, b: &PostRecord) -> Ordering {
    a.sort_title()
        .to_lowercase()
        .cmp(&b.sort_title().to_lowercase())
}
