use crate::models::PostRecord;
use crate::taxonomy::normalize;

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Substring search over title, description, category and tags.
///
/// Case-insensitive, no tokenization and no relevance ranking: the first
/// `max_results` matches in index order are returned. A blank query returns
/// nothing so the caller can show its prompt instead.
pub fn search(posts: &[PostRecord], query: &str, max_results: usize) -> Vec<PostRecord> {
    let q = normalize(query);
    if q.is_empty() {
        return vec![];
    }

    posts
        .iter()
        .filter(|p| normalize(&p.search_haystack()).contains(&q))
        .take(max_results)
        .cloned()
        .collect()
}
