use std::collections::{HashMap, HashSet};

use crate::models::{PostRecord, TagEntry};

use super::{normalize, slugify};

/// Build the tags index from scratch.
///
/// The first post to use a tag (compared case-insensitively) fixes its
/// displayed label; `count` is the number of posts carrying the tag. Tags
/// that slugify to nothing are left out since they cannot be linked to.
pub fn aggregate(posts: &[PostRecord]) -> Vec<TagEntry> {
    let mut entries: Vec<TagEntry> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for post in posts {
        let mut seen_in_post: HashSet<String> = HashSet::new();
        for tag in &post.tags {
            let key = normalize(tag);
            if key.is_empty() || !seen_in_post.insert(key.clone()) {
                continue;
            }
            match by_key.get(&key) {
                Some(&idx) => entries[idx].count += 1,
                None => {
                    by_key.insert(key, entries.len());
                    entries.push(TagEntry {
                        label: tag.trim().to_string(),
                        slug: slugify(tag),
                        count: 1,
                    });
                }
            }
        }
    }

    entries.retain(|e| !e.slug.is_empty());
    entries.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.label.cmp(&b.label))
    });
    entries
}

/// Slug -> label lookup for tag pages, first-seen label wins on collisions
/// (e.g. "C" and "C++" both slug to "c").
pub fn slug_labels(posts: &[PostRecord]) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();
    for post in posts {
        for tag in &post.tags {
            let label = tag.trim();
            if label.is_empty() {
                continue;
            }
            let slug = slugify(label);
            if slug.is_empty() {
                continue;
            }
            map.entry(slug).or_insert_with(|| label.to_string());
        }
    }
    map
}
