use serde::Serialize;

use crate::models::PostRecord;

use super::{normalize, slug_labels, slugify};

/// How a tag page was addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRef {
    /// A display label supplied by the page itself; used verbatim.
    Label(String),
    /// A slug from the query string; mapped back to its label when known.
    Slug(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct TagPage {
    pub label: String,
    pub slug: String,
    pub matches: Vec<PostRecord>,
}

/// Resolve a tag reference to its label and the posts carrying it.
///
/// An unknown slug falls back to the raw input as the label and yields no
/// matches, which renders as the empty "no notes" state.
pub fn resolve(posts: &[PostRecord], tag: &TagRef) -> TagPage {
    let label = match tag {
        TagRef::Label(label) => label.clone(),
        TagRef::Slug(requested) => slug_labels(posts)
            .remove(&slugify(requested))
            .unwrap_or_else(|| requested.clone()),
    };

    let key = normalize(&label);
    let mut matches: Vec<PostRecord> = if key.is_empty() {
        vec![]
    } else {
        posts.iter().filter(|p| p.has_tag(&key)).cloned().collect()
    };
    sort_newest_first(&mut matches);

    TagPage {
        slug: slugify(&label),
        label,
        matches,
    }
}

/// Effective date descending, then title case-insensitively.
pub(crate) fn sort_newest_first(posts: &mut [PostRecord]) {
    posts.sort_by(|a, b| {
        b.effective_timestamp()
            .cmp(&a.effective_timestamp())
            .then_with(|| {
                a.sort_title()
                    .to_lowercase()
                    .cmp(&b.sort_title().to_lowercase())
            })
    });
}
