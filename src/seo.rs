use serde::Serialize;

use crate::config::Config;
use crate::render::{encode_component, html_escape};
use crate::taxonomy::slugify;

/// Page metadata for a resolved tag page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagPageMeta {
    pub label: String,
    pub slug: String,
    pub heading: String,
    pub breadcrumb: String,
    pub intro: String,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
}

impl TagPageMeta {
    /// `None` for a blank label; the page keeps its static metadata.
    pub fn for_label(label: &str, cfg: &Config) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }

        let slug = slugify(label);
        let canonical_url = format!(
            "{}{}?tag={}",
            cfg.site_url.trim_end_matches('/'),
            cfg.tag_page_path,
            encode_component(if slug.is_empty() { label } else { slug.as_str() })
        );

        Some(TagPageMeta {
            label: label.to_string(),
            heading: format!("Tag: {}", label),
            breadcrumb: label.to_string(),
            intro: format!("Notes grouped under the “{}” tag.", label),
            title: format!("Tag: {} | {}", label, cfg.author),
            description: format!("Notes tagged {} by {}.", label, cfg.author),
            canonical_url,
            slug,
        })
    }

    /// Head tags: title, description, canonical link and Open Graph.
    pub fn to_html(&self) -> String {
        format!(
            r#"<title>{title}</title>
<meta name="description" content="{desc}">
<link rel="canonical" href="{url}">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{desc}">
<meta property="og:url" content="{url}">"#,
            title = html_escape(&self.title),
            desc = html_escape(&self.description),
            url = html_escape(&self.canonical_url),
        )
    }
}
