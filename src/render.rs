use url::form_urlencoded;

use crate::config::Config;
use crate::models::{PostRecord, TagEntry};
use crate::taxonomy::TagPage;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Percent-encode a single query value.
pub fn encode_component(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// `/blog/tags/tag.html?tag=<slug>`
pub fn tag_url(cfg: &Config, slug: &str) -> String {
    format!("{}?tag={}", cfg.tag_page_path, encode_component(slug))
}

fn hint(inner: &str) -> String {
    format!(r#"<div class="blog-search-hint">{}</div>"#, inner)
}

// ── Search ──────────────────────────────────────────────

pub fn search_prompt() -> String {
    hint("Type to search posts…")
}

/// Result list for the search box. An empty `query` renders the prompt.
pub fn search_results(query: &str, results: &[PostRecord]) -> String {
    if query.trim().is_empty() {
        return search_prompt();
    }
    if results.is_empty() {
        return hint(&format!("No matches for “{}”.", html_escape(query.trim())));
    }

    let mut html = String::from("<ul>");
    for post in results {
        let category = html_escape(post.category.as_deref().unwrap_or(""));
        let date = html_escape(post.effective_date().unwrap_or(""));
        let sep = if !category.is_empty() && !date.is_empty() {
            " &middot; "
        } else {
            ""
        };
        let desc = post.description.as_deref().unwrap_or("");

        html.push_str(&format!(
            concat!(
                r#"<li><a href="{url}"><div class="result-title">{title}</div>{desc}"#,
                r#"<div class="result-meta">{category}{sep}{date}</div></a></li>"#,
            ),
            url = html_escape(post.url.as_deref().unwrap_or("#")),
            title = html_escape(post.display_title()),
            desc = if desc.is_empty() {
                String::new()
            } else {
                format!("<div>{}</div>", html_escape(desc))
            },
            category = category,
            sep = sep,
            date = date,
        ));
    }
    html.push_str("</ul>");
    html
}

// ── Tags ────────────────────────────────────────────────

/// Card grid for the tags index page.
pub fn tag_index(entries: &[TagEntry], cfg: &Config) -> String {
    if entries.is_empty() {
        return hint(
            "No tags found yet. Add tags to <code>blog/posts.json</code> and they'll show up here.",
        );
    }

    entries
        .iter()
        .map(|t| {
            let label = html_escape(&t.label);
            format!(
                concat!(
                    r#"<a class="notes-card" href="{url}"><h2>{label}</h2>"#,
                    r#"<p>Browse notes tagged “{label}”.</p>"#,
                    r#"<span class="notes-meta">{meta}</span></a>"#,
                ),
                url = html_escape(&tag_url(cfg, &t.slug)),
                label = label,
                meta = html_escape(&t.count_label()),
            )
        })
        .collect()
}

pub fn missing_tag(cfg: &Config) -> String {
    hint(&format!(
        r#"Missing tag. <a href="{}">Browse all tags</a>."#,
        html_escape(&cfg.tags_index_path)
    ))
}

/// Posts on a single tag page, or the friendly empty state.
pub fn tag_page(page: &TagPage, cfg: &Config) -> String {
    if page.matches.is_empty() {
        return hint(&format!(
            r#"No notes found for “{}” yet. <a href="{}">Browse all notes</a>."#,
            html_escape(&page.label),
            html_escape(&cfg.blog_path)
        ));
    }

    page.matches
        .iter()
        .map(|p| {
            let category = html_escape(p.category.as_deref().unwrap_or(""));
            let meta = if category.is_empty() {
                "Tagged".to_string()
            } else {
                format!("{} · Tagged", category)
            };
            card(p, Some(meta.as_str()))
        })
        .collect()
}

// ── Related ─────────────────────────────────────────────

/// `None` means the section should stay hidden.
pub fn related_section(posts: &[PostRecord]) -> Option<String> {
    if posts.is_empty() {
        return None;
    }
    let cards: String = posts
        .iter()
        .map(|p| {
            let meta = html_escape(p.category.as_deref().unwrap_or(""));
            card(p, if meta.is_empty() { None } else { Some(meta.as_str()) })
        })
        .collect();
    Some(format!(
        r#"<h2>Related notes</h2><div class="notes-grid">{}</div>"#,
        cards
    ))
}

/// `meta` is expected to be escaped already.
fn card(post: &PostRecord, meta: Option<&str>) -> String {
    let desc = post.description.as_deref().unwrap_or("");
    format!(
        r#"<a class="notes-card" href="{url}"><h2>{title}</h2>{desc}{meta}</a>"#,
        url = html_escape(post.url.as_deref().unwrap_or("#")),
        title = html_escape(post.display_title()),
        desc = if desc.is_empty() {
            String::new()
        } else {
            format!("<p>{}</p>", html_escape(desc))
        },
        meta = meta
            .map(|m| format!(r#"<span class="notes-meta">{}</span>"#, m))
            .unwrap_or_default(),
    )
}
