use url::{Position, Url};

use crate::taxonomy::TagRef;

const RELATIVE_BASE: &str = "http://localhost/";

// Page URLs may be absolute or site-relative ("/blog/search.html?q=tls").
fn parse_page_url(page_url: &str) -> Option<(Url, bool)> {
    match Url::parse(page_url) {
        Ok(u) => Some((u, false)),
        Err(_) => Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(page_url))
            .ok()
            .map(|u| (u, true)),
    }
}

fn first_param(url: &Url, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Search text carried in `?q=` (or the older `?query=`).
pub fn search_query(page_url: &str) -> String {
    parse_page_url(page_url)
        .and_then(|(u, _)| first_param(&u, &["q", "query"]))
        .unwrap_or_default()
}

/// The page URL rewritten so the current search can be shared.
/// A blank `value` removes the search parameters altogether.
pub fn shareable_search_url(page_url: &str, value: &str) -> String {
    let (mut url, relative) = match parse_page_url(page_url) {
        Some(parsed) => parsed,
        None => return page_url.to_string(),
    };

    let value = value.trim();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "q" && k != "query")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.set_query(None);
    if !kept.is_empty() || !value.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        if !value.is_empty() {
            pairs.append_pair("q", value);
        }
    }

    if relative {
        url[Position::BeforePath..].to_string()
    } else {
        url.to_string()
    }
}

/// Which tag a tag page shows: a label set on the page itself wins, then
/// `?tag=` (or `?t=`) read as a slug. `None` renders the "missing tag" hint.
pub fn tag_ref(page_attr: Option<&str>, page_url: &str) -> Option<TagRef> {
    if let Some(label) = page_attr.map(str::trim).filter(|a| !a.is_empty()) {
        return Some(TagRef::Label(label.to_string()));
    }
    parse_page_url(page_url)
        .and_then(|(u, _)| first_param(&u, &["tag", "t"]))
        .map(TagRef::Slug)
}
