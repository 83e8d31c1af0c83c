use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::taxonomy::normalize;

/// One entry of the blog's `posts.json` index.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_published: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_modified: Option<String>,
}

impl PostRecord {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => "Untitled",
        }
    }

    /// Raw title used for sorting; absent sorts as the empty string.
    pub fn sort_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// URL with a single trailing slash removed. Empty when absent.
    pub fn normalized_url(&self) -> &str {
        let url = self.url.as_deref().unwrap_or("");
        url.strip_suffix('/').unwrap_or(url)
    }

    /// `dateModified` when present, otherwise `datePublished`.
    pub fn effective_date(&self) -> Option<&str> {
        self.date_modified
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| self.date_published.as_deref())
    }

    /// Effective date as epoch milliseconds; 0 when absent or unparsable.
    pub fn effective_timestamp(&self) -> i64 {
        self.effective_date().map(parse_timestamp).unwrap_or(0)
    }

    /// Distinct normalized tags, blanks dropped.
    pub fn tag_keys(&self) -> HashSet<String> {
        self.tags
            .iter()
            .map(|t| normalize(t))
            .filter(|t| !t.is_empty())
            .collect()
    }

    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.iter().any(|t| normalize(t) == key)
    }

    /// Space-joined text the search filter matches against.
    pub fn search_haystack(&self) -> String {
        let mut parts: Vec<&str> = vec![
            self.title.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or(""),
        ];
        parts.extend(self.tags.iter().map(|t| t.as_str()));
        parts.join(" ")
    }
}

/// Parse the date formats found in post front matter into epoch millis.
/// Returns 0 for anything unrecognised.
pub fn parse_timestamp(raw: &str) -> i64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.timestamp_millis();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return ndt.and_utc().timestamp_millis();
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d
            .and_hms_opt(0, 0, 0)
            .map(|ndt| ndt.and_utc().timestamp_millis())
            .unwrap_or(0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return dt.timestamp_millis();
    }
    0
}

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&v))
}

// Hand-edited indexes sometimes carry `"tags": "rust"` or `null`; treat as no tags.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        _ => vec![],
    })
}
