use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, info, warn};
use serde_json::Value;

use crate::models::PostRecord;

pub mod file;
pub mod http;

pub use file::FileSource;
pub use http::HttpSource;

/// The two ways loading the index can go wrong. Both end in the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Network/I/O error or a non-success HTTP status.
    Fetch(String),
    /// Body is not JSON, or not a JSON array.
    Parse(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Fetch(e) => write!(f, "fetch failed: {}", e),
            LoadError::Parse(e) => write!(f, "parse failed: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

/// Where the raw index body comes from.
/// Implementations: `HttpSource` (reqwest, no caching), `FileSource` (local disk).
pub trait IndexSource: Send + Sync {
    fn fetch(&self, location: &str) -> Result<String, LoadError>;
}

/// Picks HTTP for `http(s)://` locations and the filesystem for everything else.
pub struct DefaultSource {
    http: HttpSource,
    file: FileSource,
}

impl DefaultSource {
    pub fn new(http: HttpSource) -> Self {
        DefaultSource {
            http,
            file: FileSource,
        }
    }
}

impl IndexSource for DefaultSource {
    fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}

/// Loads and memoizes the post index per source location.
///
/// The fallback is handed in at construction and returned whenever the
/// source is blank or loading fails. Only successful loads are cached, so a
/// transient failure is retried on the next call rather than pinned.
pub struct PostStore {
    source: Box<dyn IndexSource>,
    fallback: Arc<Vec<PostRecord>>,
    cache: DashMap<String, Arc<Vec<PostRecord>>>,
}

impl PostStore {
    pub fn new(source: Box<dyn IndexSource>, fallback: Vec<PostRecord>) -> Self {
        PostStore {
            source,
            fallback: Arc::new(fallback),
            cache: DashMap::new(),
        }
    }

    pub fn fallback(&self) -> Arc<Vec<PostRecord>> {
        self.fallback.clone()
    }

    pub fn load(&self, location: Option<&str>) -> Arc<Vec<PostRecord>> {
        let location = match location.map(str::trim) {
            Some(l) if !l.is_empty() => l,
            _ => return self.fallback(),
        };

        if let Some(posts) = self.cache.get(location) {
            return posts.clone();
        }

        match self.source.fetch(location).and_then(|body| parse_index(&body)) {
            Ok(posts) => {
                info!("Loaded {} post(s) from {}", posts.len(), location);
                let posts = Arc::new(posts);
                self.cache.insert(location.to_string(), posts.clone());
                posts
            }
            Err(e) => {
                warn!("Post index {} unavailable ({}), using fallback", location, e);
                self.fallback()
            }
        }
    }

    /// Number of memoized sources.
    pub fn cached_sources(&self) -> usize {
        self.cache.len()
    }
}

/// Parse a `posts.json` body. Entries that are not objects are skipped.
pub fn parse_index(body: &str) -> Result<Vec<PostRecord>, LoadError> {
    let json: Value = serde_json::from_str(body).map_err(|e| LoadError::Parse(e.to_string()))?;
    let items = match json {
        Value::Array(items) => items,
        other => {
            return Err(LoadError::Parse(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut posts = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            debug!("Skipping index entry {}: not an object", i);
            continue;
        }
        match serde_json::from_value::<PostRecord>(item) {
            Ok(p) => posts.push(p),
            Err(e) => debug!("Skipping index entry {}: {}", i, e),
        }
    }
    Ok(posts)
}

/// Read the static fallback index. Any failure yields an empty index.
pub fn load_fallback(path: Option<&str>) -> Vec<PostRecord> {
    let path = match path.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => return vec![],
    };
    match FileSource.fetch(path).and_then(|body| parse_index(&body)) {
        Ok(posts) => posts,
        Err(e) => {
            warn!("Fallback index {} not loaded: {}", path, e);
            vec![]
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fixed body (or error) and counts fetches.
    struct StubSource {
        body: Result<String, LoadError>,
        calls: Arc<AtomicUsize>,
    }

    impl IndexSource for StubSource {
        fn fetch(&self, _location: &str) -> Result<String, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body.clone()
        }
    }

    fn stub_store(body: Result<&str, LoadError>) -> (PostStore, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = StubSource {
            body: body.map(|b| b.to_string()),
            calls: calls.clone(),
        };
        let fallback = vec![PostRecord {
            title: Some("Fallback".to_string()),
            url: Some("/blog/fallback.html".to_string()),
            ..Default::default()
        }];
        (PostStore::new(Box::new(source), fallback), calls)
    }

    // ── Fallback ────────────────────────────────────────────────────

    #[test]
    fn test_blank_location_uses_fallback_without_fetching() {
        let (store, calls) = stub_store(Ok("[]"));
        assert_eq!(store.load(None)[0].display_title(), "Fallback");
        assert_eq!(store.load(Some("   "))[0].display_title(), "Fallback");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fetch_failure_uses_fallback() {
        let (store, _) = stub_store(Err(LoadError::Fetch("HTTP 404".to_string())));
        let posts = store.load(Some("https://example.com/posts.json"));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].display_title(), "Fallback");
        assert_eq!(store.cached_sources(), 0);
    }

    #[test]
    fn test_malformed_json_uses_fallback() {
        let (store, _) = stub_store(Ok("{not json"));
        assert_eq!(store.load(Some("posts.json"))[0].display_title(), "Fallback");
    }

    #[test]
    fn test_non_array_json_uses_fallback() {
        let (store, _) = stub_store(Ok(r#"{"title": "x"}"#));
        assert_eq!(store.load(Some("posts.json"))[0].display_title(), "Fallback");
    }

    #[test]
    fn test_failures_are_not_memoized() {
        let (store, calls) = stub_store(Err(LoadError::Fetch("offline".to_string())));
        store.load(Some("posts.json"));
        store.load(Some("posts.json"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    // ── Memoization ─────────────────────────────────────────────────

    #[test]
    fn test_success_is_memoized_per_location() {
        let (store, calls) = stub_store(Ok(r#"[{"title": "Live"}]"#));
        let a = store.load(Some("posts.json"));
        let b = store.load(Some("posts.json"));
        assert_eq!(a[0].display_title(), "Live");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.load(Some("other.json"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.cached_sources(), 2);
    }

    #[test]
    fn test_stores_do_not_share_cache() {
        let (first, first_calls) = stub_store(Ok("[]"));
        let (second, second_calls) = stub_store(Ok("[]"));
        first.load(Some("posts.json"));
        second.load(Some("posts.json"));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    // ── Parsing ─────────────────────────────────────────────────────

    #[test]
    fn test_parse_index_skips_non_objects() {
        let posts = parse_index(r#"[{"title": "A"}, 42, "str", null, {"title": "B"}]"#).unwrap();
        let titles: Vec<&str> = posts.iter().map(|p| p.display_title()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_parse_index_lenient_fields() {
        let posts = parse_index(
            r#"[{"title": 7, "tags": "rust", "dateModified": null},
                {"tags": ["go", 3, null, {"x": 1}], "categoryPath": "/blog/x/"}]"#,
        )
        .unwrap();
        assert_eq!(posts[0].title.as_deref(), Some("7"));
        assert!(posts[0].tags.is_empty());
        assert!(posts[0].date_modified.is_none());
        assert_eq!(posts[1].tags, vec!["go".to_string(), "3".to_string()]);
        assert_eq!(posts[1].category_path.as_deref(), Some("/blog/x/"));
        assert_eq!(posts[1].display_title(), "Untitled");
    }

    #[test]
    fn test_parse_index_rejects_non_array() {
        assert!(matches!(parse_index("null"), Err(LoadError::Parse(_))));
        assert!(matches!(parse_index(""), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_default_source_reads_local_paths() {
        let path = std::env::temp_dir()
            .join(format!("notes_index_store_{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"title": "On disk"}]"#).unwrap();
        let store = PostStore::new(
            Box::new(DefaultSource::new(HttpSource::new(1))),
            vec![],
        );
        let posts = store.load(path.to_str());
        let _ = std::fs::remove_file(&path);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].display_title(), "On disk");
    }

    // ── HTTP ────────────────────────────────────────────────────────

    /// Answers one connection per canned response, returning the raw requests.
    fn serve_once_each(
        responses: Vec<(&'static str, &'static str)>,
    ) -> (String, std::thread::JoinHandle<Vec<String>>) {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut conn, _) = listener.accept().unwrap();
                let mut raw = Vec::new();
                let mut buf = [0u8; 1024];
                while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = conn.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    raw.extend_from_slice(&buf[..n]);
                }
                requests.push(String::from_utf8_lossy(&raw).to_string());
                let reply = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                conn.write_all(reply.as_bytes()).unwrap();
                conn.flush().unwrap();
            }
            requests
        });
        (format!("http://{}/posts.json", addr), handle)
    }

    #[test]
    fn test_http_failure_falls_back_then_success_is_memoized() {
        let (url, server) = serve_once_each(vec![
            ("503 Service Unavailable", ""),
            ("200 OK", r#"[{"title": "Live"}]"#),
        ]);
        let fallback = vec![PostRecord {
            title: Some("Fallback".to_string()),
            ..Default::default()
        }];
        let store = PostStore::new(Box::new(DefaultSource::new(HttpSource::new(5))), fallback);

        let first = store.load(Some(url.as_str()));
        assert_eq!(first[0].display_title(), "Fallback");
        assert_eq!(store.cached_sources(), 0);

        let second = store.load(Some(url.as_str()));
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].display_title(), "Live");
        assert_eq!(store.cached_sources(), 1);

        // Served from the cache; the server only answers twice.
        let third = store.load(Some(url.as_str()));
        assert!(Arc::ptr_eq(&second, &third));

        let requests = server.join().unwrap();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            let lower = request.to_ascii_lowercase();
            assert!(lower.starts_with("get /posts.json "), "{}", request);
            assert!(lower.contains("cache-control: no-cache"), "{}", request);
            assert!(lower.contains("pragma: no-cache"), "{}", request);
        }
    }

    #[test]
    fn test_load_fallback_missing_file_is_empty() {
        assert!(load_fallback(Some("/nonexistent/dir/posts-fallback.json")).is_empty());
        assert!(load_fallback(None).is_empty());
    }
}
