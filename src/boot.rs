use log::{info, warn};
use std::path::Path;
use url::Url;

use crate::config::Config;
use crate::related;

/// Sanity-check the configuration before loading anything.
/// Nothing here is fatal: every problem degrades to the fallback index or
/// defaults. Returns the number of warnings logged.
pub fn run(cfg: &Config) -> u32 {
    info!("Notes index boot check starting...");

    let mut warnings = 0u32;

    // ── 1. Live index ──────────────────────────────────
    if cfg.posts_index.trim().is_empty() {
        warn!("  posts_index is empty (only the fallback index will be used)");
        warnings += 1;
    } else {
        info!("  Post index: {}", cfg.posts_index);
    }

    // ── 2. Fallback index ──────────────────────────────
    match cfg.fallback_index.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => {
            if !Path::new(path).is_file() {
                warn!("  Fallback index not found: {} (offline pages will be empty)", path);
                warnings += 1;
            }
        }
        _ => info!("  No fallback index configured"),
    }

    // ── 3. Site URL ────────────────────────────────────
    if Url::parse(&cfg.site_url).is_err() {
        warn!(
            "  site_url is not an absolute URL: {} (canonical links will be wrong)",
            cfg.site_url
        );
        warnings += 1;
    }

    // ── 4. Limits ──────────────────────────────────────
    let related_limit = cfg.related_limit();
    if related_limit as i64 != cfg.related_max {
        warn!(
            "  related_max {} outside {}..={}, using {}",
            cfg.related_max,
            related::MIN_MAX,
            related::MAX_MAX,
            related_limit
        );
        warnings += 1;
    }
    if cfg.search_max_results == 0 {
        warn!("  search_max_results is 0 (search will never show results)");
        warnings += 1;
    }

    // ── Summary ────────────────────────────────────────
    if warnings > 0 {
        warn!("Boot check passed with {} warning(s).", warnings);
    } else {
        info!("Boot check passed.");
    }
    warnings
}
