//! Post index, search, tags and related notes for a static blog.
//!
//! The [`store::PostStore`] loads `posts.json` (with an injected fallback);
//! everything else is a pure query over the loaded `&[PostRecord]`.

pub mod boot;
pub mod config;
pub mod models;
pub mod query;
pub mod reading;
pub mod related;
pub mod render;
pub mod search;
pub mod seo;
pub mod store;
pub mod taxonomy;


pub use config::Config;
pub use models::{PostRecord, TagEntry};
pub use store::{LoadError, PostStore};
