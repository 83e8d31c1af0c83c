pub mod post;
pub mod tag;

pub use post::PostRecord;
pub use tag::TagEntry;
