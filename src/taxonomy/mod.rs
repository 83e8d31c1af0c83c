pub mod aggregate;
pub mod normalize;
pub mod resolve;

pub use aggregate::{aggregate, slug_labels};
pub use normalize::{normalize, slugify};
pub use resolve::{resolve, TagPage, TagRef};
