use serde::{Deserialize, Serialize};

/// A tag as listed on the tags index: first-seen label, its slug, and how
/// many posts carry it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub label: String,
    pub slug: String,
    pub count: usize,
}

impl TagEntry {
    /// "1 note" / "N notes"
    pub fn count_label(&self) -> String {
        if self.count == 1 {
            "1 note".to_string()
        } else {
            format!("{} notes", self.count)
        }
    }
}
