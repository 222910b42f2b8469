use serde::{Deserialize, Serialize};

use crate::model::category::Category;

/// On-disk snapshot of a category collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Catalog { categories }
    }

    /// Find a category by key. Persisted ids win over temporary ids
    /// that happen to share the same string.
    pub fn find_by_key(&self, key: &str) -> Option<&Category> {
        let matching = |pending: bool| {
            self.categories
                .iter()
                .find(|c| c.id.is_pending() == pending && c.id.as_str() == key)
        };
        matching(false).or_else(|| matching(true))
    }

    /// Number of categories with unsaved changes
    pub fn dirty_count(&self) -> usize {
        self.categories.iter().filter(|c| c.dirty).count()
    }
}
