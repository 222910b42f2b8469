use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a category: a persisted backend id, or a temporary client id
/// for a category that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryId {
    #[serde(rename = "id")]
    Persisted(String),
    #[serde(rename = "temp_id")]
    Pending(String),
}

impl CategoryId {
    /// The raw identifier string, whichever kind it is
    pub fn as_str(&self) -> &str {
        match self {
            CategoryId::Persisted(id) | CategoryId::Pending(id) => id,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, CategoryId::Pending(_))
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryId::Persisted(id) => write!(f, "{}", id),
            CategoryId::Pending(id) => write!(f, "~{}", id),
        }
    }
}

/// A node of the category taxonomy, stored flat with a materialized path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub id: CategoryId,
    /// Materialized path like `1.3.2`. Empty only before first placement.
    #[serde(default)]
    pub path: String,
    /// Path of the parent category, `None` at root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_path: Option<String>,
    /// Depth, root = 1
    pub level: u32,
    /// 1-based rank among siblings
    pub display_order: u32,
    /// Display name per locale code
    #[serde(default)]
    pub localized_name: IndexMap<String, String>,
    /// Modified since the last persisted state
    #[serde(default, rename = "is_dirty")]
    pub dirty: bool,
}

impl Category {
    /// Create a root-level category with a single `en` name, marked clean
    pub fn new(id: CategoryId, path: impl Into<String>, name: impl Into<String>) -> Self {
        let mut localized_name = IndexMap::new();
        localized_name.insert("en".to_string(), name.into());
        Category {
            id,
            path: path.into(),
            parent_path: None,
            level: 1,
            display_order: 1,
            localized_name,
            dirty: false,
        }
    }

    /// Builder-style: place this category under `parent_path` at `level`
    pub fn under(mut self, parent_path: impl Into<String>, level: u32) -> Self {
        self.parent_path = Some(parent_path.into());
        self.level = level;
        self
    }

    /// Builder-style: set the sibling rank
    pub fn ordered(mut self, display_order: u32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_path.is_none()
    }

    /// Resolve the name for `locale`, falling back to `en`, then to any name.
    pub fn display_name(&self, locale: &str) -> &str {
        self.localized_name
            .get(locale)
            .or_else(|| self.localized_name.get("en"))
            .or_else(|| self.localized_name.values().next())
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Mark this category as modified since the last save
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
