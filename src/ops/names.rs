use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::category::Category;
use crate::ops::helpers::find_by_path;

/// Two or more siblings share a name (case- and whitespace-insensitive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameConflict {
    /// The normalized (trimmed, lower-cased) name
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_path: Option<String>,
    /// Display name of the parent, when it exists in the collection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    /// The conflicting names exactly as entered
    pub categories: Vec<String>,
}

impl fmt::Display for NameConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate name \"{}\" ", self.name)?;
        match (&self.parent_name, &self.parent_path) {
            (Some(name), Some(path)) => write!(f, "under \"{}\" ({})", name, path)?,
            (None, Some(path)) => write!(f, "under {}", path)?,
            _ => write!(f, "at root level")?,
        }
        let quoted: Vec<String> = self
            .categories
            .iter()
            .map(|n| format!("\"{}\"", n))
            .collect();
        write!(f, ": {}", quoted.join(", "))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Report sibling groups where names collide in `locale`. Advisory only:
/// nothing is modified.
pub fn validate_category_names(list: &[Category], locale: &str) -> Vec<NameConflict> {
    let mut groups: IndexMap<Option<&str>, IndexMap<String, Vec<&Category>>> = IndexMap::new();
    for c in list {
        let name = normalize(c.display_name(locale));
        if name.is_empty() {
            continue;
        }
        groups
            .entry(c.parent_path.as_deref())
            .or_default()
            .entry(name)
            .or_default()
            .push(c);
    }

    let mut conflicts = Vec::new();
    for (parent_path, names) in &groups {
        for (name, members) in names {
            if members.len() < 2 {
                continue;
            }
            let parent_name = parent_path
                .and_then(|pp| find_by_path(list, pp))
                .map(|p| p.display_name(locale).to_string());
            conflicts.push(NameConflict {
                name: name.clone(),
                parent_path: parent_path.map(|p| p.to_string()),
                parent_name,
                categories: members
                    .iter()
                    .map(|c| c.display_name(locale).to_string())
                    .collect(),
            });
        }
    }
    conflicts
}
