use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::category::Category;
use crate::ops::names::{NameConflict, validate_category_names};

/// Structured result from `taxon check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
    pub warnings: Vec<CheckWarning>,
}

/// A broken collection invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// The same identity appears more than once
    #[serde(rename = "duplicate_id")]
    DuplicateId { id: String },
    /// Two categories share a materialized path
    #[serde(rename = "duplicate_path")]
    DuplicatePath { path: String, ids: Vec<String> },
    /// `parent_path` points at no category
    #[serde(rename = "dangling_parent")]
    DanglingParent { id: String, parent_path: String },
    /// Level disagrees with the parent's level
    #[serde(rename = "level_mismatch")]
    LevelMismatch { id: String, level: u32, expected: u32 },
    /// Level disagrees with the number of path segments
    #[serde(rename = "path_depth")]
    PathDepth { id: String, path: String, level: u32 },
    /// The category is its own ancestor
    #[serde(rename = "cycle")]
    Cycle { id: String },
    /// Sibling display orders are not exactly 1..N
    #[serde(rename = "sibling_order")]
    SiblingOrder {
        parent_path: Option<String>,
        orders: Vec<u32>,
    },
}

/// A non-critical issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CheckWarning {
    /// Category has not been placed yet
    #[serde(rename = "missing_path")]
    MissingPath { id: String },
    /// Siblings share a name
    #[serde(rename = "duplicate_name")]
    DuplicateName(NameConflict),
}

// ---------------------------------------------------------------------------
// Main check entry point
// ---------------------------------------------------------------------------

/// Validate a category collection and return structured results.
///
/// This is a read-only operation. Checks performed:
/// 1. Identities and paths are unique
/// 2. Every `parent_path` resolves, and no category is its own ancestor
/// 3. Levels agree with parents and with path depth
/// 4. Each sibling group is numbered 1..N
/// 5. Warnings for unplaced categories and duplicate sibling names
pub fn check_catalog(list: &[Category], locale: &str) -> CheckResult {
    let mut result = CheckResult::default();

    check_identities(list, &mut result);
    check_parents(list, &mut result);
    check_sibling_orders(list, &mut result);

    for c in list.iter().filter(|c| c.path.is_empty()) {
        result.warnings.push(CheckWarning::MissingPath {
            id: c.id.to_string(),
        });
    }
    for conflict in validate_category_names(list, locale) {
        result.warnings.push(CheckWarning::DuplicateName(conflict));
    }

    result.valid = result.errors.is_empty();
    result
}

// ---------------------------------------------------------------------------
// Individual checks
// ---------------------------------------------------------------------------

fn check_identities(list: &[Category], result: &mut CheckResult) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for c in list {
        if !seen.insert(&c.id) && reported.insert(&c.id) {
            result.errors.push(CheckError::DuplicateId {
                id: c.id.to_string(),
            });
        }
    }

    let mut by_path: IndexMap<&str, Vec<String>> = IndexMap::new();
    for c in list.iter().filter(|c| !c.path.is_empty()) {
        by_path.entry(c.path.as_str()).or_default().push(c.id.to_string());
    }
    for (path, ids) in by_path {
        if ids.len() > 1 {
            result.errors.push(CheckError::DuplicatePath {
                path: path.to_string(),
                ids,
            });
        }
    }
}

fn check_parents(list: &[Category], result: &mut CheckResult) {
    let by_path: HashMap<&str, &Category> = list
        .iter()
        .filter(|c| !c.path.is_empty())
        .map(|c| (c.path.as_str(), c))
        .collect();

    for c in list {
        let id = c.id.to_string();
        let expected = match c.parent_path.as_deref() {
            None => Some(1),
            Some(pp) => match by_path.get(pp) {
                Some(parent) => Some(parent.level + 1),
                None => {
                    result.errors.push(CheckError::DanglingParent {
                        id: id.clone(),
                        parent_path: pp.to_string(),
                    });
                    None
                }
            },
        };

        if let Some(expected) = expected {
            if c.level != expected {
                result.errors.push(CheckError::LevelMismatch {
                    id: id.clone(),
                    level: c.level,
                    expected,
                });
            }
        }
        if !c.path.is_empty() && c.path.split('.').count() as u32 != c.level {
            result.errors.push(CheckError::PathDepth {
                id: id.clone(),
                path: c.path.clone(),
                level: c.level,
            });
        }
        if is_own_ancestor(c, &by_path) {
            result.errors.push(CheckError::Cycle { id });
        }
    }
}

fn is_own_ancestor(start: &Category, by_path: &HashMap<&str, &Category>) -> bool {
    let mut parent_path = start.parent_path.as_deref();
    for _ in 0..by_path.len() {
        let Some(parent) = parent_path.and_then(|pp| by_path.get(pp)) else {
            return false;
        };
        if parent.id == start.id {
            return true;
        }
        parent_path = parent.parent_path.as_deref();
    }
    false
}

fn check_sibling_orders(list: &[Category], result: &mut CheckResult) {
    let mut groups: IndexMap<Option<&str>, Vec<u32>> = IndexMap::new();
    for c in list {
        groups
            .entry(c.parent_path.as_deref())
            .or_default()
            .push(c.display_order);
    }
    for (parent_path, mut orders) in groups {
        orders.sort_unstable();
        let contiguous = orders
            .iter()
            .enumerate()
            .all(|(i, &o)| o as usize == i + 1);
        if !contiguous {
            result.errors.push(CheckError::SiblingOrder {
                parent_path: parent_path.map(|p| p.to_string()),
                orders,
            });
        }
    }
}
