use serde::Serialize;

use crate::model::category::Category;
use crate::ops::check::{CheckError, CheckResult, CheckWarning};
use crate::ops::names::NameConflict;
use crate::ops::validate::MoveCheck;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TreeJson<'a> {
    pub categories: &'a [Category],
}

#[derive(Serialize)]
pub struct ValidateJson {
    #[serde(flatten)]
    pub check: MoveCheck,
    /// Where the category would land; absent when rejected or at root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_path: Option<String>,
}

#[derive(Serialize)]
pub struct TidyJson<'a> {
    pub renumbered: usize,
    pub categories: &'a [Category],
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One tree row: indented by level, then rank, name, and path.
/// Unsaved categories get a trailing `*`.
pub fn format_category_line(category: &Category, locale: &str) -> String {
    let indent = "  ".repeat(category.level.saturating_sub(1) as usize);
    let label = if category.path.is_empty() {
        category.id.to_string()
    } else {
        category.path.clone()
    };
    let marker = if category.dirty { " *" } else { "" };
    format!(
        "{}{}. {} [{}]{}",
        indent,
        category.display_order,
        category.display_name(locale),
        label,
        marker
    )
}

pub fn format_tree(list: &[Category], locale: &str) -> Vec<String> {
    list.iter()
        .map(|c| format_category_line(c, locale))
        .collect()
}

pub fn format_check_error(err: &CheckError) -> String {
    match err {
        CheckError::DuplicateId { id } => format!("{} appears more than once", id),
        CheckError::DuplicatePath { path, ids } => {
            format!("path {} is shared by: {}", path, ids.join(", "))
        }
        CheckError::DanglingParent { id, parent_path } => {
            format!("{} has missing parent: {}", id, parent_path)
        }
        CheckError::LevelMismatch {
            id,
            level,
            expected,
        } => format!("{} is at level {} but its parent implies {}", id, level, expected),
        CheckError::PathDepth { id, path, level } => {
            format!("{} has path {} but level {}", id, path, level)
        }
        CheckError::Cycle { id } => format!("{} is its own ancestor", id),
        CheckError::SiblingOrder {
            parent_path,
            orders,
        } => {
            let orders: Vec<String> = orders.iter().map(|o| o.to_string()).collect();
            match parent_path {
                Some(pp) => format!("children of {} are ordered {}", pp, orders.join(", ")),
                None => format!("root categories are ordered {}", orders.join(", ")),
            }
        }
    }
}

pub fn format_check_warning(warn: &CheckWarning) -> String {
    match warn {
        CheckWarning::MissingPath { id } => format!("{} has no path yet", id),
        CheckWarning::DuplicateName(conflict) => conflict.to_string(),
    }
}

pub fn format_check_result(result: &CheckResult) -> Vec<String> {
    let mut lines = Vec::new();
    if !result.errors.is_empty() {
        lines.push("Errors:".to_string());
        lines.extend(
            result
                .errors
                .iter()
                .map(|e| format!("  {}", format_check_error(e))),
        );
    }
    if !result.warnings.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Warnings:".to_string());
        lines.extend(
            result
                .warnings
                .iter()
                .map(|w| format!("  {}", format_check_warning(w))),
        );
    }
    if lines.is_empty() {
        lines.push("catalog is valid".to_string());
    }
    lines
}

pub fn format_name_conflicts(conflicts: &[NameConflict]) -> Vec<String> {
    if conflicts.is_empty() {
        return vec!["no duplicate names".to_string()];
    }
    conflicts.iter().map(|c| c.to_string()).collect()
}
