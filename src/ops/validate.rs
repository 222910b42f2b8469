use serde::Serialize;

use crate::model::category::Category;
use crate::ops::helpers::{
    find_parent_at_level, is_descendant_of_dragged, is_same_category, path_is_within,
};
use crate::ops::parent::ParentResolution;
use crate::ops::reference::find_valid_reference;

/// Why a proposed move was refused. The `Display` text is the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("only level-1 categories may be placed at the beginning")]
    RootOnlyAtTop,
    #[error("cannot move category under itself or its descendant")]
    IntoOwnSubtree,
    #[error("no valid reference category found")]
    NoReference,
    #[error("a level-1 category cannot anchor a level-{level} category")]
    LevelJumpFromRoot { level: u32 },
    #[error("no category at required parent level {required} found above the drop position")]
    MissingParentLevel { required: u32 },
    #[error("level-1 category cannot have a parent")]
    RootWithParent,
    #[error("level-{level} category requires a parent")]
    ParentRequired { level: u32 },
    #[error("parent is at level {found} but level {required} is required")]
    ParentLevelMismatch { found: u32, required: u32 },
    #[error("no parent could be inferred for this position")]
    AmbiguousParent,
}

/// Serializable verdict for a proposed move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Result<(), MoveRejection>> for MoveCheck {
    fn from(result: Result<(), MoveRejection>) -> Self {
        match result {
            Ok(()) => MoveCheck {
                valid: true,
                reason: None,
            },
            Err(e) => MoveCheck {
                valid: false,
                reason: Some(e.to_string()),
            },
        }
    }
}

/// True if `candidate` is `dragged` or sits inside its subtree by path
fn is_in_subtree(candidate: &Category, dragged: &Category) -> bool {
    is_same_category(candidate, dragged) || path_is_within(&candidate.path, &dragged.path)
}

// ---------------------------------------------------------------------------
// Move validation
// ---------------------------------------------------------------------------

/// Decide whether dropping `dragged` at `target_index` of `display_list` is legal.
pub fn validate_move(
    dragged: &Category,
    target_index: usize,
    display_list: &[Category],
) -> Result<(), MoveRejection> {
    if target_index == 0 {
        return if dragged.level == 1 {
            Ok(())
        } else {
            Err(MoveRejection::RootOnlyAtTop)
        };
    }

    let Some(reference) = find_valid_reference(dragged, target_index, display_list) else {
        // Explain the failure: was the drop aimed inside the dragged subtree?
        let lo = target_index.saturating_sub(1);
        let hi = target_index
            .saturating_add(1)
            .min(display_list.len().saturating_sub(1));
        let into_subtree = display_list
            .get(lo..=hi)
            .unwrap_or_default()
            .iter()
            .any(|c| is_descendant_of_dragged(c, dragged));
        return Err(if into_subtree {
            MoveRejection::IntoOwnSubtree
        } else {
            MoveRejection::NoReference
        });
    };

    // Same level, or one level below the reference
    if dragged.level == reference.level || dragged.level == reference.level + 1 {
        return if is_in_subtree(reference, dragged) {
            Err(MoveRejection::IntoOwnSubtree)
        } else {
            Ok(())
        };
    }

    // Level jump: an intermediate parent must exist above the reference
    if reference.level == 1 && dragged.level > 2 {
        return Err(MoveRejection::LevelJumpFromRoot {
            level: dragged.level,
        });
    }
    match find_parent_at_level(reference, dragged.level, display_list) {
        None => Err(MoveRejection::MissingParentLevel {
            required: dragged.level.saturating_sub(1),
        }),
        Some(parent) if is_in_subtree(parent, dragged) => Err(MoveRejection::IntoOwnSubtree),
        Some(_) => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Parent determination validation
// ---------------------------------------------------------------------------

/// Reject a computed parent that would break the level or acyclicity invariants.
pub fn validate_parent_determination(
    dragged: &Category,
    resolution: &ParentResolution<'_>,
) -> Result<(), MoveRejection> {
    match (resolution.is_root(), dragged.level) {
        (false, 1) => return Err(MoveRejection::RootWithParent),
        (true, level) if level > 1 => return Err(MoveRejection::ParentRequired { level }),
        _ => {}
    }

    if let Some(parent) = resolution.parent {
        let required = dragged.level.saturating_sub(1);
        if parent.level != required {
            return Err(MoveRejection::ParentLevelMismatch {
                found: parent.level,
                required,
            });
        }
        if is_same_category(parent, dragged) {
            return Err(MoveRejection::IntoOwnSubtree);
        }
    }

    if let Some(pp) = resolution.parent_path.as_deref() {
        if path_is_within(pp, &dragged.path) {
            return Err(MoveRejection::IntoOwnSubtree);
        }
    }
    Ok(())
}
