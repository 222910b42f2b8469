use serde::Serialize;

use crate::model::category::Category;
use crate::model::config::{AmbiguousParent, PlacementConfig};
use crate::ops::parent::determine_new_parent;
use crate::ops::state::{StateOutcome, StateUpdate, update_categories_state};
use crate::ops::validate::{MoveRejection, validate_move, validate_parent_determination};

/// A drag-and-drop gesture: `dragged` dropped at `target_index` of `display_list`
#[derive(Debug, Clone, Copy)]
pub struct MoveRequest<'a> {
    pub dragged: &'a Category,
    pub target_index: usize,
    /// The canonical pre-order list the index refers into
    pub display_list: &'a [Category],
    /// The full editing collection
    pub categories: &'a [Category],
}

/// A completed move
#[derive(Debug, Clone, Serialize)]
pub struct MoveOutcome {
    /// The parent the dragged category now hangs under (`None` = root)
    pub parent_path: Option<String>,
    #[serde(flatten)]
    pub state: StateOutcome,
}

/// Dry run: every check `move_category` performs, without touching the
/// collection. Returns the parent path the category would land under.
pub fn plan_move(
    request: MoveRequest<'_>,
    placement: &PlacementConfig,
) -> Result<Option<String>, MoveRejection> {
    let MoveRequest {
        dragged,
        target_index,
        display_list,
        categories,
    } = request;

    validate_move(dragged, target_index, display_list)?;

    let resolution = determine_new_parent(dragged, target_index, display_list, categories);
    if resolution.fell_back && placement.ambiguous_parent == AmbiguousParent::Reject {
        return Err(MoveRejection::AmbiguousParent);
    }
    validate_parent_determination(dragged, &resolution)?;
    Ok(resolution.parent_path)
}

/// Run the whole pipeline: validate the drop, infer the parent, check the
/// inferred parent, then apply the move to the collection.
pub fn move_category(
    request: MoveRequest<'_>,
    placement: &PlacementConfig,
) -> Result<MoveOutcome, MoveRejection> {
    let parent_path = plan_move(request, placement)?;
    let dragged = request.dragged;

    let state = update_categories_state(StateUpdate {
        dragged,
        destination_index: request.target_index,
        display_list: request.display_list,
        new_parent_path: parent_path.as_deref(),
        original_parent_path: dragged.parent_path.as_deref(),
        categories: request.categories,
    });
    tracing::info!(
        id = %dragged.id,
        target_index = request.target_index,
        parent = ?parent_path,
        parent_changed = state.parent_changed,
        "category moved"
    );
    Ok(MoveOutcome { parent_path, state })
}
