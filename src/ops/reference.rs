use crate::model::category::Category;
use crate::ops::helpers::{is_descendant_of_dragged, is_same_category};

/// A candidate can anchor a drop if it is within one level of the dragged
/// category and is neither the dragged category nor inside its subtree.
pub fn is_valid_reference(candidate: &Category, dragged: &Category) -> bool {
    candidate.level.abs_diff(dragged.level) <= 1
        && !is_same_category(candidate, dragged)
        && !is_descendant_of_dragged(candidate, dragged)
}

/// Scan `display_list[..end]` backward for the nearest valid reference.
pub(crate) fn scan_back<'a>(
    dragged: &Category,
    display_list: &'a [Category],
    end: usize,
) -> Option<&'a Category> {
    let end = end.min(display_list.len());
    display_list[..end]
        .iter()
        .rev()
        .find(|c| is_valid_reference(c, dragged))
}

/// Find the category near `target_index` used to infer where the dragged
/// category is meant to go.
pub fn find_valid_reference<'a>(
    dragged: &Category,
    target_index: usize,
    display_list: &'a [Category],
) -> Option<&'a Category> {
    let len = display_list.len();
    if len == 0 {
        return None;
    }

    // Root categories only anchor on other roots before the drop point
    if dragged.level == 1 && dragged.is_root() {
        if target_index == 0 {
            return None;
        }
        let found = display_list[..target_index.min(len)]
            .iter()
            .rev()
            .find(|c| c.is_root() && is_valid_reference(c, dragged));
        tracing::debug!(
            target_index,
            reference = ?found.map(|c| &c.id),
            "root reference lookup"
        );
        return found;
    }

    let found = if target_index >= len - 1 {
        scan_back(dragged, display_list, len)
    } else if target_index > 0 {
        scan_back(dragged, display_list, target_index).or_else(|| {
            let target = &display_list[target_index];
            is_valid_reference(target, dragged).then_some(target)
        })
    } else {
        let target = &display_list[0];
        is_valid_reference(target, dragged).then_some(target)
    };

    tracing::debug!(
        target_index,
        reference = ?found.map(|c| &c.id),
        "reference lookup"
    );
    found
}
