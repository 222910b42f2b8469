use crate::model::category::Category;
use crate::ops::helpers::{ancestor_at_level, find_by_path};
use crate::ops::reference::{is_valid_reference, scan_back};

/// Where a dropped category should hang.
#[derive(Debug, Clone)]
pub struct ParentResolution<'a> {
    /// `None` means root
    pub parent_path: Option<String>,
    /// The parent record, when it could be located
    pub parent: Option<&'a Category>,
    /// Set when no parent could be inferred for a category deeper than
    /// level 1 and root was chosen by default
    pub fell_back: bool,
}

impl<'a> ParentResolution<'a> {
    pub fn root() -> Self {
        ParentResolution {
            parent_path: None,
            parent: None,
            fell_back: false,
        }
    }

    pub fn under(parent: &'a Category) -> Self {
        ParentResolution {
            parent_path: Some(parent.path.clone()),
            parent: Some(parent),
            fell_back: false,
        }
    }

    /// Same parent as `other`, looking the parent record up in `full_list`
    fn beside(other: &Category, full_list: &'a [Category]) -> Self {
        let parent = other
            .parent_path
            .as_deref()
            .and_then(|pp| find_by_path(full_list, pp));
        ParentResolution {
            parent_path: other.parent_path.clone(),
            parent,
            fell_back: false,
        }
    }

    fn fallback(dragged: &Category) -> Self {
        if dragged.level > 1 {
            tracing::warn!(
                id = %dragged.id,
                level = dragged.level,
                "no parent could be inferred, falling back to root"
            );
        }
        ParentResolution {
            fell_back: dragged.level > 1,
            ..Self::root()
        }
    }

    /// Climb from `start` to the ancestor one level above `dragged`.
    fn ancestor(dragged: &Category, start: &Category, full_list: &'a [Category]) -> Self {
        if dragged.level <= 1 {
            return Self::root();
        }
        match ancestor_at_level(start, dragged.level - 1, full_list) {
            Some(parent) => Self::under(parent),
            None => Self::fallback(dragged),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_path.is_none()
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Infer the new parent of `dragged` when dropped at `target_index` of
/// `display_list`. `full_list` is the whole editing collection, used to look up
/// parents that may be filtered out of the display list.
pub fn determine_new_parent<'a>(
    dragged: &Category,
    target_index: usize,
    display_list: &'a [Category],
    full_list: &'a [Category],
) -> ParentResolution<'a> {
    if target_index == 0 {
        tracing::debug!(id = %dragged.id, "dropped at top, placing at root");
        return ParentResolution::root();
    }

    let len = display_list.len();
    if len == 0 {
        return ParentResolution::fallback(dragged);
    }

    let usable = |idx: usize| {
        display_list
            .get(idx)
            .filter(|c| is_valid_reference(c, dragged))
    };
    let before = usable(target_index - 1);
    let target = usable(target_index);

    if target_index >= len - 1 {
        return match scan_back(dragged, display_list, len) {
            Some(last) => parent_for_end(dragged, last, full_list),
            None => ParentResolution::fallback(dragged),
        };
    }

    match before.or(target) {
        Some(reference) => parent_for_mid(
            dragged,
            before,
            target,
            reference,
            target_index,
            full_list,
        ),
        None => match scan_back(dragged, display_list, target_index - 1) {
            Some(reference) => {
                parent_from_reference(dragged, reference, target_index, full_list)
            }
            None => ParentResolution::fallback(dragged),
        },
    }
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

/// Dropped at or past the last row; `last` is the last usable row.
fn parent_for_end<'a>(
    dragged: &Category,
    last: &'a Category,
    full_list: &'a [Category],
) -> ParentResolution<'a> {
    tracing::debug!(id = %dragged.id, last = %last.id, "end-of-list placement");
    if dragged.level == last.level + 1 {
        ParentResolution::under(last)
    } else if dragged.level == last.level {
        ParentResolution::beside(last, full_list)
    } else {
        ParentResolution::ancestor(dragged, last, full_list)
    }
}

/// Dropped between `before` and `target`, either of which may be unusable.
fn parent_for_mid<'a>(
    dragged: &Category,
    before: Option<&'a Category>,
    target: Option<&'a Category>,
    reference: &'a Category,
    target_index: usize,
    full_list: &'a [Category],
) -> ParentResolution<'a> {
    if let Some(before) = before {
        // One level below the row above: becomes its last child, whatever follows
        if dragged.level == before.level + 1 {
            tracing::debug!(id = %dragged.id, parent = %before.id, "child of row above");
            return ParentResolution::under(before);
        }
        if let Some(target) = target {
            let all_same_level = dragged.level == before.level && before.level == target.level;
            if all_same_level && before.parent_path == target.parent_path {
                tracing::debug!(id = %dragged.id, "between two siblings");
                return ParentResolution::beside(before, full_list);
            }
            // Closing a subtree: the row below is shallower than the dragged category
            if target.level < dragged.level && before.level == dragged.level {
                tracing::debug!(id = %dragged.id, sibling = %before.id, "after last sibling");
                return ParentResolution::beside(before, full_list);
            }
        }
    }
    parent_from_reference(dragged, reference, target_index, full_list)
}

/// Infer the parent from a single anchor row.
fn parent_from_reference<'a>(
    dragged: &Category,
    reference: &'a Category,
    target_index: usize,
    full_list: &'a [Category],
) -> ParentResolution<'a> {
    if dragged.level == reference.level + 1 {
        // Whatever row follows the reference (its child, its sibling, a
        // shallower row, or the drop point itself), it is the only row at the
        // required level, so it adopts the dragged category.
        tracing::debug!(
            id = %dragged.id,
            reference = %reference.id,
            target_index,
            "reference adopts dragged category"
        );
        return ParentResolution::under(reference);
    }
    if dragged.level == reference.level {
        return ParentResolution::beside(reference, full_list);
    }
    ParentResolution::ancestor(dragged, reference, full_list)
}
