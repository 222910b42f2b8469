use crate::model::category::Category;

/// Whether `path` is `root` itself or lies underneath it.
/// An empty `root` (unplaced category) contains nothing.
pub fn path_is_within(path: &str, root: &str) -> bool {
    if root.is_empty() {
        return false;
    }
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// True if `candidate` hangs somewhere below `dragged`, judged by its parent path.
pub fn is_descendant_of_dragged(candidate: &Category, dragged: &Category) -> bool {
    candidate
        .parent_path
        .as_deref()
        .is_some_and(|pp| path_is_within(pp, &dragged.path))
}

/// Identity comparison (persisted id or temporary id), never value equality
pub fn is_same_category(a: &Category, b: &Category) -> bool {
    a.id == b.id
}

pub fn find_category_index(list: &[Category], target: &Category) -> Option<usize> {
    list.iter().position(|c| is_same_category(c, target))
}

pub fn find_by_path<'a>(list: &'a [Category], path: &str) -> Option<&'a Category> {
    list.iter().find(|c| c.path == path)
}

/// All categories directly under `parent_path`, optionally skipping one by identity.
pub fn siblings<'a>(
    list: &'a [Category],
    parent_path: Option<&str>,
    exclude: Option<&Category>,
) -> Vec<&'a Category> {
    list.iter()
        .filter(|c| c.parent_path.as_deref() == parent_path)
        .filter(|c| exclude.is_none_or(|ex| !is_same_category(c, ex)))
        .collect()
}

pub fn max_display_order(siblings: &[&Category]) -> u32 {
    siblings.iter().map(|c| c.display_order).max().unwrap_or(0)
}

/// Walk backward through `display_list` from `start` (inclusive) to the nearest
/// category sitting one level above `target_level`.
pub fn find_parent_at_level<'a>(
    start: &Category,
    target_level: u32,
    display_list: &'a [Category],
) -> Option<&'a Category> {
    let wanted = target_level.checked_sub(1)?;
    let start_idx = find_category_index(display_list, start)?;
    display_list[..=start_idx]
        .iter()
        .rev()
        .find(|c| c.level == wanted)
}

/// Follow `start`'s parent chain (excluding `start`) up to the ancestor at `level`.
pub fn ancestor_at_level<'a>(
    start: &Category,
    level: u32,
    list: &'a [Category],
) -> Option<&'a Category> {
    let mut parent_path = start.parent_path.as_deref();
    // Bounded by the collection size so a corrupt cycle cannot spin forever
    for _ in 0..list.len() {
        let parent = find_by_path(list, parent_path?)?;
        if parent.level == level {
            return Some(parent);
        }
        if parent.level < level {
            return None;
        }
        parent_path = parent.parent_path.as_deref();
    }
    None
}
