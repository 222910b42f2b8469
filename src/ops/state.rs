use std::collections::HashSet;

use serde::Serialize;

use crate::model::category::Category;
use crate::ops::helpers::{
    find_by_path, find_category_index, is_same_category, max_display_order, path_is_within,
    siblings,
};
use crate::ops::sort::sort_by_display_order;

/// Inputs for applying a validated move to the editing collection
#[derive(Debug, Clone, Copy)]
pub struct StateUpdate<'a> {
    pub dragged: &'a Category,
    /// Drop index into `display_list`
    pub destination_index: usize,
    pub display_list: &'a [Category],
    pub new_parent_path: Option<&'a str>,
    pub original_parent_path: Option<&'a str>,
    /// The full editing collection (may hold categories not on display)
    pub categories: &'a [Category],
}

/// Result of applying a move
#[derive(Debug, Clone, Serialize)]
pub struct StateOutcome {
    /// The whole collection in canonical pre-order
    pub categories: Vec<Category>,
    /// Where the moved category ended up; `None` if it was not in the collection
    pub category_index: Option<usize>,
    pub parent_changed: bool,
}

/// Apply a move: reparent or reorder the dragged category, renumber the
/// affected sibling groups, and re-sort everything into pre-order.
pub fn update_categories_state(update: StateUpdate<'_>) -> StateOutcome {
    let parent_changed = update.new_parent_path != update.original_parent_path;

    let Some(idx) = find_category_index(update.categories, update.dragged) else {
        tracing::warn!(id = %update.dragged.id, "dragged category not in collection");
        return StateOutcome {
            categories: update.categories.to_vec(),
            category_index: None,
            parent_changed,
        };
    };

    let mut categories = update.categories.to_vec();
    if parent_changed {
        reparent(
            &mut categories,
            idx,
            update.new_parent_path,
            update.original_parent_path,
        );
    } else {
        reorder_among_siblings(&mut categories, idx, &update);
    }

    let sorted = sort_by_display_order(&categories);
    let category_index = find_category_index(&sorted, update.dragged);
    StateOutcome {
        categories: sorted,
        category_index,
        parent_changed,
    }
}

/// Renumber every sibling group to 1..N, keeping the current order.
/// Categories whose rank changes are marked dirty.
pub fn compact_display_orders(list: &[Category]) -> Vec<Category> {
    let mut categories = list.to_vec();
    let parents: HashSet<Option<String>> =
        categories.iter().map(|c| c.parent_path.clone()).collect();
    for parent in &parents {
        compact_group(&mut categories, parent.as_deref());
    }
    categories
}

// ---------------------------------------------------------------------------
// Reparenting
// ---------------------------------------------------------------------------

fn reparent(
    categories: &mut [Category],
    idx: usize,
    new_parent_path: Option<&str>,
    original_parent_path: Option<&str>,
) {
    // Appended as the last child of the new parent
    let order =
        max_display_order(&siblings(categories, new_parent_path, Some(&categories[idx]))) + 1;

    let dragged = &mut categories[idx];
    dragged.parent_path = new_parent_path.map(|p| p.to_string());
    dragged.display_order = order;
    dragged.mark_dirty();
    tracing::debug!(
        id = %dragged.id,
        from = ?original_parent_path,
        to = ?new_parent_path,
        display_order = order,
        "reparented"
    );

    // Close the gap left behind
    compact_group(categories, original_parent_path);
    rekey_subtree(categories, idx);
}

/// Give the category at `idx` a fresh path under its (new) parent, and carry
/// its descendants' paths, parent paths, and levels along with it.
fn rekey_subtree(categories: &mut [Category], idx: usize) {
    let old_path = categories[idx].path.clone();
    let old_level = categories[idx].level;
    let parent_path = categories[idx].parent_path.clone();

    let new_level = match parent_path.as_deref() {
        None => 1,
        Some(pp) => find_by_path(categories, pp)
            .map(|p| p.level + 1)
            .unwrap_or(old_level),
    };
    let new_path = next_free_path(categories, parent_path.as_deref());
    let dragged_id = categories[idx].id.clone();

    for c in categories.iter_mut() {
        let in_subtree = c.id == dragged_id || path_is_within(&c.path, &old_path);
        if !in_subtree {
            continue;
        }
        if c.id == dragged_id {
            c.path = new_path.clone();
        } else {
            c.path = replace_prefix(&c.path, &old_path, &new_path);
            if let Some(pp) = c.parent_path.as_deref() {
                c.parent_path = Some(replace_prefix(pp, &old_path, &new_path));
            }
        }
        c.level = (c.level + new_level).saturating_sub(old_level).max(1);
        c.mark_dirty();
    }
    tracing::debug!(from = %old_path, to = %new_path, "rekeyed subtree");
}

/// Smallest `<parent>.<n>` (or `<n>` at root) not already taken.
fn next_free_path(categories: &[Category], parent_path: Option<&str>) -> String {
    let taken: HashSet<&str> = categories.iter().map(|c| c.path.as_str()).collect();
    let prefix = parent_path.map(|p| format!("{}.", p)).unwrap_or_default();
    (1u32..)
        .map(|n| format!("{}{}", prefix, n))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_default()
}

fn replace_prefix(path: &str, old: &str, new: &str) -> String {
    match path.strip_prefix(old) {
        Some(rest) => format!("{}{}", new, rest),
        None => path.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Reordering
// ---------------------------------------------------------------------------

fn reorder_among_siblings(categories: &mut [Category], idx: usize, update: &StateUpdate<'_>) {
    let parent = categories[idx].parent_path.clone();
    let dragged = update.dragged;
    let is_sibling = |c: &Category| c.parent_path == parent && !is_same_category(c, dragged);

    let mut others: Vec<usize> = (0..categories.len())
        .filter(|&i| i != idx && categories[i].parent_path == parent)
        .collect();
    others.sort_by_key(|&i| categories[i].display_order);

    // Siblings shown above the drop point
    let dest = update.destination_index;
    let mut position = update
        .display_list
        .iter()
        .take(dest)
        .filter(|c| is_sibling(c))
        .count();
    // Landing on a sibling: before it when moving up, after it when moving down
    if let Some(at) = update.display_list.get(dest) {
        let moving_down =
            find_category_index(update.display_list, dragged).is_some_and(|cur| cur < dest);
        if is_sibling(at) && moving_down {
            position += 1;
        }
    }
    let position = position.min(others.len());
    others.insert(position, idx);

    for (rank, &i) in others.iter().enumerate() {
        categories[i].display_order = rank as u32 + 1;
        categories[i].mark_dirty();
    }
    tracing::debug!(id = %dragged.id, position, "reordered among siblings");
}

/// Renumber one sibling group to 1..N in current order.
fn compact_group(categories: &mut [Category], parent_path: Option<&str>) {
    let mut group: Vec<usize> = (0..categories.len())
        .filter(|&i| categories[i].parent_path.as_deref() == parent_path)
        .collect();
    group.sort_by_key(|&i| categories[i].display_order);
    for (rank, &i) in group.iter().enumerate() {
        let order = rank as u32 + 1;
        if categories[i].display_order != order {
            categories[i].display_order = order;
            categories[i].mark_dirty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_helpers::*;
    use pretty_assertions::assert_eq;

    fn apply(
        list: &[Category],
        dragged_key: &str,
        dest: usize,
        new_parent: Option<&str>,
    ) -> StateOutcome {
        let dragged = by_key(list, dragged_key);
        update_categories_state(StateUpdate {
            dragged,
            destination_index: dest,
            display_list: list,
            new_parent_path: new_parent,
            original_parent_path: dragged.parent_path.as_deref(),
            categories: list,
        })
    }

    fn orders(list: &[Category], parent: Option<&str>) -> Vec<(String, u32)> {
        let mut group: Vec<_> = list
            .iter()
            .filter(|c| c.parent_path.as_deref() == parent)
            .map(|c| (c.id.as_str().to_string(), c.display_order))
            .collect();
        group.sort_by_key(|(_, o)| *o);
        group
    }

    #[test]
    fn test_reorder_roots_forward() {
        let list = vec![
            cat("a", "1", None, 1, 1),
            cat("b", "2", None, 1, 2),
            cat("c", "2.1", Some("2"), 2, 1),
        ];
        let out = apply(&list, "a", 2, None);
        assert!(!out.parent_changed);
        // `c` is `b`'s child, so it follows `b` in pre-order
        assert_eq!(order_keys(&out.categories), vec!["b", "c", "a"]);
        assert_eq!(
            orders(&out.categories, None),
            vec![("b".to_string(), 1), ("a".to_string(), 2)]
        );
        assert_eq!(out.category_index, Some(2));
    }

    #[test]
    fn test_reorder_backward_to_top() {
        let list = sample_catalog();
        let out = apply(&list, "haircare", 0, None);
        assert_eq!(out.category_index, Some(0));
        assert_eq!(
            orders(&out.categories, None),
            vec![
                ("haircare".to_string(), 1),
                ("skincare".to_string(), 2),
                ("makeup".to_string(), 3)
            ]
        );
        assert!(out.categories.iter().filter(|c| c.is_root()).all(|c| c.dirty));
    }

    #[test]
    fn test_reorder_landing_on_sibling_moving_down() {
        let list = sample_catalog();
        // Foams dropped onto Oils' slot
        let out = apply(&list, "foams", 3, Some("1.1"));
        assert_eq!(
            order_keys(&out.categories)[..5].to_vec(),
            vec!["skincare", "cleansers", "oils", "foams", "serums"]
        );
        assert_eq!(out.category_index, Some(3));
    }

    #[test]
    fn test_reparent_appends_as_last_child() {
        let list = sample_catalog();
        let out = apply(&list, "oils", 5, Some("1.2"));
        assert!(out.parent_changed);
        assert_eq!(
            order_keys(&out.categories),
            vec!["skincare", "cleansers", "foams", "serums", "oils", "makeup", "lips", "haircare"]
        );
        let oils = &out.categories[4];
        assert_eq!(out.category_index, Some(4));
        assert_eq!(oils.parent_path.as_deref(), Some("1.2"));
        assert_eq!(oils.path, "1.2.1");
        assert_eq!(oils.display_order, 1);
        assert_eq!(oils.level, 3);
        assert!(oils.dirty);
        // Foams already ranked first; untouched
        assert!(!by_key(&out.categories, "foams").dirty);
    }

    #[test]
    fn test_reparent_carries_subtree_and_compacts_old_group() {
        let list = sample_catalog();
        let out = apply(&list, "cleansers", 8, Some("2"));
        assert_eq!(
            order_keys(&out.categories),
            vec!["skincare", "serums", "makeup", "lips", "cleansers", "foams", "oils", "haircare"]
        );
        let cleansers = by_key(&out.categories, "cleansers");
        assert_eq!(cleansers.path, "2.2");
        assert_eq!(cleansers.display_order, 2);
        let foams = by_key(&out.categories, "foams");
        assert_eq!(foams.path, "2.2.1");
        assert_eq!(foams.parent_path.as_deref(), Some("2.2"));
        assert!(foams.dirty);
        let serums = by_key(&out.categories, "serums");
        assert_eq!(serums.display_order, 1);
        assert!(serums.dirty);
    }

    #[test]
    fn test_reparent_shifts_levels() {
        let list = sample_catalog();
        let out = apply(&list, "lips", 4, Some("1.1"));
        let lips = by_key(&out.categories, "lips");
        assert_eq!(lips.level, 3);
        assert_eq!(lips.path, "1.1.3");
        assert_eq!(lips.display_order, 3);
    }

    #[test]
    fn test_missing_dragged_leaves_collection_alone() {
        let list = sample_catalog();
        let stranger = cat("stranger", "7", None, 1, 1);
        let out = update_categories_state(StateUpdate {
            dragged: &stranger,
            destination_index: 2,
            display_list: &list,
            new_parent_path: Some("1"),
            original_parent_path: None,
            categories: &list,
        });
        assert_eq!(out.category_index, None);
        assert!(out.parent_changed);
        assert_eq!(order_keys(&out.categories), order_keys(&list));
        assert!(out.categories.iter().all(|c| !c.dirty));
    }

    #[test]
    fn test_compact_display_orders() {
        let list = vec![
            cat("a", "1", None, 1, 3),
            cat("b", "2", None, 1, 7),
            cat("c", "2.1", Some("2"), 2, 1),
        ];
        let compacted = compact_display_orders(&list);
        assert_eq!(
            orders(&compacted, None),
            vec![("a".to_string(), 1), ("b".to_string(), 2)]
        );
        assert!(compacted[0].dirty);
        assert!(!compacted[2].dirty);
    }

    #[test]
    fn test_next_free_path_skips_taken() {
        let list = sample_catalog();
        assert_eq!(next_free_path(&list, None), "4");
        assert_eq!(next_free_path(&list, Some("1")), "1.3");
        assert_eq!(next_free_path(&list, Some("3")), "3.1");
    }
}
