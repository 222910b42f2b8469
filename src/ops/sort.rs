use std::collections::HashMap;

use crate::model::category::Category;

/// Sibling groups keyed by parent path (`None` = root), each holding indices
/// into the source list sorted by display order.
type Groups<'a> = HashMap<Option<&'a str>, Vec<usize>>;

/// Flatten the collection into canonical pre-order: every category is followed
/// by its children (recursively), and each sibling group is in display order.
///
/// Records that cannot be reached from a root (dangling `parent_path`, cycles)
/// are appended after the tree in their input order.
pub fn sort_by_display_order(list: &[Category]) -> Vec<Category> {
    let mut groups: Groups<'_> = HashMap::new();
    for (i, c) in list.iter().enumerate() {
        groups.entry(c.parent_path.as_deref()).or_default().push(i);
    }
    for indices in groups.values_mut() {
        // Stable: ties keep their input order
        indices.sort_by_key(|&i| list[i].display_order);
    }

    let mut emitted = vec![false; list.len()];
    let mut sorted = Vec::with_capacity(list.len());
    emit_group(None, list, &groups, &mut emitted, &mut sorted);

    let orphans: Vec<usize> = (0..list.len()).filter(|&i| !emitted[i]).collect();
    if !orphans.is_empty() {
        tracing::warn!(
            count = orphans.len(),
            "categories unreachable from any root appended after the tree"
        );
        sorted.extend(orphans.into_iter().map(|i| list[i].clone()));
    }
    sorted
}

fn emit_group<'a>(
    parent: Option<&'a str>,
    list: &'a [Category],
    groups: &Groups<'a>,
    emitted: &mut [bool],
    sorted: &mut Vec<Category>,
) {
    let Some(indices) = groups.get(&parent) else {
        return;
    };
    for &i in indices {
        if emitted[i] {
            continue;
        }
        emitted[i] = true;
        sorted.push(list[i].clone());
        if !list[i].path.is_empty() {
            emit_group(Some(list[i].path.as_str()), list, groups, emitted, sorted);
        }
    }
}
