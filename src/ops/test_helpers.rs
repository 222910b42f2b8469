//! Shared fixtures for ops unit tests.

use crate::model::category::{Category, CategoryId};

/// Build a persisted category whose id and `en` name are both `key`.
pub fn cat(key: &str, path: &str, parent: Option<&str>, level: u32, order: u32) -> Category {
    let mut c = Category::new(CategoryId::Persisted(key.to_string()), path, key);
    c.parent_path = parent.map(|p| p.to_string());
    c.level = level;
    c.display_order = order;
    c
}

/// A small canonical (pre-order) catalog:
///
/// ```text
/// 0 skincare   1
/// 1   cleansers  1.1
/// 2     foams      1.1.1
/// 3     oils       1.1.2
/// 4   serums     1.2
/// 5 makeup     2
/// 6   lips       2.1
/// 7 haircare   3
/// ```
pub fn sample_catalog() -> Vec<Category> {
    vec![
        cat("skincare", "1", None, 1, 1),
        cat("cleansers", "1.1", Some("1"), 2, 1),
        cat("foams", "1.1.1", Some("1.1"), 3, 1),
        cat("oils", "1.1.2", Some("1.1"), 3, 2),
        cat("serums", "1.2", Some("1"), 2, 2),
        cat("makeup", "2", None, 1, 2),
        cat("lips", "2.1", Some("2"), 2, 1),
        cat("haircare", "3", None, 1, 3),
    ]
}

pub fn by_key<'a>(list: &'a [Category], key: &str) -> &'a Category {
    list.iter()
        .find(|c| c.id.as_str() == key)
        .unwrap_or_else(|| panic!("no category {}", key))
}

pub fn key(c: &Category) -> &str {
    c.id.as_str()
}

pub fn keys<'a>(list: &[&'a Category]) -> Vec<&'a str> {
    list.iter().map(|c| c.id.as_str()).collect()
}

pub fn order_keys(list: &[Category]) -> Vec<&str> {
    list.iter().map(|c| c.id.as_str()).collect()
}
