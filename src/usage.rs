use crate::key::StyleKey;
use crate::tree::StyleKeyTree;
use std::collections::BTreeMap;

/// Counts every style-key leaf occurrence across the tree.
///
/// Entries come back sorted by count descending, ties broken by key
/// ascending. Name shortening depends on this exact order.
pub fn count_usage(tree: &StyleKeyTree) -> Vec<(StyleKey, usize)> {
    let mut counts: BTreeMap<StyleKey, usize> = BTreeMap::new();
    tree.for_each(|key| {
        *counts.entry(key.clone()).or_insert(0) += 1;
    });

    let mut entries: Vec<(StyleKey, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{build_key, KeyParams};
    use crate::tree::ThemeTree;
    use serde_json::json;

    fn key(property: &str, value: i64) -> StyleKey {
        build_key(property, &json!(value), &KeyParams::default()).unwrap()
    }

    #[test]
    fn test_counts_sort_by_frequency_then_key() {
        let mut tree = ThemeTree::default();
        let node = tree.element_mut("button", "root");
        node.decorations.push(key("textWeight", 600));
        node.decorations.push(key("textWeight", 400));
        let label = tree.element_mut("button", "label");
        label.decorations.push(key("textWeight", 400));

        let entries = count_usage(&tree);
        assert_eq!(entries[0].0.as_str(), "textWeight__400");
        assert_eq!(entries[0].1, 2);
        assert_eq!(entries[1].0.as_str(), "textWeight__600");
        assert_eq!(entries[1].1, 1);
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let mut tree = ThemeTree::default();
        let node = tree.element_mut("button", "root");
        node.decorations.push(key("textWeight", 700));
        node.decorations.push(key("textWeight", 100));

        let entries = count_usage(&tree);
        assert_eq!(entries[0].0.as_str(), "textWeight__100");
        assert_eq!(entries[1].0.as_str(), "textWeight__700");
    }
}
