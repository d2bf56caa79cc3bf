use crate::shorten::ShortenMap;
use crate::tree::{ClassNameTree, StyleKeyTree};

/// Re-walks the style-key tree, replacing every leaf with its shortened
/// token (or the original key when no mapping exists), preserving the exact
/// tree shape the runtime looks classes up through.
pub fn project_class_map(tree: &StyleKeyTree, shorten: &ShortenMap) -> ClassNameTree {
    tree.map(|key| {
        shorten
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.as_str().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{build_key, KeyParams};
    use crate::tree::ThemeTree;
    use serde_json::json;

    #[test]
    fn test_projection_preserves_shape_and_falls_back() {
        let mapped = build_key("textWeight", &json!(600), &KeyParams::default()).unwrap();
        let unmapped = build_key("textWeight", &json!(400), &KeyParams::default()).unwrap();

        let mut tree = ThemeTree::default();
        let node = tree.element_mut("button", "root");
        node.decorations.push(mapped.clone());
        node.push_palette("consumer.light", "primary:solid", "rest", unmapped.clone());

        let mut shorten = ShortenMap::new();
        shorten.insert(mapped, "a".to_string());

        let class_map = project_class_map(&tree, &shorten);
        let node = &class_map.components["button"]["root"];
        assert_eq!(node.decorations, vec!["a"]);
        // Unmapped keys fall back to their original text.
        assert_eq!(
            node.palettes["consumer.light"]["primary:solid"]["rest"],
            vec!["textWeight__400"]
        );
    }

    #[test]
    fn test_selected_tokens_stay_in_their_semantic_bucket() {
        let primary = build_key(
            "boxColor",
            &json!([220, 80, 36, 1]),
            &KeyParams {
                state: Some(tokenpress_schema::InteractionState::Rest),
                control_state: true,
                ..Default::default()
            },
        )
        .unwrap();
        let neutral = build_key(
            "boxColor",
            &json!([0, 0, 36, 1]),
            &KeyParams {
                state: Some(tokenpress_schema::InteractionState::Rest),
                control_state: true,
                ..Default::default()
            },
        )
        .unwrap();

        let mut tree = ThemeTree::default();
        let node = tree.element_mut("chip", "root");
        node.push_palette("consumer.light", "primary:solid", "selected:rest", primary.clone());
        node.push_palette("consumer.light", "neutral:solid", "selected:rest", neutral.clone());

        let mut shorten = ShortenMap::new();
        shorten.insert(primary, "a".to_string());
        shorten.insert(neutral, "b".to_string());

        // Each semantic bucket keeps its own selected token; they are never
        // unioned into one shared bucket.
        let class_map = project_class_map(&tree, &shorten);
        let palettes = &class_map.components["chip"]["root"].palettes["consumer.light"];
        assert_eq!(palettes["primary:solid"]["selected:rest"], vec!["a"]);
        assert_eq!(palettes["neutral:solid"]["selected:rest"], vec!["b"]);
    }
}
