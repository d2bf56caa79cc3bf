use serde::Serialize;
use std::collections::BTreeMap;

use crate::key::StyleKey;

/// One element's accumulated leaves, bucketed by domain. `T` is a
/// [`StyleKey`] while compiling and a shortened class token after
/// projection; both sides share this exact shape, which is the runtime
/// lookup contract.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ElementNode<T> {
    pub decorations: Vec<T>,
    /// size token -> leaves
    pub scales: BTreeMap<String, Vec<T>>,
    /// state token -> leaves
    pub effects: BTreeMap<String, Vec<T>>,
    /// palette -> `{semantic}:{emphasis}` -> state token -> leaves
    pub palettes: BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<T>>>>,
}

// Manual impl: `#[derive(Default)]` would bound `T: Default`.
impl<T> Default for ElementNode<T> {
    fn default() -> Self {
        Self {
            decorations: Vec::new(),
            scales: BTreeMap::new(),
            effects: BTreeMap::new(),
            palettes: BTreeMap::new(),
        }
    }
}

impl<T> ElementNode<T> {
    /// Create-path-if-missing append into a palette bucket.
    pub fn push_palette(&mut self, palette: &str, semantic: &str, state: &str, leaf: T) {
        self.palettes
            .entry(palette.to_string())
            .or_default()
            .entry(semantic.to_string())
            .or_default()
            .entry(state.to_string())
            .or_default()
            .push(leaf);
    }

    fn map<U>(&self, f: &impl Fn(&T) -> U) -> ElementNode<U> {
        ElementNode {
            decorations: self.decorations.iter().map(f).collect(),
            scales: map_lists(&self.scales, f),
            effects: map_lists(&self.effects, f),
            palettes: self
                .palettes
                .iter()
                .map(|(palette, semantics)| {
                    let semantics = semantics
                        .iter()
                        .map(|(semantic, states)| (semantic.clone(), map_lists(states, f)))
                        .collect();
                    (palette.clone(), semantics)
                })
                .collect(),
        }
    }

    fn for_each(&self, f: &mut impl FnMut(&T)) {
        self.decorations.iter().for_each(&mut *f);
        for leaves in self.scales.values() {
            leaves.iter().for_each(&mut *f);
        }
        for leaves in self.effects.values() {
            leaves.iter().for_each(&mut *f);
        }
        for semantics in self.palettes.values() {
            for states in semantics.values() {
                for leaves in states.values() {
                    leaves.iter().for_each(&mut *f);
                }
            }
        }
    }
}

fn map_lists<T, U>(
    buckets: &BTreeMap<String, Vec<T>>,
    f: &impl Fn(&T) -> U,
) -> BTreeMap<String, Vec<U>> {
    buckets
        .iter()
        .map(|(bucket, leaves)| (bucket.clone(), leaves.iter().map(f).collect()))
        .collect()
}

/// `component -> element -> ElementNode`. Ordered maps keep every traversal
/// deterministic; arrays accumulate and are never overwritten.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ThemeTree<T> {
    pub components: BTreeMap<String, BTreeMap<String, ElementNode<T>>>,
}

impl<T> Default for ThemeTree<T> {
    fn default() -> Self {
        Self {
            components: BTreeMap::new(),
        }
    }
}

impl<T> ThemeTree<T> {
    /// The create-path-if-missing accessor every walker funnels through.
    pub fn element_mut(&mut self, component: &str, element: &str) -> &mut ElementNode<T> {
        self.components
            .entry(component.to_string())
            .or_default()
            .entry(element.to_string())
            .or_default()
    }

    /// Rebuilds the tree with every leaf transformed, preserving shape.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> ThemeTree<U> {
        ThemeTree {
            components: self
                .components
                .iter()
                .map(|(component, elements)| {
                    let elements = elements
                        .iter()
                        .map(|(element, node)| (element.clone(), node.map(&f)))
                        .collect();
                    (component.clone(), elements)
                })
                .collect(),
        }
    }

    /// Visits every leaf in deterministic traversal order.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        for elements in self.components.values() {
            for node in elements.values() {
                node.for_each(&mut f);
            }
        }
    }
}

pub type StyleKeyTree = ThemeTree<StyleKey>;
pub type ClassNameTree = ThemeTree<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_path_accumulates() {
        let mut node: ElementNode<u32> = ElementNode::default();
        node.push_palette("consumer.light", "primary:solid", "rest", 1);
        node.push_palette("consumer.light", "primary:solid", "rest", 2);
        assert_eq!(
            node.palettes["consumer.light"]["primary:solid"]["rest"],
            vec![1, 2]
        );
    }

    #[test]
    fn test_map_preserves_shape() {
        let mut tree: ThemeTree<u32> = ThemeTree::default();
        let node = tree.element_mut("button", "root");
        node.decorations.push(1);
        node.scales.entry("s:md".to_string()).or_default().push(2);
        node.effects.entry("hover".to_string()).or_default().push(3);
        node.push_palette("p", "primary:soft", "rest", 4);

        let doubled = tree.map(|n| n * 2);
        let node = &doubled.components["button"]["root"];
        assert_eq!(node.decorations, vec![2]);
        assert_eq!(node.scales["s:md"], vec![4]);
        assert_eq!(node.effects["hover"], vec![6]);
        assert_eq!(node.palettes["p"]["primary:soft"]["rest"], vec![8]);
    }

    #[test]
    fn test_for_each_visits_every_leaf() {
        let mut tree: ThemeTree<u32> = ThemeTree::default();
        let node = tree.element_mut("button", "root");
        node.decorations.push(1);
        node.effects.entry("rest".to_string()).or_default().push(2);
        node.push_palette("p", "neutral:solid", "hover", 3);

        let mut seen = Vec::new();
        tree.for_each(|n| seen.push(*n));
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
