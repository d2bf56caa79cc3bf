//! # CSS Codegen
//!
//! Decodes style keys back into CSS rules and assembles the output bundles.
//!
//! ## Responsibilities
//! - **Decoding**: Split keys on the fixed separators, per property family.
//! - **Selectors**: Native pseudo-class and forced-activator branches.
//! - **Partitioning**: Core / effects / per-palette bundles.
//! - **Media**: Breakpoint tokens resolve to `@media (min-width)` wrappers.
//!
//! ## Key Types
//! - `CssCodegen`: The bundle generator.
//! - `CssBundles`: Core, effects, and per-palette CSS text.

pub mod decode;
pub mod families;
pub mod format;
pub mod media;
pub mod selector;

use crate::errors::CompileError;
use crate::key::StyleKey;
use crate::shorten::ShortenMap;
use crate::tree::StyleKeyTree;
use families::{rule_for_key, CssRule};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};
use tokenpress_schema::BreakpointTable;

/// Codegen switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodegenOptions {
    /// Also emit activator-gated forced-state selectors for states that have
    /// a native pseudo-class. `disabled`/`readOnly` branches are emitted
    /// regardless.
    pub force_states: bool,
}

/// The three logical CSS partitions. Palette-colored rules never appear in
/// core or effects, and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub struct CssBundles {
    /// Decorations, scales, and state-independent effect declarations.
    pub core: String,
    /// Interaction-state-gated effect declarations.
    pub effects: String,
    /// palette name -> color declarations.
    pub palettes: BTreeMap<String, String>,
}

/// Turns a style-key tree plus its shorten map into sorted CSS bundles.
pub struct CssCodegen<'a> {
    shorten: &'a ShortenMap,
    breakpoints: &'a BreakpointTable,
    options: CodegenOptions,
}

impl<'a> CssCodegen<'a> {
    pub fn new(
        shorten: &'a ShortenMap,
        breakpoints: &'a BreakpointTable,
        options: CodegenOptions,
    ) -> Self {
        Self {
            shorten,
            breakpoints,
            options,
        }
    }

    #[instrument(skip_all)]
    pub fn generate(&self, tree: &StyleKeyTree) -> Result<CssBundles, CompileError> {
        let mut core: BTreeSet<&StyleKey> = BTreeSet::new();
        let mut effects: BTreeSet<&StyleKey> = BTreeSet::new();
        let mut palettes: BTreeMap<&str, BTreeSet<&StyleKey>> = BTreeMap::new();

        for elements in tree.components.values() {
            for node in elements.values() {
                core.extend(node.decorations.iter());
                for keys in node.scales.values() {
                    core.extend(keys.iter());
                }
                for (state, keys) in &node.effects {
                    if state == "rest" {
                        core.extend(keys.iter());
                    } else {
                        effects.extend(keys.iter());
                    }
                }
                for (palette, semantics) in &node.palettes {
                    let bucket = palettes.entry(palette.as_str()).or_default();
                    for states in semantics.values() {
                        for keys in states.values() {
                            bucket.extend(keys.iter());
                        }
                    }
                }
            }
        }

        debug!(
            core = core.len(),
            effects = effects.len(),
            palettes = palettes.len(),
            "partitioned distinct style keys"
        );

        let core_css = self.render_bundle(&core)?;
        let effects_css = self.render_bundle(&effects)?;

        // Palette slices are independent; render them in parallel and
        // collect back into an ordered map.
        let palette_slices: Vec<(&str, BTreeSet<&StyleKey>)> = palettes.into_iter().collect();
        let palette_css: BTreeMap<String, String> = palette_slices
            .par_iter()
            .map(|(palette, keys)| {
                Ok((palette.to_string(), self.render_bundle(keys)?))
            })
            .collect::<Result<_, CompileError>>()?;

        Ok(CssBundles {
            core: core_css,
            effects: effects_css,
            palettes: palette_css,
        })
    }

    /// One rule per distinct key: non-media rules first in token order, then
    /// media rules by minimum width so identical blocks end up adjacent.
    fn render_bundle(&self, keys: &BTreeSet<&StyleKey>) -> Result<String, CompileError> {
        let mut entries: Vec<(bool, u32, usize, String, String)> = Vec::with_capacity(keys.len());

        for &key in keys {
            let class = self
                .shorten
                .get(key)
                .map(String::as_str)
                .unwrap_or_else(|| key.as_str());
            let rule = rule_for_key(key, class, self.options.force_states, self.breakpoints)?;
            entries.push((
                rule.min_width.is_some(),
                rule.min_width.unwrap_or(0),
                class.len(),
                class.to_string(),
                render_rule(&rule),
            ));
        }

        entries.sort();
        let rules: Vec<String> = entries.into_iter().map(|entry| entry.4).collect();
        Ok(rules.join("\n"))
    }
}

fn render_rule(rule: &CssRule) -> String {
    let declarations: Vec<String> = rule
        .declarations
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect();
    let body = format!(
        "{} {{ {} }}",
        rule.selectors.join(", "),
        declarations.join("; ")
    );
    match rule.min_width {
        Some(width) => format!("@media (min-width: {width}px) {{ {body} }}"),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::SchemaCompiler;
    use crate::shorten::assign_names;
    use crate::usage::count_usage;
    use serde_json::json;
    use tokenpress_schema::StyleSchema;

    fn schema() -> StyleSchema {
        serde_json::from_value(json!({
            "components": {
                "button": {
                    "elements": {
                        "root": {
                            "scales": {
                                "textSize": { "s:md": 14, "s:lg": { "bp:lg:2": 18 } }
                            },
                            "effects": {
                                "shadow": {
                                    "y": { "rest": 1, "hover": 4 },
                                    "blur": { "rest": 2, "hover": 12 }
                                }
                            },
                            "palettes": {
                                "consumer.light": {
                                    "boxColor": {
                                        "solid": { "primary": { "rest": [45, 100, 50, 1] } }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_bundle_partitioning() {
        let schema = schema();
        let tree = SchemaCompiler::compile(&schema).unwrap();
        let shorten = assign_names(&count_usage(&tree));
        let codegen = CssCodegen::new(&shorten, &schema.breakpoints, CodegenOptions::default());
        let bundles = codegen.generate(&tree).unwrap();

        // Rest-bucket shadow lives in core, hover shadow in effects.
        assert!(bundles.core.contains("box-shadow"));
        assert!(bundles.effects.contains(":hover"));

        // Palette rules appear only in their palette bundle.
        assert!(!bundles.core.contains("background-color"));
        assert!(!bundles.effects.contains("background-color"));
        assert!(bundles.palettes["consumer.light"].contains("background-color: #ffbf00"));
    }

    #[test]
    fn test_media_rules_sort_last() {
        let schema = schema();
        let tree = SchemaCompiler::compile(&schema).unwrap();
        let shorten = assign_names(&count_usage(&tree));
        let codegen = CssCodegen::new(&shorten, &schema.breakpoints, CodegenOptions::default());
        let bundles = codegen.generate(&tree).unwrap();

        let media_at = bundles.core.find("@media (min-width: 1312px)").unwrap();
        let plain_at = bundles.core.find("font-size: 14px").unwrap();
        assert!(plain_at < media_at);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let schema = schema();
        let tree = SchemaCompiler::compile(&schema).unwrap();
        let shorten = assign_names(&count_usage(&tree));
        let codegen = CssCodegen::new(&shorten, &schema.breakpoints, CodegenOptions::default());
        assert_eq!(codegen.generate(&tree).unwrap(), codegen.generate(&tree).unwrap());
    }
}
