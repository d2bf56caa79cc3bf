use crate::errors::CompileError;
use crate::tree::StyleKeyTree;
use crate::walk::{walk_decorations, walk_effects, walk_palettes, walk_scales};
use tracing::{debug, instrument};
use tokenpress_schema::StyleSchema;

/// Drives the four domain walkers over every component and element of a
/// schema, accumulating a single style-key tree.
pub struct SchemaCompiler;

impl SchemaCompiler {
    #[instrument(skip_all)]
    pub fn compile(schema: &StyleSchema) -> Result<StyleKeyTree, CompileError> {
        let mut tree = StyleKeyTree::default();

        for (component, component_schema) in &schema.components {
            for (element, element_schema) in &component_schema.elements {
                let node = tree.element_mut(component, element);

                if let Some(decorations) = &element_schema.decorations {
                    node.decorations.extend(walk_decorations(decorations)?);
                }
                if let Some(scales) = &element_schema.scales {
                    for (size, keys) in walk_scales(scales)? {
                        node.scales.entry(size).or_default().extend(keys);
                    }
                }
                if let Some(effects) = &element_schema.effects {
                    for (state, keys) in walk_effects(effects)? {
                        node.effects.entry(state).or_default().extend(keys);
                    }
                }
                if let Some(palettes) = &element_schema.palettes {
                    for (palette, semantics) in walk_palettes(palettes)? {
                        for (semantic, states) in semantics {
                            for (state, keys) in states {
                                for key in keys {
                                    node.push_palette(&palette, &semantic, &state, key);
                                }
                            }
                        }
                    }
                }
            }
        }

        debug!(components = schema.components.len(), "compiled schema into style keys");
        Ok(tree)
    }
}
