//! # tokenpress
//!
//! Compiles a declarative design-token schema (per-component decorations,
//! responsive size scales, multi-palette colors, interaction-state effects)
//! into deduplicated CSS bundles and a JSON class-name map consumed by a
//! runtime UI layer.
//!
//! ## Pipeline
//!
//! Schema -> [`SchemaCompiler`] -> style-key tree -> [`count_usage`] ->
//! [`assign_names`] -> { [`CssCodegen`] -> CSS bundles ;
//! [`project_class_map`] -> class-name tree }.
//!
//! Every stage is synchronous and purely functional; identical input yields
//! byte-identical output.

pub mod classmap;
pub mod compiler;
pub mod css;
pub mod errors;
pub mod key;
pub mod shorten;
pub mod tree;
pub mod usage;
pub mod walk;

pub use classmap::project_class_map;
pub use compiler::SchemaCompiler;
pub use css::{CodegenOptions, CssBundles, CssCodegen};
pub use errors::CompileError;
pub use key::{build_key, KeyParams, StyleKey};
pub use shorten::{assign_names, short_name, ShortenMap};
pub use tree::{ClassNameTree, ElementNode, StyleKeyTree, ThemeTree};
pub use usage::count_usage;

use tokenpress_schema::StyleSchema;
use tracing::instrument;

/// Everything one build produces.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub css: CssBundles,
    pub class_map: ClassNameTree,
    pub shorten: ShortenMap,
}

/// Runs the full pipeline over a schema.
#[instrument(skip_all)]
pub fn compile(schema: &StyleSchema, options: CodegenOptions) -> Result<Compiled, CompileError> {
    let tree = SchemaCompiler::compile(schema)?;
    let frequency = count_usage(&tree);
    let shorten = assign_names(&frequency);
    let css = CssCodegen::new(&shorten, &schema.breakpoints, options).generate(&tree)?;
    let class_map = project_class_map(&tree, &shorten);
    Ok(Compiled {
        css,
        class_map,
        shorten,
    })
}
