pub mod breakpoints;
pub mod color;
pub mod model;
pub mod state;

// Re-export main types
pub use breakpoints::{BreakpointTable, DEFAULT_BREAKPOINT};
pub use color::{EmphasisTracks, EmphasisVariant, Hsla, SemanticColor, ThemeColors, ToneTrack};
pub use model::{
    ColorSpec, ColorValue, ComponentSchema, ControlStateColors, Decorations, EffectsSchema,
    ElementSchema, FontStack, PaletteSchema, RadiusBucket, RadiusValue, ScaleValue, SelectedSpec,
    ShadowChannel, ShadowSchema, SizeScale, StateColors, StyleSchema, ALL_SIZES,
};
pub use state::InteractionState;
