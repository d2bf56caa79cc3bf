//! # Schema Model
//!
//! The declarative design-token schema consumed by the compiler.
//!
//! ## Responsibilities
//! - **Components**: Per-component, per-element token sub-schemas.
//! - **Value shapes**: Untagged enums for the scale / color / effect value
//!   grammars (direct value, per-size map, per-breakpoint map, per-state map).
//! - **Legacy detection**: Color properties keep an explicit `Legacy` shape so
//!   the compiler can reject untagged interaction-state maps with a
//!   descriptive error instead of silently inferring intent.
//!
//! ## Key Types
//! - `StyleSchema`: Root of a schema document.
//! - `ColorSpec`: Emphasis-wrapped palette colors (or the rejected legacy shape).
//! - `ShadowChannel`: Single-value-or-per-state shadow sub-property.

use crate::breakpoints::BreakpointTable;
use crate::color::{Hsla, SemanticColor};
use crate::state::InteractionState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The size token that means "every size". Keys bucketed under it carry no
/// size segment.
pub const ALL_SIZES: &str = "s:all";

/// Root of a schema document: the component tree plus the breakpoint table
/// supplied alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleSchema {
    pub components: BTreeMap<String, ComponentSchema>,
    #[serde(default)]
    pub breakpoints: BreakpointTable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentSchema {
    pub elements: BTreeMap<String, ElementSchema>,
}

/// One element's token sub-schemas. All four domains are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElementSchema {
    pub decorations: Option<Decorations>,
    pub scales: Option<BTreeMap<String, ScaleValue>>,
    pub palettes: Option<BTreeMap<String, PaletteSchema>>,
    pub effects: Option<EffectsSchema>,
}

// --- Decorations ---

/// Flat, state-less, size-less visual properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Decorations {
    pub text_font: Option<FontStack>,
    pub text_italic: Option<bool>,
    pub text_weight: Option<u16>,
    pub text_line_type: Option<LineType>,
    pub text_align: Option<TextAlign>,
    pub border_style: Option<BorderStyleKind>,
}

/// A single family name or an ordered fallback stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FontStack {
    Single(String),
    Stack(Vec<String>),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LineType {
    None,
    Underline,
    Overline,
    LineThrough,
}

impl LineType {
    pub fn as_token(&self) -> &'static str {
        match self {
            LineType::None => "none",
            LineType::Underline => "underline",
            LineType::Overline => "overline",
            LineType::LineThrough => "lineThrough",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_token(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyleKind {
    None,
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl BorderStyleKind {
    pub fn as_token(&self) -> &'static str {
        match self {
            BorderStyleKind::None => "none",
            BorderStyleKind::Solid => "solid",
            BorderStyleKind::Dashed => "dashed",
            BorderStyleKind::Dotted => "dotted",
            BorderStyleKind::Double => "double",
        }
    }
}

// --- Scales ---

/// A responsive size scale value: one number for every size, a per-size map,
/// or a per-size map of per-breakpoint numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScaleValue {
    Fixed(f64),
    Sized(BTreeMap<String, SizeScale>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SizeScale {
    Fixed(f64),
    Responsive(BTreeMap<String, f64>),
}

// --- Palettes ---

/// One palette (segment-and-theme combination) of an element.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteSchema {
    pub box_color: Option<ColorSpec>,
    pub text_color: Option<ColorSpec>,
    pub border_color: Option<ColorSpec>,
}

/// A color property's value. The emphasis wrapper is mandatory; a direct
/// interaction-state map at the property root parses into `Legacy` and is
/// rejected by the compiler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    Emphasis(EmphasisColors),
    Legacy(BTreeMap<String, serde_json::Value>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct EmphasisColors {
    pub soft: Option<BTreeMap<SemanticColor, StateColors>>,
    pub solid: Option<BTreeMap<SemanticColor, StateColors>>,
}

/// Per-interaction-state colors for one semantic color. `selected` may be a
/// single color or a nested control-state sub-map; `disabled` and `readOnly`
/// are global-precedence states and never nest inside it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StateColors {
    pub rest: Option<ColorValue>,
    pub hover: Option<ColorValue>,
    pub pressed: Option<ColorValue>,
    pub focus: Option<ColorValue>,
    pub disabled: Option<ColorValue>,
    pub read_only: Option<ColorValue>,
    pub selected: Option<SelectedSpec>,
}

impl StateColors {
    /// The plain (non-selected) states in declaration order.
    pub fn plain_states(&self) -> impl Iterator<Item = (InteractionState, &ColorValue)> {
        [
            (InteractionState::Rest, &self.rest),
            (InteractionState::Hover, &self.hover),
            (InteractionState::Pressed, &self.pressed),
            (InteractionState::Focus, &self.focus),
            (InteractionState::Disabled, &self.disabled),
            (InteractionState::ReadOnly, &self.read_only),
        ]
        .into_iter()
        .filter_map(|(state, value)| value.as_ref().map(|v| (state, v)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SelectedSpec {
    Color(ColorValue),
    Nested(ControlStateColors),
}

/// Variants that apply only while the element is toggled on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ControlStateColors {
    pub rest: Option<ColorValue>,
    pub hover: Option<ColorValue>,
    pub pressed: Option<ColorValue>,
    pub focus: Option<ColorValue>,
}

impl ControlStateColors {
    pub fn states(&self) -> impl Iterator<Item = (InteractionState, &ColorValue)> {
        [
            (InteractionState::Rest, &self.rest),
            (InteractionState::Hover, &self.hover),
            (InteractionState::Pressed, &self.pressed),
            (InteractionState::Focus, &self.focus),
        ]
        .into_iter()
        .filter_map(|(state, value)| value.as_ref().map(|v| (state, v)))
    }
}

/// A direct color, or a reference wrapper meaning the color applies while a
/// *parent* element is in the keyed state rather than the element itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColorValue {
    Reference {
        #[serde(rename = "ref")]
        reference: Hsla,
    },
    Direct(Hsla),
}

impl ColorValue {
    /// The wrapped color and whether it is parent-gated.
    pub fn unwrap_ref(&self) -> (&Hsla, bool) {
        match self {
            ColorValue::Reference { reference } => (reference, true),
            ColorValue::Direct(color) => (color, false),
        }
    }
}

// --- Effects ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectsSchema {
    pub shadow: Option<ShadowSchema>,
    pub border_radius: Option<RadiusValue>,
}

/// The four independently state-keyed shadow channels. CSS expresses shadow
/// as one declaration, so the compiler fuses these per state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadowSchema {
    pub x: Option<ShadowChannel<f64>>,
    pub y: Option<ShadowChannel<f64>>,
    pub blur: Option<ShadowChannel<f64>>,
    pub color: Option<ShadowChannel<Hsla>>,
}

/// A shadow channel: a single value (applies at rest) or a per-state map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ShadowChannel<T> {
    Fixed(T),
    PerState(BTreeMap<InteractionState, T>),
}

/// Border radius: the same base/selected/size grammar as scales. Map keys
/// are size tokens, or `selected` for the toggled-on variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RadiusValue {
    Fixed(f64),
    Buckets(BTreeMap<String, RadiusBucket>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RadiusBucket {
    Fixed(f64),
    Responsive(BTreeMap<String, f64>),
}
