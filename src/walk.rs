//! Domain walkers: four sibling pure functions that lower one element's
//! decorations, scales, palettes, and effects sub-schemas into style-key
//! branches via the key grammar.

use crate::errors::CompileError;
use crate::key::{build_key, num_value, KeyParams, StyleKey};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tokenpress_schema::model::{
    ColorSpec, Decorations, EffectsSchema, FontStack, RadiusBucket, RadiusValue, ScaleValue,
    SelectedSpec, ShadowChannel, ShadowSchema, SizeScale, ALL_SIZES,
};
use tokenpress_schema::{
    ColorValue, EmphasisVariant, Hsla, InteractionState, PaletteSchema, DEFAULT_BREAKPOINT,
};

/// size-or-state token -> keys
pub type BucketBranch = BTreeMap<String, Vec<StyleKey>>;
/// palette -> `{semantic}:{emphasis}` -> state token -> keys
pub type PaletteBranch = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<StyleKey>>>>;

/// Flat properties -> one base key each, in declaration order.
pub fn walk_decorations(decorations: &Decorations) -> Result<Vec<StyleKey>, CompileError> {
    let mut keys = Vec::new();

    if let Some(font) = &decorations.text_font {
        let value = match font {
            FontStack::Single(name) => Value::String(name.clone()),
            FontStack::Stack(names) => Value::Array(
                names.iter().cloned().map(Value::String).collect(),
            ),
        };
        keys.push(build_key("textFont", &value, &KeyParams::default())?);
    }
    if let Some(italic) = decorations.text_italic {
        keys.push(build_key("textItalic", &Value::Bool(italic), &KeyParams::default())?);
    }
    if let Some(weight) = decorations.text_weight {
        keys.push(build_key("textWeight", &Value::from(weight), &KeyParams::default())?);
    }
    if let Some(line_type) = decorations.text_line_type {
        let value = Value::String(line_type.as_token().to_string());
        keys.push(build_key("textLineType", &value, &KeyParams::default())?);
    }
    if let Some(align) = decorations.text_align {
        let value = Value::String(align.as_token().to_string());
        keys.push(build_key("textAlign", &value, &KeyParams::default())?);
    }
    if let Some(style) = decorations.border_style {
        let value = Value::String(style.as_token().to_string());
        keys.push(build_key("borderStyle", &value, &KeyParams::default())?);
    }

    Ok(keys)
}

/// Scale properties, bucketed by size token. A direct number lands under
/// the synthetic all-sizes bucket as a size-less key; the default
/// breakpoint omits the breakpoint segment.
pub fn walk_scales(
    scales: &BTreeMap<String, ScaleValue>,
) -> Result<BucketBranch, CompileError> {
    let mut out = BucketBranch::new();

    for (property, value) in scales {
        match value {
            ScaleValue::Fixed(n) => {
                let key = build_key(property, &num_value(*n), &KeyParams::default())?;
                out.entry(ALL_SIZES.to_string()).or_default().push(key);
            }
            ScaleValue::Sized(sizes) => {
                for (size, scale) in sizes {
                    let bucket = out.entry(size.clone()).or_default();
                    match scale {
                        SizeScale::Fixed(n) => {
                            bucket.push(sized_key(property, *n, size, None)?);
                        }
                        SizeScale::Responsive(widths) => {
                            for (breakpoint, n) in widths {
                                let bp = (breakpoint != DEFAULT_BREAKPOINT)
                                    .then_some(breakpoint.as_str());
                                bucket.push(sized_key(property, *n, size, bp)?);
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(out)
}

/// The all-sizes token collapses to a size-less key when no breakpoint
/// narrows it.
fn sized_key(
    property: &str,
    n: f64,
    size: &str,
    breakpoint: Option<&str>,
) -> Result<StyleKey, CompileError> {
    let size = (size != ALL_SIZES || breakpoint.is_some()).then_some(size);
    build_key(
        property,
        &num_value(n),
        &KeyParams {
            size,
            breakpoint,
            ..Default::default()
        },
    )
}

/// Palette colors, bucketed `[palette][{semantic}:{emphasis}][state]`.
/// The soft/solid emphasis wrapper is mandatory; the legacy direct-state
/// shape is rejected outright.
pub fn walk_palettes(
    palettes: &BTreeMap<String, PaletteSchema>,
) -> Result<PaletteBranch, CompileError> {
    let mut out = PaletteBranch::new();

    for (palette, schema) in palettes {
        let properties = [
            ("boxColor", &schema.box_color),
            ("textColor", &schema.text_color),
            ("borderColor", &schema.border_color),
        ];
        for (property, color_spec) in properties {
            let Some(color_spec) = color_spec else { continue };
            let emphasis = match color_spec {
                ColorSpec::Emphasis(e) => e,
                ColorSpec::Legacy(_) => {
                    return Err(CompileError::LegacyColorShape(property.to_string()))
                }
            };

            let variants = [
                (EmphasisVariant::Soft, &emphasis.soft),
                (EmphasisVariant::Solid, &emphasis.solid),
            ];
            for (variant, semantics) in variants {
                let Some(semantics) = semantics else { continue };
                for (semantic, states) in semantics {
                    let semantic_bucket =
                        format!("{}:{}", semantic.as_token(), variant.as_token());

                    for (state, color) in states.plain_states() {
                        let key = color_key(property, color, Some(state), false)?;
                        push_palette(&mut out, palette, &semantic_bucket, state.as_token(), key);
                    }

                    match &states.selected {
                        Some(SelectedSpec::Color(color)) => {
                            let key = color_key(
                                property,
                                color,
                                Some(InteractionState::Selected),
                                false,
                            )?;
                            push_palette(&mut out, palette, &semantic_bucket, "selected", key);
                        }
                        Some(SelectedSpec::Nested(nested)) => {
                            for (state, color) in nested.states() {
                                let key = color_key(property, color, Some(state), true)?;
                                let bucket = format!("selected:{}", state.as_token());
                                push_palette(&mut out, palette, &semantic_bucket, &bucket, key);
                            }
                        }
                        None => {}
                    }
                }
            }
        }
    }

    Ok(out)
}

fn color_key(
    property: &str,
    color: &ColorValue,
    state: Option<InteractionState>,
    control_state: bool,
) -> Result<StyleKey, CompileError> {
    let (color, is_ref) = color.unwrap_ref();
    build_key(
        property,
        &hsla_value(property, color)?,
        &KeyParams {
            state,
            control_state,
            is_ref,
            ..Default::default()
        },
    )
}

fn hsla_value(property: &str, color: &Hsla) -> Result<Value, CompileError> {
    serde_json::to_value(color).map_err(|_| CompileError::UnsupportedValue(property.to_string()))
}

fn push_palette(out: &mut PaletteBranch, palette: &str, semantic: &str, state: &str, key: StyleKey) {
    out.entry(palette.to_string())
        .or_default()
        .entry(semantic.to_string())
        .or_default()
        .entry(state.to_string())
        .or_default()
        .push(key);
}

/// Shadow and border-radius, bucketed by state token.
pub fn walk_effects(effects: &EffectsSchema) -> Result<BucketBranch, CompileError> {
    let mut out = BucketBranch::new();
    if let Some(shadow) = &effects.shadow {
        walk_shadow(shadow, &mut out)?;
    }
    if let Some(radius) = &effects.border_radius {
        walk_radius(radius, &mut out)?;
    }
    Ok(out)
}

/// The four shadow channels are state-keyed independently in the schema but
/// CSS expresses shadow as one declaration, so they fuse into one key per
/// state. Each channel falls back state -> rest -> hard default.
fn walk_shadow(shadow: &ShadowSchema, out: &mut BucketBranch) -> Result<(), CompileError> {
    let mut states = BTreeSet::from([InteractionState::Rest]);
    for channel in [&shadow.x, &shadow.y, &shadow.blur] {
        if let Some(ShadowChannel::PerState(map)) = channel {
            states.extend(map.keys().copied());
        }
    }
    if let Some(ShadowChannel::PerState(map)) = &shadow.color {
        states.extend(map.keys().copied());
    }

    for state in states {
        let x = resolve_offset(&shadow.x, state);
        let y = resolve_offset(&shadow.y, state);
        let blur = resolve_offset(&shadow.blur, state);
        let color = resolve_shadow_color(&shadow.color, state);

        let value = Value::Array(vec![
            num_value(x),
            num_value(y),
            num_value(blur),
            hsla_value("shadow", &color)?,
        ]);
        let key = build_key(
            "shadow",
            &value,
            &KeyParams {
                state: Some(state),
                ..Default::default()
            },
        )?;
        out.entry(state.as_token().to_string()).or_default().push(key);
    }

    Ok(())
}

fn resolve_offset(channel: &Option<ShadowChannel<f64>>, state: InteractionState) -> f64 {
    match channel {
        Some(ShadowChannel::Fixed(n)) => *n,
        Some(ShadowChannel::PerState(map)) => map
            .get(&state)
            .or_else(|| map.get(&InteractionState::Rest))
            .copied()
            .unwrap_or(0.0),
        None => 0.0,
    }
}

fn resolve_shadow_color(channel: &Option<ShadowChannel<Hsla>>, state: InteractionState) -> Hsla {
    match channel {
        Some(ShadowChannel::Fixed(color)) => *color,
        Some(ShadowChannel::PerState(map)) => map
            .get(&state)
            .or_else(|| map.get(&InteractionState::Rest))
            .copied()
            .unwrap_or(Hsla::BLACK),
        None => Hsla::BLACK,
    }
}

/// Border radius shares the scale grammar plus a `selected` variant.
/// State-less keys bucket under `rest`, the selected variant under
/// `selected`.
fn walk_radius(radius: &RadiusValue, out: &mut BucketBranch) -> Result<(), CompileError> {
    match radius {
        RadiusValue::Fixed(n) => {
            let key = build_key("borderRadius", &num_value(*n), &KeyParams::default())?;
            out.entry("rest".to_string()).or_default().push(key);
        }
        RadiusValue::Buckets(buckets) => {
            for (bucket, value) in buckets {
                if bucket == "selected" {
                    let RadiusBucket::Fixed(n) = value else {
                        return Err(CompileError::UnsupportedValue("borderRadius".to_string()));
                    };
                    let key = build_key(
                        "borderRadius",
                        &num_value(*n),
                        &KeyParams {
                            state: Some(InteractionState::Selected),
                            ..Default::default()
                        },
                    )?;
                    out.entry("selected".to_string()).or_default().push(key);
                    continue;
                }

                let rest = out.entry("rest".to_string()).or_default();
                match value {
                    RadiusBucket::Fixed(n) => {
                        rest.push(sized_key("borderRadius", *n, bucket, None)?);
                    }
                    RadiusBucket::Responsive(widths) => {
                        for (breakpoint, n) in widths {
                            let bp = (breakpoint != DEFAULT_BREAKPOINT)
                                .then_some(breakpoint.as_str());
                            rest.push(sized_key("borderRadius", *n, bucket, bp)?);
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokenpress_schema::model::StateColors;

    fn keys<'a>(branch: &'a BucketBranch, bucket: &str) -> Vec<&'a str> {
        branch[bucket].iter().map(|k| k.as_str()).collect()
    }

    #[test]
    fn test_decorations_emit_base_keys_in_order() {
        let decorations: Decorations = serde_json::from_value(json!({
            "textFont": ["Inter", "sans-serif"],
            "textItalic": true,
            "textWeight": 600,
            "textLineType": "lineThrough",
            "textAlign": "center",
            "borderStyle": "solid"
        }))
        .unwrap();

        let keys: Vec<_> = walk_decorations(&decorations)
            .unwrap()
            .into_iter()
            .map(|k| k.as_str().to_string())
            .collect();
        assert_eq!(
            keys,
            [
                r#"textFont__["Inter","sans-serif"]"#,
                "textItalic__true",
                "textWeight__600",
                "textLineType__lineThrough",
                "textAlign__center",
                "borderStyle__solid",
            ]
        );
    }

    #[test]
    fn test_scales_bucket_by_size_and_omit_default_breakpoint() {
        let scales: BTreeMap<String, ScaleValue> = serde_json::from_value(json!({
            "paddingX": 12,
            "textSize": { "s:md": 14, "s:lg": { "bp:all": 16, "bp:lg:2": 18 } }
        }))
        .unwrap();

        let branch = walk_scales(&scales).unwrap();
        assert_eq!(keys(&branch, "s:all"), ["paddingX__12"]);
        assert_eq!(keys(&branch, "s:md"), ["textSize++s:md__14"]);
        assert_eq!(
            keys(&branch, "s:lg"),
            ["textSize++s:lg__16", "textSize++s:lg::bp:lg:2__18"]
        );
    }

    #[test]
    fn test_shadow_states_inherit_from_rest() {
        let effects: EffectsSchema = serde_json::from_value(json!({
            "shadow": {
                "x": { "rest": 10, "hover": 20 },
                "y": { "rest": 15 },
                "blur": { "rest": 5 },
                "color": { "rest": [0, 0, 0, 0.5] }
            }
        }))
        .unwrap();

        let branch = walk_effects(&effects).unwrap();
        assert_eq!(keys(&branch, "rest"), ["shadow__[10,15,5,[0,0,0,0.5]]"]);
        assert_eq!(
            keys(&branch, "hover"),
            ["shadow--hover__[20,15,5,[0,0,0,0.5]]"]
        );
    }

    #[test]
    fn test_shadow_missing_channels_default() {
        let effects: EffectsSchema = serde_json::from_value(json!({
            "shadow": { "y": { "hover": 4 } }
        }))
        .unwrap();

        let branch = walk_effects(&effects).unwrap();
        assert_eq!(keys(&branch, "rest"), ["shadow__[0,0,0,[0,0,0,1]]"]);
        assert_eq!(keys(&branch, "hover"), ["shadow--hover__[0,4,0,[0,0,0,1]]"]);
    }

    #[test]
    fn test_radius_buckets_and_selected() {
        let effects: EffectsSchema = serde_json::from_value(json!({
            "borderRadius": {
                "s:all": 8,
                "s:lg": { "bp:all": 10, "bp:lg:2": 12 },
                "selected": 4
            }
        }))
        .unwrap();

        let branch = walk_effects(&effects).unwrap();
        assert_eq!(
            keys(&branch, "rest"),
            [
                "borderRadius__8",
                "borderRadius++s:lg__10",
                "borderRadius++s:lg::bp:lg:2__12",
            ]
        );
        assert_eq!(keys(&branch, "selected"), ["borderRadius--selected__4"]);
    }

    #[test]
    fn test_palettes_bucket_by_semantic_and_state() {
        let palettes: BTreeMap<String, PaletteSchema> = serde_json::from_value(json!({
            "consumer.light": {
                "boxColor": {
                    "solid": {
                        "primary": {
                            "rest": [220, 80, 46, 1],
                            "hover": [220, 80, 40, 1],
                            "selected": {
                                "rest": [220, 80, 36, 1],
                                "hover": { "ref": [220, 80, 30, 1] }
                            }
                        }
                    }
                }
            }
        }))
        .unwrap();

        let branch = walk_palettes(&palettes).unwrap();
        let semantic = &branch["consumer.light"]["primary:solid"];
        assert_eq!(
            semantic["rest"][0].as_str(),
            "boxColor__[220,80,46,1]"
        );
        assert_eq!(
            semantic["hover"][0].as_str(),
            "boxColor--hover__[220,80,40,1]"
        );
        assert_eq!(
            semantic["selected:rest"][0].as_str(),
            "boxColor--selected:rest__[220,80,36,1]"
        );
        // The nested hover is a parent-gated reference.
        assert_eq!(
            semantic["selected:hover"][0].as_str(),
            "boxColor==selected:hover__[220,80,30,1]"
        );
    }

    #[test]
    fn test_legacy_color_shape_is_rejected() {
        let palettes: BTreeMap<String, PaletteSchema> = serde_json::from_value(json!({
            "consumer.light": {
                "textColor": { "rest": [0, 0, 20, 1] }
            }
        }))
        .unwrap();

        let err = walk_palettes(&palettes).unwrap_err();
        assert!(matches!(err, CompileError::LegacyColorShape(p) if p == "textColor"));
    }

    #[test]
    fn test_plain_states_iterate_in_declaration_order() {
        let states: StateColors = serde_json::from_value(json!({
            "readOnly": [0, 0, 60, 1],
            "rest": [0, 0, 50, 1]
        }))
        .unwrap();
        let order: Vec<_> = states.plain_states().map(|(s, _)| s.as_token()).collect();
        assert_eq!(order, ["rest", "readOnly"]);
    }
}
