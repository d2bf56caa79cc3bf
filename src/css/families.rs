//! Per-property-family decoding of style keys into CSS rules.

use crate::css::decode::decode_key;
use crate::css::format::{format_number, hsla_to_hex, parse_dimension, parse_hsla, parse_shadow, px};
use crate::css::selector::{state_selectors, SHADOW_GATE_CLASS};
use crate::errors::CompileError;
use crate::key::StyleKey;
use tokenpress_schema::BreakpointTable;

/// One generated rule: a selector list, its declarations, and the media
/// minimum width when the key carried a breakpoint.
#[derive(Debug, PartialEq)]
pub struct CssRule {
    pub selectors: Vec<String>,
    pub declarations: Vec<(&'static str, String)>,
    pub min_width: Option<u32>,
}

/// Scale properties and the CSS property each one drives.
fn dimension_css_property(property: &str) -> Option<&'static str> {
    match property {
        "textSize" => Some("font-size"),
        "textHeight" => Some("line-height"),
        "paddingX" => Some("padding-inline"),
        "paddingY" => Some("padding-block"),
        "gap" => Some("gap"),
        "height" => Some("height"),
        "minWidth" => Some("min-width"),
        "borderWidth" => Some("border-width"),
        _ => None,
    }
}

/// Decodes one key and produces its rule, with `class` as the target.
pub fn rule_for_key(
    key: &StyleKey,
    class: &str,
    force_states: bool,
    breakpoints: &BreakpointTable,
) -> Result<CssRule, CompileError> {
    let decoded = decode_key(key.as_str())?;
    let raw = key.as_str();

    let min_width = match decoded.breakpoint {
        Some(token) => Some(
            breakpoints
                .min_width(token)
                .ok_or_else(|| CompileError::UnknownBreakpoint(token.to_string()))?,
        ),
        None => None,
    };

    let bare = || vec![format!(".{class}")];
    let target = format!(".{class}");

    let (selectors, declarations) = match decoded.property {
        "textFont" => (bare(), vec![("font-family", font_family(raw, decoded.value)?)]),
        "textItalic" => {
            let style = match decoded.value {
                "true" => "italic",
                "false" => "normal",
                _ => return Err(CompileError::UnsupportedValue(raw.to_string())),
            };
            (bare(), vec![("font-style", style.to_string())])
        }
        "textWeight" => {
            let weight = parse_dimension(raw, decoded.value)?;
            (bare(), vec![("font-weight", format_number(weight))])
        }
        "textLineType" => {
            let line = match decoded.value {
                "none" => "none",
                "underline" => "underline",
                "overline" => "overline",
                "lineThrough" => "line-through",
                _ => return Err(CompileError::UnsupportedValue(raw.to_string())),
            };
            (bare(), vec![("text-decoration-line", line.to_string())])
        }
        "textAlign" => {
            if !matches!(decoded.value, "left" | "center" | "right" | "justify") {
                return Err(CompileError::UnsupportedValue(raw.to_string()));
            }
            (bare(), vec![("text-align", decoded.value.to_string())])
        }
        "borderStyle" => {
            if !matches!(decoded.value, "none" | "solid" | "dashed" | "dotted" | "double") {
                return Err(CompileError::UnsupportedValue(raw.to_string()));
            }
            (bare(), vec![("border-style", decoded.value.to_string())])
        }
        "boxColor" | "textColor" | "borderColor" => {
            let css_property = match decoded.property {
                "boxColor" => "background-color",
                "textColor" => "color",
                _ => "border-color",
            };
            let hex = hsla_to_hex(&parse_hsla(raw, decoded.value)?);
            let selectors =
                state_selectors(&target, &decoded.states, decoded.is_ref, force_states);
            (selectors, vec![(css_property, hex)])
        }
        "shadow" => {
            let (x, y, blur, color) = parse_shadow(raw, decoded.value)?;
            let value = format!("{} {} {} {}", px(x), px(y), px(blur), hsla_to_hex(&color));
            // Shadows only apply while the enable gate is present.
            let gated = format!(".{class}.{SHADOW_GATE_CLASS}");
            let selectors =
                state_selectors(&gated, &decoded.states, decoded.is_ref, force_states);
            (selectors, vec![("box-shadow", value)])
        }
        "borderRadius" => {
            let radius = parse_dimension(raw, decoded.value)?;
            let selectors =
                state_selectors(&target, &decoded.states, decoded.is_ref, force_states);
            (selectors, vec![("border-radius", px(radius))])
        }
        property => match dimension_css_property(property) {
            Some(css_property) => {
                let length = parse_dimension(raw, decoded.value)?;
                (bare(), vec![(css_property, px(length))])
            }
            None => {
                return Err(CompileError::UnsupportedProperty {
                    property: property.to_string(),
                    key: raw.to_string(),
                })
            }
        },
    };

    Ok(CssRule {
        selectors,
        declarations,
        min_width,
    })
}

/// A font stack value is either a plain name or a JSON array of names;
/// names containing whitespace are quoted.
fn font_family(key: &str, raw: &str) -> Result<String, CompileError> {
    if !raw.starts_with('[') {
        return Ok(raw.to_string());
    }
    let names: Vec<String> =
        serde_json::from_str(raw).map_err(|_| CompileError::UnsupportedValue(key.to_string()))?;
    if names.is_empty() {
        return Err(CompileError::UnsupportedValue(key.to_string()));
    }
    let quoted: Vec<String> = names
        .into_iter()
        .map(|name| {
            if name.contains(char::is_whitespace) {
                format!("\"{name}\"")
            } else {
                name
            }
        })
        .collect();
    Ok(quoted.join(", "))
}
