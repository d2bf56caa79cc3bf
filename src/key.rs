//! # Style Keys
//!
//! The compact string IR at the center of the pipeline. A style key encodes
//! one CSS declaration's full coordinate: property, optional interaction
//! state (possibly the compound `selected:{state}` control-state scope),
//! optional size and breakpoint tokens, parent-gated reference-ness, and the
//! value.
//!
//! ## Grammar
//! - Sized: `{prop}[--{state}]++{size}[::{bp}]__{value}`
//! - Reference: `{prop}=={state}__{value}`
//! - Inline state: `{prop}--{state}__{value}`
//! - Base: `{prop}__{value}`
//!
//! `rest` is the implicit default and is never written into size-less,
//! non-reference keys. The compound `selected:rest` is not plain rest and is
//! always written.

use crate::errors::CompileError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tokenpress_schema::InteractionState;

pub const VALUE_SEP: &str = "__";
pub const STATE_SEP: &str = "--";
pub const SIZE_SEP: &str = "++";
pub const BREAKPOINT_SEP: &str = "::";
pub const REF_SEP: &str = "==";

/// An encoded style key. Opaque and immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StyleKey(String);

impl StyleKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional coordinates of a key besides property and value.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyParams<'a> {
    pub state: Option<InteractionState>,
    /// The state is a `selected:{state}` control-state variant.
    pub control_state: bool,
    /// The value applies under a parent element's state.
    pub is_ref: bool,
    pub size: Option<&'a str>,
    pub breakpoint: Option<&'a str>,
}

/// Encodes one style key from its coordinates.
pub fn build_key(
    property: &str,
    value: &Value,
    params: &KeyParams<'_>,
) -> Result<StyleKey, CompileError> {
    let resolved = resolve_state(params)?;
    let value_text = encode_value(property, value)?;

    let key = if let Some(size) = params.size {
        let mut head = String::from(property);
        if let Some(state) = &resolved {
            head.push_str(STATE_SEP);
            head.push_str(state);
        }
        head.push_str(SIZE_SEP);
        head.push_str(size);
        if let Some(bp) = params.breakpoint {
            head.push_str(BREAKPOINT_SEP);
            head.push_str(bp);
        }
        format!("{head}{VALUE_SEP}{value_text}")
    } else if params.is_ref {
        let state = resolved
            .ok_or_else(|| CompileError::ReferenceRequiresState(property.to_string()))?;
        format!("{property}{REF_SEP}{state}{VALUE_SEP}{value_text}")
    } else if let Some(state) = resolved {
        format!("{property}{STATE_SEP}{state}{VALUE_SEP}{value_text}")
    } else {
        format!("{property}{VALUE_SEP}{value_text}")
    };

    Ok(StyleKey(key))
}

/// The state token written into the key, or `None` for the implicit rest.
fn resolve_state(params: &KeyParams<'_>) -> Result<Option<String>, CompileError> {
    if params.control_state {
        let state = params
            .state
            .ok_or_else(|| CompileError::InvalidControlState("<missing>".to_string()))?;
        if !state.is_control_variant() {
            return Err(CompileError::InvalidControlState(state.as_token().to_string()));
        }
        return Ok(Some(format!("selected:{}", state.as_token())));
    }

    Ok(params.state.and_then(|s| {
        (s != InteractionState::Rest).then(|| s.as_token().to_string())
    }))
}

/// Primitives stringify as-is; arrays and objects JSON-stringify.
fn encode_value(property: &str, value: &Value) -> Result<String, CompileError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(CompileError::UnsupportedValue(property.to_string())),
        other => serde_json::to_string(other)
            .map_err(|_| CompileError::UnsupportedValue(property.to_string())),
    }
}

/// JSON number without a trailing `.0` for whole values, so encoded keys
/// stay byte-stable.
pub(crate) fn num_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}
