use crate::errors::CompileError;
use crate::key::{BREAKPOINT_SEP, REF_SEP, SIZE_SEP, STATE_SEP, VALUE_SEP};
use tokenpress_schema::InteractionState;

/// A style key split back into its coordinates.
#[derive(Debug, PartialEq)]
pub struct DecodedKey<'a> {
    pub property: &'a str,
    /// Compound state segments (`selected:hover`) decode into one token per
    /// part; plain rest decodes to a single `Rest` token.
    pub states: Vec<InteractionState>,
    pub is_ref: bool,
    pub size: Option<&'a str>,
    pub breakpoint: Option<&'a str>,
    pub value: &'a str,
}

/// Splits a key on the fixed separators. The property prefix is validated
/// by the per-family dispatch, not here.
pub fn decode_key(key: &str) -> Result<DecodedKey<'_>, CompileError> {
    let (head, value) = key
        .split_once(VALUE_SEP)
        .ok_or_else(|| CompileError::InvalidKeyFormat(format!("missing value separator in `{key}`")))?;
    if value.is_empty() {
        return Err(CompileError::UnsupportedValue(key.to_string()));
    }

    let (property, state_segment, is_ref, size_segment) =
        if let Some((property, rest)) = head.split_once(REF_SEP) {
            (property, Some(rest), true, None)
        } else if let Some((property, rest)) = head.split_once(STATE_SEP) {
            match rest.split_once(SIZE_SEP) {
                Some((state, size)) => (property, Some(state), false, Some(size)),
                None => (property, Some(rest), false, None),
            }
        } else if let Some((property, size)) = head.split_once(SIZE_SEP) {
            (property, None, false, Some(size))
        } else {
            (head, None, false, None)
        };

    if property.is_empty() {
        return Err(CompileError::InvalidKeyFormat(format!(
            "missing property prefix in `{key}`"
        )));
    }

    let (size, breakpoint) = match size_segment {
        Some(segment) => match segment.split_once(BREAKPOINT_SEP) {
            Some((size, bp)) => (Some(size), Some(bp)),
            None => (Some(segment), None),
        },
        None => (None, None),
    };

    let states = match state_segment {
        Some(segment) => {
            if segment.is_empty() {
                return Err(CompileError::InvalidKeyFormat(format!(
                    "empty state segment in `{key}`"
                )));
            }
            segment
                .split(':')
                .map(|token| {
                    InteractionState::from_token(token)
                        .ok_or_else(|| CompileError::UnsupportedState(token.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        None => Vec::new(),
    };

    if is_ref && states.iter().all(|s| *s == InteractionState::Rest) {
        return Err(CompileError::ReferenceRequiresState(key.to_string()));
    }

    Ok(DecodedKey {
        property,
        states,
        is_ref,
        size,
        breakpoint,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base_key() {
        let decoded = decode_key("textWeight__600").unwrap();
        assert_eq!(decoded.property, "textWeight");
        assert!(decoded.states.is_empty());
        assert!(!decoded.is_ref);
        assert_eq!(decoded.value, "600");
    }

    #[test]
    fn test_decode_compound_state() {
        let decoded = decode_key("boxColor--selected:hover__[220,80,30,1]").unwrap();
        assert_eq!(
            decoded.states,
            vec![InteractionState::Selected, InteractionState::Hover]
        );
        assert_eq!(decoded.value, "[220,80,30,1]");
    }

    #[test]
    fn test_decode_sized_key_with_breakpoint() {
        let decoded = decode_key("textSize++s:lg::bp:lg:2__18").unwrap();
        assert_eq!(decoded.property, "textSize");
        assert_eq!(decoded.size, Some("s:lg"));
        assert_eq!(decoded.breakpoint, Some("bp:lg:2"));
        assert_eq!(decoded.value, "18");
    }

    #[test]
    fn test_decode_stated_sized_key() {
        let decoded = decode_key("borderRadius--selected++s:md__4").unwrap();
        assert_eq!(decoded.states, vec![InteractionState::Selected]);
        assert_eq!(decoded.size, Some("s:md"));
        assert_eq!(decoded.breakpoint, None);
    }

    #[test]
    fn test_decode_reference_key() {
        let decoded = decode_key("boxColor==hover__[240,50,50,0.5]").unwrap();
        assert!(decoded.is_ref);
        assert_eq!(decoded.states, vec![InteractionState::Hover]);
    }

    #[test]
    fn test_reference_with_rest_state_errors() {
        let err = decode_key("boxColor==rest__[0,0,0,1]").unwrap_err();
        assert!(matches!(err, CompileError::ReferenceRequiresState(_)));
    }

    #[test]
    fn test_unknown_state_errors() {
        let err = decode_key("boxColor--active__[0,0,0,1]").unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedState(token) if token == "active"));
    }

    #[test]
    fn test_malformed_keys_error() {
        assert!(matches!(
            decode_key("boxColor"),
            Err(CompileError::InvalidKeyFormat(_))
        ));
        assert!(matches!(
            decode_key("boxColor__"),
            Err(CompileError::UnsupportedValue(_))
        ));
        assert!(matches!(
            decode_key("__600"),
            Err(CompileError::InvalidKeyFormat(_))
        ));
    }
}
