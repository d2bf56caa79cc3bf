use serde::{Deserialize, Serialize};
use std::fmt;

/// Interaction states recognized across palettes and effects.
///
/// `Disabled` and `ReadOnly` are global-precedence states: they win over
/// everything else and are never nested inside a `selected` control-state
/// sub-map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum InteractionState {
    Rest,
    Hover,
    Pressed,
    Focus,
    Disabled,
    ReadOnly,
    Selected,
}

impl InteractionState {
    pub fn as_token(&self) -> &'static str {
        match self {
            InteractionState::Rest => "rest",
            InteractionState::Hover => "hover",
            InteractionState::Pressed => "pressed",
            InteractionState::Focus => "focus",
            InteractionState::Disabled => "disabled",
            InteractionState::ReadOnly => "readOnly",
            InteractionState::Selected => "selected",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "rest" => Some(InteractionState::Rest),
            "hover" => Some(InteractionState::Hover),
            "pressed" => Some(InteractionState::Pressed),
            "focus" => Some(InteractionState::Focus),
            "disabled" => Some(InteractionState::Disabled),
            "readOnly" => Some(InteractionState::ReadOnly),
            "selected" => Some(InteractionState::Selected),
            _ => None,
        }
    }

    /// States allowed inside a `selected` control-state sub-map.
    pub fn is_control_variant(&self) -> bool {
        matches!(
            self,
            InteractionState::Rest
                | InteractionState::Hover
                | InteractionState::Pressed
                | InteractionState::Focus
        )
    }

    pub fn is_global_precedence(&self) -> bool {
        matches!(self, InteractionState::Disabled | InteractionState::ReadOnly)
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        for state in [
            InteractionState::Rest,
            InteractionState::Hover,
            InteractionState::Pressed,
            InteractionState::Focus,
            InteractionState::Disabled,
            InteractionState::ReadOnly,
            InteractionState::Selected,
        ] {
            assert_eq!(InteractionState::from_token(state.as_token()), Some(state));
        }
        assert_eq!(InteractionState::from_token("active"), None);
    }

    #[test]
    fn test_control_variants_exclude_global_states() {
        assert!(InteractionState::Hover.is_control_variant());
        assert!(!InteractionState::Disabled.is_control_variant());
        assert!(!InteractionState::ReadOnly.is_control_variant());
        assert!(!InteractionState::Selected.is_control_variant());
    }
}
