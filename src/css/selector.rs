//! Selector construction for state-carrying rules.
//!
//! Interaction states reach the browser two ways: native pseudo-classes
//! (`:hover`) where one exists, and forced one-letter marker classes
//! (`.-h`) gated by the global activator class so a host application can
//! pin a state for previews and tests. `disabled` and `readOnly` have no
//! *stable* native pseudo, so their forced branch is always emitted.

use tokenpress_schema::InteractionState;

/// Global marker that must co-occur with forced-state suffix classes.
pub const ACTIVATOR_CLASS: &str = "-a";
/// Gate class ANDed onto every shadow selector branch.
pub const SHADOW_GATE_CLASS: &str = "-e";

/// Native CSS pseudo-class per state, where a usable one exists.
pub fn native_pseudo(state: InteractionState) -> Option<&'static str> {
    match state {
        InteractionState::Hover => Some(":hover"),
        InteractionState::Pressed => Some(":active"),
        InteractionState::Focus => Some(":focus-visible"),
        InteractionState::ReadOnly => Some(":read-only"),
        InteractionState::Rest | InteractionState::Selected | InteractionState::Disabled => None,
    }
}

/// One-letter forced-state suffix class per state.
pub fn forced_suffix(state: InteractionState) -> Option<&'static str> {
    match state {
        InteractionState::Hover => Some("-h"),
        InteractionState::Pressed => Some("-p"),
        InteractionState::Focus => Some("-f"),
        InteractionState::Selected => Some("-s"),
        InteractionState::Disabled => Some("-d"),
        InteractionState::ReadOnly => Some("-r"),
        InteractionState::Rest => None,
    }
}

/// Builds the selector list for one rule.
///
/// `target` is the fully rendered target selector (e.g. `.a` or `.a.-e`).
/// Inline mode styles the element under its own state; reference mode gates
/// on an ancestor carrying the activator class in the referenced state.
pub fn state_selectors(
    target: &str,
    states: &[InteractionState],
    is_ref: bool,
    force_states: bool,
) -> Vec<String> {
    let tokens: Vec<InteractionState> = states
        .iter()
        .copied()
        .filter(|state| *state != InteractionState::Rest)
        .collect();

    let mut selectors = Vec::new();

    // Native branch: pseudo-classes where available, forced suffixes for the
    // tokens that have none, all on one selector.
    if tokens.iter().any(|t| native_pseudo(*t).is_some()) {
        let mut base = if is_ref {
            format!(".{ACTIVATOR_CLASS}")
        } else {
            target.to_string()
        };
        for token in &tokens {
            if native_pseudo(*token).is_none() {
                if let Some(suffix) = forced_suffix(*token) {
                    base.push('.');
                    base.push_str(suffix);
                }
            }
        }
        for token in &tokens {
            if let Some(pseudo) = native_pseudo(*token) {
                base.push_str(pseudo);
            }
        }
        if is_ref {
            base.push(' ');
            base.push_str(target);
        }
        selectors.push(base);
    }

    // Forced branch: every token as a suffix class, gated by the activator.
    let always_forced = tokens.iter().any(|t| t.is_global_precedence());
    if (force_states || always_forced) && !tokens.is_empty() {
        let suffixes: String = tokens
            .iter()
            .filter_map(|t| forced_suffix(*t))
            .map(|suffix| format!(".{suffix}"))
            .collect();
        let selector = if is_ref {
            format!(".{ACTIVATOR_CLASS}{suffixes} {target}")
        } else {
            format!("{target}{suffixes}.{ACTIVATOR_CLASS}")
        };
        selectors.push(selector);
    }

    if selectors.is_empty() {
        selectors.push(target.to_string());
    }
    selectors
}
