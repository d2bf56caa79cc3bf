use thiserror::Error;

/// Failures raised while encoding style keys or decoding them into CSS.
///
/// The compiler is fail-fast per key: a malformed or unsupported key aborts
/// generation for that key's bundle with no partial fallback.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("unsupported property prefix `{property}` in key `{key}`")]
    UnsupportedProperty { property: String, key: String },
    #[error("missing or unsupported value in `{0}`")]
    UnsupportedValue(String),
    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),
    #[error("unsupported interaction state `{0}`")]
    UnsupportedState(String),
    #[error("control-state variants allow rest|hover|pressed|focus, got `{0}`")]
    InvalidControlState(String),
    #[error("reference keys require a non-rest interaction state: `{0}`")]
    ReferenceRequiresState(String),
    #[error("unknown breakpoint token `{0}`")]
    UnknownBreakpoint(String),
    #[error(
        "color property `{0}` uses a direct interaction-state map; this shape is no longer \
         supported, wrap it in soft/solid emphasis variants"
    )]
    LegacyColorShape(String),
}
