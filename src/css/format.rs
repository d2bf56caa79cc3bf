use crate::errors::CompileError;

/// Converts an HSLA 4-tuple to hex: `#rrggbb` when fully opaque, otherwise
/// `#rrggbbaa`. Uses the standard CSS HSL-to-RGB conversion.
pub fn hsla_to_hex(color: &[f64; 4]) -> String {
    let [h, s, l, alpha] = *color;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    let f = |n: f64| {
        let k = (n + h / 30.0).rem_euclid(12.0);
        let a = s * l.min(1.0 - l);
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };

    let r = channel(f(0.0));
    let g = channel(f(8.0));
    let b = channel(f(4.0));

    if alpha < 1.0 {
        format!("#{r:02x}{g:02x}{b:02x}{:02x}", channel(alpha))
    } else {
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pixel lengths: `{n}px`, except 0 which stays unitless.
pub fn px(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}px", format_number(n))
    }
}

/// Numbers without a trailing `.0` for whole values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Parses a bracketed `[h,s,l,a]` value segment.
pub fn parse_hsla(key: &str, raw: &str) -> Result<[f64; 4], CompileError> {
    require_brackets(key, raw)?;
    serde_json::from_str(raw).map_err(|_| CompileError::UnsupportedValue(key.to_string()))
}

/// Parses a bracketed `[x,y,blur,[h,s,l,a]]` shadow value segment.
pub fn parse_shadow(key: &str, raw: &str) -> Result<(f64, f64, f64, [f64; 4]), CompileError> {
    require_brackets(key, raw)?;
    serde_json::from_str(raw).map_err(|_| CompileError::UnsupportedValue(key.to_string()))
}

/// Parses a plain numeric value segment.
pub fn parse_dimension(key: &str, raw: &str) -> Result<f64, CompileError> {
    raw.parse::<f64>()
        .map_err(|_| CompileError::UnsupportedValue(key.to_string()))
}

fn require_brackets(key: &str, raw: &str) -> Result<(), CompileError> {
    if raw.starts_with('[') && raw.ends_with(']') {
        Ok(())
    } else {
        Err(CompileError::InvalidKeyFormat(format!(
            "value of `{key}` is not in trailing brackets"
        )))
    }
}
