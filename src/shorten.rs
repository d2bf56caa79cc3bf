use crate::key::StyleKey;
use std::collections::BTreeMap;

/// style key -> shortened class token, unique within one build.
pub type ShortenMap = BTreeMap<StyleKey, String>;

/// The i-th value of the bijective base-26 sequence:
/// 0 -> `a`, 25 -> `z`, 26 -> `aa`, 27 -> `ab`, ...
pub fn short_name(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    // Only ASCII lowercase bytes are pushed.
    String::from_utf8(out).unwrap_or_default()
}

/// Assigns tokens in the frequency order produced by the usage counter.
pub fn assign_names(ordered: &[(StyleKey, usize)]) -> ShortenMap {
    ordered
        .iter()
        .enumerate()
        .map(|(index, (key, _))| (key.clone(), short_name(index)))
        .collect()
}
