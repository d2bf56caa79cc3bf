//! Post-processing of emitted CSS: merging adjacent identical `@media`
//! blocks. Codegen sorts media rules by minimum width, so blocks for the
//! same breakpoint always end up adjacent.

/// Merges consecutive single-rule `@media` blocks that share a condition
/// into one multi-line block. Other lines pass through untouched.
pub fn merge_adjacent_media(css: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in css.lines() {
        match split_media_line(line) {
            Some((condition, rule)) => match &mut current {
                Some((open, rules)) if *open == condition => rules.push(rule),
                _ => {
                    flush(&mut out, current.take());
                    current = Some((condition, vec![rule]));
                }
            },
            None => {
                flush(&mut out, current.take());
                out.push(line.to_string());
            }
        }
    }
    flush(&mut out, current.take());

    out.join("\n")
}

fn split_media_line(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix("@media ")?;
    let brace = rest.find('{')?;
    let condition = rest[..brace].trim().to_string();
    let inner = rest[brace + 1..].strip_suffix('}')?.trim().to_string();
    Some((condition, inner))
}

fn flush(out: &mut Vec<String>, block: Option<(String, Vec<String>)>) {
    let Some((condition, rules)) = block else {
        return;
    };
    if rules.len() == 1 {
        out.push(format!("@media {condition} {{ {} }}", rules[0]));
    } else {
        out.push(format!("@media {condition} {{"));
        for rule in rules {
            out.push(format!("  {rule}"));
        }
        out.push("}".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_blocks_merge() {
        let css = "\
.a { font-size: 14px }
@media (min-width: 1312px) { .b { font-size: 18px } }
@media (min-width: 1312px) { .c { gap: 8px } }
@media (min-width: 1600px) { .d { gap: 12px } }";

        let merged = merge_adjacent_media(css);
        assert_eq!(
            merged,
            "\
.a { font-size: 14px }
@media (min-width: 1312px) {
  .b { font-size: 18px }
  .c { gap: 8px }
}
@media (min-width: 1600px) { .d { gap: 12px } }"
        );
    }

    #[test]
    fn test_non_adjacent_blocks_stay_separate() {
        let css = "\
@media (min-width: 1312px) { .a { gap: 8px } }
.b { gap: 4px }
@media (min-width: 1312px) { .c { gap: 12px } }";

        let merged = merge_adjacent_media(css);
        assert!(merged.contains("@media (min-width: 1312px) { .a { gap: 8px } }"));
        assert!(merged.contains("@media (min-width: 1312px) { .c { gap: 12px } }"));
    }

    #[test]
    fn test_plain_css_is_untouched() {
        let css = ".a { color: #000000 }\n.b { color: #ffffff }";
        assert_eq!(merge_adjacent_media(css), css);
    }
}
