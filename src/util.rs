//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// Other braces (e.g. JSON examples inside prompts) are left untouched.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge model payloads. Cuts on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fills_only_named_placeholders() {
    let out = fill_template(r#"{"topic": "{topic}", "n": {count}}"#, &[("topic", "Rust"), ("count", "3")]);
    assert_eq!(out, r#"{"topic": "Rust", "n": 3}"#);
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    let s = "ééééé"; // 2 bytes per char
    let out = trunc_for_log(s, 3);
    assert!(out.starts_with("é…"));
    assert!(out.ends_with("(10 bytes total)"));
    assert_eq!(trunc_for_log("short", 10), "short");
  }
}
