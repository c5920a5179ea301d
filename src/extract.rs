//! Isolating the JSON payload inside a free-form model completion.
//!
//! Models like to wrap JSON in markdown fences or surround it with prose even
//! when told not to. `extract_json` makes a best effort and never fails; if it
//! cannot find anything it hands the input back so parsing fails explicitly.

/// The bracket pair delimiting the expected top-level JSON value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Brackets {
  Object,
  Array,
}

impl Brackets {
  fn pair(self) -> (char, char) {
    match self {
      Brackets::Object => ('{', '}'),
      Brackets::Array => ('[', ']'),
    }
  }
}

const FENCE_JSON: &str = "```json";
const FENCE: &str = "```";

pub fn extract_json(raw: &str, brackets: Brackets) -> &str {
  if let Some(inner) = strip_fence(raw) {
    return inner;
  }

  let (open, close) = brackets.pair();
  match (raw.find(open), raw.rfind(close)) {
    (Some(start), Some(end)) if end > start => &raw[start..=end],
    _ => raw,
  }
}

/// Strip a leading ```` ```json ```` / ```` ``` ```` marker and the closing fence.
/// Trailing whitespace after the closing fence is tolerated.
fn strip_fence(raw: &str) -> Option<&str> {
  let rest = raw
    .strip_prefix(FENCE_JSON)
    .or_else(|| raw.strip_prefix(FENCE))?;
  let rest = rest.trim_end();
  Some(rest.strip_suffix(FENCE).unwrap_or(rest))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn json_fence_returns_inner_text() {
    let raw = "```json\n{\"a\": 1}\n```";
    assert_eq!(extract_json(raw, Brackets::Object), "\n{\"a\": 1}\n");
  }

  #[test]
  fn bare_fence_returns_inner_text() {
    let raw = "```\n[1, 2]\n```\n";
    assert_eq!(extract_json(raw, Brackets::Array), "\n[1, 2]\n");
  }

  #[test]
  fn prose_around_object_is_dropped() {
    let raw = "Sure! Here is your dashboard:\n{\"topic\": \"x\", \"nested\": {\"k\": 1}}\nHope this helps.";
    assert_eq!(
      extract_json(raw, Brackets::Object),
      "{\"topic\": \"x\", \"nested\": {\"k\": 1}}"
    );
  }

  #[test]
  fn prose_around_array_uses_square_brackets() {
    let raw = "Questions follow [ {\"q\": 1} ] end";
    assert_eq!(extract_json(raw, Brackets::Array), "[ {\"q\": 1} ]");
  }

  #[test]
  fn missing_or_inverted_brackets_return_input() {
    assert_eq!(extract_json("no json here", Brackets::Object), "no json here");
    assert_eq!(extract_json("} backwards {", Brackets::Object), "} backwards {");
    assert_eq!(extract_json("only { open", Brackets::Object), "only { open");
  }

  #[test]
  fn fence_not_at_start_falls_back_to_brackets() {
    let raw = "Here you go:\n```json\n{\"a\": 1}\n```";
    assert_eq!(extract_json(raw, Brackets::Object), "{\"a\": 1}");
  }
}
