// Splits on any of the three line-terminator conventions. A terminator at
// the very end closes the final line rather than opening an empty one.
fn split_terminated(raw: &str) -> Vec<&str> {
  let bytes = raw.as_bytes();
  let mut lines = Vec::new();
  let mut start = 0;
  let mut i = 0;

  while i < bytes.len() {
    match bytes[i] {
      b'\n' => {
        lines.push(&raw[start..i]);
        i += 1;
        start = i;
      }
      b'\r' => {
        lines.push(&raw[start..i]);
        i += 1;
        if bytes.get(i) == Some(&b'\n') {
          i += 1;
        }
        start = i;
      }
      _ => i += 1,
    }
  }

  if start < bytes.len() {
    lines.push(&raw[start..]);
  }

  lines
}

/// Drops the first line (seed artifact) and the last (trailing partial
/// line) from raw sample text. Two or fewer lines leave nothing, which is
/// delivered as an empty result rather than an error.
pub(crate) fn trim_sample(raw: &str) -> Vec<String> {
  let lines = split_terminated(raw);

  if lines.len() <= 2 {
    return Vec::new();
  }

  lines[1..lines.len() - 1]
    .iter()
    .map(|line| line.to_string())
    .collect()
}
