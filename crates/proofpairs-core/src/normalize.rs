/// Collapse every whitespace run (newlines included) to a single space and
/// trim both ends, so each text fits on one corpus line.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
