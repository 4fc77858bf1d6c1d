use similar::TextDiff;

/// Lines of unchanged context around each hunk.
const CONTEXT_LINES: usize = 3;

/// Renders a unified diff between `old` and `new`, labelled `a/<label>` and
/// `b/<label>`.
///
/// Line endings are whatever the inputs contain. A final line without a
/// newline gets the usual `\ No newline at end of file` marker. Returns an
/// empty string when the two texts are equal.
pub fn unified_diff(label: &str, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    let old_header = format!("a/{label}");
    let new_header = format!("b/{label}");
    let diff = TextDiff::from_lines(old, new);
    diff.unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&old_header, &new_header)
        .to_string()
}
