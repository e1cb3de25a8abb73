/* Turn a possibly multi-line descriptor comment into a comment block for a
 * target syntax: every line after the first gets `marker` prepended, and a
 * trailing newline is dropped. The caller writes the first marker. */
pub fn sanitize_comment(comment: &str, marker: &str) -> String {
    let comment = comment.strip_suffix('\n').unwrap_or(comment);
    comment.replace('\n', &format!("\n{}", marker))
}
