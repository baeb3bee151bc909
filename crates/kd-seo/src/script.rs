//! Inline JSON-LD embedding.

use std::fmt::Write;

use crate::schema::JsonLd;

/// Serialise a record as compact JSON that is safe inside a `<script>`.
///
/// `<`, `>` and `&` only occur inside JSON strings, so they are rewritten as
/// unicode escapes; the JSON value is unchanged but cannot close the
/// surrounding element.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_ld(record: &JsonLd) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(record)?;
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            _ => escaped.push(c),
        }
    }
    Ok(escaped)
}

/// Render one `<script type="application/ld+json">` element per record.
///
/// Elements are numbered `structured-data-0`, `structured-data-1`, ...
///
/// # Errors
///
/// Returns an error if serialization of any record fails.
pub fn render_scripts(records: &[JsonLd]) -> Result<String, serde_json::Error> {
    let mut html = String::new();
    for (index, record) in records.iter().enumerate() {
        let _ = writeln!(
            html,
            "<script id=\"structured-data-{index}\" type=\"application/ld+json\">{}</script>",
            to_json_ld(record)?
        );
    }
    Ok(html)
}
