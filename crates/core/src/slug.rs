/// Converts a doctree id into a GitHub-compatible anchor.
///
/// The id is lower-cased, spaces become hyphens, and every character that is
/// not alphanumeric, `_`, or `-` is dropped. Unlike heading slugs there is no
/// de-duplication: ids are already unique within a doctree.
///
/// # Examples
///
/// ```
/// use rst2gfm_core::slug::make_anchor;
///
/// assert_eq!(make_anchor("Getting Started!"), "getting-started");
/// assert_eq!(make_anchor("api_v2.ref"), "api_v2ref");
/// ```
pub fn make_anchor(id: &str) -> String {
    let mut anchor = String::with_capacity(id.len());

    for ch in id.chars() {
        if ch == ' ' || ch == '-' {
            anchor.push('-');
        } else if ch == '_' || ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                anchor.push(lower);
            }
        }
        // Punctuation, tabs, newlines and symbols are silently dropped
    }

    anchor
}

/// Normalizes a reference name into a reference-style link label.
///
/// Only lower-cases and replaces spaces with hyphens; punctuation is kept
/// because Markdown link labels tolerate it.
///
/// # Examples
///
/// ```
/// use rst2gfm_core::slug::normalize_refname;
///
/// assert_eq!(normalize_refname("Python Docs"), "python-docs");
/// ```
pub fn normalize_refname(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
