use unicode_normalization::UnicodeNormalization;

/// Convert a title into a URL-safe slug.
///
/// The text is NFKD-decomposed and whatever is still non-ASCII afterwards is
/// dropped, so accented letters keep their base letter ("é" -> "e") while
/// scripts with no ASCII decomposition disappear. The rest is lowercased,
/// reduced to letters, digits, underscores and hyphens, whitespace/hyphen
/// runs collapse into a single hyphen and hyphens and underscores are
/// trimmed from both ends.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.nfkd().filter(char::is_ascii) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c == '-' || c.is_whitespace() {
            pending_separator = true;
        }
    }

    slug.trim_matches(|c: char| c == '-' || c == '_').to_string()
}
