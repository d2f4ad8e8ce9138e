//! Escaping of query-syntax characters.

/// Characters with a meaning in the extended query syntax.
pub const SPECIAL_CHARS: &[char] = &[
    '\\', '(', ')', '|', '-', '!', '@', '~', '"', '&', '/', '^', '$', '=', '<',
];

/// Escape every special character with a backslash so the string is
/// matched literally.
pub fn escape_query(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 8);
    for c in query.chars() {
        if SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_query("hello world"), "hello world");
        assert_eq!(escape_query(""), "");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(escape_query("a-b"), "a\\-b");
        assert_eq!(escape_query("\"quoted\""), "\\\"quoted\\\"");
        assert_eq!(escape_query("@title (x|y)"), "\\@title \\(x\\|y\\)");
        assert_eq!(escape_query("back\\slash"), "back\\\\slash");
        assert_eq!(escape_query("a<b=c"), "a\\<b\\=c");
    }

    #[test]
    fn test_unicode_passthrough() {
        assert_eq!(escape_query("café-crème"), "café\\-crème");
    }
}
