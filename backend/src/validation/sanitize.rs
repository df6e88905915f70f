//! Sanitizers applied to a copy of a body value before it reaches a handler.

/// Strips leading and trailing whitespace.
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Replaces HTML-significant characters with their entities.
///
/// `encode_safe` covers `& < > " ' /`; backslash and backtick are added on top.
pub fn escape(value: &str) -> String {
    html_escape::encode_safe(value)
        .replace('\\', "&#x5C;")
        .replace('`', "&#96;")
}
