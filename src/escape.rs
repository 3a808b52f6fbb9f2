//! Markup escaping and code-form literals
//!
//! Text and attribute values are escaped for `&`, `<` and `>` only. The code
//! form writes strings as double-quoted literals and recognises values that
//! are the escaped form of some other string, so a regenerated script states
//! the intent (`escape("A&B")`) instead of the entity soup (`"A&amp;B"`).

use std::borrow::Cow;

/// Replaces `&`, `<` and `>` with their entities
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_text_minimal(text)
}

/// Decodes character entities
pub fn unescape(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

/// Returns the unescaped text when `text` is exactly the escaped form of a
/// different string
pub fn escaped_source(text: &str) -> Option<String> {
    let plain = unescape(text);
    if plain != text && escape(&plain) == text {
        Some(plain.into_owned())
    } else {
        None
    }
}

/// Writes a code-form string literal
pub fn quote(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);
    result.push('"');
    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\0' => result.push_str("\\0"),
            c if c.is_control() => result.push_str(&format!("\\u{{{:x}}}", u32::from(c))),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Writes an optional value as it appears in the code form
pub fn value_as_code(value: Option<&str>) -> String {
    match value {
        None => "None".to_string(),
        Some(text) => match escaped_source(text) {
            Some(source) => format!("escape({})", quote(&source)),
            None => quote(text),
        },
    }
}
