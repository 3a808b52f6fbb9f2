use crate::escape::value_as_code;
use crate::format::TextFormat;

/// Line prefix of a comment block
pub const COMMENT_PREFIX: &str = "<!-- ";
/// Line suffix of a comment block
pub const COMMENT_SUFFIX: &str = " -->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Raw,
    Comment,
}

/// Pre-formatted text emitted line by line, re-indented to its depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    text: String,
    prefix: Option<String>,
    suffix: Option<String>,
    kind: RawKind,
}

impl RawBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            prefix: None,
            suffix: None,
            kind: RawKind::Raw,
        }
    }

    /// Raw text with every line wrapped in `prefix` and `suffix`
    pub fn wrapped(text: impl Into<String>, prefix: Option<String>, suffix: Option<String>) -> Self {
        Self {
            text: text.into(),
            prefix,
            suffix,
            kind: RawKind::Raw,
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            prefix: Some(COMMENT_PREFIX.to_string()),
            suffix: Some(COMMENT_SUFFIX.to_string()),
            kind: RawKind::Comment,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn kind(&self) -> RawKind {
        self.kind
    }

    /// Plain raw text without per-line wrapping
    pub fn is_plain(&self) -> bool {
        self.kind == RawKind::Raw && self.prefix.is_none() && self.suffix.is_none()
    }

    pub fn render_as_text(&self, format: &TextFormat) -> String {
        let lines: Vec<&str> = self.text.lines().collect();
        format.render_lines(&lines, self.prefix(), self.suffix())
    }

    /// The construction call that recreates this block, without terminator
    pub fn code_call(&self) -> String {
        let text = value_as_code(Some(&self.text));
        match self.kind {
            RawKind::Comment => format!("doc.comment({})", text),
            RawKind::Raw => {
                let mut args = vec![text];
                if let Some(prefix) = &self.prefix {
                    args.push(format!("prefix={}", value_as_code(Some(prefix))));
                }
                if let Some(suffix) = &self.suffix {
                    args.push(format!("suffix={}", value_as_code(Some(suffix))));
                }
                format!("doc.raw({})", args.join(", "))
            }
        }
    }

    pub fn render_as_code(&self, format: &TextFormat) -> String {
        format.render_line(&format!("{};", self.code_call()), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text() {
        let raw = RawBlock::wrapped("some raw text", Some("-p-".into()), Some("-s-".into()));
        assert_eq!(
            raw.render_as_text(&TextFormat::dev().deeper()),
            "    -p-some raw text-s-\n"
        );
        assert_eq!(raw.render_as_text(&TextFormat::prod()), "-p-some raw text-s-");

        let raw = RawBlock::wrapped(
            "some multiline\nraw text\n",
            Some("-p-".into()),
            Some("-s-".into()),
        );
        assert_eq!(
            raw.render_as_text(&TextFormat::dev().deeper()),
            "    -p-some multiline-s-\n    -p-raw text-s-\n"
        );
        assert_eq!(
            raw.render_as_text(&TextFormat::prod()),
            "-p-some multiline-s--p-raw text-s-"
        );
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        assert_eq!(RawBlock::new("").render_as_text(&TextFormat::dev()), "");
    }

    #[test]
    fn test_raw_code() {
        let raw = RawBlock::new("some raw text");
        assert_eq!(
            raw.render_as_code(&TextFormat::dev().deeper()),
            "    doc.raw(\"some raw text\");\n"
        );

        let raw = RawBlock::wrapped(
            "some multiline\nraw text\n",
            Some("-p-".into()),
            Some("-s-".into()),
        );
        assert_eq!(
            raw.render_as_code(&TextFormat::prod()),
            "doc.raw(\"some multiline\\nraw text\\n\", prefix=\"-p-\", suffix=\"-s-\");"
        );
    }

    #[test]
    fn test_comment() {
        let comment = RawBlock::comment("some multiline\nraw text\n");
        assert_eq!(
            comment.render_as_text(&TextFormat::dev().deeper()),
            "    <!-- some multiline -->\n    <!-- raw text -->\n"
        );
        assert_eq!(
            comment.render_as_text(&TextFormat::prod()),
            "<!-- some multiline --><!-- raw text -->"
        );
        assert_eq!(
            comment.render_as_code(&TextFormat::dev().deeper()),
            "    doc.comment(\"some multiline\\nraw text\\n\");\n"
        );
        assert!(!comment.is_plain());
    }
}
