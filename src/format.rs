use std::fmt;

/// Indentation unit of the development profile
pub const DEV_INDENT: &str = "    ";
/// Line terminator of the development profile
pub const DEV_NEWLINE: &str = "\n";

/// Formatting parameters shared by the text and code renderers
///
/// The same tree renders pretty-printed with [`TextFormat::dev`] and fully
/// compact with [`TextFormat::prod`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormat {
    /// Current nesting level
    pub level: usize,
    /// String repeated once per nesting level
    pub indent_unit: String,
    /// String appended to every rendered line
    pub newline: String,
}

/// The development profile is the default
impl Default for TextFormat {
    fn default() -> Self {
        Self::dev()
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextFormat(level={}, indent='{}', newline='{}')",
            self.level,
            self.indent_unit.escape_debug(),
            self.newline.escape_debug()
        )
    }
}

impl TextFormat {
    pub fn new(level: usize, indent_unit: impl Into<String>, newline: impl Into<String>) -> Self {
        Self {
            level,
            indent_unit: indent_unit.into(),
            newline: newline.into(),
        }
    }

    /// Four-space indentation, one element per line
    pub fn dev() -> Self {
        Self::new(0, DEV_INDENT, DEV_NEWLINE)
    }

    /// No indentation and no line breaks
    pub fn prod() -> Self {
        Self::new(0, "", "")
    }

    pub fn indent(&self) -> String {
        self.indent_unit.repeat(self.level)
    }

    pub fn deeper(&self) -> Self {
        Self {
            level: self.level + 1,
            ..self.clone()
        }
    }

    /// Never goes below level 0
    pub fn shallower(&self) -> Self {
        Self {
            level: self.level.saturating_sub(1),
            ..self.clone()
        }
    }

    pub fn render_line(&self, body: &str, indent: Option<&str>) -> String {
        match indent {
            Some(indent) => format!("{}{}{}", indent, body, self.newline),
            None => format!("{}{}{}", self.indent(), body, self.newline),
        }
    }

    /// Re-indents a block of lines to this format's level.
    ///
    /// The shortest leading whitespace run among non-blank lines is the
    /// block's own indentation. When every non-blank line starts with it, it
    /// is replaced by this format's indent and deeper indentation is kept.
    /// Lines that do not start with it are emitted untouched, without the
    /// target indent. Without a common run every line is emitted as-is at the
    /// target indent. `prefix` and `suffix` wrap each line after its own
    /// leading whitespace.
    pub fn render_lines(&self, lines: &[&str], prefix: Option<&str>, suffix: Option<&str>) -> String {
        let common = common_indent(lines);
        let target = self.indent();
        let prefix = prefix.unwrap_or("");
        let suffix = suffix.unwrap_or("");

        let mut result = String::new();
        for line in lines {
            let (indent, tail) = if common.is_empty() {
                (target.as_str(), *line)
            } else if let Some(stripped) = line.strip_prefix(common) {
                (target.as_str(), stripped)
            } else {
                ("", *line)
            };

            let own = leading_whitespace(tail);
            let body = tail.strip_prefix(own).unwrap_or(tail);
            let wrapped = format!("{}{}{}{}", own, prefix, body, suffix);
            result.push_str(&self.render_line(&wrapped, Some(indent)));
        }
        result
    }
}

/// Leading whitespace run of a line, `\r` included
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(line.len(), |(idx, _)| idx);
    line.get(..end).unwrap_or("")
}

fn common_indent<'a>(lines: &[&'a str]) -> &'a str {
    let mut content = lines.iter().copied().filter(|line| !line.trim().is_empty());

    let shortest = content
        .clone()
        .map(leading_whitespace)
        .min_by_key(|ws| ws.len())
        .unwrap_or("");

    if !shortest.is_empty() && content.all(|line| line.starts_with(shortest)) {
        shortest
    } else {
        ""
    }
}
