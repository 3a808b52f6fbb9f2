use crate::escape::{escape, quote, value_as_code};
use crate::intern::InternedName;

/// One rendered attribute: `name="value"`, or a bare `name` flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    name: InternedName,
    safe_name: InternedName,
    value: Option<String>,
    escape: bool,
}

impl AttributeValue {
    pub fn new(
        name: InternedName,
        safe_name: InternedName,
        value: Option<String>,
        escape: bool,
    ) -> Self {
        Self {
            name,
            safe_name,
            value,
            escape,
        }
    }

    pub fn name(&self) -> &InternedName {
        &self.name
    }

    pub fn safe_name(&self) -> &InternedName {
        &self.safe_name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn escapes(&self) -> bool {
        self.escape
    }

    pub fn render_as_text(&self) -> String {
        match &self.value {
            None => self.name.to_string(),
            Some(value) if self.escape => format!("{}=\"{}\"", self.name, escape(value)),
            Some(value) => format!("{}=\"{}\"", self.name, value),
        }
    }

    pub fn render_as_code(&self) -> String {
        match &self.value {
            Some(value) if self.escape && escape(value) != value.as_str() => {
                format!("{}=escape({})", self.safe_name, quote(value))
            }
            value => format!("{}={}", self.safe_name, value_as_code(value.as_deref())),
        }
    }
}

/// An attribute as requested by a caller, before name resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Literal or safe name
    pub name: String,
    pub value: Option<String>,
    pub escape: bool,
}

/// Ordered attribute bag
///
/// Setting a name that is already present replaces its value and keeps its
/// original position.
///
/// ```
/// use zmarkup::tree::Attributes;
///
/// let attrs = Attributes::new()
///     .set("lang", "en")
///     .flag("hidden")
///     .set("lang", "de");
/// let names: Vec<_> = attrs.iter().map(|spec| spec.name.as_str()).collect();
/// assert_eq!(names, ["lang", "hidden"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<AttributeSpec>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name.into(), Some(value.into()), false)
    }

    /// Value escaped for `&`, `<` and `>` when rendered
    pub fn set_escaped(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name.into(), Some(value.into()), true)
    }

    /// Attribute without a value
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.push(name.into(), None, false)
    }

    pub fn insert(&mut self, spec: AttributeSpec) {
        match self.entries.iter_mut().find(|entry| entry.name == spec.name) {
            Some(entry) => *entry = spec,
            None => self.entries.push(spec),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(mut self, name: String, value: Option<String>, escape: bool) -> Self {
        self.insert(AttributeSpec {
            name,
            value,
            escape,
        });
        self
    }
}

impl IntoIterator for Attributes {
    type Item = AttributeSpec;
    type IntoIter = std::vec::IntoIter<AttributeSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.insert(AttributeSpec {
                name: name.into(),
                value: value.map(Into::into),
                escape: false,
            });
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(safe: &str, value: Option<&str>, escape: bool) -> AttributeValue {
        let literal = match safe.strip_prefix('_') {
            Some(rest) => rest.replace('_', "-"),
            None => safe.to_string(),
        };
        AttributeValue::new(
            InternedName::from(literal.as_str()),
            InternedName::from(safe),
            value.map(String::from),
            escape,
        )
    }

    #[test]
    fn test_render_as_text() {
        let cases = [
            ("attr", Some("value"), true, "attr=\"value\""),
            ("attr", Some("value"), false, "attr=\"value\""),
            ("attr", Some("<value>"), true, "attr=\"&lt;value&gt;\""),
            ("attr", Some("<value>"), false, "attr=\"<value>\""),
            ("attr", None, true, "attr"),
            ("attr", None, false, "attr"),
            ("_complex_name", Some("value"), true, "complex-name=\"value\""),
            ("_complex_name", Some("<value>"), true, "complex-name=\"&lt;value&gt;\""),
            ("_complex_name", Some("<value>"), false, "complex-name=\"<value>\""),
            ("_complex_name", None, false, "complex-name"),
        ];
        for (safe, value, escape, expected) in cases {
            assert_eq!(
                attribute(safe, value, escape).render_as_text(),
                expected,
                "{} {:?} escape={}",
                safe,
                value,
                escape
            );
        }
    }

    #[test]
    fn test_render_as_code() {
        let cases = [
            ("attr", Some("value"), true, "attr=\"value\""),
            ("attr", Some("value"), false, "attr=\"value\""),
            ("attr", Some("<value>"), true, "attr=escape(\"<value>\")"),
            ("attr", Some("<value>"), false, "attr=\"<value>\""),
            ("attr", None, true, "attr=None"),
            ("attr", None, false, "attr=None"),
            ("_complex_name", Some("value"), false, "_complex_name=\"value\""),
            ("_complex_name", Some("<value>"), true, "_complex_name=escape(\"<value>\")"),
            ("_complex_name", None, true, "_complex_name=None"),
        ];
        for (safe, value, escape, expected) in cases {
            assert_eq!(
                attribute(safe, value, escape).render_as_code(),
                expected,
                "{} {:?} escape={}",
                safe,
                value,
                escape
            );
        }
    }

    #[test]
    fn test_from_iterator_keeps_order() {
        let attrs: Attributes = [
            ("b", Some("1")),
            ("a", None),
            ("b", Some("2")),
        ]
        .into_iter()
        .collect();

        let collected: Vec<_> = attrs
            .iter()
            .map(|spec| (spec.name.as_str(), spec.value.as_deref()))
            .collect();
        assert_eq!(collected, [("b", Some("2")), ("a", None)]);
    }
}
