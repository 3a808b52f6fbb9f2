use crate::error::{Result, StructureError};
use crate::escape::{quote, value_as_code};
use crate::format::TextFormat;
use crate::intern::{InternedName, NameInterner};
use crate::tree::AttributeValue;

/// Element name plus its ordered attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTag {
    name: InternedName,
    safe_name: InternedName,
    attributes: Vec<AttributeValue>,
}

impl ElementTag {
    pub fn new(name: InternedName, safe_name: InternedName, attributes: Vec<AttributeValue>) -> Self {
        Self {
            name,
            safe_name,
            attributes,
        }
    }

    pub fn name(&self) -> &InternedName {
        &self.name
    }

    pub fn safe_name(&self) -> &InternedName {
        &self.safe_name
    }

    pub fn attributes(&self) -> &[AttributeValue] {
        &self.attributes
    }

    /// Names starting with `!` are declarations such as `<!DOCTYPE html>`
    pub fn is_declaration(&self) -> bool {
        self.name.starts_with('!')
    }

    /// Copy whose names come from `names`
    pub fn reinterned(&self, names: &NameInterner) -> Self {
        let attributes = self
            .attributes
            .iter()
            .map(|attr| {
                AttributeValue::new(
                    names.intern(attr.name()),
                    names.intern(attr.safe_name()),
                    attr.value().map(String::from),
                    attr.escapes(),
                )
            })
            .collect();
        Self::new(names.intern(&self.name), names.intern(&self.safe_name), attributes)
    }

    pub fn render_attributes(&self) -> String {
        let rendered: Vec<String> = self
            .attributes
            .iter()
            .map(AttributeValue::render_as_text)
            .collect();
        if rendered.is_empty() {
            String::new()
        } else {
            format!(" {}", rendered.join(" "))
        }
    }

    /// Opening and closing lines around inner content
    pub fn text_parts(&self, format: &TextFormat) -> Result<(String, String)> {
        if self.is_declaration() {
            return Err(StructureError::InvalidTagUsage(self.name.to_string()).into());
        }
        Ok((
            format.render_line(&format!("<{}{}>", self.name, self.render_attributes()), None),
            format.render_line(&format!("</{}>", self.name), None),
        ))
    }

    pub fn render_as_text(&self, format: &TextFormat, inner: Option<&str>) -> Result<String> {
        match inner {
            Some(inner) => {
                let (mut result, close) = self.text_parts(format)?;
                result.push_str(inner);
                result.push_str(&close);
                Ok(result)
            }
            None => {
                let end = if self.is_declaration() { ">" } else { "/>" };
                Ok(format.render_line(
                    &format!("<{}{}{}", self.name, self.render_attributes(), end),
                    None,
                ))
            }
        }
    }

    /// Arguments of the `doc.tag(...)` call
    fn code_arguments(&self, text: Option<&str>) -> String {
        let mut args = vec![quote(&self.safe_name)];
        if let Some(text) = text {
            args.push(value_as_code(Some(text)));
        }
        args.extend(self.attributes.iter().map(AttributeValue::render_as_code));
        args.join(", ")
    }

    /// Opening and closing lines of a `with` block
    pub fn code_parts(&self, format: &TextFormat) -> Result<(String, String)> {
        if self.is_declaration() {
            return Err(StructureError::InvalidTagUsage(self.name.to_string()).into());
        }
        Ok((
            format.render_line(&format!("with doc.tag({}) {{", self.code_arguments(None)), None),
            format.render_line("}", None),
        ))
    }

    /// Renders the construction call for this element.
    ///
    /// `text` becomes the positional inner text; `block` is the already
    /// rendered code of the children and turns the call into a `with` block.
    pub fn render_as_code(
        &self,
        format: &TextFormat,
        text: Option<&str>,
        block: Option<&str>,
    ) -> Result<String> {
        if self.is_declaration() && text.is_some() {
            return Err(StructureError::InvalidTagUsage(self.name.to_string()).into());
        }

        match block {
            Some(block) => {
                let (mut result, close) = self.code_parts(format)?;
                result.push_str(block);
                result.push_str(&close);
                Ok(result)
            }
            None => Ok(format.render_line(&format!("doc.tag({});", self.code_arguments(text)), None)),
        }
    }
}
