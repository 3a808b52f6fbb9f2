//! Small pages built with the document API: a start page, a table of
//! commands and a not-found page

use crate::document::Document;
use crate::enums::Encoding;
use crate::error::Result;
use crate::escape::escape;
use crate::tree::Attributes;

const TITLE: &str = "Select your task";

const TABLE_STYLE: &str = "table, td {border: 1px solid gray; border-collapse: collapse;}";

fn content_type(encoding: Encoding) -> Attributes {
    Attributes::new()
        .set("_http_equiv", "Content-type")
        .set("content", format!("text/html; charset={}", encoding.charset()))
}

fn head(doc: &mut Document, title: &str, encoding: Encoding, style: Option<&str>) -> Result<()> {
    doc.add_tag("head", None, Attributes::new())?.scope(|doc| {
        doc.add_tag("title", Some(title), Attributes::new())?;
        doc.add_tag("meta", None, content_type(encoding))?;
        if let Some(css) = style {
            doc.add_tag("style", None, Attributes::new())?
                .scope(|doc| doc.add_raw(css).map(|_| ()))?;
        }
        Ok(())
    })
}

fn paragraph_link(doc: &mut Document, text: &str, href: &str) -> Result<()> {
    doc.add_tag("p", None, Attributes::new())?.scope(|doc| {
        doc.add_tag("a", Some(text), Attributes::new().set("href", href))?;
        Ok(())
    })
}

fn page<F>(title: &str, encoding: Encoding, style: Option<&str>, body: F) -> Result<Document>
where
    F: FnOnce(&mut Document) -> Result<()>,
{
    let mut doc = Document::with_doctype()?;
    doc.add_tag("html", None, Attributes::new().set("lang", "en"))?
        .scope(|doc| {
            head(doc, title, encoding, style)?;
            doc.add_tag("body", None, Attributes::new())?.scope(body)
        })?;
    Ok(doc)
}

pub fn index_page(encoding: Encoding) -> Result<Document> {
    page(TITLE, encoding, None, |doc| {
        paragraph_link(doc, "View commands", "/command/")?;
        paragraph_link(doc, "View dependencies of commands", "/schema/")
    })
}

/// Table of `(command, description)` rows
pub fn commands_page(commands: &[(String, String)], encoding: Encoding) -> Result<Document> {
    page(TITLE, encoding, Some(TABLE_STYLE), |doc| {
        paragraph_link(doc, "Go to start page", "/")?;
        doc.add_tag("table", None, Attributes::new())?.scope(|doc| {
            doc.add_tag("caption", Some("Available commands"), Attributes::new())?;
            for (command, description) in commands {
                doc.add_tag("tr", None, Attributes::new())?.scope(|doc| {
                    doc.add_tag("td", Some(&*escape(command)), Attributes::new())?;
                    doc.add_tag("td", Some(&*escape(description)), Attributes::new())?;
                    Ok(())
                })?;
            }
            Ok(())
        })
    })
}

pub fn not_found_page(path: &str, encoding: Encoding) -> Result<Document> {
    let title = "Error: path not found";
    page(title, encoding, None, |doc| {
        doc.add_tag("h1", Some(title), Attributes::new())?;
        doc.add_tag(
            "p",
            Some(format!("No path found on server: {}", escape(path)).as_str()),
            Attributes::new(),
        )?;
        doc.add_tag("a", Some("Go to start page"), Attributes::new().set("href", "/"))?;
        Ok(())
    })
}
