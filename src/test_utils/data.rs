use crate::document::Document;
use crate::error::Result;
use crate::tree::Attributes;

pub const EXAMPLE_DOMAIN_DEV: &str = r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <title>
            Example Domain
        </title>
        <meta charset="utf-8"/>
    </head>
    <body>
        <div>
            <h1>
                Example Domain
            </h1>
            <p>
                This domain is for use in illustrative examples in documents. You 
                may use this domain in literature without prior coordination or asking for permission.
            </p>
            <p>
                <a href="https://www.iana.org/domains/example">
                    More information
                </a>
            </p>
        </div>
    </body>
</html>
"#;

pub const EXAMPLE_DOMAIN_PROD: &str = concat!(
    r#"<!DOCTYPE html><html lang="en"><head><title>Example Domain</title>"#,
    r#"<meta charset="utf-8"/></head><body><div><h1>Example Domain</h1>"#,
    "<p>This domain is for use in illustrative examples in documents. You ",
    "may use this domain in literature without prior coordination or asking for permission.</p>",
    r#"<p><a href="https://www.iana.org/domains/example">More information</a></p>"#,
    "</div></body></html>",
);

const FIRST_RUN: &str = "This domain is for use in illustrative examples in documents. You ";
const SECOND_RUN: &str =
    "may use this domain in literature without prior coordination or asking for permission.";

/// The Example Domain page built in one document
pub fn example_domain() -> Result<Document> {
    let mut doc = Document::with_doctype()?;
    doc.add_tag("html", None, Attributes::new().set("lang", "en"))?
        .scope(|doc| {
            doc.add_tag("head", None, Attributes::new())?.scope(|doc| {
                doc.add_tag("title", Some("Example Domain"), Attributes::new())?;
                doc.add_tag("meta", None, Attributes::new().set("charset", "utf-8"))?;
                Ok(())
            })?;
            doc.add_tag("body", None, Attributes::new())?.scope(|doc| {
                doc.add_tag("div", None, Attributes::new())?.scope(|doc| {
                    doc.add_tag("h1", Some("Example Domain"), Attributes::new())?;
                    doc.add_tag("p", None, Attributes::new())?.scope(|doc| {
                        doc.add_raw(FIRST_RUN)?;
                        doc.add_raw(SECOND_RUN)?;
                        Ok(())
                    })?;
                    doc.add_tag("p", None, Attributes::new())?.scope(|doc| {
                        doc.add_tag(
                            "a",
                            None,
                            Attributes::new().set("href", "https://www.iana.org/domains/example"),
                        )?
                        .scope(|doc| doc.add_raw("More information").map(|_| ()))
                    })
                })
            })
        })?;
    Ok(doc)
}

/// The same page assembled from separately built head and content documents
pub fn example_domain_parts() -> Result<Document> {
    let mut head = Document::new();
    head.add_tag("head", None, Attributes::new())?.scope(|doc| {
        doc.add_tag("title", Some("Example Domain"), Attributes::new())?;
        doc.add_tag("meta", None, Attributes::new().set("charset", "utf-8"))?;
        Ok(())
    })?;

    let mut content = Document::new();
    content.add_tag("h1", Some("Example Domain"), Attributes::new())?;
    content.add_tag("p", None, Attributes::new())?.scope(|doc| {
        doc.add_raw(FIRST_RUN)?;
        doc.add_raw(SECOND_RUN)?;
        Ok(())
    })?;

    let mut doc = Document::with_doctype()?;
    doc.add_tag("html", None, Attributes::new().set("lang", "en"))?
        .scope(|doc| {
            doc.append(head)?;
            doc.add_tag("body", None, Attributes::new())?.scope(|doc| {
                doc.add_tag("div", None, Attributes::new())?.scope(|doc| {
                    doc.append_copy(&content)?;
                    doc.add_tag("p", None, Attributes::new())?.scope(|doc| {
                        doc.add_tag(
                            "a",
                            Some("More information"),
                            Attributes::new().set("href", "https://www.iana.org/domains/example"),
                        )?;
                        Ok(())
                    })
                })
            })
        })?;
    Ok(doc)
}
