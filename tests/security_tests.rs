#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use zmarkup::test_utils::*;

fn nested(depth: usize) -> String {
    let mut code = String::new();
    for _ in 0..depth {
        code.push_str("with doc.tag(\"div\") {");
    }
    code.push_str("doc.raw(\"x\");");
    for _ in 0..depth {
        code.push('}');
    }
    code
}

#[test]
fn test_default_limits() {
    let config = ReplayConfig::default();
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    assert_eq!(config.max_string_length, DEFAULT_MAX_STRING_LENGTH);
}

#[test]
fn test_depth_at_limit_is_accepted() {
    let doc = replay(&nested(DEFAULT_MAX_DEPTH)).unwrap();
    let html = doc.render(&TextFormat::prod()).unwrap();
    assert!(html.starts_with("<div><div>"));
    assert_eq!(html.matches("</div>").count(), DEFAULT_MAX_DEPTH);
}

#[test]
fn test_depth_over_limit_is_rejected() {
    let err = replay(&nested(DEFAULT_MAX_DEPTH + 1)).unwrap_err();
    assert_eq!(
        err.kind(),
        &MarkupErrorKind::Security(SecurityError::MaxDepthExceeded)
    );
}

#[test]
fn test_custom_depth_limit() {
    let config = ReplayConfig {
        max_depth: 3,
        ..ReplayConfig::default()
    };
    assert!(replay_with_config(&nested(3), config.clone()).is_ok());
    assert!(replay_with_config(&nested(4), config).is_err());
}

#[test]
fn test_size_limit() {
    let config = ReplayConfig {
        max_size: 64,
        ..ReplayConfig::default()
    };
    let code = format!("doc.raw(\"{}\");", "a".repeat(100));
    let err = replay_with_config(&code, config).unwrap_err();
    assert_eq!(
        err.kind(),
        &MarkupErrorKind::Security(SecurityError::MaxSizeExceeded)
    );
}

#[test]
fn test_string_length_limit() {
    let config = ReplayConfig {
        max_string_length: 10,
        ..ReplayConfig::default()
    };
    let code = format!("doc.raw(\"{}\");", "b".repeat(11));
    let err = replay_with_config(&code, config).unwrap_err();
    assert_eq!(
        err.kind(),
        &MarkupErrorKind::Security(SecurityError::MaxStringLengthExceeded)
    );
    assert_eq!(err.location(), Some(&Location::new(1, 9)));
}

#[test]
fn test_unterminated_input() {
    let err = replay("with doc.tag(\"div\") {").unwrap_err();
    assert!(matches!(
        err.kind(),
        MarkupErrorKind::Syntax(SyntaxError::Expected { .. })
    ));

    let err = replay("doc.raw(\"never closed").unwrap_err();
    assert_eq!(
        err.kind(),
        &MarkupErrorKind::Lexical(LexicalError::UnterminatedString)
    );
}

#[test]
fn test_text_is_not_escaped_implicitly() {
    // raw text is written as given; callers escape untrusted input
    let mut doc = Document::new();
    doc.add_tag("p", Some("<b>bold</b>"), Attributes::new()).unwrap();
    doc.add_tag("p", Some(&*zmarkup::escape::escape("<b>")), Attributes::new())
        .unwrap();
    assert_eq!(
        doc.render(&TextFormat::prod()).unwrap(),
        "<p><b>bold</b></p><p>&lt;b&gt;</p>"
    );
}

#[test]
fn test_quotes_survive_code_form() {
    let mut doc = Document::new();
    doc.add_tag(
        "p",
        Some("say \"hi\"\\\n\tnow"),
        Attributes::new().set("title", "\"q\""),
    )
    .unwrap();

    let code = doc.render_code(&TextFormat::prod()).unwrap();
    let replayed = replay(&code).unwrap();
    assert_eq!(
        replayed.render(&TextFormat::dev()).unwrap(),
        doc.render(&TextFormat::dev()).unwrap()
    );
}
