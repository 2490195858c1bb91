//! The attribute-keyed filter pipeline.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use poptags::Template;
use pretty_assertions::assert_eq;
use serde_json::json;

fn uppercase(value: &str, options: &poptags::Options) -> Option<String> {
    (options.get("format") == Some("uppercase")).then(|| value.to_uppercase())
}

#[test]
fn uppercase_filter() {
    let template = Template::builder()
        .template(r#"<pop:title format="uppercase" />"#)
        .filter("format", uppercase)
        .build();
    assert_eq!(template.render(json!({ "title": "Hello, World!" })).unwrap(), "HELLO, WORLD!");
}

#[test]
fn filter_returning_none_keeps_value() {
    let template = Template::builder()
        .template(r#"<pop:title format="lowercase" />"#)
        .filter("format", uppercase)
        .build();
    assert_eq!(template.render(json!({ "title": "Hello" })).unwrap(), "Hello");
}

#[test]
fn filters_run_in_registration_order_before_wrap() {
    let template = Template::builder()
        .template(r#"<pop:title format="uppercase" truncate="3" wrap="b" />"#)
        .filter("truncate", |value, options| {
            let n = options.count("truncate")?;
            Some(value.chars().take(n).collect())
        })
        .filter("format", uppercase)
        .build();
    assert_eq!(template.render(json!({ "title": "hello" })).unwrap(), "<b>HEL</b>");
}

#[test]
fn filters_see_escaped_text() {
    let template = Template::builder()
        .template(r#"<pop:title mark="on" />"#)
        .filter("mark", |value, _| Some(format!("[{value}]")))
        .build();
    assert_eq!(template.render(json!({ "title": "a&b" })).unwrap(), "[a&amp;b]");
}

#[test]
fn tags_without_the_attribute_are_untouched() {
    let template = Template::builder()
        .template("<pop:title />")
        .filter("format", uppercase)
        .build();
    assert_eq!(template.render(json!({ "title": "Hello" })).unwrap(), "Hello");
}
