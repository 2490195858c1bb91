//! Layouts, blocks and regions.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use poptags::Template;
use pretty_assertions::assert_eq;
use serde_json::json;

fn reader(
    templates: &'static [(&'static str, &'static str)],
) -> impl Fn(&str) -> Option<String> + Send + Sync + 'static {
    move |name| {
        templates
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, source)| (*source).to_owned())
    }
}

#[test]
fn blocks_replace_regions() {
    let template = Template::builder()
        .template(r#"<pop:layout name="default" /><pop:block region="main"><h1><pop:title /></h1></pop:block>"#)
        .read(reader(&[("layouts/default", r#"<html><pop:region name="main" /></html>"#)]))
        .build();
    assert_eq!(
        template.render(json!({ "title": "Hello, World!" })).unwrap().trim(),
        "<html><h1>Hello, World!</h1></html>"
    );
}

#[test]
fn region_without_block_renders_its_default() {
    let template = Template::builder()
        .template(r#"<pop:layout name="default" />"#)
        .read(reader(&[(
            "layouts/default",
            r#"<html><pop:region name="main">Default content for main</pop:region></html>"#,
        )]))
        .build();
    assert_eq!(
        template.render(json!({})).unwrap().trim(),
        "<html>Default content for main</html>"
    );
}

#[test]
fn layout_name_may_be_computed() {
    let template = Template::builder()
        .template("<pop:layout name='<pop:the_layout/>'/><pop:block region='main'>Hello</pop:block>")
        .read(reader(&[("layouts/layout", "<h1><pop:region name='main'/></h1>")]))
        .build();
    assert_eq!(
        template.render(json!({ "the_layout": "layout" })).unwrap().trim(),
        "<h1>Hello</h1>"
    );
}

#[test]
fn negated_tag_with_include_inside_a_block() {
    let template = Template::builder()
        .template(
            "<pop:layout name='outer' /><pop:block region='main'><pop:content><pop:test>Test: <pop:include template='inner' /></pop:test><pop:no_test><pop:include template='inner' /></pop:no_test></pop:content></pop:block>",
        )
        .read(reader(&[
            ("inner", "<h1><pop:title /></h1>"),
            ("layouts/outer", "<pop:region name='main' />"),
        ]))
        .build();
    assert_eq!(
        template
            .render(json!({ "content": { "title": "Hello", "test": [] } }))
            .unwrap()
            .trim(),
        "<h1>Hello</h1>"
    );
}

#[test]
fn first_block_for_a_region_wins() {
    let template = Template::builder()
        .template("<pop:layout name='l'/><pop:block region='main'>one</pop:block><pop:block region='main'>two</pop:block>")
        .read(reader(&[("layouts/l", "<pop:region name='main'/>")]))
        .build();
    assert_eq!(template.render(json!({})).unwrap(), "one");
}

#[test]
fn without_a_layout_blocks_render_nothing() {
    let template = Template::new("a<pop:block region='main'>hidden</pop:block>b");
    assert_eq!(template.render(json!({})).unwrap(), "ab");
}

#[test]
fn region_honors_wrap() {
    let template = Template::builder()
        .template(r#"<pop:layout name="default" /><pop:block region="main">Hi</pop:block>"#)
        .read(reader(&[(
            "layouts/default",
            r#"<pop:region name="main" wrap="main" /><pop:region name="side" wrap="aside" />"#,
        )]))
        .build();
    assert_eq!(template.render(json!({})).unwrap(), "<main>Hi</main>");
}
