#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn only_tag(doc: &Document) -> &Tag {
    match doc.nodes.as_slice() {
        [Node::Tag(tag)] => tag,
        other => panic!("expected a single tag, got {other:?}"),
    }
}

#[test]
fn text_only_template() {
    let doc = compile("I am a plain text").unwrap();
    assert_eq!(doc.nodes, vec![Node::Text("I am a plain text".into())]);
}

#[test]
fn self_closing_tag_has_no_children() {
    let doc = compile("<h1><pop:site_title /></h1>").unwrap();
    assert_eq!(doc.nodes.len(), 3);
    let Node::Tag(tag) = &doc.nodes[1] else {
        panic!("expected tag");
    };
    assert_eq!(tag.name, "site_title");
    assert!(tag.self_closing);
    assert!(tag.children.is_empty());
}

#[test]
fn nested_tags_build_a_tree() {
    let doc = compile("<pop:content><li><pop:title /></li></pop:content>").unwrap();
    let tag = only_tag(&doc);
    assert_eq!(tag.name, "content");
    assert!(!tag.self_closing);
    assert_eq!(tag.children.len(), 3);
    assert!(matches!(&tag.children[1], Node::Tag(t) if t.name == "title"));
}

#[test]
fn namespace_is_recorded() {
    let doc = compile("<pop:sample_extension:title />").unwrap();
    let tag = only_tag(&doc);
    assert_eq!(tag.namespace.as_deref(), Some("sample_extension"));
    assert_eq!(tag.name, "title");
}

#[test]
fn dotted_self_closing_tag_nests() {
    let dotted = compile("<pop:content.author.name />").unwrap();
    let outer = only_tag(&dotted);
    assert_eq!(outer.name, "content");
    assert!(!outer.self_closing);
    let Node::Tag(author) = &outer.children[0] else {
        panic!("expected author");
    };
    assert_eq!(author.name, "author");
    let Node::Tag(name) = &author.children[0] else {
        panic!("expected name");
    };
    assert_eq!(name.name, "name");
    assert!(name.self_closing);
}

#[test]
fn dotted_tag_keeps_attributes_and_children_innermost() {
    let doc = compile("<pop:content.features wrap=\"div\"><strong><pop:price /></strong></pop:content.features>").unwrap();
    let outer = only_tag(&doc);
    assert!(outer.attributes.is_empty());
    let Node::Tag(inner) = &outer.children[0] else {
        panic!("expected inner tag");
    };
    assert_eq!(inner.name, "features");
    assert_eq!(inner.attributes.get("wrap").and_then(AttributeValue::as_literal), Some("div"));
    assert_eq!(inner.children.len(), 3);
}

#[test]
fn dotted_namespace_stays_outermost() {
    let doc = compile("<pop:ext:post.title/>").unwrap();
    let outer = only_tag(&doc);
    assert_eq!(outer.namespace.as_deref(), Some("ext"));
    let Node::Tag(inner) = &outer.children[0] else {
        panic!("expected inner tag");
    };
    assert_eq!(inner.namespace, None);
}

#[test]
fn literal_attribute_values_stay_literal() {
    let doc = compile("<pop:posts limit='3'/>").unwrap();
    assert_eq!(
        only_tag(&doc).attributes.get("limit"),
        Some(&AttributeValue::Literal("3".into()))
    );
}

#[test]
fn attribute_values_with_tags_are_compiled() {
    let doc = compile("<pop:output value=\"Hello, <pop:something />\" />").unwrap();
    let Some(AttributeValue::Nodes(nodes)) = only_tag(&doc).attributes.get("value") else {
        panic!("expected compiled attribute");
    };
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0], Node::Text("Hello, ".into()));
    assert!(matches!(&nodes[1], Node::Tag(t) if t.name == "something"));
}

#[test]
fn comments_become_text() {
    let doc = compile("<!-- <pop:number /> -->").unwrap();
    assert_eq!(doc.nodes, vec![Node::Text("<!-- <pop:number /> -->".into())]);
}

#[test]
fn adjacent_text_and_comment_merge() {
    let doc = compile("a<!-- b -->c").unwrap();
    assert_eq!(doc.nodes, vec![Node::Text("a<!-- b -->c".into())]);
}

#[test]
fn missing_closing_tag_is_reported_with_line() {
    let err = compile("Something\n<pop:opentag>\nAnd something more").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.line, 2);
    assert_eq!(err.fragment, "<pop:opentag>");
    assert!(err.to_string().contains("opentag"));
}

#[test]
fn malformed_tag_is_reported() {
    let err = compile("Something <pop:badtag and someinth more").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1002);
    assert!(err.fragment.starts_with("<pop:badtag"));
}

#[test]
fn mismatched_close_is_reported() {
    let err = compile("<pop:a><pop:b></pop:a></pop:b>").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1004);
}

#[test]
fn stray_close_is_reported() {
    let err = compile("text</pop:a>").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1005);
    assert_eq!(err.fragment, "</pop:a>");
}

#[test]
fn invalid_name_is_reported() {
    let err = compile("<pop:content..title/>").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1006);
}

#[test]
fn errors_inside_attribute_values_point_into_the_template() {
    let source = "<pop:x value='<pop:y>'/>";
    let err = compile(source).unwrap_err();
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(&source[err.span.range()], "<pop:y>");
}

#[test]
fn long_fragments_are_truncated() {
    let source = format!("<pop:x {}", "a".repeat(200));
    let err = compile(&source).unwrap_err();
    assert!(err.fragment.ends_with("..."));
    assert!(err.fragment.chars().count() <= 63);
}

#[test]
fn compiled_tree_is_reusable() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    let doc = compile("<pop:a/>").unwrap();
    assert_send_sync(&doc);
}

proptest! {
    #[test]
    fn tag_free_text_compiles_to_itself(s in "[^<]*") {
        let doc = compile(&s).unwrap();
        let text: String = doc
            .nodes
            .iter()
            .map(|n| match n {
                Node::Text(t) => t.clone(),
                Node::Tag(t) => panic!("unexpected tag {t:?}"),
            })
            .collect();
        prop_assert_eq!(text, s);
    }
}
