//! Repetition: arrays, separators, positional markers and `repeat="false"`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use poptags::{ContentValue, ObjectValue, Template};
use pretty_assertions::assert_eq;
use serde_json::json;

fn render(template: &str, content: impl Into<ContentValue>) -> String {
    Template::new(template).render(content).expect("render succeeds")
}

fn hello_world_fn() -> ContentValue {
    ContentValue::function(|_, _, _| json!([{ "title": "Hello" }, { "title": "World" }]).into())
}

#[test]
fn array_repeats_children_per_element() {
    assert_eq!(
        render(
            "<pop:content><li><pop:title /></li></pop:content>",
            json!({ "content": [{ "title": "Hello" }, { "title": "World" }] })
        ),
        "<li>Hello</li><li>World</li>"
    );
}

#[test]
fn function_returning_array_repeats() {
    let content = ObjectValue::new().with_field("content", hello_world_fn());
    assert_eq!(
        render("<pop:content><li><pop:title /></li></pop:content>", content),
        "<li>Hello</li><li>World</li>"
    );
}

#[test]
fn first_and_last_with_element_break() {
    let content = ObjectValue::new().with_field("content", hello_world_fn());
    assert_eq!(
        render(
            "<pop:content break='li'><pop:first>First</pop:first><pop:last>Last</pop:last> <pop:title/></pop:content>",
            content
        ),
        "<li>First Hello</li><li>Last World</li>"
    );
}

#[test]
fn first_and_last_when_elements_are_functions() {
    let elements = ContentValue::array([
        ContentValue::function(|_, _, _| json!({ "title": "Hello" }).into()),
        ContentValue::function(|_, _, _| json!({ "title": "World" }).into()),
    ]);
    let content = ObjectValue::new().with_field(
        "content",
        ContentValue::function(move |_, _, _| elements.clone()),
    );
    assert_eq!(
        render(
            "<pop:content break='li'><pop:first>First</pop:first><pop:last>Last</pop:last> <pop:title/></pop:content>",
            content
        ),
        "<li>First Hello</li><li>Last World</li>"
    );
}

#[test]
fn array_of_strings() {
    let content = json!({ "titles": ["Hello", "World"] });
    assert_eq!(render(r#"<pop:titles break=", "/>"#, content.clone()), "Hello, World");
    assert_eq!(render(r#"<pop:titles break=", "/>"#, json!({ "titles": ["Hello"] })), "Hello");
    assert_eq!(
        render(
            r#"<pop:titles break=", "><pop:first>First</pop:first><pop:last>Last</pop:last> <pop:value/></pop:titles>"#,
            content.clone()
        ),
        "First Hello, Last World"
    );
    assert_eq!(
        render("<pop:titles><h2><pop:value /></h2></pop:titles>", content),
        "<h2>Hello</h2><h2>World</h2>"
    );
}

#[test]
fn markers_outside_a_collection_render_nothing() {
    assert_eq!(
        render(
            r#"<pop:titles break=", "/><pop:first>First</pop:first><pop:last>Last</pop:last>"#,
            json!({ "titles": ["Hello", "World"] })
        ),
        "Hello, World"
    );
}

#[test]
fn markers_track_the_nearest_iteration() {
    let content = json!({
        "outer": [{ "title": "World", "inner": [{ "title": "Hello" }] }]
    });
    assert_eq!(
        render(
            "<pop:outer><pop:inner><pop:title/></pop:inner>, <pop:first><pop:title/></pop:first></pop:outer>",
            content
        ),
        "Hello, World"
    );
}

#[test]
fn repeat_false_exposes_values() {
    let content = json!({ "titles": ["Hello", "World"] });
    assert_eq!(
        render(r#"<pop:titles repeat="false"><h2><pop:values break=", " /></h2></pop:titles>"#, content.clone()),
        "<h2>Hello, World</h2>"
    );
    assert_eq!(
        render(r#"<pop:titles repeat="false"><pop:values skip="1"><h2><pop:value /></h2></pop:values></pop:titles>"#, content.clone()),
        "<h2>World</h2>"
    );
    assert_eq!(
        render(r#"<pop:titles repeat="false"><pop:values limit="1"><h2><pop:value /></h2></pop:values></pop:titles>"#, content.clone()),
        "<h2>Hello</h2>"
    );
    assert_eq!(
        render(r#"<pop:titles repeat="false"><pop:values skip="1" limit="1"><h2><pop:value /></h2></pop:values></pop:titles>"#, content),
        "<h2>World</h2>"
    );
}

#[test]
fn value_is_empty_directly_in_repeat_false_body() {
    assert_eq!(
        render(r#"<pop:titles repeat="false">[<pop:value/>]</pop:titles>"#, json!({ "titles": ["a"] })),
        "[]"
    );
}

#[test]
fn value_is_empty_in_repeat_false_body_inside_a_repetition() {
    assert_eq!(
        render(
            r#"<pop:names><pop:tags repeat="false">[<pop:value/>]</pop:tags></pop:names>"#,
            json!({ "tags": ["x", "y"], "names": ["n1"] })
        ),
        "[]"
    );
}

#[test]
fn values_inside_repeat_false_body_bind_their_own_elements() {
    assert_eq!(
        render(
            r#"<pop:names><pop:tags repeat="false"><pop:values break=","><pop:value/></pop:values></pop:tags></pop:names>"#,
            json!({ "tags": ["x", "y"], "names": ["n1"] })
        ),
        "x,y"
    );
}

#[test]
fn repeat_false_still_respects_no_tags() {
    assert_eq!(
        render(
            "<pop:titles repeat='false'>Something</pop:titles><pop:no_titles>Hello, World</pop:no_titles>",
            json!({ "titles": [] })
        ),
        "Hello, World"
    );
}

#[test]
fn function_returning_nested_objects_with_wrap_and_break() {
    let content = ObjectValue::new().with_field(
        "entries",
        ContentValue::function(|_, _, _| {
            json!([
                { "content": { "title": "Raspberry Stripe" } },
                { "content": { "title": "Denim Blue" } },
                { "content": { "title": "Cotton Candy" } },
            ])
            .into()
        }),
    );
    assert_eq!(
        render(r#"<pop:entries wrap="ul" break="li"><pop:content><h4><pop:title /></h4></pop:content></pop:entries>"#, content),
        "<ul><li><h4>Raspberry Stripe</h4></li><li><h4>Denim Blue</h4></li><li><h4>Cotton Candy</h4></li></ul>"
    );
}

#[test]
fn separators() {
    let two = json!({ "posts": [{ "title": "post 1" }, { "title": "post 2" }] });
    let three = json!({ "posts": [{ "title": "post 1" }, { "title": "post 2" }, { "title": "post 3" }] });

    assert_eq!(
        render(r#"<pop:posts wrap="ul" break="li"><pop:title /></pop:posts>"#, two.clone()),
        "<ul><li>post 1</li><li>post 2</li></ul>"
    );
    assert_eq!(
        render(r#"<pop:posts break=", "><pop:title /></pop:posts>"#, three.clone()),
        "post 1, post 2, post 3"
    );
    assert_eq!(
        render(r#"<pop:posts break=", " last=" and "><pop:title /></pop:posts>"#, three),
        "post 1, post 2 and post 3"
    );
    assert_eq!(
        render(r#"<pop:posts break="br"><pop:title /></pop:posts>"#, two),
        "post 1<br />post 2"
    );
}

#[test]
fn no_tag_inside_a_collection() {
    assert_eq!(
        render(
            "<pop:something><pop:title /><pop:no_title>No Title </pop:no_title></pop:something>",
            json!({ "something": [{}, { "title": "Yes Title" }] })
        )
        .trim(),
        "No Title Yes Title"
    );
}

fn posts_by_limit() -> ObjectValue {
    ObjectValue::new().with_field(
        "posts",
        ContentValue::function(|options, _, _| {
            let limit = options.count("limit").unwrap_or(0);
            ContentValue::array((1..=limit).map(|id| ObjectValue::new().with_field("id", id)))
        }),
    )
}

#[test]
fn options_reach_callables() {
    assert_eq!(
        render(r#"<pop:posts limit="3"><li><pop:id /></li></pop:posts>"#, posts_by_limit()),
        "<li>1</li><li>2</li><li>3</li>"
    );
    assert_eq!(
        render("<pop:posts limit='3'><li><pop:id /></li></pop:posts>", posts_by_limit()),
        "<li>1</li><li>2</li><li>3</li>"
    );
}

#[test]
fn skip_and_limit_slice_any_collection() {
    assert_eq!(
        render(
            r#"<pop:n skip="1" limit="2" break=","/>"#,
            json!({ "n": [1, 2, 3, 4] })
        ),
        "2,3"
    );
}

#[test]
fn empty_collections_render_nothing_for_every_combination() {
    for repeat in ["true", "false"] {
        for (wrap, brk) in [("ul", "li"), ("div", ", "), ("span", "br")] {
            let template = format!(
                r#"<pop:items wrap="{wrap}" break="{brk}" repeat="{repeat}"><pop:value/></pop:items>"#
            );
            assert_eq!(render(&template, json!({ "items": [] })), "", "{template}");
        }
    }
}

#[test]
fn class_goes_on_the_wrap_element_of_a_repetition() {
    assert_eq!(
        render(
            r#"<pop:posts wrap="ul" class="c" break="li"><pop:title /></pop:posts>"#,
            json!({ "posts": [{ "title": "Hello" }, { "title": "World" }] })
        ),
        r#"<ul class="c"><li>Hello</li><li>World</li></ul>"#
    );
}
