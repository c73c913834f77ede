//! Integration tests for annotation extraction.

use code_callouts::{
    Annotation, Callouts, Element, ExtractOptions, MarkerTable, Node, Root, Text,
};

fn space() -> Node {
    Element::new("span")
        .with_class("space")
        .with_child(Text::new(" "))
        .into()
}

/// Build a comment token the way a highlighter does: words as text runs,
/// every space as a whitespace marker.
fn comment(text: &str) -> Node {
    let mut children = Vec::new();
    for (i, word) in text.split(' ').enumerate() {
        if i > 0 {
            children.push(space());
        }
        if !word.is_empty() {
            children.push(Node::text(word));
        }
    }
    Element::new("span")
        .with_class("token")
        .with_class("comment")
        .with_children(children)
        .into()
}

fn token(text: &str) -> Node {
    Element::new("span")
        .with_class("token")
        .with_child(Text::new(text))
        .into()
}

fn code_block(lines: Vec<Vec<Node>>) -> Root {
    let count = lines.len();
    let lines = lines
        .into_iter()
        .enumerate()
        .map(|(i, mut children)| -> Node {
            if i + 1 < count {
                children.push(Node::text("\n"));
            }
            Element::new("span")
                .with_class("line")
                .with_children(children)
                .into()
        })
        .collect();
    Root::new(vec![Element::new("pre")
        .with_child(Element::new("code").with_children(lines))
        .into()])
}

fn line(root: &Root, index: usize) -> &Element {
    let pre = root.children[0].as_element().unwrap();
    let code = pre.children[0].as_element().unwrap();
    code.children[index].as_element().unwrap()
}

fn count_spaces(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .filter(|n| n.as_element().is_some_and(|el| el.has_class("space")))
        .count()
}

#[test]
fn test_comment_with_only_an_annotation() {
    let mut root = code_block(vec![vec![comment("// [!name-a value a]")]]);
    let extraction = Callouts::new().process(&mut root, "source.js");

    let entries: Vec<(usize, &[Annotation])> = extraction.annotations.iter().collect();
    assert_eq!(
        entries,
        vec![(0, &[Annotation::new("name-a", "value a")][..])]
    );
    assert!(line(&root, 0).children.is_empty());
}

#[test]
fn test_comment_with_trailing_prose() {
    let mut root = code_block(vec![vec![
        token("1"),
        space(),
        comment("// [!name-b value b] extra content"),
    ]]);
    let extraction = Callouts::new().process(&mut root, "source.js");

    assert_eq!(
        extraction.annotations.get(0),
        Some(&[Annotation::new("name-b", "value b")][..])
    );

    let token = line(&root, 0).children[2].as_element().unwrap();
    assert_eq!(token.text_content(), "// extra content");
    assert_eq!(count_spaces(&token.children), 2);
    assert!(token.children[1].as_element().unwrap().has_class("space"));
    assert!(token.children[3].as_element().unwrap().has_class("space"));
}

#[test]
fn test_embedded_expression_is_removed_as_a_whole() {
    let mut root = code_block(vec![vec![
        token("<div>"),
        token("{"),
        comment("/* [!a v] */"),
        token("}"),
        token("</div>"),
    ]]);
    let extraction = Callouts::new().process(&mut root, "source.tsx");

    assert_eq!(extraction.annotations.annotation_count(), 1);
    assert_eq!(line(&root, 0).text_content(), "<div></div>");
    assert_eq!(line(&root, 0).children.len(), 2);
    assert_eq!(extraction.stats.collapsed_count, 1);
}

#[test]
fn test_embedded_expression_with_two_child_opener_is_kept() {
    let opener: Node = Element::new("span")
        .with_child(Text::new("{"))
        .with_child(Element::new("span").with_child(Text::new("")))
        .into();
    let mut root = code_block(vec![vec![
        opener.clone(),
        comment("/* [!a v] */"),
        token("}"),
    ]]);
    Callouts::new().process(&mut root, "source.tsx");

    let children = &line(&root, 0).children;
    assert_eq!(children.len(), 2);
    assert_eq!(children[0], opener);
    assert_eq!(children[1], token("}"));
}

#[test]
fn test_embedded_expression_with_prose_is_kept() {
    let mut root = code_block(vec![vec![
        token("{"),
        comment("/* note [!a v] */"),
        token("}"),
    ]]);
    Callouts::new().process(&mut root, "source.jsx");

    assert_eq!(line(&root, 0).text_content(), "{/* note */}");
}

#[test]
fn test_adjacent_expressions_collapse_independently() {
    let mut root = code_block(vec![vec![
        token("{"),
        comment("/* [!a 1] */"),
        token("}"),
        token("{"),
        comment("/* [!b 2] */"),
        token("}"),
    ]]);
    let extraction = Callouts::new().process(&mut root, "source.mdx");

    assert!(line(&root, 0).children.is_empty());
    assert_eq!(extraction.stats.collapsed_count, 2);
    let names: Vec<&str> = extraction
        .annotations
        .get(0)
        .unwrap()
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_unrecognized_marker_is_byte_identical() {
    let mut root = code_block(vec![
        vec![comment("# [!a v]")],
        vec![comment("-- [!b v] text")],
    ]);
    let before = root.clone();
    let extraction = Callouts::new().process(&mut root, "source.rust");

    assert!(extraction.annotations.is_empty());
    assert_eq!(root, before);
}

#[test]
fn test_malformed_markers_stay_as_text() {
    let mut root = code_block(vec![vec![comment("// [!ok yes] [!name] [!open tail")]]);
    let extraction = Callouts::new().process(&mut root, "source.js");

    assert_eq!(
        extraction.annotations.get(0),
        Some(&[Annotation::new("ok", "yes")][..])
    );
    let token = line(&root, 0).children[0].as_element().unwrap();
    assert_eq!(token.text_content(), "// [!name] [!open tail");
}

#[test]
fn test_open_bracket_inside_value() {
    let mut root = code_block(vec![vec![comment("// [!note see [docs]")]]);
    let extraction = Callouts::new().process(&mut root, "source.js");

    assert_eq!(
        extraction.annotations.get(0),
        Some(&[Annotation::new("note", "see [docs")][..])
    );
    assert!(line(&root, 0).children.is_empty());
}

#[test]
fn test_value_is_recorded_verbatim() {
    let mut root = code_block(vec![vec![Element::new("span")
        .with_class("comment")
        .with_child(Text::new("// [!a v ]"))
        .into()]]);
    let extraction = Callouts::new().process(&mut root, "source.js");

    assert_eq!(
        extraction.annotations.get(0),
        Some(&[Annotation::new("a", "v ")][..])
    );
}

#[test]
fn test_line_fidelity_and_order() {
    let mut root = code_block(vec![
        vec![token("fn"), space(), token("main()")],
        vec![comment("// [!step 1] [!mark a b]")],
        vec![token("let"), space(), comment("// plain")],
        vec![comment("// [!step 2]"), space(), token("x")],
    ]);
    let extraction = Callouts::new().process(&mut root, "source.rust");

    let flat: Vec<(usize, &str, &str)> = extraction
        .annotations
        .iter()
        .flat_map(|(line, list)| {
            list.iter()
                .map(move |a| (line, a.name.as_str(), a.value.as_str()))
        })
        .collect();
    assert_eq!(
        flat,
        vec![(1, "step", "1"), (1, "mark", "a b"), (3, "step", "2")]
    );
    assert!(extraction.annotations.get(0).is_none());
    assert!(extraction.annotations.get(2).is_none());
}

#[test]
fn test_idempotence() {
    let build = || {
        code_block(vec![
            vec![comment("// [!a 1] keep this")],
            vec![token("{"), comment("/* [!b 2] */"), token("}")],
            vec![comment("// [!c 3]")],
        ])
    };
    let callouts = Callouts::new();

    let mut once = build();
    let first = callouts.process(&mut once, "source.tsx");

    let mut twice = build();
    callouts.process(&mut twice, "source.tsx");
    let second = callouts.process(&mut twice, "source.tsx");

    assert_eq!(once, twice);
    assert_eq!(first.annotations.annotation_count(), 3);
    assert!(second.annotations.is_empty());
}

#[test]
fn test_name_filter_leaves_other_markers() {
    let mut root = code_block(vec![vec![comment("// [!step 1] [!todo later]")]]);
    let extraction = Callouts::new()
        .with_names(["step"])
        .process(&mut root, "source.js");

    assert_eq!(extraction.annotations.annotation_count(), 1);
    let token = line(&root, 0).children[0].as_element().unwrap();
    assert_eq!(token.text_content(), "// [!todo later]");
}

#[test]
fn test_custom_classes_and_markers() {
    let ws: Node = Element::new("span")
        .with_class("ws")
        .with_child(Text::new(" "))
        .into();
    let pl_comment: Node = Element::new("span")
        .with_class("pl-c")
        .with_children(vec![
            Node::text(";"),
            ws.clone(),
            Node::text("[!a"),
            ws,
            Node::text("v]"),
        ])
        .into();
    let mut root = code_block(vec![vec![pl_comment]]);

    let markers = MarkerTable::from_json(r#"{"source.lisp": {"markers": [{"open": ";"}]}}"#)
        .unwrap();
    let options = ExtractOptions::new()
        .with_comment_class("pl-c")
        .with_space_class("ws");
    let extraction = Callouts::new()
        .with_markers(markers)
        .with_options(options)
        .process(&mut root, "source.lisp");

    assert_eq!(extraction.annotations.annotation_count(), 1);
    assert!(line(&root, 0).children.is_empty());
}
