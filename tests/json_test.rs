//! Integration tests for the hast JSON boundary.

use code_callouts::{process_json, AnnotationRegistry, Callouts, Error, JsonFormat, Root};

/// `const x = 1 // [!mark value x] note` followed by `<b>{/* [!step go] */}</b>`,
/// as a highlighter emits it.
const HIGHLIGHTED: &str = r#"{
  "type": "root",
  "children": [
    {
      "type": "element",
      "tagName": "pre",
      "properties": {"className": ["shiki"]},
      "children": [
        {
          "type": "element",
          "tagName": "code",
          "properties": {},
          "children": [
            {
              "type": "element",
              "tagName": "span",
              "properties": {"className": ["line"]},
              "children": [
                {"type": "element", "tagName": "span", "properties": {"className": "token keyword"},
                 "children": [{"type": "text", "value": "const"}]},
                {"type": "element", "tagName": "span", "properties": {"className": ["space"]},
                 "children": [{"type": "text", "value": " "}]},
                {"type": "text", "value": "x = 1"},
                {"type": "element", "tagName": "span", "properties": {"className": ["space"]},
                 "children": [{"type": "text", "value": " "}]},
                {"type": "element", "tagName": "span", "properties": {"className": ["token", "comment"]},
                 "children": [
                   {"type": "text", "value": "//"},
                   {"type": "element", "tagName": "span", "properties": {"className": ["space"]},
                    "children": [{"type": "text", "value": " "}]},
                   {"type": "text", "value": "[!mark"},
                   {"type": "element", "tagName": "span", "properties": {"className": ["space"]},
                    "children": [{"type": "text", "value": " "}]},
                   {"type": "text", "value": "value"},
                   {"type": "element", "tagName": "span", "properties": {"className": ["space"]},
                    "children": [{"type": "text", "value": " "}]},
                   {"type": "text", "value": "x]"},
                   {"type": "element", "tagName": "span", "properties": {"className": ["space"]},
                    "children": [{"type": "text", "value": " "}]},
                   {"type": "text", "value": "note"}
                 ]},
                {"type": "text", "value": "\n"}
              ]
            },
            {
              "type": "element",
              "tagName": "span",
              "properties": {"className": ["line"]},
              "children": [
                {"type": "element", "tagName": "span", "properties": {"className": ["token", "tag"]},
                 "children": [{"type": "text", "value": "<b>"}]},
                {"type": "element", "tagName": "span", "properties": {"className": ["token", "punctuation"]},
                 "children": [{"type": "text", "value": "{"}]},
                {"type": "element", "tagName": "span", "properties": {"className": ["token", "comment"]},
                 "children": [
                   {"type": "text", "value": "/*"},
                   {"type": "element", "tagName": "span", "properties": {"className": ["space"]},
                    "children": [{"type": "text", "value": " "}]},
                   {"type": "text", "value": "[!step"},
                   {"type": "element", "tagName": "span", "properties": {"className": ["space"]},
                    "children": [{"type": "text", "value": " "}]},
                   {"type": "text", "value": "go]"},
                   {"type": "element", "tagName": "span", "properties": {"className": ["space"]},
                    "children": [{"type": "text", "value": " "}]},
                   {"type": "text", "value": "*/"}
                 ]},
                {"type": "element", "tagName": "span", "properties": {"className": ["token", "punctuation"]},
                 "children": [{"type": "text", "value": "}"}]},
                {"type": "element", "tagName": "span", "properties": {"className": ["token", "tag"]},
                 "children": [{"type": "text", "value": "</b>"}]},
                {"type": "comment", "value": " untouched "}
              ]
            }
          ]
        }
      ]
    }
  ]
}"#;

#[test]
fn test_process_highlighted_json() {
    let (root, extraction) = Callouts::new()
        .process_json(HIGHLIGHTED, "source.tsx")
        .unwrap();

    assert_eq!(root.text_content(), "const x = 1 // note\n<b></b>");
    assert_eq!(
        extraction.annotations.to_json(JsonFormat::Compact).unwrap(),
        r#"{"0":[{"name":"mark","value":"value x"}],"1":[{"name":"step","value":"go"}]}"#
    );
    assert_eq!(extraction.stats.line_count, 2);
    assert_eq!(extraction.stats.stripped_count, 1);
    assert_eq!(extraction.stats.removed_count, 1);
    assert_eq!(extraction.stats.collapsed_count, 1);
}

#[test]
fn test_process_json_helper_round_trips() {
    let (tree, annotations) = process_json(HIGHLIGHTED, "source.tsx").unwrap();

    let root = Root::from_json(&tree).unwrap();
    assert_eq!(root.text_content(), "const x = 1 // note\n<b></b>");
    assert!(tree.contains(r#""type":"comment""#));
    assert_eq!(annotations.annotation_count(), 2);

    // Already stripped: nothing left to find.
    let (again, more) = process_json(&tree, "source.tsx").unwrap();
    assert_eq!(again, tree);
    assert!(more.is_empty());
}

#[test]
fn test_registry_deserializes() {
    let registry: AnnotationRegistry =
        serde_json::from_str(r#"{"4":[{"name":"a","value":"b"}]}"#).unwrap();
    assert_eq!(registry.get(4).unwrap()[0].value, "b");
}

#[test]
fn test_invalid_documents() {
    assert!(matches!(
        Root::from_json(r#"{"type": "element", "tagName": "pre"}"#),
        Err(Error::InvalidTree(_))
    ));
    assert!(matches!(
        Root::from_json(r#"{"type": "unknown"}"#),
        Err(Error::Json(_))
    ));
}
