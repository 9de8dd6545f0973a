//! Document tree for Runic.
//!
//! The parser produces a single `Root` node that owns the whole document.
//! Trees are built once and read-only afterwards.

use serde::Serialize;

use crate::MarkupError;

/// Heading markers and the node each one opens, shallowest first.
const HEADINGS: [(&str, NodeKind); 6] = [
    (".", NodeKind::HeadingOne),
    (":", NodeKind::HeadingTwo),
    (":.", NodeKind::HeadingThree),
    ("::", NodeKind::HeadingFour),
    ("::.", NodeKind::HeadingFive),
    (":::", NodeKind::HeadingSix),
];

/// Node classification.
///
/// Serialized adjacently tagged: `{"type": "Error", "error": "InvalidTag"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "error")]
pub enum NodeKind {
    Root,
    /// Invalid markup. The node's value is the offending literal and its
    /// children are whatever content followed it.
    Error(MarkupError),
    HeadingOne,
    HeadingTwo,
    HeadingThree,
    HeadingFour,
    HeadingFive,
    HeadingSix,
    Paragraph,
    Text,
    BoldTag,
    ItalicTag,
    List,
    ListItem,
}

impl NodeKind {
    /// Look up the heading opened by `marker` (`.`, `:`, `:.` ...).
    pub fn from_heading_marker(marker: &str) -> Option<Self> {
        HEADINGS
            .iter()
            .find(|(literal, _)| *literal == marker)
            .map(|(_, kind)| *kind)
    }

    /// Look up the inline node for a tag name. Only `bold` and `italic` exist.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(Self::BoldTag),
            "italic" => Some(Self::ItalicTag),
            _ => None,
        }
    }

    /// Heading level from 1 to 6, `None` for every other kind.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::HeadingOne => Some(1),
            Self::HeadingTwo => Some(2),
            Self::HeadingThree => Some(3),
            Self::HeadingFour => Some(4),
            Self::HeadingFive => Some(5),
            Self::HeadingSix => Some(6),
            _ => None,
        }
    }
}

/// A node in the document tree. Each node exclusively owns its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Text content for `Text`, the marker for headings, the offending
    /// literal for `Error`; empty otherwise.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NodeKind::Error(_))
    }

    /// Full diagnostic for an `Error` node, e.g. `Invalid tag name: foo`.
    pub fn message(&self) -> Option<String> {
        match self.kind {
            NodeKind::Error(error) => Some(format!("{error}: {}", self.value)),
            _ => None,
        }
    }

    /// Every error in the tree, in document order, with its offending literal.
    pub fn errors(&self) -> Vec<(MarkupError, &str)> {
        let mut errors = Vec::new();
        self.walk(&mut |node| {
            if let NodeKind::Error(error) = node.kind {
                errors.push((error, node.value.as_str()));
            }
        });
        errors
    }

    pub fn has_errors(&self) -> bool {
        self.is_error() || self.children.iter().any(Node::has_errors)
    }

    /// All descendant text joined with single spaces.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.walk(&mut |node| {
            if node.kind == NodeKind::Text {
                parts.push(node.value.as_str());
            }
        });
        parts.join(" ")
    }

    /// Pre-order traversal.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> Node {
        Node::new(NodeKind::Text, value)
    }

    fn sample() -> Node {
        Node::new(NodeKind::Root, "").with_children(vec![
            Node::new(NodeKind::Error(MarkupError::InvalidHeading), "..")
                .with_children(vec![text("a")]),
            Node::new(NodeKind::Paragraph, "").with_children(vec![
                text("b"),
                Node::new(NodeKind::Error(MarkupError::InvalidTag), "foo")
                    .with_children(vec![text("c")]),
            ]),
        ])
    }

    // =========================================================================
    // Lookup tables
    // =========================================================================

    #[test]
    fn test_heading_markers() {
        assert_eq!(NodeKind::from_heading_marker("."), Some(NodeKind::HeadingOne));
        assert_eq!(NodeKind::from_heading_marker(":."), Some(NodeKind::HeadingThree));
        assert_eq!(NodeKind::from_heading_marker(":::"), Some(NodeKind::HeadingSix));
        assert_eq!(NodeKind::from_heading_marker(".."), None);
        assert_eq!(NodeKind::from_heading_marker(".:"), None);
        assert_eq!(NodeKind::from_heading_marker(""), None);
    }

    #[test]
    fn test_heading_levels_follow_markers() {
        for (level, (_, kind)) in HEADINGS.iter().enumerate() {
            assert_eq!(kind.heading_level(), Some(level as u8 + 1));
        }
        assert_eq!(NodeKind::Paragraph.heading_level(), None);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(NodeKind::from_tag_name("bold"), Some(NodeKind::BoldTag));
        assert_eq!(NodeKind::from_tag_name("italic"), Some(NodeKind::ItalicTag));
        assert_eq!(NodeKind::from_tag_name("Bold"), None);
        assert_eq!(NodeKind::from_tag_name("underline"), None);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[test]
    fn test_message() {
        let tree = sample();
        assert_eq!(
            tree.children[0].message().as_deref(),
            Some("Invalid heading value: ..")
        );
        assert_eq!(
            tree.children[1].children[1].message().as_deref(),
            Some("Invalid tag name: foo")
        );
        assert_eq!(tree.message(), None);
    }

    #[test]
    fn test_errors_in_document_order() {
        let tree = sample();
        assert!(tree.has_errors());
        assert_eq!(
            tree.errors(),
            vec![
                (MarkupError::InvalidHeading, ".."),
                (MarkupError::InvalidTag, "foo")
            ]
        );
        assert!(!tree.children[1].children[0].has_errors());
    }

    #[test]
    fn test_text_content() {
        assert_eq!(sample().text_content(), "a b c");
        assert_eq!(Node::new(NodeKind::Root, "").text_content(), "");
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    #[test]
    fn test_serialize_skips_empty_fields() {
        let tree = Node::new(NodeKind::Paragraph, "").with_children(vec![text("a")]);
        assert_eq!(
            serde_json::to_string(&tree).unwrap(),
            r#"{"type":"Paragraph","children":[{"type":"Text","value":"a"}]}"#
        );
    }

    #[test]
    fn test_serialize_error_node() {
        let node = Node::new(NodeKind::Error(MarkupError::InvalidTag), "foo");
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"type":"Error","error":"InvalidTag","value":"foo"}"#
        );
    }
}
