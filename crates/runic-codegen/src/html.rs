//! HTML code generator.
//!
//! Walks the Runic document tree depth-first and wraps every node in its
//! HTML element. Text is emitted with a trailing space that is trimmed
//! again when the enclosing element closes, so words flow across inline
//! tags without doubling up spaces.

use crate::escape_html;
use runic_parser::{MarkupError, Node, NodeKind};

/// Generate HTML for a parsed document.
pub fn generate(root: &Node) -> String {
    let mut html = String::new();
    generate_children(root, &mut html);
    html
}

fn generate_children(node: &Node, out: &mut String) {
    for child in &node.children {
        open_element(child, out);

        if child.kind == NodeKind::Text {
            out.push_str(&escape_html(&child.value));
            out.push(' ');
        }

        if !child.children.is_empty() {
            generate_children(child, out);
            let trimmed = out.trim_end().len();
            out.truncate(trimmed);
        }

        close_element(child.kind, out);
    }
}

fn open_element(node: &Node, out: &mut String) {
    if let Some(level) = node.kind.heading_level() {
        out.push_str(&format!("<h{level}>"));
        return;
    }
    match node.kind {
        NodeKind::Error(_) => {
            let message = node.message().unwrap_or_default();
            out.push_str(&format!(
                "<span class='error' title='{}'>",
                escape_html(&message)
            ));
        }
        NodeKind::Paragraph => out.push_str("<p>"),
        NodeKind::BoldTag => out.push_str("<b>"),
        NodeKind::ItalicTag => out.push_str("<em>"),
        NodeKind::List => out.push_str("<ul>"),
        NodeKind::ListItem => out.push_str("<li>"),
        _ => {}
    }
}

fn close_element(kind: NodeKind, out: &mut String) {
    if let Some(level) = kind.heading_level() {
        out.push_str(&format!("</h{level}>"));
        return;
    }
    match kind {
        // An unknown tag sits inline like `bold[...]`; a bad heading is a block.
        NodeKind::Error(MarkupError::InvalidTag) => out.push_str("</span> "),
        NodeKind::Error(MarkupError::InvalidHeading) => out.push_str("</span>"),
        NodeKind::Paragraph => out.push_str("</p>"),
        NodeKind::BoldTag => out.push_str("</b> "),
        NodeKind::ItalicTag => out.push_str("</em> "),
        NodeKind::List => out.push_str("</ul>"),
        NodeKind::ListItem => out.push_str("</li>"),
        _ => {}
    }
}
