//! Arena-backed tree construction.
//!
//! Nodes are appended to a flat arena while parsing. The node currently
//! receiving children is the top of `stack`, so "return to parent" is a
//! pop. [`TreeBuilder::finish`] turns the arena into an owned [`Node`] tree.

use crate::node::{Node, NodeKind};

#[derive(Debug)]
struct Slot {
    kind: NodeKind,
    value: String,
    children: Vec<usize>,
}

#[derive(Debug)]
pub(crate) struct TreeBuilder {
    slots: Vec<Slot>,
    stack: Vec<usize>,
}

impl TreeBuilder {
    /// Start a tree with an open `Root` node.
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Slot {
                kind: NodeKind::Root,
                value: String::new(),
                children: Vec::new(),
            }],
            stack: vec![0],
        }
    }

    fn current(&self) -> usize {
        self.stack.last().copied().unwrap_or(0)
    }

    fn push_child(&mut self, kind: NodeKind, value: String) -> usize {
        let index = self.slots.len();
        self.slots.push(Slot {
            kind,
            value,
            children: Vec::new(),
        });
        let parent = self.current();
        self.slots[parent].children.push(index);
        index
    }

    /// Append a node under the current one and make it current.
    pub(crate) fn open(&mut self, kind: NodeKind, value: impl Into<String>) {
        let index = self.push_child(kind, value.into());
        self.stack.push(index);
    }

    /// Return to the parent of the current node. The root is never closed.
    pub(crate) fn close(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Add text under the current node, merging it into a directly
    /// preceding `Text` sibling.
    pub(crate) fn append_text(&mut self, text: &str) {
        let parent = self.current();
        if let Some(&last) = self.slots[parent].children.last() {
            let sibling = &mut self.slots[last];
            if sibling.kind == NodeKind::Text {
                sibling.value.push(' ');
                sibling.value.push_str(text);
                return;
            }
        }
        self.push_child(NodeKind::Text, text.to_owned());
    }

    /// Convert the arena into an owned tree rooted at `Root`.
    pub(crate) fn finish(self) -> Node {
        let mut built: Vec<Option<Node>> = Vec::with_capacity(self.slots.len());
        built.resize_with(self.slots.len(), || None);

        // Children always live at higher indices than their parent.
        for (index, slot) in self.slots.into_iter().enumerate().rev() {
            let children = slot
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[index] = Some(Node::new(slot.kind, slot.value).with_children(children));
        }

        built
            .first_mut()
            .and_then(Option::take)
            .unwrap_or_else(|| Node::new(NodeKind::Root, ""))
    }
}
