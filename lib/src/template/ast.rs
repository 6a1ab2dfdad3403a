use std::ops::Range;
use std::sync::Arc;

use derive_more::From;

/// A declared variable as referenced from a template body.
///
/// The first reference to a name in the body fixes its `Placeholder`; every
/// later reference shares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    /// The header's description, verbatim. May be empty.
    pub description: String,
    pub optional: bool,
    /// Byte range of the first reference within the body.
    pub span: Range<usize>,
}

/// One occurrence of a placeholder in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub var: Arc<Placeholder>,
    /// The marker exactly as written at this occurrence, such as `#{name?}`.
    pub marker: String,
}

/// A run of nodes included only when `variable` has a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub variable: String,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Node {
    Text(String),
    Placeholder(Reference),
    Block(Block),
}

impl Node {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&Reference> {
        match self {
            Node::Placeholder(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }
}

/// Appends `node` to `nodes`, merging it into a trailing text node if both are
/// text. Empty text is dropped.
pub(crate) fn push(nodes: &mut Vec<Node>, node: Node) {
    match node {
        Node::Text(text) => push_text(nodes, &text),
        node => nodes.push(node),
    }
}

/// Appends `text` to `nodes` as with [`push()`].
pub(crate) fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }

    match nodes.last_mut() {
        Some(Node::Text(last)) => last.push_str(text),
        _ => nodes.push(Node::Text(text.to_string())),
    }
}
