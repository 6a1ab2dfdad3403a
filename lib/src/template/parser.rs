use std::ops::Range;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::config::{Options, Recovery};
use crate::diagnostic::Diagnostic;
use crate::header::{Entry, Header};
use crate::template::ast::{self, Block, Node, Placeholder, Reference};
use crate::template::marker::{self, Kind, Marker};

/// An open scope: the root, or a block whose closing marker hasn't been seen.
#[derive(Debug)]
struct Frame<'a> {
    /// The opening marker. `None` only for the root.
    open: Option<Marker<'a>>,
    content: Vec<Node>,
}

impl<'a> Frame<'a> {
    fn variable(&self) -> Option<&'a str> {
        match self.open.as_ref()?.kind {
            Kind::Open { name } => Some(name),
            _ => None,
        }
    }
}

/// The result of parsing a body.
#[derive(Debug, Default)]
pub struct Parsed {
    pub ast: Vec<Node>,
    /// Every live variable in order of first appearance.
    pub vars: Vec<Arc<Placeholder>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds the AST for a template body in a single left-to-right pass.
///
/// Markers naming variables `header` doesn't declare are kept as text. Block
/// control variables the header doesn't declare are added to it as optional.
pub struct Parser<'a, 'h> {
    body: &'a str,
    header: &'h mut Header,
    recovery: Recovery,
    stack: Vec<Frame<'a>>,
    seen: FxHashMap<&'a str, Arc<Placeholder>>,
    parsed: Parsed,
}

impl<'a, 'h> Parser<'a, 'h> {
    pub fn new(body: &'a str, header: &'h mut Header, options: &Options) -> Self {
        Parser {
            body,
            header,
            recovery: options.recovery,
            stack: vec![Frame { open: None, content: vec![] }],
            seen: FxHashMap::default(),
            parsed: Parsed::default(),
        }
    }

    pub fn parse(mut self) -> Parsed {
        if !marker::may_contain_markers(self.body) {
            ast::push_text(&mut self.parsed.ast, self.body);
            return self.parsed;
        }

        let mut cursor = 0;
        for marker in marker::markers(self.body) {
            let text = &self.body[cursor..marker.span.start];
            ast::push_text(self.content(), text);
            cursor = marker.span.end;

            match marker.kind {
                Kind::Placeholder { name, optional } => self.placeholder(marker, name, optional),
                Kind::Open { name } => self.open(marker, name),
                Kind::Close { name } => self.close(marker, name),
            }
        }

        let rest = &self.body[cursor..];
        ast::push_text(self.content(), rest);
        self.finish()
    }

    /// The content of the innermost open scope.
    fn content(&mut self) -> &mut Vec<Node> {
        let frame = self.stack.last_mut().expect("root frame is never popped");
        &mut frame.content
    }

    fn literal(&mut self, marker: &Marker<'a>) {
        ast::push_text(self.content(), marker.text);
    }

    /// Returns the placeholder for `name`, creating and registering it if this
    /// is its first appearance.
    fn var(&mut self, name: &'a str, optional: bool, span: &Range<usize>) -> Arc<Placeholder> {
        if let Some(var) = self.seen.get(name) {
            return var.clone();
        }

        let entry = &self.header[name];
        let var = Arc::new(Placeholder {
            name: name.to_string(),
            description: entry.value.clone(),
            optional: optional || entry.optional,
            span: span.clone(),
        });

        self.seen.insert(name, var.clone());
        self.parsed.vars.push(var.clone());
        var
    }

    fn placeholder(&mut self, marker: Marker<'a>, name: &'a str, optional: bool) {
        if name.is_empty() || !self.header.contains_key(name) {
            return self.literal(&marker);
        }

        let var = self.var(name, optional, &marker.span);
        let reference = Reference { var, marker: marker.text.to_string() };
        ast::push(self.content(), reference.into());
    }

    fn open(&mut self, marker: Marker<'a>, name: &'a str) {
        if name.is_empty() {
            return self.literal(&marker);
        }

        self.header.get_or_insert_with(name, || Entry {
            value: format!("Include the `{name}` section"),
            optional: true,
        });

        self.stack.push(Frame { open: Some(marker), content: vec![] });
    }

    fn close(&mut self, marker: Marker<'a>, name: Option<&'a str>) {
        if self.stack.len() == 1 {
            return self.literal(&marker);
        }

        let innermost = self.stack.last().and_then(|frame| frame.variable());
        let variable = match (innermost, name) {
            (None, _) => return self.literal(&marker),
            (Some(open), Some(close)) if open != close => return self.literal(&marker),
            (Some(open), _) => open,
        };

        let frame = self.stack.pop().expect("stack has an open block");
        let span = frame.open.as_ref().map_or(marker.span.clone(), |open| open.span.clone());
        self.var(variable, false, &span);

        let block = Block { variable: variable.to_string(), content: frame.content };
        ast::push(self.content(), block.into());
    }

    /// Flattens any unclosed blocks back into text and returns the result.
    fn finish(mut self) -> Parsed {
        let mut open = self.stack.split_off(1);
        let root = self.stack.pop().expect("root frame is never popped");
        if open.is_empty() {
            self.parsed.ast = root.content;
            return self.parsed;
        }

        for frame in &open {
            if let Some(marker) = &frame.open {
                let diagnostic = Diagnostic::unclosed_block(marker.text, marker.span.clone());
                self.parsed.diagnostics.push(diagnostic);
            }
        }

        let mut nodes = vec![];
        let trailing = match self.recovery {
            Recovery::DocumentOrder => {
                nodes.extend(root.content);
                vec![]
            }
            Recovery::InnermostFirst => {
                open.reverse();
                root.content
            }
        };

        for frame in open {
            if let Some(marker) = &frame.open {
                ast::push_text(&mut nodes, marker.text);
            }

            frame.content.into_iter().for_each(|node| ast::push(&mut nodes, node));
        }

        trailing.into_iter().for_each(|node| ast::push(&mut nodes, node));
        self.parsed.ast = nodes;
        self.parsed
    }
}
