mod ast;
mod marker;
mod parser;
mod render;
mod schema;

pub use ast::{Block, Node, Placeholder, Reference};
pub use marker::{Kind as MarkerKind, Marker, markers, may_contain_markers};
pub use parser::{Parsed, Parser};
pub use render::{render, Values};
pub use schema::{Property, Schema};

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::Options;
use crate::diagnostic::Diagnostic;
use crate::error::{Chainable, Result};
use crate::header::{self, Header};

/// A compiled document.
///
/// Immutable once compiled. Render it as many times as needed, from as many
/// threads as needed.
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    id: Option<String>,
    raw: String,
    body_start: usize,
    templated: bool,
    header: Header,
    ast: Vec<Node>,
    vars: Vec<Arc<Placeholder>>,
    schema: Schema,
    diagnostics: Vec<Diagnostic>,
}

impl ParsedTemplate {
    /// The document identifier, if one was given.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The document text exactly as it was compiled.
    pub fn raw_source(&self) -> &str {
        &self.raw
    }

    /// The document text after the header region.
    pub fn body(&self) -> &str {
        &self.raw[self.body_start..]
    }

    /// Whether the document has a well-formed header region. Documents without
    /// one have no variables: their markers are all plain text.
    pub fn has_header(&self) -> bool {
        self.templated
    }

    /// The declared variables, including any synthesized for blocks.
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn ast(&self) -> &[Node] {
        &self.ast
    }

    /// Live variables in order of first appearance in the body.
    pub fn vars(&self) -> &[Arc<Placeholder>] {
        &self.vars
    }

    pub fn var(&self, name: &str) -> Option<&Placeholder> {
        self.vars.iter().find(|v| v.name == name).map(|v| &**v)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Problems that were recovered from while compiling.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn render<V: Values + ?Sized>(&self, values: &V) -> String {
        render(&self.ast, values)
    }

    /// Names of required variables `values` supplies no value for.
    pub fn missing<'a, V: Values + ?Sized>(&'a self, values: &V) -> Vec<&'a str> {
        self.schema.required.iter()
            .filter(|name| !values.contains(name))
            .map(|name| name.as_str())
            .collect()
    }

    /// Fails if any required variable is missing from `values`.
    pub fn check<V: Values + ?Sized>(&self, values: &V) -> Result<()> {
        let missing = self.missing(values);
        if missing.is_empty() {
            return Ok(());
        }

        err! {
            "missing required template values",
            "template" => self.id().unwrap_or("<anonymous>"),
            "missing" => missing.join(", "),
        }
    }
}

/// Compiles documents into [`ParsedTemplate`]s.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: Options,
}

impl Compiler {
    pub fn new(options: Options) -> Self {
        Compiler { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Compiles the document `raw`. Never fails: malformed input is kept as
    /// text and any surprising recovery is recorded as a diagnostic.
    pub fn compile(&self, raw: &str) -> ParsedTemplate {
        self.compile_inner(None, raw)
    }

    /// Like [`Compiler::compile()`], labeling the template `id`.
    pub fn compile_named(&self, id: impl Into<String>, raw: &str) -> ParsedTemplate {
        self.compile_inner(Some(id.into()), raw)
    }

    /// Compiles every document in `docs` in parallel. The output is in the
    /// same order as `docs`.
    pub fn compile_all<S: AsRef<str> + Sync>(&self, docs: &[S]) -> Vec<ParsedTemplate> {
        docs.par_iter()
            .map(|doc| self.compile(doc.as_ref()))
            .collect()
    }

    /// Reads and compiles the document at `path`, labeled with its file stem.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ParsedTemplate> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).chain_with(|| error! {
            "failed to read template",
            "path" => path.display(),
        })?;

        let id = path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(self.compile_named(id, &raw))
    }

    /// Loads every document in `paths` in parallel, as with
    /// [`Compiler::load()`].
    pub fn load_all<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<Result<ParsedTemplate>> {
        paths.par_iter()
            .map(|path| self.load(path))
            .collect()
    }

    fn compile_inner(&self, id: Option<String>, raw: &str) -> ParsedTemplate {
        let mut diagnostics = vec![];
        let (header, body) = header::extract(raw, &self.options, &mut diagnostics);
        let body_start = raw.len() - body.len();

        // Without a header nothing is declared, so every marker is text.
        let templated = header.is_some();
        let mut header = header.unwrap_or_default();
        let parsed = match templated {
            true => Parser::new(body, &mut header, &self.options).parse(),
            false => {
                let mut parsed = Parsed::default();
                ast::push_text(&mut parsed.ast, body);
                parsed
            }
        };

        diagnostics.extend(parsed.diagnostics.into_iter().map(|d| d.shifted(body_start)));

        let label = id.as_deref().unwrap_or("<anonymous>");
        for diagnostic in &diagnostics {
            log::warn!("{label}: {diagnostic}");
        }

        let schema = Schema::build(&parsed.vars);
        log::debug!("{label}: compiled {} variable(s), {} required",
            parsed.vars.len(), schema.required.len());

        ParsedTemplate {
            id,
            raw: raw.to_string(),
            body_start,
            templated,
            header,
            ast: parsed.ast,
            vars: parsed.vars,
            schema,
            diagnostics,
        }
    }
}

#[cfg(test)] static_assertions::assert_impl_all!(ParsedTemplate: Send, Sync, Clone);
#[cfg(test)] static_assertions::assert_impl_all!(Compiler: Send, Sync);
