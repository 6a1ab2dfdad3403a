#![doc = svgbobdoc::transform!(
//! Compiles markdown documents with variable holes into schemas and renderers.
//!
//! # Overview
//!
//! A template is a markdown document that opens with a header declaring the
//! variables it expects, followed by a body that references them:
//!
//! ```text
//! ---
//! name: Who to greet
//! note?: An optional postscript
//! ---
//! Hello, #{name}!
//! #{?note}
//! P.S. #{note}
//! #{/note}
//! ```
//!
//! Compiling a document produces a [`ParsedTemplate`]: an AST of text,
//! placeholders, and conditional blocks, the ordered list of variables the body
//! uses, and a JSON [`Schema`](template::Schema) describing them. The compiled
//! template can then be rendered any number of times with different values.
//!
//! ```svgbob
//!  +----------+     +---------+     +--------+     +--------+
//!  | document |---->| header  |---->| parser |---->| schema |
//!  +----------+     +----+----+     +---+----+     +--------+
//!                        |              |
//!                        | body         | AST
//!                        v              v
//!                   +---------+    +----------+      +------+
//!                   |  text   |    | renderer |<-----|values|
//!                   +---------+    +-----+----+      +------+
//!                                        |
//!                                        v
//!                                     output
//! ```
//!
//! ## Markers
//!
//!   * `#{name}` is replaced by the value of `name`. `#{name?}` marks the
//!     reference optional.
//!   * `#{?name}` opens a block that is only rendered when `name` has a
//!     non-empty value; `#{/name}` or `#{/}` closes it. Blocks nest.
//!
//! Markers that name variables the header doesn't declare are left as they
//! are, which lets documents show marker syntax literally. Block variables
//! need not be declared: undeclared ones are optional. A document with no
//! header at all, or with one that fails to parse, is plain text.
//!
//! ## Rendering
//!
//!   * A placeholder with no value is rendered as its original marker, so
//!     missing values remain visible. Use [`ParsedTemplate::check()`] to detect
//!     them beforehand.
//!   * An empty value renders as nothing.
//!   * A block whose variable is missing or blank is omitted entirely.
//!
//! ```
//! let template = stencil::compile("---\nname: \"n\"\n---\nHi #{name}!");
//!
//! assert_eq!(template.render(&[("name", "Ava")]), "Hi Ava!");
//! assert_eq!(template.render(&[] as &[(&str, &str)]), "Hi #{name}!");
//! ```
)]

#[macro_use]
pub mod error;
pub mod config;
pub mod diagnostic;
pub mod header;
pub mod template;

pub use config::{Options, Recovery};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use template::{Compiler, ParsedTemplate, Values};

/// Compiles `raw` with the default [`Options`].
pub fn compile(raw: &str) -> ParsedTemplate {
    Compiler::default().compile(raw)
}

/// Renders `template` with `values`. See [`ParsedTemplate::render()`].
pub fn render<V: Values + ?Sized>(template: &ParsedTemplate, values: &V) -> String {
    template.render(values)
}
