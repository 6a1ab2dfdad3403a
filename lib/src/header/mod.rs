//! Document headers: the declared variables of a template.
//!
//! A header is a flat mapping at the very start of a document, fenced by `---`
//! (YAML) or `+++` (TOML) lines. Each key declares a variable; its value is the
//! variable's description. A key ending in `?` declares an optional variable.
//!
//! ```text
//! ---
//! title: The page title
//! subtitle?: An optional subtitle
//! ---
//! # #{title}
//! ```

mod format;
mod frontmatter;

pub use format::*;
pub use frontmatter::*;

use derive_more::Deref;
use rustc_hash::FxHashMap;
use serde_yaml::Value;

use crate::config::Options;
use crate::diagnostic::Diagnostic;
use crate::error::{Chainable, Result};

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The description, canonicalized to text.
    pub value: String,
    pub optional: bool,
}

/// Declared variables keyed by name, with any `?` suffix stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Header(FxHashMap<String, Entry>);

impl Header {
    pub fn new() -> Self {
        Header::default()
    }

    /// Declares `key` with description `value`. A trailing `?` on `key` marks
    /// the variable optional and is not part of its name.
    pub fn declare(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let (name, optional) = match key.strip_suffix('?') {
            Some(name) => (name, true),
            None => (key, false),
        };

        self.insert(name, Entry { value: value.into(), optional });
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: Entry) -> Option<Entry> {
        self.0.insert(name.into(), entry)
    }

    /// Returns the entry for `name`, inserting the one `f` returns if `name`
    /// is undeclared.
    pub fn get_or_insert_with<F>(&mut self, name: &str, f: F) -> &Entry
        where F: FnOnce() -> Entry
    {
        self.0.entry(name.to_string()).or_insert_with(f)
    }

    /// Builds a header from a parsed header region.
    ///
    /// A `null` region is an empty header. Anything other than a mapping is an
    /// error.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mapping = match value {
            Value::Null => return Ok(Header::new()),
            Value::Mapping(mapping) => mapping,
            Value::Tagged(tagged) => return Header::from_value(&tagged.value),
            other => return err! {
                "header is not a mapping",
                "found" => kind(other),
            },
        };

        let mut header = Header::new();
        for (key, value) in mapping {
            header.declare(&to_text(key), to_text(value));
        }

        Ok(header)
    }

    /// Parses `string` in the format `F`.
    pub fn parse<F: Format>(string: &str) -> Result<Self> {
        let value: Value = F::from_str(string)
            .chain_with(|| error!("header is not valid", "format" => F::DELIMITER))?;

        Header::from_value(&value)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Splits `raw` into its header and body.
///
/// Returns `None` for the header if `raw` has no header region, in which case
/// the body is all of `raw`. A header region that fails to parse is reported
/// to `diagnostics` and treated as if it weren't there: the delimiters and
/// everything between them stay in the body.
pub fn extract<'a>(
    raw: &'a str,
    options: &Options,
    diagnostics: &mut Vec<Diagnostic>,
) -> (Option<Header>, &'a str) {
    let Some(fm) = split(raw, options.toml_headers) else {
        return (None, raw);
    };

    let parsed = match fm.kind {
        Kind::Yaml => Header::parse::<Yaml>(fm.header),
        Kind::Toml => Header::parse::<Toml>(fm.header),
    };

    match parsed {
        Ok(header) => (Some(header), fm.body),
        Err(e) => {
            let start = fm.header.as_ptr() as usize - raw.as_ptr() as usize;
            diagnostics.push(Diagnostic::malformed_header(&e, start..start + fm.header.len()));
            (None, raw)
        }
    }
}
