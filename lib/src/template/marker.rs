use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Matches all three marker forms: `#{name}`, `#{?name}`, and `#{/name}`. Each
/// may carry a trailing `?`; names may be empty.
static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\{([?/]?)([A-Za-z0-9_.\-]*)(\??)\}").expect("marker pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind<'a> {
    /// `#{name}` or `#{name?}`.
    Placeholder { name: &'a str, optional: bool },
    /// `#{?name}`.
    Open { name: &'a str },
    /// `#{/name}` or `#{/}`.
    Close { name: Option<&'a str> },
}

/// A marker found in a template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker<'a> {
    pub kind: Kind<'a>,
    /// The marker's full text.
    pub text: &'a str,
    pub span: Range<usize>,
}

impl<'a> Marker<'a> {
    fn from_captures(captures: Captures<'a>) -> Self {
        let whole = captures.get(0).expect("capture 0 always participates");
        let sigil = captures.get(1).map_or("", |m| m.as_str());
        let name = captures.get(2).map_or("", |m| m.as_str());
        let question = captures.get(3).map_or(false, |m| !m.as_str().is_empty());

        let kind = match sigil {
            "?" => Kind::Open { name },
            "/" if name.is_empty() => Kind::Close { name: None },
            "/" => Kind::Close { name: Some(name) },
            _ => Kind::Placeholder { name, optional: question },
        };

        Marker { kind, text: whole.as_str(), span: whole.range() }
    }
}

/// Returns `true` if `input` may contain a marker.
#[inline]
pub fn may_contain_markers(input: &str) -> bool {
    memchr::memmem::find(input.as_bytes(), b"#{").is_some()
}

/// Iterates over every marker in `body`, left to right.
pub fn markers(body: &str) -> impl Iterator<Item = Marker<'_>> {
    MARKER.captures_iter(body).map(Marker::from_captures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(body: &str) -> Vec<Kind<'_>> {
        markers(body).map(|m| m.kind).collect()
    }

    #[test]
    fn three_forms() {
        assert_eq!(kinds("#{a} #{b?} #{?c} #{/c} #{/}"), vec![
            Kind::Placeholder { name: "a", optional: false },
            Kind::Placeholder { name: "b", optional: true },
            Kind::Open { name: "c" },
            Kind::Close { name: Some("c") },
            Kind::Close { name: None },
        ]);
    }

    #[test]
    fn empty_names_still_match() {
        assert_eq!(kinds("#{} #{?} #{?}"), vec![
            Kind::Placeholder { name: "", optional: false },
            Kind::Open { name: "" },
            Kind::Open { name: "" },
        ]);
    }

    #[test]
    fn spans_and_text() {
        let body = "Hi #{user.name}, #{/}";
        let found: Vec<_> = markers(body).collect();
        assert_eq!(found[0].text, "#{user.name}");
        assert_eq!(&body[found[0].span.clone()], "#{user.name}");
        assert_eq!(found[1].span, 17..21);
    }

    #[test]
    fn not_markers() {
        assert!(kinds("{name} #name #{two words} #{ name } #{a}b}").len() == 1);
        assert!(kinds("# {name} #{name").is_empty());
        assert!(!may_contain_markers("{{ name }} # heading"));
        assert!(may_contain_markers("x #{"));
    }
}
