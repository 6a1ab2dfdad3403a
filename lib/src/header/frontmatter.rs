use crate::header::{Format, Toml, Yaml};

/// The format a header region is written in, chosen by its delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Yaml,
    Toml,
}

/// A document split into its header region and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    pub kind: Kind,
    /// The text between the delimiter lines, without the final line break.
    pub header: &'a str,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

impl Kind {
    pub fn delimiter(self) -> &'static str {
        match self {
            Kind::Yaml => Yaml::DELIMITER,
            Kind::Toml => Toml::DELIMITER,
        }
    }
}

/// Returns `line` without its trailing `\n` or `\r\n`.
#[inline(always)]
fn strip_eol(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Splits `input` into a header region and a body.
///
/// The first line of `input` must consist solely of a delimiter, and the
/// header region extends to the next line consisting solely of the same
/// delimiter. Returns `None` if `input` doesn't open with a delimiter or the
/// region is never closed. `+++` is only considered when `toml` is `true`.
pub fn split(input: &str, toml: bool) -> Option<FrontMatter<'_>> {
    let first_end = memchr::memchr(b'\n', input.as_bytes())?;
    let kind = match strip_eol(&input[..=first_end]) {
        d if d == Kind::Yaml.delimiter() => Kind::Yaml,
        d if toml && d == Kind::Toml.delimiter() => Kind::Toml,
        _ => return None,
    };

    let start = first_end + 1;
    let mut line_start = start;
    while line_start <= input.len() {
        let line_end = memchr::memchr(b'\n', &input.as_bytes()[line_start..])
            .map(|i| line_start + i + 1)
            .unwrap_or(input.len());

        if strip_eol(&input[line_start..line_end]) == kind.delimiter() {
            let header = &input[start..line_start];
            let header = header.strip_suffix('\n').unwrap_or(header);
            let header = header.strip_suffix('\r').unwrap_or(header);
            return Some(FrontMatter { kind, header, body: &input[line_end..] });
        }

        if line_end == input.len() {
            break;
        }

        line_start = line_end;
    }

    None
}
