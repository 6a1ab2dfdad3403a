use serde::{Deserialize, Serialize};

use crate::error::{Chainable, Result};
use crate::header::{Format, Toml};

/// Compiler settings.
///
/// Settings are usually left at their defaults. They can also be read from a
/// TOML table:
///
/// ```
/// use stencil::config::{Options, Recovery};
///
/// let options = Options::from_toml(r#"
///     recovery = "innermost-first"
///     toml_headers = false
/// "#).unwrap();
///
/// assert_eq!(options.recovery, Recovery::InnermostFirst);
/// assert!(!options.toml_headers);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Options {
    /// How blocks still open at the end of the body are flattened to text.
    pub recovery: Recovery,
    /// Whether `+++`-delimited TOML headers are recognized alongside `---`
    /// YAML headers.
    pub toml_headers: bool,
}

/// The order in which unclosed blocks are written back out as literal text.
///
/// Given `A #{?x} B #{?y} C` where neither block is closed:
///
///   * [`Recovery::DocumentOrder`] yields `A #{?x} B #{?y} C`.
///   * [`Recovery::InnermostFirst`] yields `#{?y} C#{?x} B A`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recovery {
    /// Root content, then each open block from the outermost inwards, each
    /// preceded by its opening marker.
    #[default]
    DocumentOrder,
    /// Each open block from the innermost outwards, each preceded by its
    /// opening marker, followed by the root content.
    InnermostFirst,
}

impl Default for Options {
    fn default() -> Self {
        Options { recovery: Recovery::default(), toml_headers: true }
    }
}

impl Options {
    pub fn from_toml(string: &str) -> Result<Self> {
        Toml::from_str(string).chain(error!("invalid compiler options"))
    }

    pub fn recovery(mut self, recovery: Recovery) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn toml_headers(mut self, enabled: bool) -> Self {
        self.toml_headers = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.recovery, Recovery::DocumentOrder);
        assert!(options.toml_headers);
        assert_eq!(Options::from_toml("").unwrap(), options);
    }

    #[test]
    fn rejects_unknown_recovery() {
        let error = Options::from_toml("recovery = \"sideways\"").unwrap_err();
        assert_eq!(error.message(), "invalid compiler options");
    }
}
