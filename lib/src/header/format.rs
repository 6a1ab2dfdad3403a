use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::error::ErrorDetail;

/// A data format a document header can be written in.
pub trait Format: Sized {
    /// The data format's error type.
    type Error: serde::de::Error + ErrorDetail + 'static;

    /// The line that opens and closes a header written in this format.
    const DELIMITER: &'static str;

    /// Parses `string` as the data format `Self` as a `T` or returns an error
    /// if the `string` is an invalid `T`.
    fn from_str<T: DeserializeOwned>(string: &str) -> Result<T, Self::Error>;
}

macro_rules! impl_format {
    ($name:ident [$delim:literal] : $func:expr, $E:ty) => (
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Format for $name {
            type Error = $E;

            const DELIMITER: &'static str = $delim;

            fn from_str<T: DeserializeOwned>(s: &str) -> Result<T, $E> {
                $func(s)
            }
        }
    );
}

impl_format!(Yaml ["---"]: serde_yaml::from_str, serde_yaml::Error);
impl_format!(Toml ["+++"]: toml::from_str, toml::de::Error);

/// Canonicalizes any header value to its textual form.
///
/// Strings are kept verbatim, numbers and booleans use their display form,
/// `null` is the empty string, and sequences and mappings become compact JSON.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => to_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value)
            .or_else(|_| serde_yaml::to_string(value).map(|s| s.trim_end().to_string()))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(yaml: &str) -> String {
        to_text(&Yaml::from_str::<Value>(yaml).unwrap())
    }

    #[test]
    fn scalars() {
        assert_eq!(text("hello"), "hello");
        assert_eq!(text("\"  padded \""), "  padded ");
        assert_eq!(text("42"), "42");
        assert_eq!(text("-1.5"), "-1.5");
        assert_eq!(text("true"), "true");
        assert_eq!(text("~"), "");
        assert_eq!(text("!shout loud"), "loud");
    }

    #[test]
    fn collections_become_json() {
        assert_eq!(text("[1, two]"), r#"[1,"two"]"#);
        assert_eq!(text("{a: 1}"), r#"{"a":1}"#);
    }

    #[test]
    fn toml_values_share_the_coercion() {
        let value: Value = Toml::from_str("n = 3\nok = false\nlist = [\"x\"]").unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(to_text(&map["n"]), "3");
        assert_eq!(to_text(&map["ok"]), "false");
        assert_eq!(to_text(&map["list"]), r#"["x"]"#);
    }
}
