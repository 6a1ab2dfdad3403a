use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::template::ast::{Block, Node, Reference};

/// A source of values to substitute into a template.
pub trait Values {
    /// Returns the value supplied for `name`, or `None` if there is none.
    fn get(&self, name: &str) -> Option<Cow<'_, str>>;

    #[inline]
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<K, V, S> Values for HashMap<K, V, S>
    where K: Borrow<str> + Hash + Eq, V: AsRef<str>, S: BuildHasher
{
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        HashMap::get(self, name).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

impl<K, V> Values for BTreeMap<K, V>
    where K: Borrow<str> + Ord, V: AsRef<str>
{
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        BTreeMap::get(self, name).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Values for [(K, V)] {
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        self.iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| Cow::Borrowed(v.as_ref()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Values for Vec<(K, V)> {
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        Values::get(self.as_slice(), name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> Values for [(K, V); N] {
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        Values::get(self.as_slice(), name)
    }
}

/// Strings are used verbatim and `null` is treated as absent. Other values
/// render as their JSON text.
impl Values for serde_json::Map<String, serde_json::Value> {
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        use serde_json::Value;

        match serde_json::Map::get(self, name)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl<T: Values + ?Sized> Values for &T {
    #[inline]
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        T::get(self, name)
    }
}

/// Renders `nodes` with `values` substituted.
///
/// A placeholder with no value is written back out as its marker. A block is
/// rendered only if its variable's value is non-empty once trimmed.
pub fn render<V: Values + ?Sized>(nodes: &[Node], values: &V) -> String {
    let mut output = String::new();
    render_into(&mut output, nodes, values);
    output
}

fn render_into<V: Values + ?Sized>(output: &mut String, nodes: &[Node], values: &V) {
    for node in nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Placeholder(Reference { var, marker }) => match values.get(&var.name) {
                Some(value) => output.push_str(&value),
                None => output.push_str(marker),
            },
            Node::Block(Block { variable, content }) => match values.get(variable) {
                Some(value) if !value.trim().is_empty() => render_into(output, content, values),
                _ => {}
            },
        }
    }
}
