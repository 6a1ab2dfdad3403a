use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::template::ast::Placeholder;

/// An object schema describing the values a template expects.
///
/// Every property is a string. Serializes as a JSON Schema object:
///
/// ```json
/// {
///   "type": "object",
///   "properties": { "name": { "type": "string", "description": "..." } },
///   "required": ["name"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Properties in order of first appearance in the template body.
    pub properties: Vec<Property>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub description: String,
}

impl Schema {
    pub fn build(vars: &[Arc<Placeholder>]) -> Self {
        let properties = vars.iter()
            .map(|var| Property {
                name: var.name.clone(),
                description: match var.description.trim() {
                    "" => format!("Variable: {}", var.name),
                    _ => var.description.clone(),
                },
            })
            .collect();

        let required = vars.iter()
            .filter(|var| !var.optional)
            .map(|var| var.name.clone())
            .collect();

        Schema { properties, required }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Properties<'a>(&'a [Property]);

        impl Serialize for Properties<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for property in self.0 {
                    map.serialize_entry(&property.name, property)?;
                }

                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry("properties", &Properties(&self.properties))?;
        map.serialize_entry("required", &self.required)?;
        map.end()
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "string")?;
        map.serialize_entry("description", &self.description)?;
        map.end()
    }
}
