use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An open, extensible character record produced by the generator
/// collaborator.
///
/// The foundry does not own this record's shape. It reads exactly one
/// field (`description.race`, for allow-list filtering) and writes the
/// augmentation fields (`blood`, `class`, `god`) via [`Character::overlay`].
/// Everything else passes through untouched for the rendering layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Character(pub Map<String, Value>);

impl Character {
    /// Wrap a JSON value, if it is an object.
    pub fn from_value(value: Value) -> Option<Character> {
        match value {
            Value::Object(map) => Some(Character(map)),
            _ => None,
        }
    }

    /// The race category, read from `description.race`.
    pub fn race(&self) -> Option<&str> {
        self.0.get("description")?.get("race")?.as_str()
    }

    /// The display name, read from `description.name`.
    pub fn name(&self) -> Option<&str> {
        self.0.get("description")?.get("name")?.as_str()
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Overlay fields onto the record. On key collision the incoming
    /// value wins; this is the explicit merge policy for augmentation.
    pub fn overlay(&mut self, fields: Map<String, Value>) {
        for (key, value) in fields {
            self.0.insert(key, value);
        }
    }
}
