use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options forwarded to the generator collaborator on every sampling
/// attempt.
///
/// The pipeline itself reads only `blood_roll`; the named fields are the
/// knobs the collaborator is known to accept, and `extra` carries anything
/// else through opaquely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Overrides the blood roll drawn during augmentation. `Some(0)`
    /// forces Silver blood; any other value forces Red.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_roll: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_empty() {
        let options = GenerateOptions::default();
        assert_eq!(options.race, None);
        assert_eq!(options.blood_roll, None);
        assert!(options.extra.is_empty());
    }

    #[test]
    fn extra_fields_round_trip() {
        let options: GenerateOptions = serde_json::from_value(json!({
            "race": "dwarf",
            "occupation": "blacksmith",
        }))
        .unwrap();
        assert_eq!(options.race.as_deref(), Some("dwarf"));
        assert_eq!(options.extra.get("occupation"), Some(&json!("blacksmith")));

        let serialized = serde_json::to_value(&options).unwrap();
        assert_eq!(serialized["occupation"], json!("blacksmith"));
    }
}
