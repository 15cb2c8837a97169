/// Augmentation: blood, class, and deity attributes derived after the
/// generator collaborator has produced a character.
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::catalog::Catalogs;

/// Blood rolls are drawn uniformly from `[0, BLOOD_ROLL_CEILING)`. A
/// roll of exactly zero marks silver blood, a 1-in-50 chance.
pub const BLOOD_ROLL_CEILING: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodColor {
    Red,
    Silver,
}

/// Blood attributes. `blessing` is present exactly when the color is
/// Silver; red-blooded characters carry no blessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blood {
    pub color: BloodColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blessing: Option<String>,
}

impl Blood {
    pub fn is_silver(&self) -> bool {
        self.color == BloodColor::Silver
    }
}

/// Attributes computed independently of the generator collaborator and
/// merged into the character after acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Augmentation {
    pub blood: Blood,
    pub class: String,
    pub god: String,
}

impl Augmentation {
    /// The augmentation as top-level character fields, ready for
    /// [`Character::overlay`](crate::schema::character::Character::overlay).
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Draw augmentation attributes from the catalogs.
///
/// The blood roll is uniform in `[0, 50)` unless `roll_override` is
/// supplied, which allows deterministic tests and externally forced
/// silver blood. Class and god are drawn independently; neither
/// correlates with the blood roll or with each other.
///
/// Catalogs must be non-empty (`Catalogs::validate` enforces this at
/// build time).
pub fn augment<R: Rng + ?Sized>(
    rng: &mut R,
    catalogs: &Catalogs,
    roll_override: Option<u32>,
) -> Augmentation {
    let roll = roll_override.unwrap_or_else(|| rng.gen_range(0..BLOOD_ROLL_CEILING));
    let blood = if roll == 0 {
        Blood {
            color: BloodColor::Silver,
            blessing: catalogs.blessings.choose(rng).cloned(),
        }
    } else {
        Blood {
            color: BloodColor::Red,
            blessing: None,
        }
    };

    Augmentation {
        blood,
        class: catalogs.classes.choose(rng).cloned().unwrap_or_default(),
        god: catalogs.gods.choose(rng).cloned().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn roll_zero_yields_silver_with_blessing() {
        let catalogs = Catalogs::default();
        let mut rng = StdRng::seed_from_u64(1);
        let augmentation = augment(&mut rng, &catalogs, Some(0));
        assert_eq!(augmentation.blood.color, BloodColor::Silver);
        let blessing = augmentation.blood.blessing.expect("silver blood carries a blessing");
        assert!(!blessing.is_empty());
        assert!(catalogs.blessings.contains(&blessing));
    }

    #[test]
    fn nonzero_rolls_yield_red_without_blessing() {
        let catalogs = Catalogs::default();
        let mut rng = StdRng::seed_from_u64(2);
        for roll in 1..BLOOD_ROLL_CEILING {
            let augmentation = augment(&mut rng, &catalogs, Some(roll));
            assert_eq!(augmentation.blood.color, BloodColor::Red);
            assert_eq!(augmentation.blood.blessing, None);
        }
    }

    #[test]
    fn class_and_god_come_from_catalogs() {
        let catalogs = Catalogs::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let augmentation = augment(&mut rng, &catalogs, None);
            assert!(catalogs.classes.contains(&augmentation.class));
            assert!(catalogs.gods.contains(&augmentation.god));
        }
    }

    #[test]
    fn deterministic_given_seed() {
        let catalogs = Catalogs::default();
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        let a = augment(&mut rng1, &catalogs, None);
        let b = augment(&mut rng2, &catalogs, None);
        assert_eq!(a, b);
    }

    #[test]
    fn to_fields_shape() {
        let catalogs = Catalogs::default();
        let mut rng = StdRng::seed_from_u64(4);
        let fields = augment(&mut rng, &catalogs, Some(0)).to_fields();
        assert!(fields.contains_key("blood"));
        assert!(fields.contains_key("class"));
        assert!(fields.contains_key("god"));
        assert_eq!(fields["blood"]["color"], serde_json::json!("Silver"));
    }

    #[test]
    fn red_blood_serializes_without_blessing_field() {
        let blood = Blood {
            color: BloodColor::Red,
            blessing: None,
        };
        let value = serde_json::to_value(&blood).unwrap();
        assert!(value.get("blessing").is_none());
    }
}
