/// Tavern Roster example: generate a handful of patrons, print them,
/// and build a share link for the last one.
///
/// The real generator collaborator lives outside this crate, so the
/// example wires in a tiny stub that cycles through pre-baked
/// characters, including one the race filter must reject.
///
/// Run with: cargo run --example tavern_roster
use npc_foundry::core::pipeline::{CharacterSource, Foundry, GeneratorError, GeneratorOutput};
use npc_foundry::core::share;
use npc_foundry::schema::character::Character;
use npc_foundry::schema::options::GenerateOptions;
use serde_json::json;

struct StubGenerator {
    cursor: usize,
    characters: Vec<Character>,
}

impl StubGenerator {
    fn new() -> Self {
        let raw = vec![
            json!({
                "description": { "name": "Edwin Marsh", "race": "human", "age": 42,
                                  "gender": "male", "occupation": "cartographer" },
                "physical": { "height": 180, "hair": "short gray hair", "eyes": "green eyes" },
            }),
            // A beholder walks into a bar; the allow-list sends it home.
            json!({
                "description": { "name": "Xanathar", "race": "beholder", "age": 412 },
            }),
            json!({
                "description": { "name": "Serna Whitfield", "race": "elf", "age": 214,
                                  "gender": "female", "occupation": "herbalist" },
                "physical": { "height": 172, "hair": "silver hair", "eyes": "gray eyes" },
            }),
            json!({
                "description": { "name": "Brant Ironhewer", "race": "dwarf", "age": 87,
                                  "gender": "male", "occupation": "mason" },
                "physical": { "height": 140, "hair": "a braided red beard", "eyes": "dark eyes" },
            }),
        ];
        StubGenerator {
            cursor: 0,
            characters: raw
                .into_iter()
                .filter_map(Character::from_value)
                .collect(),
        }
    }
}

impl CharacterSource for StubGenerator {
    fn generate(&mut self, _options: &GenerateOptions) -> Result<GeneratorOutput, GeneratorError> {
        let character = self.characters[self.cursor % self.characters.len()].clone();
        self.cursor += 1;
        Ok(GeneratorOutput {
            character,
            debug_info: None,
        })
    }
}

fn main() {
    let mut foundry = Foundry::builder(StubGenerator::new())
        .seed(2026)
        .build()
        .expect("Failed to build foundry");

    println!("========================================");
    println!("   THE PRANCING POUCH: TONIGHT'S PATRONS");
    println!("========================================");
    println!();

    for _ in 0..3 {
        let record = foundry
            .generate(&GenerateOptions::default())
            .expect("Failed to generate patron");

        let character = &record.character;
        println!(
            "{} ({})",
            character.name().unwrap_or("A stranger"),
            character.race().unwrap_or("unknown race"),
        );
        println!(
            "  class: {}   god: {}",
            field(character, "class"),
            field(character, "god"),
        );
        match character.get("blood").and_then(|blood| blood.get("blessing")) {
            Some(blessing) => println!("  blood: Silver, blessed as {}", blessing.as_str().unwrap_or("?")),
            None => println!("  blood: Red"),
        }
        println!("  id: {}", record.id);
        println!();
    }

    println!("{} patrons in tonight's roster.", foundry.history().len());

    if let Some(last) = foundry.history().list().last() {
        let query = share::share_query(last).expect("Failed to build share link");
        println!();
        println!("Share the last patron:");
        println!("  https://example.com/?{query}");

        let restored = share::from_query(&query).expect("Share link should decode");
        println!(
            "  (decodes back to {})",
            restored.character.name().unwrap_or("someone"),
        );
    }
}

fn field(character: &Character, key: &str) -> String {
    character
        .get(key)
        .and_then(|value| value.as_str())
        .unwrap_or("?")
        .to_string()
}
