use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::character::Character;

/// Newtype wrapper for record identifiers.
///
/// Freshly generated records carry a random UUID; records restored from
/// a share link carry the encoded payload itself, which doubles as a
/// stable identity for equality and history lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The complete output of one generation or restoration event.
///
/// `created_at` is stamped at the moment a fresh record is accepted and
/// is `None` for records restored from a share link, which carry no
/// creation time of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRecord {
    pub id: RecordId,
    pub character: Character,
    pub created_at: Option<DateTime<Utc>>,
}

/// Identifier-generation capability, injected into the pipeline so tests
/// can supply deterministic sequences.
pub trait IdSource {
    fn next_id(&mut self) -> RecordId;
}

/// Default id source: a random UUID v4 per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> RecordId {
        RecordId(Uuid::new_v4().to_string())
    }
}
