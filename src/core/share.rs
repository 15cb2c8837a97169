/// Shareable-link codec: serialize, compact, and URL-encode a character
/// record so it can ride a single query parameter, and back again.
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::io::{Read, Write};
use thiserror::Error;
use tracing::warn;

use crate::schema::character::Character;
use crate::schema::record::{GeneratedRecord, RecordId};

/// The query parameter carrying a share payload.
pub const SHARE_PARAM: &str = "d";

/// Characters escaped when the payload is embedded in a query string.
/// The base64 alphabet below never produces these, but inputs on the
/// decode side may arrive percent-encoded by the browser.
const QUERY_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=');

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Serialize a record's character into a compact, URL-safe payload.
///
/// Only the character is encoded; the merged augmentation fields ride
/// along inside it. The pipeline is JSON, then DEFLATE, then unpadded
/// URL-safe base64, then percent-escaping for query embedding. The
/// compaction is lossless: `decode` restores a value-equal character.
pub fn encode(record: &GeneratedRecord) -> Result<String, ShareError> {
    let json = serde_json::to_vec(&record.character)?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compacted = encoder.finish()?;
    let payload = URL_SAFE_NO_PAD.encode(compacted);
    Ok(utf8_percent_encode(&payload, QUERY_ESCAPE).to_string())
}

/// Decode a share payload back into a record.
///
/// Any failure at any stage (bad percent sequence, corrupt base64,
/// truncated DEFLATE stream, invalid JSON) is recovered locally by
/// returning `None`; the caller falls back to fresh generation. The
/// restored record's id is the payload itself, and `created_at` is
/// absent. Restored characters are trusted as pre-validated and are NOT
/// re-checked against the race allow-list.
pub fn decode(payload: &str) -> Option<GeneratedRecord> {
    if payload.is_empty() {
        return None;
    }
    match decode_character(payload) {
        Ok(character) => Some(GeneratedRecord {
            id: RecordId(payload.to_string()),
            character,
            created_at: None,
        }),
        Err(err) => {
            warn!("discarding malformed share payload: {err}");
            None
        }
    }
}

fn decode_character(payload: &str) -> Result<Character, ShareError> {
    let unescaped = percent_decode_str(payload).decode_utf8()?;
    let compacted = URL_SAFE_NO_PAD.decode(unescaped.as_bytes())?;
    let mut json = Vec::new();
    DeflateDecoder::new(compacted.as_slice()).read_to_end(&mut json)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Build the query-string fragment for a share link: `d=<payload>`.
pub fn share_query(record: &GeneratedRecord) -> Result<String, ShareError> {
    Ok(format!("{}={}", SHARE_PARAM, encode(record)?))
}

/// Scan a raw query string (with or without the leading `?`) for the
/// share parameter and decode it. Returns `None` when the parameter is
/// absent or its payload fails to decode.
pub fn from_query(query: &str) -> Option<GeneratedRecord> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == SHARE_PARAM {
            decode(value)
        } else {
            None
        }
    })
}
