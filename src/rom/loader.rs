/// ROM Listing Loader
///
/// Parses the plain-text ROM listing, one glyph per line:
///
/// ```text
/// # comment
/// A: 0b01010, 0x1F, 3, ...
/// space: 0, 0, 0, ...
/// ```
///
/// Words may be decimal, `0x` hex or `0b` binary and must fit in a byte.
/// Every glyph must have as many words as the first one.

use log::{debug, warn};

use super::error::RomError;
use super::table::GlyphTable;
use crate::vector::stroke::STROKE_MASK;

/// Names for characters that cannot be written literally as a key.
const NAMED_KEYS: [(&str, &str); 4] = [
    ("space", " "),
    ("colon", ":"),
    ("comma", ","),
    ("hash", "#"),
];

fn resolve_key(raw: &str) -> String {
    NAMED_KEYS
        .iter()
        .find(|(name, _)| raw.eq_ignore_ascii_case(name))
        .map(|(_, ch)| ch.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_word(token: &str) -> Option<u8> {
    let lower = token.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u8::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u8::from_str_radix(&bin.replace('_', ""), 2).ok()
    } else {
        lower.parse::<u8>().ok()
    }
}

pub fn parse_rom_listing(text: &str) -> Result<GlyphTable, RomError> {
    let mut entries: Vec<(String, Vec<u8>)> = Vec::new();
    let mut expected_len: Option<usize> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let sep = trimmed
            .find(':')
            .ok_or(RomError::MissingSeparator { line })?;
        let raw_key = trimmed[..sep].trim();
        if raw_key.is_empty() {
            return Err(RomError::EmptyKey { line });
        }
        let key = resolve_key(raw_key);
        if entries.iter().any(|(k, _)| *k == key) {
            return Err(RomError::DuplicateKey { line, key });
        }

        let words = trimmed[sep + 1..]
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                parse_word(token).ok_or_else(|| RomError::InvalidValue {
                    line,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<u8>, RomError>>()?;

        match expected_len {
            None => expected_len = Some(words.len()),
            Some(expected) if expected != words.len() => {
                return Err(RomError::LengthMismatch {
                    line,
                    key,
                    expected,
                    found: words.len(),
                });
            }
            Some(_) => {}
        }

        if let Some(word) = words.iter().find(|&&w| w & !STROKE_MASK != 0) {
            warn!(
                "ROM glyph {:?} (line {}): word 0x{:02X} has bits above the stroke field, masking",
                key, line, word
            );
        }

        entries.push((key, words));
    }

    debug!(
        "ROM listing: {} glyphs, {} strokes each",
        entries.len(),
        expected_len.unwrap_or(0)
    );

    Ok(GlyphTable::from_entries(entries))
}
