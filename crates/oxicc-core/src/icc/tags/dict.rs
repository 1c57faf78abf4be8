//! Dictionary Tag Type (dict)
//!
//! An ordered list of name/value pairs, both stored as UTF-16BE strings
//! addressed by position records relative to the tag start.
//!
//! See ICC.1:2022 Section 10.7

use tracing::warn;

use crate::icc::error::IccError;
use crate::icc::tags::text::WideString;
use crate::icc::types::{TypeSignature, read_u32};

/// One dictionary record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    pub name: WideString,
    pub value: WideString,
}

/// Dictionary tag data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DictData {
    pub entries: Vec<DictEntry>,
}

fn wide_at(tag: &[u8], offset: u32, size: u32) -> Option<WideString> {
    if offset == 0 && size == 0 {
        return Some(WideString::default());
    }
    if size % 2 != 0 {
        return None;
    }
    let start = offset as usize;
    let raw = tag.get(start..start.checked_add(size as usize)?)?;
    Some(WideString::from_units(
        raw.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]])),
    ))
}

impl DictData {
    pub fn push(&mut self, name: WideString, value: WideString) {
        self.entries.push(DictEntry { name, value });
    }

    /// Parse a 'dict' tag, starting at the type signature
    ///
    /// Records pointing outside the tag are skipped rather than failing
    /// the whole dictionary.
    pub fn parse(tag: &[u8]) -> Result<Self, IccError> {
        let count = read_u32(tag, 8)
            .ok_or_else(|| IccError::CorruptedData("dict tag too small".to_string()))?;
        let record_len = read_u32(tag, 12)
            .ok_or_else(|| IccError::CorruptedData("dict tag too small".to_string()))?;

        if !matches!(record_len, 16 | 24 | 32) {
            return Err(IccError::CorruptedData(format!(
                "dict record length {} is not 16, 24 or 32",
                record_len
            )));
        }

        let mut dict = Self::default();
        for i in 0..count as usize {
            let base = 16 + i * record_len as usize;
            let (Some(name_off), Some(name_len), Some(value_off), Some(value_len)) = (
                read_u32(tag, base),
                read_u32(tag, base + 4),
                read_u32(tag, base + 8),
                read_u32(tag, base + 12),
            ) else {
                warn!(index = i, "dict record table truncated");
                break;
            };

            match (
                wide_at(tag, name_off, name_len),
                wide_at(tag, value_off, value_len),
            ) {
                (Some(name), Some(value)) => dict.push(name, value),
                _ => warn!(index = i, "skipping malformed dict entry"),
            }
        }

        Ok(dict)
    }

    /// Encode with 16-byte records (no display names)
    pub fn encode(&self) -> Vec<u8> {
        let table_len = 16 + self.entries.len() * 16;
        let mut strings: Vec<u8> = Vec::new();
        let mut out = Vec::with_capacity(table_len);

        out.extend_from_slice(&TypeSignature::DICT.0.to_be_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(self.entries.len() as u32).to_be_bytes());
        out.extend_from_slice(&16u32.to_be_bytes());

        let place = |text: &WideString, strings: &mut Vec<u8>| -> [u8; 8] {
            let offset = (table_len + strings.len()) as u32;
            for unit in text.units() {
                strings.extend_from_slice(&unit.to_be_bytes());
            }
            // 4-byte align each string
            while strings.len() % 4 != 0 {
                strings.push(0);
            }
            let mut pos = [0u8; 8];
            pos[0..4].copy_from_slice(&offset.to_be_bytes());
            pos[4..8].copy_from_slice(&(text.len() as u32 * 2).to_be_bytes());
            pos
        };

        for entry in &self.entries {
            let name = place(&entry.name, &mut strings);
            let value = place(&entry.value, &mut strings);
            out.extend_from_slice(&name);
            out.extend_from_slice(&value);
        }

        out.extend_from_slice(&strings);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> WideString {
        WideString::new(s).unwrap()
    }

    #[test]
    fn test_dict_roundtrip() {
        let mut dict = DictData::default();
        dict.push(wide("CMF_product"), wide("oxicc"));
        dict.push(wide("License"), wide("CC0"));
        dict.push(wide("Empty"), wide(""));

        let bytes = dict.encode();
        assert_eq!(&bytes[0..4], b"dict");
        assert_eq!(DictData::parse(&bytes).unwrap(), dict);
    }

    #[test]
    fn test_skips_out_of_bounds_entry() {
        let mut dict = DictData::default();
        dict.push(wide("a"), wide("1"));
        dict.push(wide("b"), wide("2"));
        let mut bytes = dict.encode();

        // Point the second value far past the end
        bytes[16 + 16 + 8..16 + 16 + 12].copy_from_slice(&0xFFFF_0000u32.to_be_bytes());

        let parsed = DictData::parse(&bytes).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].name, wide("a"));
    }

    #[test]
    fn test_bad_record_length() {
        let mut bytes = DictData::default().encode();
        bytes[12..16].copy_from_slice(&20u32.to_be_bytes());
        assert!(DictData::parse(&bytes).is_err());
    }
}
