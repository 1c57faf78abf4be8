//! Text Tag Types
//!
//! ICC profiles can contain text in several formats:
//! - text: Simple ASCII text
//! - desc: Profile description (v2 format)
//! - mluc: Multi-localized Unicode (v4 format)
//!
//! All three decode into [`MultiLocalizedText`]. Strings are kept as raw
//! UTF-16 code units so that malformed text survives until someone asks for
//! it as a Rust string.
//!
//! See ICC.1:2022 Sections 10.24 (text), 10.14 (desc), 10.15 (mluc)

use crate::icc::error::IccError;
use crate::icc::types::{TypeSignature, read_u16, read_u32};

/// A UTF-16 string without terminator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WideString(Vec<u16>);

impl WideString {
    /// Encode a Rust string, refusing embedded NULs
    pub fn new(text: &str) -> Result<Self, IccError> {
        if text.contains('\0') {
            return Err(IccError::CorruptedData(
                "text contains an embedded NUL".to_string(),
            ));
        }
        Ok(Self(text.encode_utf16().collect()))
    }

    /// Wrap code units as found in a profile, cutting at the first NUL
    pub fn from_units(units: impl IntoIterator<Item = u16>) -> Self {
        Self(units.into_iter().take_while(|&c| c != 0).collect())
    }

    pub fn units(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode, failing on unpaired surrogates
    pub fn to_string_checked(&self) -> Option<String> {
        String::from_utf16(&self.0).ok()
    }

    /// 7-bit rendition used by v2 text types
    pub fn to_ascii_lossy(&self) -> Vec<u8> {
        char::decode_utf16(self.0.iter().copied())
            .map(|c| match c {
                Ok(c) if c.is_ascii() => c as u8,
                _ => b'?',
            })
            .collect()
    }
}

/// One localized string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedEntry {
    /// ISO 639-1 language, `None` for the unqualified entry
    pub language: Option<[u8; 2]>,
    /// ISO 3166-1 country
    pub country: Option<[u8; 2]>,
    pub text: WideString,
}

/// Multi-localized text tag data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiLocalizedText {
    entries: Vec<LocalizedEntry>,
}

fn code(value: Option<&str>) -> Option<[u8; 2]> {
    let bytes = value?.as_bytes();
    match bytes {
        [a, b] => Some([*a, *b]),
        _ => None,
    }
}

fn code_from_raw(raw: [u8; 2]) -> Option<[u8; 2]> {
    if raw == [0, 0] { None } else { Some(raw) }
}

impl MultiLocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single unqualified entry
    pub fn with_text(text: WideString) -> Self {
        let mut mlu = Self::new();
        mlu.set(None, None, text);
        mlu
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LocalizedEntry] {
        &self.entries
    }

    /// Add or replace the entry for a language/country pair
    ///
    /// Codes that are not exactly two bytes are treated as absent.
    pub fn set(&mut self, language: Option<&str>, country: Option<&str>, text: WideString) {
        let language = code(language);
        let country = if language.is_some() { code(country) } else { None };
        match self
            .entries
            .iter_mut()
            .find(|e| e.language == language && e.country == country)
        {
            Some(entry) => entry.text = text,
            None => self.entries.push(LocalizedEntry {
                language,
                country,
                text,
            }),
        }
    }

    /// Look up a string
    ///
    /// - no language: the unqualified entry, else en/US, else the first entry
    /// - language and country: that exact pair only
    /// - language alone: that language without a country, else the first
    ///   entry in that language
    pub fn get(&self, language: Option<&str>, country: Option<&str>) -> Option<&WideString> {
        let found = match (code(language), code(country)) {
            (None, _) => self
                .entries
                .iter()
                .find(|e| e.language.is_none())
                .or_else(|| {
                    self.entries
                        .iter()
                        .find(|e| e.language == Some(*b"en") && e.country == Some(*b"US"))
                })
                .or_else(|| self.entries.first()),
            (Some(lang), Some(country)) => self
                .entries
                .iter()
                .find(|e| e.language == Some(lang) && e.country == Some(country)),
            (Some(lang), None) => self
                .entries
                .iter()
                .find(|e| e.language == Some(lang) && e.country.is_none())
                .or_else(|| self.entries.iter().find(|e| e.language == Some(lang))),
        };
        found.map(|e| &e.text)
    }

    /// Parse 'text' type body (NUL-terminated 7-bit text)
    pub fn parse_text(body: &[u8]) -> Result<Self, IccError> {
        let latin1 = body.iter().take_while(|&&b| b != 0).map(|&b| b as u16);
        Ok(Self::with_text(WideString::from_units(latin1)))
    }

    /// Parse 'desc' type body (v2 profile description)
    ///
    /// Only the ASCII section is read; the Unicode and ScriptCode sections
    /// are unreliable in the wild.
    pub fn parse_desc(body: &[u8]) -> Result<Self, IccError> {
        let ascii_count = read_u32(body, 0).ok_or_else(|| {
            IccError::CorruptedData("Description tag too small".to_string())
        })? as usize;

        let ascii = body
            .get(4..4usize.saturating_add(ascii_count))
            .ok_or_else(|| IccError::CorruptedData("Description ASCII data truncated".to_string()))?;

        Self::parse_text(ascii)
    }

    /// Parse 'mluc' type
    ///
    /// `tag` must start at the type signature since string offsets are
    /// relative to the start of the tag.
    pub fn parse_mluc(tag: &[u8]) -> Result<Self, IccError> {
        let record_count = read_u32(tag, 8)
            .ok_or_else(|| IccError::CorruptedData("mluc tag too small".to_string()))?
            as usize;
        let record_size = read_u32(tag, 12)
            .ok_or_else(|| IccError::CorruptedData("mluc tag too small".to_string()))?
            as usize;

        if record_size < 12 {
            return Err(IccError::CorruptedData(
                "mluc record size too small".to_string(),
            ));
        }

        let mut mlu = Self::new();
        for i in 0..record_count {
            let Some(record) = i
                .checked_mul(record_size)
                .and_then(|o| o.checked_add(16))
                .and_then(|o| tag.get(o..o + 12))
            else {
                break;
            };

            let language = code_from_raw([record[0], record[1]]);
            let country = code_from_raw([record[2], record[3]]);
            let len = read_u32(record, 4).unwrap_or_default() as usize;
            let offset = read_u32(record, 8).unwrap_or_default() as usize;

            let Some(raw) = tag.get(offset..offset.saturating_add(len)) else {
                continue;
            };
            let text = WideString::from_units(
                (0..raw.len() / 2).filter_map(|j| read_u16(raw, j * 2)),
            );
            mlu.entries.push(LocalizedEntry {
                language,
                country: if language.is_some() { country } else { None },
                text,
            });
        }

        Ok(mlu)
    }

    /// Encode as 'text' type
    pub fn encode_text(&self) -> Vec<u8> {
        let ascii = self
            .get(None, None)
            .map(WideString::to_ascii_lossy)
            .unwrap_or_default();

        let mut out = Vec::with_capacity(8 + ascii.len() + 1);
        out.extend_from_slice(&TypeSignature::TEXT.0.to_be_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&ascii);
        out.push(0);
        out
    }

    /// Encode as 'desc' type
    pub fn encode_desc(&self) -> Vec<u8> {
        let empty = WideString::default();
        let text = self.get(None, None).unwrap_or(&empty);
        let ascii = text.to_ascii_lossy();

        let mut out = Vec::new();
        out.extend_from_slice(&TypeSignature::DESC.0.to_be_bytes());
        out.extend_from_slice(&[0; 4]);

        out.extend_from_slice(&(ascii.len() as u32 + 1).to_be_bytes());
        out.extend_from_slice(&ascii);
        out.push(0);

        // Unicode section: language code, count incl. terminator, UTF-16BE
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
        for unit in text.units() {
            out.extend_from_slice(&unit.to_be_bytes());
        }
        out.extend_from_slice(&[0, 0]);

        // Empty ScriptCode section: code, count, 67 bytes of filler
        out.extend_from_slice(&0u16.to_be_bytes());
        out.push(0);
        out.extend_from_slice(&[0; 67]);
        out
    }

    /// Encode as 'mluc' type
    pub fn encode_mluc(&self) -> Vec<u8> {
        let header_len = 16 + self.entries.len() * 12;
        let mut strings = Vec::new();
        let mut out = Vec::with_capacity(header_len);

        out.extend_from_slice(&TypeSignature::MLUC.0.to_be_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(self.entries.len() as u32).to_be_bytes());
        out.extend_from_slice(&12u32.to_be_bytes());

        for entry in &self.entries {
            let offset = header_len + strings.len();
            for unit in entry.text.units() {
                strings.extend_from_slice(&unit.to_be_bytes());
            }
            out.extend_from_slice(&entry.language.unwrap_or([0, 0]));
            out.extend_from_slice(&entry.country.unwrap_or([0, 0]));
            out.extend_from_slice(&(entry.text.len() as u32 * 2).to_be_bytes());
            out.extend_from_slice(&(offset as u32).to_be_bytes());
        }

        out.extend_from_slice(&strings);
        out
    }
}
