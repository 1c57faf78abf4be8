//! Locale keys
//!
//! Human locale tags such as `en_GB.UTF-8` are reduced to a canonical
//! [`LocaleKey`] used to index translations. The empty key stands for the
//! default, untranslated text; `en_US` maps onto it.

use std::fmt;

use crate::error::{Error, Result};

/// Canonical locale string, `""` for the default entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocaleKey(String);

/// Language and country codes split out of a key
///
/// A `None` language is the wildcard that selects the default entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCodes {
    pub language: Option<String>,
    pub country: Option<String>,
}

impl LocaleCodes {
    pub const DEFAULT: Self = Self {
        language: None,
        country: None,
    };

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl LocaleKey {
    /// Canonicalize a locale
    ///
    /// `None` and anything starting with `en_US` give the default key;
    /// otherwise the locale is cut at the first `.` or `(`.
    pub fn new(locale: Option<&str>) -> Self {
        match locale {
            None => Self::default(),
            Some(l) if l.starts_with("en_US") => Self::default(),
            Some(l) => {
                let end = l.find(|c| c == '.' || c == '(').unwrap_or(l.len());
                Self(l[..end].to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Split for a lookup
    ///
    /// The language must be two characters, optionally followed by `_`
    /// and a two character country. Anything else is an error.
    pub fn decompose(&self) -> Result<LocaleCodes> {
        if self.is_default() {
            return Ok(LocaleCodes::DEFAULT);
        }

        let (language, country) = match self.0.split_once('_') {
            Some((l, c)) => (l, Some(c)),
            None => (&self.0[..], None),
        };

        if language.len() != 2 {
            return Err(Error::InvalidLocale(format!(
                "invalid language code in '{}'",
                self.0
            )));
        }
        if let Some(country) = country {
            if country.len() != 2 {
                return Err(Error::InvalidLocale(format!(
                    "invalid country code in '{}'",
                    self.0
                )));
            }
        }

        Ok(LocaleCodes {
            language: Some(language.to_string()),
            country: country.map(str::to_string),
        })
    }

    /// Split for writing a translation back
    ///
    /// Keys this cannot express (variants such as `sr@latin`, extra `_`
    /// segments, codes that are not two characters) yield `None` and the
    /// translation is left out of the tag.
    pub fn decompose_for_write(&self) -> Option<LocaleCodes> {
        if self.is_default() {
            return Some(LocaleCodes::DEFAULT);
        }
        if self.0.contains('@') {
            return None;
        }

        let parts: Vec<&str> = self.0.split('_').collect();
        let (language, country) = match parts.as_slice() {
            [l] => (*l, None),
            [l, c] => (*l, Some(*c)),
            _ => return None,
        };

        if language.len() != 2 || country.is_some_and(|c| c.len() != 2) {
            return None;
        }

        Some(LocaleCodes {
            language: Some(language.to_string()),
            country: country.map(str::to_string),
        })
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
