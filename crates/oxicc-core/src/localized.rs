//! Localized text fields
//!
//! Four human-readable fields (description, copyright, manufacturer,
//! model) are stored per [`LocaleKey`]. Reads resolve against the codec's
//! multilingual text and cache only successful lookups; writes go to the
//! cache and are pushed to the codec at save time.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::icc::{IccProfile, MultiLocalizedText, TagData, TagSignature, WideString};
use crate::locale::LocaleKey;

/// One of the localized text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalizedField {
    Description,
    Copyright,
    Manufacturer,
    Model,
}

impl LocalizedField {
    /// Save order
    pub const ALL: [Self; 4] = [
        Self::Description,
        Self::Copyright,
        Self::Manufacturer,
        Self::Model,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Tags tried in order when reading
    pub fn read_tags(self) -> &'static [TagSignature] {
        match self {
            Self::Description => &[TagSignature::DESCRIPTION_ML, TagSignature::DESCRIPTION],
            Self::Copyright => &[TagSignature::COPYRIGHT],
            Self::Manufacturer => &[TagSignature::DEVICE_MFG_DESC],
            Self::Model => &[TagSignature::DEVICE_MODEL_DESC],
        }
    }

    /// Tag written at save time
    pub fn write_tag(self) -> TagSignature {
        match self {
            Self::Description => TagSignature::DESCRIPTION,
            Self::Copyright => TagSignature::COPYRIGHT,
            Self::Manufacturer => TagSignature::DEVICE_MFG_DESC,
            Self::Model => TagSignature::DEVICE_MODEL_DESC,
        }
    }
}

impl fmt::Display for LocalizedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Description => "description",
            Self::Copyright => "copyright",
            Self::Manufacturer => "manufacturer",
            Self::Model => "model",
        })
    }
}

/// Per-field translation maps
#[derive(Debug, Clone, Default)]
pub struct LocalizedStore {
    fields: [BTreeMap<LocaleKey, String>; 4],
}

impl LocalizedStore {
    /// Return the text for `field` in `locale`, consulting the codec on a miss
    ///
    /// No fallback happens here: asking for `fr` when only the default
    /// entry exists is `NoData`. Only successful lookups are cached.
    pub fn resolve(
        &mut self,
        handle: Option<&IccProfile>,
        field: LocalizedField,
        locale: Option<&str>,
    ) -> Result<&str> {
        let key = LocaleKey::new(locale);
        match self.fields[field.index()].entry(key) {
            Entry::Occupied(cached) => Ok(cached.into_mut().as_str()),
            Entry::Vacant(slot) => {
                let codes = slot.key().decompose()?;
                let handle = handle
                    .ok_or_else(|| Error::NoData(format!("no profile loaded for {}", field)))?;

                let mlu = Self::find_text(handle, field)?;
                let wide = mlu
                    .get(codes.language(), codes.country())
                    .ok_or_else(|| {
                        Error::NoData(format!("no {} for locale '{}'", field, slot.key()))
                    })?;
                let text = wide.to_string_checked().ok_or_else(|| {
                    Error::NoData(format!("{} for '{}' is not valid UTF-16", field, slot.key()))
                })?;

                trace!(%field, locale = %slot.key(), "cached translation");
                Ok(slot.insert(text).as_str())
            }
        }
    }

    fn find_text(handle: &IccProfile, field: LocalizedField) -> Result<MultiLocalizedText> {
        field
            .read_tags()
            .iter()
            .find_map(|&sig| match handle.read_tag(sig) {
                Some(TagData::Text(mlu)) => Some(mlu),
                _ => None,
            })
            .ok_or_else(|| Error::NoData(format!("{} tag missing", field)))
    }

    /// Insert or overwrite a translation; validated only at save time
    pub fn set(&mut self, field: LocalizedField, locale: Option<&str>, value: &str) {
        self.fields[field.index()].insert(LocaleKey::new(locale), value.to_string());
    }

    pub fn set_items<'a, I>(&mut self, field: LocalizedField, items: I)
    where
        I: IntoIterator<Item = (Option<&'a str>, &'a str)>,
    {
        for (locale, value) in items {
            self.set(field, locale, value);
        }
    }

    /// Cached translations for a field
    pub fn items(&self, field: LocalizedField) -> &BTreeMap<LocaleKey, String> {
        &self.fields[field.index()]
    }

    /// Write all four fields to the codec in save order
    ///
    /// The target version is settled before any tag is encoded, so every
    /// field uses the same text type.
    pub fn write_back(&self, handle: &mut IccProfile) -> Result<()> {
        let mut pending = Vec::with_capacity(LocalizedField::ALL.len());
        for field in LocalizedField::ALL {
            pending.push((field, self.collect(field)?));
        }

        // Several translations need mluc, which only exists from v4
        if let Some((field, _)) = pending.iter().find(|(_, mlu)| mlu.len() > 1) {
            if handle.version() < 4.0 {
                debug!(%field, from = handle.version(), "raising profile version to 4.0");
                handle.set_version(4.0);
            }
        }

        for (field, mlu) in pending {
            Self::write_field(handle, field, mlu);
        }
        Ok(())
    }

    fn collect(&self, field: LocalizedField) -> Result<MultiLocalizedText> {
        let mut mlu = MultiLocalizedText::new();
        for (key, value) in self.items(field) {
            let Some(codes) = key.decompose_for_write() else {
                debug!(%field, locale = %key, "locale cannot be stored, skipping");
                continue;
            };
            let text = WideString::new(value)
                .map_err(|e| Error::FailedToSave(format!("{} for '{}': {}", field, key, e)))?;
            mlu.set(codes.language(), codes.country(), text);
        }
        Ok(mlu)
    }

    fn write_field(handle: &mut IccProfile, field: LocalizedField, mlu: MultiLocalizedText) {
        let tag = field.write_tag();
        if mlu.is_empty() {
            handle.write_tag(tag, None);
            return;
        }

        handle.write_tag(tag, Some(&TagData::Text(mlu)));

        if field == LocalizedField::Description {
            handle.write_tag(TagSignature::DESCRIPTION_ML, None);
        }
    }
}
