//! Metadata dictionary
//!
//! Free-form string pairs stored in the profile's `meta` tag.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::icc::{DictData, IccProfile, TagData, TagSignature, WideString};

/// String key/value store backed by the `meta` tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    /// Decode the `meta` tag, skipping entries that are not valid UTF-16
    pub fn from_profile(handle: &IccProfile) -> Self {
        let mut metadata = Self::default();
        let Some(tag) = handle.read_tag(TagSignature::META) else {
            return metadata;
        };
        let Some(dict) = tag.as_dict() else {
            warn!(tag = %TagSignature::META, "metadata tag is not a dictionary");
            return metadata;
        };

        for (i, entry) in dict.entries.iter().enumerate() {
            match (entry.name.to_string_checked(), entry.value.to_string_checked()) {
                (Some(name), Some(value)) => {
                    metadata.entries.insert(name, value);
                }
                _ => warn!(index = i, "skipping metadata entry with invalid text"),
            }
        }
        debug!(entries = metadata.entries.len(), "loaded metadata");
        metadata
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_all(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the `meta` tag, or delete it when there is nothing to store
    pub fn write_back(&self, handle: &mut IccProfile) -> Result<()> {
        if self.entries.is_empty() {
            handle.write_tag(TagSignature::META, None);
            return Ok(());
        }

        let mut dict = DictData::default();
        for (key, value) in &self.entries {
            let transcode = |s: &str| {
                WideString::new(s).map_err(|e| {
                    Error::FailedToSave(format!("metadata entry '{}': {}", key, e))
                })
            };
            dict.push(transcode(key)?, transcode(value)?);
        }
        handle.write_tag(TagSignature::META, Some(&TagData::Dict(dict)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::icc::{ColorSpace, ProfileClass, ProfileVersion};

    fn handle() -> IccProfile {
        IccProfile::new(
            ProfileClass::Display,
            ColorSpace::Rgb,
            ColorSpace::Xyz,
            ProfileVersion::V4_0,
        )
    }

    #[test]
    fn test_roundtrip_through_tag() {
        let mut md = Metadata::default();
        md.set("CMF_product", "oxicc");
        md.set("License", "CC0");
        md.set("License", "CC-BY-SA");

        let mut h = handle();
        md.write_back(&mut h).unwrap();

        let back = Metadata::from_profile(&h);
        assert_eq!(back, md);
        assert_eq!(back.get("License"), Some("CC-BY-SA"));
    }

    #[test]
    fn test_empty_deletes_tag() {
        let mut md = Metadata::default();
        md.set("a", "b");
        let mut h = handle();
        md.write_back(&mut h).unwrap();
        assert!(h.contains(TagSignature::META));

        md.remove("a");
        md.write_back(&mut h).unwrap();
        assert!(!h.contains(TagSignature::META));
    }

    #[test]
    fn test_transcoding_failure_fails_save() {
        let mut md = Metadata::default();
        md.set("key", "nul\0inside");
        let err = md.write_back(&mut handle()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedToSave);
    }

    #[test]
    fn test_invalid_entry_skipped() {
        let mut dict = DictData::default();
        dict.push(WideString::new("good").unwrap(), WideString::new("yes").unwrap());
        dict.push(
            WideString::from_units([0xD800]),
            WideString::new("lone surrogate").unwrap(),
        );
        let mut h = handle();
        h.write_tag(TagSignature::META, Some(&TagData::Dict(dict)));

        let md = Metadata::from_profile(&h);
        assert_eq!(md.len(), 1);
        assert_eq!(md.get("good"), Some("yes"));
    }
}
