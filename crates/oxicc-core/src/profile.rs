//! ICC Color Profile model
//!
//! [`ColorProfile`] owns a parsed [`IccProfile`] plus the fields callers
//! actually edit: kind, colorspace, version, localized text and metadata.
//! Loading lives in [`crate::load`], saving in [`crate::save`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::enums::{Colorspace, ProfileKind};
use crate::error::{Error, Result};
use crate::icc::{DateTimeNumber, IccProfile};
use crate::localized::{LocalizedField, LocalizedStore};
use crate::locale::LocaleKey;
use crate::metadata::Metadata;
use crate::named_color::NamedColorSwatch;

/// ICC Color Profile
///
/// Created empty, then loaded exactly once from bytes, a reader, a file
/// descriptor or a file, or handed an existing [`IccProfile`] through
/// [`adopt`](Self::adopt). Edits are buffered in the model and written
/// into the codec when saving; the same model may be saved repeatedly.
#[derive(Debug, Clone, Default)]
pub struct ColorProfile {
    pub(crate) size: u32,
    pub(crate) version: f64,
    pub(crate) kind: ProfileKind,
    pub(crate) colorspace: Colorspace,
    pub(crate) checksum: Option<String>,
    pub(crate) filename: Option<PathBuf>,
    pub(crate) can_delete: bool,
    pub(crate) metadata: Metadata,
    pub(crate) localized: LocalizedStore,
    pub(crate) named_colors: Vec<NamedColorSwatch>,
    pub(crate) handle: Option<IccProfile>,
}

impl ColorProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying codec, once loaded
    pub fn handle(&self) -> Option<&IccProfile> {
        self.handle.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Length of the loaded input in bytes
    pub fn size(&self) -> u32 {
        self.size
    }

    /// ICC version, `0.0` when unset
    pub fn version(&self) -> f64 {
        self.version
    }

    pub fn set_version(&mut self, version: f64) {
        self.version = version;
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: ProfileKind) {
        self.kind = kind;
    }

    pub fn colorspace(&self) -> Colorspace {
        self.colorspace
    }

    pub fn set_colorspace(&mut self, colorspace: Colorspace) {
        self.colorspace = colorspace;
    }

    /// 32 lowercase hex digits: the embedded profile ID or a content hash
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Path the profile was loaded from
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Whether the current user can write the directory holding the file
    pub fn can_delete(&self) -> bool {
        self.can_delete
    }

    /// Creation time from the header, if recorded
    pub fn created(&self) -> Option<DateTimeNumber> {
        let date = self.handle.as_ref()?.header.creation_date;
        (date.is_set() && date.to_unix_time().is_some()).then_some(date)
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        self.metadata.get_all()
    }

    pub fn metadata_item(&self, key: &str) -> Option<&str> {
        self.metadata.get(key)
    }

    pub fn set_metadata_item(&mut self, key: &str, value: &str) {
        self.metadata.set(key, value);
    }

    pub fn remove_metadata_item(&mut self, key: &str) -> Option<String> {
        self.metadata.remove(key)
    }

    pub fn clear_metadata(&mut self) {
        self.metadata.clear();
    }

    /// Swatches read at load time with `LoadFlags::NAMED_COLORS`
    pub fn named_colors(&self) -> &[NamedColorSwatch] {
        &self.named_colors
    }

    /// Localized text for `locale`, `None` meaning the default entry
    pub fn localized(&mut self, field: LocalizedField, locale: Option<&str>) -> Result<&str> {
        self.localized.resolve(self.handle.as_ref(), field, locale)
    }

    pub fn set_localized(&mut self, field: LocalizedField, locale: Option<&str>, value: &str) {
        self.localized.set(field, locale, value);
    }

    pub fn set_localized_items<'a, I>(&mut self, field: LocalizedField, items: I)
    where
        I: IntoIterator<Item = (Option<&'a str>, &'a str)>,
    {
        self.localized.set_items(field, items);
    }

    /// Every translation resolved or set so far
    pub fn localized_items(&self, field: LocalizedField) -> &BTreeMap<LocaleKey, String> {
        self.localized.items(field)
    }

    pub fn description(&mut self, locale: Option<&str>) -> Result<&str> {
        self.localized(LocalizedField::Description, locale)
    }

    pub fn copyright(&mut self, locale: Option<&str>) -> Result<&str> {
        self.localized(LocalizedField::Copyright, locale)
    }

    pub fn manufacturer(&mut self, locale: Option<&str>) -> Result<&str> {
        self.localized(LocalizedField::Manufacturer, locale)
    }

    pub fn model(&mut self, locale: Option<&str>) -> Result<&str> {
        self.localized(LocalizedField::Model, locale)
    }

    pub fn set_description(&mut self, locale: Option<&str>, value: &str) {
        self.set_localized(LocalizedField::Description, locale, value);
    }

    pub fn set_copyright(&mut self, locale: Option<&str>, value: &str) {
        self.set_localized(LocalizedField::Copyright, locale, value);
    }

    pub fn set_manufacturer(&mut self, locale: Option<&str>, value: &str) {
        self.set_localized(LocalizedField::Manufacturer, locale, value);
    }

    pub fn set_model(&mut self, locale: Option<&str>, value: &str) {
        self.set_localized(LocalizedField::Model, locale, value);
    }

    /// Human-readable rendering of the codec's header and tags
    pub fn dump(&self) -> Result<String> {
        self.handle
            .as_ref()
            .map(crate::dump::dump)
            .ok_or_else(|| Error::NoData("no profile loaded".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_model() {
        let mut profile = ColorProfile::new();
        assert!(!profile.is_loaded());
        assert_eq!(profile.size(), 0);
        assert_eq!(profile.version(), 0.0);
        assert_eq!(profile.kind(), ProfileKind::Unknown);
        assert_eq!(profile.checksum(), None);
        assert_eq!(profile.created(), None);
        assert_eq!(profile.description(None).unwrap_err().kind(), ErrorKind::NoData);
        assert_eq!(profile.dump().unwrap_err().kind(), ErrorKind::NoData);
    }

    #[test]
    fn test_set_before_load() {
        let mut profile = ColorProfile::new();
        profile.set_description(Some("en_GB.UTF-8"), "Colour");
        profile.set_metadata_item("Quality", "high");
        assert_eq!(profile.description(Some("en_GB")).unwrap(), "Colour");
        assert_eq!(profile.metadata_item("Quality"), Some("high"));
        assert_eq!(profile.remove_metadata_item("Quality").as_deref(), Some("high"));
        assert!(profile.metadata().is_empty());
    }
}
