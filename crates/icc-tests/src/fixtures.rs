//! Synthetic profile fixtures
//!
//! Profiles are built through the codec so tests do not depend on files
//! on disk. Tags are written after the version is settled because the
//! text encoding depends on it.

use anyhow::{Context, Result};
use oxicc_core::Xyz;
use oxicc_core::icc::{
    ColorSpace, CurveData, DictData, IccProfile, MultiLocalizedText, NamedColorList, ProfileClass,
    ProfileVersion, TagData, TagSignature, WideString, XyzTagData,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// sRGB colorants adapted to D50
pub const SRGB_RED: Xyz = Xyz::new(0.4361, 0.2225, 0.0139);
pub const SRGB_GREEN: Xyz = Xyz::new(0.3851, 0.7169, 0.0971);
pub const SRGB_BLUE: Xyz = Xyz::new(0.1431, 0.0606, 0.7141);

#[derive(Debug, Clone)]
enum PendingTag {
    Data(TagData),
    Raw(Vec<u8>),
    Link(TagSignature),
}

/// Builder for synthetic profiles
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    class: ProfileClass,
    color_space: ColorSpace,
    pcs: ColorSpace,
    version: f64,
    tags: Vec<(TagSignature, PendingTag)>,
    profile_id: bool,
}

impl ProfileBuilder {
    pub fn new(class: ProfileClass, color_space: ColorSpace, pcs: ColorSpace) -> Self {
        Self {
            class,
            color_space,
            pcs,
            version: 2.1,
            tags: Vec::new(),
            profile_id: false,
        }
    }

    /// v2.1 RGB display profile with no tags
    pub fn display_rgb() -> Self {
        Self::new(ProfileClass::Display, ColorSpace::Rgb, ColorSpace::Xyz)
    }

    /// v2.1 named color profile with a Lab connection space
    pub fn named() -> Self {
        Self::new(ProfileClass::NamedColor, ColorSpace::Rgb, ColorSpace::Lab)
    }

    pub fn version(mut self, version: f64) -> Self {
        self.version = version;
        self
    }

    pub fn pcs(mut self, pcs: ColorSpace) -> Self {
        self.pcs = pcs;
        self
    }

    /// Store an MD5 profile ID in the header
    pub fn with_profile_id(mut self) -> Self {
        self.profile_id = true;
        self
    }

    pub fn tag(mut self, sig: TagSignature, data: TagData) -> Self {
        self.tags.push((sig, PendingTag::Data(data)));
        self
    }

    /// Already-encoded tag bytes, starting at the type signature
    pub fn raw(mut self, sig: TagSignature, bytes: &[u8]) -> Self {
        self.tags.push((sig, PendingTag::Raw(bytes.to_vec())));
        self
    }

    pub fn link(mut self, sig: TagSignature, target: TagSignature) -> Self {
        self.tags.push((sig, PendingTag::Link(target)));
        self
    }

    /// Text with one entry per `(language, country, text)`
    pub fn text(self, sig: TagSignature, entries: &[(Option<&str>, Option<&str>, &str)]) -> Self {
        let mut mlu = MultiLocalizedText::new();
        for &(language, country, text) in entries {
            if let Ok(wide) = WideString::new(text) {
                mlu.set(language, country, wide);
            }
        }
        self.tag(sig, TagData::Text(mlu))
    }

    pub fn description(self, text: &str) -> Self {
        self.text(TagSignature::DESCRIPTION, &[(None, None, text)])
    }

    pub fn copyright(self, text: &str) -> Self {
        self.text(TagSignature::COPYRIGHT, &[(None, None, text)])
    }

    pub fn metadata(self, entries: &[(&str, &str)]) -> Self {
        let mut dict = DictData::default();
        for &(key, value) in entries {
            if let (Ok(k), Ok(v)) = (WideString::new(key), WideString::new(value)) {
                dict.push(k, v);
            }
        }
        self.tag(TagSignature::META, TagData::Dict(dict))
    }

    pub fn named_colors(self, list: NamedColorList) -> Self {
        self.tag(TagSignature::NAMED_COLOR2, TagData::NamedColors(list))
    }

    /// White point, sRGB colorants and a shared gamma 2.2 curve
    pub fn matrix_trc(self) -> Self {
        self.tag(
            TagSignature::MEDIA_WHITE,
            TagData::Xyz(XyzTagData::new(oxicc_core::color::D50)),
        )
        .tag(TagSignature::RED_COLORANT, TagData::Xyz(XyzTagData::new(SRGB_RED)))
        .tag(TagSignature::GREEN_COLORANT, TagData::Xyz(XyzTagData::new(SRGB_GREEN)))
        .tag(TagSignature::BLUE_COLORANT, TagData::Xyz(XyzTagData::new(SRGB_BLUE)))
        .tag(TagSignature::RED_TRC, TagData::Curve(CurveData::Gamma(2.2)))
        .link(TagSignature::GREEN_TRC, TagSignature::RED_TRC)
        .link(TagSignature::BLUE_TRC, TagSignature::RED_TRC)
    }

    pub fn build(self) -> Result<IccProfile> {
        let mut handle = IccProfile::new(
            self.class,
            self.color_space,
            self.pcs,
            ProfileVersion::from_f64(self.version),
        );
        for (sig, pending) in self.tags {
            match pending {
                PendingTag::Data(data) => handle.write_tag(sig, Some(&data)),
                PendingTag::Raw(bytes) => handle.write_raw_tag(sig, bytes),
                PendingTag::Link(target) => handle
                    .link_tag(sig, target)
                    .with_context(|| format!("failed to link {} to {}", sig, target))?,
            }
        }
        if self.profile_id {
            handle.compute_profile_id()?;
        }
        Ok(handle)
    }

    pub fn bytes(self) -> Result<Vec<u8>> {
        Ok(self.build()?.to_bytes()?)
    }
}

/// Random bytes, reproducible from `seed`
pub fn garbage(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

/// Overwrite `count` random bytes of `data` past the header magic
///
/// Keeps the `acsp` signature intact so the corruption reaches the tag
/// table and tag bodies instead of failing the magic check.
pub fn corrupt(data: &[u8], seed: u64, count: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = data.to_vec();
    if out.len() <= 40 {
        return out;
    }
    for _ in 0..count {
        let pos = rng.gen_range(40..out.len());
        out[pos] = rng.r#gen();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_deterministic() {
        assert_eq!(garbage(7, 64), garbage(7, 64));
        assert_ne!(garbage(7, 64), garbage(8, 64));
    }

    #[test]
    fn test_corrupt_keeps_magic() {
        let data = ProfileBuilder::display_rgb()
            .description("Fixture")
            .bytes()
            .unwrap();
        let damaged = corrupt(&data, 3, 32);
        assert_eq!(damaged.len(), data.len());
        assert_eq!(&damaged[36..40], b"acsp");
    }

    #[test]
    fn test_builder_links() {
        let handle = ProfileBuilder::display_rgb().matrix_trc().build().unwrap();
        assert_eq!(handle.linked_to(TagSignature::GREEN_TRC), Some(TagSignature::RED_TRC));
        assert_eq!(handle.tag_count(), 7);
    }
}
