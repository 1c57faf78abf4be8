//! ICC Profile Tag Types
//!
//! Tags contain the actual profile data. Each tag has:
//! - A 4-byte type signature identifying the data format
//! - Reserved bytes
//! - Type-specific data
//!
//! See ICC.1:2022 Section 10.

mod curves;
mod dict;
mod named;
mod text;
mod xyz;

pub use curves::CurveData;
pub use dict::{DictData, DictEntry};
pub use named::{NAME_FIELD_LEN, NamedColorEntry, NamedColorList};
pub use text::{LocalizedEntry, MultiLocalizedText, WideString};
pub use xyz::XyzTagData;

use super::error::IccError;
use super::types::{ProfileVersion, TagSignature, TypeSignature, read_u32};

/// Decoded tag data
#[derive(Debug, Clone, PartialEq)]
pub enum TagData {
    /// text, desc or mluc
    Text(MultiLocalizedText),
    Xyz(XyzTagData),
    Curve(CurveData),
    Dict(DictData),
    NamedColors(NamedColorList),
    /// Any other type, kept verbatim including the type signature
    Unknown { type_sig: u32, data: Vec<u8> },
}

impl TagData {
    /// Parse tag data from bytes
    ///
    /// `data` starts at the type signature.
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let type_sig = read_u32(data, 0).ok_or_else(|| {
            IccError::CorruptedData("Tag data too small for header".to_string())
        })?;
        let body = data.get(8..).ok_or_else(|| {
            IccError::CorruptedData("Tag data too small for header".to_string())
        })?;

        match TypeSignature(type_sig) {
            TypeSignature::TEXT => MultiLocalizedText::parse_text(body).map(TagData::Text),
            TypeSignature::DESC => MultiLocalizedText::parse_desc(body).map(TagData::Text),
            TypeSignature::MLUC => MultiLocalizedText::parse_mluc(data).map(TagData::Text),
            TypeSignature::XYZ => XyzTagData::parse(body).map(TagData::Xyz),
            TypeSignature::CURVE => CurveData::parse(body).map(TagData::Curve),
            TypeSignature::DICT => DictData::parse(data).map(TagData::Dict),
            TypeSignature::NAMED_COLOR2 => NamedColorList::parse(body).map(TagData::NamedColors),
            _ => Ok(TagData::Unknown {
                type_sig,
                data: data.to_vec(),
            }),
        }
    }

    /// Encode for storage under `tag` in a profile of `version`
    ///
    /// Multilingual text picks its wire type from the version and tag:
    /// `mluc` from v4 on (and always for `dscm`), else `desc` for
    /// description-like tags and `text` for the rest.
    pub fn encode(&self, tag: TagSignature, version: ProfileVersion) -> Vec<u8> {
        match self {
            TagData::Text(mlu) => {
                if version.at_least(4, 0) || tag == TagSignature::DESCRIPTION_ML {
                    mlu.encode_mluc()
                } else if tag.is_description_like() {
                    mlu.encode_desc()
                } else {
                    mlu.encode_text()
                }
            }
            TagData::Xyz(xyz) => xyz.encode(),
            TagData::Curve(curve) => curve.encode(),
            TagData::Dict(dict) => dict.encode(),
            TagData::NamedColors(list) => list.encode(),
            TagData::Unknown { data, .. } => data.clone(),
        }
    }

    pub fn as_text(&self) -> Option<&MultiLocalizedText> {
        match self {
            TagData::Text(mlu) => Some(mlu),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&DictData> {
        match self {
            TagData::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_named_colors(&self) -> Option<&NamedColorList> {
        match self {
            TagData::NamedColors(list) => Some(list),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> TagData {
        TagData::Text(MultiLocalizedText::with_text(WideString::new(s).unwrap()))
    }

    #[test]
    fn test_text_type_selection() {
        let v2 = ProfileVersion::from_f64(2.1);
        let v4 = ProfileVersion::from_f64(4.3);
        let data = text("sRGB");

        assert_eq!(&data.encode(TagSignature::DESCRIPTION, v2)[0..4], b"desc");
        assert_eq!(&data.encode(TagSignature::DEVICE_MFG_DESC, v2)[0..4], b"desc");
        assert_eq!(&data.encode(TagSignature::COPYRIGHT, v2)[0..4], b"text");
        assert_eq!(&data.encode(TagSignature::DESCRIPTION_ML, v2)[0..4], b"mluc");
        assert_eq!(&data.encode(TagSignature::DESCRIPTION, v4)[0..4], b"mluc");
        assert_eq!(&data.encode(TagSignature::COPYRIGHT, v4)[0..4], b"mluc");
    }

    #[test]
    fn test_parse_dispatch() {
        let v2 = ProfileVersion::from_f64(2.1);
        for tag in [TagSignature::DESCRIPTION, TagSignature::COPYRIGHT] {
            let bytes = text("Hello").encode(tag, v2);
            assert_eq!(TagData::parse(&bytes).unwrap(), text("Hello"));
        }
    }

    #[test]
    fn test_unknown_type_kept_verbatim() {
        let bytes = b"sf32\0\0\0\0\x00\x01\x00\x00".to_vec();
        let parsed = TagData::parse(&bytes).unwrap();
        assert_eq!(
            parsed.encode(TagSignature::from_bytes(*b"chad"), ProfileVersion::V4_0),
            bytes
        );
    }

    #[test]
    fn test_too_small() {
        assert!(TagData::parse(b"text").is_err());
    }
}
