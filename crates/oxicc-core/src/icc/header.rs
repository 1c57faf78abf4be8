//! ICC Profile Header
//!
//! The ICC profile header is exactly 128 bytes and contains basic profile information.
//! See ICC.1:2022 Section 7.2.
//!
//! Class, colour space and intent fields are kept as raw signatures so that
//! a profile carrying values we do not recognise survives a load/save cycle
//! untouched. The typed enums below are views over those raw values.

use super::error::IccError;
use super::types::{DateTimeNumber, ProfileVersion, XyzNumber, read_u32};
use crate::color::D50;

/// Profile file signature - must be 'acsp' (0x61637370)
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Header size in bytes
pub const HEADER_SIZE: usize = 128;

/// Header plus the tag count field
pub const MIN_PROFILE_SIZE: usize = HEADER_SIZE + 4;

/// Flag bit 0: profile is embedded in a file
pub const FLAG_EMBEDDED: u32 = 0x1;
/// Flag bit 1: profile cannot be used independently of the embedded data
pub const FLAG_EMBEDDED_ONLY: u32 = 0x2;

/// ICC Profile Header (128 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct IccHeader {
    /// Profile size in bytes
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    pub version: ProfileVersion,
    /// Raw device class signature
    pub device_class: u32,
    /// Raw data colour space signature
    pub color_space: u32,
    /// Raw profile connection space signature
    pub pcs: u32,
    pub creation_date: DateTimeNumber,
    pub platform: u32,
    pub flags: u32,
    pub manufacturer: u32,
    pub model: u32,
    pub attributes: u64,
    /// Raw rendering intent value
    pub rendering_intent: u32,
    /// PCS illuminant (should be D50)
    pub illuminant: XyzNumber,
    pub creator: u32,
    /// Profile ID (MD5 hash, or zero)
    pub profile_id: [u8; 16],
}

impl IccHeader {
    /// Blank header for a freshly created profile
    pub fn new(
        class: ProfileClass,
        color_space: ColorSpace,
        pcs: ColorSpace,
        version: ProfileVersion,
    ) -> Self {
        Self {
            size: 0,
            cmm_type: 0,
            version,
            device_class: class.to_u32(),
            color_space: color_space.to_u32(),
            pcs: pcs.to_u32(),
            creation_date: DateTimeNumber::now(),
            platform: 0,
            flags: 0,
            manufacturer: 0,
            model: 0,
            attributes: 0,
            rendering_intent: RenderingIntent::Perceptual.to_u32(),
            illuminant: XyzNumber::from_xyz(D50),
            creator: 0,
            profile_id: [0; 16],
        }
    }

    /// Parse header from bytes
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < HEADER_SIZE {
            return Err(IccError::TooSmall {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let word = |offset: usize| read_u32(data, offset).unwrap_or_default();

        let signature = word(36);
        if signature != PROFILE_SIGNATURE {
            return Err(IccError::InvalidSignature(signature));
        }

        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(&data[84..100]);

        Ok(Self {
            size: word(0),
            cmm_type: word(4),
            version: ProfileVersion::from_bytes(data[8], data[9]),
            device_class: word(12),
            color_space: word(16),
            pcs: word(20),
            creation_date: DateTimeNumber::from_bytes(&data[24..36]).unwrap_or_default(),
            platform: word(40),
            flags: word(44),
            manufacturer: word(48),
            model: word(52),
            attributes: (word(56) as u64) << 32 | word(60) as u64,
            rendering_intent: word(64),
            illuminant: XyzNumber::from_bytes(&data[68..80]).unwrap_or_default(),
            creator: word(80),
            profile_id,
        })
    }

    /// Serialize to the 128-byte on-disk layout
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut put = |offset: usize, value: u32| {
            out[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
        };
        put(0, self.size);
        put(4, self.cmm_type);
        put(12, self.device_class);
        put(16, self.color_space);
        put(20, self.pcs);
        put(36, PROFILE_SIGNATURE);
        put(40, self.platform);
        put(44, self.flags);
        put(48, self.manufacturer);
        put(52, self.model);
        put(56, (self.attributes >> 32) as u32);
        put(60, self.attributes as u32);
        put(64, self.rendering_intent);
        put(80, self.creator);
        out[8..12].copy_from_slice(&self.version.to_bytes());
        out[24..36].copy_from_slice(&self.creation_date.to_bytes());
        out[68..80].copy_from_slice(&self.illuminant.to_bytes());
        out[84..100].copy_from_slice(&self.profile_id);
        out
    }

    pub fn profile_class(&self) -> Option<ProfileClass> {
        ProfileClass::from_u32(self.device_class)
    }

    pub fn data_color_space(&self) -> Option<ColorSpace> {
        ColorSpace::from_u32(self.color_space)
    }

    pub fn connection_space(&self) -> Option<ColorSpace> {
        ColorSpace::from_u32(self.pcs)
    }

    pub fn intent(&self) -> Option<RenderingIntent> {
        RenderingIntent::from_u32(self.rendering_intent)
    }

    pub fn is_embedded(&self) -> bool {
        self.flags & FLAG_EMBEDDED != 0
    }

    pub fn is_embedded_only(&self) -> bool {
        self.flags & FLAG_EMBEDDED_ONLY != 0
    }
}

/// ICC Profile Class (Device Class)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    DeviceLink,
    /// Color space conversion
    ColorSpace,
    Abstract,
    NamedColor,
}

impl ProfileClass {
    pub fn from_u32(val: u32) -> Option<Self> {
        match &val.to_be_bytes() {
            b"scnr" => Some(Self::Input),
            b"mntr" => Some(Self::Display),
            b"prtr" => Some(Self::Output),
            b"link" => Some(Self::DeviceLink),
            b"spac" => Some(Self::ColorSpace),
            b"abst" => Some(Self::Abstract),
            b"nmcl" => Some(Self::NamedColor),
            _ => None,
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Input => u32::from_be_bytes(*b"scnr"),
            Self::Display => u32::from_be_bytes(*b"mntr"),
            Self::Output => u32::from_be_bytes(*b"prtr"),
            Self::DeviceLink => u32::from_be_bytes(*b"link"),
            Self::ColorSpace => u32::from_be_bytes(*b"spac"),
            Self::Abstract => u32::from_be_bytes(*b"abst"),
            Self::NamedColor => u32::from_be_bytes(*b"nmcl"),
        }
    }
}

/// ICC Color Space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Xyz,
    Lab,
    Luv,
    YCbCr,
    Yxy,
    Rgb,
    Gray,
    Hsv,
    Hls,
    Cmyk,
    Cmy,
    /// Generic n-colour space, 2 to 15 channels (`2CLR`..`FCLR`)
    Color(u8),
}

impl ColorSpace {
    pub fn from_u32(val: u32) -> Option<Self> {
        match &val.to_be_bytes() {
            b"XYZ " => Some(Self::Xyz),
            b"Lab " => Some(Self::Lab),
            b"Luv " => Some(Self::Luv),
            b"YCbr" => Some(Self::YCbCr),
            b"Yxy " => Some(Self::Yxy),
            b"RGB " => Some(Self::Rgb),
            b"GRAY" => Some(Self::Gray),
            b"HSV " => Some(Self::Hsv),
            b"HLS " => Some(Self::Hls),
            b"CMYK" => Some(Self::Cmyk),
            b"CMY " => Some(Self::Cmy),
            [n, b'C', b'L', b'R'] => match *n {
                b'2'..=b'9' => Some(Self::Color(n - b'0')),
                b'A'..=b'F' => Some(Self::Color(n - b'A' + 10)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Xyz => u32::from_be_bytes(*b"XYZ "),
            Self::Lab => u32::from_be_bytes(*b"Lab "),
            Self::Luv => u32::from_be_bytes(*b"Luv "),
            Self::YCbCr => u32::from_be_bytes(*b"YCbr"),
            Self::Yxy => u32::from_be_bytes(*b"Yxy "),
            Self::Rgb => u32::from_be_bytes(*b"RGB "),
            Self::Gray => u32::from_be_bytes(*b"GRAY"),
            Self::Hsv => u32::from_be_bytes(*b"HSV "),
            Self::Hls => u32::from_be_bytes(*b"HLS "),
            Self::Cmyk => u32::from_be_bytes(*b"CMYK"),
            Self::Cmy => u32::from_be_bytes(*b"CMY "),
            Self::Color(n) => {
                let digit = match n {
                    2..=9 => b'0' + n,
                    _ => b'A' + (*n).clamp(10, 15) - 10,
                };
                u32::from_be_bytes([digit, b'C', b'L', b'R'])
            }
        }
    }
}

/// ICC Rendering Intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    #[default]
    Perceptual,
    RelativeColorimetric,
    Saturation,
    AbsoluteColorimetric,
}

impl RenderingIntent {
    pub fn from_u32(val: u32) -> Option<Self> {
        match val {
            0 => Some(Self::Perceptual),
            1 => Some(Self::RelativeColorimetric),
            2 => Some(Self::Saturation),
            3 => Some(Self::AbsoluteColorimetric),
            _ => None,
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::RelativeColorimetric => 1,
            Self::Saturation => 2,
            Self::AbsoluteColorimetric => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_class_roundtrip() {
        for class in [
            ProfileClass::Input,
            ProfileClass::Display,
            ProfileClass::Output,
            ProfileClass::DeviceLink,
            ProfileClass::NamedColor,
        ] {
            let val = class.to_u32();
            assert_eq!(ProfileClass::from_u32(val), Some(class));
        }
        assert_eq!(ProfileClass::from_u32(0x1234_5678), None);
    }

    #[test]
    fn test_n_colour_spaces() {
        for n in 2..=15u8 {
            let cs = ColorSpace::Color(n);
            assert_eq!(ColorSpace::from_u32(cs.to_u32()), Some(cs));
        }
        assert_eq!(&ColorSpace::Color(12).to_u32().to_be_bytes(), b"CCLR");
    }

    #[test]
    fn test_rendering_intent() {
        for i in 0..4 {
            let intent = RenderingIntent::from_u32(i).unwrap();
            assert_eq!(intent.to_u32(), i);
        }
        assert!(RenderingIntent::from_u32(4).is_none());
    }

    #[test]
    fn test_header_bytes_roundtrip() {
        let mut header = IccHeader::new(
            ProfileClass::Display,
            ColorSpace::Rgb,
            ColorSpace::Xyz,
            ProfileVersion::from_f64(2.1),
        );
        header.size = 132;
        header.flags = FLAG_EMBEDDED;
        header.attributes = 0x0102_0304_0506_0708;
        header.profile_id[0] = 0xAB;

        let bytes = header.to_bytes();
        assert_eq!(&bytes[36..40], b"acsp");
        assert_eq!(&bytes[12..16], b"mntr");

        let parsed = IccHeader::parse(&bytes).unwrap();
        assert_eq!(parsed, header);
        assert!(parsed.is_embedded());
        assert!(!parsed.is_embedded_only());
    }

    #[test]
    fn test_unknown_signatures_preserved() {
        let mut header = IccHeader::new(
            ProfileClass::Display,
            ColorSpace::Rgb,
            ColorSpace::Xyz,
            ProfileVersion::V4_0,
        );
        header.color_space = u32::from_be_bytes(*b"6CLR");
        let parsed = IccHeader::parse(&header.to_bytes()).unwrap();
        assert_eq!(parsed.data_color_space(), Some(ColorSpace::Color(6)));
        assert_eq!(&parsed.color_space.to_be_bytes(), b"6CLR");

        header.color_space = u32::from_be_bytes(*b"wxyz");
        let parsed = IccHeader::parse(&header.to_bytes()).unwrap();
        assert_eq!(parsed.data_color_space(), None);
        assert_eq!(&parsed.color_space.to_be_bytes(), b"wxyz");
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[36..40].copy_from_slice(b"xxxx");
        assert!(matches!(
            IccHeader::parse(&bytes),
            Err(IccError::InvalidSignature(_))
        ));
    }
}
