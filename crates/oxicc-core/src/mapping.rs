//! Kind and colorspace mapping tables
//!
//! Fixed tables between the model enums and the codec's header
//! signatures. Load maps codec to model and falls back to `Unknown`;
//! save maps model to codec and reports `None` for `Unknown`, in which
//! case the header keeps whatever it already holds.

use crate::enums::{Colorspace, ProfileKind};
use crate::icc::{ColorSpace, ProfileClass};

const KIND_TABLE: &[(ProfileKind, ProfileClass)] = &[
    (ProfileKind::InputDevice, ProfileClass::Input),
    (ProfileKind::DisplayDevice, ProfileClass::Display),
    (ProfileKind::OutputDevice, ProfileClass::Output),
    (ProfileKind::Devicelink, ProfileClass::DeviceLink),
    (ProfileKind::ColorspaceConversion, ProfileClass::ColorSpace),
    (ProfileKind::Abstract, ProfileClass::Abstract),
    (ProfileKind::NamedColor, ProfileClass::NamedColor),
];

const COLORSPACE_TABLE: &[(Colorspace, ColorSpace)] = &[
    (Colorspace::Xyz, ColorSpace::Xyz),
    (Colorspace::Lab, ColorSpace::Lab),
    (Colorspace::Luv, ColorSpace::Luv),
    (Colorspace::Ycbcr, ColorSpace::YCbCr),
    (Colorspace::Yxy, ColorSpace::Yxy),
    (Colorspace::Rgb, ColorSpace::Rgb),
    (Colorspace::Gray, ColorSpace::Gray),
    (Colorspace::Hsv, ColorSpace::Hsv),
    (Colorspace::Cmyk, ColorSpace::Cmyk),
    (Colorspace::Cmy, ColorSpace::Cmy),
];

/// Header class signature to model kind
pub fn kind_from_signature(signature: u32) -> ProfileKind {
    KIND_TABLE
        .iter()
        .find(|(_, class)| class.to_u32() == signature)
        .map_or(ProfileKind::Unknown, |(kind, _)| *kind)
}

/// Model kind to header class signature
pub fn kind_to_signature(kind: ProfileKind) -> Option<u32> {
    KIND_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, class)| class.to_u32())
}

pub fn colorspace_from_signature(signature: u32) -> Colorspace {
    COLORSPACE_TABLE
        .iter()
        .find(|(_, cs)| cs.to_u32() == signature)
        .map_or(Colorspace::Unknown, |(colorspace, _)| *colorspace)
}

pub fn colorspace_to_signature(colorspace: Colorspace) -> Option<u32> {
    COLORSPACE_TABLE
        .iter()
        .find(|(c, _)| *c == colorspace)
        .map(|(_, cs)| cs.to_u32())
}
