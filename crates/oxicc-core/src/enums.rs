//! Profile kind and colorspace
//!
//! Both render and parse lowercase hyphenated names such as
//! `display-device` and `rgb`.

use std::fmt;
use std::str::FromStr;

/// What a profile is for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ProfileKind {
    #[default]
    Unknown,
    InputDevice,
    DisplayDevice,
    OutputDevice,
    Devicelink,
    ColorspaceConversion,
    Abstract,
    NamedColor,
}

/// Data colorspace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Colorspace {
    #[default]
    Unknown,
    Xyz,
    Lab,
    Luv,
    Ycbcr,
    Yxy,
    Rgb,
    Gray,
    Hsv,
    Cmyk,
    Cmy,
}

/// Returned when a name matches no variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown name '{}'", self.0)
    }
}

impl std::error::Error for UnknownName {}

impl ProfileKind {
    pub const ALL: [Self; 8] = [
        Self::Unknown,
        Self::InputDevice,
        Self::DisplayDevice,
        Self::OutputDevice,
        Self::Devicelink,
        Self::ColorspaceConversion,
        Self::Abstract,
        Self::NamedColor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::InputDevice => "input-device",
            Self::DisplayDevice => "display-device",
            Self::OutputDevice => "output-device",
            Self::Devicelink => "devicelink",
            Self::ColorspaceConversion => "colorspace-conversion",
            Self::Abstract => "abstract",
            Self::NamedColor => "named-color",
        }
    }
}

impl Colorspace {
    pub const ALL: [Self; 11] = [
        Self::Unknown,
        Self::Xyz,
        Self::Lab,
        Self::Luv,
        Self::Ycbcr,
        Self::Yxy,
        Self::Rgb,
        Self::Gray,
        Self::Hsv,
        Self::Cmyk,
        Self::Cmy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Xyz => "xyz",
            Self::Lab => "lab",
            Self::Luv => "luv",
            Self::Ycbcr => "ycbcr",
            Self::Yxy => "yxy",
            Self::Rgb => "rgb",
            Self::Gray => "gray",
            Self::Hsv => "hsv",
            Self::Cmyk => "cmyk",
            Self::Cmy => "cmy",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Colorspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

impl FromStr for Colorspace {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}
