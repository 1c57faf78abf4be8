//! CIE XYZ Color Space

/// CIE 1931 XYZ color coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xyz {
    pub x: f64,
    /// Luminance
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// ICC Profile Connection Space illuminant (ICC.1:2022 Section 7.2.16)
pub const D50: Xyz = Xyz::new(0.9642, 1.0, 0.8249);
