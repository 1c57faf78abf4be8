//! CIELAB (L*a*b*) Color Space
//!
//! - L*: Lightness (0 = black, 100 = white)
//! - a*: Green-red axis
//! - b*: Blue-yellow axis

use crate::color::{D50, Xyz};

/// CIELAB color coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lab {
    /// Lightness (0 to 100)
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert from XYZ relative to the D50 PCS white
    pub fn from_xyz(xyz: Xyz) -> Self {
        Self::from_xyz_with_white(xyz, D50)
    }

    pub fn from_xyz_with_white(xyz: Xyz, white: Xyz) -> Self {
        let fx = lab_f(xyz.x / white.x);
        let fy = lab_f(xyz.y / white.y);
        let fz = lab_f(xyz.z / white.z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Convert back to XYZ relative to D50
    pub fn to_xyz(&self) -> Xyz {
        let fy = (self.l + 16.0) / 116.0;
        let fx = self.a / 500.0 + fy;
        let fz = fy - self.b / 200.0;

        Xyz::new(
            lab_f_inv(fx) * D50.x,
            lab_f_inv(fy) * D50.y,
            lab_f_inv(fz) * D50.z,
        )
    }
}

const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    let t3 = t * t * t;
    if t3 > EPSILON {
        t3
    } else {
        (116.0 * t - 16.0) / KAPPA
    }
}
