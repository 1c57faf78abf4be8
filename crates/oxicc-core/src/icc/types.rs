//! ICC Profile Basic Types
//!
//! Fixed-point numbers, signatures and date/time values as laid out in
//! ICC.1:2022 Section 4.

use std::fmt;

use crate::color::Xyz;

/// Read a big-endian `u32` at `offset`, if the slice is long enough
#[inline]
pub(crate) fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a big-endian `u16` at `offset`, if the slice is long enough
#[inline]
pub(crate) fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// Render four signature bytes, replacing anything unprintable with '?'
fn fourcc(value: u32) -> String {
    value
        .to_be_bytes()
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
        .collect()
}

/// ICC Tag Signature (4-byte ASCII code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagSignature(pub u32);

impl TagSignature {
    /// Create from 4 ASCII characters
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const BLUE_COLORANT: Self = Self::from_bytes(*b"bXYZ");
    pub const BLUE_TRC: Self = Self::from_bytes(*b"bTRC");
    pub const COPYRIGHT: Self = Self::from_bytes(*b"cprt");
    pub const DESCRIPTION: Self = Self::from_bytes(*b"desc");
    /// Apple's multilingual duplicate of `desc`
    pub const DESCRIPTION_ML: Self = Self::from_bytes(*b"dscm");
    pub const DEVICE_MFG_DESC: Self = Self::from_bytes(*b"dmnd");
    pub const DEVICE_MODEL_DESC: Self = Self::from_bytes(*b"dmdd");
    pub const GRAY_TRC: Self = Self::from_bytes(*b"kTRC");
    pub const GREEN_COLORANT: Self = Self::from_bytes(*b"gXYZ");
    pub const GREEN_TRC: Self = Self::from_bytes(*b"gTRC");
    pub const MEDIA_BLACK: Self = Self::from_bytes(*b"bkpt");
    pub const MEDIA_WHITE: Self = Self::from_bytes(*b"wtpt");
    pub const META: Self = Self::from_bytes(*b"meta");
    pub const NAMED_COLOR2: Self = Self::from_bytes(*b"ncl2");
    pub const RED_COLORANT: Self = Self::from_bytes(*b"rXYZ");
    pub const RED_TRC: Self = Self::from_bytes(*b"rTRC");
    pub const VIEW_COND_DESC: Self = Self::from_bytes(*b"vued");

    /// Tags whose v2 encoding is `textDescriptionType`
    pub fn is_description_like(&self) -> bool {
        matches!(
            *self,
            Self::DESCRIPTION | Self::DEVICE_MFG_DESC | Self::DEVICE_MODEL_DESC | Self::VIEW_COND_DESC
        )
    }
}

impl fmt::Display for TagSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fourcc(self.0))
    }
}

/// Type signatures for ICC tag data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSignature(pub u32);

impl TypeSignature {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const XYZ: Self = Self::from_bytes(*b"XYZ ");
    pub const CURVE: Self = Self::from_bytes(*b"curv");
    pub const TEXT: Self = Self::from_bytes(*b"text");
    pub const DESC: Self = Self::from_bytes(*b"desc");
    pub const MLUC: Self = Self::from_bytes(*b"mluc");
    pub const DICT: Self = Self::from_bytes(*b"dict");
    pub const NAMED_COLOR2: Self = Self::from_bytes(*b"ncl2");
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fourcc(self.0))
    }
}

/// s15Fixed16Number - 16.16 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S15Fixed16(pub i32);

impl S15Fixed16 {
    pub fn from_f64(val: f64) -> Self {
        Self((val * 65536.0).round() as i32)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }

    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(i32::from_be_bytes(bytes))
    }

    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

/// u8Fixed8Number - unsigned 8.8 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U8Fixed8(pub u16);

impl U8Fixed8 {
    pub fn from_f64(val: f64) -> Self {
        Self((val * 256.0).round().clamp(0.0, u16::MAX as f64) as u16)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 256.0
    }
}

/// XYZNumber - ICC XYZ value (3 × s15Fixed16)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XyzNumber {
    pub x: S15Fixed16,
    pub y: S15Fixed16,
    pub z: S15Fixed16,
}

impl XyzNumber {
    /// Parse from 12 bytes (big-endian)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 12 {
            return None;
        }
        Some(Self {
            x: S15Fixed16::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            y: S15Fixed16::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            z: S15Fixed16::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }

    pub fn from_xyz(xyz: Xyz) -> Self {
        Self {
            x: S15Fixed16::from_f64(xyz.x),
            y: S15Fixed16::from_f64(xyz.y),
            z: S15Fixed16::from_f64(xyz.z),
        }
    }

    pub fn to_xyz(&self) -> Xyz {
        Xyz::new(self.x.to_f64(), self.y.to_f64(), self.z.to_f64())
    }

    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out[0..4].copy_from_slice(&self.x.to_be_bytes());
        out[4..8].copy_from_slice(&self.y.to_be_bytes());
        out[8..12].copy_from_slice(&self.z.to_be_bytes());
        out
    }
}

/// dateTimeNumber - ICC date/time, always UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTimeNumber {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl DateTimeNumber {
    /// Parse from 12 bytes (big-endian)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 12 {
            return None;
        }
        Some(Self {
            year: u16::from_be_bytes([bytes[0], bytes[1]]),
            month: u16::from_be_bytes([bytes[2], bytes[3]]),
            day: u16::from_be_bytes([bytes[4], bytes[5]]),
            hour: u16::from_be_bytes([bytes[6], bytes[7]]),
            minute: u16::from_be_bytes([bytes[8], bytes[9]]),
            second: u16::from_be_bytes([bytes[10], bytes[11]]),
        })
    }

    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        for (i, v) in [self.year, self.month, self.day, self.hour, self.minute, self.second]
            .into_iter()
            .enumerate()
        {
            out[i * 2..i * 2 + 2].copy_from_slice(&v.to_be_bytes());
        }
        out
    }

    /// Build from seconds since the Unix epoch
    pub fn from_unix_time(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self {
            year: year as u16,
            month: month as u16,
            day: day as u16,
            hour: (rem / 3600) as u16,
            minute: (rem % 3600 / 60) as u16,
            second: (rem % 60) as u16,
        }
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Self::from_unix_time(secs)
    }

    /// All-zero dates mean "not recorded"
    pub fn is_set(&self) -> bool {
        *self != Self::default()
    }

    /// Seconds since the Unix epoch, or `None` if any field is out of range
    pub fn to_unix_time(&self) -> Option<i64> {
        if !(1..=12).contains(&self.month)
            || !(1..=31).contains(&self.day)
            || self.hour > 23
            || self.minute > 59
            || self.second > 60
        {
            return None;
        }
        let days = days_from_civil(self.year as i64, self.month as i64, self.day as i64);
        Some(
            days * 86_400 + self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64,
        )
    }
}

impl fmt::Display for DateTimeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}, {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

// Howard Hinnant's civil calendar algorithms
fn days_from_civil(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(z: i64) -> (i64, i64, i64) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    (if m <= 2 { yoe + era * 400 + 1 } else { yoe + era * 400 }, m, d)
}

/// ICC Profile Version, stored as BCD in header bytes 8..10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ProfileVersion {
    pub const V4_0: Self = Self {
        major: 4,
        minor: 0,
        patch: 0,
    };

    pub fn from_bytes(b0: u8, b1: u8) -> Self {
        Self {
            major: b0,
            minor: b1 >> 4,
            patch: b1 & 0x0F,
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.major, (self.minor << 4) | (self.patch & 0x0F), 0, 0]
    }

    /// Round to two decimal places, e.g. `4.2` → 4.2.0 and `2.14` → 2.1.4
    pub fn from_f64(version: f64) -> Self {
        let n = (version * 100.0 + 0.5).floor().clamp(0.0, 25_599.0) as u32;
        Self {
            major: (n / 100).min(255) as u8,
            minor: ((n / 10) % 10) as u8,
            patch: (n % 10) as u8,
        }
    }

    pub fn to_f64(self) -> f64 {
        (self.major as u32 * 100 + self.minor as u32 * 10 + self.patch as u32) as f64 / 100.0
    }

    /// Check if version is at least the specified version
    pub fn at_least(&self, major: u8, minor: u8) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}
