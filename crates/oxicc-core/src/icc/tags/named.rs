//! Named Color Tag Type (ncl2)
//!
//! Names are stored as 32-byte NUL-terminated fields in whatever 7-bit
//! or vendor encoding the writer used; they are kept as raw bytes here
//! and only interpreted by callers.
//!
//! See ICC.1:2022 Section 10.17

use crate::icc::error::IccError;
use crate::icc::types::{TypeSignature, read_u16, read_u32};

/// Width of prefix, suffix and root name fields
pub const NAME_FIELD_LEN: usize = 32;

/// One named color
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamedColorEntry {
    pub name: Vec<u8>,
    /// PCS value in the profile's connection space encoding
    pub pcs: [u16; 3],
    pub device: Vec<u16>,
}

/// Named color list tag data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamedColorList {
    pub vendor_flags: u32,
    pub prefix: Vec<u8>,
    pub suffix: Vec<u8>,
    pub device_channels: u32,
    pub colors: Vec<NamedColorEntry>,
}

fn name_field(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().take_while(|&&b| b != 0).copied().collect()
}

fn put_name_field(out: &mut Vec<u8>, name: &[u8]) {
    let mut field = [0u8; NAME_FIELD_LEN];
    let len = name.len().min(NAME_FIELD_LEN - 1);
    field[..len].copy_from_slice(&name[..len]);
    out.extend_from_slice(&field);
}

impl NamedColorList {
    /// Parse from bytes after the type signature and reserved bytes
    pub fn parse(body: &[u8]) -> Result<Self, IccError> {
        let too_small = || IccError::CorruptedData("ncl2 tag too small".to_string());

        let vendor_flags = read_u32(body, 0).ok_or_else(too_small)?;
        let count = read_u32(body, 4).ok_or_else(too_small)? as usize;
        let device_channels = read_u32(body, 8).ok_or_else(too_small)?;
        if device_channels > 15 {
            return Err(IccError::CorruptedData(format!(
                "ncl2 declares {} device channels",
                device_channels
            )));
        }

        let prefix = body.get(12..44).map(name_field).ok_or_else(too_small)?;
        let suffix = body.get(44..76).map(name_field).ok_or_else(too_small)?;

        let record_len = NAME_FIELD_LEN + 6 + 2 * device_channels as usize;
        let available = (body.len() - 76) / record_len;
        if count > available {
            return Err(IccError::CorruptedData(format!(
                "ncl2 declares {} colors but only {} fit",
                count, available
            )));
        }

        let colors = (0..count)
            .map(|i| {
                let record = &body[76 + i * record_len..76 + (i + 1) * record_len];
                let word = |j: usize| read_u16(record, NAME_FIELD_LEN + j * 2).unwrap_or_default();
                NamedColorEntry {
                    name: name_field(&record[..NAME_FIELD_LEN]),
                    pcs: [word(0), word(1), word(2)],
                    device: (0..device_channels as usize).map(|j| word(3 + j)).collect(),
                }
            })
            .collect();

        Ok(Self {
            vendor_flags,
            prefix,
            suffix,
            device_channels,
            colors,
        })
    }

    /// Encode; names longer than 31 bytes are truncated
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&TypeSignature::NAMED_COLOR2.0.to_be_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&self.vendor_flags.to_be_bytes());
        out.extend_from_slice(&(self.colors.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.device_channels.to_be_bytes());
        put_name_field(&mut out, &self.prefix);
        put_name_field(&mut out, &self.suffix);

        for color in &self.colors {
            put_name_field(&mut out, &color.name);
            for v in color.pcs {
                out.extend_from_slice(&v.to_be_bytes());
            }
            for j in 0..self.device_channels as usize {
                let v = color.device.get(j).copied().unwrap_or_default();
                out.extend_from_slice(&v.to_be_bytes());
            }
        }
        out
    }
}
