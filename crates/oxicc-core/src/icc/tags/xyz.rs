//! XYZ Tag Type
//!
//! The XYZType contains an array of XYZ values. Used for colorant tags,
//! white point, black point, etc.
//!
//! See ICC.1:2022 Section 10.31

use crate::color::Xyz;
use crate::icc::error::IccError;
use crate::icc::types::{TypeSignature, XyzNumber};

/// XYZ tag data - contains one or more XYZ values
#[derive(Debug, Clone, PartialEq)]
pub struct XyzTagData {
    pub values: Vec<XyzNumber>,
}

impl XyzTagData {
    pub fn new(xyz: Xyz) -> Self {
        Self {
            values: vec![XyzNumber::from_xyz(xyz)],
        }
    }

    /// Parse XYZ data from bytes (after type signature and reserved bytes)
    pub fn parse(body: &[u8]) -> Result<Self, IccError> {
        let values: Vec<XyzNumber> = body
            .chunks_exact(12)
            .filter_map(XyzNumber::from_bytes)
            .collect();

        if values.is_empty() {
            return Err(IccError::CorruptedData("XYZ tag too small".to_string()));
        }

        Ok(Self { values })
    }

    /// Get the first XYZ value as Xyz color type
    pub fn to_xyz(&self) -> Option<Xyz> {
        self.values.first().map(|v| v.to_xyz())
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.values.len() * 12);
        out.extend_from_slice(&TypeSignature::XYZ.0.to_be_bytes());
        out.extend_from_slice(&[0; 4]);
        for value in &self.values {
            out.extend_from_slice(&value.to_bytes());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::D50;

    #[test]
    fn test_parse_xyz_tag() {
        // D50 white point
        let data: [u8; 12] = [
            0x00, 0x00, 0xF6, 0xD6, // X = 0.9642 (approximately)
            0x00, 0x01, 0x00, 0x00, // Y = 1.0
            0x00, 0x00, 0xD3, 0x2D, // Z = 0.8249 (approximately)
        ];

        let tag = XyzTagData::parse(&data).unwrap();
        assert_eq!(tag.values.len(), 1);

        let xyz = tag.to_xyz().unwrap();
        assert!((xyz.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_too_small() {
        assert!(XyzTagData::parse(&[0u8; 11]).is_err());
    }

    #[test]
    fn test_encode() {
        let bytes = XyzTagData::new(D50).encode();
        assert_eq!(&bytes[0..4], b"XYZ ");
        assert_eq!(bytes.len(), 20);
        let back = XyzTagData::parse(&bytes[8..]).unwrap().to_xyz().unwrap();
        assert!((back.x - D50.x).abs() < 1e-4);
    }
}
