//! Named color swatches
//!
//! Named color profiles list colors such as "PANTONE 185 C" with their
//! connection space value. Names are raw bytes in the file; anything that
//! is not UTF-8 after repair is dropped.

use tracing::{debug, warn};

use crate::color::{Lab, Xyz};
use crate::icc::{ColorSpace, IccProfile, NamedColorList, TagData, TagSignature};
use crate::text_repair::to_utf8_or_repair;

/// A named color
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedColorSwatch {
    pub name: String,
    pub value: Lab,
}

/// Join prefix, root name and suffix with single spaces, skipping empty parts
pub fn compose_name(prefix: &[u8], name: &[u8], suffix: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(prefix.len() + name.len() + suffix.len() + 2);
    if !prefix.is_empty() {
        out.extend_from_slice(prefix);
        out.push(b' ');
    }
    out.extend_from_slice(name);
    if !suffix.is_empty() {
        out.push(b' ');
        out.extend_from_slice(suffix);
    }
    out
}

/// Decode a 16-bit PCS triple
///
/// Lab uses the v4 encoding (L 0..100 over 0..0xFFFF, a/b offset by 128);
/// XYZ uses u1Fixed15 and is converted relative to D50.
pub fn decode_pcs(pcs: [u16; 3], connection: Option<ColorSpace>) -> Lab {
    match connection {
        Some(ColorSpace::Xyz) => {
            let xyz = Xyz::new(
                pcs[0] as f64 / 32768.0,
                pcs[1] as f64 / 32768.0,
                pcs[2] as f64 / 32768.0,
            );
            Lab::from_xyz(xyz)
        }
        _ => Lab::new(
            pcs[0] as f64 / 655.35,
            pcs[1] as f64 / 257.0 - 128.0,
            pcs[2] as f64 / 257.0 - 128.0,
        ),
    }
}

/// Iterate the list as composed UTF-8 names and decoded values
///
/// Entries whose name cannot be made valid are skipped with a warning.
pub fn swatches(
    list: &NamedColorList,
    connection: Option<ColorSpace>,
) -> impl Iterator<Item = (usize, NamedColorSwatch)> + '_ {
    list.colors.iter().enumerate().filter_map(move |(i, color)| {
        let raw = compose_name(&list.prefix, &color.name, &list.suffix);
        match to_utf8_or_repair(raw) {
            Some(name) => Some((
                i,
                NamedColorSwatch {
                    name,
                    value: decode_pcs(color.pcs, connection),
                },
            )),
            None => {
                warn!(index = i, "named color is not UTF-8 after repair, dropping");
                None
            }
        }
    })
}

/// Read every swatch from the `ncl2` tag, in file order
pub fn extract(handle: &IccProfile) -> Vec<NamedColorSwatch> {
    let Some(TagData::NamedColors(list)) = handle.read_tag(TagSignature::NAMED_COLOR2) else {
        return Vec::new();
    };
    let colors: Vec<NamedColorSwatch> = swatches(&list, handle.header.connection_space())
        .map(|(_, swatch)| swatch)
        .collect();
    debug!(count = colors.len(), of = list.colors.len(), "extracted named colors");
    colors
}
