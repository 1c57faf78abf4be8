//! Diagnostic dump
//!
//! Renders the codec's header and tag table for humans. Reads only the
//! [`IccProfile`], never the model caches. The format is for inspection
//! and is not meant to be parsed.

use std::fmt::Write;

use crate::icc::{ColorSpace, IccProfile, RenderingIntent, TagData, TagSignature};
use crate::load::hex;
use crate::mapping::{colorspace_from_signature, kind_from_signature};
use crate::named_color::swatches;

/// Maximum spread tolerated when reporting a curve as a gamma
const GAMMA_PRECISION: f64 = 0.01;

pub fn dump(handle: &IccProfile) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_dump(handle, &mut out);
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_dump(handle: &IccProfile, out: &mut String) -> std::fmt::Result {
    let header = &handle.header;

    writeln!(out, "icc:")?;
    writeln!(out, "Header:")?;
    if header.size > 0 {
        writeln!(out, "  Size\t\t= {} bytes", header.size)?;
    }
    writeln!(out, "  Version\t= {:.1}", handle.version())?;
    writeln!(
        out,
        "  Profile Kind\t= {}",
        kind_from_signature(header.device_class)
    )?;
    writeln!(
        out,
        "  Colorspace\t= {}",
        colorspace_from_signature(header.color_space)
    )?;
    writeln!(
        out,
        "  Conn. Space\t= {}",
        match header.connection_space() {
            Some(ColorSpace::Xyz) => "xyz",
            Some(ColorSpace::Lab) => "lab",
            _ => "unknown",
        }
    )?;
    if header.creation_date.is_set() {
        writeln!(out, "  Date, Time\t= {}", header.creation_date)?;
    }
    writeln!(
        out,
        "  Flags\t\t= {}, {}",
        if header.is_embedded() {
            "Embedded profile"
        } else {
            "Not embedded profile"
        },
        if header.is_embedded_only() {
            "Use with embedded data only"
        } else {
            "Use anywhere"
        }
    )?;
    writeln!(
        out,
        "  Rndrng Intnt\t= {}",
        match header.intent() {
            Some(RenderingIntent::Perceptual) => "perceptual",
            Some(RenderingIntent::RelativeColorimetric) => "relative-colorimetric",
            Some(RenderingIntent::Saturation) => "saturation",
            Some(RenderingIntent::AbsoluteColorimetric) => "absolute-colorimetric",
            None => "unknown",
        }
    )?;
    writeln!(out, "  Profile ID\t= 0x{}", hex(&header.profile_id))?;
    writeln!(out)?;

    for (i, entry) in handle.entries().iter().enumerate() {
        let sig = entry.signature;
        writeln!(out, "tag {:02}:", i)?;
        writeln!(out, "  sig\t'{}' [0x{:x}]", sig, sig.0)?;

        if let Some(target) = handle.linked_to(sig) {
            writeln!(out, "  link\t'{}' [0x{:x}]", target, target.0)?;
        } else {
            let raw = handle.raw_tag(sig).unwrap_or_default();
            if let Some(type_sig) = handle.tag_type(sig) {
                writeln!(out, "  type\t'{}' [0x{:x}]", type_sig, type_sig.0)?;
            }
            writeln!(out, "  size\t{}", raw.len())?;
            write_body(handle, sig, out)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_body(handle: &IccProfile, sig: TagSignature, out: &mut String) -> std::fmt::Result {
    let data = handle.read_tag(sig);
    match data {
        Some(TagData::Text(mlu)) => {
            writeln!(out, "Text:")?;
            if let Some(text) = mlu.get(None, None).filter(|t| !t.is_empty()) {
                let ascii = String::from_utf8_lossy(&text.to_ascii_lossy()).into_owned();
                writeln!(out, "  en_US:\t{} [{} bytes]", ascii, ascii.len() + 1)?;
            }
        }
        Some(TagData::Xyz(xyz)) => {
            writeln!(out, "XYZ:")?;
            if let Some(v) = xyz.to_xyz() {
                writeln!(out, "  X:{:.6} Y:{:.6} Z:{:.6}", v.x, v.y, v.z)?;
            }
        }
        Some(TagData::Curve(curve)) => {
            writeln!(out, "Curve:")?;
            if let Some(gamma) = curve.estimate_gamma(GAMMA_PRECISION) {
                writeln!(out, "  Curve is gamma of {:.6}", gamma)?;
            }
        }
        Some(TagData::Dict(dict)) => {
            writeln!(out, "Dictionary:")?;
            for entry in &dict.entries {
                writeln!(
                    out,
                    "  {}\t->\t{}",
                    String::from_utf16_lossy(entry.name.units()),
                    String::from_utf16_lossy(entry.value.units())
                )?;
            }
        }
        Some(TagData::NamedColors(list)) => {
            writeln!(out, "Named colors:")?;
            if list.colors.is_empty() {
                writeln!(out, "  Info:\t\tNo NC's!")?;
            }
            for (i, swatch) in swatches(&list, handle.header.connection_space()) {
                writeln!(
                    out,
                    "  {:03}:\t {}\tL:{:.2} a:{:.3} b:{:.3}",
                    i, swatch.name, swatch.value.l, swatch.value.a, swatch.value.b
                )?;
            }
        }
        Some(TagData::Unknown { .. }) => {}
        None => {
            if handle.contains(sig) {
                writeln!(out, "  Info:\t\tfailed to decode tag")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::{
        CurveData, DictData, MultiLocalizedText, NamedColorEntry, NamedColorList, ProfileClass,
        ProfileVersion, WideString, XyzTagData,
    };
    use crate::color::D50;

    fn sample() -> IccProfile {
        let mut handle = IccProfile::new(
            ProfileClass::Display,
            ColorSpace::Rgb,
            ColorSpace::Xyz,
            ProfileVersion::from_f64(2.1),
        );
        handle.write_tag(
            TagSignature::DESCRIPTION,
            Some(&TagData::Text(MultiLocalizedText::with_text(
                WideString::new("Test Display").unwrap(),
            ))),
        );
        handle.write_tag(TagSignature::MEDIA_WHITE, Some(&TagData::Xyz(XyzTagData::new(D50))));
        handle.write_tag(TagSignature::RED_TRC, Some(&TagData::Curve(CurveData::Gamma(2.2))));
        handle
            .link_tag(TagSignature::GREEN_TRC, TagSignature::RED_TRC)
            .unwrap();

        let mut dict = DictData::default();
        dict.push(WideString::new("Vendor").unwrap(), WideString::new("Acme").unwrap());
        handle.write_tag(TagSignature::META, Some(&TagData::Dict(dict)));
        handle.write_raw_tag(TagSignature::from_bytes(*b"chad"), b"sf32\0\0\0\0".to_vec());
        handle
    }

    #[test]
    fn test_header_lines() {
        let text = dump(&sample());
        assert!(text.starts_with("icc:\nHeader:\n"));
        assert!(text.contains("  Version\t= 2.1\n"));
        assert!(text.contains("  Profile Kind\t= display-device\n"));
        assert!(text.contains("  Colorspace\t= rgb\n"));
        assert!(text.contains("  Conn. Space\t= xyz\n"));
        assert!(text.contains("  Flags\t\t= Not embedded profile, Use anywhere\n"));
        assert!(text.contains("  Rndrng Intnt\t= perceptual\n"));
        assert!(text.contains("  Profile ID\t= 0x00000000000000000000000000000000\n"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_tag_bodies() {
        let text = dump(&sample());
        assert!(text.contains("tag 00:\n  sig\t'desc' [0x64657363]\n  type\t'desc' [0x64657363]\n"));
        assert!(text.contains("Text:\n  en_US:\tTest Display [13 bytes]\n"));
        assert!(text.contains("XYZ:\n  X:0.964203 Y:1.000000 Z:0.824905\n"));
        assert!(text.contains("Curve:\n  Curve is gamma of 2.199219\n"));
        assert!(text.contains("  sig\t'gTRC' [0x67545243]\n  link\t'rTRC' [0x72545243]\n"));
        assert!(text.contains("Dictionary:\n  Vendor\t->\tAcme"));
        // Blank line between tag blocks
        assert!(text.contains("Test Display [13 bytes]\n\ntag 01:\n"));
        assert!(text.contains("  link\t'rTRC' [0x72545243]\n\ntag "));
        // Unknown types get a header only
        assert!(text.ends_with("  type\t'sf32' [0x73663332]\n  size\t8"));
    }

    #[test]
    fn test_named_colors() {
        let mut handle = IccProfile::new(
            ProfileClass::NamedColor,
            ColorSpace::Rgb,
            ColorSpace::Lab,
            ProfileVersion::from_f64(2.1),
        );
        let list = NamedColorList {
            prefix: b"PANTONE".to_vec(),
            suffix: b"C".to_vec(),
            colors: vec![
                NamedColorEntry {
                    name: b"185".to_vec(),
                    pcs: [0xFFFF, 0x8080, 0x8080],
                    device: Vec::new(),
                },
                NamedColorEntry {
                    name: b"Caf\xE9".to_vec(),
                    pcs: [0, 0, 0],
                    device: Vec::new(),
                },
            ],
            ..Default::default()
        };
        handle.write_tag(TagSignature::NAMED_COLOR2, Some(&TagData::NamedColors(list)));

        let text = dump(&handle);
        assert!(text.contains("Named colors:\n  000:\t PANTONE 185 C\tL:100.00 a:0.000 b:0.000"));
        assert!(!text.contains("001:"));
    }
}
