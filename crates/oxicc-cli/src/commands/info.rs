use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use oxicc_core::{
    ColorProfile, Colorspace, ErrorKind, LoadFlags, LocalizedField, NamedColorSwatch, ProfileKind,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Info {
    filename: Option<String>,
    kind: ProfileKind,
    colorspace: Colorspace,
    version: f64,
    size: u32,
    checksum: Option<String>,
    /// Seconds since the Unix epoch
    created: Option<i64>,
    can_delete: bool,
    localized: BTreeMap<String, String>,
    metadata: BTreeMap<String, String>,
    named_colors: Vec<NamedColorSwatch>,
}

/// Missing text is skipped; any other failure is reported.
fn localized_fields(
    profile: &mut ColorProfile,
    locale: Option<&str>,
) -> Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for field in LocalizedField::ALL {
        match profile.localized(field, locale) {
            Ok(text) => {
                out.insert(field.to_string(), text.to_string());
            }
            Err(e) if e.kind() == ErrorKind::NoData => {}
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", field)),
        }
    }
    Ok(out)
}

fn collect(file: &Path, locale: Option<&str>) -> Result<Info> {
    let mut profile = ColorProfile::new();
    profile
        .load_file(file, LoadFlags::all(), None)
        .with_context(|| format!("failed to load {}", file.display()))?;

    let localized = localized_fields(&mut profile, locale)?;
    Ok(Info {
        filename: profile.filename().map(|p| p.display().to_string()),
        kind: profile.kind(),
        colorspace: profile.colorspace(),
        version: profile.version(),
        size: profile.size(),
        checksum: profile.checksum().map(str::to_string),
        created: profile.created().and_then(|d| d.to_unix_time()),
        can_delete: profile.can_delete(),
        localized,
        metadata: profile.metadata().clone(),
        named_colors: profile.named_colors().to_vec(),
    })
}

/// Print a summary of a profile, as text or JSON.
pub fn cmd_info(file: &Path, json: bool, locale: Option<&str>) -> Result<()> {
    let info = collect(file, locale)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    if let Some(filename) = &info.filename {
        println!("File:         {}", filename);
    }
    println!("Kind:         {}", info.kind);
    println!("Colorspace:   {}", info.colorspace);
    println!("Version:      {:.2}", info.version);
    println!("Size:         {} bytes", info.size);
    if let Some(checksum) = &info.checksum {
        println!("Checksum:     {}", checksum);
    }
    if let Some(created) = info.created {
        println!("Created:      {} (unix)", created);
    }
    for (field, text) in &info.localized {
        println!("{:<13} {}", format!("{}:", capitalize(field)), text);
    }
    if !info.metadata.is_empty() {
        println!("\nMetadata:");
        for (key, value) in &info.metadata {
            println!("  {} = {}", key, value);
        }
    }
    if !info.named_colors.is_empty() {
        println!("\nNamed colors ({}):", info.named_colors.len());
        for swatch in &info.named_colors {
            println!(
                "  {}\tL:{:.2} a:{:.3} b:{:.3}",
                swatch.name, swatch.value.l, swatch.value.a, swatch.value.b
            );
        }
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
