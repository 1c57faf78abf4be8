use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use oxicc_core::{ColorProfile, Colorspace, LoadFlags, LocalizedField, ProfileKind};
use tracing::info;

/// Changes requested on the command line
#[derive(Debug, Default)]
pub struct EditArgs {
    pub output: Option<PathBuf>,
    pub description: Option<String>,
    pub copyright: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub locale: Option<String>,
    pub set_metadata: Vec<(String, String)>,
    pub remove_metadata: Vec<String>,
    pub clear_metadata: bool,
    pub version: Option<f64>,
    pub kind: Option<ProfileKind>,
    pub colorspace: Option<Colorspace>,
}

/// Parse a `KEY=VALUE` argument.
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", arg)),
    }
}

fn apply(profile: &mut ColorProfile, args: &EditArgs) -> Result<()> {
    let locale = args.locale.as_deref();
    let texts = [
        (LocalizedField::Description, &args.description),
        (LocalizedField::Copyright, &args.copyright),
        (LocalizedField::Manufacturer, &args.manufacturer),
        (LocalizedField::Model, &args.model),
    ];
    for (field, text) in texts {
        if let Some(text) = text {
            profile.set_localized(field, locale, text);
        }
    }

    if args.clear_metadata {
        profile.clear_metadata();
    }
    for key in &args.remove_metadata {
        if profile.remove_metadata_item(key).is_none() {
            info!(key = %key, "no such metadata entry");
        }
    }
    for (key, value) in &args.set_metadata {
        profile.set_metadata_item(key, value);
    }

    if let Some(version) = args.version {
        if !(0.0..100.0).contains(&version) {
            bail!("version {} is out of range", version);
        }
        profile.set_version(version);
    }
    if let Some(kind) = args.kind {
        profile.set_kind(kind);
    }
    if let Some(colorspace) = args.colorspace {
        profile.set_colorspace(colorspace);
    }
    Ok(())
}

/// Apply edits to a profile and save it atomically.
pub fn cmd_edit(file: &Path, args: EditArgs) -> Result<()> {
    let mut profile = ColorProfile::new();
    profile
        .load_file(file, LoadFlags::METADATA, None)
        .with_context(|| format!("failed to load {}", file.display()))?;

    apply(&mut profile, &args)?;

    let target = args.output.as_deref().unwrap_or(file);
    profile
        .save_file(target, None)
        .with_context(|| format!("failed to save {}", target.display()))?;
    info!(path = %target.display(), "saved profile");
    Ok(())
}
