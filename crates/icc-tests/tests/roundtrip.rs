//! Load, edit, save and reload
//!
//! Every test builds its input through the fixtures, so the only state
//! on disk is in temporary directories.

use icc_tests::ProfileBuilder;
use oxicc_core::icc::{IccProfile, TagSignature, TypeSignature};
use oxicc_core::{ColorProfile, Colorspace, ErrorKind, LoadFlags, ProfileKind};

fn load(data: &[u8], flags: LoadFlags) -> ColorProfile {
    let mut profile = ColorProfile::new();
    profile.load_data(data, flags).expect("load failed");
    profile
}

#[test]
fn test_unchanged_profile_survives_save() {
    let data = ProfileBuilder::display_rgb()
        .description("Test Display")
        .copyright("Public domain")
        .matrix_trc()
        .bytes()
        .unwrap();

    let mut profile = load(&data, LoadFlags::METADATA);
    let saved = profile.save_data().unwrap();
    let reloaded = IccProfile::parse(&saved).unwrap();

    let original = IccProfile::parse(&data).unwrap();
    assert_eq!(reloaded.tag_count(), original.tag_count());
    for entry in original.entries() {
        assert_eq!(
            reloaded.raw_tag(entry.signature),
            original.raw_tag(entry.signature),
            "tag {} changed",
            entry.signature
        );
    }
    // Shared curves stay shared
    assert_eq!(reloaded.linked_to(TagSignature::BLUE_TRC), Some(TagSignature::RED_TRC));
}

#[test]
fn test_unknown_tags_preserved() {
    let chad = [
        b's', b'f', b'3', b'2', 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ];
    let data = ProfileBuilder::display_rgb()
        .description("Display")
        .raw(TagSignature::from_bytes(*b"chad"), &chad)
        .bytes()
        .unwrap();

    let mut profile = load(&data, LoadFlags::empty());
    profile.set_description(None, "Renamed");
    let saved = profile.save_data().unwrap();

    let reloaded = IccProfile::parse(&saved).unwrap();
    assert_eq!(
        reloaded.raw_tag(TagSignature::from_bytes(*b"chad")),
        Some(&chad[..])
    );
}

#[test]
fn test_edits_visible_after_reload() {
    let data = ProfileBuilder::display_rgb()
        .description("Before")
        .metadata(&[("CMF_product", "oxicc"), ("EDID_md5", "deadbeef")])
        .bytes()
        .unwrap();

    let mut profile = load(&data, LoadFlags::METADATA);
    assert_eq!(profile.metadata_item("EDID_md5"), Some("deadbeef"));

    profile.set_description(None, "After");
    profile.set_model(None, "Model 7");
    profile.set_metadata_item("License", "CC0");
    profile.remove_metadata_item("EDID_md5");
    profile.set_kind(ProfileKind::OutputDevice);
    profile.set_colorspace(Colorspace::Cmyk);
    let saved = profile.save_data().unwrap();

    let mut reloaded = load(&saved, LoadFlags::METADATA);
    assert_eq!(reloaded.description(None).unwrap(), "After");
    assert_eq!(reloaded.model(None).unwrap(), "Model 7");
    assert_eq!(reloaded.metadata_item("License"), Some("CC0"));
    assert_eq!(reloaded.metadata_item("CMF_product"), Some("oxicc"));
    assert_eq!(reloaded.metadata_item("EDID_md5"), None);
    assert_eq!(reloaded.kind(), ProfileKind::OutputDevice);
    assert_eq!(reloaded.colorspace(), Colorspace::Cmyk);
}

#[test]
fn test_cleared_metadata_removes_tag() {
    let data = ProfileBuilder::display_rgb()
        .metadata(&[("Key", "Value")])
        .bytes()
        .unwrap();

    let mut profile = load(&data, LoadFlags::METADATA);
    profile.clear_metadata();
    let saved = profile.save_data().unwrap();

    let reloaded = IccProfile::parse(&saved).unwrap();
    assert!(!reloaded.contains(TagSignature::META));
}

#[test]
fn test_unmapped_kind_keeps_header() {
    let data = ProfileBuilder::display_rgb().bytes().unwrap();
    let mut profile = load(&data, LoadFlags::empty());
    profile.set_kind(ProfileKind::Unknown);
    profile.set_colorspace(Colorspace::Unknown);

    let saved = profile.save_data().unwrap();
    assert_eq!(&saved[12..16], b"mntr");
    assert_eq!(&saved[16..20], b"RGB ");
}

#[test]
fn test_profile_id_becomes_checksum() {
    let data = ProfileBuilder::display_rgb()
        .description("Checksum")
        .bytes()
        .unwrap();
    let mut profile = load(&data, LoadFlags::empty());
    assert_eq!(profile.checksum(), None);

    let saved = profile.save_data().unwrap();
    let id = &saved[84..100];
    assert!(id.iter().any(|&b| b != 0));

    let reloaded = load(&saved, LoadFlags::empty());
    let expected: String = id.iter().map(|b| format!("{:02x}", b)).collect();
    assert_eq!(reloaded.checksum(), Some(expected.as_str()));
}

#[test]
fn test_save_is_repeatable() {
    let data = ProfileBuilder::display_rgb()
        .description("Twice")
        .bytes()
        .unwrap();
    let mut profile = load(&data, LoadFlags::METADATA);
    profile.set_copyright(None, "Mine");

    let first = profile.save_data().unwrap();
    let second = profile.save_data().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_translations_raise_version() {
    let data = ProfileBuilder::display_rgb()
        .version(2.1)
        .description("Display")
        .bytes()
        .unwrap();

    let mut profile = load(&data, LoadFlags::empty());
    profile.set_description(Some("de_DE"), "Bildschirm");
    let saved = profile.save_data().unwrap();

    let reloaded = IccProfile::parse(&saved).unwrap();
    assert_eq!(reloaded.version(), 4.0);
    assert_eq!(reloaded.tag_type(TagSignature::DESCRIPTION), Some(TypeSignature::MLUC));

    let mut reloaded = load(&saved, LoadFlags::empty());
    assert_eq!(reloaded.description(None).unwrap(), "Display");
    assert_eq!(reloaded.description(Some("de_DE.UTF-8")).unwrap(), "Bildschirm");
}

#[test]
fn test_description_write_drops_apple_alias() {
    let data = ProfileBuilder::display_rgb()
        .version(4.2)
        .description("Plain")
        .text(TagSignature::DESCRIPTION_ML, &[(Some("en"), Some("US"), "Alias")])
        .bytes()
        .unwrap();

    let mut profile = load(&data, LoadFlags::empty());
    // The alias is tried first when reading
    assert_eq!(profile.description(None).unwrap(), "Alias");

    let saved = profile.save_data().unwrap();
    let reloaded = IccProfile::parse(&saved).unwrap();
    assert!(!reloaded.contains(TagSignature::DESCRIPTION_ML));

    let mut reloaded = load(&saved, LoadFlags::empty());
    assert_eq!(reloaded.description(None).unwrap(), "Alias");
}

#[test]
fn test_save_file_replaces_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("display.icc");
    let data = ProfileBuilder::display_rgb()
        .description("On disk")
        .bytes()
        .unwrap();
    std::fs::write(&path, &data).unwrap();

    let mut profile = ColorProfile::new();
    profile.load_file(&path, LoadFlags::empty(), None).unwrap();
    assert!(profile.can_delete());
    profile.set_description(None, "Rewritten");
    profile.save_file(&path, None).unwrap();

    // Only the destination remains; no temporary files are left behind
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("display.icc")]);

    let mut reloaded = ColorProfile::new();
    reloaded.load_file(&path, LoadFlags::empty(), None).unwrap();
    assert_eq!(reloaded.description(None).unwrap(), "Rewritten");
}

#[test]
fn test_save_file_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.icc");
    let data = ProfileBuilder::display_rgb().bytes().unwrap();

    let mut profile = load(&data, LoadFlags::empty());
    let err = profile.save_file(&path, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FailedToSave);
    assert!(!path.exists());
}
