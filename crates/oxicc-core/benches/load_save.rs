//! Load and Save Benchmarks
//!
//! Measures parsing, cache priming and serialization for profiles of
//! growing tag and named color counts.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use oxicc_core::icc::{
    ColorSpace, CurveData, DictData, IccProfile, MultiLocalizedText, NamedColorEntry,
    NamedColorList, ProfileClass, ProfileVersion, TagData, TagSignature, WideString,
};
use oxicc_core::{ColorProfile, LoadFlags};

fn text(value: &str) -> TagData {
    let mut mlu = MultiLocalizedText::new();
    if let Ok(s) = WideString::new(value) {
        mlu.set(Some("en"), Some("US"), s.clone());
        mlu.set(Some("de"), Some("DE"), s);
    }
    TagData::Text(mlu)
}

/// A v4 display profile with `meta_entries` dictionary records
fn display_profile(meta_entries: usize) -> Vec<u8> {
    let mut handle = IccProfile::new(
        ProfileClass::Display,
        ColorSpace::Rgb,
        ColorSpace::Xyz,
        ProfileVersion::V4_0,
    );
    handle.write_tag(TagSignature::DESCRIPTION, Some(&text("Bench Display")));
    handle.write_tag(TagSignature::COPYRIGHT, Some(&text("No copyright")));
    handle.write_tag(TagSignature::RED_TRC, Some(&TagData::Curve(CurveData::Gamma(2.2))));
    let _ = handle.link_tag(TagSignature::GREEN_TRC, TagSignature::RED_TRC);
    let _ = handle.link_tag(TagSignature::BLUE_TRC, TagSignature::RED_TRC);

    let mut dict = DictData::default();
    for i in 0..meta_entries {
        if let (Ok(k), Ok(v)) = (
            WideString::new(&format!("KEY_{}", i)),
            WideString::new(&format!("value {}", i)),
        ) {
            dict.push(k, v);
        }
    }
    handle.write_tag(TagSignature::META, Some(&TagData::Dict(dict)));
    handle.to_bytes().unwrap_or_default()
}

fn named_profile(colors: usize) -> Vec<u8> {
    let mut handle = IccProfile::new(
        ProfileClass::NamedColor,
        ColorSpace::Rgb,
        ColorSpace::Lab,
        ProfileVersion::from_f64(2.1),
    );
    let list = NamedColorList {
        prefix: b"BENCH".to_vec(),
        suffix: b"C".to_vec(),
        colors: (0..colors)
            .map(|i| NamedColorEntry {
                name: format!("{}", i).into_bytes(),
                pcs: [(i * 37 % 65536) as u16, 0x8080, 0x8080],
                device: Vec::new(),
            })
            .collect(),
        ..Default::default()
    };
    handle.write_tag(TagSignature::NAMED_COLOR2, Some(&TagData::NamedColors(list)));
    handle.to_bytes().unwrap_or_default()
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [0, 16, 256].iter() {
        let data = display_profile(*size);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("plain", size), size, |b, _| {
            b.iter(|| {
                let mut profile = ColorProfile::new();
                profile
                    .load_data(black_box(&data), LoadFlags::empty())
                    .map(|_| profile)
            })
        });

        group.bench_with_input(BenchmarkId::new("metadata", size), size, |b, _| {
            b.iter(|| {
                let mut profile = ColorProfile::new();
                profile
                    .load_data(
                        black_box(&data),
                        LoadFlags::METADATA | LoadFlags::FALLBACK_CHECKSUM,
                    )
                    .map(|_| profile)
            })
        });
    }

    group.finish();
}

fn bench_named_colors(c: &mut Criterion) {
    let mut group = c.benchmark_group("named_colors");

    for size in [10, 1000].iter() {
        let data = named_profile(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("extract", size), size, |b, _| {
            b.iter(|| {
                let mut profile = ColorProfile::new();
                profile
                    .load_data(black_box(&data), LoadFlags::NAMED_COLORS)
                    .map(|_| profile.named_colors().len())
            })
        });
    }

    group.finish();
}

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");

    for size in [0, 256].iter() {
        let data = display_profile(*size);
        let mut profile = ColorProfile::new();
        if profile.load_data(&data, LoadFlags::METADATA).is_err() {
            continue;
        }
        profile.set_description(Some("fr_FR"), "Écran de test");
        profile.set_metadata_item("EDID_md5", "0123456789abcdef");

        group.bench_with_input(BenchmarkId::new("save_data", size), size, |b, _| {
            b.iter(|| black_box(&mut profile).save_data())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_named_colors, bench_save);

criterion_main!(benches);
