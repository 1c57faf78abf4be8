//! # oxicc - ICC color profile model
//!
//! Loads, inspects, edits and saves ICC color profiles.
//!
//! ## Overview
//!
//! - **Codec**: [`icc`] reads and writes the binary format, keeping unknown
//!   tags byte-for-byte and shared tags shared.
//! - **Model**: [`ColorProfile`] exposes kind, colorspace, version,
//!   localized text, metadata and named colors, and writes edits back on
//!   save.
//! - **Files**: loading from bytes, readers, descriptors and paths; saving
//!   through an atomic replace.
//!
//! ## Quick Start
//!
//! ```no_run
//! use oxicc_core::{ColorProfile, LoadFlags};
//!
//! let mut profile = ColorProfile::new();
//! profile.load_file("display.icc", LoadFlags::METADATA, None)?;
//! println!("{}", profile.description(None)?);
//!
//! profile.set_description(Some("en_GB"), "Calibrated display");
//! profile.save_file("display-new.icc", None)?;
//! # Ok::<(), oxicc_core::Error>(())
//! ```

pub mod cancel;
pub mod color;
pub mod dump;
pub mod enums;
pub mod error;
pub mod icc;
pub mod load;
pub mod locale;
pub mod localized;
pub mod mapping;
pub mod metadata;
pub mod named_color;
pub mod profile;
pub mod save;
pub mod text_repair;

pub use cancel::Cancellable;
pub use color::{Lab, Xyz};
pub use enums::{Colorspace, ProfileKind, UnknownName};
pub use error::{Error, ErrorKind, Result};
pub use load::LoadFlags;
pub use locale::LocaleKey;
pub use localized::LocalizedField;
pub use named_color::NamedColorSwatch;
pub use profile::ColorProfile;

/// Version of oxicc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
