//! ICC Profile Codec
//!
//! Reads and writes the ICC.1:2022 binary format: the 128-byte header,
//! the tag table and the tag types the profile model needs. Tags of any
//! other type are carried through byte-for-byte.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (may be shared between entries)
//!
//! # Example
//!
//! ```ignore
//! use oxicc_core::icc::{IccProfile, TagSignature};
//!
//! let mut profile = IccProfile::parse(&bytes)?;
//! profile.write_tag(TagSignature::COPYRIGHT, None);
//! let bytes = profile.to_bytes()?;
//! ```

pub mod header;
pub mod tags;

mod error;
mod parser;
mod types;
mod writer;

pub use error::IccError;
pub use header::{ColorSpace, IccHeader, ProfileClass, RenderingIntent};
pub use parser::{IccProfile, MAX_TAGS, TagEntry, TagPayload};
pub use tags::{
    CurveData, DictData, DictEntry, MultiLocalizedText, NamedColorEntry, NamedColorList, TagData,
    WideString, XyzTagData,
};
pub use types::{
    DateTimeNumber, ProfileVersion, S15Fixed16, TagSignature, TypeSignature, U8Fixed8, XyzNumber,
};
