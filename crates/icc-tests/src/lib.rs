//! # icc-tests
//!
//! Integration and parity testing for oxicc.
//!
//! This crate provides:
//! - Fixture builders producing synthetic profiles through the codec
//! - Deterministic garbage generators for robustness tests
//! - Suites checking that saved profiles open in lcms2 and moxcms
//!
//! ## Test Categories
//!
//! 1. **Round trip**: load, edit, save, reload
//! 2. **Load edge cases**: truncated, corrupted and oversized inputs
//! 3. **Localized text**: locale resolution and write-back
//! 4. **Named colors**: name composition, repair and PCS decoding
//! 5. **Parity**: header fields and text agree with lcms2 and moxcms

pub mod fixtures;

pub use fixtures::{ProfileBuilder, corrupt, garbage};
