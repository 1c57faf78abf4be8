use std::path::Path;

use anyhow::{Context, Result};
use oxicc_core::{ColorProfile, LoadFlags};

/// Print the diagnostic dump of a profile.
pub fn cmd_dump(file: &Path) -> Result<()> {
    let mut profile = ColorProfile::new();
    profile
        .load_file(file, LoadFlags::empty(), None)
        .with_context(|| format!("failed to load {}", file.display()))?;
    println!("{}", profile.dump()?);
    Ok(())
}
