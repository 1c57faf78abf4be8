//! Load pipeline
//!
//! Every entry point parses first and only then commits to the model, so
//! a failed load leaves the model exactly as it was.

use std::fmt::Write as _;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use bitflags::bitflags;
use md5::{Digest, Md5};
use tracing::{debug, trace};

use crate::cancel::Cancellable;
use crate::error::{Error, Result};
use crate::icc::IccProfile;
use crate::localized::LocalizedField;
use crate::mapping::{colorspace_from_signature, kind_from_signature};
use crate::metadata::Metadata;
use crate::named_color;
use crate::profile::ColorProfile;

/// Smallest input that can hold a header and a tag count
pub const MIN_LOAD_SIZE: usize = 132;

bitflags! {
    /// Optional work done while loading
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LoadFlags: u32 {
        /// Decode the `meta` dictionary
        const METADATA = 1 << 0;
        /// Extract named color swatches
        const NAMED_COLORS = 1 << 1;
        /// Accepted for compatibility; currently does nothing
        const TRANSLATIONS = 1 << 2;
        /// Hash the input when the header carries no profile ID
        const FALLBACK_CHECKSUM = 1 << 3;
    }
}

pub(crate) fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

fn parse(data: &[u8]) -> Result<IccProfile> {
    if data.len() < MIN_LOAD_SIZE {
        return Err(Error::FailedToParse(format!(
            "{} bytes is too small to contain a header",
            data.len()
        )));
    }
    IccProfile::parse(data).map_err(|e| Error::FailedToParse(e.to_string()))
}

/// Whether the current user may write the directory holding `path`
fn parent_writable(path: &Path) -> bool {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    dir_writable(parent)
}

#[cfg(unix)]
fn dir_writable(dir: &Path) -> bool {
    use rustix::fs::{Access, access};

    match access(dir, Access::WRITE_OK) {
        Ok(()) => true,
        Err(e) => {
            trace!(dir = %dir.display(), error = %e, "directory not writable");
            false
        }
    }
}

#[cfg(not(unix))]
fn dir_writable(dir: &Path) -> bool {
    fs::metadata(dir)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

fn check_cancelled(cancellable: Option<&Cancellable>, what: &str) -> Result<()> {
    if cancellable.is_some_and(Cancellable::is_cancelled) {
        return Err(Error::FailedToOpen(format!("{} cancelled", what)));
    }
    Ok(())
}

impl ColorProfile {
    /// Load from an in-memory buffer
    pub fn load_data(&mut self, data: &[u8], flags: LoadFlags) -> Result<()> {
        self.ensure_unloaded()?;
        let handle = parse(data)?;
        self.commit(handle, data.len() as u32, Some(data), flags);
        Ok(())
    }

    /// Load everything a reader yields
    ///
    /// Read errors and codec rejections are both `FailedToOpen`. The
    /// fallback checksum is not computed on this path.
    pub fn load_reader<R: Read>(&mut self, mut reader: R, flags: LoadFlags) -> Result<()> {
        self.ensure_unloaded()?;
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::FailedToOpen(format!("failed to read profile: {}", e)))?;
        let handle = IccProfile::parse(&data)
            .map_err(|e| Error::FailedToOpen(format!("failed to open stream: {}", e)))?;
        self.commit(handle, data.len() as u32, None, flags);
        Ok(())
    }

    /// Load from an open descriptor, which stays owned by the caller
    #[cfg(unix)]
    pub fn load_fd(&mut self, fd: std::os::fd::BorrowedFd<'_>, flags: LoadFlags) -> Result<()> {
        self.ensure_unloaded()?;
        let owned = fd
            .try_clone_to_owned()
            .map_err(|e| Error::FailedToOpen(format!("failed to duplicate descriptor: {}", e)))?;
        self.load_reader(fs::File::from(owned), flags)
    }

    /// Load a file, recording its path and whether it may be deleted
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        flags: LoadFlags,
        cancellable: Option<&Cancellable>,
    ) -> Result<()> {
        let path = path.as_ref();
        self.ensure_unloaded()?;
        check_cancelled(cancellable, "load")?;

        let data = fs::read(path).map_err(|e| {
            Error::FailedToOpen(format!("failed to read {}: {}", path.display(), e))
        })?;
        check_cancelled(cancellable, "load")?;

        let handle = parse(&data)?;
        let can_delete = parent_writable(path);
        let filename = fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

        self.commit(handle, data.len() as u32, Some(&data), flags);
        self.can_delete = can_delete;
        self.filename = Some(filename);
        Ok(())
    }

    /// Take ownership of an already built codec profile
    ///
    /// Unlike the load paths this does not populate kind, colorspace,
    /// version or any cache; the caller sets what it needs.
    pub fn adopt(&mut self, handle: IccProfile) -> Result<()> {
        self.ensure_unloaded()?;
        self.handle = Some(handle);
        Ok(())
    }

    fn ensure_unloaded(&self) -> Result<()> {
        if self.handle.is_some() {
            return Err(Error::FailedToOpen("profile already loaded".to_string()));
        }
        Ok(())
    }

    fn commit(&mut self, handle: IccProfile, size: u32, source: Option<&[u8]>, flags: LoadFlags) {
        self.size = size;
        self.version = handle.version();
        self.kind = kind_from_signature(handle.header.device_class);
        self.colorspace = colorspace_from_signature(handle.header.color_space);

        let id = handle.header.profile_id;
        if id.iter().any(|&b| b != 0) {
            trace!("using embedded profile ID as checksum");
            self.checksum = Some(hex(&id));
        } else if let (true, Some(data)) = (flags.contains(LoadFlags::FALLBACK_CHECKSUM), source) {
            self.checksum = Some(hex(&Md5::digest(data)));
        }

        // Prime the default entries; a missing field is not a load failure
        for field in LocalizedField::ALL {
            if let Err(e) = self.localized.resolve(Some(&handle), field, None) {
                trace!(%field, error = %e, "no default text");
            }
        }

        if flags.contains(LoadFlags::METADATA) {
            self.metadata = Metadata::from_profile(&handle);
        }
        if flags.contains(LoadFlags::NAMED_COLORS) {
            self.named_colors = named_color::extract(&handle);
        }

        debug!(
            size,
            version = self.version,
            kind = %self.kind,
            colorspace = %self.colorspace,
            tags = handle.tag_count(),
            "loaded profile"
        );
        self.handle = Some(handle);
    }
}
