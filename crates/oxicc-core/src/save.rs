//! Save pipeline
//!
//! Pushes the model's edits into the codec, recomputes the profile ID,
//! serializes, and for files replaces the destination atomically through
//! a temporary file in the same directory.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::cancel::Cancellable;
use crate::error::{Error, Result};
use crate::mapping::{colorspace_to_signature, kind_to_signature};
use crate::profile::ColorProfile;

fn check_cancelled(cancellable: Option<&Cancellable>) -> Result<()> {
    if cancellable.is_some_and(Cancellable::is_cancelled) {
        return Err(Error::FailedToSave("save cancelled".to_string()));
    }
    Ok(())
}

impl ColorProfile {
    /// Serialize the profile with all pending edits applied
    pub fn save_data(&mut self) -> Result<Vec<u8>> {
        let handle = self
            .handle
            .as_mut()
            .ok_or_else(|| Error::FailedToSave("no profile loaded".to_string()))?;

        // Unmapped values leave the header untouched
        match kind_to_signature(self.kind) {
            Some(sig) => handle.header.device_class = sig,
            None => trace!(kind = %self.kind, "kind unmapped, keeping header value"),
        }
        match colorspace_to_signature(self.colorspace) {
            Some(sig) => handle.header.color_space = sig,
            None => trace!(
                colorspace = %self.colorspace,
                "colorspace unmapped, keeping header value"
            ),
        }
        if self.version > 0.0 {
            handle.set_version(self.version);
        }

        self.metadata.write_back(handle)?;
        self.localized.write_back(handle)?;

        handle
            .compute_profile_id()
            .map_err(|e| Error::FailedToSave(format!("failed to compute profile ID: {}", e)))?;

        let len = handle
            .encoded_len()
            .map_err(|e| Error::FailedToSave(format!("failed to size profile: {}", e)))?;
        let mut data = vec![0u8; len];
        handle
            .encode_into(&mut data)
            .map_err(|e| Error::FailedToSave(format!("failed to serialize profile: {}", e)))?;

        debug!(bytes = data.len(), "serialized profile");
        Ok(data)
    }

    /// Save to `path`, replacing it only once the new content is complete
    pub fn save_file(
        &mut self,
        path: impl AsRef<Path>,
        cancellable: Option<&Cancellable>,
    ) -> Result<()> {
        let path = path.as_ref();
        check_cancelled(cancellable)?;
        let data = self.save_data()?;
        check_cancelled(cancellable)?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let fail = |what: &str, e: std::io::Error| {
            Error::FailedToSave(format!("{} {}: {}", what, path.display(), e))
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| fail("failed to create temporary file for", e))?;
        tmp.write_all(&data).map_err(|e| fail("failed to write", e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| fail("failed to sync", e))?;

        check_cancelled(cancellable)?;
        tmp.persist(path)
            .map_err(|e| fail("failed to replace", e.error))?;

        debug!(path = %path.display(), bytes = data.len(), "saved profile");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{Colorspace, ProfileKind};
    use crate::error::ErrorKind;
    use crate::icc::{ColorSpace, IccProfile, ProfileClass, ProfileVersion, TagSignature};
    use crate::load::LoadFlags;

    fn loaded() -> ColorProfile {
        let handle = IccProfile::new(
            ProfileClass::Display,
            ColorSpace::Rgb,
            ColorSpace::Xyz,
            ProfileVersion::from_f64(2.1),
        );
        let mut profile = ColorProfile::new();
        profile
            .load_data(&handle.to_bytes().unwrap(), LoadFlags::empty())
            .unwrap();
        profile
    }

    #[test]
    fn test_save_without_handle() {
        let err = ColorProfile::new().save_data().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedToSave);
    }

    #[test]
    fn test_save_applies_edits() {
        let mut profile = loaded();
        profile.set_kind(ProfileKind::OutputDevice);
        profile.set_colorspace(Colorspace::Cmyk);
        profile.set_version(4.2);
        profile.set_description(None, "Edited");

        let bytes = profile.save_data().unwrap();
        let handle = IccProfile::parse(&bytes).unwrap();
        assert_eq!(&handle.header.device_class.to_be_bytes(), b"prtr");
        assert_eq!(&handle.header.color_space.to_be_bytes(), b"CMYK");
        assert_eq!(handle.version(), 4.2);
        assert_ne!(handle.header.profile_id, [0; 16]);
        assert!(handle.contains(TagSignature::DESCRIPTION));
    }

    #[test]
    fn test_unknown_kind_keeps_header() {
        let mut profile = loaded();
        profile.set_kind(ProfileKind::Unknown);
        profile.set_colorspace(Colorspace::Unknown);

        let bytes = profile.save_data().unwrap();
        let handle = IccProfile::parse(&bytes).unwrap();
        assert_eq!(&handle.header.device_class.to_be_bytes(), b"mntr");
        assert_eq!(&handle.header.color_space.to_be_bytes(), b"RGB ");
    }

    #[test]
    fn test_cancelled_save_leaves_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.icc");
        std::fs::write(&path, b"original").unwrap();

        let token = Cancellable::new();
        token.cancel();
        let err = loaded().save_file(&path, Some(&token)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedToSave);
        assert_eq!(std::fs::read(&path).unwrap(), b"original");
    }

    #[test]
    fn test_save_file_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.icc");
        std::fs::write(&path, b"original").unwrap();

        let mut profile = loaded();
        profile.save_file(&path, None).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(IccProfile::parse(&written).is_ok());
        // Only the destination remains in the directory
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
