//! ICC Profile Tag Table
//!
//! [`IccProfile`] is an editable tag table: the parsed header plus every
//! tag's raw bytes in table order. Typed access goes through
//! [`IccProfile::read_tag`] and [`IccProfile::write_tag`]; bytes for tags we
//! do not understand are carried through untouched.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (may be shared between several table entries)

use tracing::{debug, trace, warn};

use super::error::IccError;
use super::header::{ColorSpace, HEADER_SIZE, IccHeader, MIN_PROFILE_SIZE, ProfileClass};
use super::tags::TagData;
use super::types::{ProfileVersion, TagSignature, TypeSignature, read_u32};

/// Tag tables larger than this are treated as corrupt
pub const MAX_TAGS: u32 = 100;

/// Size of one tag table record
pub(crate) const TAG_RECORD_SIZE: usize = 12;

/// Where a tag's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPayload {
    /// Encoded bytes, starting at the type signature
    Data(Vec<u8>),
    /// Shares the bytes of another entry, which always holds `Data`
    Link(TagSignature),
}

/// One tag table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub signature: TagSignature,
    pub payload: TagPayload,
}

/// An ICC profile as an editable tag table
#[derive(Debug, Clone, PartialEq)]
pub struct IccProfile {
    /// Profile header (128 bytes)
    pub header: IccHeader,
    pub(crate) entries: Vec<TagEntry>,
}

impl IccProfile {
    /// Create an empty profile
    pub fn new(
        class: ProfileClass,
        color_space: ColorSpace,
        pcs: ColorSpace,
        version: ProfileVersion,
    ) -> Self {
        Self {
            header: IccHeader::new(class, color_space, pcs, version),
            entries: Vec::new(),
        }
    }

    /// Parse an ICC profile from bytes
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < MIN_PROFILE_SIZE {
            return Err(IccError::TooSmall {
                expected: MIN_PROFILE_SIZE,
                actual: data.len(),
            });
        }

        let header = IccHeader::parse(data)?;

        let mut limit = header.size as usize;
        if limit > data.len() {
            warn!(
                header_size = header.size,
                actual = data.len(),
                "header size exceeds data, clamping"
            );
            limit = data.len();
        }

        let count = read_u32(data, HEADER_SIZE).unwrap_or_default();
        if count > MAX_TAGS {
            return Err(IccError::TooManyTags(count));
        }
        if MIN_PROFILE_SIZE + count as usize * TAG_RECORD_SIZE > data.len() {
            return Err(IccError::TruncatedTagTable {
                count,
                available: data.len(),
            });
        }

        // (signature, offset, size) of entries holding their own data
        let mut placed: Vec<(TagSignature, u32, u32)> = Vec::new();
        let mut entries: Vec<TagEntry> = Vec::with_capacity(count as usize);

        for i in 0..count as usize {
            let record = MIN_PROFILE_SIZE + i * TAG_RECORD_SIZE;
            let signature = TagSignature(read_u32(data, record).unwrap_or_default());
            let offset = read_u32(data, record + 4).unwrap_or_default();
            let size = read_u32(data, record + 8).unwrap_or_default();

            let end = offset as u64 + size as u64;
            if end > limit as u64 {
                warn!(tag = %signature, offset, size, "tag out of bounds, skipping");
                continue;
            }
            if entries.iter().any(|e| e.signature == signature) {
                warn!(tag = %signature, "duplicate tag, skipping");
                continue;
            }

            let payload = match placed
                .iter()
                .find(|(_, o, s)| *o == offset && *s == size)
            {
                Some((target, _, _)) => {
                    trace!(tag = %signature, target = %target, "linked tag");
                    TagPayload::Link(*target)
                }
                None => {
                    placed.push((signature, offset, size));
                    TagPayload::Data(data[offset as usize..end as usize].to_vec())
                }
            };
            entries.push(TagEntry { signature, payload });
        }

        debug!(tags = entries.len(), size = limit, "parsed tag table");
        Ok(Self { header, entries })
    }

    pub fn version(&self) -> f64 {
        self.header.version.to_f64()
    }

    pub fn set_version(&mut self, version: f64) {
        self.header.version = ProfileVersion::from_f64(version);
    }

    pub fn tag_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries in table order
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn contains(&self, sig: TagSignature) -> bool {
        self.entry(sig).is_some()
    }

    /// Target of `sig` if it shares another tag's data
    pub fn linked_to(&self, sig: TagSignature) -> Option<TagSignature> {
        match self.entry(sig)?.payload {
            TagPayload::Link(target) => Some(target),
            TagPayload::Data(_) => None,
        }
    }

    /// Encoded bytes of a tag, following links
    pub fn raw_tag(&self, sig: TagSignature) -> Option<&[u8]> {
        match &self.entry(sig)?.payload {
            TagPayload::Data(bytes) => Some(bytes),
            TagPayload::Link(target) => match &self.entry(*target)?.payload {
                TagPayload::Data(bytes) => Some(bytes),
                TagPayload::Link(_) => None,
            },
        }
    }

    pub fn tag_type(&self, sig: TagSignature) -> Option<TypeSignature> {
        self.raw_tag(sig)
            .and_then(|bytes| read_u32(bytes, 0))
            .map(TypeSignature)
    }

    /// Decode a tag
    ///
    /// Returns `None` when the tag is absent or its bytes do not decode.
    pub fn read_tag(&self, sig: TagSignature) -> Option<TagData> {
        let bytes = self.raw_tag(sig)?;
        match TagData::parse(bytes) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(tag = %sig, error = %e, "cannot decode tag");
                None
            }
        }
    }

    /// Encode and store a tag, or delete it when `data` is `None`
    ///
    /// The encoding follows the current header version, so raise the
    /// version before writing tags that depend on it.
    pub fn write_tag(&mut self, sig: TagSignature, data: Option<&TagData>) {
        match data {
            Some(data) => {
                let bytes = data.encode(sig, self.header.version);
                self.write_raw_tag(sig, bytes);
            }
            None => self.delete_tag(sig),
        }
    }

    /// Store already-encoded bytes (starting at the type signature)
    pub fn write_raw_tag(&mut self, sig: TagSignature, bytes: Vec<u8>) {
        self.detach_links_to(sig);
        match self.entries.iter_mut().find(|e| e.signature == sig) {
            Some(entry) => entry.payload = TagPayload::Data(bytes),
            None => self.entries.push(TagEntry {
                signature: sig,
                payload: TagPayload::Data(bytes),
            }),
        }
    }

    pub fn delete_tag(&mut self, sig: TagSignature) {
        self.detach_links_to(sig);
        self.entries.retain(|e| e.signature != sig);
    }

    /// Make `sig` share the data of `target`
    pub fn link_tag(&mut self, sig: TagSignature, target: TagSignature) -> Result<(), IccError> {
        let target = match self.entry(target).map(|e| &e.payload) {
            Some(TagPayload::Data(_)) => target,
            Some(TagPayload::Link(inner)) => *inner,
            None => {
                return Err(IccError::CorruptedData(format!(
                    "cannot link {} to missing tag {}",
                    sig, target
                )));
            }
        };
        if target == sig {
            return Ok(());
        }
        self.detach_links_to(sig);
        match self.entries.iter_mut().find(|e| e.signature == sig) {
            Some(entry) => entry.payload = TagPayload::Link(target),
            None => self.entries.push(TagEntry {
                signature: sig,
                payload: TagPayload::Link(target),
            }),
        }
        Ok(())
    }

    fn entry(&self, sig: TagSignature) -> Option<&TagEntry> {
        self.entries.iter().find(|e| e.signature == sig)
    }

    /// Give every entry linked to `sig` its own copy of the current data
    fn detach_links_to(&mut self, sig: TagSignature) {
        let Some(TagPayload::Data(bytes)) = self.entry(sig).map(|e| e.payload.clone()) else {
            return;
        };
        for entry in &mut self.entries {
            if entry.payload == TagPayload::Link(sig) {
                trace!(tag = %entry.signature, target = %sig, "detaching link");
                entry.payload = TagPayload::Data(bytes.clone());
            }
        }
    }
}
