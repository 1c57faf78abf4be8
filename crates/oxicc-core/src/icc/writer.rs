//! ICC Profile Serialization
//!
//! Lays the tag table out after the header, each tag's data 4-byte
//! aligned, with linked entries pointing at their target's bytes.
//! Also computes the profile ID (ICC.1:2022 Section 7.2.18).

use md5::{Digest, Md5};
use tracing::debug;

use super::error::IccError;
use super::header::{HEADER_SIZE, MIN_PROFILE_SIZE};
use super::parser::{IccProfile, TAG_RECORD_SIZE, TagPayload};

#[inline]
fn align4(n: usize) -> usize {
    (n + 3) & !3
}

/// Offset/size of every entry plus the total profile length
struct Layout {
    records: Vec<(u32, u32)>,
    total: usize,
}

impl IccProfile {
    fn layout(&self) -> Result<Layout, IccError> {
        let mut cursor = MIN_PROFILE_SIZE + self.entries.len() * TAG_RECORD_SIZE;
        let mut placed = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            match &entry.payload {
                TagPayload::Data(bytes) => {
                    cursor = align4(cursor);
                    placed.push(Some((cursor, bytes.len())));
                    cursor += bytes.len();
                }
                TagPayload::Link(_) => placed.push(None),
            }
        }

        let records = self
            .entries
            .iter()
            .zip(&placed)
            .map(|(entry, slot)| {
                let (offset, size) = match *slot {
                    Some(slot) => slot,
                    None => {
                        let target = match entry.payload {
                            TagPayload::Link(target) => target,
                            TagPayload::Data(_) => entry.signature,
                        };
                        self.entries
                            .iter()
                            .position(|e| e.signature == target)
                            .and_then(|i| placed[i])
                            .ok_or_else(|| IccError::Encode {
                                tag: entry.signature.0,
                                reason: format!("broken link to {}", target),
                            })?
                    }
                };
                Ok((offset as u32, size as u32))
            })
            .collect::<Result<Vec<_>, IccError>>()?;

        let total = align4(cursor);
        if total > u32::MAX as usize {
            return Err(IccError::CorruptedData("profile exceeds 4 GiB".to_string()));
        }

        Ok(Layout { records, total })
    }

    /// Number of bytes [`encode_into`](Self::encode_into) will write
    pub fn encoded_len(&self) -> Result<usize, IccError> {
        Ok(self.layout()?.total)
    }

    /// Serialize into a buffer of exactly [`encoded_len`](Self::encoded_len) bytes
    pub fn encode_into(&self, out: &mut [u8]) -> Result<(), IccError> {
        let layout = self.layout()?;
        if out.len() != layout.total {
            return Err(IccError::BufferSize {
                expected: layout.total,
                actual: out.len(),
            });
        }
        out.fill(0);

        let mut header = self.header.clone();
        header.size = layout.total as u32;
        out[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
        out[HEADER_SIZE..MIN_PROFILE_SIZE]
            .copy_from_slice(&(self.entries.len() as u32).to_be_bytes());

        for (i, (entry, &(offset, size))) in self.entries.iter().zip(&layout.records).enumerate() {
            let record = MIN_PROFILE_SIZE + i * TAG_RECORD_SIZE;
            out[record..record + 4].copy_from_slice(&entry.signature.0.to_be_bytes());
            out[record + 4..record + 8].copy_from_slice(&offset.to_be_bytes());
            out[record + 8..record + 12].copy_from_slice(&size.to_be_bytes());

            if let TagPayload::Data(bytes) = &entry.payload {
                let start = offset as usize;
                out[start..start + bytes.len()].copy_from_slice(bytes);
            }
        }

        debug!(bytes = layout.total, tags = self.entries.len(), "encoded profile");
        Ok(())
    }

    /// Serialize to a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>, IccError> {
        let mut out = vec![0u8; self.encoded_len()?];
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Recompute the profile ID from the current content and store it
    ///
    /// The digest covers the serialized profile with the flags, rendering
    /// intent and profile ID fields zeroed.
    pub fn compute_profile_id(&mut self) -> Result<[u8; 16], IccError> {
        self.header.profile_id = [0; 16];
        let mut bytes = self.to_bytes()?;
        bytes[44..48].fill(0);
        bytes[64..68].fill(0);
        bytes[84..100].fill(0);

        let digest = Md5::digest(&bytes);
        let mut id = [0u8; 16];
        id.copy_from_slice(&digest);
        self.header.profile_id = id;
        Ok(id)
    }
}
