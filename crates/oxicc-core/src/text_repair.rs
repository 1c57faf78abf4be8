//! Best-effort repair of vendor text claimed to be UTF-8
//!
//! Some profile writers emit Latin-1 bytes in fields that readers expect
//! to be UTF-8. Only two offenders are common enough to fix: a bare
//! registered sign (0xAE) and a stray 0x86.

/// Rewrite known Latin-1 offenders and revalidate
///
/// 0xAE becomes the two-byte sequence `C2 AE`, 0x86 is removed and every
/// other byte is kept. Returns `None` if the result is still not UTF-8.
pub fn repair_utf8(bytes: Vec<u8>) -> Option<String> {
    let mut fixed = Vec::with_capacity(bytes.len() + 4);
    for b in bytes {
        match b {
            0xAE => fixed.extend_from_slice(&[0xC2, 0xAE]),
            0x86 => {}
            _ => fixed.push(b),
        }
    }
    String::from_utf8(fixed).ok()
}

/// Validate, falling back to [`repair_utf8`]
pub fn to_utf8_or_repair(bytes: Vec<u8>) -> Option<String> {
    match String::from_utf8(bytes) {
        Ok(s) => Some(s),
        Err(e) => repair_utf8(e.into_bytes()),
    }
}
