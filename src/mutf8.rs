//! The Modified UTF-8 string encoding used by NBT.
//!
//! This is standard UTF-8 with two differences, both inherited from the
//! format's Java origins:
//!
//! * The NUL character is encoded as the two-byte overlong sequence
//!   `C0 80`, never as a single zero byte. A zero byte therefore never
//!   appears in encoded text.
//! * Encoding operates on UTF-16 code units, so characters outside the
//!   basic multilingual plane are written as two independent three-byte
//!   sequences (one per surrogate half) rather than one four-byte sequence.
//!
//! Decoding is strict: stray zero bytes, malformed continuation bytes,
//! non-canonical overlong forms (other than `C0 80` itself), four-byte UTF-8
//! sequences and unpaired surrogates all fail with a format error. There is
//! no lossy fallback.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// Encode a string as Modified UTF-8.
///
/// Borrows the input when its standard UTF-8 form is already valid Modified
/// UTF-8, which is the common case. Fails if the encoded form would not fit
/// the wire format's 16-bit length prefix.
pub fn encode(s: &str) -> Result<Cow<[u8]>> {
    // UTF-8 and MUTF-8 agree exactly on NUL-free BMP text.
    if s.chars().all(|c| c != '\0' && c <= '\u{ffff}') {
        bounded(Cow::Borrowed(s.as_bytes()))
    } else {
        let mut buf = Vec::with_capacity(s.len() + 2);
        for unit in s.encode_utf16() {
            match unit {
                0 => buf.extend_from_slice(&[0xC0, 0x80]),
                1..=0x7F => buf.push(unit as u8),
                0x80..=0x7FF => {
                    buf.push(0xC0 | (unit >> 6) as u8);
                    buf.push(0x80 | (unit & 0x3F) as u8);
                }
                _ => {
                    buf.push(0xE0 | (unit >> 12) as u8);
                    buf.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                    buf.push(0x80 | (unit & 0x3F) as u8);
                }
            }
        }
        bounded(Cow::Owned(buf))
    }
}

fn bounded(bytes: Cow<[u8]>) -> Result<Cow<[u8]>> {
    if bytes.len() > u16::MAX as usize {
        Err(Error::StringTooLong(bytes.len()))
    } else {
        Ok(bytes)
    }
}

/// Decode Modified UTF-8 bytes into a string.
///
/// Borrows the input when it is pure ASCII. Any structural violation fails
/// with [`Error::InvalidMutf8`] carrying the byte offset of the offending
/// sequence.
pub fn decode(bytes: &[u8]) -> Result<Cow<str>> {
    if bytes.iter().all(|&b| (1..=0x7F).contains(&b)) {
        let s = std::str::from_utf8(bytes).map_err(|e| Error::invalid_mutf8(e.valid_up_to()))?;
        return Ok(Cow::Borrowed(s));
    }

    // Offsets are kept per code unit so unpaired-surrogate errors can still
    // point into the input.
    let mut units = Vec::with_capacity(bytes.len());
    let mut offsets = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        let b0 = bytes[i];
        let unit = match b0 {
            // A literal zero byte is only legal as part of `C0 80`.
            0 => return Err(Error::invalid_mutf8(i)),
            0x01..=0x7F => {
                i += 1;
                b0 as u16
            }
            0xC0..=0xDF => {
                let b1 = continuation(bytes, i, 1)?;
                let unit = (u16::from(b0 & 0x1F) << 6) | u16::from(b1 & 0x3F);
                // The overlong NUL is the single permitted non-canonical form.
                if unit < 0x80 && !(b0 == 0xC0 && b1 == 0x80) {
                    return Err(Error::invalid_mutf8(i));
                }
                i += 2;
                unit
            }
            0xE0..=0xEF => {
                let b1 = continuation(bytes, i, 1)?;
                let b2 = continuation(bytes, i, 2)?;
                let unit = (u16::from(b0 & 0x0F) << 12)
                    | (u16::from(b1 & 0x3F) << 6)
                    | u16::from(b2 & 0x3F);
                if unit < 0x800 {
                    return Err(Error::invalid_mutf8(i));
                }
                i += 3;
                unit
            }
            // Stray continuation byte, or a four-byte lead which MUTF-8
            // never produces.
            _ => return Err(Error::invalid_mutf8(i)),
        };
        units.push(unit);
        offsets.push(start);
    }

    // Reassemble surrogate pairs into chars.
    let mut out = String::with_capacity(bytes.len());
    let mut j = 0;
    while j < units.len() {
        let u = units[j];
        let c = match u {
            0xD800..=0xDBFF => {
                let low = match units.get(j + 1) {
                    Some(&low @ 0xDC00..=0xDFFF) => low,
                    _ => return Err(Error::invalid_mutf8(offsets[j])),
                };
                j += 2;
                let combined =
                    0x10000 + ((u32::from(u) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                char::from_u32(combined).ok_or_else(|| Error::invalid_mutf8(offsets[j - 2]))?
            }
            0xDC00..=0xDFFF => return Err(Error::invalid_mutf8(offsets[j])),
            _ => {
                j += 1;
                char::from_u32(u32::from(u)).ok_or_else(|| Error::invalid_mutf8(offsets[j - 1]))?
            }
        };
        out.push(c);
    }

    Ok(Cow::Owned(out))
}

fn continuation(bytes: &[u8], start: usize, n: usize) -> Result<u8> {
    match bytes.get(start + n) {
        Some(&b) if b & 0xC0 == 0x80 => Ok(b),
        _ => Err(Error::invalid_mutf8(start)),
    }
}
