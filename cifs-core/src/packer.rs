//! Wire-format packing and unpacking primitives
//!
//! This module converts between raw byte buffers and the basic data types
//! used by the CIFS wire format: fixed-width integers in network (big-endian)
//! or Intel (little-endian) byte order, and null terminated ASCII or
//! UTF-16LE ("Unicode") strings.
//!
//! All functions are stateless and operate on caller-supplied buffers plus
//! an offset. The buffer is never retained beyond the call. The only shared
//! state is the host byte-order flag, fixed for the life of the process and
//! consulted exclusively by the platform-native [`get_short`] / [`put_short`]
//! pair; every other accessor uses a format-fixed order regardless of host.

use crate::error::{CifsError, CifsResult};

/// Host byte order, fixed at build time for the target platform.
const BIG_ENDIAN: bool = cfg!(target_endian = "big");

/// Return the host byte-order setting.
///
/// Only the platform-native [`get_short`] / [`put_short`] accessors consult
/// this flag; the network-order and Intel-order accessors do not.
pub const fn is_big_endian() -> bool {
    BIG_ENDIAN
}

/// Check that `width` bytes are available at `pos`
fn check_bounds(buf: &[u8], pos: usize, width: usize) -> CifsResult<()> {
    if pos + width > buf.len() {
        return Err(CifsError::Bounds(format!(
            "need {} bytes at position {}, buffer length is {}",
            width,
            pos,
            buf.len()
        )));
    }
    Ok(())
}

/// Unpack a 32-bit integer in network (big-endian) byte order.
///
/// # Arguments
/// * `buf` - Byte buffer containing the integer to be unpacked
/// * `pos` - Position within the buffer that the integer is stored
///
/// # Error Handling
/// Returns a bounds error if fewer than 4 bytes remain at `pos`.
pub fn get_int(buf: &[u8], pos: usize) -> CifsResult<u32> {
    check_bounds(buf, pos, 4)?;
    Ok(u32::from_be_bytes([
        buf[pos],
        buf[pos + 1],
        buf[pos + 2],
        buf[pos + 3],
    ]))
}

/// Pack a 32-bit integer in network (big-endian) byte order.
///
/// # Arguments
/// * `val` - Integer value to be packed
/// * `buf` - Byte buffer to pack the integer value into
/// * `pos` - Offset to start packing the integer value
///
/// # Error Handling
/// Returns a bounds error before any byte is written if the buffer does not
/// have enough space.
pub fn put_int(val: u32, buf: &mut [u8], pos: usize) -> CifsResult<()> {
    check_bounds(buf, pos, 4)?;
    buf[pos..pos + 4].copy_from_slice(&val.to_be_bytes());
    Ok(())
}

/// Unpack a 32-bit integer stored in Intel (little-endian) byte order.
pub fn get_intel_int(buf: &[u8], pos: usize) -> CifsResult<u32> {
    check_bounds(buf, pos, 4)?;
    Ok(u32::from_le_bytes([
        buf[pos],
        buf[pos + 1],
        buf[pos + 2],
        buf[pos + 3],
    ]))
}

/// Pack a 32-bit integer in Intel (little-endian) byte order.
pub fn put_intel_int(val: u32, buf: &mut [u8], pos: usize) -> CifsResult<()> {
    check_bounds(buf, pos, 4)?;
    buf[pos..pos + 4].copy_from_slice(&val.to_le_bytes());
    Ok(())
}

/// Unpack a 64-bit integer in network (big-endian) byte order.
pub fn get_long(buf: &[u8], pos: usize) -> CifsResult<u64> {
    check_bounds(buf, pos, 8)?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[pos..pos + 8]);
    Ok(u64::from_be_bytes(bytes))
}

/// Pack a 64-bit integer in network (big-endian) byte order.
pub fn put_long(val: u64, buf: &mut [u8], pos: usize) -> CifsResult<()> {
    check_bounds(buf, pos, 8)?;
    buf[pos..pos + 8].copy_from_slice(&val.to_be_bytes());
    Ok(())
}

/// Unpack a 64-bit integer stored in Intel (little-endian) byte order.
pub fn get_intel_long(buf: &[u8], pos: usize) -> CifsResult<u64> {
    check_bounds(buf, pos, 8)?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[pos..pos + 8]);
    Ok(u64::from_le_bytes(bytes))
}

/// Pack a 64-bit integer in Intel (little-endian) byte order.
pub fn put_intel_long(val: u64, buf: &mut [u8], pos: usize) -> CifsResult<()> {
    check_bounds(buf, pos, 8)?;
    buf[pos..pos + 8].copy_from_slice(&val.to_le_bytes());
    Ok(())
}

/// Pack a 32-bit integer into an 8-byte Intel order field, zero extending
/// the high four bytes.
pub fn put_intel_long_int(val: u32, buf: &mut [u8], pos: usize) -> CifsResult<()> {
    put_intel_long(u64::from(val), buf, pos)
}

/// Unpack a 16-bit value using the host platform's native byte order.
///
/// This is the only order-adaptive accessor: on a big-endian host the byte
/// at `pos` is the most significant, on a little-endian host the byte at
/// `pos + 1` is. Use [`get_intel_short`] for a format-fixed order.
pub fn get_short(buf: &[u8], pos: usize) -> CifsResult<u16> {
    check_bounds(buf, pos, 2)?;
    let bytes = [buf[pos], buf[pos + 1]];
    if is_big_endian() {
        Ok(u16::from_be_bytes(bytes))
    } else {
        Ok(u16::from_le_bytes(bytes))
    }
}

/// Pack a 16-bit value using the host platform's native byte order.
///
/// The counterpart of [`get_short`]; the pair round-trips on any host.
pub fn put_short(val: u16, buf: &mut [u8], pos: usize) -> CifsResult<()> {
    check_bounds(buf, pos, 2)?;
    let bytes = if is_big_endian() {
        val.to_be_bytes()
    } else {
        val.to_le_bytes()
    };
    buf[pos..pos + 2].copy_from_slice(&bytes);
    Ok(())
}

/// Unpack a 16-bit value stored in Intel (little-endian) byte order.
pub fn get_intel_short(buf: &[u8], pos: usize) -> CifsResult<u16> {
    check_bounds(buf, pos, 2)?;
    Ok(u16::from_le_bytes([buf[pos], buf[pos + 1]]))
}

/// Pack a 16-bit value in Intel (little-endian) byte order.
pub fn put_intel_short(val: u16, buf: &mut [u8], pos: usize) -> CifsResult<()> {
    check_bounds(buf, pos, 2)?;
    buf[pos..pos + 2].copy_from_slice(&val.to_le_bytes());
    Ok(())
}

/// Unpack a null terminated ASCII string from the buffer.
///
/// Scans forward from `pos` for a zero byte, looking at no more than
/// `maxlen` bytes and never past the end of the buffer.
///
/// # Returns
/// The text before the terminator, or `None` if no terminator was found
/// within the bound. A missing terminator is an absent value, not an error,
/// and never yields truncated text.
pub fn get_string(buf: &[u8], pos: usize, maxlen: usize) -> Option<String> {
    if pos > buf.len() {
        return None;
    }
    let limit = buf.len().min(pos.saturating_add(maxlen));
    buf[pos..limit]
        .iter()
        .position(|&b| b == 0)
        .map(|end| String::from_utf8_lossy(&buf[pos..pos + end]).into_owned())
}

/// Unpack a null terminated UTF-16LE string from the buffer.
///
/// Characters are reconstructed little-endian, low byte first, two bytes
/// per unit. `maxlen` is counted in 16-bit units, and the terminator is a
/// zero unit (two zero bytes).
///
/// # Returns
/// The text before the terminator, or `None` if no terminator was found
/// within the bound. Invalid UTF-16 is decoded lossily.
pub fn get_unicode_string(buf: &[u8], pos: usize, maxlen: usize) -> Option<String> {
    if maxlen == 0 {
        return Some(String::new());
    }

    let limit = pos.saturating_add(maxlen.saturating_mul(2)).min(buf.len());
    let mut units = Vec::new();
    let mut cur = pos;

    while cur.saturating_add(2) <= limit {
        let unit = u16::from_le_bytes([buf[cur], buf[cur + 1]]);
        cur += 2;
        if unit == 0 {
            return Some(String::from_utf16_lossy(&units));
        }
        units.push(unit);
    }

    // Ran out of units without finding a terminator
    None
}

/// Unpack a null terminated string that may be ASCII or Unicode.
pub fn get_string_encoded(buf: &[u8], pos: usize, maxlen: usize, unicode: bool) -> Option<String> {
    if unicode {
        get_unicode_string(buf, pos, maxlen)
    } else {
        get_string(buf, pos, maxlen)
    }
}

/// Unpack a typed, null terminated data string from the buffer.
///
/// The byte at `pos` must equal the expected data type tag `typ`; the
/// string value follows it. The Unicode path word-aligns the position
/// before decoding and treats `maxlen` as a byte count.
///
/// # Returns
/// The decoded string, or `None` if the type tag does not match or the
/// terminator was not found within the bound.
pub fn get_data_string(
    typ: u8,
    buf: &[u8],
    pos: usize,
    maxlen: usize,
    unicode: bool,
) -> Option<String> {
    if pos >= buf.len() || buf[pos] != typ {
        return None;
    }

    let pos = pos + 1;
    if unicode {
        get_unicode_string(buf, word_align(pos), maxlen / 2)
    } else {
        get_string(buf, pos, maxlen.saturating_sub(1))
    }
}

/// Pack an ASCII string into the buffer, optionally null terminated.
///
/// # Returns
/// The next free buffer position after the packed string.
///
/// # Error Handling
/// Returns a bounds error before any byte is written if the string and
/// terminator do not fit at `pos`.
pub fn put_string(s: &str, buf: &mut [u8], pos: usize, null_terminate: bool) -> CifsResult<usize> {
    let bytes = s.as_bytes();
    check_bounds(buf, pos, bytes.len() + usize::from(null_terminate))?;

    buf[pos..pos + bytes.len()].copy_from_slice(bytes);
    let mut end = pos + bytes.len();

    if null_terminate {
        buf[end] = 0;
        end += 1;
    }

    Ok(end)
}

/// Pack an ASCII string into a fixed length field, zero padded if the
/// string is short and truncated if it is long.
///
/// # Returns
/// The next free buffer position, always `pos + field_len`.
pub fn put_fixed_string(s: &str, field_len: usize, buf: &mut [u8], pos: usize) -> CifsResult<usize> {
    check_bounds(buf, pos, field_len)?;

    let bytes = s.as_bytes();
    for idx in 0..field_len {
        buf[pos + idx] = if idx < bytes.len() { bytes[idx] } else { 0 };
    }

    Ok(pos + field_len)
}

/// Pack a string that may be ASCII or Unicode into the buffer.
pub fn put_string_encoded(
    s: &str,
    buf: &mut [u8],
    pos: usize,
    null_terminate: bool,
    unicode: bool,
) -> CifsResult<usize> {
    if unicode {
        put_unicode_string(s, buf, pos, null_terminate)
    } else {
        put_string(s, buf, pos, null_terminate)
    }
}

/// Pack a UTF-16LE string into the buffer, optionally terminated with a
/// zero unit.
///
/// Each character is written as two bytes, low byte first.
///
/// # Returns
/// The next free buffer position after the packed string.
pub fn put_unicode_string(
    s: &str,
    buf: &mut [u8],
    pos: usize,
    null_terminate: bool,
) -> CifsResult<usize> {
    check_bounds(buf, pos, string_length(s, true, null_terminate))?;

    let mut cur = pos;
    for unit in s.encode_utf16() {
        let bytes = unit.to_le_bytes();
        buf[cur] = bytes[0];
        buf[cur + 1] = bytes[1];
        cur += 2;
    }

    if null_terminate {
        buf[cur] = 0;
        buf[cur + 1] = 0;
        cur += 2;
    }

    Ok(cur)
}

/// Fill `cnt` bytes of the buffer with zeros.
///
/// # Error Handling
/// Returns a bounds error before any byte is written if the region exceeds
/// the buffer length.
pub fn put_zeros(buf: &mut [u8], pos: usize, cnt: usize) -> CifsResult<()> {
    check_bounds(buf, pos, cnt)?;
    buf[pos..pos + cnt].fill(0);
    Ok(())
}

/// Align a buffer offset on a word (2 byte) boundary.
pub const fn word_align(pos: usize) -> usize {
    (pos + 1) & !1
}

/// Align a buffer offset on a longword (4 byte) boundary.
pub const fn longword_align(pos: usize) -> usize {
    (pos + 3) & !3
}

/// Calculate the packed length of a string in bytes.
///
/// The character count is the number of UTF-16 code units when `unicode`
/// (consistent with how [`put_unicode_string`] iterates the string), else
/// the byte length. Null termination adds one character, Unicode doubles
/// the total.
pub fn string_length(s: &str, unicode: bool, null_terminated: bool) -> usize {
    let mut len = if unicode {
        s.encode_utf16().count()
    } else {
        s.len()
    };
    if null_terminated {
        len += 1;
    }
    if unicode {
        len *= 2;
    }
    len
}

/// Calculate the buffer position after packing the specified string.
pub fn buffer_position(pos: usize, s: &str, unicode: bool, null_terminated: bool) -> usize {
    pos + string_length(s, unicode, null_terminated)
}
