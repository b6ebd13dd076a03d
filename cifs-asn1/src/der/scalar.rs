//! Scalar DER variants: Boolean, Integer, Enumerated and Null

use std::fmt;

use cifs_core::{CifsError, CifsResult};

use crate::der::buffer::DerBuffer;
use crate::der::object::DerObject;
use crate::der::types;

/// Check the unpacked tag against the variant's expected tag.
///
/// Shared by every primitive variant so a mismatch is reported before any
/// value state is touched.
pub(crate) fn expect_tag(buf: &mut DerBuffer, expected: u8) -> CifsResult<()> {
    let tag = buf.unpack_type()?;
    if tag != expected {
        return Err(CifsError::TypeMismatch(format!(
            "expected {}, got {}",
            types::type_name(types::type_of(expected)),
            types::type_name(types::type_of(tag))
        )));
    }
    Ok(())
}

/// Encode an i64 as a minimal big-endian two's complement byte string.
///
/// DER requires the shortest representation that preserves the sign bit:
/// 127 encodes as one byte 0x7F, 128 as 0x00 0x80, -129 as 0xFF 0x7F.
pub(crate) fn encode_integer_bytes(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();

    // Strip redundant leading bytes while the sign bit stays intact
    let mut start = 0;
    while start < 7 {
        let cur = bytes[start];
        let next = bytes[start + 1];
        let redundant = (cur == 0x00 && next & 0x80 == 0) || (cur == 0xFF && next & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }

    bytes[start..].to_vec()
}

/// Decode a big-endian two's complement byte string into an i64.
pub(crate) fn decode_integer_bytes(bytes: &[u8]) -> CifsResult<i64> {
    if bytes.is_empty() {
        return Err(CifsError::InvalidData("empty integer encoding".to_string()));
    }
    if bytes.len() > 8 {
        return Err(CifsError::InvalidData(format!(
            "integer value too large: {} bytes (max 8)",
            bytes.len()
        )));
    }

    let mut value: i64 = if bytes[0] & 0x80 != 0 { -1 } else { 0 };
    for &byte in bytes {
        value = (value << 8) | i64::from(byte);
    }
    Ok(value)
}

/// DER Boolean
#[derive(Debug, Default)]
pub struct DerBoolean {
    value: Option<bool>,
}

impl DerBoolean {
    /// Create an empty object to be filled by decode.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Create an object holding a value, ready to encode.
    pub fn with_value(value: bool) -> Self {
        Self { value: Some(value) }
    }

    /// Return the boolean value, if present.
    pub fn value(&self) -> Option<bool> {
        self.value
    }
}

impl DerObject for DerBoolean {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::BOOLEAN)?;

        let len = buf.unpack_length()?;
        match len {
            0 => self.value = None,
            1 => self.value = Some(buf.unpack_byte()? != 0),
            _ => {
                return Err(CifsError::InvalidData(format!(
                    "Boolean value length {} (expected 1)",
                    len
                )));
            }
        }
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::BOOLEAN);

        match self.value {
            Some(value) => {
                buf.pack_length(1);
                buf.pack_byte(if value { 0xFF } else { 0x00 });
            }
            None => buf.pack_length(0),
        }
        Ok(())
    }
}

impl fmt::Display for DerBoolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "[Boolean:{}]", value),
            None => write!(f, "[Boolean:]"),
        }
    }
}

/// DER Integer
///
/// The wire form is the minimal big-endian two's complement byte string;
/// values wider than 64 bits are rejected on decode.
#[derive(Debug, Default)]
pub struct DerInteger {
    value: Option<i64>,
}

impl DerInteger {
    /// Create an empty object to be filled by decode.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Create an object holding a value, ready to encode.
    pub fn with_value(value: i64) -> Self {
        Self { value: Some(value) }
    }

    /// Return the integer value, if present.
    pub fn value(&self) -> Option<i64> {
        self.value
    }
}

impl DerObject for DerInteger {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::INTEGER)?;

        let len = buf.unpack_length()?;
        if len > 0 {
            let bytes = buf.unpack_bytes(len)?;
            self.value = Some(decode_integer_bytes(&bytes)?);
        } else {
            self.value = None;
        }
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::INTEGER);

        match self.value {
            Some(value) => {
                let bytes = encode_integer_bytes(value);
                buf.pack_length(bytes.len());
                buf.pack_bytes(&bytes);
            }
            None => buf.pack_length(0),
        }
        Ok(())
    }
}

impl fmt::Display for DerInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "[Integer:{}]", value),
            None => write!(f, "[Integer:]"),
        }
    }
}

/// DER Enumerated
///
/// Same value encoding as [`DerInteger`] under the Enumerated tag.
#[derive(Debug, Default)]
pub struct DerEnumerated {
    value: Option<i64>,
}

impl DerEnumerated {
    pub fn new() -> Self {
        Self { value: None }
    }

    pub fn with_value(value: i64) -> Self {
        Self { value: Some(value) }
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }
}

impl DerObject for DerEnumerated {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::ENUMERATED)?;

        let len = buf.unpack_length()?;
        if len > 0 {
            let bytes = buf.unpack_bytes(len)?;
            self.value = Some(decode_integer_bytes(&bytes)?);
        } else {
            self.value = None;
        }
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::ENUMERATED);

        match self.value {
            Some(value) => {
                let bytes = encode_integer_bytes(value);
                buf.pack_length(bytes.len());
                buf.pack_bytes(&bytes);
            }
            None => buf.pack_length(0),
        }
        Ok(())
    }
}

impl fmt::Display for DerEnumerated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "[Enumerated:{}]", value),
            None => write!(f, "[Enumerated:]"),
        }
    }
}

/// DER Null
///
/// Carries no value; the wire form is always the tag followed by a zero
/// length.
#[derive(Debug, Default)]
pub struct DerNull;

impl DerNull {
    pub fn new() -> Self {
        Self
    }
}

impl DerObject for DerNull {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::NULL)?;

        let len = buf.unpack_length()?;
        if len != 0 {
            return Err(CifsError::InvalidData(format!(
                "Null value length {} (expected 0)",
                len
            )));
        }
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::NULL);
        buf.pack_length(0);
        Ok(())
    }
}

impl fmt::Display for DerNull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Null]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_minimal_encoding() {
        assert_eq!(encode_integer_bytes(0), vec![0x00]);
        assert_eq!(encode_integer_bytes(127), vec![0x7F]);
        assert_eq!(encode_integer_bytes(128), vec![0x00, 0x80]);
        assert_eq!(encode_integer_bytes(-1), vec![0xFF]);
        assert_eq!(encode_integer_bytes(-128), vec![0x80]);
        assert_eq!(encode_integer_bytes(-129), vec![0xFF, 0x7F]);
    }

    #[test]
    fn test_integer_round_trip() {
        for value in [0i64, 1, -1, 127, 128, -128, -129, 0x1234_5678, i64::MIN, i64::MAX] {
            let mut buf = DerBuffer::new();
            DerInteger::with_value(value).der_encode(&mut buf).unwrap();

            let mut decoded = DerInteger::new();
            decoded.der_decode(&mut buf).unwrap();
            assert_eq!(decoded.value(), Some(value));
        }
    }

    #[test]
    fn test_boolean_round_trip() {
        let mut buf = DerBuffer::new();
        DerBoolean::with_value(true).der_encode(&mut buf).unwrap();
        assert_eq!(buf.as_bytes(), &[0x01, 0x01, 0xFF]);

        let mut decoded = DerBoolean::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.value(), Some(true));
    }

    #[test]
    fn test_null_wire_form() {
        let mut buf = DerBuffer::new();
        DerNull::new().der_encode(&mut buf).unwrap();
        assert_eq!(buf.as_bytes(), &[0x05, 0x00]);

        let mut decoded = DerNull::new();
        decoded.der_decode(&mut buf).unwrap();
    }

    #[test]
    fn test_display_renders_bare_value() {
        assert_eq!(DerInteger::with_value(5).to_string(), "[Integer:5]");
        assert_eq!(DerInteger::new().to_string(), "[Integer:]");
        assert_eq!(DerBoolean::with_value(true).to_string(), "[Boolean:true]");
        assert_eq!(DerEnumerated::with_value(2).to_string(), "[Enumerated:2]");
    }

    #[test]
    fn test_integer_tag_mismatch() {
        let mut buf = DerBuffer::new();
        DerBoolean::with_value(false).der_encode(&mut buf).unwrap();

        let mut decoded = DerInteger::new();
        assert!(matches!(
            decoded.der_decode(&mut buf),
            Err(CifsError::TypeMismatch(_))
        ));
        assert_eq!(decoded.value(), None);
    }
}
