//! String-family DER variants
//!
//! GeneralString, UTF8String, PrintableString and GeneralizedTime all share
//! the same value shape: an optional text string carried as raw bytes under
//! the variant's own tag. These are the types that appear in CIFS security
//! negotiation blobs (Kerberos principal names, mechanism lists and
//! timestamps).
//!
//! A present value of length zero is written as a zero length TLV, which on
//! decode yields an **absent** value rather than an empty string. The
//! asymmetry is deliberate and matches the wire behaviour this codec must
//! interoperate with; callers that need to distinguish the two cases cannot,
//! and should treat "absent" as "no value extracted".

use std::fmt;

use cifs_core::CifsResult;

use crate::der::buffer::DerBuffer;
use crate::der::object::DerObject;
use crate::der::scalar::expect_tag;
use crate::der::types;

/// Decode the length and value bytes of a string variant.
///
/// The caller has already consumed and checked the tag. Zero length decodes
/// to `None`.
fn decode_string_value(buf: &mut DerBuffer) -> CifsResult<Option<String>> {
    let len = buf.unpack_length()?;
    if len == 0 {
        return Ok(None);
    }
    let bytes = buf.unpack_bytes(len)?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Encode the length and value bytes of a string variant.
///
/// The caller has already packed the tag. An absent value packs as a zero
/// length with no value bytes.
fn encode_string_value(buf: &mut DerBuffer, value: Option<&str>) {
    match value {
        Some(s) => {
            let bytes = s.as_bytes();
            buf.pack_length(bytes.len());
            buf.pack_bytes(bytes);
        }
        None => buf.pack_length(0),
    }
}

/// DER GeneralString
#[derive(Debug, Default)]
pub struct DerGeneralString {
    value: Option<String>,
}

impl DerGeneralString {
    /// Create an empty object to be filled by decode.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Create an object holding a value, ready to encode.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// Return the string value, if present.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl DerObject for DerGeneralString {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::GENERAL_STRING)?;
        self.value = decode_string_value(buf)?;
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::GENERAL_STRING);
        encode_string_value(buf, self.value.as_deref());
        Ok(())
    }
}

impl fmt::Display for DerGeneralString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[GeneralString:{}]", self.value.as_deref().unwrap_or(""))
    }
}

/// DER UTF8String
#[derive(Debug, Default)]
pub struct DerUtf8String {
    value: Option<String>,
}

impl DerUtf8String {
    pub fn new() -> Self {
        Self { value: None }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl DerObject for DerUtf8String {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::UTF8_STRING)?;
        self.value = decode_string_value(buf)?;
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::UTF8_STRING);
        encode_string_value(buf, self.value.as_deref());
        Ok(())
    }
}

impl fmt::Display for DerUtf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[UTF8String:{}]", self.value.as_deref().unwrap_or(""))
    }
}

/// DER PrintableString
#[derive(Debug, Default)]
pub struct DerPrintableString {
    value: Option<String>,
}

impl DerPrintableString {
    pub fn new() -> Self {
        Self { value: None }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl DerObject for DerPrintableString {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::PRINTABLE_STRING)?;
        self.value = decode_string_value(buf)?;
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::PRINTABLE_STRING);
        encode_string_value(buf, self.value.as_deref());
        Ok(())
    }
}

impl fmt::Display for DerPrintableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[PrintableString:{}]",
            self.value.as_deref().unwrap_or("")
        )
    }
}

/// DER GeneralizedTime
///
/// The timestamp is carried as its textual wire form (`YYYYMMDDHHMMSSZ`);
/// this layer does not interpret it.
#[derive(Debug, Default)]
pub struct DerGeneralizedTime {
    value: Option<String>,
}

impl DerGeneralizedTime {
    pub fn new() -> Self {
        Self { value: None }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl DerObject for DerGeneralizedTime {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::GENERALIZED_TIME)?;
        self.value = decode_string_value(buf)?;
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::GENERALIZED_TIME);
        encode_string_value(buf, self.value.as_deref());
        Ok(())
    }
}

impl fmt::Display for DerGeneralizedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[GeneralizedTime:{}]",
            self.value.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cifs_core::CifsError;

    #[test]
    fn test_general_string_round_trip() {
        let mut buf = DerBuffer::new();
        DerGeneralString::with_value("hello")
            .der_encode(&mut buf)
            .unwrap();
        assert_eq!(buf.as_bytes(), &[0x1B, 0x05, b'h', b'e', b'l', b'l', b'o']);

        let mut decoded = DerGeneralString::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.value(), Some("hello"));
    }

    #[test]
    fn test_absent_value_round_trips_to_absent() {
        let mut buf = DerBuffer::new();
        DerGeneralString::new().der_encode(&mut buf).unwrap();
        assert_eq!(buf.as_bytes(), &[0x1B, 0x00]);

        let mut decoded = DerGeneralString::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.value(), None);
    }

    #[test]
    fn test_empty_string_decodes_as_absent() {
        // A present-but-empty value encodes as length zero, which decodes
        // back to absent. The asymmetry is part of the contract.
        let mut buf = DerBuffer::new();
        DerGeneralString::with_value("").der_encode(&mut buf).unwrap();
        assert_eq!(buf.as_bytes(), &[0x1B, 0x00]);

        let mut decoded = DerGeneralString::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.value(), None);
    }

    #[test]
    fn test_tag_mismatch_leaves_value_untouched() {
        let mut buf = DerBuffer::new();
        DerUtf8String::with_value("nope").der_encode(&mut buf).unwrap();

        let mut decoded = DerGeneralString::new();
        assert!(matches!(
            decoded.der_decode(&mut buf),
            Err(CifsError::TypeMismatch(_))
        ));
        assert_eq!(decoded.value(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DerGeneralString::with_value("krbtgt").to_string(),
            "[GeneralString:krbtgt]"
        );
        assert_eq!(
            DerGeneralizedTime::with_value("20260824120000Z").to_string(),
            "[GeneralizedTime:20260824120000Z]"
        );
    }
}
