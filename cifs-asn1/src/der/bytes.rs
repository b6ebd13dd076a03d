//! Byte-oriented DER variants: OctetString, BitString and ObjectIdentifier

use std::fmt;

use cifs_core::{CifsError, CifsResult};

use crate::der::buffer::DerBuffer;
use crate::der::object::DerObject;
use crate::der::scalar::expect_tag;
use crate::der::types;

/// DER OctetString
///
/// The workhorse variant for security blobs: mechanism tokens and response
/// buffers travel as opaque octet strings.
#[derive(Debug, Default)]
pub struct DerOctetString {
    value: Option<Vec<u8>>,
}

impl DerOctetString {
    /// Create an empty object to be filled by decode.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Create an object holding a value, ready to encode.
    pub fn with_value(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// Return the octet string bytes, if present.
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }
}

impl DerObject for DerOctetString {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::OCTET_STRING)?;

        let len = buf.unpack_length()?;
        if len > 0 {
            self.value = Some(buf.unpack_bytes(len)?);
        } else {
            self.value = None;
        }
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::OCTET_STRING);

        match &self.value {
            Some(bytes) => {
                buf.pack_length(bytes.len());
                buf.pack_bytes(bytes);
            }
            None => buf.pack_length(0),
        }
        Ok(())
    }
}

impl fmt::Display for DerOctetString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(bytes) => write!(f, "[OctetString:{} bytes]", bytes.len()),
            None => write!(f, "[OctetString:]"),
        }
    }
}

/// DER BitString
///
/// The value bytes are preceded on the wire by one byte giving the count
/// of unused bits in the final byte (0-7).
#[derive(Debug, Default)]
pub struct DerBitString {
    value: Option<Vec<u8>>,
    unused_bits: u8,
}

impl DerBitString {
    pub fn new() -> Self {
        Self {
            value: None,
            unused_bits: 0,
        }
    }

    pub fn with_value(value: impl Into<Vec<u8>>, unused_bits: u8) -> Self {
        Self {
            value: Some(value.into()),
            unused_bits,
        }
    }

    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// Count of unused bits in the final byte.
    pub fn unused_bits(&self) -> u8 {
        self.unused_bits
    }
}

impl DerObject for DerBitString {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::BIT_STRING)?;

        let len = buf.unpack_length()?;
        if len == 0 {
            self.value = None;
            self.unused_bits = 0;
            return Ok(());
        }

        let unused = buf.unpack_byte()?;
        if unused > 7 {
            return Err(CifsError::InvalidData(format!(
                "invalid unused bit count {} (must be 0-7)",
                unused
            )));
        }

        self.value = Some(buf.unpack_bytes(len - 1)?);
        self.unused_bits = unused;
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::BIT_STRING);

        match &self.value {
            Some(bytes) => {
                buf.pack_length(bytes.len() + 1);
                buf.pack_byte(self.unused_bits);
                buf.pack_bytes(bytes);
            }
            None => buf.pack_length(0),
        }
        Ok(())
    }
}

impl fmt::Display for DerBitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(bytes) => write!(
                f,
                "[BitString:{} bits]",
                bytes.len() * 8 - self.unused_bits as usize
            ),
            None => write!(f, "[BitString:]"),
        }
    }
}

/// Append one component in base-128, continuation bit set on all but the
/// last byte.
fn push_base128(bytes: &mut Vec<u8>, component: u32) {
    let mut stack = Vec::new();
    let mut temp = component;
    loop {
        stack.push((temp & 0x7F) as u8);
        temp >>= 7;
        if temp == 0 {
            break;
        }
    }
    while let Some(byte) = stack.pop() {
        if stack.is_empty() {
            bytes.push(byte);
        } else {
            bytes.push(byte | 0x80);
        }
    }
}

/// DER ObjectIdentifier
///
/// Components are held decoded; the wire form folds the first two
/// components into a single `40*X + Y` head and packs every component
/// base-128 with continuation bits.
#[derive(Debug, Default)]
pub struct DerObjectIdentifier {
    value: Option<Vec<u32>>,
}

impl DerObjectIdentifier {
    pub fn new() -> Self {
        Self { value: None }
    }

    pub fn with_value(value: impl Into<Vec<u32>>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn value(&self) -> Option<&[u32]> {
        self.value.as_deref()
    }
}

impl DerObject for DerObjectIdentifier {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        expect_tag(buf, types::OBJECT_IDENTIFIER)?;

        let len = buf.unpack_length()?;
        if len == 0 {
            self.value = None;
            return Ok(());
        }

        let bytes = buf.unpack_bytes(len)?;

        // Parse the base-128 components; the first one carries the
        // combined 40*X + Y head and is split afterwards
        let mut components = Vec::new();
        let mut component = 0u32;
        let mut pending = false;
        for &byte in &bytes {
            component = component
                .checked_mul(128)
                .and_then(|c| c.checked_add(u32::from(byte & 0x7F)))
                .ok_or_else(|| {
                    CifsError::InvalidData("object identifier component overflow".to_string())
                })?;
            if byte & 0x80 == 0 {
                components.push(component);
                component = 0;
                pending = false;
            } else {
                pending = true;
            }
        }

        if pending || components.is_empty() {
            return Err(CifsError::InvalidData(
                "truncated object identifier component".to_string(),
            ));
        }

        // Split the head: X is capped at 2, Y takes the remainder
        let head = components[0];
        let (first, second) = match head {
            0..=39 => (0, head),
            40..=79 => (1, head - 40),
            _ => (2, head - 80),
        };

        let mut oid = vec![first, second];
        oid.extend_from_slice(&components[1..]);
        self.value = Some(oid);
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        buf.pack_byte(types::OBJECT_IDENTIFIER);

        let Some(oid) = &self.value else {
            buf.pack_length(0);
            return Ok(());
        };

        if oid.len() < 2 {
            return Err(CifsError::InvalidData(
                "object identifier needs at least 2 components".to_string(),
            ));
        }

        // The first two components share one base-128 head of 40*X + Y
        let head = oid[0]
            .checked_mul(40)
            .and_then(|x| x.checked_add(oid[1]))
            .ok_or_else(|| {
                CifsError::InvalidData("object identifier component overflow".to_string())
            })?;

        let mut bytes = Vec::new();
        push_base128(&mut bytes, head);
        for &component in &oid[2..] {
            push_base128(&mut bytes, component);
        }

        buf.pack_length(bytes.len());
        buf.pack_bytes(&bytes);
        Ok(())
    }
}

impl fmt::Display for DerObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(oid) => {
                let dotted: Vec<String> = oid.iter().map(|c| c.to_string()).collect();
                write!(f, "[ObjectIdentifier:{}]", dotted.join("."))
            }
            None => write!(f, "[ObjectIdentifier:]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octet_string_round_trip() {
        let mut buf = DerBuffer::new();
        DerOctetString::with_value(&b"NTLMSSP"[..])
            .der_encode(&mut buf)
            .unwrap();
        assert_eq!(buf.as_bytes()[0], 0x04);

        let mut decoded = DerOctetString::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.value(), Some(&b"NTLMSSP"[..]));
    }

    #[test]
    fn test_bit_string_round_trip() {
        let mut buf = DerBuffer::new();
        DerBitString::with_value(vec![0b1010_0000], 5)
            .der_encode(&mut buf)
            .unwrap();
        assert_eq!(buf.as_bytes(), &[0x03, 0x02, 0x05, 0xA0]);

        let mut decoded = DerBitString::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.value(), Some(&[0xA0u8][..]));
        assert_eq!(decoded.unused_bits(), 5);
    }

    #[test]
    fn test_bit_string_invalid_unused_bits() {
        let mut buf = DerBuffer::from_bytes(&[0x03, 0x02, 0x08, 0xA0]);
        let mut decoded = DerBitString::new();
        assert!(matches!(
            decoded.der_decode(&mut buf),
            Err(CifsError::InvalidData(_))
        ));
    }

    #[test]
    fn test_oid_round_trip() {
        // SPNEGO mechanism OID 1.3.6.1.5.5.2
        let mut buf = DerBuffer::new();
        DerObjectIdentifier::with_value(vec![1, 3, 6, 1, 5, 5, 2])
            .der_encode(&mut buf)
            .unwrap();
        assert_eq!(buf.as_bytes(), &[0x06, 0x06, 0x2B, 0x06, 0x01, 0x05, 0x05, 0x02]);

        let mut decoded = DerObjectIdentifier::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.value(), Some(&[1u32, 3, 6, 1, 5, 5, 2][..]));
    }

    #[test]
    fn test_oid_large_head_round_trip() {
        // Reserved test arc: 40*2 + 999 = 1079 needs the multi-byte
        // base-128 head, not a single truncated byte
        let mut buf = DerBuffer::new();
        DerObjectIdentifier::with_value(vec![2, 999, 3])
            .der_encode(&mut buf)
            .unwrap();
        assert_eq!(buf.as_bytes(), &[0x06, 0x03, 0x88, 0x37, 0x03]);

        let mut decoded = DerObjectIdentifier::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.value(), Some(&[2u32, 999, 3][..]));
    }

    #[test]
    fn test_oid_head_overflow_rejected() {
        let mut buf = DerBuffer::new();
        assert!(matches!(
            DerObjectIdentifier::with_value(vec![u32::MAX, 1]).der_encode(&mut buf),
            Err(CifsError::InvalidData(_))
        ));
    }

    #[test]
    fn test_oid_multi_byte_component() {
        let mut buf = DerBuffer::new();
        DerObjectIdentifier::with_value(vec![1, 2, 840, 113549])
            .der_encode(&mut buf)
            .unwrap();

        let mut decoded = DerObjectIdentifier::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.value(), Some(&[1u32, 2, 840, 113549][..]));
        assert_eq!(decoded.to_string(), "[ObjectIdentifier:1.2.840.113549]");
    }
}
