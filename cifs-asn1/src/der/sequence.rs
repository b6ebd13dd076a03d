//! Constructed Sequence DER variant
//!
//! A Sequence holds an ordered list of child DER objects. Encoding is
//! two-pass: the children are encoded into a scratch buffer first so the
//! parent length is known before the tag, length and child bytes are
//! written out. Decoding walks the value region and dispatches each child
//! tag through the decode registry, so the Sequence itself never names the
//! concrete variants it can contain.

use std::fmt;

use cifs_core::{CifsError, CifsResult};

use crate::der::buffer::DerBuffer;
use crate::der::object::{DerObject, decode_object};
use crate::der::types;

/// DER Sequence (constructed)
#[derive(Debug, Default)]
pub struct DerSequence {
    objects: Vec<Box<dyn DerObject>>,
}

impl DerSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Append a child object.
    pub fn push(&mut self, obj: Box<dyn DerObject>) {
        self.objects.push(obj);
    }

    /// The child objects in order.
    pub fn objects(&self) -> &[Box<dyn DerObject>] {
        &self.objects
    }

    /// Number of child objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the sequence has no children.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// The tag a sequence carries on the wire: type number plus constructed
/// flag.
const SEQUENCE_TAG: u8 = types::SEQUENCE | types::CONSTRUCTED;

impl DerObject for DerSequence {
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()> {
        let tag = buf.unpack_type()?;
        if tag != SEQUENCE_TAG {
            return Err(CifsError::TypeMismatch(format!(
                "expected constructed Sequence, got {}",
                types::type_name(types::type_of(tag))
            )));
        }

        let len = buf.unpack_length()?;
        let body = buf.unpack_bytes(len)?;

        // Walk the value region; each child consumes exactly one TLV
        let mut inner = DerBuffer::from_bytes(&body);
        let mut objects = Vec::new();
        while inner.has_remaining() {
            objects.push(decode_object(&mut inner)?);
        }

        self.objects = objects;
        Ok(())
    }

    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()> {
        // First pass: encode the children so the combined length is known
        let mut scratch = DerBuffer::new();
        for obj in &self.objects {
            obj.der_encode(&mut scratch)?;
        }

        buf.pack_byte(SEQUENCE_TAG);
        buf.pack_length(scratch.len());
        buf.pack_bytes(scratch.as_bytes());
        Ok(())
    }
}

impl fmt::Display for DerSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Sequence:{} objects]", self.objects.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::bytes::DerOctetString;
    use crate::der::scalar::DerInteger;
    use crate::der::strings::DerGeneralString;

    #[test]
    fn test_sequence_round_trip() {
        let mut seq = DerSequence::new();
        seq.push(Box::new(DerInteger::with_value(5)));
        seq.push(Box::new(DerGeneralString::with_value("cifs")));
        seq.push(Box::new(DerOctetString::with_value(&b"\x01\x02"[..])));

        let mut buf = DerBuffer::new();
        seq.der_encode(&mut buf).unwrap();
        assert_eq!(buf.as_bytes()[0], 0x30);

        let mut decoded = DerSequence::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded.objects()[0].to_string(), "[Integer:5]");
        assert_eq!(decoded.objects()[1].to_string(), "[GeneralString:cifs]");
    }

    #[test]
    fn test_nested_sequence_round_trip() {
        let mut inner = DerSequence::new();
        inner.push(Box::new(DerGeneralString::with_value("child")));

        let mut outer = DerSequence::new();
        outer.push(Box::new(inner));
        outer.push(Box::new(DerInteger::with_value(-42)));

        let mut buf = DerBuffer::new();
        outer.der_encode(&mut buf).unwrap();

        let mut decoded = DerSequence::new();
        decoded.der_decode(&mut buf).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.objects()[0].to_string(), "[Sequence:1 objects]");
    }

    #[test]
    fn test_sequence_tag_mismatch() {
        let mut buf = DerBuffer::new();
        DerGeneralString::with_value("x").der_encode(&mut buf).unwrap();

        let mut decoded = DerSequence::new();
        assert!(matches!(
            decoded.der_decode(&mut buf),
            Err(CifsError::TypeMismatch(_))
        ));
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_empty_sequence() {
        let mut buf = DerBuffer::new();
        DerSequence::new().der_encode(&mut buf).unwrap();
        assert_eq!(buf.as_bytes(), &[0x30, 0x00]);

        let mut decoded = DerSequence::new();
        decoded.der_decode(&mut buf).unwrap();
        assert!(decoded.is_empty());
    }
}
