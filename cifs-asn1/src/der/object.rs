//! Polymorphic DER object model
//!
//! Every concrete DER type implements [`DerObject`]: it knows its own tag
//! byte and how its value bytes map to and from a typed value. Decoding of
//! constructed types dispatches child tags through a registry keyed by the
//! universal type number, so adding a variant means adding one registry
//! entry rather than editing the constructed-type decoders.

use std::collections::HashMap;
use std::fmt;

use cifs_core::{CifsError, CifsResult};
use once_cell::sync::Lazy;

use crate::der::buffer::DerBuffer;
use crate::der::bytes::{DerBitString, DerObjectIdentifier, DerOctetString};
use crate::der::scalar::{DerBoolean, DerEnumerated, DerInteger, DerNull};
use crate::der::sequence::DerSequence;
use crate::der::strings::{
    DerGeneralString, DerGeneralizedTime, DerPrintableString, DerUtf8String,
};
use crate::der::types;

/// A DER encodable/decodable object.
///
/// Objects are single-assignment: an instance is either constructed empty
/// and filled by [`der_decode`](DerObject::der_decode), or constructed with
/// a value and serialized by [`der_encode`](DerObject::der_encode). There
/// is no reuse contract across multiple decode calls, and a single
/// instance must not be shared between concurrent callers.
pub trait DerObject: fmt::Debug + fmt::Display {
    /// Decode the object from the buffer.
    ///
    /// The tag byte read from the buffer must match this variant's tag; a
    /// mismatch fails with [`CifsError::TypeMismatch`] and leaves the
    /// object's value untouched.
    fn der_decode(&mut self, buf: &mut DerBuffer) -> CifsResult<()>;

    /// Encode the object into the buffer.
    ///
    /// Writes exactly the tag byte that decode checks, then the value
    /// length and bytes. An absent value is written as a zero length with
    /// no value bytes.
    fn der_encode(&self, buf: &mut DerBuffer) -> CifsResult<()>;
}

type Constructor = fn() -> Box<dyn DerObject>;

/// Universal type number to empty-object constructor.
static DECODE_REGISTRY: Lazy<HashMap<u8, Constructor>> = Lazy::new(|| {
    let mut registry: HashMap<u8, Constructor> = HashMap::new();
    registry.insert(types::BOOLEAN, || Box::new(DerBoolean::new()));
    registry.insert(types::INTEGER, || Box::new(DerInteger::new()));
    registry.insert(types::BIT_STRING, || Box::new(DerBitString::new()));
    registry.insert(types::OCTET_STRING, || Box::new(DerOctetString::new()));
    registry.insert(types::NULL, || Box::new(DerNull::new()));
    registry.insert(types::OBJECT_IDENTIFIER, || {
        Box::new(DerObjectIdentifier::new())
    });
    registry.insert(types::ENUMERATED, || Box::new(DerEnumerated::new()));
    registry.insert(types::UTF8_STRING, || Box::new(DerUtf8String::new()));
    registry.insert(types::SEQUENCE, || Box::new(DerSequence::new()));
    registry.insert(types::PRINTABLE_STRING, || {
        Box::new(DerPrintableString::new())
    });
    registry.insert(types::GENERALIZED_TIME, || {
        Box::new(DerGeneralizedTime::new())
    });
    registry.insert(types::GENERAL_STRING, || Box::new(DerGeneralString::new()));
    registry
});

/// Create an empty object for a universal type number, if one is
/// registered.
pub fn object_for_type(typ: u8) -> Option<Box<dyn DerObject>> {
    DECODE_REGISTRY.get(&typ).map(|ctor| ctor())
}

/// Decode the next object from the buffer, dispatching on its tag byte.
///
/// # Error Handling
/// Fails with [`CifsError::InvalidData`] if no variant is registered for
/// the observed type number; decode errors from the variant propagate
/// unchanged.
pub fn decode_object(buf: &mut DerBuffer) -> CifsResult<Box<dyn DerObject>> {
    let tag = buf.peek_type()?;
    let typ = types::type_of(tag);
    log::trace!(
        "decoding DER object, tag 0x{:02X} ({})",
        tag,
        types::type_name(typ)
    );

    let mut obj = object_for_type(typ).ok_or_else(|| {
        CifsError::InvalidData(format!(
            "no DER decoder registered for {}",
            types::type_name(typ)
        ))
    })?;
    obj.der_decode(buf)?;
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert!(object_for_type(types::GENERAL_STRING).is_some());
        assert!(object_for_type(types::SEQUENCE).is_some());
        // External is part of the tag table but carries no decoder
        assert!(object_for_type(types::EXTERNAL).is_none());
    }

    #[test]
    fn test_decode_object_dispatches_on_tag() {
        let mut buf = DerBuffer::new();
        DerGeneralString::with_value("krb5").der_encode(&mut buf).unwrap();

        let obj = decode_object(&mut buf).unwrap();
        assert_eq!(obj.to_string(), "[GeneralString:krb5]");
    }

    #[test]
    fn test_decode_object_unknown_type() {
        let mut buf = DerBuffer::from_bytes(&[types::EXTERNAL, 0x00]);
        assert!(matches!(
            decode_object(&mut buf),
            Err(CifsError::InvalidData(_))
        ));
    }
}
