//! ASN.1 DER processing for the CIFS codec
//!
//! This crate provides the DER (Distinguished Encoding Rules) codec used to
//! encode and decode authentication tokens such as security negotiation
//! blobs. A caller wraps a raw payload in a [`DerBuffer`] and decodes a
//! typed object tree from it, or builds objects and encodes them back to
//! wire bytes.

pub mod der;

pub use cifs_core::{CifsError, CifsResult};
pub use der::{
    DerBitString, DerBoolean, DerBuffer, DerEnumerated, DerGeneralString, DerGeneralizedTime,
    DerInteger, DerNull, DerObject, DerObjectIdentifier, DerOctetString, DerPrintableString,
    DerSequence, DerUtf8String, decode_object, object_for_type,
};
