//! ASN.1 DER tag-length-value codec
//!
//! Security negotiation blobs travel as trees of DER objects. The codec is
//! built from three pieces: the tag constant and classification table
//! ([`types`]), the cursor-based pack/unpack buffer ([`DerBuffer`]) and the
//! polymorphic object model ([`DerObject`] plus one concrete variant per
//! supported universal type).

pub mod buffer;
pub mod bytes;
pub mod object;
pub mod scalar;
pub mod sequence;
pub mod strings;
pub mod types;

pub use buffer::DerBuffer;
pub use bytes::{DerBitString, DerObjectIdentifier, DerOctetString};
pub use object::{DerObject, decode_object, object_for_type};
pub use scalar::{DerBoolean, DerEnumerated, DerInteger, DerNull};
pub use sequence::DerSequence;
pub use strings::{DerGeneralString, DerGeneralizedTime, DerPrintableString, DerUtf8String};
