//! CIFS wire-format codec layer
//!
//! This library is the binary codec underneath a CIFS/SMB file-sharing
//! protocol stack: the primitive packer that reads and writes flat protocol
//! fields, and the ASN.1 DER codec used for security negotiation blobs.
//!
//! # Architecture
//!
//! The workspace is organized as multiple crates:
//!
//! - `cifs-core`: Error handling and the primitive packer (fixed-width
//!   integers in network or Intel byte order, ASCII and UTF-16LE strings,
//!   alignment helpers)
//! - `cifs-asn1`: ASN.1 DER tag-length-value codec (tag classification,
//!   cursor buffer, polymorphic object model with one variant per
//!   supported universal type)
//!
//! Transport, session management and authentication decisions live in the
//! layers above; this library only converts between byte buffers and typed
//! values.
//!
//! # Usage
//!
//! ```no_run
//! use cifs::packer;
//! use cifs::asn1::{DerBuffer, DerGeneralString, DerObject};
//!
//! let mut field = [0u8; 4];
//! packer::put_int(0x12345678, &mut field, 0)?;
//!
//! let mut buf = DerBuffer::new();
//! DerGeneralString::with_value("krbtgt").der_encode(&mut buf)?;
//! # Ok::<(), cifs::CifsError>(())
//! ```

// Re-export core types
pub use cifs_core::{CifsError, CifsResult};
pub use cifs_core::packer;

// Re-export the DER codec
pub mod asn1 {
    pub use cifs_asn1::*;
}
