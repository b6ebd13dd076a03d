//! Core types and wire packing utilities for the CIFS codec
//!
//! This crate provides the error type shared across the codec layer and
//! the primitive packer used to read and write flat protocol fields.

pub mod error;
pub mod packer;

pub use error::{CifsError, CifsResult};
