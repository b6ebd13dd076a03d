//! DER tag constants and classification helpers
//!
//! A DER tag byte is laid out as `class (2 bits) | constructed (1 bit) |
//! type number (5 bits)`. Under the Universal class the type number
//! identifies a standard ASN.1 type; under the other classes the low five
//! bits are a context- or application-specific tag number with no fixed
//! meaning at this layer.

// Universal object types

pub const BOOLEAN: u8 = 0x01;
pub const INTEGER: u8 = 0x02;
pub const BIT_STRING: u8 = 0x03;
pub const OCTET_STRING: u8 = 0x04;
pub const NULL: u8 = 0x05;
pub const OBJECT_IDENTIFIER: u8 = 0x06;
pub const EXTERNAL: u8 = 0x08;
pub const ENUMERATED: u8 = 0x0A;
pub const UTF8_STRING: u8 = 0x0C;
pub const SEQUENCE: u8 = 0x10;
pub const NUMERIC_STRING: u8 = 0x12;
pub const PRINTABLE_STRING: u8 = 0x13;
pub const GENERALIZED_TIME: u8 = 0x18;
pub const GENERAL_STRING: u8 = 0x1B;
pub const UNIVERSAL_STRING: u8 = 0x1C;

/// Mask for the 5-bit type number
pub const TYPE_MASK: u8 = 0x1F;

// Tag classes (top two bits)

pub const UNIVERSAL: u8 = 0x00;
pub const APPLICATION: u8 = 0x40;
pub const CONTEXT_SPECIFIC: u8 = 0x80;
pub const PRIVATE: u8 = 0xC0;

/// Constructed flag (bit 5)
pub const CONSTRUCTED: u8 = 0x20;

/// Tagged flag. Shares the same bit as [`CONTEXT_SPECIFIC`] by
/// construction; which semantic applies is decided by the caller from
/// context.
pub const TAGGED: u8 = 0x80;

/// Extract the type number from a tag byte.
pub const fn type_of(tag: u8) -> u8 {
    tag & TYPE_MASK
}

/// Check if a tag has the constructed flag set.
pub const fn is_constructed(tag: u8) -> bool {
    tag & CONSTRUCTED != 0
}

/// Check if a tag has the tagged flag set.
pub const fn is_tagged(tag: u8) -> bool {
    tag & TAGGED != 0
}

/// Check if a tag has the context-specific class bit set.
pub const fn is_context_specific(tag: u8) -> bool {
    tag & CONTEXT_SPECIFIC != 0
}

/// Check if a tag has the application class bit set.
pub const fn is_application_specific(tag: u8) -> bool {
    tag & APPLICATION != 0
}

/// Render a universal type number as a human readable name.
pub fn type_name(typ: u8) -> String {
    match typ {
        BOOLEAN => "Boolean".to_string(),
        INTEGER => "Integer".to_string(),
        BIT_STRING => "BitString".to_string(),
        OCTET_STRING => "OctetString".to_string(),
        NULL => "Null".to_string(),
        OBJECT_IDENTIFIER => "ObjectIdentifier".to_string(),
        EXTERNAL => "External".to_string(),
        ENUMERATED => "Enumerated".to_string(),
        UTF8_STRING => "UTF8String".to_string(),
        SEQUENCE => "Sequence".to_string(),
        NUMERIC_STRING => "NumericString".to_string(),
        PRINTABLE_STRING => "PrintableString".to_string(),
        GENERALIZED_TIME => "GeneralizedTime".to_string(),
        GENERAL_STRING => "GeneralString".to_string(),
        UNIVERSAL_STRING => "UniversalString".to_string(),
        _ => format!("UnknownType ({})", typ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_extraction() {
        // Constructed SEQUENCE tag
        assert_eq!(type_of(SEQUENCE | CONSTRUCTED), SEQUENCE);
        assert!(is_constructed(SEQUENCE | CONSTRUCTED));
        assert!(!is_constructed(GENERAL_STRING));
    }

    #[test]
    fn test_class_flags() {
        assert!(is_context_specific(CONTEXT_SPECIFIC | 0x02));
        assert!(is_tagged(TAGGED | 0x02));
        assert!(is_application_specific(APPLICATION | 0x01));
        assert!(!is_context_specific(UNIVERSAL | INTEGER));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(GENERAL_STRING), "GeneralString");
        assert_eq!(type_name(SEQUENCE), "Sequence");
        assert_eq!(type_name(0x1D), "UnknownType (29)");
    }
}
