//! Identifier octets (tag) codec
//!
//! The tag encoding is the same under BER, CER and DER, so nothing here
//! takes an encoding rule.

use dabers_core::{ByteSink, DabersError, DabersResult, Reader};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

const CLASS_MASK: u8 = 0xC0;
const CONSTRUCTED_BIT: u8 = 0x20;
const NUMBER_MASK: u8 = 0x1F;
const CONTINUATION_BIT: u8 = 0x80;
const VALUE_MASK: u8 = 0x7F;
const VALUE_BITS: u32 = 7;

/// Largest tag number that fits in the first octet
const MAX_SHORT_NUMBER: u64 = 30;

/// Maximum number of long-form octets accepted when parsing.
/// Nine octets carry 63 bits.
pub const MAX_TAG_NUMBER_OCTETS: usize = 9;

/// Tag numbers of the universal class (ITU-T X.680 clause 8.4)
pub mod universal {
    pub const END_OF_CONTENTS: u64 = 0;
    pub const BOOLEAN: u64 = 1;
    pub const INTEGER: u64 = 2;
    pub const BIT_STRING: u64 = 3;
    pub const OCTET_STRING: u64 = 4;
    pub const NULL: u64 = 5;
    pub const OBJECT_IDENTIFIER: u64 = 6;
    pub const OBJECT_DESCRIPTOR: u64 = 7;
    pub const EXTERNAL: u64 = 8;
    pub const REAL: u64 = 9;
    pub const ENUMERATED: u64 = 10;
    pub const EMBEDDED_PDV: u64 = 11;
    pub const UTF8_STRING: u64 = 12;
    pub const RELATIVE_OID: u64 = 13;
    pub const SEQUENCE: u64 = 16;
    pub const SET: u64 = 17;
    pub const NUMERIC_STRING: u64 = 18;
    pub const PRINTABLE_STRING: u64 = 19;
    pub const IA5_STRING: u64 = 22;
    pub const UTC_TIME: u64 = 23;
    pub const GENERALIZED_TIME: u64 = 24;
    pub const VISIBLE_STRING: u64 = 26;
    pub const UNIVERSAL_STRING: u64 = 28;
    pub const BMP_STRING: u64 = 30;
}

/// Tag class
///
/// The discriminants are the class bits as they appear in the identifier
/// octet, so the derived ordering is the canonical ordering of X.690.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TagClass {
    /// Universal class (00)
    Universal = 0x00,
    /// Application class (01)
    Application = 0x40,
    /// Context-specific class (10)
    ContextSpecific = 0x80,
    /// Private class (11)
    Private = 0xC0,
}

impl TagClass {
    /// Get tag class from bits 8-7 of an identifier octet
    pub fn from_bits(byte: u8) -> Self {
        match byte & CLASS_MASK {
            0x00 => TagClass::Universal,
            0x40 => TagClass::Application,
            0x80 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    /// Class bits, already in position for the identifier octet
    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagClass::Universal => "Universal",
            TagClass::Application => "Application",
            TagClass::ContextSpecific => "Context-specific",
            TagClass::Private => "Private",
        };
        f.write_str(name)
    }
}

/// ASN.1 tag
///
/// # Encoding Format
///
/// Short form (tag number 0-30):
/// ```text
/// Bits: 8 7 6 5 4 3 2 1
///       C C P T T T T T
/// ```
///
/// Long form (tag number > 30):
/// ```text
/// First byte:      C C P 1 1 1 1 1
/// Following bytes: 1 T T T T T T T  (last byte has bit 8 = 0)
/// ```
///
/// # Ordering
///
/// Tags order by class, then number, then constructed flag. X.690 leaves
/// the last key unspecified; primitive sorts before constructed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    class: TagClass,
    constructed: bool,
    number: u64,
}

impl Tag {
    /// Create a new tag
    pub fn new(class: TagClass, constructed: bool, number: u64) -> Self {
        Self {
            class,
            constructed,
            number,
        }
    }

    /// Create a Universal class tag
    pub fn universal(constructed: bool, number: u64) -> Self {
        Self::new(TagClass::Universal, constructed, number)
    }

    /// Create an Application class tag
    pub fn application(constructed: bool, number: u64) -> Self {
        Self::new(TagClass::Application, constructed, number)
    }

    /// Create a Context-specific class tag
    pub fn context_specific(constructed: bool, number: u64) -> Self {
        Self::new(TagClass::ContextSpecific, constructed, number)
    }

    /// Create a Private class tag
    pub fn private(constructed: bool, number: u64) -> Self {
        Self::new(TagClass::Private, constructed, number)
    }

    /// Get tag class
    pub fn class(&self) -> TagClass {
        self.class
    }

    /// Check if tag is constructed
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Get tag number
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Number of octets [`write_tag`] emits for this tag
    pub fn encoded_len(&self) -> usize {
        if self.number <= MAX_SHORT_NUMBER {
            1
        } else {
            1 + number_groups(self.number)
        }
    }

    /// Encode tag into a fresh buffer
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        write_tag(self, &mut out);
        out
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class
            .cmp(&other.class)
            .then_with(|| self.number.cmp(&other.number))
            .then_with(|| self.constructed.cmp(&other.constructed))
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = if self.constructed {
            "constructed"
        } else {
            "primitive"
        };
        write!(f, "[{} {} {}]", self.class, self.number, form)
    }
}

/// Count of 7-bit groups needed for a non-zero tag number
fn number_groups(number: u64) -> usize {
    let bits = u64::BITS - number.leading_zeros();
    bits.div_ceil(VALUE_BITS).max(1) as usize
}

/// Parse identifier octets
///
/// # Decoding Process
/// 1. Read the first octet: class, constructed flag and the low five bits
/// 2. If the low five bits are not all ones, they are the tag number
/// 3. Otherwise accumulate base-128 octets until one has bit 8 clear
///
/// # Error Handling
/// - `BufferUnderrun` if the buffer ends before the tag does
/// - `InvalidEncoding` if the first long-form octet carries no value bits
/// - `Overflow` if more than [`MAX_TAG_NUMBER_OCTETS`] long-form octets appear
pub fn parse_tag(reader: &mut Reader<'_>) -> DabersResult<Tag> {
    let first = reader.read_byte("tag identifier octet")?;
    let class = TagClass::from_bits(first);
    let constructed = (first & CONSTRUCTED_BIT) != 0;
    let low = first & NUMBER_MASK;

    if low != NUMBER_MASK {
        return Ok(Tag::new(class, constructed, u64::from(low)));
    }

    let mut number = 0u64;
    let mut count = 0usize;
    loop {
        let byte = reader.read_byte("tag number octet")?;
        count += 1;

        if count == 1 && (byte & VALUE_MASK) == 0 {
            log::debug!("leading tag number octet 0x{:02X} has no value bits", byte);
            return Err(DabersError::InvalidEncoding(
                "the first octet of a long-form tag number cannot have 0 for the number bits"
                    .to_string(),
            ));
        }
        if count > MAX_TAG_NUMBER_OCTETS {
            log::debug!("tag number runs past {} octets", MAX_TAG_NUMBER_OCTETS);
            return Err(DabersError::Overflow(format!(
                "tag number is longer than the supported maximum of {} octets",
                MAX_TAG_NUMBER_OCTETS
            )));
        }

        number = (number << VALUE_BITS) | u64::from(byte & VALUE_MASK);
        if (byte & CONTINUATION_BIT) == 0 {
            break;
        }
    }

    log::trace!("long-form tag number {} from {} octets", number, count);
    Ok(Tag::new(class, constructed, number))
}

/// Write identifier octets
///
/// Tag numbers up to 30 use the single-octet form. Larger numbers are split
/// into 7-bit groups, most significant first, with no leading empty group.
/// The whole `u64` range is accepted, even numbers that take more octets
/// than [`parse_tag`] reads back.
pub fn write_tag<S: ByteSink + ?Sized>(tag: &Tag, sink: &mut S) {
    let mut first = tag.class.bits();
    if tag.constructed {
        first |= CONSTRUCTED_BIT;
    }

    if tag.number <= MAX_SHORT_NUMBER {
        sink.put_byte(first | tag.number as u8);
        return;
    }

    sink.put_byte(first | NUMBER_MASK);
    let groups = number_groups(tag.number);
    for i in (0..groups).rev() {
        let mut byte = ((tag.number >> (i as u32 * VALUE_BITS)) as u8) & VALUE_MASK;
        if i != 0 {
            byte |= CONTINUATION_BIT;
        }
        sink.put_byte(byte);
    }
}
