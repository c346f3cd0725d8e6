//! ASN.1 identifier and length octet codecs
//!
//! Every BER, CER or DER encoded value starts with the same header: the
//! identifier ("tag") octets followed by the length octets. This crate
//! parses and writes that header.
//!
//! # Header Encoding Overview
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Tag
//! - **Class** (bits 8-7): Universal, Application, Context-specific, Private
//! - **Constructed** (bit 6)
//! - **Number** (bits 5-1), or `11111` followed by base-128 octets
//!
//! ## Length
//! - **Short form**: one octet, 0-127
//! - **Long form**: `1NNNNNNN` followed by N big-endian octets
//! - **Indefinite form**: `0x80`, contents end with an end-of-contents marker
//!
//! The tag encoding is identical under all three rule sets. The length
//! encoding is not, so length functions take a [`LengthPolicy`], usually
//! derived from an [`EncodingRule`] and the tag's constructed flag.
//!
//! # Usage Example
//!
//! ```
//! use dabers_ber::{EncodingRule, Tag, parse_header};
//! use dabers_core::Reader;
//!
//! let data = [0x30, 0x82, 0x01, 0x00];
//! let mut reader = Reader::new(&data);
//! let header = parse_header(EncodingRule::Der, &mut reader).unwrap();
//! assert_eq!(header.tag, Tag::universal(true, 16));
//! assert_eq!(header.length, Some(256));
//! ```

pub mod header;
pub mod length;
pub mod rules;
pub mod tag;

pub use dabers_core::{ByteSink, DabersError, DabersResult, ErrorKind, FnSink, Reader};
pub use header::{Header, parse_header, write_header};
pub use length::{
    LengthPolicy, parse_length, parse_length_for_rule, write_length, write_length_for_rule,
};
pub use rules::{EncodingRule, length_policy};
pub use tag::{Tag, TagClass, parse_tag, universal, write_tag};
