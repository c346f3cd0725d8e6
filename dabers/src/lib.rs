//! dabers - ASN.1 tag and length codecs for BER, CER and DER
//!
//! Every encoded ASN.1 value starts with identifier octets and length
//! octets. This library parses and writes those two fields, rejecting
//! malformed and rule-violating encodings, and leaves the contents octets
//! to a higher-level value codec.
//!
//! # Architecture
//!
//! - `dabers-core`: error type, bounds-checked reader, byte sinks
//! - `dabers-ber`: tag codec, length codec, encoding rule selection
//!
//! # Usage
//!
//! ```
//! use dabers::{EncodingRule, Reader, Tag, parse_tag, parse_length, write_tag, write_length};
//!
//! let mut out = Vec::new();
//! let tag = Tag::context_specific(true, 200);
//! write_tag(&tag, &mut out);
//! write_length(1000, EncodingRule::Der.length_policy(true), &mut out).unwrap();
//!
//! let mut reader = Reader::new(&out);
//! let parsed = parse_tag(&mut reader).unwrap();
//! let policy = EncodingRule::Der.length_policy(parsed.is_constructed());
//! assert_eq!(parsed, tag);
//! assert_eq!(parse_length(policy, &mut reader).unwrap(), Some(1000));
//! assert!(reader.is_empty());
//! ```

// Re-export core types
pub use dabers_core::{ByteSink, DabersError, DabersResult, ErrorKind, FnSink, Reader};

pub use dabers_ber::{
    EncodingRule, Header, LengthPolicy, Tag, TagClass, length_policy, parse_header, parse_length,
    parse_length_for_rule, parse_tag, universal, write_header, write_length,
    write_length_for_rule, write_tag,
};

/// Lower-level modules
pub mod ber {
    pub use dabers_ber::{header, length, rules, tag};
}
