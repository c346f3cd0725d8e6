//! Identifier and length octets together
//!
//! The length policy depends on the tag's constructed flag, so the tag is
//! always handled first.

use crate::length::{parse_length, write_length};
use crate::rules::EncodingRule;
use crate::tag::{Tag, parse_tag, write_tag};
use dabers_core::{ByteSink, DabersError, DabersResult, Reader};

/// Decoded value header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Identifier octets
    pub tag: Tag,
    /// Content length, `None` for the indefinite form
    pub length: Option<u64>,
}

impl Header {
    /// Create a header with a definite length
    pub fn definite(tag: Tag, length: u64) -> Self {
        Self {
            tag,
            length: Some(length),
        }
    }

    /// Create a header with the indefinite length form
    pub fn indefinite(tag: Tag) -> Self {
        Self { tag, length: None }
    }

    /// Check if the length uses the indefinite form
    pub fn is_indefinite(&self) -> bool {
        self.length.is_none()
    }
}

/// Parse a tag and the length that follows it
///
/// # Error Handling
/// Fails with whatever [`parse_tag`] or [`parse_length`] reports. The
/// reader is left after the last octet consumed.
pub fn parse_header(rule: EncodingRule, reader: &mut Reader<'_>) -> DabersResult<Header> {
    let tag = parse_tag(reader)?;
    let policy = rule.length_policy(tag.is_constructed());
    let length = parse_length(policy, reader)?;
    Ok(Header { tag, length })
}

/// Write a tag and its length
///
/// The policy comes from `rule` narrowed for writing, so BER constructed
/// values get a definite length. A header without a length can only be
/// written where the indefinite form is required (CER constructed).
///
/// # Returns
/// `true` if the indefinite form was written.
pub fn write_header<S: ByteSink + ?Sized>(
    rule: EncodingRule,
    header: &Header,
    sink: &mut S,
) -> DabersResult<bool> {
    let policy = rule.length_policy(header.tag.is_constructed()).for_writing();
    let value = match header.length {
        Some(value) => value,
        None if policy.allows_indefinite() => 0,
        None => {
            log::debug!("{} header for {} has no definite length", rule, header.tag);
            return Err(DabersError::InvalidArgument(format!(
                "{} requires a definite length for {}",
                rule, header.tag
            )));
        }
    };
    write_tag(&header.tag, sink);
    write_length(value, policy, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::universal;
    use bytes::BytesMut;
    use dabers_core::ErrorKind;
    use mockall::{Sequence, predicate::eq};

    mockall::mock! {
        Sink {}
        impl ByteSink for Sink {
            fn put_byte(&mut self, byte: u8);
        }
    }

    #[test]
    fn test_parse_header_der() {
        let data = [0x30, 0x03, 0x02, 0x01, 0x05];
        let mut reader = Reader::new(&data);
        let header = parse_header(EncodingRule::Der, &mut reader).unwrap();
        assert_eq!(header, Header::definite(Tag::universal(true, universal::SEQUENCE), 3));
        assert_eq!(reader.rest(), &[0x02, 0x01, 0x05]);
    }

    #[test]
    fn test_parse_header_policy_follows_tag() {
        let mut reader = Reader::new(&[0x30, 0x80]);
        let header = parse_header(EncodingRule::Ber, &mut reader).unwrap();
        assert!(header.is_indefinite());

        // primitive values never take the indefinite form
        let mut reader = Reader::new(&[0x04, 0x80]);
        let err = parse_header(EncodingRule::Ber, &mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);

        let mut reader = Reader::new(&[0x30, 0x03]);
        let err = parse_header(EncodingRule::Cer, &mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
    }

    #[test]
    fn test_write_header() {
        let mut out = Vec::new();
        let seq = Tag::universal(true, universal::SEQUENCE);

        assert!(!write_header(EncodingRule::Ber, &Header::definite(seq, 300), &mut out).unwrap());
        assert_eq!(out, vec![0x30, 0x82, 0x01, 0x2C]);

        out.clear();
        assert!(write_header(EncodingRule::Cer, &Header::indefinite(seq), &mut out).unwrap());
        assert_eq!(out, vec![0x30, 0x80]);
    }

    #[test]
    fn test_write_header_missing_length() {
        let mut out = Vec::new();
        let header = Header::indefinite(Tag::universal(true, universal::SET));
        let err = write_header(EncodingRule::Der, &header, &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_header_emits_each_byte_in_order() {
        let mut seq = Sequence::new();
        let mut sink = MockSink::new();
        for b in [0xBFu8, 0x81, 0x00, 0x81, 0x80] {
            sink.expect_put_byte()
                .with(eq(b))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }
        let header = Header::definite(Tag::context_specific(true, 128), 128);
        assert!(!write_header(EncodingRule::Der, &header, &mut sink).unwrap());
    }

    #[test]
    fn test_write_header_into_bytes_mut() {
        let mut out = BytesMut::new();
        let header = Header::definite(Tag::universal(false, universal::OCTET_STRING), 5);
        write_header(EncodingRule::Der, &header, &mut out).unwrap();
        assert_eq!(&out[..], &[0x04, 0x05]);

        let mut reader = Reader::new(&out);
        assert_eq!(parse_header(EncodingRule::Der, &mut reader).unwrap(), header);
    }
}
