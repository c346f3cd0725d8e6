//! Byte sinks the writers emit into
//!
//! A sink receives one call per encoded byte, strictly in encoding order.
//! Writers never roll back bytes already handed to a sink, so callers that
//! need atomicity should write into a `Vec<u8>` first and commit it later.

use bytes::{BufMut, BytesMut};

/// Destination for encoded octets
pub trait ByteSink {
    /// Append one byte
    fn put_byte(&mut self, byte: u8);
}

impl ByteSink for Vec<u8> {
    fn put_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

impl ByteSink for BytesMut {
    fn put_byte(&mut self, byte: u8) {
        self.put_u8(byte);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn put_byte(&mut self, byte: u8) {
        (**self).put_byte(byte);
    }
}

/// Adapter turning a per-byte closure into a [`ByteSink`]
///
/// ```
/// use dabers_core::{ByteSink, FnSink};
///
/// let mut total = 0u32;
/// let mut sink = FnSink(|b: u8| total += u32::from(b));
/// sink.put_byte(1);
/// sink.put_byte(2);
/// drop(sink);
/// assert_eq!(total, 3);
/// ```
pub struct FnSink<F>(pub F);

impl<F: FnMut(u8)> ByteSink for FnSink<F> {
    fn put_byte(&mut self, byte: u8) {
        (self.0)(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::{Sequence, predicate::eq};

    mockall::mock! {
        Sink {}
        impl ByteSink for Sink {
            fn put_byte(&mut self, byte: u8);
        }
    }

    fn emit<S: ByteSink>(sink: &mut S, bytes: &[u8]) {
        for &b in bytes {
            sink.put_byte(b);
        }
    }

    #[test]
    fn test_vec_sink() {
        let mut out = Vec::new();
        emit(&mut out, &[0x30, 0x03]);
        assert_eq!(out, vec![0x30, 0x03]);
    }

    #[test]
    fn test_bytes_mut_sink() {
        let mut out = BytesMut::with_capacity(4);
        emit(&mut out, &[0x02, 0x01, 0x05]);
        assert_eq!(&out[..], &[0x02, 0x01, 0x05]);
    }

    #[test]
    fn test_fn_sink() {
        let mut seen: Vec<u8> = Vec::new();
        emit(&mut FnSink(|b: u8| seen.push(b)), &[9, 8, 7]);
        assert_eq!(seen, vec![9, 8, 7]);
    }

    #[test]
    fn test_mut_ref_forwards_in_order() {
        let mut seq = Sequence::new();
        let mut sink = MockSink::new();
        for b in [0xA0u8, 0x80] {
            sink.expect_put_byte()
                .with(eq(b))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }
        let mut by_ref = &mut sink;
        emit(&mut by_ref, &[0xA0, 0x80]);
    }
}
