//! Length octets codec
//!
//! BER length can be encoded in three forms:
//! - **Short form**: one octet, bit 8 clear, value 0-127
//! - **Long form**: `1NNNNNNN` followed by N big-endian octets
//! - **Indefinite form**: the single octet `0x80`; the contents end with an
//!   end-of-contents marker that the value codec has to find
//!
//! Which forms are acceptable depends on the encoding rule and on whether
//! the value is constructed; that is captured by [`LengthPolicy`].

use crate::rules::EncodingRule;
use dabers_core::{ByteSink, DabersError, DabersResult, Reader};
use serde::{Deserialize, Serialize};

const LONG_FORM_BIT: u8 = 0x80;
const COUNT_MASK: u8 = 0x7F;
const INDEFINITE: u8 = 0x80;

/// Longest definite value that fits in the short form
const MAX_SHORT_LENGTH: u64 = 0x7F;

/// Maximum number of long-form length octets (64-bit values)
pub const MAX_LENGTH_OCTETS: usize = 8;

/// Constraint on which length forms may be parsed or must be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthPolicy {
    /// Either form is accepted (BER constructed values)
    IndefiniteOptional,
    /// Only the indefinite form is valid (CER constructed values)
    IndefiniteRequired,
    /// Only a definite form is valid
    DefiniteRequired,
}

impl LengthPolicy {
    /// Whether the indefinite form is acceptable
    pub fn allows_indefinite(self) -> bool {
        !matches!(self, LengthPolicy::DefiniteRequired)
    }

    /// Whether a definite form is acceptable
    pub fn allows_definite(self) -> bool {
        !matches!(self, LengthPolicy::IndefiniteRequired)
    }

    /// Narrow the policy to one a writer can commit to
    ///
    /// `IndefiniteOptional` becomes `DefiniteRequired`; the others are
    /// already concrete.
    pub fn for_writing(self) -> Self {
        match self {
            LengthPolicy::IndefiniteOptional => LengthPolicy::DefiniteRequired,
            other => other,
        }
    }
}

/// Number of octets the definite form of `value` takes
pub fn encoded_len(value: u64) -> usize {
    if value <= MAX_SHORT_LENGTH {
        1
    } else {
        1 + value_octets(value)
    }
}

/// Minimal big-endian octet count of a non-zero value
fn value_octets(value: u64) -> usize {
    let bits = u64::BITS - value.leading_zeros();
    bits.div_ceil(8).max(1) as usize
}

/// Parse length octets
///
/// # Returns
/// `Some(n)` for a definite length, `None` for the indefinite form.
///
/// # Error Handling
/// - `BufferUnderrun` if the length octets run past the buffer
/// - `InvalidEncoding` if the form found is not allowed by `policy`
/// - `Overflow` if the long form announces more than 8 octets
pub fn parse_length(policy: LengthPolicy, reader: &mut Reader<'_>) -> DabersResult<Option<u64>> {
    let first = reader.read_byte("length octet")?;

    if (first & LONG_FORM_BIT) == 0 {
        if !policy.allows_definite() {
            log::debug!("short length 0x{:02X} where indefinite form is required", first);
            return Err(DabersError::InvalidEncoding(
                "short form length field is invalid when the indefinite length form is required"
                    .to_string(),
            ));
        }
        return Ok(Some(u64::from(first & COUNT_MASK)));
    }

    let count = usize::from(first & COUNT_MASK);
    if count == 0 {
        if !policy.allows_indefinite() {
            log::debug!("indefinite length where definite form is required");
            return Err(DabersError::InvalidEncoding(
                "indefinite length form found, but definite form was required".to_string(),
            ));
        }
        return Ok(None);
    }

    if !policy.allows_definite() {
        log::debug!("long definite length 0x{:02X} where indefinite form is required", first);
        return Err(DabersError::InvalidEncoding(
            "definite length form found, but indefinite form was required".to_string(),
        ));
    }
    if count > MAX_LENGTH_OCTETS {
        log::debug!("long form length announces {} octets", count);
        return Err(DabersError::Overflow(format!(
            "the long form length ({} octets) is more than the maximum supported ({})",
            count, MAX_LENGTH_OCTETS
        )));
    }

    let octets = reader.consume(count, "long form length octets")?;
    let value = octets
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));

    log::trace!("long form length {} from {} octets", value, count);
    Ok(Some(value))
}

/// Write length octets
///
/// # Arguments
/// * `value` - Content length; ignored when the indefinite form is written
/// * `policy` - Form to produce
/// * `sink` - Destination for the octets
///
/// # Returns
/// `true` if the indefinite form was written.
///
/// # Error Handling
/// `IndefiniteOptional` leaves the form undecided and fails with
/// `InvalidArgument` before anything is emitted.
pub fn write_length<S: ByteSink + ?Sized>(
    value: u64,
    policy: LengthPolicy,
    sink: &mut S,
) -> DabersResult<bool> {
    match policy {
        LengthPolicy::IndefiniteRequired => {
            sink.put_byte(INDEFINITE);
            Ok(true)
        }
        LengthPolicy::DefiniteRequired => {
            if value <= MAX_SHORT_LENGTH {
                sink.put_byte(value as u8);
            } else {
                let octets = value_octets(value);
                sink.put_byte(LONG_FORM_BIT | octets as u8);
                for i in (0..octets).rev() {
                    sink.put_byte((value >> (i * 8)) as u8);
                }
            }
            Ok(false)
        }
        LengthPolicy::IndefiniteOptional => {
            log::debug!("refusing to write length {} with an optional form", value);
            Err(DabersError::InvalidArgument(format!(
                "invalid length policy ({:?}) for writing the length ({})",
                policy, value
            )))
        }
    }
}

/// Parse length octets under the policy `rule` gives a value with the
/// given constructed flag
pub fn parse_length_for_rule(
    rule: EncodingRule,
    constructed: bool,
    reader: &mut Reader<'_>,
) -> DabersResult<Option<u64>> {
    parse_length(rule.length_policy(constructed), reader)
}

/// Write length octets for `rule`
///
/// BER constructed values may use either form; the writer picks the
/// definite one.
pub fn write_length_for_rule<S: ByteSink + ?Sized>(
    rule: EncodingRule,
    constructed: bool,
    value: u64,
    sink: &mut S,
) -> DabersResult<bool> {
    write_length(value, rule.length_policy(constructed).for_writing(), sink)
}
