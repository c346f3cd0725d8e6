//! Encoding rule selection
//!
//! BER, CER and DER share the tag encoding and differ in which length
//! forms they permit. An [`EncodingRule`] is turned into a [`LengthPolicy`]
//! with [`length_policy`] before the length codec runs.

use crate::length::LengthPolicy;
use dabers_core::DabersError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ASN.1 encoding rule set (ITU-T X.690)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingRule {
    /// Basic Encoding Rules
    #[default]
    Ber,
    /// Canonical Encoding Rules
    Cer,
    /// Distinguished Encoding Rules
    Der,
}

impl EncodingRule {
    /// Length policy for a value with the given constructed flag
    ///
    /// | Rule | Constructed | Policy             |
    /// |------|-------------|--------------------|
    /// | BER  | true        | IndefiniteOptional |
    /// | BER  | false       | DefiniteRequired   |
    /// | CER  | true        | IndefiniteRequired |
    /// | CER  | false       | DefiniteRequired   |
    /// | DER  | any         | DefiniteRequired   |
    pub fn length_policy(self, constructed: bool) -> LengthPolicy {
        match (self, constructed) {
            (EncodingRule::Ber, true) => LengthPolicy::IndefiniteOptional,
            (EncodingRule::Cer, true) => LengthPolicy::IndefiniteRequired,
            _ => LengthPolicy::DefiniteRequired,
        }
    }
}

/// Free-function form of [`EncodingRule::length_policy`]
pub fn length_policy(rule: EncodingRule, constructed: bool) -> LengthPolicy {
    rule.length_policy(constructed)
}

impl fmt::Display for EncodingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodingRule::Ber => "BER",
            EncodingRule::Cer => "CER",
            EncodingRule::Der => "DER",
        };
        f.write_str(name)
    }
}

impl FromStr for EncodingRule {
    type Err = DabersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ber" => Ok(EncodingRule::Ber),
            "cer" => Ok(EncodingRule::Cer),
            "der" => Ok(EncodingRule::Der),
            _ => Err(DabersError::InvalidArgument(format!(
                "unknown encoding rule: {}",
                s
            ))),
        }
    }
}
