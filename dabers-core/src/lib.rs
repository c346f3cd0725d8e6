//! Core types and utilities for the dabers ASN.1 header codecs
//!
//! This crate provides the pieces every codec in the workspace shares:
//! the error type, a bounds-checked reader over an already-materialized
//! byte buffer, and the byte-sink abstraction writers emit into.

pub mod error;
pub mod reader;
pub mod sink;

pub use error::{DabersError, DabersResult, ErrorKind};
pub use reader::Reader;
pub use sink::{ByteSink, FnSink};
