//! # Noise Error Types
//!
//! All errors that can occur while reading or configuring noise generators.
//!
//! Evaluation never fails: out-of-range sharpness and unsupported dimensions
//! surface as values, not errors.

use thiserror::Error;

/// Errors that can occur in the noise system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoiseError {
    /// Deserialization was handed nothing to read.
    #[error("empty serialized record")]
    Empty,

    /// A record delimiter was expected but something else was found.
    #[error("expected '{expected}' at position {position}")]
    MissingDelimiter {
        /// The delimiter that was expected.
        expected: char,
        /// Byte offset into the input.
        position: usize,
    },

    /// A numeric field could not be parsed.
    #[error("invalid number for {field} at position {position}: {value:?}")]
    InvalidNumber {
        /// Name of the field being read.
        field: &'static str,
        /// The raw text of the field.
        value: String,
        /// Byte offset of the field.
        position: usize,
    },

    /// A field parsed correctly but holds a value the generator cannot use.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// Name of the field being read.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// No factory is registered for this tag.
    #[error("unknown noise tag: {0:?}")]
    UnknownTag(String),

    /// The input ended before a full 4-character tag could be read.
    #[error("truncated tag at position {position}")]
    TruncatedTag {
        /// Byte offset where the tag started.
        position: usize,
    },

    /// Nested records go deeper than the reader allows.
    #[error("records nested too deeply at position {position}")]
    NestingTooDeep {
        /// Byte offset of the tag that would exceed the limit.
        position: usize,
    },

    /// A complete record was read but more text follows it.
    #[error("trailing data after record at position {position}")]
    TrailingData {
        /// Byte offset of the first unread character.
        position: usize,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for noise operations.
pub type NoiseResult<T> = Result<T, NoiseError>;
