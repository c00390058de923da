//! # Record Serialization
//!
//! Text format shared by every generator.
//!
//! ## Grammar
//!
//! ```text
//! record  := '`' [field ('~' field)*] '`'
//! field   := scalar | tagged
//! tagged  := TAG record          (TAG is exactly 4 characters)
//! scalar  := any text without '~' or '`'
//! ```
//!
//! Nested records are written raw, not escaped. Backticks open and close
//! with the same character, so splitting on them cannot find the end of a
//! nested record. Parsing is recursive descent instead: each generator reads
//! exactly its own fields from a [`Cursor`], and a tagged field hands the
//! cursor to the nested generator, which leaves it just past its own
//! closing backtick.
//!
//! ## Bit-exact floats
//!
//! Sharpness-like parameters are written as [`float_to_reversed_bits`]: the
//! `f32` bit pattern with bit order reversed, read as `i32`, in decimal.
//! Other floats use Rust's shortest round-trip `Display`, which is exact.

use std::fmt::{Display, Write as _};
use std::str::FromStr;

use crate::error::{NoiseError, NoiseResult};
use crate::noise::Noise;

/// Opens and closes a record.
pub const RECORD_DELIMITER: char = '`';

/// Separates fields inside a record.
pub const FIELD_SEPARATOR: char = '~';

/// Length of every tag, in bytes.
pub const TAG_LEN: usize = 4;

/// Deepest chain of nested tagged records a [`Cursor`] will follow.
pub const MAX_NESTING: usize = 64;

/// Encodes a float as its bit-reversed 32-bit pattern.
#[inline]
#[must_use]
pub fn float_to_reversed_bits(value: f32) -> i32 {
    value.to_bits().reverse_bits() as i32
}

/// Inverse of [`float_to_reversed_bits`].
#[inline]
#[must_use]
pub fn reversed_bits_to_float(bits: i32) -> f32 {
    f32::from_bits((bits as u32).reverse_bits())
}

/// Read position inside serialized text.
///
/// All reads either consume exactly what they return or fail without
/// consuming anything meaningful; callers abandon the cursor on error.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `text`.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            depth: 0,
        }
    }

    /// Creates a cursor at byte offset `pos` of `text`.
    ///
    /// `pos` must lie on a character boundary no later than the end.
    #[must_use]
    pub(crate) const fn at(text: &'a str, pos: usize) -> Self {
        Self { text, pos, depth: 0 }
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Whether everything has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The unread remainder.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Consumes `expected` or fails with [`NoiseError::MissingDelimiter`].
    pub fn expect(&mut self, expected: char) -> NoiseResult<()> {
        if self.remaining().starts_with(expected) {
            self.pos += expected.len_utf8();
            Ok(())
        } else {
            Err(NoiseError::MissingDelimiter {
                expected,
                position: self.pos,
            })
        }
    }

    /// Consumes the opening backtick of a record.
    pub fn open(&mut self) -> NoiseResult<()> {
        self.expect(RECORD_DELIMITER)
    }

    /// Consumes the closing backtick of a record.
    pub fn close(&mut self) -> NoiseResult<()> {
        self.expect(RECORD_DELIMITER)
    }

    /// Consumes a field separator.
    pub fn separator(&mut self) -> NoiseResult<()> {
        self.expect(FIELD_SEPARATOR)
    }

    /// Reads raw scalar text up to the next `~` or backtick.
    ///
    /// Fails if the input ends first: a scalar is always followed by a
    /// delimiter in a well-formed record.
    pub fn scalar(&mut self) -> NoiseResult<&'a str> {
        let rest = self.remaining();
        match rest.find([FIELD_SEPARATOR, RECORD_DELIMITER]) {
            Some(len) => {
                let field = &rest[..len];
                self.pos += len;
                Ok(field)
            }
            None => Err(NoiseError::MissingDelimiter {
                expected: FIELD_SEPARATOR,
                position: self.text.len(),
            }),
        }
    }

    /// Reads and parses a scalar field.
    pub fn parse<T: FromStr>(&mut self, field: &'static str) -> NoiseResult<T> {
        let position = self.pos;
        let raw = self.scalar()?;
        raw.parse().map_err(|_| NoiseError::InvalidNumber {
            field,
            value: raw.to_owned(),
            position,
        })
    }

    /// Reads a `0`/`1` flag.
    pub fn flag(&mut self, field: &'static str) -> NoiseResult<bool> {
        let position = self.pos;
        match self.scalar()? {
            "0" => Ok(false),
            "1" => Ok(true),
            raw => Err(NoiseError::InvalidNumber {
                field,
                value: raw.to_owned(),
                position,
            }),
        }
    }

    /// Reads a float stored with [`float_to_reversed_bits`].
    pub fn reversed_bits(&mut self, field: &'static str) -> NoiseResult<f32> {
        self.parse::<i32>(field).map(reversed_bits_to_float)
    }

    /// Reads a 4-character tag.
    pub fn tag(&mut self) -> NoiseResult<&'a str> {
        let position = self.pos;
        let tag = self
            .text
            .get(self.pos..self.pos + TAG_LEN)
            .ok_or(NoiseError::TruncatedTag { position })?;
        if tag.contains([FIELD_SEPARATOR, RECORD_DELIMITER]) {
            return Err(NoiseError::TruncatedTag { position });
        }
        self.pos += TAG_LEN;
        Ok(tag)
    }

    /// Enters one level of nested record.
    ///
    /// Fails with [`NoiseError::NestingTooDeep`] past [`MAX_NESTING`] levels.
    pub fn descend(&mut self) -> NoiseResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(NoiseError::NestingTooDeep { position: self.pos });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves the level entered by [`Cursor::descend`].
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current nesting level.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Fails with [`NoiseError::TrailingData`] unless fully consumed.
    pub fn finish(&self) -> NoiseResult<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(NoiseError::TrailingData { position: self.pos })
        }
    }
}

/// Builds one record: `` `a~b~c` ``.
pub struct RecordWriter<'a> {
    out: &'a mut String,
    first: bool,
}

impl<'a> RecordWriter<'a> {
    /// Writes the opening backtick.
    pub fn open(out: &'a mut String) -> Self {
        out.push(RECORD_DELIMITER);
        Self { out, first: true }
    }

    fn separate(&mut self) {
        if !self.first {
            self.out.push(FIELD_SEPARATOR);
        }
        self.first = false;
    }

    /// Appends a scalar using its `Display` form.
    pub fn field(&mut self, value: impl Display) -> &mut Self {
        self.separate();
        // Writing into a String cannot fail
        let _ = write!(self.out, "{value}");
        self
    }

    /// Appends a `0`/`1` flag.
    pub fn flag(&mut self, value: bool) -> &mut Self {
        self.field(u8::from(value))
    }

    /// Appends a float as its bit-reversed pattern.
    pub fn reversed_bits(&mut self, value: f32) -> &mut Self {
        self.field(float_to_reversed_bits(value))
    }

    /// Appends a nested generator as a tagged record.
    pub fn nested(&mut self, noise: &dyn Noise) -> &mut Self {
        self.separate();
        write_tagged(noise, self.out);
        self
    }

    /// Writes the closing backtick.
    pub fn close(&mut self) {
        self.out.push(RECORD_DELIMITER);
    }
}

/// Writes `TAG` followed by the generator's record.
pub fn write_tagged(noise: &dyn Noise, out: &mut String) {
    out.push_str(noise.tag());
    noise.write_record(out);
}
