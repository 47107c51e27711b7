//! The encoded flag string.
//!
//! Grammar: `flag = token ("," token)*`, `token = u ":" v`, where `u` and `v`
//! are decimals in `0.0..=1.0`. The encoder always writes exactly
//! [`UV_PRECISION`] fractional digits; the parser accepts any decimal.

use std::fmt;
use std::str::FromStr;

use crate::palette::Uv;

use super::error::ParseFlagError;

/// Fractional digits written for each UV component.
pub const UV_PRECISION: usize = 6;

/// Separator between pixel tokens.
pub const TOKEN_SEPARATOR: char = ',';

/// Separator between the `u` and `v` of one token.
pub const UV_SEPARATOR: char = ':';

/// One fully processed image as a comma-separated UV stream.
///
/// Tokens follow the order the pixels were matched in (column-major: x
/// outer, y inner). A flag read back from disk through [`FromStr`] is
/// indistinguishable from a freshly encoded one: the text is kept as is
/// (minus surrounding whitespace) after validation.
///
/// # Example
///
/// ```
/// use flag_quantize::{EncodedFlag, Uv};
///
/// let flag = EncodedFlag::encode(&[Uv::new(0.0, 1.0), Uv::new(0.25, 0.5)]);
/// assert_eq!(flag.as_str(), "0.000000:1.000000,0.250000:0.500000");
///
/// let reread: EncodedFlag = flag.as_str().parse().unwrap();
/// assert_eq!(reread, flag);
/// assert_eq!(reread.parse().unwrap()[1], Uv::new(0.25, 0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedFlag(String);

impl EncodedFlag {
    /// Serialize a UV sequence.
    pub fn encode(uvs: &[Uv]) -> Self {
        // "0.000000:0.000000," is 18 bytes
        let mut out = String::with_capacity(uvs.len() * (2 * (UV_PRECISION + 2) + 2));
        for (i, uv) in uvs.iter().enumerate() {
            if i > 0 {
                out.push(TOKEN_SEPARATOR);
            }
            push_component(&mut out, uv.u);
            out.push(UV_SEPARATOR);
            push_component(&mut out, uv.v);
        }
        Self(out)
    }

    /// Decode every token back into a [`Uv`].
    pub fn parse(&self) -> Result<Vec<Uv>, ParseFlagError> {
        parse_tokens(&self.0)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of pixel tokens.
    pub fn token_count(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.split(TOKEN_SEPARATOR).count()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn push_component(out: &mut String, value: f32) {
    use std::fmt::Write;
    // Writing to a String cannot fail
    let _ = write!(out, "{:.*}", UV_PRECISION, value);
}

fn parse_tokens(text: &str) -> Result<Vec<Uv>, ParseFlagError> {
    if text.trim().is_empty() {
        return Err(ParseFlagError::Empty);
    }

    text.split(TOKEN_SEPARATOR)
        .enumerate()
        .map(|(index, token)| {
            let (u, v) = token
                .split_once(UV_SEPARATOR)
                .ok_or(ParseFlagError::MissingSeparator { index })?;
            Ok(Uv::new(
                parse_component(index, u)?,
                parse_component(index, v)?,
            ))
        })
        .collect()
}

fn parse_component(index: usize, text: &str) -> Result<f32, ParseFlagError> {
    let value: f32 = text
        .trim()
        .parse()
        .map_err(|source| ParseFlagError::InvalidNumber { index, source })?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ParseFlagError::OutOfRange { index, value });
    }
    Ok(value)
}

impl FromStr for EncodedFlag {
    type Err = ParseFlagError;

    /// Validate `s` against the grammar and keep its text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        parse_tokens(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for EncodedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedFlag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EncodedFlag> for String {
    fn from(flag: EncodedFlag) -> Self {
        flag.0
    }
}
