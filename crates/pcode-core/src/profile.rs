//! Binary density profiles.

use std::fmt;
use std::str::FromStr;

use crate::ProfileParseError;

/// The two binary layouts the virtual machine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    /// Every opcode and operand is a 4-byte little-endian word.
    #[default]
    WordAligned,
    /// Small opcodes take one byte and several operand families shrink.
    ByteCompressed,
}

impl Profile {
    /// Canonical configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::WordAligned => "word-aligned",
            Profile::ByteCompressed => "byte-compressed",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word-aligned" | "word" => Ok(Profile::WordAligned),
            "byte-compressed" | "compact" => Ok(Profile::ByteCompressed),
            _ => Err(ProfileParseError {
                name: s.to_string(),
            }),
        }
    }
}
