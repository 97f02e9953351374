//! Encoding policies for the two binary density profiles.
//!
//! Everything that differs between the word-aligned and the byte-compressed
//! layout lives behind [`EncodingPolicy`]: how an opcode number is written,
//! how wide each operand of a family is, whether byte-sized direct opcodes
//! may be used, and how a run of byte-range constants is packed into push
//! instructions. The assembler picks one policy when it is created and never
//! branches on the profile itself.

use std::fmt;

use pcode_core::{Opcode, OpcodeFamily, Profile};

/// Escape byte announcing a two-byte opcode in the byte-compressed layout.
pub const OPCODE_ESCAPE: u8 = 240;

/// Longest run of values one counted byte push can carry.
pub const MAX_BYTE_RUN: usize = u8::MAX as usize;

/// Encoded width of one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    Byte,
    Short,
    Word,
}

impl Width {
    /// Number of bytes the operand occupies.
    pub fn bytes(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Short => 2,
            Width::Word => 4,
        }
    }

    /// Little-endian encoding of `value`, truncated to this width.
    pub fn encode(self, value: i32) -> ([u8; 4], usize) {
        (value.to_le_bytes(), self.bytes())
    }

    /// Read an operand of this width, sign-extending narrow values when
    /// `signed` is set. Returns None if `bytes` is too short.
    pub fn decode(self, bytes: &[u8], signed: bool) -> Option<i32> {
        let raw = bytes.get(..self.bytes())?;
        let value = match (self, signed) {
            (Width::Byte, true) => raw[0] as i8 as i32,
            (Width::Byte, false) => raw[0] as i32,
            (Width::Short, true) => i16::from_le_bytes([raw[0], raw[1]]) as i32,
            (Width::Short, false) => u16::from_le_bytes([raw[0], raw[1]]) as i32,
            (Width::Word, _) => i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
        };
        Some(value)
    }
}

/// How one opcode number is laid out in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpcodeEncoding {
    /// Single byte, for codes below [`OPCODE_ESCAPE`].
    Byte(u8),
    /// The escape byte followed by `code - OPCODE_ESCAPE`.
    Escaped(u8),
    /// Full little-endian word.
    Word(u32),
}

impl OpcodeEncoding {
    /// Number of bytes the opcode occupies.
    pub fn size(self) -> usize {
        match self {
            OpcodeEncoding::Byte(_) => 1,
            OpcodeEncoding::Escaped(_) => 2,
            OpcodeEncoding::Word(_) => 4,
        }
    }

    /// Encoded bytes, in the first `len` entries of the buffer.
    pub fn to_bytes(self) -> ([u8; 4], usize) {
        let bytes = match self {
            OpcodeEncoding::Byte(code) => [code, 0, 0, 0],
            OpcodeEncoding::Escaped(rest) => [OPCODE_ESCAPE, rest, 0, 0],
            OpcodeEncoding::Word(code) => code.to_le_bytes(),
        };
        (bytes, self.size())
    }
}

/// Profile-specific encoding decisions.
pub trait EncodingPolicy: fmt::Debug + Send + Sync {
    /// The profile this policy implements.
    fn profile(&self) -> Profile;

    /// Encode an opcode number.
    fn encode_opcode(&self, op: Opcode) -> OpcodeEncoding;

    /// Decode an opcode number from the front of `bytes`, returning the raw
    /// code and the number of bytes it used.
    fn decode_opcode(&self, bytes: &[u8]) -> Option<(u32, usize)>;

    /// Width of the operand at `ordinal` for an instruction of `family`.
    fn arg_width(&self, family: OpcodeFamily, ordinal: usize) -> Width;

    /// Whether byte-sized direct opcodes may be selected.
    fn byte_direct(&self) -> bool;

    /// Choose a push instruction for a leading run of `run` byte-range values.
    ///
    /// Returns the opcode and how many values it consumes, or None when the
    /// values are better pushed one at a time as full numbers.
    fn pack_byte_run(&self, run: usize) -> Option<(Opcode, usize)>;

    /// Largest script function index a call instruction can encode.
    fn max_call_index(&self) -> u32;
}

/// Word-aligned layout: 4-byte opcodes and operands.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordAlignedPolicy;

impl EncodingPolicy for WordAlignedPolicy {
    fn profile(&self) -> Profile {
        Profile::WordAligned
    }

    fn encode_opcode(&self, op: Opcode) -> OpcodeEncoding {
        OpcodeEncoding::Word(op.code() as u32)
    }

    fn decode_opcode(&self, bytes: &[u8]) -> Option<(u32, usize)> {
        let raw = bytes.get(..4)?;
        Some((u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]), 4))
    }

    fn arg_width(&self, family: OpcodeFamily, _ordinal: usize) -> Width {
        match family {
            OpcodeFamily::ByteOnly => Width::Byte,
            _ => Width::Word,
        }
    }

    fn byte_direct(&self) -> bool {
        false
    }

    fn pack_byte_run(&self, run: usize) -> Option<(Opcode, usize)> {
        (run >= 4).then_some((Opcode::Push4Bytes, 4))
    }

    fn max_call_index(&self) -> u32 {
        i32::MAX as u32
    }
}

/// Byte-compressed layout: 1- or 2-byte opcodes and narrow operands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteCompressedPolicy;

impl EncodingPolicy for ByteCompressedPolicy {
    fn profile(&self) -> Profile {
        Profile::ByteCompressed
    }

    fn encode_opcode(&self, op: Opcode) -> OpcodeEncoding {
        let code = op.code();
        if code < OPCODE_ESCAPE as u16 {
            OpcodeEncoding::Byte(code as u8)
        } else {
            OpcodeEncoding::Escaped((code - OPCODE_ESCAPE as u16) as u8)
        }
    }

    fn decode_opcode(&self, bytes: &[u8]) -> Option<(u32, usize)> {
        match *bytes.first()? {
            OPCODE_ESCAPE => {
                let rest = *bytes.get(1)?;
                Some((OPCODE_ESCAPE as u32 + rest as u32, 2))
            }
            code => Some((code as u32, 1)),
        }
    }

    fn arg_width(&self, family: OpcodeFamily, ordinal: usize) -> Width {
        match (family, ordinal) {
            (OpcodeFamily::Special, 0) => Width::Byte,
            (OpcodeFamily::ByteOnly, _) => Width::Byte,
            (OpcodeFamily::Storage | OpcodeFamily::Call, _) => Width::Byte,
            (OpcodeFamily::CallFunc, 0) => Width::Byte,
            (OpcodeFamily::CallFunc, _) => Width::Short,
            _ => Width::Word,
        }
    }

    fn byte_direct(&self) -> bool {
        true
    }

    fn pack_byte_run(&self, run: usize) -> Option<(Opcode, usize)> {
        let step = match run {
            0 => return None,
            1 => (Opcode::PushByte, 1),
            2 => (Opcode::Push2Bytes, 2),
            3 => (Opcode::Push3Bytes, 3),
            4 => (Opcode::Push4Bytes, 4),
            5 => (Opcode::Push5Bytes, 5),
            _ => (Opcode::PushBytes, run.min(MAX_BYTE_RUN)),
        };
        Some(step)
    }

    fn max_call_index(&self) -> u32 {
        u8::MAX as u32
    }
}

static WORD_ALIGNED: WordAlignedPolicy = WordAlignedPolicy;
static BYTE_COMPRESSED: ByteCompressedPolicy = ByteCompressedPolicy;

/// The shared policy instance for a profile.
pub fn policy_for(profile: Profile) -> &'static dyn EncodingPolicy {
    match profile {
        Profile::WordAligned => &WORD_ALIGNED,
        Profile::ByteCompressed => &BYTE_COMPRESSED,
    }
}
