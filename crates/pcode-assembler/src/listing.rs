//! Listing decoder.
//!
//! Decodes a flushed instruction stream back into opcodes and operands
//! using the same encoding policy that produced it. Used for listings and
//! for checking emitted code.

use std::fmt;

use pcode_core::{Arity, Opcode, OpcodeFamily, Profile};

use crate::ListingError;
use crate::policy::policy_for;

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Stream offset of the opcode.
    pub offset: u64,
    pub opcode: Opcode,
    pub args: Vec<i32>,
    /// Encoded size including any alignment padding.
    pub size: usize,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}  {}", self.offset, self.opcode)?;
        if self.opcode.is_branch() {
            return match self.args.first() {
                Some(&target) => write!(f, " -> {:08x}", target as u32),
                None => Ok(()),
            };
        }
        for (i, arg) in self.args.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, arg)?;
        }
        Ok(())
    }
}

/// Whether a narrow operand holds a signed value rather than a count,
/// index or special number.
fn signed_operand(opcode: Opcode, ordinal: usize) -> bool {
    if opcode.family() != OpcodeFamily::ByteOnly {
        return false;
    }
    let leading = ordinal == 0
        && (opcode.arity().is_variable()
            || matches!(
                opcode,
                Opcode::Lspec1DirectB
                    | Opcode::Lspec2DirectB
                    | Opcode::Lspec3DirectB
                    | Opcode::Lspec4DirectB
                    | Opcode::Lspec5DirectB
            ));
    !leading
}

/// Decode `bytes`, which start at stream offset `base`.
///
/// `base` matters for sorted jump tables, whose operands are aligned to
/// the stream rather than to the slice.
///
/// # Errors
///
/// Returns an error for truncated instructions, unknown opcodes and
/// negative operand counts.
pub fn disassemble(
    profile: Profile,
    bytes: &[u8],
    base: u64,
) -> Result<Vec<Instruction>, ListingError> {
    let policy = policy_for(profile);
    let mut instructions = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let offset = base + pos as u64;
        let (code, size) = policy
            .decode_opcode(&bytes[pos..])
            .ok_or(ListingError::Truncated { offset })?;
        let opcode = u16::try_from(code)
            .ok()
            .and_then(Opcode::from_code)
            .ok_or(ListingError::UnknownOpcode { code, offset })?;
        pos += size;

        let family = opcode.family();
        let mut expected = match opcode.arity() {
            Arity::Fixed(n) => n as usize,
            Arity::Counted | Arity::CountedPairs => 1,
        };
        let mut args = Vec::with_capacity(expected);

        while args.len() < expected {
            let ordinal = args.len();
            if family == OpcodeFamily::SortedJumpTable && ordinal == 0 {
                pos += ((4 - (base + pos as u64) % 4) % 4) as usize;
            }

            let width = policy.arg_width(family, ordinal);
            let value = bytes
                .get(pos..)
                .and_then(|rest| width.decode(rest, signed_operand(opcode, ordinal)))
                .ok_or(ListingError::Truncated {
                    offset: base + pos as u64,
                })?;
            pos += width.bytes();

            if ordinal == 0 && opcode.arity().is_variable() {
                expected = opcode
                    .arity()
                    .operand_count(Some(value))
                    .ok_or(ListingError::InvalidCount {
                        count: value,
                        offset: base + pos as u64 - width.bytes() as u64,
                    })?;
            }
            args.push(value);
        }

        instructions.push(Instruction {
            offset,
            opcode,
            args,
            size: (base + pos as u64 - offset) as usize,
        });
    }

    Ok(instructions)
}

/// Render a decoded stream, one instruction per line.
pub fn format_listing(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for instruction in instructions {
        out.push_str(&instruction.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_compressed() {
        let bytes = [167, 0xFF, 240, 111, 2, 0x02, 0x01, 33, 4];
        let listing = disassemble(Profile::ByteCompressed, &bytes, 0).unwrap();
        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0].opcode, Opcode::PushByte);
        assert_eq!(listing[0].args, vec![-1]);
        assert_eq!(listing[1].opcode, Opcode::CallFunc);
        assert_eq!(listing[1].args, vec![2, 0x0102]);
        assert_eq!(listing[1].offset, 2);
        assert_eq!(listing[1].size, 5);
        assert_eq!(listing[2].opcode, Opcode::AddWorldVar);
        assert_eq!(listing[2].args, vec![4]);
    }

    #[test]
    fn decode_counted_run() {
        let bytes = [175, 200, 1, 2];
        let err = disassemble(Profile::ByteCompressed, &bytes, 0).unwrap_err();
        assert_eq!(err, ListingError::Truncated { offset: 4 });

        let bytes = [175, 2, 0xFE, 2];
        let listing = disassemble(Profile::ByteCompressed, &bytes, 0).unwrap();
        assert_eq!(listing[0].args, vec![2, -2, 2]);
    }

    #[test]
    fn decode_aligned_jump_table() {
        let mut bytes = vec![240, 16, 0];
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&5i32.to_le_bytes());
        bytes.extend_from_slice(&64i32.to_le_bytes());

        // Slice starts at stream offset 1, so padding is a single byte.
        let listing = disassemble(Profile::ByteCompressed, &bytes, 1).unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].opcode, Opcode::CaseGotoSorted);
        assert_eq!(listing[0].args, vec![1, 5, 64]);
        assert_eq!(listing[0].size, bytes.len());
    }

    #[test]
    fn unknown_opcode() {
        let err = disassemble(Profile::WordAligned, &[0xFF, 0x01, 0, 0], 8).unwrap_err();
        assert_eq!(
            err,
            ListingError::UnknownOpcode {
                code: 0x1FF,
                offset: 8
            }
        );
    }

    #[test]
    fn negative_count() {
        let mut bytes = 256u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&(-1i32).to_le_bytes());
        let err = disassemble(Profile::WordAligned, &bytes, 0).unwrap_err();
        assert_eq!(err, ListingError::InvalidCount { count: -1, offset: 4 });
    }

    #[test]
    fn special_id_is_unsigned() {
        let listing = disassemble(Profile::ByteCompressed, &[168, 200, 0xFF], 0).unwrap();
        assert_eq!(listing[0].opcode, Opcode::Lspec1DirectB);
        assert_eq!(listing[0].args, vec![200, -1]);
    }

    #[test]
    fn listing_text() {
        let listing = disassemble(Profile::WordAligned, &[14, 0, 0, 0, 29, 0, 0, 0, 3, 0, 0, 0], 0)
            .unwrap();
        assert_eq!(
            format_listing(&listing),
            "00000000  ADD\n00000004  PUSH_MAP_VAR 3\n"
        );
    }

    #[test]
    fn branch_target_is_shown_as_offset() {
        let listing = disassemble(Profile::ByteCompressed, &[0, 52, 0, 0, 0, 0], 0).unwrap();
        assert_eq!(listing[1].args, vec![0]);
        assert_eq!(
            format_listing(&listing),
            "00000000  NOP\n00000001  GOTO -> 00000000\n"
        );
    }
}
