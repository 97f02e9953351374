//! Instruction set of the p-code stack machine.
//!
//! This crate holds the static description of the machine: the opcode
//! catalogue with mnemonics, operand layouts and width families, the
//! direct-opcode substitution table, compound-assignment selection for each
//! storage class, and the two binary density profiles.
//!
//! It has no emission state of its own; see `pcode-assembler` for that.

pub mod direct;
pub mod error;
pub mod opcode;
pub mod profile;
pub mod storage;

pub use direct::{DIRECT_OPCODES, DirectOpcode, DirectTable};
pub use error::ProfileParseError;
pub use opcode::{Arity, Opcode, OpcodeFamily};
pub use profile::Profile;
pub use storage::{AssignOp, Storage, assign_array_opcode, assign_var_opcode};

/// Smallest value a byte-sized operand can carry.
pub const BYTE_MIN: i32 = i8::MIN as i32;

/// Largest value a byte-sized operand can carry.
pub const BYTE_MAX: i32 = i8::MAX as i32;

/// Whether `value` survives encoding as a signed byte operand.
#[inline]
pub fn is_byte_range(value: i32) -> bool {
    (BYTE_MIN..=BYTE_MAX).contains(&value)
}
