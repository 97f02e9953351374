//! Pseudo-operations.
//!
//! Code generators use these for the few emission steps that are not a
//! single instruction with integer operands: storing into a variable or
//! array by storage class, branching to a label, and building an
//! instruction one raw operand at a time.

use pcode_core::{AssignOp, Opcode, Storage, assign_array_opcode, assign_var_opcode};

use crate::Assembler;
use crate::node::Label;

/// A pseudo-operation for [`Assembler::emit_pseudo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pseudo {
    /// Start an instruction verbatim, without direct substitution.
    Opcode(Opcode),
    /// Raw operand for the current instruction.
    Arg(i32),
    /// Label offset as the next operand of the current instruction.
    ArgLabel(Label),
    /// Store the top of the stack into a variable.
    AssignVar {
        storage: Storage,
        index: i32,
        op: AssignOp,
    },
    /// Store the top of the stack into an array element.
    AssignArray {
        storage: Storage,
        index: i32,
        op: AssignOp,
    },
    /// Unconditional branch.
    Goto(Label),
    /// Branch if the popped value is non-zero.
    IfGoto(Label),
    /// Branch if the popped value is zero.
    IfNotGoto(Label),
}

impl Assembler {
    /// Emit a pseudo-operation.
    ///
    /// Operations that start an instruction emit queued constants first.
    ///
    /// # Panics
    ///
    /// Panics if an operand is emitted while constants are queued or with no
    /// instruction started, and for array stores into local storage.
    pub fn emit_pseudo(&mut self, pseudo: Pseudo) {
        match pseudo {
            Pseudo::Opcode(op) => {
                self.drain_all();
                self.emit_opcode(op);
            }
            Pseudo::Arg(value) => {
                self.assert_no_pending("operand");
                self.emit_arg(value);
            }
            Pseudo::ArgLabel(label) => self.reference(label),
            Pseudo::AssignVar { storage, index, op } => {
                self.drain_all();
                self.emit_opcode(assign_var_opcode(storage, op));
                self.emit_arg(index);
            }
            Pseudo::AssignArray { storage, index, op } => {
                let code = assign_array_opcode(storage, op)
                    .unwrap_or_else(|| panic!("{:?} storage has no array instructions", storage));
                self.drain_all();
                self.emit_opcode(code);
                self.emit_arg(index);
            }
            Pseudo::Goto(label) => self.branch(Opcode::Goto, label),
            Pseudo::IfGoto(label) => self.branch(Opcode::IfGoto, label),
            Pseudo::IfNotGoto(label) => self.branch(Opcode::IfNotGoto, label),
        }
    }

    fn branch(&mut self, op: Opcode, label: Label) {
        self.drain_all();
        self.emit_opcode(op);
        self.reference(label);
    }
}

#[cfg(test)]
mod tests {
    use pcode_core::Profile;

    use super::*;
    use crate::MemorySink;

    fn flushed(asm: &mut Assembler) -> Vec<u8> {
        let mut sink = MemorySink::new();
        asm.flush(&mut sink).unwrap();
        sink.into_inner()
    }

    #[test]
    fn raw_opcode_skips_substitution() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.push_immediate(2);
        asm.emit_pseudo(Pseudo::Opcode(Opcode::Delay));
        // PUSH_BYTE 2, DELAY
        assert_eq!(flushed(&mut asm), vec![167, 2, 55]);
    }

    #[test]
    fn raw_operands() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.emit_pseudo(Pseudo::Opcode(Opcode::Call));
        asm.emit_pseudo(Pseudo::Arg(12));
        assert_eq!(flushed(&mut asm), vec![203, 12]);
    }

    #[test]
    fn assign_var() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.push_immediate(7);
        asm.emit_pseudo(Pseudo::AssignVar {
            storage: Storage::World,
            index: 4,
            op: AssignOp::Add,
        });
        // PUSH_BYTE 7, ADD_WORLD_VAR 4
        assert_eq!(flushed(&mut asm), vec![167, 7, 33, 4]);
    }

    #[test]
    fn assign_array() {
        let mut asm = Assembler::new(Profile::WordAligned);
        asm.emit_pseudo(Pseudo::AssignArray {
            storage: Storage::Global,
            index: 2,
            op: AssignOp::Assign,
        });
        assert_eq!(flushed(&mut asm), vec![236, 0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "Local storage has no array instructions")]
    fn local_array_panics() {
        let mut asm = Assembler::new(Profile::WordAligned);
        asm.emit_pseudo(Pseudo::AssignArray {
            storage: Storage::Local,
            index: 0,
            op: AssignOp::Assign,
        });
    }

    #[test]
    fn label_operands_in_jump_table() {
        let mut asm = Assembler::new(Profile::WordAligned);
        let case = asm.create_label();
        asm.emit(Opcode::Nop, &[]);
        asm.emit_pseudo(Pseudo::Opcode(Opcode::CaseGotoSorted));
        asm.emit_pseudo(Pseudo::Arg(1));
        asm.emit_pseudo(Pseudo::Arg(42));
        asm.emit_pseudo(Pseudo::ArgLabel(case));

        let bytes = flushed(&mut asm);
        assert_eq!(
            bytes,
            vec![0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 42, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn if_not_goto_drains_condition() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        let end = asm.create_label();
        asm.push_immediate(0);
        asm.emit_pseudo(Pseudo::IfNotGoto(end));
        // PUSH_BYTE 0, IF_NOT_GOTO 0
        assert_eq!(flushed(&mut asm), vec![167, 0, 79, 0, 0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "operand emitted with 1 constants still queued")]
    fn arg_with_queued_constants_panics() {
        let mut asm = Assembler::new(Profile::WordAligned);
        asm.emit_pseudo(Pseudo::Opcode(Opcode::Call));
        asm.push_immediate(1);
        asm.emit_pseudo(Pseudo::Arg(0));
    }
}
