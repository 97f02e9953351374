//! Opcode and operand encoding.
//!
//! Bytes always go to the tail of the segment store. If the node under the
//! cursor is the code segment that owns the most recent bytes, it simply
//! grows; otherwise a fresh code segment node is spliced in at the cursor.

use log::trace;
use pcode_core::{Opcode, OpcodeFamily};

use crate::Assembler;
use crate::node::NodeKind;
use crate::segment::CodeSegment;

impl Assembler {
    /// Emit an instruction with its caller-supplied operands.
    ///
    /// `PUSH_NUMBER` is not encoded; its operand joins the immediate queue.
    /// When the opcode has a direct form and enough constants are queued,
    /// the constants become inline operands of the direct form. Otherwise
    /// the queue is drained first and the opcode is emitted as given.
    ///
    /// # Panics
    ///
    /// Panics if `operands` does not match the opcode's arity. For
    /// variable-length opcodes the first operand is the count.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn emit(&mut self, op: Opcode, operands: &[i32]) {
        let expected = op.arity().operand_count(operands.first().copied());
        assert_eq!(
            expected,
            Some(operands.len()),
            "{} given {} operands",
            op,
            operands.len()
        );

        if op == Opcode::PushNumber {
            self.push_immediate(operands[0]);
            return;
        }

        let direct = self
            .direct
            .get(op)
            .copied()
            .filter(|entry| self.immediates.len() >= entry.required);

        let Some(entry) = direct else {
            self.drain_all();
            self.emit_opcode(op);
            for &operand in operands {
                self.emit_arg(operand);
            }
            return;
        };

        assert_eq!(
            operands.len(),
            entry.leading_operands(),
            "{} takes its leading operands from the caller",
            entry.direct
        );
        let code = entry
            .direct_b
            .filter(|_| self.policy.byte_direct())
            .filter(|_| self.immediates.tail_is_byte_range(entry.required))
            .unwrap_or(entry.direct);
        trace!(
            "{} -> {} with {} of {} queued immediates",
            op,
            code,
            entry.required,
            self.immediates.len()
        );

        self.drain(self.immediates.len() - entry.required);
        self.emit_opcode(code);
        for &operand in operands {
            self.emit_arg(operand);
        }
        for _ in 0..entry.required {
            let value = self.immediates.dequeue();
            self.emit_arg(value);
        }
    }

    /// Write an opcode and make it the instruction receiving operands.
    pub(crate) fn emit_opcode(&mut self, op: Opcode) {
        let (bytes, len) = self.policy.encode_opcode(op).to_bytes();
        self.write(&bytes[..len]);
        self.opcode = Some(op);
        self.arg_index = 0;
    }

    /// Write the next operand of the current instruction.
    ///
    /// The width comes from the policy, given the instruction's family and
    /// the operand's ordinal. Values are truncated to that width.
    pub(crate) fn emit_arg(&mut self, value: i32) {
        let (family, ordinal) = self.begin_arg();
        let width = self.policy.arg_width(family, ordinal);
        let (bytes, len) = width.encode(value);
        self.write(&bytes[..len]);
    }

    /// Claim the next operand slot of the current instruction.
    ///
    /// Sorted jump tables start on a 4-byte boundary, so an alignment marker
    /// goes in front of their first operand.
    pub(crate) fn begin_arg(&mut self) -> (OpcodeFamily, usize) {
        let op = self
            .opcode
            .unwrap_or_else(|| panic!("operand emitted with no active instruction"));
        let family = op.family();
        if family == OpcodeFamily::SortedJumpTable && self.arg_index == 0 {
            self.nodes.insert(NodeKind::Align4);
        }
        let ordinal = self.arg_index;
        self.arg_index += 1;
        (family, ordinal)
    }

    /// Append bytes at the cursor.
    fn write(&mut self, bytes: &[u8]) {
        let cursor = self.nodes.cursor();
        let segment = match self.open_segment {
            Some(open) if cursor == Some(open) => open,
            _ => {
                let start = self.store.next_position();
                let node = self.nodes.insert(NodeKind::Code(CodeSegment {
                    block: start.block,
                    start: start.offset,
                    len: 0,
                }));
                self.open_segment = Some(node);
                node
            }
        };

        self.store.append(bytes);
        match self.nodes.kind_mut(segment) {
            NodeKind::Code(code) => code.len += bytes.len(),
            other => unreachable!("open segment is {:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use pcode_core::{Opcode, Profile};

    use crate::{Assembler, MemorySink};

    fn flushed(assembler: &mut Assembler) -> Vec<u8> {
        let mut sink = MemorySink::new();
        assembler.flush(&mut sink).unwrap();
        sink.into_inner()
    }

    #[test]
    fn plain_opcode_word() {
        let mut asm = Assembler::new(Profile::WordAligned);
        asm.emit(Opcode::Add, &[]);
        assert_eq!(flushed(&mut asm), vec![14, 0, 0, 0]);
    }

    #[test]
    fn escaped_opcode_compressed() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.emit(Opcode::Add, &[]);
        asm.emit(Opcode::StrLen, &[]);
        assert_eq!(flushed(&mut asm), vec![14, 240, 13]);
    }

    #[test]
    fn storage_operand_width() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.emit(Opcode::PushMapVar, &[3]);
        assert_eq!(flushed(&mut asm), vec![29, 3]);

        let mut asm = Assembler::new(Profile::WordAligned);
        asm.emit(Opcode::PushMapVar, &[3]);
        assert_eq!(flushed(&mut asm), vec![29, 0, 0, 0, 3, 0, 0, 0]);
    }

    #[test]
    fn call_func_operand_widths() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.emit(Opcode::CallFunc, &[2, 0x0102]);
        assert_eq!(flushed(&mut asm), vec![240, 111, 2, 0x02, 0x01]);
    }

    #[test]
    fn special_id_is_a_byte_when_compressed() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.emit(Opcode::Lspec2, &[80]);
        assert_eq!(flushed(&mut asm), vec![5, 80]);

        let mut asm = Assembler::new(Profile::WordAligned);
        asm.emit(Opcode::Lspec2, &[80]);
        assert_eq!(flushed(&mut asm), vec![5, 0, 0, 0, 80, 0, 0, 0]);
    }

    #[test]
    fn push_number_goes_to_queue() {
        let mut asm = Assembler::new(Profile::WordAligned);
        asm.emit(Opcode::PushNumber, &[7]);
        assert_eq!(asm.pending_immediates(), 1);
        assert_eq!(asm.staged_bytes(), 0);
    }

    #[test]
    fn direct_byte_substitution() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.push_immediate(1);
        asm.emit(Opcode::Lspec1, &[80]);
        assert_eq!(flushed(&mut asm), vec![168, 80, 1]);
    }

    #[test]
    fn direct_without_byte_form_in_word_profile() {
        let mut asm = Assembler::new(Profile::WordAligned);
        asm.push_immediate(1);
        asm.emit(Opcode::Lspec1, &[80]);
        assert_eq!(
            flushed(&mut asm),
            vec![9, 0, 0, 0, 80, 0, 0, 0, 1, 0, 0, 0]
        );
    }

    #[test]
    fn direct_word_form_for_wide_value() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.push_immediate(1000);
        asm.emit(Opcode::Delay, &[]);
        assert_eq!(flushed(&mut asm), vec![56, 0xE8, 0x03, 0, 0]);
    }

    #[test]
    fn direct_checks_consumed_values_only() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.push_immediate(100_000);
        asm.push_immediate(3);
        asm.emit(Opcode::Delay, &[]);
        // PUSH_NUMBER 100000, DELAY_DIRECT_B 3
        assert_eq!(
            flushed(&mut asm),
            vec![3, 0xA0, 0x86, 0x01, 0x00, 173, 3]
        );
    }

    #[test]
    fn generic_without_enough_immediates() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.push_immediate(4);
        asm.emit(Opcode::Random, &[]);
        // PUSH_BYTE 4, RANDOM
        assert_eq!(flushed(&mut asm), vec![167, 4, 57]);
    }

    #[test]
    fn sorted_jump_table_is_aligned() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.emit(Opcode::CaseGotoSorted, &[1, 5, 64]);
        let bytes = flushed(&mut asm);
        assert_eq!(&bytes[..2], &[240, 16]);
        assert_eq!(&bytes[2..4], &[0, 0]);
        assert_eq!(&bytes[4..], &[1, 0, 0, 0, 5, 0, 0, 0, 64, 0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "given 0 operands")]
    fn arity_mismatch_panics() {
        let mut asm = Assembler::new(Profile::WordAligned);
        asm.emit(Opcode::PushMapVar, &[]);
    }
}
