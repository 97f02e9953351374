//! Push optimizer.
//!
//! Draining the immediate queue picks the smallest push encoding available:
//! runs of byte-range values share one byte-push instruction, anything else
//! becomes a full `PUSH_NUMBER`.

use log::trace;
use pcode_core::{Arity, Opcode};

use crate::Assembler;
use crate::policy::MAX_BYTE_RUN;

impl Assembler {
    /// Emit the `count` oldest queued constants as push instructions.
    ///
    /// Exactly `count` values leave the queue, in order.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `count` values are queued.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn drain(&mut self, count: usize) {
        assert!(
            count <= self.immediates.len(),
            "draining {} immediates with only {} queued",
            count,
            self.immediates.len()
        );

        let mut remaining = count;
        while remaining > 0 {
            let run = self
                .immediates
                .leading_byte_run(remaining.min(MAX_BYTE_RUN));
            if let Some((op, take)) = self.policy.pack_byte_run(run) {
                trace!("{} packs {} of a {}-value byte run", op, take, run);
                self.emit_opcode(op);
                if op.arity() == Arity::Counted {
                    self.emit_arg(take as i32);
                }
                for _ in 0..take {
                    let value = self.immediates.dequeue();
                    self.emit_arg(value);
                }
                remaining -= take;
            } else {
                let value = self.immediates.dequeue();
                self.emit_opcode(Opcode::PushNumber);
                self.emit_arg(value);
                remaining -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pcode_core::{Opcode, Profile};

    use crate::{Assembler, MemorySink};

    fn drained(profile: Profile, values: &[i32]) -> Vec<u8> {
        let mut asm = Assembler::new(profile);
        for &value in values {
            asm.push_immediate(value);
        }
        asm.drain_all();
        assert_eq!(asm.pending_immediates(), 0);

        let mut sink = MemorySink::new();
        asm.flush(&mut sink).unwrap();
        sink.into_inner()
    }

    #[test]
    fn compressed_three_bytes() {
        assert_eq!(
            drained(Profile::ByteCompressed, &[5, 10, 3]),
            vec![Opcode::Push3Bytes.code() as u8, 5, 10, 3]
        );
    }

    #[test]
    fn compressed_single_byte() {
        assert_eq!(drained(Profile::ByteCompressed, &[-1]), vec![167, 0xFF]);
    }

    #[test]
    fn compressed_counted_run() {
        let values: Vec<i32> = (0..7).collect();
        assert_eq!(
            drained(Profile::ByteCompressed, &values),
            vec![175, 7, 0, 1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn compressed_run_is_capped() {
        let values = vec![1; 300];
        let bytes = drained(Profile::ByteCompressed, &values);
        // PUSH_BYTES 255 ..., then 45 more
        assert_eq!(&bytes[..2], &[175, 255]);
        assert_eq!(&bytes[257..259], &[175, 45]);
        assert_eq!(bytes.len(), 2 + 255 + 2 + 45);
    }

    #[test]
    fn word_packs_four() {
        assert_eq!(
            drained(Profile::WordAligned, &[1, 2, 3, 4, 5]),
            vec![178, 0, 0, 0, 1, 2, 3, 4, 3, 0, 0, 0, 5, 0, 0, 0]
        );
    }

    #[test]
    fn large_value_is_push_number() {
        assert_eq!(
            drained(Profile::ByteCompressed, &[200_000]),
            vec![3, 0x40, 0x0D, 0x03, 0x00]
        );
        assert_eq!(
            drained(Profile::WordAligned, &[200_000]),
            vec![3, 0, 0, 0, 0x40, 0x0D, 0x03, 0x00]
        );
    }

    #[test]
    fn mixed_runs_keep_order() {
        assert_eq!(
            drained(Profile::ByteCompressed, &[1, 2, 1000, 3]),
            vec![176, 1, 2, 3, 0xE8, 0x03, 0, 0, 167, 3]
        );
    }

    #[test]
    fn partial_drain_keeps_tail() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        for value in [1, 2, 3, 4] {
            asm.push_immediate(value);
        }
        asm.drain(3);
        assert_eq!(asm.pending_immediates(), 1);
        assert_eq!(asm.immediates.iter().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    #[should_panic(expected = "draining 2 immediates with only 1 queued")]
    fn overdrain_panics() {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        asm.push_immediate(1);
        asm.drain(2);
    }
}
