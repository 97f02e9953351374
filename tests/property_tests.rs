//! Property tests for push packing, queue bookkeeping and label patching.

use pcode::prelude::*;
use proptest::prelude::*;

fn profile_strategy() -> impl Strategy<Value = Profile> {
    prop_oneof![Just(Profile::WordAligned), Just(Profile::ByteCompressed)]
}

/// Mostly small values so byte runs actually form.
fn immediate_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![
        4 => -128i32..=127,
        1 => any::<i32>(),
    ]
}

/// Values pushed by a decoded push instruction.
fn pushed_values(instruction: &Instruction) -> &[i32] {
    match instruction.opcode {
        Opcode::PushBytes => &instruction.args[1..],
        op if op.is_byte_push() || op == Opcode::PushNumber => &instruction.args,
        op => panic!("unexpected {} while draining", op),
    }
}

proptest! {
    #[test]
    fn drained_values_decode_in_order(
        profile in profile_strategy(),
        values in prop::collection::vec(immediate_strategy(), 0..600),
    ) {
        let (bytes, _) = pcode::assemble(profile, |asm| {
            for &value in &values {
                asm.push_immediate(value);
            }
            asm.drain_all();
            assert_eq!(asm.pending_immediates(), 0);
        })
        .unwrap();

        let listing = disassemble(profile, &bytes, 0).unwrap();
        let decoded: Vec<i32> = listing.iter().flat_map(|i| pushed_values(i).iter().copied()).collect();
        prop_assert_eq!(decoded, values);
    }

    #[test]
    fn partial_drain_removes_exactly_n(
        values in prop::collection::vec(immediate_strategy(), 1..100),
        split in any::<prop::sample::Index>(),
    ) {
        let n = split.index(values.len() + 1);
        let mut asm = Assembler::new(Profile::ByteCompressed);
        for &value in &values {
            asm.push_immediate(value);
        }
        asm.drain(n);
        prop_assert_eq!(asm.pending_immediates(), values.len() - n);
    }

    #[test]
    fn references_match_label_offsets(
        profile in profile_strategy(),
        sizes in prop::collection::vec(0usize..6, 1..12),
        targets in prop::collection::vec(any::<prop::sample::Index>(), 1..12),
        prefix in 0usize..7,
    ) {
        let mut asm = Assembler::new(profile);
        let mut labels = Vec::new();
        for &size in &sizes {
            labels.push(asm.create_label());
            for _ in 0..size {
                asm.emit(Opcode::Nop, &[]);
            }
        }

        // Branch to arbitrary labels from arbitrary earlier positions.
        let mut branches = Vec::new();
        for (i, target) in targets.iter().enumerate() {
            let from = labels[i % labels.len()];
            let to = *target.get(&labels);
            asm.seek(from);
            asm.emit_pseudo(Pseudo::Goto(to));
            branches.push(to);
        }
        asm.seek_end();

        let mut sink = MemorySink::with_prefix(vec![0xEE; prefix]);
        let report = asm.flush(&mut sink).unwrap();
        let listing = disassemble(profile, &sink.as_bytes()[prefix..], prefix as u64).unwrap();

        let mut gotos: Vec<i32> = listing
            .iter()
            .filter(|i| i.opcode == Opcode::Goto)
            .map(|i| i.args[0])
            .collect();
        let mut expected: Vec<i32> = branches
            .iter()
            .map(|&label| report.offset_of(label).unwrap() as i32)
            .collect();
        gotos.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(gotos, expected);

        for label in labels {
            let offset = report.offset_of(label).unwrap() as u64;
            prop_assert!(
                offset == report.end() as u64
                    || listing.iter().any(|i| i.offset == offset),
                "label at {} is not on an instruction boundary",
                offset
            );
        }
    }
}
