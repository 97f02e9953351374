//! Performance benchmarks for the assembler.
//!
//! Workloads:
//! - Push draining: long streams of constants in both layouts
//! - Branch-heavy units: many labels with forward and backward references
//! - Unit turnover: many small flushes reusing recycled storage
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pcode::prelude::*;
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Deterministic mix of small and wide constants.
fn constants(count: usize) -> Vec<i32> {
    (0..count as i32)
        .map(|i| if i % 7 == 0 { i * 10_000 } else { i % 100 })
        .collect()
}

fn bench_push_draining(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("push_draining");

    for count in [64usize, 1024, 16384] {
        let values = constants(count);
        group.throughput(Throughput::Elements(count as u64));
        for profile in [Profile::WordAligned, Profile::ByteCompressed] {
            group.bench_with_input(BenchmarkId::new(profile.as_str(), count), &values, |b, values| {
                let mut asm = Assembler::new(profile);
                let mut sink = MemorySink::new();
                b.iter(|| {
                    for &value in values {
                        asm.push_immediate(value);
                    }
                    asm.emit(Opcode::Drop, &[]);
                    sink.seek(0).unwrap();
                    black_box(asm.flush(&mut sink).unwrap());
                    end_profiling_frame();
                });
            });
        }
    }

    group.finish();
}

fn bench_branch_heavy(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("branch_heavy");

    for labels in [16usize, 256, 4096] {
        group.throughput(Throughput::Elements(labels as u64));
        group.bench_function(BenchmarkId::from_parameter(labels), |b| {
            let mut asm = Assembler::new(Profile::ByteCompressed);
            let mut sink = MemorySink::new();
            b.iter(|| {
                let mut marks = Vec::with_capacity(labels);
                for i in 0..labels {
                    marks.push(asm.create_label());
                    asm.push_immediate(i as i32);
                    asm.emit(Opcode::Lspec1, &[80]);
                    if i > 0 {
                        asm.emit_pseudo(Pseudo::IfGoto(marks[i / 2]));
                    }
                }
                for (i, &mark) in marks.iter().enumerate().step_by(3) {
                    asm.seek(mark);
                    asm.emit_pseudo(Pseudo::Goto(marks[(i * 7) % labels]));
                }
                asm.seek_end();
                sink.seek(0).unwrap();
                black_box(asm.flush(&mut sink).unwrap());
                end_profiling_frame();
            });
        });
    }

    group.finish();
}

fn bench_unit_turnover(c: &mut Criterion) {
    setup_profiler();
    c.bench_function("unit_turnover_1000", |b| {
        let mut asm = Assembler::new(Profile::ByteCompressed);
        let mut sink = MemorySink::new();
        b.iter(|| {
            sink.seek(0).unwrap();
            for unit in 0..1000 {
                let top = asm.create_label();
                asm.push_immediate(unit);
                asm.emit(Opcode::Delay, &[]);
                asm.emit_pseudo(Pseudo::Goto(top));
                black_box(asm.flush(&mut sink).unwrap());
            }
            end_profiling_frame();
        });
    });
}

criterion_group!(benches, bench_push_draining, bench_branch_heavy, bench_unit_turnover);
criterion_main!(benches);
