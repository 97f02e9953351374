//! P-code assembler backend.
//!
//! Turns a stream of instruction-emission requests into a finished,
//! relocated instruction stream for the p-code stack machine, in either the
//! word-aligned or the byte-compressed layout.
//!
//! The pieces, from the bottom up:
//!
//! - [`segment`]: append-only staging blocks holding encoded bytes
//! - [`immediate`]: the queue of constant pushes not yet emitted
//! - [`policy`]: per-profile opcode, operand and push-run encoding
//! - [`node`]: the reorderable list of code, labels and references
//! - [`sink`]: seekable destinations for flushed code
//! - [`Assembler`]: the context tying them together
//!
//! # Example
//!
//! ```ignore
//! use pcode_assembler::{Assembler, MemorySink, Pseudo};
//! use pcode_core::{Opcode, Profile};
//!
//! let mut asm = Assembler::new(Profile::ByteCompressed);
//! let top = asm.create_label();
//! asm.push_immediate(35);
//! asm.emit(Opcode::Delay, &[]);
//! asm.emit_pseudo(Pseudo::Goto(top));
//!
//! let mut sink = MemorySink::new();
//! let report = asm.flush(&mut sink)?;
//! assert_eq!(report.offset_of(top), Some(0));
//! ```

mod assembler;
mod encoder;
pub mod error;
mod flush;
pub mod immediate;
pub mod listing;
pub mod node;
mod optimizer;
pub mod options;
pub mod policy;
mod pseudo;
pub mod segment;
pub mod sink;

pub use assembler::Assembler;
pub use error::{EmitError, ListingError};
pub use flush::FlushReport;
pub use listing::{Instruction, disassemble, format_listing};
pub use node::Label;
pub use options::AssemblerOptions;
pub use policy::{EncodingPolicy, OpcodeEncoding, Width, policy_for};
pub use pseudo::Pseudo;
pub use sink::{MemorySink, OutputSink, WriteSink};
