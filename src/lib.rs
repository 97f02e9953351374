//! P-code emission backend.
//!
//! This crate ties together the instruction set description in
//! [`pcode_core`] and the staging/patching assembler in [`pcode_assembler`].
//! Code generators normally only need the [`prelude`].
//!
//! ```ignore
//! use pcode::prelude::*;
//!
//! let (bytes, report) = pcode::assemble(Profile::ByteCompressed, |asm| {
//!     asm.push_immediate(1);
//!     asm.emit(Opcode::Lspec1, &[80]);
//! })?;
//! ```

pub use pcode_assembler as assembler;
pub use pcode_core as isa;

pub mod prelude {
    pub use pcode_assembler::{
        Assembler, AssemblerOptions, EmitError, FlushReport, Instruction, Label, ListingError,
        MemorySink, OutputSink, Pseudo, WriteSink, disassemble, format_listing,
    };
    pub use pcode_core::{AssignOp, Opcode, Profile, Storage};
}

use prelude::*;

/// Assemble a single compilation unit into a fresh buffer.
///
/// `build` drives the assembler; the unit is flushed when it returns.
///
/// # Errors
///
/// Returns an error if an offset exceeds 32 bits.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn assemble<F>(profile: Profile, build: F) -> Result<(Vec<u8>, FlushReport), EmitError>
where
    F: FnOnce(&mut Assembler),
{
    let mut assembler = Assembler::new(profile);
    build(&mut assembler);

    let mut sink = MemorySink::new();
    let report = assembler.flush(&mut sink)?;
    log::debug!("assembled {} bytes in the {} layout", report.len(), profile);
    Ok((sink.into_inner(), report))
}

/// Assemble a unit and render its listing.
///
/// # Panics
///
/// Panics if the assembler produced a stream it cannot decode.
pub fn assemble_listing<F>(profile: Profile, build: F) -> Result<String, EmitError>
where
    F: FnOnce(&mut Assembler),
{
    let (bytes, report) = assemble(profile, build)?;
    let instructions = disassemble(profile, &bytes, report.start() as u64)
        .unwrap_or_else(|err| panic!("assembled stream does not decode: {}", err));
    Ok(format_listing(&instructions))
}
