//! Direct-opcode substitution table.
//!
//! Many instructions take their inputs from the stack. When those inputs are
//! compile-time constants the machine offers a "direct" variant that carries
//! them inline instead, saving the push instructions. A few direct variants
//! have a further byte-sized form usable when every inlined value fits in a
//! signed byte.

use rustc_hash::FxHashMap;

use crate::Opcode;

/// One row of the substitution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectOpcode {
    /// Opcode whose inputs are normally pushed beforehand.
    pub generic: Opcode,
    /// Number of queued constants the direct variant consumes.
    pub required: usize,
    /// Variant with the constants inlined as full-width operands.
    pub direct: Opcode,
    /// Variant with the constants inlined as single bytes, if any.
    pub direct_b: Option<Opcode>,
}

impl DirectOpcode {
    const fn new(generic: Opcode, required: usize, direct: Opcode) -> Self {
        Self {
            generic,
            required,
            direct,
            direct_b: None,
        }
    }

    const fn with_byte_form(mut self, direct_b: Opcode) -> Self {
        self.direct_b = Some(direct_b);
        self
    }

    /// Operands the caller supplies ahead of the inlined constants.
    ///
    /// Only line specials have one: the special's numeric ID.
    pub fn leading_operands(&self) -> usize {
        self.direct
            .arity()
            .operand_count(None)
            .map_or(0, |total| total - self.required)
    }
}

/// Every substitution the instruction set supports.
pub const DIRECT_OPCODES: &[DirectOpcode] = &[
    DirectOpcode::new(Opcode::Lspec1, 1, Opcode::Lspec1Direct).with_byte_form(Opcode::Lspec1DirectB),
    DirectOpcode::new(Opcode::Lspec2, 2, Opcode::Lspec2Direct).with_byte_form(Opcode::Lspec2DirectB),
    DirectOpcode::new(Opcode::Lspec3, 3, Opcode::Lspec3Direct).with_byte_form(Opcode::Lspec3DirectB),
    DirectOpcode::new(Opcode::Lspec4, 4, Opcode::Lspec4Direct).with_byte_form(Opcode::Lspec4DirectB),
    DirectOpcode::new(Opcode::Lspec5, 5, Opcode::Lspec5Direct).with_byte_form(Opcode::Lspec5DirectB),
    DirectOpcode::new(Opcode::Delay, 1, Opcode::DelayDirect).with_byte_form(Opcode::DelayDirectB),
    DirectOpcode::new(Opcode::Random, 2, Opcode::RandomDirect).with_byte_form(Opcode::RandomDirectB),
    DirectOpcode::new(Opcode::ThingCount, 2, Opcode::ThingCountDirect),
    DirectOpcode::new(Opcode::TagWait, 1, Opcode::TagWaitDirect),
    DirectOpcode::new(Opcode::PolyWait, 1, Opcode::PolyWaitDirect),
    DirectOpcode::new(Opcode::ChangeFloor, 2, Opcode::ChangeFloorDirect),
    DirectOpcode::new(Opcode::ChangeCeiling, 2, Opcode::ChangeCeilingDirect),
    DirectOpcode::new(Opcode::ScriptWait, 1, Opcode::ScriptWaitDirect),
    DirectOpcode::new(Opcode::ConsoleCommand, 3, Opcode::ConsoleCommandDirect),
    DirectOpcode::new(Opcode::SetGravity, 1, Opcode::SetGravityDirect),
    DirectOpcode::new(Opcode::SetAirControl, 1, Opcode::SetAirControlDirect),
    DirectOpcode::new(Opcode::GiveInventory, 2, Opcode::GiveInventoryDirect),
    DirectOpcode::new(Opcode::TakeInventory, 2, Opcode::TakeInventoryDirect),
    DirectOpcode::new(Opcode::CheckInventory, 1, Opcode::CheckInventoryDirect),
    DirectOpcode::new(Opcode::Spawn, 6, Opcode::SpawnDirect),
    DirectOpcode::new(Opcode::SpawnSpot, 4, Opcode::SpawnSpotDirect),
    DirectOpcode::new(Opcode::SetMusic, 3, Opcode::SetMusicDirect),
    DirectOpcode::new(Opcode::LocalSetMusic, 3, Opcode::LocalSetMusicDirect),
    DirectOpcode::new(Opcode::SetFont, 1, Opcode::SetFontDirect),
];

/// Constant-time lookup over [`DIRECT_OPCODES`], keyed by generic opcode.
#[derive(Debug, Clone)]
pub struct DirectTable {
    entries: FxHashMap<Opcode, DirectOpcode>,
}

impl DirectTable {
    /// Build the table for the full instruction set.
    pub fn new() -> Self {
        Self::from_entries(DIRECT_OPCODES)
    }

    /// Build a table from an explicit set of rows.
    pub fn from_entries(rows: &[DirectOpcode]) -> Self {
        let mut entries =
            FxHashMap::with_capacity_and_hasher(rows.len(), Default::default());
        for row in rows {
            entries.insert(row.generic, *row);
        }
        Self { entries }
    }

    /// Look up the substitution for a generic opcode.
    pub fn get(&self, generic: Opcode) -> Option<&DirectOpcode> {
        self.entries.get(&generic)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DirectTable {
    fn default() -> Self {
        Self::new()
    }
}
