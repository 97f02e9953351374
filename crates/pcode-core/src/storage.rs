//! Storage classes and compound-assignment opcode selection.

use crate::Opcode;

/// Where a variable or array lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Storage {
    /// Script-local variable. Local arrays are not addressable by index.
    Local,
    /// Map (module) scope.
    Map,
    /// Shared across maps of a hub.
    World,
    /// Shared across the whole game.
    Global,
}

/// Assignment operators, simple and compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    BitAnd,
    BitXor,
    BitOr,
}

/// Select the opcode storing the top of the stack into a variable.
pub fn assign_var_opcode(storage: Storage, op: AssignOp) -> Opcode {
    use AssignOp as A;
    use Opcode as O;
    use Storage as S;

    match (op, storage) {
        (A::Assign, S::Local) => O::AssignScriptVar,
        (A::Assign, S::Map) => O::AssignMapVar,
        (A::Assign, S::World) => O::AssignWorldVar,
        (A::Assign, S::Global) => O::AssignGlobalVar,
        (A::Add, S::Local) => O::AddScriptVar,
        (A::Add, S::Map) => O::AddMapVar,
        (A::Add, S::World) => O::AddWorldVar,
        (A::Add, S::Global) => O::AddGlobalVar,
        (A::Sub, S::Local) => O::SubScriptVar,
        (A::Sub, S::Map) => O::SubMapVar,
        (A::Sub, S::World) => O::SubWorldVar,
        (A::Sub, S::Global) => O::SubGlobalVar,
        (A::Mul, S::Local) => O::MulScriptVar,
        (A::Mul, S::Map) => O::MulMapVar,
        (A::Mul, S::World) => O::MulWorldVar,
        (A::Mul, S::Global) => O::MulGlobalVar,
        (A::Div, S::Local) => O::DivScriptVar,
        (A::Div, S::Map) => O::DivMapVar,
        (A::Div, S::World) => O::DivWorldVar,
        (A::Div, S::Global) => O::DivGlobalVar,
        (A::Mod, S::Local) => O::ModScriptVar,
        (A::Mod, S::Map) => O::ModMapVar,
        (A::Mod, S::World) => O::ModWorldVar,
        (A::Mod, S::Global) => O::ModGlobalVar,
        (A::Shl, S::Local) => O::LsScriptVar,
        (A::Shl, S::Map) => O::LsMapVar,
        (A::Shl, S::World) => O::LsWorldVar,
        (A::Shl, S::Global) => O::LsGlobalVar,
        (A::Shr, S::Local) => O::RsScriptVar,
        (A::Shr, S::Map) => O::RsMapVar,
        (A::Shr, S::World) => O::RsWorldVar,
        (A::Shr, S::Global) => O::RsGlobalVar,
        (A::BitAnd, S::Local) => O::AndScriptVar,
        (A::BitAnd, S::Map) => O::AndMapVar,
        (A::BitAnd, S::World) => O::AndWorldVar,
        (A::BitAnd, S::Global) => O::AndGlobalVar,
        (A::BitXor, S::Local) => O::EorScriptVar,
        (A::BitXor, S::Map) => O::EorMapVar,
        (A::BitXor, S::World) => O::EorWorldVar,
        (A::BitXor, S::Global) => O::EorGlobalVar,
        (A::BitOr, S::Local) => O::OrScriptVar,
        (A::BitOr, S::Map) => O::OrMapVar,
        (A::BitOr, S::World) => O::OrWorldVar,
        (A::BitOr, S::Global) => O::OrGlobalVar,
    }
}

/// Select the opcode storing the top of the stack into an array element.
///
/// The element index is expected below the value on the stack. Returns None
/// for [`Storage::Local`], which has no array instructions.
pub fn assign_array_opcode(storage: Storage, op: AssignOp) -> Option<Opcode> {
    use AssignOp as A;
    use Opcode as O;
    use Storage as S;

    let code = match (op, storage) {
        (_, S::Local) => return None,
        (A::Assign, S::Map) => O::AssignMapArray,
        (A::Assign, S::World) => O::AssignWorldArray,
        (A::Assign, S::Global) => O::AssignGlobalArray,
        (A::Add, S::Map) => O::AddMapArray,
        (A::Add, S::World) => O::AddWorldArray,
        (A::Add, S::Global) => O::AddGlobalArray,
        (A::Sub, S::Map) => O::SubMapArray,
        (A::Sub, S::World) => O::SubWorldArray,
        (A::Sub, S::Global) => O::SubGlobalArray,
        (A::Mul, S::Map) => O::MulMapArray,
        (A::Mul, S::World) => O::MulWorldArray,
        (A::Mul, S::Global) => O::MulGlobalArray,
        (A::Div, S::Map) => O::DivMapArray,
        (A::Div, S::World) => O::DivWorldArray,
        (A::Div, S::Global) => O::DivGlobalArray,
        (A::Mod, S::Map) => O::ModMapArray,
        (A::Mod, S::World) => O::ModWorldArray,
        (A::Mod, S::Global) => O::ModGlobalArray,
        (A::Shl, S::Map) => O::LsMapArray,
        (A::Shl, S::World) => O::LsWorldArray,
        (A::Shl, S::Global) => O::LsGlobalArray,
        (A::Shr, S::Map) => O::RsMapArray,
        (A::Shr, S::World) => O::RsWorldArray,
        (A::Shr, S::Global) => O::RsGlobalArray,
        (A::BitAnd, S::Map) => O::AndMapArray,
        (A::BitAnd, S::World) => O::AndWorldArray,
        (A::BitAnd, S::Global) => O::AndGlobalArray,
        (A::BitXor, S::Map) => O::EorMapArray,
        (A::BitXor, S::World) => O::EorWorldArray,
        (A::BitXor, S::Global) => O::EorGlobalArray,
        (A::BitOr, S::Map) => O::OrMapArray,
        (A::BitOr, S::World) => O::OrWorldArray,
        (A::BitOr, S::Global) => O::OrGlobalArray,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpcodeFamily;

    const STORAGES: [Storage; 4] = [Storage::Local, Storage::Map, Storage::World, Storage::Global];
    const OPS: [AssignOp; 11] = [
        AssignOp::Assign,
        AssignOp::Add,
        AssignOp::Sub,
        AssignOp::Mul,
        AssignOp::Div,
        AssignOp::Mod,
        AssignOp::Shl,
        AssignOp::Shr,
        AssignOp::BitAnd,
        AssignOp::BitXor,
        AssignOp::BitOr,
    ];

    #[test]
    fn var_opcodes_are_distinct_storage_ops() {
        let mut seen = Vec::new();
        for storage in STORAGES {
            for op in OPS {
                let code = assign_var_opcode(storage, op);
                assert_eq!(code.family(), OpcodeFamily::Storage);
                assert!(code.name().ends_with("_VAR"), "{}", code);
                assert!(!seen.contains(&code), "{} selected twice", code);
                seen.push(code);
            }
        }
        assert_eq!(seen.len(), 44);
    }

    #[test]
    fn array_opcodes_are_distinct_storage_ops() {
        let mut seen = Vec::new();
        for storage in STORAGES {
            for op in OPS {
                let Some(code) = assign_array_opcode(storage, op) else {
                    assert_eq!(storage, Storage::Local);
                    continue;
                };
                assert_eq!(code.family(), OpcodeFamily::Storage);
                assert!(code.name().ends_with("_ARRAY"), "{}", code);
                assert!(!seen.contains(&code), "{} selected twice", code);
                seen.push(code);
            }
        }
        assert_eq!(seen.len(), 33);
    }

    #[test]
    fn selection_examples() {
        assert_eq!(assign_var_opcode(Storage::Local, AssignOp::Assign), Opcode::AssignScriptVar);
        assert_eq!(assign_var_opcode(Storage::World, AssignOp::Shr), Opcode::RsWorldVar);
        assert_eq!(
            assign_array_opcode(Storage::Map, AssignOp::Sub),
            Some(Opcode::SubMapArray)
        );
        assert_eq!(assign_array_opcode(Storage::Local, AssignOp::Add), None);
    }
}
