use crate::lexer::loc::Loc;
use crate::string_interning::StringId;

/// A compile-time-known operand for a `PUSH` instruction. `meta = None` would mean
/// "runtime value", but `PUSH` only ever carries a literal here, so this stays a bare
/// constant rather than an `Option` — see `Opcode::Push`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValType {
    LitInt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Val {
    pub typ: ValType,
    pub meta: i64,
    pub loc: Loc,
}

impl Val {
    pub fn lit_int(meta: i64, loc: Loc) -> Self {
        Val {
            typ: ValType::LitInt,
            meta,
            loc,
        }
    }
}

/// The closed MIR opcode set. `Jump`/`JumpIfFalse` carry a target instruction
/// index, forward-patched after emission via `MirBuilder::patch_jump`.
#[derive(Debug, Clone, PartialEq)]
pub enum Opcode {
    RetVoid,
    Ret,
    LoadName(StringId),
    Push(Val),
    Add,
    Sub,
    Mul,
    Rem,
    Div,
    Shl,
    Shr,
    Lt,
    Gt,
    Let,
    Get,
    Eq,
    Neq,
    And,
    Xor,
    Or,
    Local,
    LoadPtr,
    StorePtr,
    Jump(usize),
    JumpIfFalse(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instr {
    pub op: Opcode,
    pub loc: Loc,
}

/// An opaque handle to a jump instruction returned by `MirBuilder::emit_jump`/
/// `emit_jump_if_false`. Holding the handle rather than the raw index keeps callers
/// from reaching past the builder and poking an unrelated instruction (prefer
/// stable handles ... over raw indices").
#[derive(Debug, Clone, Copy)]
pub struct JumpHandle(usize);

#[derive(Debug, Clone, Default)]
pub struct MirFunction {
    pub instrs: Vec<Instr>,
}

#[derive(Debug, Default)]
pub struct MirBuilder {
    instrs: Vec<Instr>,
}

impl MirBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, op: Opcode, loc: Loc) {
        crate::mir_log!("{:?} @ {}", op, loc);
        self.instrs.push(Instr { op, loc });
    }

    pub fn emit_jump(&mut self, loc: Loc) -> JumpHandle {
        let handle = JumpHandle(self.instrs.len());
        self.emit(Opcode::Jump(usize::MAX), loc);
        handle
    }

    pub fn emit_jump_if_false(&mut self, loc: Loc) -> JumpHandle {
        let handle = JumpHandle(self.instrs.len());
        self.emit(Opcode::JumpIfFalse(usize::MAX), loc);
        handle
    }

    /// Sets the target of a previously emitted jump to the current instruction index —
    /// i.e. "the next instruction to be emitted".
    pub fn patch_jump_here(&mut self, handle: JumpHandle) {
        let target = self.instrs.len();
        self.patch_jump(handle, target);
    }

    pub fn patch_jump(&mut self, handle: JumpHandle, target: usize) {
        match &mut self.instrs[handle.0].op {
            Opcode::Jump(t) | Opcode::JumpIfFalse(t) => *t = target,
            other => unreachable!("handle did not point at a jump instruction: {other:?}"),
        }
    }

    pub fn here(&self) -> usize {
        self.instrs.len()
    }

    pub fn finish(self) -> MirFunction {
        MirFunction { instrs: self.instrs }
    }

    /// Every `Jump`/`JumpIfFalse` must have been patched before this is
    /// considered safe to hand off.
    pub fn has_unpatched_jumps(&self) -> bool {
        self.instrs.iter().any(|i| {
            matches!(i.op, Opcode::Jump(t) | Opcode::JumpIfFalse(t) if t == usize::MAX)
        })
    }
}
