pub mod expr;
pub mod lparse;
pub mod mir;
pub mod resolver;

pub use lparse::LParse;
pub use resolver::Gen;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dparse::DParser;
    use crate::diagnostics::errors::CompilerMessages;
    use crate::gen::mir::Opcode;
    use crate::lexer::tokenize;
    use crate::string_interning::StringTable;
    use crate::symtable::{SymEntry, Symbol};
    use std::path::PathBuf;

    fn run(src: &str) -> (crate::symtable::SymTable, CompilerMessages) {
        let mut table = StringTable::new();
        let mut messages = CompilerMessages::new();
        let tokens = tokenize(src, PathBuf::from("<test>"), &mut table, &mut messages);

        let tree = {
            let mut parser = DParser::new(&tokens, &mut messages, &table);
            parser.parse_translation_unit()
        };

        let symtable = {
            let mut gen = Gen::new(&mut messages, &table);
            gen.run(&tree);
            gen.table
        };

        (symtable, messages)
    }

    /// S1: a bare `int main() { return 0; }` resolves to a strong `FnSymbol` whose MIR
    /// is `[PUSH(LitInt 0) ; RET]`.
    #[test]
    fn simple_function_resolves_with_expected_mir() {
        let (table, messages) = run("int main() { return 0; }");
        assert!(!messages.has_errors(), "{:?}", messages.errors);

        let Some(SymEntry::Resolved(Symbol::Fn { mir, .. })) = table.members.get("main") else {
            panic!("expected main to resolve as a function symbol");
        };

        let ops: Vec<&Opcode> = mir.instrs.iter().map(|i| &i.op).collect();
        assert!(matches!(ops[0], Opcode::Push(v) if v.meta == 0));
        assert!(matches!(ops[1], Opcode::Ret));
    }

    /// S2: a forward declaration followed by its definition resolves to one strong
    /// `FnSymbol`, with the forward decl parked in `heading_decls` and no duplicate
    /// declaration diagnostic.
    #[test]
    fn forward_declaration_then_definition_resolves_without_duplicate_error() {
        let (table, messages) = run("int f(int x);\nint f(int x) { return x; }");
        assert!(!messages.has_errors(), "{:?}", messages.errors);

        assert!(matches!(table.members.get("f"), Some(SymEntry::Resolved(Symbol::Fn { .. }))));
        assert_eq!(table.heading_decls.get("f").map(Vec::len), Some(1));
    }

    /// `a + b * c` emits operands before operators, multiplication
    /// binding tighter than addition.
    #[test]
    fn operator_precedence_orders_opcodes_correctly() {
        let (table, messages) = run("int f(int a, int b, int c) { return a + b * c; }");
        assert!(!messages.has_errors(), "{:?}", messages.errors);

        let Some(SymEntry::Resolved(Symbol::Fn { mir, .. })) = table.members.get("f") else {
            panic!("expected f to resolve as a function symbol");
        };

        let ops: Vec<&Opcode> = mir.instrs.iter().map(|i| &i.op).collect();
        let kinds: Vec<&'static str> = ops
            .iter()
            .map(|op| match op {
                Opcode::LoadName(_) => "load",
                Opcode::Mul => "mul",
                Opcode::Add => "add",
                Opcode::Ret => "ret",
                other => panic!("unexpected opcode in this body: {other:?}"),
            })
            .collect();

        assert_eq!(kinds, vec!["load", "load", "load", "mul", "add", "ret"]);
    }

    /// After a successfully parsed `if/else`, every emitted jump has
    /// been patched to an in-range target.
    #[test]
    fn if_else_patches_every_jump() {
        let (table, messages) = run("int cmp(int a) { if (a) return 1; else return 0; }");
        assert!(!messages.has_errors(), "{:?}", messages.errors);

        let Some(SymEntry::Resolved(Symbol::Fn { mir, .. })) = table.members.get("cmp") else {
            panic!("expected cmp to resolve as a function symbol");
        };

        for (i, instr) in mir.instrs.iter().enumerate() {
            match instr.op {
                Opcode::Jump(target) | Opcode::JumpIfFalse(target) => {
                    assert_ne!(target, usize::MAX, "instruction {i} left unpatched");
                    assert!(target <= mir.instrs.len());
                }
                _ => {}
            }
        }
    }
}
