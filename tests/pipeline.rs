use std::path::PathBuf;

use z9front::ast::node::Node;
use z9front::diagnostics::errors::CompilerMessages;
use z9front::dparse::DParser;
use z9front::gen::Gen;
use z9front::gen::mir::Opcode;
use z9front::lexer::tokenize;
use z9front::string_interning::StringTable;
use z9front::symtable::{SymEntry, SymTable, Symbol};

fn parse(src: &str) -> (Node, CompilerMessages, StringTable) {
    let mut table = StringTable::new();
    let mut messages = CompilerMessages::new();
    let tokens = tokenize(src, PathBuf::from("<test>"), &mut table, &mut messages);
    let mut parser = DParser::new(&tokens, &mut messages, &table);
    let tree = parser.parse_translation_unit();
    (tree, messages, table)
}

fn run(src: &str) -> (SymTable, CompilerMessages) {
    let (tree, mut messages, table) = parse(src);
    let mut gen = Gen::new(&mut messages, &table);
    gen.run(&tree);
    (gen.table, messages)
}

fn top_level(tree: &Node) -> &[Node] {
    match tree {
        Node::Multiple(m) => &m.nodes,
        _ => panic!("expected a translation unit"),
    }
}

#[test]
fn s1_simple_function() {
    let (table, messages) = run("int main() { return 0; }");
    assert!(!messages.has_errors(), "{:?}", messages.errors);

    let Some(SymEntry::Resolved(Symbol::Fn { name, mir, .. })) = table.members.get("main") else {
        panic!("expected main to resolve as a function symbol");
    };
    assert_eq!(name, "main");

    let ops: Vec<&Opcode> = mir.instrs.iter().map(|i| &i.op).collect();
    assert_eq!(ops.len(), 2);
    assert!(matches!(ops[0], Opcode::Push(v) if v.meta == 0));
    assert!(matches!(ops[1], Opcode::Ret));
}

#[test]
fn s2_forward_declaration_then_definition() {
    let (table, messages) = run("int f(int x);\nint f(int x) { return x; }");
    assert!(!messages.has_errors(), "{:?}", messages.errors);

    assert!(matches!(table.members.get("f"), Some(SymEntry::Resolved(Symbol::Fn { .. }))));
    assert_eq!(table.heading_decls.get("f").map(Vec::len), Some(1));
}

#[test]
fn s3_identifier_as_type_hack() {
    let (tree, messages, table) = parse("Foo bar;\nconst Bar baz;\nint quux;\n");
    assert!(!messages.has_errors(), "{:?}", messages.errors);

    let decls = top_level(&tree);
    assert_eq!(decls.len(), 3);

    for decl in decls {
        let Node::Declaration(d) = decl else {
            panic!("expected a bare Declaration, got {decl:?}");
        };
        let Node::Multiple(specs) = d.declaration_specifiers.as_ref() else {
            panic!("expected declaration-specifiers to be a MultipleNode");
        };
        assert!(!specs.nodes.is_empty());
    }

    let Node::Declaration(first) = &decls[0] else { unreachable!() };
    let Node::Multiple(specs) = first.declaration_specifiers.as_ref() else { unreachable!() };
    let Node::Token(spec_tok) = &specs.nodes[0] else {
        panic!("expected Foo to parse as a bare type-name token");
    };
    assert_eq!(table.resolve(spec_tok.as_str_id().unwrap()), "Foo");

    let Node::Declaration(second) = &decls[1] else { unreachable!() };
    let Node::Multiple(specs2) = second.declaration_specifiers.as_ref() else { unreachable!() };
    assert_eq!(specs2.nodes.len(), 2);
    assert!(matches!(&specs2.nodes[0], Node::Token(t) if t.kind == z9front::lexer::TokenKind::Const));
    let Node::Token(bar_tok) = &specs2.nodes[1] else {
        panic!("expected Bar to parse as a bare type-name token");
    };
    assert_eq!(table.resolve(bar_tok.as_str_id().unwrap()), "Bar");
}

#[test]
fn s4_if_else_control_flow() {
    let (table, messages) = run("int cmp(int a) { if (a) return 1; else return 0; }");
    assert!(!messages.has_errors(), "{:?}", messages.errors);

    let Some(SymEntry::Resolved(Symbol::Fn { mir, .. })) = table.members.get("cmp") else {
        panic!("expected cmp to resolve as a function symbol");
    };

    let mut saw_jump_if_false = false;
    let mut saw_jump = false;
    for instr in &mir.instrs {
        match instr.op {
            Opcode::JumpIfFalse(target) => {
                saw_jump_if_false = true;
                assert_ne!(target, usize::MAX);
                assert!(target <= mir.instrs.len());
            }
            Opcode::Jump(target) => {
                saw_jump = true;
                assert_ne!(target, usize::MAX);
                assert!(target <= mir.instrs.len());
            }
            _ => {}
        }
    }
    assert!(saw_jump_if_false && saw_jump);
}

#[test]
fn s5_use_feature_directive() {
    let (tree, messages, table) = parse("@use_feature experimental_x, experimental_y;\n");
    assert!(!messages.has_errors(), "{:?}", messages.errors);

    let decls = top_level(&tree);
    assert_eq!(decls.len(), 1);

    let Node::UseFeature(directive) = &decls[0] else {
        panic!("expected a UseFeatureDirective, got {:?}", decls[0]);
    };
    assert!(directive.body.is_none());

    let names: Vec<&str> = directive
        .features
        .iter()
        .map(|t| table.resolve(t.as_str_id().unwrap()))
        .collect();
    assert_eq!(names, vec!["experimental_x", "experimental_y"]);
}

#[test]
fn s6_stray_semicolon_parses_as_empty_declaration_and_recovers() {
    let (tree, _messages, _) = parse("int ; int main() { return 0; }");

    let decls = top_level(&tree);
    assert_eq!(decls.len(), 2);
    assert!(matches!(decls[0], Node::EmptyDeclaration(_)));
    assert!(matches!(decls[1], Node::FunctionDefinition(_)));

    let (table, messages) = run("int ; int main() { return 0; }");
    assert!(!messages.has_errors(), "{:?}", messages.errors);
    assert!(matches!(table.members.get("main"), Some(SymEntry::Resolved(Symbol::Fn { .. }))));
}

#[test]
fn s6_top_level_garbage_is_reported_and_parsing_continues() {
    let (tree, messages, _) = parse("+ int main() { return 0; }");
    assert!(messages.has_errors());

    let decls = top_level(&tree);
    assert!(decls.iter().any(|n| matches!(n, Node::FunctionDefinition(_))));
}
