use crate::ast::node::Node;
use crate::diagnostics::errors::CompilerMessages;
use crate::gen::lparse::LParse;
use crate::string_interning::StringTable;
use crate::symtable::{declarator_name, SymEntry, SymTable, Symbol};

/// Two-phase resolver: pass 1 predeclares every top-level name (functions and
/// global declarations), pass 2 walks each strong `FunctionDefinition`'s captured body
/// with an `LParse`, catching a `ParsingError` at function granularity so one bad body
/// never stops the rest of the translation unit from resolving.
pub struct Gen<'a> {
    pub table: SymTable,
    messages: &'a mut CompilerMessages,
    string_table: &'a StringTable,
}

impl<'a> Gen<'a> {
    pub fn new(messages: &'a mut CompilerMessages, string_table: &'a StringTable) -> Self {
        Gen {
            table: SymTable::new(),
            messages,
            string_table,
        }
    }

    pub fn run(&mut self, tree: &Node) -> &SymTable {
        self.predeclare(tree);
        self.resolve_all();
        &self.table
    }

    fn predeclare(&mut self, tree: &Node) {
        let Node::Multiple(mn) = tree else {
            return;
        };

        for node in &mn.nodes {
            self.predeclare_one(node);
        }
    }

    fn predeclare_one(&mut self, node: &Node) {
        match node {
            Node::Declaration(d) => {
                let Some(name_tok) = declarator_name(&d.declarator) else {
                    return;
                };
                let name = self.string_table.resolve(
                    name_tok
                        .as_str_id()
                        .unwrap_or(crate::string_interning::StringId::from_u32(0)),
                );
                let is_weak = d.initializer.is_none();
                self.table
                    .declare(name, node.clone(), is_weak, node.loc().clone(), self.messages);
            }
            Node::FunctionDefinition(f) => {
                let Some(name_tok) = declarator_name(&f.declarator) else {
                    return;
                };
                let name = self.string_table.resolve(
                    name_tok
                        .as_str_id()
                        .unwrap_or(crate::string_interning::StringId::from_u32(0)),
                );
                let is_weak = f.body.is_none();
                self.table
                    .declare(name, node.clone(), is_weak, node.loc().clone(), self.messages);
            }
            // meta directives, empty declarations, record/enum specifiers standing
            // alone: nothing to predeclare.
            _ => {}
        }
    }

    fn resolve_all(&mut self) {
        let names = self.table.order.clone();

        for name in names {
            let Some(entry) = self.table.members.get(&name) else {
                continue;
            };

            let (node, is_weak) = match entry {
                SymEntry::Pending { node, is_weak } => (node.clone(), *is_weak),
                SymEntry::Resolved(_) => continue,
            };

            if is_weak {
                crate::gen_log!("resolving \"{}\" as weak/extern", name);
                self.table.resolve(&name, Symbol::ExternFn(node));
                continue;
            }

            let Node::FunctionDefinition(f) = &node else {
                // a strong non-function declaration (e.g. a global with an
                // initializer): predeclared, but this front-end's Symbol sum type has
                // no variant for it (the Symbol sum type only models function symbols).
                self.table.resolve(&name, Symbol::ExternFn(node));
                continue;
            };

            let body_tokens: &[crate::lexer::tokens::Token] = match f.body.as_deref() {
                Some(Node::Compound(c)) => &c.tokens,
                _ => &[],
            };

            crate::gen_log!("resolving \"{}\" as a function body ({} tokens)", name, body_tokens.len());

            let mut lparse = LParse::new(body_tokens, self.messages, self.string_table);
            let _ = lparse.parse_body(); // ParsingError is swallowed at function granularity

            self.table.resolve(
                &name,
                Symbol::Fn {
                    name: name.clone(),
                    loc: node.loc().clone(),
                    mir: lparse.mir.finish(),
                },
            );
        }
    }
}
