use crate::ast::node::Node;
use crate::diagnostics::errors::{CompilerMessages, ErrorType};
use crate::lexer::loc::Loc;
use rustc_hash::FxHashMap;

/// A name's entry across the two `Gen` passes: pending after pass 1, resolved after
/// pass 2 visits it. Modeled as its own sum rather than a loosely-typed union so pass 2
/// can match exhaustively and the compiler enforces the one-transition-per-name rule.
#[derive(Debug, Clone)]
pub enum SymEntry {
    Pending { node: Node, is_weak: bool },
    Resolved(Symbol),
}

#[derive(Debug, Clone)]
pub enum Symbol {
    /// A weak (bodyless) function: forward declaration or extern.
    ExternFn(Node),
    /// A strong function definition, resolved with its parsed body.
    Fn {
        name: String,
        loc: Loc,
        mir: crate::gen::mir::MirFunction,
    },
}

/// Maps top-level names to their declaration state. `heading_decls` parks every extra
/// weak declaration of a name so later verification (out of scope here) can cross-check
/// signatures without losing them when a stronger declaration overwrites the entry.
#[derive(Debug, Default)]
pub struct SymTable {
    pub members: FxHashMap<String, SymEntry>,
    pub heading_decls: FxHashMap<String, Vec<Node>>,
    /// Source-order list of names as first declared, so pass 2 can iterate by
    /// insertion order rather than hash order.
    pub order: Vec<String>,
}

impl SymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `declare` never silently drops a conflicting strong declaration: weak+weak parks
    /// the new one in `heading_decls`; strong-over-weak parks the old weak there and
    /// overwrites; strong+strong reports and parks the new strong there instead.
    pub fn declare(
        &mut self,
        name: &str,
        node: Node,
        is_weak: bool,
        loc: Loc,
        messages: &mut CompilerMessages,
    ) {
        let Some(existing) = self.members.get(name) else {
            self.order.push(name.to_string());
            self.members.insert(
                name.to_string(),
                SymEntry::Pending { node, is_weak },
            );
            return;
        };

        let existing_is_weak = match existing {
            SymEntry::Pending { is_weak, .. } => *is_weak,
            SymEntry::Resolved(_) => {
                messages.report(
                    ErrorType::Rule,
                    format!("\"{name}\" already declared"),
                    loc,
                );
                self.heading_decls.entry(name.to_string()).or_default().push(node);
                return;
            }
        };

        match (existing_is_weak, is_weak) {
            (true, true) => {
                self.heading_decls.entry(name.to_string()).or_default().push(node);
            }
            (true, false) => {
                if let Some(SymEntry::Pending { node: old_node, .. }) =
                    self.members.insert(name.to_string(), SymEntry::Pending { node, is_weak })
                {
                    self.heading_decls.entry(name.to_string()).or_default().push(old_node);
                }
            }
            (false, _) => {
                messages.report(
                    ErrorType::Rule,
                    format!("\"{name}\" already declared"),
                    loc,
                );
                self.heading_decls.entry(name.to_string()).or_default().push(node);
            }
        }
    }

    pub fn get_member(&self, name: &str, loc: Loc, messages: &mut CompilerMessages) -> Option<&SymEntry> {
        match self.members.get(name) {
            Some(entry) => Some(entry),
            None => {
                messages.report(ErrorType::Rule, format!("\"{name}\" is not declared"), loc);
                None
            }
        }
    }

    pub fn is_weak(&self, name: &str) -> bool {
        matches!(self.members.get(name), Some(SymEntry::Pending { is_weak: true, .. }))
    }

    pub fn resolve(&mut self, name: &str, symbol: Symbol) {
        self.members.insert(name.to_string(), SymEntry::Resolved(symbol));
    }

    /// Shallow snapshot used for scoping inside a function body: body parsing
    /// never mutates the top-level table, so a clone of the name set is enough.
    pub fn copy(&self) -> FxHashMap<String, SymEntry> {
        self.members.clone()
    }
}

/// Walks a declarator down to its innermost `id` token — the name a top-level
/// `Declaration`/`FunctionDefinition` predeclares.
pub fn declarator_name(node: &Node) -> Option<&crate::lexer::tokens::Token> {
    match node {
        Node::Token(tok) => Some(tok),
        Node::Declarator(d) => declarator_name(&d.direct_declarator),
        Node::ParameterListDeclarator(p) => p.declarator.as_deref().and_then(declarator_name),
        Node::ArrayDeclarator(a) => a.declarator.as_deref().and_then(declarator_name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::loc::CharPosition;
    use crate::lexer::tokens::{Token, TokenKind, TokenValue};
    use std::path::PathBuf;
    use std::rc::Rc;

    fn loc() -> Loc {
        Loc::new(Rc::new(PathBuf::from("<test>")), CharPosition::start())
    }

    fn dummy_node() -> Node {
        Node::Token(Token::new(TokenKind::Id, TokenValue::None, loc()))
    }

    /// Declaring the same weak name twice leaves one `members` entry
    /// and exactly one parked weak declaration.
    #[test]
    fn idempotent_weak_predeclaration() {
        let mut table = SymTable::new();
        let mut messages = CompilerMessages::new();

        table.declare("f", dummy_node(), true, loc(), &mut messages);
        table.declare("f", dummy_node(), true, loc(), &mut messages);

        assert_eq!(table.members.len(), 1);
        assert_eq!(table.heading_decls.get("f").map(Vec::len), Some(1));
        assert!(!messages.has_errors());
    }

    /// Weak then strong resolves strong, parks exactly one weak.
    #[test]
    fn strong_overrides_weak() {
        let mut table = SymTable::new();
        let mut messages = CompilerMessages::new();

        table.declare("f", dummy_node(), true, loc(), &mut messages);
        table.declare("f", dummy_node(), false, loc(), &mut messages);

        assert!(!table.is_weak("f"));
        assert_eq!(table.heading_decls.get("f").map(Vec::len), Some(1));
        assert!(!messages.has_errors());
    }

    #[test]
    fn duplicate_strong_is_reported_and_first_wins() {
        let mut table = SymTable::new();
        let mut messages = CompilerMessages::new();

        table.declare("f", dummy_node(), false, loc(), &mut messages);
        table.declare("f", dummy_node(), false, loc(), &mut messages);

        assert!(messages.has_errors());
        assert!(!table.is_weak("f"));
    }
}
