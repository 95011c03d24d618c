use crate::ast::node::{MultipleNode, Node};
use crate::diagnostics::errors::{CompilerMessages, ErrorType};
use crate::lexer::loc::Loc;
use crate::lexer::tokens::{Token, TokenKind, TokenValue};
use crate::string_interning::StringTable;

pub const META_DIRECTIVES: &[&str] = &["use_feature", "test", "import"];

/// Hand-written recursive-descent parser over a flat token slice, with speculative
/// backtracking: `speculative` snapshots the cursor, and restores it whenever the
/// inner closure returns `None` (mirroring the `@recoverable` decorator it is
/// grounded on — a scoped guard instead of sprinkled try/catch, per the design notes).
pub struct DParser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) index: usize,
    pub(crate) current_dspecs: MultipleNode,
    pub(crate) messages: &'a mut CompilerMessages,
    pub(crate) string_table: &'a StringTable,
}

impl<'a> DParser<'a> {
    pub fn new(
        tokens: &'a [Token],
        messages: &'a mut CompilerMessages,
        string_table: &'a StringTable,
    ) -> Self {
        let loc = tokens
            .first()
            .map(|t| t.loc.clone())
            .expect("token stream always has at least the synthesized eof");

        DParser {
            tokens,
            index: 0,
            current_dspecs: MultipleNode::new(loc),
            messages,
            string_table,
        }
    }

    pub fn cur(&self) -> &Token {
        self.tok(0)
    }

    pub fn tok(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.index + offset)
            .unwrap_or_else(|| self.tokens.last().expect("eof always present"))
    }

    pub fn has_token(&self) -> bool {
        self.index < self.tokens.len() && self.cur().kind != TokenKind::Eof
    }

    pub fn skip(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    /// Consumes and returns the current token if its kind matches any of `kinds`.
    pub fn token(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.cur().kind) {
            let tok = self.cur().clone();
            self.skip();
            Some(tok)
        } else {
            None
        }
    }

    pub fn token1(&mut self, kind: TokenKind) -> Option<Token> {
        self.token(&[kind])
    }

    pub fn identifier(&mut self) -> Option<Token> {
        self.token1(TokenKind::Id)
    }

    pub fn expect_token(&mut self, kind: TokenKind) -> Token {
        if let Some(tok) = self.token1(kind) {
            return tok;
        }

        self.messages.report(
            ErrorType::Syntax,
            format!(
                "expected token \"{}\", matched \"{}\"",
                kind.spelling(),
                self.cur().kind.spelling()
            ),
            self.cur().loc.clone(),
        );
        self.cur().clone()
    }

    /// Snapshot-and-restore speculative call: runs `f`, and on `None` rewinds the
    /// cursor to its pre-call value so the caller can try a different alternative.
    pub fn speculative<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.index;
        match f(self) {
            Some(v) => Some(v),
            None => {
                self.index = snapshot;
                None
            }
        }
    }

    pub fn token_text(&self, tok: &Token) -> &str {
        match tok.as_str_id() {
            Some(id) => self.string_table.resolve(id),
            None => "",
        }
    }

    pub fn collect_sequence(&mut self, mut f: impl FnMut(&mut Self) -> Option<Node>) -> MultipleNode {
        let mut mn = MultipleNode::new(self.cur().loc.clone());
        while let Some(node) = f(self) {
            mn.nodes.push(node);
        }
        mn
    }

    pub fn loc(&self) -> Loc {
        self.cur().loc.clone()
    }
}
