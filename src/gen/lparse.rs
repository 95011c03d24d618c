use crate::diagnostics::errors::{CompilerMessages, ErrorType, ParsingError};
use crate::gen::mir::MirBuilder;
use crate::lexer::loc::Loc;
use crate::lexer::tokens::{Token, TokenKind};
use crate::string_interning::StringTable;

/// Per-function body parser: walks the `CompoundNode.tokens` captured by DParse
/// with its own cursor, emitting MIR as a side effect of every statement/expression
/// helper. Unlike DParse, statement/expression grammar here has no ambiguous
/// alternatives to backtrack over, so there is no speculative-call primitive.
pub struct LParse<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) index: usize,
    pub(crate) mir: MirBuilder,
    pub(crate) messages: &'a mut CompilerMessages,
    pub(crate) string_table: &'a StringTable,
}

impl<'a> LParse<'a> {
    pub fn new(tokens: &'a [Token], messages: &'a mut CompilerMessages, string_table: &'a StringTable) -> Self {
        LParse {
            tokens,
            index: 0,
            mir: MirBuilder::new(),
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
            .unwrap_or_else(|| self.tokens.last().expect("caller supplied a non-empty body"))
    }

    pub fn has_token(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn skip(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    pub fn token(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if self.has_token() && kinds.contains(&self.cur().kind) {
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

    pub fn expect_token(&mut self, kind: TokenKind) -> Token {
        if let Some(tok) = self.token1(kind) {
            return tok;
        }

        let (found, loc) = if self.has_token() {
            (self.cur().kind.spelling(), self.cur().loc.clone())
        } else {
            ("eof", self.tokens.last().map(|t| t.loc.clone()).unwrap())
        };

        self.messages.report(
            ErrorType::Syntax,
            format!("expected token \"{}\", matched \"{found}\"", kind.spelling()),
            loc,
        );

        self.tok(0).clone()
    }

    /// Fatal within the function body: `expect_node` records a diagnostic and raises
    /// `ParsingError`, which the resolver catches at function granularity.
    pub fn expect_node<T>(&mut self, node: Option<T>, error_message: &str) -> Result<T, ParsingError> {
        match node {
            Some(n) => Ok(n),
            None => {
                let found = if self.has_token() {
                    self.cur().kind.spelling()
                } else {
                    "eof"
                };
                let loc = if self.has_token() {
                    self.cur().loc.clone()
                } else {
                    self.tokens.last().map(|t| t.loc.clone()).unwrap()
                };
                self.messages
                    .report(ErrorType::Syntax, format!("{error_message}, matched token \"{found}\""), loc);
                Err(ParsingError)
            }
        }
    }

    pub fn loc(&self) -> Loc {
        if self.has_token() {
            self.cur().loc.clone()
        } else {
            self.tokens.last().map(|t| t.loc.clone()).unwrap()
        }
    }

    pub fn token_text(&self, tok: &Token) -> &str {
        match tok.as_str_id() {
            Some(id) => self.string_table.resolve(id),
            None => "",
        }
    }

    /// `return` → `RET_VOID` if next is `;`, else parses an expression and emits `RET`;
    /// expects `;` either way.
    fn return_statement(&mut self) -> Result<(), ParsingError> {
        let loc = self.loc();
        if self.token1(TokenKind::Semi).is_some() {
            self.mir.emit(crate::gen::mir::Opcode::RetVoid, loc);
            return Ok(());
        }

        self.expression(false)?;
        self.expect_token(TokenKind::Semi);
        self.mir.emit(crate::gen::mir::Opcode::Ret, loc);
        Ok(())
    }

    /// `if (expr) stmt [else stmt]`: evaluate the condition, emit a
    /// `JumpIfFalse` patched past the then-branch (or past the whole construct, via a
    /// `Jump`, when an else-branch follows).
    fn if_statement(&mut self) -> Result<(), ParsingError> {
        self.expect_token(TokenKind::LParen);
        self.expression(false)?;
        self.expect_token(TokenKind::RParen);

        let jump_if_false = self.mir.emit_jump_if_false(self.loc());
        self.statement()?;

        if self.token1(TokenKind::Else).is_some() {
            let jump_past_else = self.mir.emit_jump(self.loc());
            self.mir.patch_jump_here(jump_if_false);
            self.statement()?;
            self.mir.patch_jump_here(jump_past_else);
        } else {
            self.mir.patch_jump_here(jump_if_false);
        }

        Ok(())
    }

    /// Other statement kinds (loops, switch, compound, expression-statement, labeled)
    /// are to-do — only `return`, `if`, and meta directives are recognized here.
    fn statement(&mut self) -> Result<(), ParsingError> {
        if self.token1(TokenKind::Return).is_some() {
            return self.return_statement();
        }

        if self.token1(TokenKind::If).is_some() {
            return self.if_statement();
        }

        self.expect_node(None::<()>, "expected a statement")
    }

    /// Runs every statement to completion. A `ParsingError` from one is not caught
    /// here — the caller (pass 2's resolver) catches it at function granularity and
    /// abandons the remainder of the body.
    pub fn parse_body(&mut self) -> Result<(), ParsingError> {
        while self.has_token() {
            self.statement()?;
        }
        Ok(())
    }
}
