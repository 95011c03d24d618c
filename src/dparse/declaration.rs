use crate::ast::node::{
    DeclarationNode, EmptyDeclarationNode, FunctionDefinitionNode, MultipleNode, Node,
    ParameterListDeclaratorNode,
};
use crate::dparse::parser::{DParser, META_DIRECTIVES};
use crate::diagnostics::errors::ErrorType;
use crate::lexer::tokens::TokenKind;

const TERMINATOR: &[TokenKind] = &[TokenKind::Comma, TokenKind::Semi];

impl<'a> DParser<'a> {
    /// Succeeds iff the declarator's innermost direct-declarator is a
    /// `ParameterListDeclarator` with no enclosing pointer (a function pointer falls
    /// back to an ordinary `declaration`), followed by `;` or a `{ body }`.
    pub fn function_definition(
        &mut self,
        dspecs: Node,
        declarator: Node,
        allow_method_mods: bool,
    ) -> Option<Node> {
        let actual_decl = match &declarator {
            Node::ParameterListDeclarator(_) => declarator.clone(),
            Node::Declarator(d) => match d.direct_declarator.as_ref() {
                dd @ Node::ParameterListDeclarator(_) => dd.clone(),
                _ => return None,
            },
            _ => return None,
        };

        // a function pointer is a declarator wrapping a ParameterListDeclarator whose
        // own inner declarator still carries a pointer: that's a declaration, not a def.
        if let Node::ParameterListDeclarator(ParameterListDeclaratorNode {
            declarator: Some(inner),
            ..
        }) = &actual_decl
        {
            if let Node::Declarator(d) = inner.as_ref() {
                if d.pointer.is_some() {
                    return None;
                }
            }
        }

        let mut method_modifier = None;
        if allow_method_mods {
            method_modifier = self.token(&[TokenKind::Static, TokenKind::Const]);
        }

        let body = if self.token1(TokenKind::Semi).is_some() {
            None
        } else {
            Some(Box::new(self.collect_compound_statement()))
        };

        Some(Node::FunctionDefinition(FunctionDefinitionNode {
            loc: declarator.loc().clone(),
            declaration_specifiers: Box::new(dspecs),
            declarator: Box::new(declarator),
            body,
            method_modifier,
        }))
    }

    /// One or more comma-separated declarators with optional `= initializer`,
    /// terminated by `;`. `self.cur()` is the terminator after this returns.
    pub fn declaration(&mut self, dspecs: Node, declarator: Node, allow_bitfield: bool) -> Option<Node> {
        let mut bitfield = None;
        if allow_bitfield && self.token1(TokenKind::Colon).is_some() {
            bitfield = Some(self.expect_token(TokenKind::Num));
        }

        let initializer = self.token1(TokenKind::Assign).map(|eq| {
            Box::new(self.collect_initializer(TERMINATOR, eq.loc, false))
        });

        let first_decl = Node::Declaration(DeclarationNode {
            loc: declarator.loc().clone(),
            declaration_specifiers: Box::new(dspecs.clone()),
            declarator: Box::new(declarator),
            initializer,
            bitfield,
        });

        if self.token1(TokenKind::Semi).is_some() {
            return Some(first_decl);
        }

        let mut decls = MultipleNode::new(dspecs.loc().clone());
        decls.nodes.push(first_decl);

        while self.token1(TokenKind::Comma).is_some() {
            let declarator = match self.declarator() {
                Some(d) => d,
                None => {
                    self.messages.report(
                        ErrorType::Syntax,
                        "in multiple declaration, a declarator (such as a name) is expected after \",\"",
                        self.cur().loc.clone(),
                    );
                    continue;
                }
            };

            let initializer = self
                .token1(TokenKind::Assign)
                .map(|eq| Box::new(self.collect_initializer(TERMINATOR, eq.loc, false)));

            decls.nodes.push(Node::Declaration(DeclarationNode {
                loc: declarator.loc().clone(),
                declaration_specifiers: Box::new(dspecs.clone()),
                declarator: Box::new(declarator),
                initializer,
                bitfield: None,
            }));
        }

        if decls.nodes.len() == 1 {
            self.messages.report(
                ErrorType::Syntax,
                "did you mean \",\" or \";\"?",
                self.cur().loc.clone(),
            );
        }

        Some(Node::Multiple(decls))
    }

    pub fn struct_or_union_declaration_list(
        &mut self,
        expect_braces: bool,
        allow_method_mods: bool,
    ) -> Option<Node> {
        self.speculative(|p| {
            let opener_loc = if expect_braces {
                p.token1(TokenKind::LBrace)?.loc
            } else {
                p.cur().loc.clone()
            };

            let mut body = MultipleNode::new(opener_loc.clone());

            loop {
                if !p.has_token() {
                    if expect_braces {
                        p.messages
                            .report(ErrorType::Lexical, "body not closed", opener_loc.clone());
                    }
                    break;
                }

                if expect_braces && p.token1(TokenKind::RBrace).is_some() {
                    break;
                }

                let edecl = p.external_declaration(allow_method_mods);
                if edecl.is_placeholder() {
                    continue;
                }

                body.nodes.push(edecl);
            }

            Some(Node::Multiple(body))
        })
    }

    /// Parses one top-level (or struct/union-body) member. `is_inside_structunion`
    /// doubles as the `allow_method_mods`/`allow_bitfield` flag for nested contexts.
    pub fn external_declaration(&mut self, is_inside_structunion: bool) -> Node {
        if !is_inside_structunion
            && self.cur().kind == TokenKind::MetaId
            && META_DIRECTIVES.contains(&self.token_text(self.cur()))
        {
            return self.parse_meta_directive();
        }

        if self.token1(TokenKind::Semi).is_some() {
            return Node::Placeholder;
        }

        let dspecs = match self.declaration_specifiers() {
            Some(d) => d,
            None => {
                self.messages.report(
                    ErrorType::Syntax,
                    "top level members must start with a declaration specifier (such as a type)",
                    self.cur().loc.clone(),
                );
                let loc = self.cur().loc.clone();
                self.skip();
                return Node::Poisoned(loc);
            }
        };

        if self.token1(TokenKind::Semi).is_some() {
            return Node::EmptyDeclaration(EmptyDeclarationNode {
                loc: dspecs.loc().clone(),
                declaration_specifiers: Box::new(dspecs),
            });
        }

        let declarator = match self.declarator() {
            Some(d) => d,
            None => {
                self.messages.report(
                    ErrorType::Syntax,
                    "top level members must have a declarator (such as a name)",
                    self.cur().loc.clone(),
                );
                let loc = self.cur().loc.clone();
                self.skip();
                return Node::Poisoned(loc);
            }
        };

        if let Some(node) = self.function_definition(dspecs.clone(), declarator.clone(), is_inside_structunion)
        {
            return node;
        }

        match self.declaration(dspecs, declarator, is_inside_structunion) {
            Some(node) => node,
            None => {
                self.messages.report(
                    ErrorType::Syntax,
                    "top level members must be either function definition or declaration",
                    self.cur().loc.clone(),
                );
                let loc = self.cur().loc.clone();
                self.skip();
                Node::Poisoned(loc)
            }
        }
    }

    /// Entry point: a translation unit is a struct/union body with no braces and no
    /// method modifiers.
    pub fn parse_translation_unit(&mut self) -> Node {
        self.struct_or_union_declaration_list(false, false)
            .unwrap_or_else(|| Node::Multiple(MultipleNode::new(self.cur().loc.clone())))
    }
}
