use crate::ast::node::{
    AbstractDeclaratorNode, ArrayDeclaratorNode, CompoundNode, DeclaratorNode, MultipleNode, Node,
    ParameterDeclarationNode, ParameterListDeclaratorNode, PointerNode,
};
use crate::dparse::parser::DParser;
use crate::diagnostics::errors::ErrorType;
use crate::lexer::loc::Loc;
use crate::lexer::tokens::TokenKind;

impl<'a> DParser<'a> {
    pub fn pointer(&mut self) -> Option<Node> {
        self.speculative(|p| {
            let star = p.token1(TokenKind::Star)?;
            let type_qualifier_list = p.type_qualifier_list();
            let pointer = p.pointer();

            Some(Node::Pointer(PointerNode {
                loc: star.loc,
                type_qualifier_list: Box::new(type_qualifier_list),
                pointer: pointer.map(Box::new),
            }))
        })
    }

    pub fn parameter_declaration(&mut self) -> Option<Node> {
        self.speculative(|p| {
            let dspecs = p.declaration_specifiers()?;
            let dspecs_loc = dspecs.loc().clone();

            let declarator = p
                .declarator()
                .or_else(|| p.abstract_declarator(dspecs_loc.clone()));

            let loc = declarator
                .as_ref()
                .map(|d| d.loc().clone())
                .unwrap_or(dspecs_loc);

            Some(Node::ParameterDeclaration(ParameterDeclarationNode {
                loc,
                declaration_specifiers: Box::new(dspecs),
                declarator: declarator.map(Box::new),
            }))
        })
    }

    pub fn parameter_list(&mut self) -> Option<(Node, Option<crate::lexer::tokens::Token>)> {
        self.speculative(|p| {
            let first = p.parameter_declaration()?;

            let mut plist = p.collect_sequence(|p| {
                p.speculative(|p| {
                    p.token1(TokenKind::Comma)?;
                    p.parameter_declaration()
                })
            });
            plist.nodes.insert(0, first);

            let ellipsis = p.token1(TokenKind::Ellipsis);
            Some((Node::Multiple(plist), ellipsis))
        })
    }

    pub fn parameter_list_declarator(&mut self, dd: Option<Node>) -> Option<Node> {
        self.speculative(|p| {
            let opener = p.token1(TokenKind::LParen)?;

            let (parameter_list, ellipsis) = if p.token1(TokenKind::RParen).is_some() {
                (Node::Multiple(MultipleNode::new(opener.loc.clone())), None)
            } else if let Some(plist) = p.parameter_list() {
                p.expect_token(TokenKind::RParen);
                plist
            } else {
                return None;
            };

            Some(Node::ParameterListDeclarator(ParameterListDeclaratorNode {
                loc: opener.loc,
                declarator: dd.map(Box::new),
                parameter_list: Box::new(parameter_list),
                ellipsis,
            }))
        })
    }

    pub fn array_declarator(&mut self, dd: Option<Node>) -> Option<Node> {
        self.speculative(|p| {
            let opener = p.token1(TokenKind::LBracket)?;
            let initializer = p.collect_initializer(&[TokenKind::RBracket], opener.loc.clone(), true);
            p.expect_token(TokenKind::RBracket);

            Some(Node::ArrayDeclarator(ArrayDeclaratorNode {
                loc: opener.loc,
                declarator: dd.map(Box::new),
                size_initializer: Box::new(initializer),
            }))
        })
    }

    pub fn direct_declarator(&mut self) -> Option<Node> {
        self.speculative(|p| {
            let mut dd = if let Some(id) = p.identifier() {
                Node::Token(id)
            } else if p.token1(TokenKind::LParen).is_some() {
                let inner = p.declarator()?;
                p.expect_token(TokenKind::RParen);
                inner
            } else {
                return None;
            };

            loop {
                if let Some(new_dd) = p.parameter_list_declarator(Some(dd.clone())) {
                    dd = new_dd;
                } else if let Some(new_dd) = p.array_declarator(Some(dd.clone())) {
                    dd = new_dd;
                } else {
                    break;
                }
            }

            Some(dd)
        })
    }

    pub fn declarator(&mut self) -> Option<Node> {
        self.speculative(|p| {
            let pointer = p.pointer();
            let direct_declarator = p.direct_declarator()?;

            match pointer {
                None => Some(direct_declarator),
                Some(pointer) => Some(Node::Declarator(DeclaratorNode {
                    loc: direct_declarator.loc().clone(),
                    pointer: Some(Box::new(pointer)),
                    direct_declarator: Box::new(direct_declarator),
                })),
            }
        })
    }

    pub fn direct_abstract_declarator(&mut self) -> Option<Node> {
        self.speculative(|p| {
            let mut dad = if let Some(plist_dd) = p.parameter_list_declarator(None) {
                plist_dd
            } else if let Some(opener) = p.token1(TokenKind::LParen) {
                let inner = p.abstract_declarator(opener.loc.clone());
                p.expect_token(TokenKind::RParen);
                match inner {
                    Some(n) => n,
                    None => Node::ParameterListDeclarator(
                        crate::ast::node::ParameterListDeclaratorNode {
                            loc: opener.loc.clone(),
                            declarator: None,
                            parameter_list: Box::new(Node::Multiple(MultipleNode::new(
                                opener.loc.clone(),
                            ))),
                            ellipsis: None,
                        },
                    ),
                }
            } else if let Some(arr) = p.array_declarator(None) {
                arr
            } else {
                return None;
            };

            loop {
                if p.has_token() && matches!(p.cur().kind, TokenKind::LParen | TokenKind::LBracket) {
                    if let Some(new_dd) = p.parameter_list_declarator(Some(dad.clone())) {
                        dad = new_dd;
                    } else if let Some(new_dd) = p.array_declarator(Some(dad.clone())) {
                        dad = new_dd;
                    } else {
                        break;
                    }
                } else {
                    break;
                }
            }

            Some(dad)
        })
    }

    pub fn abstract_declarator(&mut self, loc: Loc) -> Option<Node> {
        self.speculative(|p| {
            let pointer = p.pointer();
            if pointer.is_none() {
                return p.direct_abstract_declarator();
            }

            let dad = p.direct_abstract_declarator();

            Some(Node::AbstractDeclarator(AbstractDeclaratorNode {
                loc,
                pointer: pointer.map(Box::new),
                direct_abstract_declarator: dad.map(Box::new),
            }))
        })
    }

    pub fn collect_compound_statement(&mut self) -> Node {
        if self.cur().kind != TokenKind::LBrace {
            self.messages.report(
                ErrorType::Syntax,
                "after declarator, function definition wants a compound statement (its body)",
                self.cur().loc.clone(),
            );
            return Node::Compound(CompoundNode::new(self.cur().loc.clone()));
        }

        let opener = self.expect_token(TokenKind::LBrace);
        let mut compound = CompoundNode::new(opener.loc.clone());
        let mut nest_level = 0usize;

        loop {
            if !self.has_token() {
                self.messages
                    .report(ErrorType::Lexical, "body not closed", opener.loc.clone());
                break;
            }

            match self.cur().kind {
                TokenKind::LBrace => nest_level += 1,
                TokenKind::RBrace if nest_level == 0 => break,
                TokenKind::RBrace => nest_level -= 1,
                _ => {}
            }

            compound.tokens.push(self.cur().clone());
            self.skip();
        }

        self.token1(TokenKind::RBrace);
        Node::Compound(compound)
    }

    /// Captures tokens up to (not including) any terminator kind at nesting depth
    /// zero, tracking `( ) [ ] { }` nesting independently of the caller's terminators.
    pub fn collect_initializer(&mut self, terminator: &[TokenKind], loc: Loc, allow_empty: bool) -> Node {
        let mut compound = CompoundNode::new(loc.clone());
        let mut paren = 0i32;
        let mut bracket = 0i32;
        let mut brace = 0i32;
        let is_nested = |paren: i32, bracket: i32, brace: i32| paren > 0 || bracket > 0 || brace > 0;

        loop {
            if !self.has_token() {
                self.messages.report(
                    ErrorType::Syntax,
                    "initializer not closed, did you forget a \";\"?",
                    loc.clone(),
                );
                break;
            }

            if !is_nested(paren, bracket, brace) && terminator.contains(&self.cur().kind) {
                break;
            }

            match self.cur().kind {
                TokenKind::LParen => paren += 1,
                TokenKind::LBracket => bracket += 1,
                TokenKind::LBrace => brace += 1,
                TokenKind::RParen if paren > 0 => paren -= 1,
                TokenKind::RBracket if bracket > 0 => bracket -= 1,
                TokenKind::RBrace if brace > 0 => brace -= 1,
                _ => {}
            }

            compound.tokens.push(self.cur().clone());
            self.skip();
        }

        if !allow_empty && compound.tokens.is_empty() {
            self.messages.report(
                ErrorType::Syntax,
                "initializer cannot be empty",
                compound.loc.clone(),
            );
        }

        Node::Compound(compound)
    }
}
