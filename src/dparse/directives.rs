use crate::ast::node::{
    AliasedImportDirective, FullImportDirective, ImportOrigin, Node, PartialImportDirective,
    TestDirective, UseFeatureDirective,
};
use crate::dparse::parser::DParser;
use crate::diagnostics::errors::ErrorType;
use crate::lexer::loc::Loc;
use crate::lexer::tokens::{Token, TokenKind};

impl<'a> DParser<'a> {
    pub fn parse_meta_directive(&mut self) -> Node {
        let mdir = self.token1(TokenKind::MetaId).expect("caller already peeked a meta_id");
        let name = self.token_text(&mdir).to_string();

        match name.as_str() {
            "use_feature" => self.parse_use_feature(mdir.loc),
            "test" => self.parse_test(mdir.loc),
            "import" => self.parse_import(mdir.loc),
            _ => {
                self.messages.report(
                    ErrorType::Internal,
                    format!("unreachable meta directive dispatch: {name}"),
                    mdir.loc,
                );
                Node::Placeholder
            }
        }
    }

    fn parse_use_feature(&mut self, loc: Loc) -> Node {
        let mut features = Vec::new();
        features.push(self.expect_token(TokenKind::Id));

        while self.has_token() && self.token1(TokenKind::Comma).is_some() {
            features.push(self.expect_token(TokenKind::Id));
        }

        let body = if self.cur().kind == TokenKind::LBrace {
            self.struct_or_union_declaration_list(true, false)
        } else {
            self.expect_token(TokenKind::Semi);
            None
        };

        Node::UseFeature(UseFeatureDirective {
            loc,
            features,
            body: body.map(Box::new),
        })
    }

    fn parse_test(&mut self, loc: Loc) -> Node {
        let desc_tok = self.expect_token(TokenKind::Str);
        let description = desc_tok
            .as_str_id()
            .unwrap_or(crate::string_interning::StringId::from_u32(0));

        let body_node = self.collect_compound_statement();
        let body = match body_node {
            Node::Compound(c) => c,
            _ => unreachable!("collect_compound_statement always returns Node::Compound"),
        };

        Node::Test(TestDirective {
            loc,
            description,
            body,
        })
    }

    fn raise_malformed_import(&mut self, loc: Loc) {
        self.messages
            .report(ErrorType::Syntax, "import directive is malformed", loc);
    }

    /// `origin` is a bare identifier (`pkg`), `id(str)` (kind = the identifier's
    /// spelling, taken verbatim — see the open-question decision), or a string literal
    /// (`local`).
    fn parse_import_details(&mut self, loc: Loc) -> Option<ImportOrigin> {
        if let Some(ident) = self.token1(TokenKind::Id) {
            if self.token1(TokenKind::LParen).is_some() {
                let to_import = self.expect_token(TokenKind::Str);
                self.expect_token(TokenKind::RParen);
                let kind = ident
                    .as_str_id()
                    .unwrap_or(crate::string_interning::StringId::from_u32(0));
                return Some(ImportOrigin::Kind(kind, to_import));
            }

            return Some(ImportOrigin::Pkg(ident));
        }

        if let Some(path) = self.token1(TokenKind::Str) {
            return Some(ImportOrigin::Local(path));
        }

        self.raise_malformed_import(loc);
        None
    }

    fn parse_aliased_import(&mut self, alias: Token, loc: Loc) -> Node {
        let origin = if self.token1(TokenKind::Assign).is_some() {
            self.parse_import_details(loc.clone())
        } else {
            Some(ImportOrigin::Pkg(alias.clone()))
        };

        self.expect_token(TokenKind::Semi);

        match origin {
            Some(origin) => Node::AliasedImport(AliasedImportDirective { loc, alias, origin }),
            None => Node::Poisoned(loc),
        }
    }

    fn parse_full_import(&mut self, loc: Loc) -> Node {
        self.expect_token(TokenKind::Assign);
        let origin = self.parse_import_details(loc.clone());
        self.expect_token(TokenKind::Semi);

        match origin {
            Some(origin) => Node::FullImport(FullImportDirective { loc, origin }),
            None => Node::Poisoned(loc),
        }
    }

    fn parse_name_of_partial_import(&mut self) -> (Token, Token) {
        let alias = self.expect_token(TokenKind::Id);
        let to_import = if self.token1(TokenKind::Assign).is_some() {
            self.expect_token(TokenKind::Id)
        } else {
            alias.clone()
        };

        (alias, to_import)
    }

    fn parse_partial_import(&mut self, loc: Loc) -> Node {
        if self.token1(TokenKind::LBrace).is_none() {
            self.raise_malformed_import(loc.clone());
            return Node::Poisoned(loc);
        }

        let mut names = vec![self.parse_name_of_partial_import()];
        while self.token1(TokenKind::Comma).is_some() {
            names.push(self.parse_name_of_partial_import());
        }

        self.expect_token(TokenKind::RBrace);
        self.expect_token(TokenKind::Assign);
        let origin = self.parse_import_details(loc.clone());
        self.expect_token(TokenKind::Semi);

        match origin {
            Some(origin) => Node::PartialImport(PartialImportDirective { loc, names, origin }),
            None => Node::Poisoned(loc),
        }
    }

    fn parse_import(&mut self, loc: Loc) -> Node {
        if let Some(alias) = self.token1(TokenKind::Id) {
            return self.parse_aliased_import(alias, loc);
        }

        if self.token1(TokenKind::Star).is_some() {
            return self.parse_full_import(loc);
        }

        self.parse_partial_import(loc)
    }
}
