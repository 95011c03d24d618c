use crate::ast::node::{DeclSpecNode, EnumSpecifierNode, EnumeratorWithValueNode, MultipleNode, Node, RecordKind, RecordSpecifierNode, TypeBuiltinNode, TypeTemplatedNode};
use crate::dparse::parser::DParser;
use crate::diagnostics::errors::ErrorType;
use crate::lexer::tokens::{Token, TokenKind};

const CLASS_SPECS: &[TokenKind] = &[
    TokenKind::Typedef,
    TokenKind::Extern,
    TokenKind::Static,
    TokenKind::ThreadLocal,
    TokenKind::Auto,
    TokenKind::Register,
];

const FUNCTION_SPECS: &[TokenKind] = &[TokenKind::Inline, TokenKind::Noreturn];

const TYPE_QUALS: &[TokenKind] = &[
    TokenKind::Const,
    TokenKind::Restrict,
    TokenKind::Volatile,
    TokenKind::Atomic,
    TokenKind::Cdecl,
];

const TYPE_SPECS: &[TokenKind] = &[
    TokenKind::Void,
    TokenKind::Char,
    TokenKind::Short,
    TokenKind::Int,
    TokenKind::Long,
    TokenKind::Float,
    TokenKind::Double,
    TokenKind::Signed,
    TokenKind::Unsigned,
    TokenKind::Bool,
    TokenKind::Complex,
    TokenKind::Imaginary,
];

/// Meta-type names that are always a type in specifier position (distinct from
/// `@builtin_t(...)`, which carries its own payload).
const META_TYPES: &[&str] = &["meta_t"];

impl<'a> DParser<'a> {
    pub fn storage_class_specifier(&mut self) -> Option<Node> {
        if let Some(ds) = self.token1(TokenKind::Declspec) {
            self.expect_token(TokenKind::LParen);
            let name_tok = self.expect_token(TokenKind::Id);
            self.expect_token(TokenKind::RParen);

            let name = name_tok.as_str_id().unwrap_or_else(|| {
                // expect_token already reported; synthesize an empty interned name.
                name_tok.as_str_id().unwrap_or(crate::string_interning::StringId::from_u32(0))
            });

            return Some(Node::DeclSpec(DeclSpecNode { loc: ds.loc, name }));
        }

        self.token(CLASS_SPECS).map(Node::Token)
    }

    pub fn function_specifier(&mut self) -> Option<Node> {
        self.token(FUNCTION_SPECS).map(Node::Token)
    }

    pub fn type_qualifier(&mut self) -> Option<Node> {
        self.token(TYPE_QUALS).map(Node::Token)
    }

    pub fn type_qualifier_list(&mut self) -> Node {
        Node::Multiple(self.collect_sequence(|p| p.type_qualifier()))
    }

    /// The identifier-as-type hack: an identifier in specifier position is a
    /// type name iff `current_dspecs` holds nothing but qualifiers so far.
    pub fn id_should_be_type(&self) -> bool {
        if self.current_dspecs.nodes.is_empty() {
            return true;
        }

        for node in &self.current_dspecs.nodes {
            match node {
                Node::DeclSpec(_) => continue,
                Node::Token(tok) => {
                    let is_qual = tok.kind.is_storage_class()
                        || tok.kind.is_function_specifier()
                        || tok.kind.is_type_qualifier();
                    if !is_qual {
                        return false;
                    }
                }
                _ => return false,
            }
        }

        true
    }

    pub fn identifier_or_meta_id(&mut self) -> Option<Token> {
        self.token(&[TokenKind::Id, TokenKind::MetaId])
    }

    pub fn typedef_name(&mut self) -> Option<Token> {
        if !matches!(self.cur().kind, TokenKind::Id | TokenKind::MetaId) {
            return None;
        }

        // a declarator name is always followed by one of these; if there is no token
        // after the candidate at all, there's nothing to disambiguate against.
        if self.index + 1 >= self.tokens.len() {
            return None;
        }

        if !self.id_should_be_type() {
            return None;
        }

        self.identifier_or_meta_id()
    }

    pub fn template_arguments(&mut self, typedef_name: &Token) -> Option<Node> {
        self.speculative(|p| {
            let open = p.token1(TokenKind::Lt)?;
            // TODO: collect template arguments as tokens; `some_t<n>` is ambiguous with
            // `some < n >` since template arguments can be full expressions.
            p.expect_token(TokenKind::Gt);
            p.messages.report(
                ErrorType::Syntax,
                format!(
                    "template arguments on `{}` are not yet supported",
                    p.token_text(typedef_name)
                ),
                open.loc.clone(),
            );
            Some(Node::TypeTemplated(TypeTemplatedNode { loc: open.loc }))
        })
    }

    pub fn type_specifier(&mut self) -> Option<Node> {
        if self.cur().kind == TokenKind::MetaId {
            let text = self.token_text(self.cur()).to_string();
            if text == "builtin_t" {
                let tag = self.expect_token(TokenKind::MetaId);
                self.expect_token(TokenKind::LParen);
                let name_tok = self.expect_token(TokenKind::Str);
                self.expect_token(TokenKind::RParen);
                let name = name_tok
                    .as_str_id()
                    .unwrap_or(crate::string_interning::StringId::from_u32(0));
                return Some(Node::TypeBuiltin(TypeBuiltinNode { loc: tag.loc, name }));
            }

            if META_TYPES.contains(&text.as_str()) {
                return self.token1(TokenKind::MetaId).map(Node::Token);
            }
        }

        if let Some(builtin) = self.token(TYPE_SPECS) {
            return Some(Node::Token(builtin));
        }

        if let Some(spec_kw) = self.token1(TokenKind::Enum) {
            let is_enum_struct = self.token1(TokenKind::Struct).is_some();
            let name = self.identifier();
            let body = self.enumerator_list();

            if name.is_none() && body.is_none() {
                self.messages.report(
                    ErrorType::Syntax,
                    "expected identifier, enum body or both",
                    self.cur().loc.clone(),
                );
            }

            return Some(Node::EnumSpecifier(EnumSpecifierNode {
                loc: spec_kw.loc,
                is_struct: is_enum_struct,
                name,
                body: body.map(Box::new),
            }));
        }

        if let Some(spec_kw) = self.token(&[TokenKind::Struct, TokenKind::Union]) {
            let kind = if spec_kw.kind == TokenKind::Struct {
                RecordKind::Struct
            } else {
                RecordKind::Union
            };
            let name = self.identifier();
            let body = self.struct_or_union_declaration_list(true, true);

            if name.is_none() && body.is_none() {
                self.messages.report(
                    ErrorType::Syntax,
                    format!("expected identifier, {} body or both", spec_kw.kind.spelling()),
                    self.cur().loc.clone(),
                );
            }

            return Some(Node::RecordSpecifier(RecordSpecifierNode {
                loc: spec_kw.loc,
                kind,
                name,
                body: body.map(Box::new),
            }));
        }

        if let Some(tydef_name) = self.typedef_name() {
            if let Some(tmpl) = self.template_arguments(&tydef_name) {
                return Some(tmpl);
            }

            return Some(Node::Token(tydef_name));
        }

        None
    }

    pub fn declaration_specifier(&mut self) -> Option<Node> {
        if let Some(storage_cls) = self.storage_class_specifier() {
            return Some(storage_cls);
        }

        if let Some(ty_spec) = self.type_specifier() {
            return Some(ty_spec);
        }

        if let Some(ty_qual) = self.type_qualifier() {
            return Some(ty_qual);
        }

        if let Some(fn_spec) = self.function_specifier() {
            return Some(fn_spec);
        }

        None
    }

    pub fn declaration_specifiers(&mut self) -> Option<Node> {
        let old = std::mem::replace(&mut self.current_dspecs, MultipleNode::new(self.cur().loc.clone()));

        loop {
            match self.declaration_specifier() {
                Some(node) => self.current_dspecs.nodes.push(node),
                None => break,
            }
        }

        let dspecs = std::mem::replace(&mut self.current_dspecs, old);

        if dspecs.nodes.is_empty() {
            None
        } else {
            Some(Node::Multiple(dspecs))
        }
    }

    pub fn comma_enumerator(&mut self) -> Option<Node> {
        self.speculative(|p| {
            p.token1(TokenKind::Comma)?;
            p.enumerator()
        })
    }

    pub fn enumerator(&mut self) -> Option<Node> {
        self.speculative(|p| {
            let name = p.identifier()?;
            let eq = match p.token1(TokenKind::Assign) {
                Some(eq) => eq,
                None => return Some(Node::Token(name)),
            };

            let initializer = p.collect_initializer(&[TokenKind::Comma, TokenKind::RBrace], eq.loc, false);

            Some(Node::EnumeratorWithValue(EnumeratorWithValueNode {
                loc: name.loc.clone(),
                name,
                initializer: Box::new(initializer),
            }))
        })
    }

    pub fn enumerator_list(&mut self) -> Option<Node> {
        self.speculative(|p| {
            p.token1(TokenKind::LBrace)?;
            let first = p.enumerator()?;

            let mut mn = p.collect_sequence(|p| p.comma_enumerator());
            mn.nodes.insert(0, first);

            p.token1(TokenKind::Comma); // trailing comma allowed
            p.expect_token(TokenKind::RBrace);
            Some(Node::Multiple(mn))
        })
    }
}
