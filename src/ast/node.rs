use crate::lexer::loc::Loc;
use crate::lexer::tokens::Token;
use crate::string_interning::StringId;

/// The tree nodes DParse produces form a closed sum. Rather than a single `SyntaxNode`
/// keyed by a `syntax_name` string and a dynamic map (as a dynamically-typed host
/// would), each legal schema gets its own struct and its own `Node` variant — the
/// `syntax_name` becomes the variant tag, and the key set becomes the struct's fields,
/// checked at compile time instead of at lookup time.
#[derive(Debug, Clone)]
pub enum Node {
    Token(Token),
    Compound(CompoundNode),
    Multiple(MultipleNode),
    Poisoned(Loc),
    Placeholder,

    Declarator(DeclaratorNode),
    Pointer(PointerNode),
    ParameterListDeclarator(ParameterListDeclaratorNode),
    ArrayDeclarator(ArrayDeclaratorNode),
    ParameterDeclaration(ParameterDeclarationNode),
    AbstractDeclarator(AbstractDeclaratorNode),
    Declaration(DeclarationNode),
    EmptyDeclaration(EmptyDeclarationNode),
    FunctionDefinition(FunctionDefinitionNode),
    RecordSpecifier(RecordSpecifierNode),
    EnumSpecifier(EnumSpecifierNode),
    EnumeratorWithValue(EnumeratorWithValueNode),

    UseFeature(UseFeatureDirective),
    Test(TestDirective),
    AliasedImport(AliasedImportDirective),
    FullImport(FullImportDirective),
    PartialImport(PartialImportDirective),

    DeclSpec(DeclSpecNode),
    TypeBuiltin(TypeBuiltinNode),
    TypeTemplated(TypeTemplatedNode),
}

impl Node {
    pub fn loc(&self) -> &Loc {
        match self {
            Node::Token(t) => &t.loc,
            Node::Compound(n) => &n.loc,
            Node::Multiple(n) => &n.loc,
            Node::Poisoned(loc) => loc,
            Node::Placeholder => {
                unreachable!("PlaceholderNode carries no location; callers must not ask for one")
            }
            Node::Declarator(n) => &n.loc,
            Node::Pointer(n) => &n.loc,
            Node::ParameterListDeclarator(n) => &n.loc,
            Node::ArrayDeclarator(n) => &n.loc,
            Node::ParameterDeclaration(n) => &n.loc,
            Node::AbstractDeclarator(n) => &n.loc,
            Node::Declaration(n) => &n.loc,
            Node::EmptyDeclaration(n) => &n.loc,
            Node::FunctionDefinition(n) => &n.loc,
            Node::RecordSpecifier(n) => &n.loc,
            Node::EnumSpecifier(n) => &n.loc,
            Node::EnumeratorWithValue(n) => &n.loc,
            Node::UseFeature(n) => &n.loc,
            Node::Test(n) => &n.loc,
            Node::AliasedImport(n) => &n.loc,
            Node::FullImport(n) => &n.loc,
            Node::PartialImport(n) => &n.loc,
            Node::DeclSpec(n) => &n.loc,
            Node::TypeBuiltin(n) => &n.loc,
            Node::TypeTemplated(n) => &n.loc,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Node::Token(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_poisoned(&self) -> bool {
        matches!(self, Node::Poisoned(_))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Node::Placeholder)
    }
}

/// An opaque, brace-balanced (or otherwise nesting-balanced) token run: a function
/// body, an array-size initializer, or an `=`-initializer.
#[derive(Debug, Clone)]
pub struct CompoundNode {
    pub loc: Loc,
    pub tokens: Vec<Token>,
}

impl CompoundNode {
    pub fn new(loc: Loc) -> Self {
        CompoundNode {
            loc,
            tokens: Vec::new(),
        }
    }
}

/// Semantically unordered but insertion-preserving: a declaration-specifier list, a
/// parameter list, an enumerator list, or a translation unit's external declarations.
#[derive(Debug, Clone)]
pub struct MultipleNode {
    pub loc: Loc,
    pub nodes: Vec<Node>,
}

impl MultipleNode {
    pub fn new(loc: Loc) -> Self {
        MultipleNode {
            loc,
            nodes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeclaratorNode {
    pub loc: Loc,
    pub pointer: Option<Box<Node>>,
    pub direct_declarator: Box<Node>,
}

#[derive(Debug, Clone)]
pub struct PointerNode {
    pub loc: Loc,
    pub type_qualifier_list: Box<Node>,
    pub pointer: Option<Box<Node>>,
}

#[derive(Debug, Clone)]
pub struct ParameterListDeclaratorNode {
    pub loc: Loc,
    pub declarator: Option<Box<Node>>,
    pub parameter_list: Box<Node>,
    pub ellipsis: Option<Token>,
}

#[derive(Debug, Clone)]
pub struct ArrayDeclaratorNode {
    pub loc: Loc,
    pub declarator: Option<Box<Node>>,
    pub size_initializer: Box<Node>,
}

#[derive(Debug, Clone)]
pub struct ParameterDeclarationNode {
    pub loc: Loc,
    pub declaration_specifiers: Box<Node>,
    pub declarator: Option<Box<Node>>,
}

#[derive(Debug, Clone)]
pub struct AbstractDeclaratorNode {
    pub loc: Loc,
    pub pointer: Option<Box<Node>>,
    pub direct_abstract_declarator: Option<Box<Node>>,
}

#[derive(Debug, Clone)]
pub struct DeclarationNode {
    pub loc: Loc,
    pub declaration_specifiers: Box<Node>,
    pub declarator: Box<Node>,
    pub initializer: Option<Box<Node>>,
    pub bitfield: Option<Token>,
}

#[derive(Debug, Clone)]
pub struct EmptyDeclarationNode {
    pub loc: Loc,
    pub declaration_specifiers: Box<Node>,
}

#[derive(Debug, Clone)]
pub struct FunctionDefinitionNode {
    pub loc: Loc,
    pub declaration_specifiers: Box<Node>,
    pub declarator: Box<Node>,
    pub body: Option<Box<Node>>,
    pub method_modifier: Option<Token>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Struct,
    Union,
}

#[derive(Debug, Clone)]
pub struct RecordSpecifierNode {
    pub loc: Loc,
    pub kind: RecordKind,
    pub name: Option<Token>,
    pub body: Option<Box<Node>>,
}

#[derive(Debug, Clone)]
pub struct EnumSpecifierNode {
    pub loc: Loc,
    pub is_struct: bool,
    pub name: Option<Token>,
    pub body: Option<Box<Node>>,
}

#[derive(Debug, Clone)]
pub struct EnumeratorWithValueNode {
    pub loc: Loc,
    pub name: Token,
    pub initializer: Box<Node>,
}

#[derive(Debug, Clone)]
pub struct UseFeatureDirective {
    pub loc: Loc,
    pub features: Vec<Token>,
    pub body: Option<Box<Node>>,
}

#[derive(Debug, Clone)]
pub struct TestDirective {
    pub loc: Loc,
    pub description: StringId,
    pub body: CompoundNode,
}

/// The resolved `origin` of an `@import`: a bare package name, a `kind(str)` form
/// (`kind` taken verbatim, per the open-question decision in the design notes), or a
/// local string-literal path.
#[derive(Debug, Clone)]
pub enum ImportOrigin {
    Pkg(Token),
    Kind(StringId, Token),
    Local(Token),
}

#[derive(Debug, Clone)]
pub struct AliasedImportDirective {
    pub loc: Loc,
    pub alias: Token,
    pub origin: ImportOrigin,
}

#[derive(Debug, Clone)]
pub struct FullImportDirective {
    pub loc: Loc,
    pub origin: ImportOrigin,
}

#[derive(Debug, Clone)]
pub struct PartialImportDirective {
    pub loc: Loc,
    pub names: Vec<(Token, Token)>,
    pub origin: ImportOrigin,
}

#[derive(Debug, Clone)]
pub struct DeclSpecNode {
    pub loc: Loc,
    pub name: StringId,
}

#[derive(Debug, Clone)]
pub struct TypeBuiltinNode {
    pub loc: Loc,
    pub name: StringId,
}

#[derive(Debug, Clone)]
pub struct TypeTemplatedNode {
    pub loc: Loc,
}
