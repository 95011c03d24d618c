use crate::diagnostics::errors::CompilerMessages;
use crate::lexer::loc::{CharPosition, Loc};
use crate::lexer::tokens::{Token, TokenKind, TokenValue};
use crate::string_interning::StringTable;
use std::iter::Peekable;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::Chars;

const TRIPLE_PUNCTUATORS: &[&str] = &["...", "<<=", ">>="];
const DOUBLE_PUNCTUATORS: &[&str] = &[
    "==", "!=", ">=", "<=", "&&", "||", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>",
    "++", "--", "->",
];

fn double_punctuator_kind(s: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match s {
        "==" => EqEq,
        "!=" => Neq,
        ">=" => Ge,
        "<=" => Le,
        "&&" => AndAnd,
        "||" => OrOr,
        "+=" => PlusEq,
        "-=" => MinusEq,
        "*=" => StarEq,
        "/=" => SlashEq,
        "%=" => PercentEq,
        "&=" => AmpEq,
        "|=" => PipeEq,
        "^=" => CaretEq,
        "<<" => Shl,
        ">>" => Shr,
        "++" => PlusPlus,
        "--" => MinusMinus,
        "->" => Arrow,
        _ => return None,
    })
}

fn triple_punctuator_kind(s: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match s {
        "..." => Ellipsis,
        "<<=" => ShlEq,
        ">>=" => ShrEq,
        _ => return None,
    })
}

fn single_punctuator_kind(c: char) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match c {
        '{' => LBrace,
        '}' => RBrace,
        '(' => LParen,
        ')' => RParen,
        '[' => LBracket,
        ']' => RBracket,
        ';' => Semi,
        ',' => Comma,
        ':' => Colon,
        '.' => Dot,
        '?' => Question,
        '+' => Plus,
        '-' => Minus,
        '*' => Star,
        '/' => Slash,
        '%' => Percent,
        '&' => Amp,
        '|' => Pipe,
        '^' => Caret,
        '~' => Tilde,
        '!' => Bang,
        '=' => Assign,
        '<' => Lt,
        '>' => Gt,
        _ => return None,
    })
}

fn escape_char(c: char) -> Option<char> {
    Some(match c {
        '0' => '\0',
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        'a' => '\u{7}',
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        _ => return None,
    })
}

/// Converts a preprocessed source string into tokens, honoring `# <line> "<path>"`
/// cpp line markers as it goes. The caller supplies the initial path (the file it
/// opened); the marker-driven path only ever replaces it going forward.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    path: Rc<PathBuf>,
    pos: CharPosition,
    string_table: &'a mut StringTable,
    messages: &'a mut CompilerMessages,
}

impl<'a> Lexer<'a> {
    pub fn new(
        source: &'a str,
        path: PathBuf,
        string_table: &'a mut StringTable,
        messages: &'a mut CompilerMessages,
    ) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            path: Rc::new(path),
            pos: CharPosition::start(),
            string_table,
            messages,
        }
    }

    fn loc(&self) -> Loc {
        Loc::new(Rc::clone(&self.path), self.pos)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.bump();
                }
                _ => break,
            }
        }
    }

    /// `# <num> "<path>"` cpp line marker. The number is stored as `value - 2` so that
    /// the newline terminating this physical line brings the counter up to `value`.
    fn try_eat_cpp_linemarker(&mut self) -> bool {
        if self.peek() != Some('#') {
            return false;
        }

        let mut lookahead = self.chars.clone();
        lookahead.next();
        while matches!(lookahead.peek(), Some(' ') | Some('\t')) {
            lookahead.next();
        }

        if !matches!(lookahead.peek(), Some(c) if c.is_ascii_digit()) {
            return false;
        }

        self.bump(); // '#'
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }

        let mut digits = String::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            digits.push(self.bump().unwrap());
        }

        let new_line: i32 = digits.parse().unwrap_or(1);

        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }

        if self.peek() == Some('"') {
            self.bump();
            let mut path_str = String::new();
            while let Some(c) = self.peek() {
                if c == '"' {
                    break;
                }
                path_str.push(c);
                self.bump();
            }
            self.bump(); // closing quote
            self.path = Rc::new(PathBuf::from(path_str));
        }

        // Consume the remainder of the physical line; the following newline (processed
        // by the ordinary whitespace skip) brings the counter up to `new_line`.
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }

        self.pos.line = new_line - 1;
        self.pos.column = 1;
        true
    }

    fn collect_word(&mut self) -> Token {
        let loc = self.loc();
        let mut word = String::new();

        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            word.push(self.bump().unwrap());
        }

        if word.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            return self.finish_numeric(word, loc);
        }

        if let Some(kind) = TokenKind::keyword_from_str(&word) {
            return Token::new(kind, TokenValue::None, loc);
        }

        let id = self.string_table.intern(&word);
        Token::new(TokenKind::Id, TokenValue::Str(id), loc)
    }

    fn finish_numeric(&mut self, mut lexeme: String, loc: Loc) -> Token {
        // Permit a trailing run of hex digits / suffix letters so forms like `0x1F`,
        // `10L`, `10u` are captured; parsing failures fall back to "bad token".
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            lexeme.push(self.bump().unwrap());
        }

        let parsed = if let Some(hex) = lexeme
            .strip_prefix("0x")
            .or_else(|| lexeme.strip_prefix("0X"))
        {
            i64::from_str_radix(hex.trim_end_matches(['u', 'U', 'l', 'L']), 16)
        } else {
            lexeme
                .trim_end_matches(['u', 'U', 'l', 'L'])
                .parse::<i64>()
        };

        match parsed {
            Ok(value) => Token::new(TokenKind::Num, TokenValue::Int(value), loc),
            Err(_) => {
                self.messages.report(
                    crate::diagnostics::ErrorType::Lexical,
                    format!("bad token: {lexeme:?} is not a valid numeric literal"),
                    loc.clone(),
                );
                Token::new(TokenKind::Num, TokenValue::Int(0), loc)
            }
        }
    }

    fn collect_meta_id(&mut self) -> Token {
        let loc = self.loc();
        self.bump(); // '@'

        let mut word = String::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            word.push(self.bump().unwrap());
        }

        let id = self.string_table.intern(&word);
        Token::new(TokenKind::MetaId, TokenValue::Str(id), loc)
    }

    fn collect_stringed(&mut self, quote: char) -> Token {
        let loc = self.loc();
        let kind = if quote == '\'' {
            TokenKind::Chr
        } else {
            TokenKind::Str
        };
        self.bump(); // opening quote

        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    self.messages.report(
                        crate::diagnostics::ErrorType::Lexical,
                        "string not closed",
                        loc.clone(),
                    );
                    break;
                }
                Some(c) if c == quote => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    match self.peek() {
                        Some(escaped) => {
                            self.bump();
                            match escape_char(escaped) {
                                Some(real) => value.push(real),
                                None => {
                                    self.messages.report(
                                        crate::diagnostics::ErrorType::Lexical,
                                        format!("bad escaped char: \\{escaped}"),
                                        loc.clone(),
                                    );
                                    value.push(escaped);
                                }
                            }
                        }
                        None => {
                            self.messages.report(
                                crate::diagnostics::ErrorType::Lexical,
                                "string not closed",
                                loc.clone(),
                            );
                            break;
                        }
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }

        let id = self.string_table.intern(&value);
        Token::new(kind, TokenValue::Str(id), loc)
    }

    fn collect_punctuator(&mut self) -> Token {
        let loc = self.loc();

        let lookahead: Vec<char> = self.chars.clone().take(3).collect();

        if lookahead.len() >= 3 {
            let three: String = lookahead[..3].iter().collect();
            if let Some(kind) = triple_punctuator_kind(&three) {
                self.bump();
                self.bump();
                self.bump();
                return Token::new(kind, TokenValue::None, loc);
            }
        }

        if lookahead.len() >= 2 {
            let two: String = lookahead[..2].iter().collect();
            if let Some(kind) = double_punctuator_kind(&two) {
                self.bump();
                self.bump();
                return Token::new(kind, TokenValue::None, loc);
            }
        }

        let c = self.peek().unwrap();
        match single_punctuator_kind(c) {
            Some(kind) => {
                self.bump();
                Token::new(kind, TokenValue::None, loc)
            }
            None => {
                self.bump();
                self.messages.report(
                    crate::diagnostics::ErrorType::Lexical,
                    format!("bad token: {c:?}"),
                    loc.clone(),
                );
                // still make progress: synthesize an `id`-kinded token from the bad
                // character so callers advance rather than looping forever.
                let id = self.string_table.intern(&c.to_string());
                Token::new(TokenKind::Id, TokenValue::Str(id), loc)
            }
        }
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            if self.try_eat_cpp_linemarker() {
                continue;
            }

            break;
        }

        let loc = self.loc();
        match self.peek() {
            None => Token::new(TokenKind::Eof, TokenValue::None, loc),
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c.is_ascii_digit() => {
                self.collect_word()
            }
            Some('@') => self.collect_meta_id(),
            Some('"') => self.collect_stringed('"'),
            Some('\'') => self.collect_stringed('\''),
            Some(_) => self.collect_punctuator(),
        }
    }

    /// Tokenize the whole source, stopping after (and including) the synthetic `eof`.
    pub fn tokenize_all(mut self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(
            self.estimate_capacity(),
        );

        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            crate::token_log!("{:?} {:?} @ {}", token.kind, token.value, token.loc);
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    fn estimate_capacity(&self) -> usize {
        self.chars.clone().count() / crate::settings::SRC_TO_TOKEN_RATIO + 16
    }
}

pub fn tokenize(
    source: &str,
    path: PathBuf,
    string_table: &mut StringTable,
    messages: &mut CompilerMessages,
) -> Vec<Token> {
    Lexer::new(source, path, string_table, messages).tokenize_all()
}
