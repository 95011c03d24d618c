pub mod lexer;
pub mod loc;
pub mod tokens;

pub use lexer::tokenize;
pub use loc::Loc;
pub use tokens::{Token, TokenKind, TokenValue};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::errors::CompilerMessages;
    use crate::string_interning::StringTable;
    use std::path::PathBuf;

    fn lex(src: &str) -> (Vec<Token>, CompilerMessages) {
        let mut table = StringTable::new();
        let mut messages = CompilerMessages::new();
        let tokens = tokenize(src, PathBuf::from("test.c"), &mut table, &mut messages);
        (tokens, messages)
    }

    #[test]
    fn simple_function_tokens() {
        let (tokens, messages) = lex("int main() { return 0; }");
        assert!(!messages.has_errors());
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int,
                TokenKind::Id,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::Num,
                TokenKind::Semi,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn token_positions_are_monotonic() {
        let (tokens, _) = lex("int a;\nint b;\n");
        for pair in tokens.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let a_pos = (a.loc.line(), a.loc.column());
            let b_pos = (b.loc.line(), b.loc.column());
            assert!(b_pos >= a_pos, "{a_pos:?} then {b_pos:?} not monotonic");
        }
    }

    #[test]
    fn cpp_linemarker_updates_path_and_line() {
        let (tokens, _) = lex("# 42 \"other.c\"\nint x;");
        let first = &tokens[0];
        assert_eq!(first.loc.line(), 42);
        assert_eq!(first.loc.path(), std::path::Path::new("other.c"));
    }

    #[test]
    fn meta_id_recognized() {
        let (tokens, _) = lex("@use_feature foo;");
        assert_eq!(tokens[0].kind, TokenKind::MetaId);
    }

    #[test]
    fn punctuators_match_longest_first() {
        let (tokens, _) = lex("a <<= b ... c");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Id,
                TokenKind::ShlEq,
                TokenKind::Id,
                TokenKind::Ellipsis,
                TokenKind::Id,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_reported() {
        let (_, messages) = lex("\"abc");
        assert!(messages.has_errors());
    }
}
