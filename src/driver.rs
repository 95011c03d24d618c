use crate::diagnostics::display::print_compiler_messages;
use crate::diagnostics::errors::CompilerMessages;
use crate::gen::Gen;
use crate::lexer::tokenize;
use crate::settings::DumpFlags;
use crate::string_interning::StringTable;
use std::path::{Path, PathBuf};

/// A built-in sample used when no positional argument is given, or the first argument
/// looks like a flag.
const SAMPLE_SOURCE: &str = "int main() {\n    return 0;\n}\n";

/// Sequences lex → dparse → gen (preprocessing, final emission, and MIR
/// lowering/verification are out of scope here) and prints collected
/// diagnostics after each phase that ran.
pub fn run(path: Option<&Path>, dump: DumpFlags) -> i32 {
    let source = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("could not read {}: {e}", p.display());
                return 1;
            }
        },
        None => SAMPLE_SOURCE.to_string(),
    };

    let path_buf = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("<sample>"));

    let mut string_table = StringTable::new();
    let mut messages = CompilerMessages::new();

    let tokens = tokenize(&source, path_buf, &mut string_table, &mut messages);
    if dump.tab {
        for tok in &tokens {
            println!("{:?} {:?} @ {}", tok.kind, tok.value, tok.loc);
        }
    }

    let tree = {
        let mut parser = crate::dparse::DParser::new(&tokens, &mut messages, &string_table);
        parser.parse_translation_unit()
    };
    if dump.root {
        println!("{tree:#?}");
    }

    let symtable = {
        let mut gen = Gen::new(&mut messages, &string_table);
        gen.run(&tree);
        gen.table
    };
    if dump.module {
        for name in &symtable.order {
            println!("{name}: {:?}", symtable.members.get(name));
        }
    }

    print_compiler_messages(&messages);

    if messages.has_errors() {
        1
    } else {
        0
    }
}
