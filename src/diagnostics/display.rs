use crate::diagnostics::errors::{CompilerError, CompilerMessages, CompilerWarning, ErrorType};
use saying::say;
use std::fs;

pub fn print_compiler_messages(messages: &CompilerMessages) {
    for err in &messages.errors {
        print_formatted_error(err);
    }

    for warning in &messages.warnings {
        print_formatted_warning(warning);
    }
}

pub fn print_formatted_error(e: &CompilerError) {
    let prefix = format!(
        "{}:{}:{}",
        e.loc.path().display(),
        e.loc.line(),
        e.loc.column()
    );

    let label = match e.error_type {
        ErrorType::Lexical => "lexical error",
        ErrorType::Syntax => "syntax error",
        ErrorType::Rule => "error",
        ErrorType::Internal => "internal compiler error",
    };

    say!(Red label, ": ", { e.msg.clone() });
    say!(Dark Magenta prefix);

    if let Ok(contents) = fs::read_to_string(e.loc.path()) {
        if let Some(line) = contents.lines().nth((e.loc.line() - 1).max(0) as usize) {
            println!("{line}");
            print!("{}", " ".repeat((e.loc.column() - 1).max(0) as usize));
            say!(Red "^");
        }
    }
}

pub fn print_formatted_warning(w: &CompilerWarning) {
    let prefix = format!(
        "{}:{}:{}",
        w.loc.path().display(),
        w.loc.line(),
        w.loc.column()
    );

    say!(Yellow "warning: ", { w.msg.clone() });
    say!(Dark Magenta prefix);
}
