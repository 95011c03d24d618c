use std::env;
use std::path::PathBuf;

use z9front::driver;
use z9front::settings::DumpFlags;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let path = match args.first() {
        Some(first) if !first.starts_with('-') => Some(PathBuf::from(first)),
        _ => None,
    };

    let dump = DumpFlags::from_args(args.iter().map(String::as_str));

    let code = driver::run(path.as_deref(), dump);
    std::process::exit(code);
}
