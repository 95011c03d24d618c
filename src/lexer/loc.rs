use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A 1-based source position, reset by `# <line> "<path>"` cpp line markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharPosition {
    pub line: i32,
    pub column: i32,
}

impl CharPosition {
    pub fn start() -> Self {
        CharPosition { line: 1, column: 1 }
    }
}

/// `(filepath, line, column)`, attached to every token and node.
///
/// The filepath is reference-counted since a single cpp line marker can retarget the
/// path for a long run of subsequent tokens without cloning the string each time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loc {
    pub path: Rc<PathBuf>,
    pub pos: CharPosition,
}

impl Loc {
    pub fn new(path: Rc<PathBuf>, pos: CharPosition) -> Self {
        Loc { path, pos }
    }

    pub fn line(&self) -> i32 {
        self.pos.line
    }

    pub fn column(&self) -> i32 {
        self.pos.column
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

impl std::fmt::Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.path.display(),
            self.pos.line,
            self.pos.column
        )
    }
}
