// This is a guess about how much should be initially allocated for the token, node and
// symbol-table vecs. This should be a rough guess to help avoid too many allocations
// and is just a heuristic based on tests with small-to-medium translation units.
// Should be recalculated at a later point.
pub const SRC_TO_TOKEN_RATIO: usize = 5; // (Maybe) About 1/5 source bytes to tokens observed
pub const TOKEN_TO_NODE_RATIO: usize = 8; // (Maybe) About 1/8 tokens to top-level node ratio
pub const TOKEN_TO_SYMBOL_RATIO: usize = 20; // (Maybe) About 1/20 tokens to predeclared symbol ratio
pub const MINIMUM_LIKELY_DECLARATIONS: usize = 8; // Smallest common translation unit's top-level count
pub const MINIMUM_STRING_TABLE_CAPACITY: usize = 64;

/// Recognized dump switches, selected from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpFlags {
    pub root: bool,
    pub tab: bool,
    pub module: bool,
}

impl DumpFlags {
    pub fn from_args<'a>(args: impl Iterator<Item = &'a str>) -> Self {
        let mut flags = DumpFlags::default();

        for arg in args {
            match arg {
                "--dump-root" => flags.root = true,
                "--dump-tab" => flags.tab = true,
                "--dump-module" => flags.module = true,
                _ => {}
            }
        }

        flags
    }
}
