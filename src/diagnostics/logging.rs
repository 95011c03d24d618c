// TOKEN LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_tokens")]
macro_rules! token_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_tokens"))]
macro_rules! token_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// TOP-LEVEL TREE LOGGING MACROS (DParse)
#[macro_export]
#[cfg(feature = "show_tree")]
macro_rules! tree_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_tree"))]
macro_rules! tree_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// SYMBOL TABLE / RESOLUTION LOGGING MACROS (Gen pass 1 + pass 2)
#[macro_export]
#[cfg(feature = "show_gen")]
macro_rules! gen_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_gen"))]
macro_rules! gen_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// MIR EMISSION LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_mir")]
macro_rules! mir_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_mir"))]
macro_rules! mir_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// Extra timer logging
#[macro_export]
#[cfg(feature = "detailed_timers")]
macro_rules! timer_log {
    ($time:expr, $msg:expr) => {
        saying::say!($msg, Green #$time.elapsed());
    };
}

#[macro_export]
#[cfg(not(feature = "detailed_timers"))]
macro_rules! timer_log {
    ($time:expr, $msg:expr) => {
        // Nothing
    };
}
