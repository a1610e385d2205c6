//! Leveled diagnostics for the CLI binary only — the library core never
//! logs, it returns typed [`yi_fwtool::Warning`](yi_fwtool::Warning) values
//! instead. Mirrors the teacher's own `displaylevel!`/`set_display_level`
//! pair: a process-global `AtomicU32`, no `log`/`tracing` dependency.

use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Verbose = 3,
}

static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(Level::Info as u32);

pub fn set_display_level(level: Level) {
    DISPLAY_LEVEL.store(level as u32, Ordering::Relaxed);
}

pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Print to stderr if `$level` is at or below the current display level.
#[macro_export]
macro_rules! logmsg {
    ($level:expr, $($arg:tt)*) => {
        if ($level as u32) <= $crate::cli::constants::display_level() {
            eprintln!($($arg)*);
        }
    };
}
