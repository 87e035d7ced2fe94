//! Logging utilities with colored output.
//!
//! # Example
//!
//! ```ignore
//! log!("index"; "found {} html files", count);
//! log!("warn"; "multiple targets for {}", name);
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stdout};

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::utils::log::log($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// Multi-line messages are indented so continuation lines align
/// with the first line's text.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);
    let message = indent_continuation(message, calc_prefix_len(module.len()));

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Length of `"[module] "` for a module name of the given length.
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + 3
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "warn" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        "write" | "done" => prefix.bright_green().bold(),
        "index" => prefix.bright_blue().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

fn indent_continuation(message: &str, width: usize) -> String {
    if !message.contains('\n') {
        return message.to_owned();
    }
    let pad = " ".repeat(width);
    message.replace('\n', &format!("\n{pad}"))
}

// ============================================================================
// Tests
// ============================================================================
