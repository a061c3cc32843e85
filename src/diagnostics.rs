use crate::config::CONFIG_FILE;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where the operator
/// can act on it, how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::ConfigInvalid { path, reason } => format!("\
# Error: Invalid Config

`{}`: {reason}

## Fix

Correct the value, or delete `{CONFIG_FILE}` to use the defaults.
", path.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::JsonDecode { file, source } => format!("\
# Error: Invalid JSON

Could not decode `{}`: {source}
", file.display()),

        Error::ReadFailed { file, source } => format!("\
# Error: Read Failed

Could not read `{}`: {source}
", file.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Check `{CONFIG_FILE}`. Recognized keys: `root`, `ancestors`, `name_key`,
`exclude`, `extension`.
"),
    }
}
