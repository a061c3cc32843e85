//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so stdout carries only the report. `RUST_LOG`
//! overrides the level chosen by `-v`.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init(verbosity: u8) {
    let filter = build_env_filter(level_for_verbosity(verbosity));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(e) = installed {
        eprintln!("warning: logging unavailable: {e}");
    }
    return;
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
fn build_env_filter(level: Level) -> EnvFilter {
    return EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn.
        return EnvFilter::new(format!("warn,unresolved={}", level.as_str().to_lowercase()));
    });
}

/// Map a `-v` count to a level: none is warn, `-v` debug, `-vv` and up trace.
const fn level_for_verbosity(verbosity: u8) -> Level {
    return match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(1), Level::DEBUG);
        assert_eq!(level_for_verbosity(5), Level::TRACE);
    }
}
