//! Version and usage output for the encyclo CLI.

/// The current version of encyclo, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: encyclo [OPTIONS]

Options:
  -t, --topic <TOPIC>      Topic to generate (starts immediately in the TUI)
  -r, --rounds <N>         Maximum critique/revise rounds (default 3)
      --base-url <URL>     Backend address (default http://localhost:8080)
      --headless           Stream to stdout instead of opening the TUI
      --continue <FILE>    Revise a saved result (implies --headless)
  -o, --output <FILE>      Save the final result as JSON (implies --headless)
  -V, --version            Print version
  -h, --help               Print this help

Environment:
  ENCYCLO_BASE_URL, ENCYCLO_MAX_ROUNDS, ENCYCLO_DEBOUNCE_MS,
  ENCYCLO_TIMEOUT_SECS, ENCYCLO_LOG";

/// Handle the --version command.
///
/// Prints the version string and exits successfully.
pub fn handle_version_command() -> ! {
    println!("encyclo {}", VERSION);
    std::process::exit(0)
}

pub fn handle_help_command() -> ! {
    println!("encyclo {}\n\n{}", VERSION, USAGE);
    std::process::exit(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_usage_lists_every_flag() {
        for flag in [
            "--topic",
            "--rounds",
            "--base-url",
            "--headless",
            "--continue",
            "--output",
            "--version",
            "--help",
        ] {
            assert!(USAGE.contains(flag), "{flag} missing from usage");
        }
    }
}
