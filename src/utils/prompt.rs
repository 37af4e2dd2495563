//! User prompt utilities for destructive-action confirmation

use anyhow::{Context, Result};
use std::io::{self, Write};

/// The one token that authorizes a destructive action
pub const CONFIRM_TOKEN: &str = "yes";

/// Exact-match confirmation check. No case folding, no prefixes: "y", "Yes"
/// and "yes please" all decline.
pub fn is_confirmed(input: &str) -> bool {
    input.trim_end_matches(['\r', '\n']) == CONFIRM_TOKEN
}

/// Print a prompt and read one line from stdin
pub fn read_line(prompt: &str) -> Result<String> {
    print!("{} ", prompt);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_token_confirms() {
        assert!(is_confirmed("yes"));
        assert!(is_confirmed("yes\n"));
        assert!(is_confirmed("yes\r\n"));
    }

    #[test]
    fn test_anything_else_declines() {
        for input in ["no", "y", "", "Yes", "YES", " yes", "yes ", "yes please", "n\n"] {
            assert!(!is_confirmed(input), "{:?} should decline", input);
        }
    }
}
