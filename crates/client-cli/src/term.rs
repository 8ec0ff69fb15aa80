//! Terminal feedback: transient notices, blocking confirmation, and the
//! routing of API failures to the right affordance.

use std::io::{self, BufRead, Write};

use crate::http::ApiError;
use crate::validate::FieldError;

pub fn success(message: &str) {
    println!("\x1b[1;32m✅ {}\x1b[0m", message);
}

pub fn notice(message: &str) {
    println!("\x1b[36m{}\x1b[0m", message);
}

pub fn warn(message: &str) {
    eprintln!("\x1b[33m{}\x1b[0m", message);
}

pub fn failure(message: &str) {
    eprintln!("\x1b[1;31m✗ {}\x1b[0m", message);
}

/// The "no records" affordance: never render an empty table, always offer
/// the next step for this entity.
pub fn empty_state(what: &str, call_to_action: &str) {
    println!("\x1b[90mNo {} found.\x1b[0m", what);
    println!("\x1b[90m{}\x1b[0m", call_to_action);
}

/// Blocking confirm-then-act gate for destructive or state-changing actions.
/// `assume_yes` stands in for an already-confirmed dialog (`--yes`).
/// Declining means the caller performs no network call.
pub fn confirm(consequence: &str, assume_yes: bool) -> io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{} [y/N] ", consequence);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Read one line of input with a prompt (form fields collected at the
/// terminal, e.g. the request note).
pub fn prompt_line(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Show per-field validation messages. These never reach the network layer.
pub fn show_field_errors(errors: &[FieldError]) {
    for err in errors {
        eprintln!("\x1b[31m  {}\x1b[0m", err);
    }
}

/// Route an API failure to its affordance:
/// the employee-limit business error gets the upgrade prompt, an expired
/// session points at login, anything else shows the server message verbatim.
pub fn report_api_error(err: &ApiError) {
    match err {
        ApiError::LimitReached(message) => {
            failure(message);
            notice("Upgrade your package to add more employees:");
            notice("  assetverse packages");
            notice("  assetverse subscribe checkout --package <name>");
        }
        ApiError::AuthExpired => {
            warn("Your session has expired.");
            warn("Run 'assetverse login' to sign in again.");
        }
        other => failure(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preconfirmed_gate_skips_prompt() {
        // --yes stands in for an already-confirmed dialog; no stdin is read
        assert!(confirm("irrelevant", true).unwrap());
    }
}
