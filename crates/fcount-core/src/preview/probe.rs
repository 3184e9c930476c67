//! Availability probe for the external "file" utility.
//!
//! The "file" command is standard on Unix-like systems and can be
//! present on Windows (e.g. shipped with Git and added to `PATH`).
//! Before content-sniffed previews are offered, the utility is checked
//! twice: its `--help` output must carry the expected signature, and it
//! must classify a known directory correctly.

use std::path::Path;
use std::process::Command;

/// Signature expected in `file --help` output.
const HELP_SIGNATURE: &str = "Determine type of FILEs.";

/// Result of probing the utility.
///
/// This is advisory: callers fall back to extension-based previews on
/// [`ProbeOutcome::Unavailable`] unless sniffing was explicitly required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The utility is installed and behaves as expected.
    Ok,
    /// The utility is missing or misbehaving; the reason says why.
    Unavailable(String),
}

impl ProbeOutcome {
    /// `true` when the utility is usable.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Checks that the "file" utility is installed and works as expected.
///
/// `fixture` must be an existing directory; the utility must classify it
/// as `"<path>: directory"`. Every failure — not installed, non-zero
/// exit, unexpected output — is captured as
/// [`ProbeOutcome::Unavailable`]. This probe never panics and never
/// propagates an error.
pub fn probe_file_utility(fixture: &Path) -> ProbeOutcome {
    probe_command("file", fixture)
}

fn probe_command(program: &str, fixture: &Path) -> ProbeOutcome {
    let help = match Command::new(program).arg("--help").output() {
        Ok(out) => out,
        Err(err) => {
            return ProbeOutcome::Unavailable(format!("could not run {program} --help: {err}"))
        }
    };
    let help_text = String::from_utf8_lossy(&help.stdout);
    if !help_text.contains(HELP_SIGNATURE) {
        return ProbeOutcome::Unavailable(format!(
            "{program} --help returned unexpected output; \
             make sure the correct {program} program is on PATH"
        ));
    }

    let check = match Command::new(program).arg(fixture).output() {
        Ok(out) => out,
        Err(err) => return ProbeOutcome::Unavailable(format!("could not run {program}: {err}")),
    };
    if !check.status.success() {
        return ProbeOutcome::Unavailable(format!("{program} exited with {}", check.status));
    }

    let expected = format!("{}: directory", fixture.display());
    let actual = String::from_utf8_lossy(&check.stdout);
    if actual.trim_end() == expected {
        ProbeOutcome::Ok
    } else {
        ProbeOutcome::Unavailable(format!(
            "classifying {} returned unexpected output",
            fixture.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let outcome = probe_command("fcount-no-such-utility", tmp.path());
        match outcome {
            ProbeOutcome::Unavailable(reason) => {
                assert!(reason.contains("fcount-no-such-utility"));
            }
            ProbeOutcome::Ok => panic!("nonexistent program reported as available"),
        }
    }

    #[test]
    fn program_without_signature_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        // `true` runs fine but prints nothing that looks like "file".
        let outcome = probe_command("true", tmp.path());
        assert!(!outcome.is_ok());
    }

    #[test]
    fn probe_never_panics_on_odd_fixture() {
        let outcome = probe_file_utility(Path::new("/nonexistent/fixture"));
        // Ok only if a working "file" utility classifies a missing path
        // as a directory, which it cannot.
        assert!(!outcome.is_ok());
    }

    #[test]
    fn outcome_is_ok_helper() {
        assert!(ProbeOutcome::Ok.is_ok());
        assert!(!ProbeOutcome::Unavailable("x".to_string()).is_ok());
    }
}
