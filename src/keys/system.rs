//! Key generation through the system ssh-keygen

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{KeypushError, Result};

/// Run `<program> -t ed25519 -f <path> -N "" -q`
pub fn generate(program: &str, path: &Path) -> Result<()> {
    let output = Command::new(program)
        .args(["-t", "ed25519", "-f"])
        .arg(path)
        .args(["-N", "", "-q"])
        .stdin(Stdio::null())
        .output();

    let output = match output {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(KeypushError::KeygenUnavailable(program.to_string()));
        }
        Err(e) => return Err(KeypushError::Io(e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(KeypushError::KeyGeneration(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}
