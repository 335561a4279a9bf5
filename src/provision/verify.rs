//! Post-provisioning connectivity check

use crate::error::{KeypushError, Result};
use crate::ssh::RemoteShell;

use super::commands;

/// Run `hostname` on the remote side and return its trimmed output
pub async fn probe<S: RemoteShell + ?Sized>(session: &mut S) -> Result<String> {
    let output = session
        .exec(commands::HOSTNAME, None)
        .await
        .map_err(|e| match e {
            KeypushError::Connection(cause) => KeypushError::Verify(cause),
            other => other,
        })?;
    if !output.success() {
        return Err(KeypushError::Verify(output.describe_failure()));
    }
    Ok(output.stdout_lossy().trim().to_string())
}
