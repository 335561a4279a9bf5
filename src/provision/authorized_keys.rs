//! Idempotent authorized_keys update
//!
//! The remote file is read whole and treated as a set of key lines. Nothing
//! is locked between the read and the append: two runs against the same
//! account at the same moment can both append.

use crate::error::{KeypushError, Result};
use crate::ssh::{CommandOutput, RemoteShell};

use super::commands;

/// Result of ensuring the key is authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    AlreadyPresent,
    Added,
}

async fn run<S: RemoteShell + ?Sized>(
    session: &mut S,
    command: &str,
    stdin: Option<&[u8]>,
) -> Result<CommandOutput> {
    let output = session.exec(command, stdin).await.map_err(|e| match e {
        KeypushError::Connection(cause) => {
            KeypushError::Sync(format!("`{}`: {}", command, cause))
        }
        other => other,
    })?;
    if !output.success() {
        return Err(KeypushError::Sync(format!(
            "`{}`: {}",
            command,
            output.describe_failure()
        )));
    }
    Ok(output)
}

/// Ensure `public_key` is present in the remote ~/.ssh/authorized_keys.
///
/// A missing file reads as empty. Presence is an exact substring match of the
/// trimmed key line, so an entry is never written twice.
pub async fn ensure_authorized<S: RemoteShell + ?Sized>(
    session: &mut S,
    public_key: &str,
) -> Result<SyncOutcome> {
    let public_key = public_key.trim();
    if public_key.is_empty() {
        return Err(KeypushError::Sync("public key is empty".into()));
    }

    run(session, commands::ENSURE_SSH_DIR, None).await?;

    let contents = run(session, commands::READ_AUTHORIZED_KEYS, None)
        .await?
        .stdout_lossy();

    if contents.contains(public_key) {
        tracing::info!("key already present in authorized_keys");
        return Ok(SyncOutcome::AlreadyPresent);
    }

    let mut entry = String::with_capacity(public_key.len() + 2);
    if !contents.is_empty() && !contents.ends_with('\n') {
        entry.push('\n');
    }
    entry.push_str(public_key);
    entry.push('\n');

    run(session, commands::APPEND_AUTHORIZED_KEYS, Some(entry.as_bytes())).await?;

    tracing::info!("key appended to authorized_keys");
    Ok(SyncOutcome::Added)
}
