//! The seam between the provisioning workflow and the SSH transport

use async_trait::async_trait;
use secrecy::SecretString;

use crate::config::Target;
use crate::error::Result;

/// Captured result of one remote command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// None when the server closed the channel without reporting a status
    pub exit_status: Option<u32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_status == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    pub fn describe_failure(&self) -> String {
        let status = match self.exit_status {
            Some(code) => format!("exit status {}", code),
            None => "no exit status".to_string(),
        };
        let stderr = self.stderr_lossy();
        let stderr = stderr.trim();
        if stderr.is_empty() {
            status
        } else {
            format!("{}: {}", status, stderr)
        }
    }
}

/// An open session able to authenticate and run commands
///
/// Lifecycle: `Connect::open` hands out a session that is connected but not
/// yet authenticated. The caller authenticates once, runs any number of
/// commands, then calls `close`. After `close`, `is_closed` is true and
/// `exec` fails with a connection error.
///
/// Each `exec` is a separate channel. A command's stdin is closed after the
/// optional input is sent, so commands like `cat` terminate.
#[async_trait]
pub trait RemoteShell: Send {
    /// Authenticate with a password
    async fn authenticate(&mut self, user: &str, password: &SecretString) -> Result<()>;

    /// Run `command`, feeding `stdin` to it when given, and collect its output
    async fn exec(&mut self, command: &str, stdin: Option<&[u8]>) -> Result<CommandOutput>;

    /// Close the session. Safe to call more than once.
    async fn close(&mut self);

    fn is_closed(&self) -> bool;
}

/// Opens sessions to a target
#[async_trait]
pub trait Connect: Sync {
    type Session: RemoteShell;

    async fn open(&self, target: &Target) -> Result<Self::Session>;
}
