//! SSH transport
//!
//! `RemoteShell` and `Connect` are what the provisioning workflow talks to;
//! `SshConnector` implements them on top of russh.

mod client;
mod shell;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{SshClient, SshConnector, SshSession};
pub use shell::{CommandOutput, Connect, RemoteShell};
