//! SSH client over russh

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client;
use russh::{ChannelMsg, Disconnect};
use russh_keys::key::PublicKey;
use secrecy::{ExposeSecret, SecretString};

use super::shell::{CommandOutput, Connect, RemoteShell};
use crate::config::{HostKeyPolicy, Target};
use crate::error::{KeypushError, Result};

/// SSH client handler
pub struct SshClient {
    host: String,
    port: u16,
    policy: HostKeyPolicy,
}

impl SshClient {
    pub fn new(target: &Target, policy: HostKeyPolicy) -> Self {
        Self {
            host: target.host.clone(),
            port: target.port,
            policy,
        }
    }
}

#[async_trait]
impl client::Handler for SshClient {
    type Error = russh::Error;

    /// Called when server sends its public key for verification
    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        match &self.policy {
            HostKeyPolicy::AcceptAny => {
                tracing::warn!(
                    host = %self.host,
                    fingerprint = %server_public_key.fingerprint(),
                    "accepting host key without verification"
                );
                Ok(true)
            }
            HostKeyPolicy::KnownHosts(path) => {
                let known = russh_keys::check_known_hosts_path(
                    &self.host,
                    self.port,
                    server_public_key,
                    path,
                )?;
                if !known {
                    tracing::warn!(
                        host = %self.host,
                        fingerprint = %server_public_key.fingerprint(),
                        known_hosts = %path.display(),
                        "host key not found in known_hosts"
                    );
                }
                Ok(known)
            }
        }
    }
}

/// A connected russh session
pub struct SshSession {
    handle: Option<client::Handle<SshClient>>,
}

impl SshSession {
    fn handle(&mut self) -> Result<&mut client::Handle<SshClient>> {
        self.handle
            .as_mut()
            .ok_or_else(|| KeypushError::Connection("session is closed".into()))
    }
}

#[async_trait]
impl RemoteShell for SshSession {
    async fn authenticate(&mut self, user: &str, password: &SecretString) -> Result<()> {
        let authenticated = self
            .handle()?
            .authenticate_password(user, password.expose_secret())
            .await?;

        if !authenticated {
            return Err(KeypushError::Auth(user.to_string()));
        }
        Ok(())
    }

    async fn exec(&mut self, command: &str, stdin: Option<&[u8]>) -> Result<CommandOutput> {
        tracing::debug!(command, "running remote command");

        let mut channel = self.handle()?.channel_open_session().await?;
        channel.exec(true, command).await?;

        if let Some(input) = stdin {
            channel.data(input).await?;
        }
        channel.eof().await?;

        let mut output = CommandOutput::default();
        while let Some(msg) = channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => output.stdout.extend_from_slice(data),
                // ext 1 is stderr
                ChannelMsg::ExtendedData { ref data, ext: 1 } => {
                    output.stderr.extend_from_slice(data)
                }
                ChannelMsg::ExitStatus { exit_status } => output.exit_status = Some(exit_status),
                ChannelMsg::Close => break,
                _ => {}
            }
        }

        tracing::debug!(command, exit_status = ?output.exit_status, "remote command finished");
        Ok(output)
    }

    async fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle
                .disconnect(Disconnect::ByApplication, "keypush done", "en")
                .await
                .ok();
        }
    }

    fn is_closed(&self) -> bool {
        self.handle.is_none()
    }
}

/// Opens russh sessions with a fixed host key policy
#[derive(Debug, Clone, Default)]
pub struct SshConnector {
    policy: HostKeyPolicy,
}

impl SshConnector {
    pub fn new(policy: HostKeyPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl Connect for SshConnector {
    type Session = SshSession;

    async fn open(&self, target: &Target) -> Result<SshSession> {
        // SSH client configuration
        let config = client::Config {
            inactivity_timeout: Some(Duration::from_secs(300)),
            ..Default::default()
        };

        let handler = SshClient::new(target, self.policy.clone());
        let handle = client::connect(Arc::new(config), target.address(), handler)
            .await
            .map_err(|e| KeypushError::Connection(format!("{}: {}", target.connection_string(), e)))?;

        Ok(SshSession {
            handle: Some(handle),
        })
    }
}
