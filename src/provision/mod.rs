//! The provisioning workflow
//!
//! `Start -> KeyEnsured -> Connected -> Synced -> Verified -> Closed`.
//! Any failure skips straight to closing the session (if one was opened)
//! and surfaces as the run's error.

mod authorized_keys;
pub(crate) mod commands;
mod verify;

use std::path::PathBuf;

use secrecy::SecretString;

use crate::config::Target;
use crate::error::Result;
use crate::keys::{self, KeyGenerator, KeySource, Keypair};
use crate::ssh::{Connect, RemoteShell};

pub use authorized_keys::{ensure_authorized, SyncOutcome};
pub use verify::probe;

/// Progress notifications emitted by `Provisioner::run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    EnsuringKey,
    KeyReady(KeySource),
    Connecting,
    Authenticated,
    CheckingKeys,
    Synced(SyncOutcome),
    Verifying,
}

/// What a successful run did
#[derive(Debug, Clone)]
pub struct Report {
    pub keypair: Keypair,
    pub outcome: SyncOutcome,
    pub hostname: String,
}

pub struct Provisioner<C> {
    connector: C,
    target: Target,
    key_path: PathBuf,
    generator: KeyGenerator,
}

impl<C: Connect> Provisioner<C> {
    pub fn new(connector: C, target: Target, key_path: PathBuf, generator: KeyGenerator) -> Self {
        Self {
            connector,
            target,
            key_path,
            generator,
        }
    }

    /// Run every step once. The session is closed on every path once opened.
    pub async fn run<F>(&self, password: &SecretString, mut on_stage: F) -> Result<Report>
    where
        F: FnMut(Stage),
    {
        on_stage(Stage::EnsuringKey);
        let keypair = keys::ensure_keypair(&self.key_path, &self.generator)?;
        on_stage(Stage::KeyReady(keypair.source));

        on_stage(Stage::Connecting);
        let mut session = self.connector.open(&self.target).await?;

        let result = self
            .run_session(&mut session, password, &keypair, &mut on_stage)
            .await;

        session.close().await;
        tracing::debug!(remote = %self.target.connection_string(), "session closed");

        let (outcome, hostname) = result?;
        Ok(Report {
            keypair,
            outcome,
            hostname,
        })
    }

    async fn run_session<F>(
        &self,
        session: &mut C::Session,
        password: &SecretString,
        keypair: &Keypair,
        on_stage: &mut F,
    ) -> Result<(SyncOutcome, String)>
    where
        F: FnMut(Stage),
    {
        session.authenticate(&self.target.user, password).await?;
        on_stage(Stage::Authenticated);

        on_stage(Stage::CheckingKeys);
        let outcome = ensure_authorized(&mut *session, &keypair.public_key).await?;
        on_stage(Stage::Synced(outcome));

        on_stage(Stage::Verifying);
        let hostname = probe(&mut *session).await?;

        Ok((outcome, hostname))
    }
}
