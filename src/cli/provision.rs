//! Provision the local key onto the configured server

use colored::Colorize;

use crate::error::Result;
use crate::keys::KeySource;
use crate::provision::{Provisioner, Stage, SyncOutcome};
use crate::ssh::SshConnector;

use super::Settings;

pub fn run(settings: Settings) -> Result<()> {
    let Settings {
        password,
        target,
        key_path,
        generator,
        host_key_policy,
    } = settings;

    let connection = target.connection_string();
    let provisioner = Provisioner::new(
        SshConnector::new(host_key_policy),
        target,
        key_path.clone(),
        generator,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = runtime.block_on(provisioner.run(&password, |stage| match stage {
        Stage::EnsuringKey => {}
        Stage::KeyReady(KeySource::Generated) => {
            println!("{} {}", "Generated SSH key".green(), key_path.display());
        }
        Stage::KeyReady(KeySource::Existing) => {
            println!("{}", format!("Using SSH key {}", key_path.display()).dimmed());
        }
        Stage::Connecting => println!("{} {}...", "Connecting to".cyan(), connection.bold()),
        Stage::Authenticated => {}
        Stage::CheckingKeys => println!("{}", "Checking authorized_keys...".cyan()),
        Stage::Synced(SyncOutcome::AlreadyPresent) => {
            println!("{}", "Key already authorized.".yellow())
        }
        Stage::Synced(SyncOutcome::Added) => println!("{}", "Key added.".green()),
        Stage::Verifying => println!("{}", "Verifying connection...".cyan()),
    }))?;

    if let Some(fingerprint) = report.keypair.fingerprint() {
        println!("{} {}", "Key fingerprint:".dimmed(), fingerprint);
    }
    println!("{} {}", "Connected to:".green().bold(), report.hostname);

    Ok(())
}
