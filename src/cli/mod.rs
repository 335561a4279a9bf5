//! Command-line interface

pub mod provision;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};
use secrecy::SecretString;

use crate::config::{self, HostKeyPolicy, Target, DEFAULT_PORT, DEFAULT_USER};
use crate::error::{KeypushError, Result};
use crate::keys::{KeyGenerator, SSH_KEYGEN};

#[derive(Debug, Parser)]
#[command(name = "keypush")]
#[command(version)]
#[command(about = "Install your SSH public key on a server using its password", long_about = None)]
pub struct Cli {
    /// Password of the remote user
    #[arg(env = "KEYPUSH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Hostname or IP address of the server
    #[arg(long, env = "KEYPUSH_HOST")]
    pub host: Option<String>,

    /// SSH port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Remote user
    #[arg(short, long, default_value = DEFAULT_USER)]
    pub user: String,

    /// Private key path [default: ~/.ssh/id_ed25519]
    #[arg(short, long)]
    pub key: Option<PathBuf>,

    /// How to generate the key when it does not exist
    #[arg(long, value_enum, default_value_t = KeygenKind::System)]
    pub keygen: KeygenKind,

    /// Verify the host key against this known_hosts file instead of trusting it
    #[arg(long, value_name = "FILE")]
    pub known_hosts: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeygenKind {
    /// Run ssh-keygen
    System,
    /// Generate in-process
    Builtin,
}

impl From<KeygenKind> for KeyGenerator {
    fn from(kind: KeygenKind) -> Self {
        match kind {
            KeygenKind::System => KeyGenerator::System(SSH_KEYGEN.to_string()),
            KeygenKind::Builtin => KeyGenerator::Builtin,
        }
    }
}

pub struct Settings {
    pub password: SecretString,
    pub target: Target,
    pub key_path: PathBuf,
    pub generator: KeyGenerator,
    pub host_key_policy: HostKeyPolicy,
}

pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

impl Cli {
    /// Resolve the arguments. Fails with a usage error before touching the
    /// filesystem or network.
    pub fn into_settings(self) -> Result<Settings> {
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| KeypushError::Usage(format!("{}\n\nThe remote password is required.", usage())))?;

        let host = self
            .host
            .filter(|h| !h.is_empty())
            .ok_or_else(|| KeypushError::Usage(format!("{}\n\n--host is required.", usage())))?;

        let key_path = match self.key {
            Some(path) => path,
            None => config::default_key_path()?,
        };

        let host_key_policy = match self.known_hosts {
            Some(path) => HostKeyPolicy::KnownHosts(path),
            None => HostKeyPolicy::AcceptAny,
        };

        Ok(Settings {
            password: SecretString::new(password),
            target: Target::new(host, self.port, self.user),
            key_path,
            generator: self.keygen.into(),
            host_key_policy,
        })
    }
}
