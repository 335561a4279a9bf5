//! In-memory remote host for exercising the workflow without a network

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use super::shell::{CommandOutput, Connect, RemoteShell};
use crate::config::Target;
use crate::error::{KeypushError, Result};
use crate::provision::commands;

/// State of the simulated remote account
#[derive(Debug)]
pub struct FakeHost {
    pub hostname: String,
    pub password: String,
    pub ssh_dir: bool,
    pub authorized_keys: Option<String>,
    pub reachable: bool,
    /// Commands that exit non-zero with a canned stderr
    pub failing: Vec<(String, String)>,
    /// Commands during which the transport goes away
    pub dropped: Vec<String>,
    pub opened: usize,
    pub commands: Vec<String>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            hostname: "srv-01".into(),
            password: "hunter2".into(),
            ssh_dir: false,
            authorized_keys: None,
            reachable: true,
            failing: Vec::new(),
            dropped: Vec::new(),
            opened: 0,
            commands: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    host: Arc<Mutex<FakeHost>>,
    sessions: Arc<Mutex<Vec<FakeSession>>>,
}

impl FakeConnector {
    pub fn new(host: FakeHost) -> Self {
        Self {
            host: Arc::new(Mutex::new(host)),
            sessions: Arc::default(),
        }
    }

    pub fn host(&self) -> MutexGuard<'_, FakeHost> {
        self.host.lock().unwrap()
    }

    /// A fresh session, not tracked by the connector
    pub fn session(&self) -> FakeSession {
        FakeSession {
            host: self.host.clone(),
            closed: Arc::default(),
        }
    }

    /// Shares state with the most recent session handed out by `open`
    pub fn last_session(&self) -> Option<FakeSession> {
        self.sessions.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Connect for FakeConnector {
    type Session = FakeSession;

    async fn open(&self, target: &Target) -> Result<FakeSession> {
        let mut host = self.host();
        if !host.reachable {
            return Err(KeypushError::Connection(format!(
                "{}: Connection refused (os error 111)",
                target.connection_string()
            )));
        }
        host.opened += 1;
        drop(host);

        let session = self.session();
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }
}

#[derive(Debug, Clone)]
pub struct FakeSession {
    host: Arc<Mutex<FakeHost>>,
    closed: Arc<AtomicBool>,
}

impl FakeSession {
    fn host(&self) -> MutexGuard<'_, FakeHost> {
        self.host.lock().unwrap()
    }
}

fn ok(stdout: impl Into<Vec<u8>>) -> CommandOutput {
    CommandOutput {
        stdout: stdout.into(),
        stderr: Vec::new(),
        exit_status: Some(0),
    }
}

#[async_trait]
impl RemoteShell for FakeSession {
    async fn authenticate(&mut self, user: &str, password: &SecretString) -> Result<()> {
        if password.expose_secret() != &self.host().password {
            return Err(KeypushError::Auth(user.to_string()));
        }
        Ok(())
    }

    async fn exec(&mut self, command: &str, stdin: Option<&[u8]>) -> Result<CommandOutput> {
        if self.is_closed() {
            return Err(KeypushError::Connection("session is closed".into()));
        }
        let mut host = self.host();
        host.commands.push(command.to_string());

        if host.dropped.iter().any(|c| c == command) {
            return Err(KeypushError::Connection("Broken pipe (os error 32)".into()));
        }

        if let Some((_, stderr)) = host.failing.iter().find(|(c, _)| c == command) {
            return Ok(CommandOutput {
                stdout: Vec::new(),
                stderr: stderr.clone().into_bytes(),
                exit_status: Some(1),
            });
        }

        let output = match command {
            commands::ENSURE_SSH_DIR => {
                host.ssh_dir = true;
                ok("")
            }
            commands::READ_AUTHORIZED_KEYS => ok(host.authorized_keys.clone().unwrap_or_default()),
            commands::APPEND_AUTHORIZED_KEYS => {
                let input = String::from_utf8_lossy(stdin.unwrap_or_default()).into_owned();
                host.authorized_keys.get_or_insert_with(String::new).push_str(&input);
                ok("")
            }
            commands::HOSTNAME => ok(format!("{}\n", host.hostname)),
            _ => CommandOutput {
                stdout: Vec::new(),
                stderr: format!("sh: {}: not found", command).into_bytes(),
                exit_status: Some(127),
            },
        };
        Ok(output)
    }

    async fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
