//! Remote target configuration

/// Default SSH port
pub const DEFAULT_PORT: u16 = 22;

/// Default remote user
pub const DEFAULT_USER: &str = "root";

/// The remote host the key is provisioned onto
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Hostname or IP address
    pub host: String,
    /// SSH port (default: 22)
    pub port: u16,
    /// Username for SSH connection
    pub user: String,
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
        }
    }

    /// Get the SSH connection string (user@host or user@host:port)
    pub fn connection_string(&self) -> String {
        if self.port == DEFAULT_PORT {
            format!("{}@{}", self.user, self.host)
        } else {
            format!("{}@{}:{}", self.user, self.host, self.port)
        }
    }

    pub fn address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// How the server's host key is treated on connect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HostKeyPolicy {
    /// Trust any host key without verification
    #[default]
    AcceptAny,
    /// Require the key to be listed in the given known_hosts file
    KnownHosts(std::path::PathBuf),
}
