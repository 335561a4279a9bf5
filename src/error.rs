use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeypushError>;

#[derive(Debug, Error)]
pub enum KeypushError {
    #[error("{0}")]
    Usage(String),

    #[error("Cannot determine the home directory")]
    HomeDirNotFound,

    #[error("'{0}' not found. Please install OpenSSH or use --keygen builtin.")]
    KeygenUnavailable(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("SSH connection failed: {0}")]
    Connection(String),

    #[error("SSH authentication failed for {0}")]
    Auth(String),

    #[error("Updating authorized_keys failed: {0}")]
    Sync(String),

    #[error("Verification failed: {0}")]
    Verify(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KeypushError {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> u8 {
        // Every failure kind exits with 1; the kind only selects the message.
        match self {
            Self::Usage(_)
            | Self::HomeDirNotFound
            | Self::KeygenUnavailable(_)
            | Self::KeyGeneration(_)
            | Self::Connection(_)
            | Self::Auth(_)
            | Self::Sync(_)
            | Self::Verify(_)
            | Self::Io(_) => 1,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

impl From<russh::Error> for KeypushError {
    fn from(e: russh::Error) -> Self {
        Self::Connection(e.to_string())
    }
}
