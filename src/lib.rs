//! keypush - install a local SSH public key on a remote server
//!
//! The workflow:
//! - Ensures an ed25519 keypair exists locally, generating one if missing
//! - Connects with the remote user's password
//! - Appends the public key to the remote authorized_keys unless already there
//! - Runs `hostname` remotely to confirm the session works

pub mod cli;
pub mod config;
pub mod error;
pub mod keys;
pub mod provision;
pub mod ssh;

pub use error::{KeypushError, Result};
