//! In-process Ed25519 key generation
//!
//! Writes the same files ssh-keygen would: an unencrypted OpenSSH private
//! key and a one-line public key.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use ssh_key::private::{Ed25519Keypair, KeypairData};
use ssh_key::{LineEnding, PrivateKey};
use zeroize::Zeroize;

use crate::config::public_key_path;
use crate::error::{KeypushError, Result};

fn key_error(e: ssh_key::Error) -> KeypushError {
    KeypushError::KeyGeneration(e.to_string())
}

fn write_public_key(path: &Path, public_openssh: &str) -> Result<()> {
    let mut pub_file = fs::File::create(public_key_path(path))?;
    pub_file.write_all(public_openssh.as_bytes())?;
    pub_file.write_all(b"\n")?;
    Ok(())
}

/// Generate a new random Ed25519 keypair and write it to `path` and `path.pub`
pub fn generate(path: &Path, comment: &str) -> Result<()> {
    let signing_key = SigningKey::generate(&mut OsRng);
    let mut seed = signing_key.to_bytes();
    let keypair = Ed25519Keypair::from_seed(&seed);
    seed.zeroize();

    let private_key = PrivateKey::new(KeypairData::Ed25519(keypair), comment).map_err(key_error)?;
    let private_openssh = private_key.to_openssh(LineEnding::LF).map_err(key_error)?;
    let public_openssh = private_key.public_key().to_openssh().map_err(key_error)?;

    // create_new: an existing key is never clobbered
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;

    // A private key without its .pub is never regenerated, so drop it if the
    // public half cannot be written
    if let Err(e) = write_public_key(path, &public_openssh) {
        drop(file);
        fs::remove_file(path).ok();
        return Err(e);
    }

    file.write_all(private_openssh.as_bytes())?;
    file.sync_all()?;

    Ok(())
}
