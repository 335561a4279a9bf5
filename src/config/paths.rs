//! Local key locations

use std::path::{Path, PathBuf};

use crate::error::{KeypushError, Result};

const SSH_DIR: &str = ".ssh";
const KEY_FILE: &str = "id_ed25519";

/// Get the user's ~/.ssh directory
fn get_ssh_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(SSH_DIR))
        .ok_or(KeypushError::HomeDirNotFound)
}

/// Default private key path (~/.ssh/id_ed25519)
pub fn default_key_path() -> Result<PathBuf> {
    Ok(get_ssh_dir()?.join(KEY_FILE))
}

/// Public key path for a private key path (`<path>.pub`)
pub fn public_key_path(private_key: &Path) -> PathBuf {
    let mut name = private_key.as_os_str().to_os_string();
    name.push(".pub");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_key_path_appends_suffix() {
        let path = public_key_path(Path::new("/home/oleg/.ssh/id_ed25519"));
        assert_eq!(path, PathBuf::from("/home/oleg/.ssh/id_ed25519.pub"));
    }

    #[test]
    fn test_public_key_path_keeps_existing_extension() {
        let path = public_key_path(Path::new("keys/deploy.key"));
        assert_eq!(path, PathBuf::from("keys/deploy.key.pub"));
    }
}
