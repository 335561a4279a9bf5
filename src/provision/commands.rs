//! Fixed remote command lines
//!
//! None of these embed user data. The key itself reaches the remote side
//! only through the append command's stdin.

pub const ENSURE_SSH_DIR: &str = "mkdir -p ~/.ssh && chmod 700 ~/.ssh";

/// Prints the file, or nothing when it does not exist
pub const READ_AUTHORIZED_KEYS: &str =
    "if [ -f ~/.ssh/authorized_keys ]; then cat ~/.ssh/authorized_keys; fi";

pub const APPEND_AUTHORIZED_KEYS: &str =
    "cat >> ~/.ssh/authorized_keys && chmod 600 ~/.ssh/authorized_keys";

pub const HOSTNAME: &str = "hostname";
