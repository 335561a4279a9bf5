//! Configuration for keypush
//!
//! Handles:
//! - The remote target and host key policy
//! - Local key file locations

mod paths;
mod target;

pub use paths::{default_key_path, public_key_path};
pub use target::{HostKeyPolicy, Target, DEFAULT_PORT, DEFAULT_USER};
