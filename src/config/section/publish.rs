//! `[publish]` section configuration.
//!
//! Contains the publishing target settings: the remote repository, its
//! served branch, and the transient clone workspace.
//!
//! # Example
//!
//! ```toml
//! [publish]
//! remote = "git@github.com:user/user.github.io"  # Publishing repository
//! branch = "master"                              # Branch served by the host
//! checkout = "_build/checkout"                   # Transient clone workspace
//! force = false                                  # Force push (overwrites remote history)
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Publishing target configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Publishing repository URL (HTTPS or SSH format).
    ///
    /// Credentials are the external git client's concern; for SSH remotes
    /// the ambient SSH keys are used.
    pub remote: String,

    /// Branch the hosting platform serves as the live site.
    pub branch: String,

    /// Directory used as the transient clone workspace.
    ///
    /// Recreated from the remote on every run; safe to delete at any time.
    pub checkout: PathBuf,

    /// Force push (overwrites remote history).
    pub force: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            remote: String::new(),
            branch: "master".to_string(),
            checkout: PathBuf::from("_build/checkout"),
            force: false,
        }
    }
}

impl PublishConfig {
    pub const REMOTE: FieldPath = FieldPath::new("publish.remote");
    pub const BRANCH: FieldPath = FieldPath::new("publish.branch");
    pub const CHECKOUT: FieldPath = FieldPath::new("publish.checkout");

    /// Validate publish configuration.
    ///
    /// # Checks
    /// - `remote` must be set.
    /// - `branch` must be non-empty.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.remote.trim().is_empty() {
            diag.error_with_hint(
                Self::REMOTE,
                "no publishing repository configured",
                "set `remote` under `[publish]`, e.g. \"git@github.com:user/user.github.io\"",
            );
        }

        if self.branch.trim().is_empty() {
            diag.error(Self::BRANCH, "branch cannot be empty");
        }
    }
}
