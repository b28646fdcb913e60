//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! output = "_build/public"    # Build output directory to publish
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Site settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Build output directory containing the generated site artifacts.
    ///
    /// Owned by the external build step; the publisher only reads it.
    pub output: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("_build/public"),
        }
    }
}
