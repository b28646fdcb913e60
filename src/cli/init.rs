//! Project initialization.
//!
//! Writes a `blogship.toml` with documented defaults into the target
//! directory. The defaults match the conventional blog layout: build
//! output under `_build/public`, clone workspace under `_build/checkout`.

use crate::{config::Config, log};
use anyhow::{Result, bail};
use std::fs;

/// Default configuration template written by `blogship init`.
const CONFIG_TEMPLATE: &str = r#"[site]
output = "_build/public"       # Build output directory to publish

[publish]
remote = ""                    # Publishing repository, e.g. "git@github.com:user/user.github.io"
branch = "master"              # Branch the host serves as the live site
checkout = "_build/checkout"   # Transient clone workspace, recreated on every run
force = false                  # Force push (overwrites remote history)
"#;

/// Create a new project configuration
///
/// # Steps
/// 1. Refuse to overwrite an existing config file
/// 2. Create the target directory
/// 3. Write the configuration template
///
/// If `dry` is true, only prints the config template to stdout
pub fn init_project(config: &Config, dry: bool) -> Result<()> {
    if dry {
        print!("{CONFIG_TEMPLATE}");
        return Ok(());
    }

    let path = &config.config_path;
    if path.exists() {
        bail!("`{}` already exists", path.display());
    }

    fs::create_dir_all(config.get_root())?;
    fs::write(path, CONFIG_TEMPLATE)?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}
