//! Publish command: clone, overlay, commit, push.
//!
//! The publish sequence is strictly linear; every step must complete with
//! success before the next one runs, and the first failure aborts the
//! whole run. The checkout workspace is recreated from the remote on every
//! run, so nothing survives locally between runs beyond what has been
//! pushed.

use crate::{
    config::{Config, PublishConfig},
    debug, log,
    utils::{date::DateUtc, git::GitCli, path::copy_overlay},
};
use anyhow::{Context, Result, ensure};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Publish the built site using settings from `config`.
pub fn publish_site(config: &Config) -> Result<()> {
    GitCli::ensure_installed()?;

    let publisher = Publisher::new(
        GitCli::new(),
        config.site.output.clone(),
        config.publish.clone(),
    );
    publisher.run()
}

/// Orchestrates the clone → copy → commit → push sequence.
pub struct Publisher {
    git: GitCli,
    output: PathBuf,
    publish: PublishConfig,
}

impl Publisher {
    pub fn new(git: GitCli, output: PathBuf, publish: PublishConfig) -> Self {
        Self {
            git,
            output,
            publish,
        }
    }

    /// Run the full publish sequence.
    ///
    /// Steps, in order: clean, clone, copy, stage, commit, push. No retry
    /// and no rollback; an interrupted run may leave a partially populated
    /// checkout, which the next run's clean step removes.
    pub fn run(&self) -> Result<()> {
        debug!("publish"; "checkout workspace {}", self.publish.checkout.display());

        self.clean()?;
        self.git.clone(&self.publish.remote, &self.publish.checkout)?;
        self.overlay()?;

        let checkout = self.enter()?;
        self.git.stage_all(&checkout)?;
        self.git
            .commit(&checkout, &commit_message(DateUtc::today()))?;
        self.git
            .push(&checkout, &self.publish.branch, self.publish.force)?;

        log!(
            "publish";
            "published to {} ({})", self.publish.remote, self.publish.branch
        );
        Ok(())
    }

    /// Remove any checkout left behind by a previous run.
    ///
    /// A missing directory is a no-op; any other removal failure is fatal,
    /// since cloning into a pre-existing non-empty directory must never be
    /// attempted.
    fn clean(&self) -> Result<()> {
        match fs::remove_dir_all(&self.publish.checkout) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to remove `{}`", self.publish.checkout.display())
            }),
        }
    }

    /// Overlay the build output onto the fresh checkout.
    fn overlay(&self) -> Result<()> {
        ensure!(
            self.output.is_dir(),
            "build output directory `{}` does not exist",
            self.output.display()
        );
        copy_overlay(&self.output, &self.publish.checkout)
    }

    /// Resolve the checkout directory all git operations run in.
    fn enter(&self) -> Result<PathBuf> {
        self.publish.checkout.canonicalize().with_context(|| {
            format!(
                "checkout directory `{}` is not accessible",
                self.publish.checkout.display()
            )
        })
    }
}

/// Commit message for a publish on `date`.
fn commit_message(date: DateUtc) -> String {
    format!("update {}", date.format_ymd())
}

// ============================================================================
// tests
// ============================================================================
