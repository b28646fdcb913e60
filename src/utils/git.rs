//! Git operations for the publisher.
//!
//! Every operation shells out to the system `git` binary, mirroring what an
//! operator would type by hand; credentials and commit identity come from
//! the ambient git configuration (SSH keys, `user.name`/`user.email`).

use crate::utils::exec::Cmd;
use anyhow::{Context, Result, bail, ensure};
use std::path::Path;

/// Git client running the system `git` binary.
///
/// Extra environment variables apply to every spawned git process, e.g.
/// `GIT_SSH_COMMAND` for credential overrides, or identity variables in
/// tests. Every invocation echoes its command line before running.
#[derive(Debug, Default)]
pub struct GitCli {
    envs: Vec<(String, String)>,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable for every git invocation.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Fail fast when no `git` binary is available on PATH.
    pub fn ensure_installed() -> Result<()> {
        if which::which("git").is_err() {
            bail!("`git` executable not found in PATH");
        }
        Ok(())
    }

    fn cmd(&self) -> Cmd {
        Cmd::new("git")
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .echo(true)
    }

    /// Clone `remote` into `dest`, streaming git's own progress output.
    pub fn clone(&self, remote: &str, dest: &Path) -> Result<()> {
        self.cmd()
            .arg("clone")
            .arg(remote)
            .arg(dest)
            .stream(true)
            .run()
            .with_context(|| format!("Failed to clone `{remote}`"))?;
        Ok(())
    }

    /// Stage all changes in `checkout`, deletions included.
    pub fn stage_all(&self, checkout: &Path) -> Result<()> {
        self.cmd()
            .args(["add", "-A", "."])
            .cwd(checkout)
            .run()
            .context("Failed to stage changes")?;
        Ok(())
    }

    /// Commit staged changes in `checkout`.
    ///
    /// Fails when there is nothing to commit or no commit identity is
    /// configured; both surface as the underlying process failure.
    pub fn commit(&self, checkout: &Path, message: &str) -> Result<()> {
        ensure!(!message.trim().is_empty(), "Commit message cannot be empty");

        self.cmd()
            .args(["commit", "-m"])
            .arg(message)
            .cwd(checkout)
            .run()
            .context("Failed to commit")?;
        Ok(())
    }

    /// Push `branch` to `origin`, streaming progress.
    ///
    /// A non-fast-forward rejection (diverged remote) is fatal unless
    /// `force` is set.
    pub fn push(&self, checkout: &Path, branch: &str, force: bool) -> Result<()> {
        let mut cmd = self
            .cmd()
            .args(["push", "origin"])
            .arg(branch)
            .cwd(checkout)
            .stream(true);
        if force {
            cmd = cmd.arg("--force");
        }

        cmd.run()
            .with_context(|| format!("Failed to push `{branch}` to origin"))?;
        Ok(())
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// GitCli with a hermetic identity, independent of ambient config.
    fn test_git() -> GitCli {
        GitCli::new()
            .env("GIT_AUTHOR_NAME", "test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_SYSTEM", "/dev/null")
    }

    fn init_bare_remote(dir: &Path) -> std::path::PathBuf {
        let remote = dir.join("remote.git");
        Cmd::new("git")
            .args(["init", "--bare", "-b", "master"])
            .arg(&remote)
            .run()
            .unwrap();
        remote
    }

    /// Clone, add a file, commit, push: one full publishing cycle.
    fn push_file(git: &GitCli, remote: &Path, workdir: &Path, name: &str) {
        git.clone(&remote.to_string_lossy(), workdir).unwrap();
        fs::write(workdir.join(name), "content").unwrap();
        git.stage_all(workdir).unwrap();
        git.commit(workdir, "seed").unwrap();
        git.push(workdir, "master", false).unwrap();
    }

    #[test]
    fn test_ensure_installed() {
        assert!(GitCli::ensure_installed().is_ok());
    }

    #[test]
    fn test_clone_commit_push_cycle() {
        let tmp = TempDir::new().unwrap();
        let git = test_git();
        let remote = init_bare_remote(tmp.path());

        push_file(&git, &remote, &tmp.path().join("work"), "index.html");

        // A fresh clone sees the pushed file
        let verify = tmp.path().join("verify");
        git.clone(&remote.to_string_lossy(), &verify).unwrap();
        assert!(verify.join("index.html").exists());
    }

    #[test]
    fn test_clone_invalid_remote_fails() {
        let tmp = TempDir::new().unwrap();
        let git = test_git();
        let err = git
            .clone("/nonexistent/blogship-remote.git", &tmp.path().join("work"))
            .unwrap_err();
        assert!(format!("{err}").contains("Failed to clone"));
    }

    #[test]
    fn test_commit_rejects_empty_message() {
        let tmp = TempDir::new().unwrap();
        let err = test_git().commit(tmp.path(), "   ").unwrap_err();
        assert!(format!("{err}").contains("cannot be empty"));
    }

    #[test]
    fn test_commit_with_nothing_staged_fails() {
        let tmp = TempDir::new().unwrap();
        let git = test_git();
        let remote = init_bare_remote(tmp.path());
        let work = tmp.path().join("work");
        push_file(&git, &remote, &work, "index.html");

        // No new changes staged
        assert!(git.commit(&work, "update 2017-10-11").is_err());
    }

    #[test]
    fn test_push_rejected_on_diverged_remote() {
        let tmp = TempDir::new().unwrap();
        let git = test_git();
        let remote = init_bare_remote(tmp.path());
        push_file(&git, &remote, &tmp.path().join("seed"), "index.html");

        // Two independent clones of the same state
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        git.clone(&remote.to_string_lossy(), &a).unwrap();
        git.clone(&remote.to_string_lossy(), &b).unwrap();

        // A advances the remote first
        fs::write(a.join("a.html"), "from a").unwrap();
        git.stage_all(&a).unwrap();
        git.commit(&a, "from a").unwrap();
        git.push(&a, "master", false).unwrap();

        // B's push is now non-fast-forward and must fail
        fs::write(b.join("b.html"), "from b").unwrap();
        git.stage_all(&b).unwrap();
        git.commit(&b, "from b").unwrap();
        assert!(git.push(&b, "master", false).is_err());

        // Force push overwrites the diverged history
        git.push(&b, "master", true).unwrap();
    }
}
