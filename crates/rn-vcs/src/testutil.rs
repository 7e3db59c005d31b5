use std::io;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Throwaway repository driven through the git CLI.
pub struct GitTestRepo {
    dir: TempDir,
}

impl GitTestRepo {
    pub fn new() -> io::Result<Self> {
        let repo = Self {
            dir: tempfile::tempdir()?,
        };
        repo.git(&["init", "-q", "-b", "main"])?;
        repo.git(&["config", "user.name", "Test User"])?;
        repo.git(&["config", "user.email", "test@example.com"])?;
        repo.git(&["config", "commit.gpgsign", "false"])?;
        repo.git(&["config", "tag.gpgsign", "false"])?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn commit(&self, message: &str) -> io::Result<()> {
        self.git(&["commit", "-q", "--allow-empty", "-m", message])
    }

    pub fn tag(&self, name: &str) -> io::Result<()> {
        self.git(&["tag", name])
    }

    pub fn annotated_tag(&self, name: &str) -> io::Result<()> {
        self.git(&["tag", "-a", name, "-m", name])
    }

    pub fn branch(&self, name: &str) -> io::Result<()> {
        self.git(&["checkout", "-q", "-b", name])
    }

    pub fn switch(&self, name: &str) -> io::Result<()> {
        self.git(&["checkout", "-q", name])
    }

    pub fn merge_no_ff(&self, branch: &str, message: &str) -> io::Result<()> {
        self.git(&["merge", "-q", "--no-ff", branch, "-m", message])
    }

    fn git(&self, args: &[&str]) -> io::Result<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::other(format!(
                "git {} failed: {stderr}",
                args.join(" ")
            )));
        }
        Ok(())
    }
}
