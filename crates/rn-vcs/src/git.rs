use crate::backend::{RangeCommit, VcsError};
use gix::ObjectId;
use gix::bstr::ByteSlice;
use std::path::{Path, PathBuf};

/// Read-only view of a local git repository's history.
pub struct GitHistory {
    root: PathBuf,
}

impl GitHistory {
    pub fn open(path: &Path) -> Result<Self, VcsError> {
        let repo = gix::discover(path).map_err(|_| VcsError::RepoNotFound)?;
        let root = repo
            .workdir()
            .map_or_else(|| repo.path().to_path_buf(), Path::to_path_buf);
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves any rev-spec (tag, branch, sha) to the commit it points at.
    pub fn resolve(&self, spec: &str) -> Result<String, VcsError> {
        let repo = self.open_repo()?;
        Ok(resolve_commit(&repo, spec)?.to_string())
    }

    /// Lists the commits reachable from `head` but not from `base`, oldest
    /// first. Annotated tags are peeled to their commits.
    pub fn commit_range(&self, base: &str, head: &str) -> Result<Vec<RangeCommit>, VcsError> {
        let repo = self.open_repo()?;
        let base_id = resolve_commit(&repo, base)?;
        let head_id = resolve_commit(&repo, head)?;
        tracing::debug!(%base_id, %head_id, "walking commit range");

        let walk = repo
            .rev_walk([head_id])
            .with_hidden([base_id])
            .all()
            .map_err(map_backend_error("rev walk"))?;

        let mut commits = Vec::new();
        for info in walk {
            let info = info.map_err(map_backend_error("walk commit"))?;
            let commit = info.object().map_err(map_backend_error("load commit"))?;
            let decoded = commit.decode().map_err(map_backend_error("decode commit"))?;
            let message = decoded.message.to_str_lossy().trim_end().to_string();
            let parent_count = commit.parent_ids().count();
            commits.push(RangeCommit {
                id: commit.id.to_string(),
                message,
                parent_count,
            });
        }

        // The walk starts at the head tip; callers expect range order.
        commits.reverse();
        Ok(commits)
    }

    fn open_repo(&self) -> Result<gix::Repository, VcsError> {
        gix::discover(&self.root).map_err(|_| VcsError::RepoNotFound)
    }
}

fn resolve_commit(repo: &gix::Repository, spec: &str) -> Result<ObjectId, VcsError> {
    let peeled = format!("{spec}^{{commit}}");
    repo.rev_parse_single(peeled.as_str())
        .map(gix::Id::detach)
        .map_err(|_| VcsError::RefNotFound {
            name: spec.to_string(),
        })
}

fn map_backend_error<E: std::fmt::Display>(context: &'static str) -> impl FnOnce(E) -> VcsError {
    move |err| VcsError::BackendError {
        reason: format!("{context}: {err}"),
    }
}
