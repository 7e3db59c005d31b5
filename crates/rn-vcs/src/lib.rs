pub mod backend;
pub mod git;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use crate::backend::{RangeCommit, VcsError};
pub use crate::git::GitHistory;
