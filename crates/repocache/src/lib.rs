//! # repocache
//!
//! Paginated repository listings cached per username.
//!
//! Each username maps to a [`UserRepos`] aggregate (name, repositories loaded
//! so far, last page number) held in a bounded [`lrucache::Cache`]. Pages are
//! pulled through a [`RepoSource`]; the network client behind it lives
//! outside this crate.

#![warn(missing_docs)]

mod cache;
mod error;
mod model;
mod source;

pub use cache::{PageOutcome, RepoCache, SharedUser};
pub use error::{Error, Result};
pub use model::{parse_repos, Repo, RepoOwner, UserRepos};
pub use source::{RepoSource, StaticSource};
