//! Repository records and the per-user aggregate kept in the cache

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Owner of a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoOwner {
    /// Avatar image location (fetched by the caller, never by the cache)
    pub avatar_url: String,
}

/// One repository record from a listing page
///
/// Missing fields decode to their defaults; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repo {
    /// Repository name
    pub name: String,
    /// Numeric repository id
    pub id: u64,
    /// Star count
    pub stargazers_count: u64,
    /// Owning account
    pub owner: RepoOwner,
}

/// Decode one listing page (a JSON array of repository records)
pub fn parse_repos(payload: &[u8]) -> Result<Vec<Repo>> {
    Ok(serde_json::from_slice(payload)?)
}

/// Everything loaded so far for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRepos {
    name: String,
    repos: Vec<Repo>,
    current_page: u32,
}

impl UserRepos {
    /// Empty aggregate: no page loaded yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repos: Vec::new(),
            current_page: 0,
        }
    }

    /// Username
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repositories from every loaded page, in page order
    pub fn repos(&self) -> &[Repo] {
        &self.repos
    }

    /// Last page loaded (0 before the first)
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page to request next
    pub fn next_page(&self) -> u32 {
        self.current_page + 1
    }

    pub(crate) fn append_page(&mut self, page: u32, repos: Vec<Repo>) {
        self.current_page = page;
        self.repos.extend(repos);
    }
}
