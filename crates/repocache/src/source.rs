//! Where repository pages come from

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::model::{parse_repos, Repo};

/// Backend that serves repository listings one page at a time
///
/// Pages are numbered from 1. An empty page means there is nothing more to
/// load for that user.
pub trait RepoSource: Send + Sync {
    /// Fetch page `page` of `username`'s repositories
    fn fetch_page(&self, username: &str, page: u32) -> Result<Vec<Repo>>;
}

impl<T: RepoSource + ?Sized> RepoSource for std::sync::Arc<T> {
    fn fetch_page(&self, username: &str, page: u32) -> Result<Vec<Repo>> {
        (**self).fetch_page(username, page)
    }
}

/// In-memory source with fixed pages per user
#[derive(Debug, Default)]
pub struct StaticSource {
    pages: HashMap<String, Vec<Vec<Repo>>>,
    failing: HashSet<String>,
    fetches: AtomicUsize,
}

impl StaticSource {
    /// Create a source with no users
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page for `username`
    pub fn with_page(mut self, username: &str, repos: Vec<Repo>) -> Self {
        self.pages.entry(username.to_string()).or_default().push(repos);
        self
    }

    /// Append a page for `username` decoded from a JSON payload
    pub fn with_page_json(self, username: &str, payload: &[u8]) -> Result<Self> {
        let repos = parse_repos(payload)?;
        Ok(self.with_page(username, repos))
    }

    /// Make every fetch for `username` fail
    pub fn with_failure(mut self, username: &str) -> Self {
        self.failing.insert(username.to_string());
        self
    }

    /// Number of `fetch_page` calls served so far
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl RepoSource for StaticSource {
    fn fetch_page(&self, username: &str, page: u32) -> Result<Vec<Repo>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);

        if self.failing.contains(username) {
            return Err(Error::Source(format!(
                "request for {} page {} failed",
                username, page
            )));
        }

        let repos = page
            .checked_sub(1)
            .and_then(|idx| self.pages.get(username)?.get(idx as usize))
            .cloned()
            .unwrap_or_default();
        Ok(repos)
    }
}
