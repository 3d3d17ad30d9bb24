//! RepoCache: per-user repository listings cached in front of a source

use std::sync::Arc;

use lrucache::{Cache, CacheConfig, StatsSnapshot};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Repo, UserRepos};
use crate::source::RepoSource;

/// Cached aggregate shared between the cache and its readers
pub type SharedUser = Arc<Mutex<UserRepos>>;

/// Result of asking for one more page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page held this many repositories
    Loaded(usize),
    /// The source had nothing more; the cursor did not move
    Exhausted,
    /// A different aggregate for the user was cached while the page was
    /// fetched; the page was dropped and the cached aggregate kept
    Superseded,
}

/// Bounded cache of [`UserRepos`] keyed by username
///
/// The least recently used users are evicted first, so switching
/// between a handful of users does not refetch their pages.
pub struct RepoCache<S> {
    users: Cache<String, SharedUser>,
    source: S,
}

impl<S: RepoSource> RepoCache<S> {
    /// Create a cache holding at most `capacity` users
    ///
    /// # Arguments
    /// * `source` - Backend that serves listing pages
    /// * `capacity` - Maximum number of cached users
    pub fn new(source: S, capacity: usize) -> Result<Self> {
        Ok(Self {
            users: Cache::new(capacity)?,
            source,
        })
    }

    /// Create a cache from validated settings
    pub fn from_config(source: S, config: &CacheConfig) -> Result<Self> {
        Ok(Self {
            users: Cache::from_config(config)?,
            source,
        })
    }

    /// Get the aggregate for `username` if it is cached
    ///
    /// A hit makes the user the most recently used entry.
    pub fn cached(&self, username: &str) -> Option<SharedUser> {
        self.users.get(username)
    }

    /// Fetch the next page for `username` and append it to the aggregate
    ///
    /// An uncached user gets a fresh aggregate that enters the cache only
    /// once a page has loaded, so failed or empty lookups never displace
    /// cached users. The aggregate stays locked across the fetch, so pages
    /// of one user load in order; other users and the cache itself are not
    /// blocked. On failure the aggregate is left unchanged.
    pub fn load_next_page(&self, username: &str) -> Result<PageOutcome> {
        let user = self
            .cached(username)
            .unwrap_or_else(|| Arc::new(Mutex::new(UserRepos::new(username))));
        let mut repos = user.lock();
        let page = repos.next_page();

        let fetched = self.source.fetch_page(username, page).map_err(|err| {
            warn!(username, page, error = %err, "failed to fetch page");
            err
        })?;

        if fetched.is_empty() {
            debug!(username, page, "no more pages");
            return Ok(PageOutcome::Exhausted);
        }

        let loaded = fetched.len();
        repos.append_page(page, fetched);
        drop(repos);

        // Install the user, or reinstall it if it was evicted while the fetch
        // ran, unless another load has since cached a different aggregate.
        let installed = self
            .users
            .set_if(username.to_string(), Arc::clone(&user), |current| {
                Arc::ptr_eq(current, &user)
            });
        if !installed {
            debug!(username, page, "discarded page for replaced user");
            return Ok(PageOutcome::Superseded);
        }

        debug!(username, page, loaded, "loaded page");
        Ok(PageOutcome::Loaded(loaded))
    }

    /// Snapshot of every repository loaded for `username`
    pub fn repos(&self, username: &str) -> Option<Vec<Repo>> {
        self.cached(username).map(|user| user.lock().repos().to_vec())
    }

    /// Drop a user from the cache
    pub fn forget(&self, username: &str) -> Option<SharedUser> {
        self.users.remove(username)
    }

    /// Usernames from most to least recently used
    pub fn usernames(&self) -> Vec<String> {
        self.users.keys()
    }

    /// Number of cached users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if no user is cached
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Maximum number of cached users
    pub fn capacity(&self) -> usize {
        self.users.capacity()
    }

    /// Cache statistics
    pub fn stats(&self) -> StatsSnapshot {
        self.users.stats_snapshot()
    }

    /// Backend this cache reads through to
    pub fn source(&self) -> &S {
        &self.source
    }
}
