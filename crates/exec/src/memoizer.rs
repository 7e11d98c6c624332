//! Short-lived memoization of external command results
//!
//! Probes ask the same questions of the host (`node --version`, `npm
//! --version`) from several places during a scan. The memoizer answers repeats
//! from a bounded LRU cache for as long as the stored result is younger than
//! the TTL. Expiry is checked when reading; an expired entry is simply
//! overwritten by the next fresh run.

use crate::clock::{Clock, SystemClock};
use crate::command_executor::CommandRunner;
use envdoctor_cache::BoundedCache;
use envdoctor_core::Result;
use envdoctor_utils::tracing::cache_event;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache key: the command line plus the directory it ran in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandKey {
    pub command: String,
    pub cwd: Option<PathBuf>,
}

impl CommandKey {
    pub fn new(command: &str, cwd: Option<&Path>) -> Self {
        Self {
            command: command.to_string(),
            cwd: cwd.map(Path::to_path_buf),
        }
    }
}

/// A command result as stored in the memoizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoizedResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub computed_at: Instant,
}

impl MemoizedResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.computed_at) < ttl
    }
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoizerStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoizing wrapper around a [`CommandRunner`]
pub struct CommandMemoizer {
    runner: Arc<dyn CommandRunner>,
    cache: Mutex<BoundedCache<CommandKey, Arc<MemoizedResult>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for CommandMemoizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandMemoizer")
            .field("ttl", &self.ttl)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl CommandMemoizer {
    /// Create a memoizer using the system clock
    pub fn new(runner: Arc<dyn CommandRunner>, capacity: usize, ttl: Duration) -> Result<Self> {
        Self::with_clock(runner, capacity, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(
        runner: Arc<dyn CommandRunner>,
        capacity: usize,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Ok(Self {
            runner,
            cache: Mutex::new(BoundedCache::new(capacity)?),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// The runner results are computed with
    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        Arc::clone(&self.runner)
    }

    /// Run `command` in `cwd`, or return the stored result if it is still fresh.
    ///
    /// Failed commands are cached like successful ones. Only a failure to start
    /// the command interpreter is returned as `Err`, and it is not cached.
    pub async fn execute(
        &self,
        command: &str,
        cwd: Option<&Path>,
        timeout: Duration,
    ) -> Result<Arc<MemoizedResult>> {
        let key = CommandKey::new(command, cwd);

        // The lock is released before the await below
        let cached = {
            let now = self.clock.now();
            let mut cache = self.cache.lock();
            cache
                .get(&key)
                .filter(|result| result.is_fresh(now, self.ttl))
                .cloned()
        };

        if let Some(result) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            cache_event(command, true);
            return Ok(result);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        cache_event(command, false);

        let output = self.runner.run(command, cwd, timeout).await?;
        let result = Arc::new(MemoizedResult {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.exit_code,
            computed_at: self.clock.now(),
        });

        if let Some((evicted, _)) = self.cache.lock().set(key, Arc::clone(&result)) {
            tracing::trace!(command = %evicted.command, "evicted memoized result");
        }

        Ok(result)
    }

    /// Forget the stored result for one command, returning whether it existed
    pub fn invalidate(&self, command: &str, cwd: Option<&Path>) -> bool {
        self.cache.lock().delete(&CommandKey::new(command, cwd))
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.lock().size()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn stats(&self) -> MemoizerStats {
        MemoizerStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
