//! LRU TTL Cache - load driver
//!
//! Shares one cache between worker threads running a deterministic mix of
//! add / add_with_ttl / get / remove and reports the outcome.

use std::env;
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl_cache::{Cache, CacheConfig, LruCache};

/// Load driver parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LoadConfig {
    /// Number of worker threads sharing the cache
    workers: usize,
    /// Operations performed by each worker
    operations: usize,
    /// Number of distinct keys the workers draw from
    key_space: usize,
    /// TTL in milliseconds for entries added with expiration
    ttl_ms: u64,
}

impl LoadConfig {
    /// Loads the driver settings from environment variables.
    ///
    /// # Environment Variables
    /// - `LOAD_WORKERS` - Worker threads (default: 4)
    /// - `LOAD_OPERATIONS` - Operations per worker (default: 10000)
    /// - `LOAD_KEY_SPACE` - Distinct keys (default: 2000)
    /// - `LOAD_TTL_MS` - TTL for expiring entries (default: 50)
    fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            workers: parse_var(&lookup, "LOAD_WORKERS", defaults.workers)?,
            operations: parse_var(&lookup, "LOAD_OPERATIONS", defaults.operations)?,
            key_space: parse_var(&lookup, "LOAD_KEY_SPACE", defaults.key_space)?,
            ttl_ms: parse_var(&lookup, "LOAD_TTL_MS", defaults.ttl_ms)?,
        };

        if config.workers == 0 || config.key_space == 0 {
            bail!("LOAD_WORKERS and LOAD_KEY_SPACE must be at least 1");
        }
        Ok(config)
    }

    fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            operations: 10_000,
            key_space: 2000,
            ttl_ms: 50,
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => bail!("invalid value for {}: {:?}", name, raw),
        },
        None => Ok(default),
    }
}

/// Per-worker tallies.
#[derive(Debug, Default, Clone, Copy)]
struct WorkerReport {
    hits: u64,
    misses: u64,
    writes: u64,
    removals: u64,
}

impl WorkerReport {
    fn merge(mut self, other: WorkerReport) -> Self {
        self.hits += other.hits;
        self.misses += other.misses;
        self.writes += other.writes;
        self.removals += other.removals;
        self
    }
}

/// Main entry point for the load driver.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load cache and load configuration from environment variables
/// 3. Run the workers against one shared cache
/// 4. Log totals and the final entry count
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cache_config = CacheConfig::from_env().context("loading cache configuration")?;
    let load_config = LoadConfig::from_env().context("loading load configuration")?;
    info!(
        "Configuration loaded: capacity={}, workers={}, operations={}, key_space={}, ttl={}ms",
        cache_config.capacity,
        load_config.workers,
        load_config.operations,
        load_config.key_space,
        load_config.ttl_ms
    );

    let cache: LruCache<String, String> = LruCache::from_config(&cache_config)?;

    let started = Instant::now();
    let report = thread::scope(|scope| {
        let handles: Vec<_> = (0..load_config.workers)
            .map(|worker| {
                let cache = &cache;
                let load_config = &load_config;
                scope.spawn(move || run_worker(worker, cache, load_config))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .try_fold(WorkerReport::default(), |acc, joined| {
                joined.map(|report| acc.merge(report))
            })
    })
    .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;

    let elapsed = started.elapsed();
    let lookups = report.hits + report.misses;
    let hit_ratio = if lookups == 0 {
        0.0
    } else {
        report.hits as f64 / lookups as f64
    };

    info!(
        "Run complete in {:?}: writes={}, removals={}, hits={}, misses={}, hit_ratio={:.3}",
        elapsed, report.writes, report.removals, report.hits, report.misses, hit_ratio
    );
    info!("Final entries: {}/{}", cache.len(), cache.cap());

    Ok(())
}

/// Runs one worker's share of operations.
///
/// Keys are spread over the key space by a per-worker stride so workers
/// contend on overlapping keys.
fn run_worker<C>(worker: usize, cache: &C, config: &LoadConfig) -> WorkerReport
where
    C: Cache<String, String> + ?Sized,
{
    let mut report = WorkerReport::default();
    let stride = worker * 7 + 1;

    for op in 0..config.operations {
        let key = format!("key{}", (op * stride + worker) % config.key_space);

        match op % 10 {
            0..=2 => {
                cache.add(key, format!("value{}-{}", worker, op));
                report.writes += 1;
            }
            3 => {
                cache.add_with_ttl(key, format!("value{}-{}", worker, op), config.ttl());
                report.writes += 1;
            }
            4 => {
                cache.remove(&key);
                report.removals += 1;
            }
            _ => match cache.get(&key) {
                Some(_) => report.hits += 1,
                None => report.misses += 1,
            },
        }
    }

    debug!(worker, hits = report.hits, misses = report.misses, "Worker finished");
    report
}
