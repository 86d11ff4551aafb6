//! Point-in-time host metrics read from the Linux `/proc` filesystem.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       MetricsReader                         │
//! │  ┌─────────────────────┐   ┌─────────────────────────────┐  │
//! │  │  process readers    │   │     system readers          │  │
//! │  │  - /proc/[pid]/*    │   │  - /proc/{stat,meminfo,...} │  │
//! │  │  - UserLookup       │   │  - /etc/os-release          │  │
//! │  └──────────┬──────────┘   └──────────────┬──────────────┘  │
//! │             └──────────────┬──────────────┘                 │
//! │                     ┌──────▼──────┐                         │
//! │                     │  FileSystem │ (trait)                 │
//! │                     └──────┬──────┘                         │
//! └────────────────────────────┼────────────────────────────────┘
//!                       ┌──────┴──────┐
//!                ┌──────▼──────┐ ┌────▼────────┐
//!                │   RealFs    │ │   MockFs    │
//!                └─────────────┘ └─────────────┘
//! ```
//!
//! Every reader comes in two flavours. `try_*` returns `Result<T, ReadError>`.
//! The plain one is the best-effort form: any failure is logged at `debug`
//! and reported as zero, an empty string or an empty list. A zero reading
//! therefore means "unknown", not "the kernel said zero".
//!
//! Nothing is cached. Each call opens, reads and closes its own files.
//!
//! # Usage
//!
//! ```
//! use procmetrics_core::reader::{MetricsReader, MockFs, ProcPaths, TickRate};
//!
//! let reader = MetricsReader::new(MockFs::typical_system(), ProcPaths::default())
//!     .with_tick_rate(TickRate::Fixed(100));
//! assert_eq!(reader.system_uptime(), 12345);
//! assert_eq!(reader.process_active_jiffies(1000), 150);
//! ```

pub mod clock;
pub mod error;
pub mod mock;
pub mod paths;
pub mod procfs;
pub mod traits;
pub mod users;

pub use clock::TickRate;
pub use error::ReadError;
pub use mock::MockFs;
pub use paths::ProcPaths;
pub use procfs::{CpuTimes, ProcStat};
pub use traits::{FileSystem, RealFs};
pub use users::{PasswdUsers, UserLookup};

use std::path::Path;
use tracing::debug;

/// Stateless façade over the `/proc` readers.
///
/// Holds only immutable configuration, so a shared reference can be used
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct MetricsReader<F: FileSystem> {
    fs: F,
    paths: ProcPaths,
    tick_rate: TickRate,
}

impl MetricsReader<RealFs> {
    /// Reader over the live host: `/proc`, `/etc/os-release`, `/etc/passwd`.
    pub fn host() -> Self {
        Self::new(RealFs::new(), ProcPaths::default())
    }
}

impl<F: FileSystem> MetricsReader<F> {
    /// Creates a reader.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `paths` - Where the proc root and `/etc` files live
    pub fn new(fs: F, paths: ProcPaths) -> Self {
        Self {
            fs,
            paths,
            tick_rate: TickRate::Host,
        }
    }

    /// Overrides the clock-tick source (the host's `_SC_CLK_TCK` by default).
    pub fn with_tick_rate(mut self, tick_rate: TickRate) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn paths(&self) -> &ProcPaths {
        &self.paths
    }

    /// Scheduler ticks per second used for jiffie conversions.
    pub fn ticks_per_second(&self) -> u64 {
        self.tick_rate.ticks_per_second()
    }

    pub(crate) fn tick_rate(&self) -> TickRate {
        self.tick_rate
    }

    pub(crate) fn read(&self, path: &Path) -> Result<String, ReadError> {
        self.fs
            .read_to_string(path)
            .map_err(|e| ReadError::unavailable(path, e))
    }
}

/// Turns a failed reading into `None`, leaving a debug trace behind.
pub(crate) fn logged<T>(op: &'static str, result: Result<T, ReadError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(op = op, error = %e, "reading unavailable");
            None
        }
    }
}

/// Best-effort form of a reading: failures become `T::default()`.
pub(crate) fn or_default<T: Default>(op: &'static str, result: Result<T, ReadError>) -> T {
    logged(op, result).unwrap_or_default()
}
