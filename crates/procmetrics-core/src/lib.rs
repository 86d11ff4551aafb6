//! procmetrics-core - point-in-time Linux host metrics from `/proc`.
//!
//! Provides:
//! - `reader` - `MetricsReader`, the filesystem seam (`RealFs`, `MockFs`),
//!   the `/proc` parsers and the jiffie accounting
//! - `snapshot` - serializable one-shot snapshot of every reader

pub mod reader;
pub mod snapshot;
