//! Readers for the Linux `/proc` filesystem.
//!
//! `parser` holds the pure text parsers; `system` and `process` add the
//! system-wide and per-process readers to `MetricsReader`.

pub mod parser;
mod process;
mod system;

pub use parser::{CpuTimes, ProcStat};
