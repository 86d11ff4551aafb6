//! Scheduler tick rate (USER_HZ).

/// Fallback when `sysconf` cannot answer. Standard value for Linux.
const DEFAULT_CLK_TCK: u64 = 100;

/// Source of the clock-tick frequency used to turn jiffies into seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TickRate {
    /// Ask the host (`sysconf(_SC_CLK_TCK)`) on every conversion.
    #[default]
    Host,
    /// A fixed number of ticks per second.
    Fixed(u64),
}

impl TickRate {
    /// Ticks per second. Never zero.
    pub fn ticks_per_second(self) -> u64 {
        match self {
            TickRate::Host => host_clock_ticks(),
            TickRate::Fixed(hz) => hz.max(1),
        }
    }

    /// Converts jiffies to whole seconds, truncating.
    pub fn to_seconds(self, jiffies: u64) -> u64 {
        jiffies / self.ticks_per_second()
    }
}

#[cfg(unix)]
fn host_clock_ticks() -> u64 {
    // SAFETY: sysconf has no preconditions and only reads a configuration value.
    let hz = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if hz > 0 { hz as u64 } else { DEFAULT_CLK_TCK }
}

#[cfg(not(unix))]
fn host_clock_ticks() -> u64 {
    DEFAULT_CLK_TCK
}
