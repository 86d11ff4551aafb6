//! Parsers for `/proc` and `/etc` text files.
//!
//! These are pure functions over file contents. `None` means the expected
//! key, line or field is not there; the readers turn that into
//! `ReadError::NotFound`.

use serde::{Deserialize, Serialize};

/// Extracts `PRETTY_NAME` from `/etc/os-release` content.
///
/// Spaces inside quoted values are swapped for underscores before the line is
/// split into key/value tokens, then swapped back in the returned value. As a
/// side effect, underscores that were already in the value come back as spaces.
pub fn parse_os_release_pretty_name(content: &str) -> Option<String> {
    for line in content.lines() {
        let line: String = line
            .chars()
            .map(|c| match c {
                ' ' => '_',
                '=' | '"' => ' ',
                c => c,
            })
            .collect();

        let mut tokens = line.split_whitespace();
        while let (Some(key), Some(value)) = (tokens.next(), tokens.next()) {
            if key == "PRETTY_NAME" {
                return Some(value.replace('_', " "));
            }
        }
    }
    None
}

/// Extracts the kernel release from `/proc/version` content.
///
/// Format: `Linux version <release> (...)`. The release is the third token.
pub fn parse_kernel_version(content: &str) -> Option<String> {
    content
        .lines()
        .next()?
        .split_whitespace()
        .nth(2)
        .map(str::to_string)
}

/// Computes `MemTotal - MemFree` (kB) from `/proc/meminfo` content.
///
/// Stops scanning as soon as both keys have been seen. A missing `MemFree`
/// counts as zero; a missing `MemTotal` yields `None`.
pub fn parse_memory_utilization(content: &str) -> Option<f64> {
    let mut mem_total: Option<f64> = None;
    let mut mem_free: Option<f64> = None;

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let value = rest
            .split_whitespace()
            .next()
            .and_then(|s| s.parse::<f64>().ok());

        match key.trim() {
            "MemTotal" => mem_total = value,
            "MemFree" => mem_free = value,
            _ => continue,
        }

        if let (Some(total), Some(free)) = (mem_total, mem_free) {
            return Some(total - free);
        }
    }

    mem_total.map(|total| total - mem_free.unwrap_or(0.0))
}

/// Extracts whole seconds since boot from `/proc/uptime` content.
///
/// Format: `<uptime> <idle>`, both fractional seconds. The first is truncated.
pub fn parse_uptime(content: &str) -> Option<u64> {
    let uptime: f64 = content.split_whitespace().next()?.parse().ok()?;
    if !uptime.is_finite() || uptime < 0.0 {
        return None;
    }
    Some(uptime as u64)
}

/// Aggregate CPU counters from the `cpu` line of `/proc/stat`, in jiffies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuTimes {
    /// Time spent doing work: `user + nice + system + irq + softirq + steal`.
    ///
    /// `guest` and `guest_nice` are left out: the kernel already accounts
    /// them inside `user` and `nice`.
    pub fn active(&self) -> u64 {
        [self.nice, self.system, self.irq, self.softirq, self.steal]
            .into_iter()
            .fold(self.user, u64::saturating_add)
    }

    /// Time spent waiting: `idle + iowait`.
    pub fn idle(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    /// `active() + idle()`.
    pub fn total(&self) -> u64 {
        self.active().saturating_add(self.idle())
    }
}

/// Returns the counter tokens of the aggregate `cpu` line, label excluded.
///
/// Per-CPU lines (`cpu0`, `cpu1`, …) never match.
pub fn parse_cpu_tokens(content: &str) -> Option<Vec<&str>> {
    content.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        (parts.next() == Some("cpu")).then(|| parts.collect())
    })
}

/// Parses the aggregate `cpu` line of `/proc/stat`.
///
/// Columns absent on older kernels (steal, guest, guest_nice) read as 0.
/// A column that is present but not a number makes the whole line invalid.
pub fn parse_cpu_times(content: &str) -> Option<CpuTimes> {
    let parts = parse_cpu_tokens(content)?;
    let get_val = |idx: usize| -> Option<u64> {
        match parts.get(idx) {
            Some(s) => s.parse().ok(),
            None => Some(0),
        }
    };

    Some(CpuTimes {
        user: get_val(0)?,
        nice: get_val(1)?,
        system: get_val(2)?,
        idle: get_val(3)?,
        iowait: get_val(4)?,
        irq: get_val(5)?,
        softirq: get_val(6)?,
        steal: get_val(7)?,
        guest: get_val(8)?,
        guest_nice: get_val(9)?,
    })
}

/// Reads a single-valued line of `/proc/stat`, such as `processes`,
/// `procs_running` or `btime`.
pub fn parse_stat_counter(content: &str, key: &str) -> Option<u64> {
    content.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        if parts.next() == Some(key) {
            parts.next().and_then(|s| s.parse().ok())
        } else {
            None
        }
    })
}

/// The fields of `/proc/[pid]/stat` the readers use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcStat {
    pub pid: u32,
    pub comm: String,
    pub state: char,
    /// Field 14: jiffies scheduled in user mode.
    pub utime: u64,
    /// Field 15: jiffies scheduled in kernel mode.
    pub stime: u64,
    /// Field 22: jiffies after boot at which the process started.
    /// `None` on a line cut short before it.
    pub starttime: Option<u64>,
}

impl ProcStat {
    /// `utime + stime`.
    pub fn active_jiffies(&self) -> u64 {
        self.utime.saturating_add(self.stime)
    }
}

/// Parses `/proc/[pid]/stat` content.
///
/// The comm field (field 2) is wrapped in parentheses and may itself contain
/// spaces and parentheses, so fields are counted from the last `)`: field 3
/// is the first token after it. Fields up to 15 (stime) are required.
pub fn parse_proc_stat(content: &str) -> Option<ProcStat> {
    let content = content.trim();

    let open_paren = content.find('(')?;
    let close_paren = content.rfind(')')?;
    if close_paren <= open_paren {
        return None;
    }

    let pid: u32 = content[..open_paren].trim().parse().ok()?;
    let comm = content[open_paren + 1..close_paren].to_string();

    let fields: Vec<&str> = content[close_paren + 1..].split_whitespace().collect();
    // fields[0] is field 3 of the man page numbering.
    let field = |n: usize| -> Option<u64> { fields.get(n - 3)?.parse().ok() };

    Some(ProcStat {
        pid,
        comm,
        state: fields.first()?.chars().next()?,
        utime: field(14)?,
        stime: field(15)?,
        starttime: field(22),
    })
}

/// Turns `/proc/[pid]/cmdline` content into a printable command line.
///
/// Arguments are NUL-separated; they come back joined by single spaces.
pub fn parse_cmdline(content: &str) -> String {
    content.replace('\0', " ").trim().to_string()
}

/// Reads a `Key:\t<n> kB` value from `/proc/[pid]/status` content.
pub fn parse_status_kb(content: &str, key: &str) -> Option<u64> {
    content.lines().find_map(|line| {
        let (k, value) = line.split_once(':')?;
        if k.trim() != key {
            return None;
        }
        value.split_whitespace().next()?.parse().ok()
    })
}

/// Reads the real uid (first column of `Uid:`) from `/proc/[pid]/status` content.
pub fn parse_status_uid(content: &str) -> Option<u32> {
    content.lines().find_map(|line| {
        let value = line.strip_prefix("Uid:")?;
        value.split_whitespace().next()?.parse().ok()
    })
}
