//! System-wide readers: identity, memory, uptime and CPU jiffies.

use crate::reader::error::ReadError;
use crate::reader::procfs::parser::{
    CpuTimes, parse_cpu_times, parse_cpu_tokens, parse_kernel_version, parse_memory_utilization,
    parse_os_release_pretty_name, parse_stat_counter, parse_uptime,
};
use crate::reader::traits::FileSystem;
use crate::reader::{MetricsReader, logged, or_default};
use std::path::Path;

impl<F: FileSystem> MetricsReader<F> {
    /// `PRETTY_NAME` from the os-release file.
    pub fn try_os_name(&self) -> Result<String, ReadError> {
        let path = &self.paths().os_release;
        let content = self.read(path)?;
        parse_os_release_pretty_name(&content).ok_or_else(|| ReadError::not_found(path, "PRETTY_NAME"))
    }

    /// Operating system display name, or `""`.
    pub fn os_name(&self) -> String {
        or_default("os_name", self.try_os_name())
    }

    /// Kernel release from `/proc/version`.
    pub fn try_kernel_version(&self) -> Result<String, ReadError> {
        let path = self.paths().proc_file("version");
        let content = self.read(&path)?;
        parse_kernel_version(&content).ok_or_else(|| ReadError::not_found(&path, "kernel release"))
    }

    /// Kernel release, or `""`.
    pub fn kernel_version(&self) -> String {
        or_default("kernel_version", self.try_kernel_version())
    }

    /// Process ids found in the proc root, in enumeration order.
    ///
    /// Only directories whose name is made entirely of decimal digits count.
    /// Fails with `Unavailable` if the root itself cannot be listed.
    pub fn try_pids(&self) -> Result<Vec<u32>, ReadError> {
        let root = &self.paths().proc_root;
        let entries = self
            .fs()
            .read_dir(root)
            .map_err(|e| ReadError::unavailable(root, e))?;

        Ok(entries
            .iter()
            .filter_map(|entry| pid_from_entry(entry).filter(|_| self.fs().is_dir(entry)))
            .collect())
    }

    /// Process ids, or an empty list if the proc root cannot be listed.
    pub fn pids(&self) -> Vec<u32> {
        or_default("pids", self.try_pids())
    }

    /// `MemTotal - MemFree` from `/proc/meminfo`, in kB.
    pub fn try_memory_utilization(&self) -> Result<f64, ReadError> {
        let path = self.paths().proc_file("meminfo");
        let content = self.read(&path)?;
        parse_memory_utilization(&content).ok_or_else(|| ReadError::not_found(&path, "MemTotal"))
    }

    /// Used memory in kB (not a ratio), or `0.0`.
    pub fn memory_utilization(&self) -> f64 {
        or_default("memory_utilization", self.try_memory_utilization())
    }

    /// Whole seconds since boot from `/proc/uptime`.
    pub fn try_system_uptime(&self) -> Result<u64, ReadError> {
        let path = self.paths().proc_file("uptime");
        let content = self.read(&path)?;
        parse_uptime(&content).ok_or_else(|| ReadError::not_found(&path, "uptime"))
    }

    /// Seconds since boot, or `0`.
    pub fn system_uptime(&self) -> u64 {
        or_default("system_uptime", self.try_system_uptime())
    }

    /// The aggregate `cpu` line of `/proc/stat`.
    pub fn try_system_cpu_times(&self) -> Result<CpuTimes, ReadError> {
        let path = self.paths().proc_file("stat");
        let content = self.read(&path)?;
        parse_cpu_times(&content).ok_or_else(|| ReadError::not_found(&path, "cpu line"))
    }

    /// All ten aggregate counters from a single read of `/proc/stat`.
    ///
    /// Use this when active, idle and total must come from the same instant.
    pub fn system_cpu_times(&self) -> Option<CpuTimes> {
        logged("system_cpu_times", self.try_system_cpu_times())
    }

    pub fn try_system_active_jiffies(&self) -> Result<u64, ReadError> {
        self.try_system_cpu_times().map(|cpu| cpu.active())
    }

    /// `user + nice + system + irq + softirq + steal`, or `0`.
    ///
    /// `guest` and `guest_nice` are not added: the kernel already counts them
    /// inside `user` and `nice`.
    pub fn system_active_jiffies(&self) -> u64 {
        or_default("system_active_jiffies", self.try_system_active_jiffies())
    }

    pub fn try_system_idle_jiffies(&self) -> Result<u64, ReadError> {
        self.try_system_cpu_times().map(|cpu| cpu.idle())
    }

    /// `idle + iowait`, or `0`.
    pub fn system_idle_jiffies(&self) -> u64 {
        or_default("system_idle_jiffies", self.try_system_idle_jiffies())
    }

    pub fn try_system_total_jiffies(&self) -> Result<u64, ReadError> {
        Ok(self.try_system_active_jiffies()?.saturating_add(self.try_system_idle_jiffies()?))
    }

    /// `system_active_jiffies() + system_idle_jiffies()`.
    ///
    /// CPU utilization over an interval is `Δactive / Δtotal` between two
    /// snapshots taken by the caller.
    pub fn system_total_jiffies(&self) -> u64 {
        self.system_active_jiffies().saturating_add(self.system_idle_jiffies())
    }

    /// Raw counter tokens of the aggregate `cpu` line, label excluded.
    pub fn try_cpu_utilization(&self) -> Result<Vec<String>, ReadError> {
        let path = self.paths().proc_file("stat");
        let content = self.read(&path)?;
        parse_cpu_tokens(&content)
            .map(|tokens| tokens.into_iter().map(str::to_string).collect())
            .ok_or_else(|| ReadError::not_found(&path, "cpu line"))
    }

    pub fn cpu_utilization(&self) -> Vec<String> {
        or_default("cpu_utilization", self.try_cpu_utilization())
    }

    /// Forks since boot (`processes` in `/proc/stat`).
    pub fn try_total_processes(&self) -> Result<u64, ReadError> {
        self.stat_counter("processes")
    }

    pub fn total_processes(&self) -> u64 {
        or_default("total_processes", self.try_total_processes())
    }

    /// Runnable tasks right now (`procs_running` in `/proc/stat`).
    pub fn try_running_processes(&self) -> Result<u64, ReadError> {
        self.stat_counter("procs_running")
    }

    pub fn running_processes(&self) -> u64 {
        or_default("running_processes", self.try_running_processes())
    }

    /// Boot time in seconds since the Unix epoch (`btime` in `/proc/stat`).
    pub fn try_boot_time(&self) -> Result<u64, ReadError> {
        self.stat_counter("btime")
    }

    pub fn boot_time(&self) -> u64 {
        or_default("boot_time", self.try_boot_time())
    }

    fn stat_counter(&self, key: &'static str) -> Result<u64, ReadError> {
        let path = self.paths().proc_file("stat");
        let content = self.read(&path)?;
        parse_stat_counter(&content, key).ok_or_else(|| ReadError::not_found(&path, key))
    }
}

/// Pid encoded in a proc root entry name, if the name is all decimal digits.
fn pid_from_entry(entry: &Path) -> Option<u32> {
    let name = entry.file_name()?.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}
