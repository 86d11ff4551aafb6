//! Per-process readers for `/proc/[pid]/`.

use crate::reader::error::ReadError;
use crate::reader::procfs::parser::{
    ProcStat, parse_cmdline, parse_proc_stat, parse_status_kb, parse_status_uid,
};
use crate::reader::traits::FileSystem;
use crate::reader::users::UserLookup;
use crate::reader::{MetricsReader, logged, or_default};

impl<F: FileSystem> MetricsReader<F> {
    /// Parsed `/proc/[pid]/stat`.
    pub fn try_process_stat(&self, pid: u32) -> Result<ProcStat, ReadError> {
        let path = self.paths().pid_file(pid, "stat");
        let content = self.read(&path)?;
        parse_proc_stat(&content).ok_or_else(|| ReadError::not_found(&path, "stat fields"))
    }

    pub fn try_process_active_jiffies(&self, pid: u32) -> Result<u64, ReadError> {
        self.try_process_stat(pid).map(|stat| stat.active_jiffies())
    }

    /// CPU time of `pid` in jiffies: utime (field 14) + stime (field 15).
    ///
    /// Same unit as the system-wide jiffie readers. `0` if the process is gone.
    pub fn process_active_jiffies(&self, pid: u32) -> u64 {
        or_default("process_active_jiffies", self.try_process_active_jiffies(pid))
    }

    pub fn try_process_active_seconds(&self, pid: u32) -> Result<u64, ReadError> {
        let jiffies = self.try_process_active_jiffies(pid)?;
        Ok(self.tick_rate().to_seconds(jiffies))
    }

    /// CPU time of `pid` in whole seconds (`process_active_jiffies / hz`).
    pub fn process_active_seconds(&self, pid: u32) -> u64 {
        or_default("process_active_seconds", self.try_process_active_seconds(pid))
    }

    /// Seconds after boot at which the process of `stat` started (field 22).
    fn started_after_boot(&self, stat: &ProcStat) -> Result<u64, ReadError> {
        let starttime = stat.starttime.ok_or_else(|| {
            ReadError::not_found(self.paths().pid_file(stat.pid, "stat"), "starttime")
        })?;
        Ok(self.tick_rate().to_seconds(starttime))
    }

    /// Uptime of an already-parsed process: system uptime minus its start offset.
    pub(crate) fn uptime_of(&self, stat: &ProcStat) -> Result<u64, ReadError> {
        let started_after_boot = self.started_after_boot(stat)?;
        Ok(self.try_system_uptime()?.saturating_sub(started_after_boot))
    }

    /// Seconds `pid` has been alive: system uptime minus the start offset
    /// (field 22, jiffies after boot).
    pub fn try_process_uptime(&self, pid: u32) -> Result<u64, ReadError> {
        self.uptime_of(&self.try_process_stat(pid)?)
    }

    pub fn process_uptime(&self, pid: u32) -> u64 {
        or_default("process_uptime", self.try_process_uptime(pid))
    }

    /// Start time of `pid` in seconds since the Unix epoch.
    ///
    /// Formula: btime + starttime_jiffies / hz
    pub fn try_process_start_time(&self, pid: u32) -> Result<u64, ReadError> {
        let stat = self.try_process_stat(pid)?;
        let started_after_boot = self.started_after_boot(&stat)?;
        Ok(self.try_boot_time()?.saturating_add(started_after_boot))
    }

    pub fn process_start_time(&self, pid: u32) -> u64 {
        or_default("process_start_time", self.try_process_start_time(pid))
    }

    /// Command line from `/proc/[pid]/cmdline`, arguments joined by spaces.
    pub fn try_process_command(&self, pid: u32) -> Result<String, ReadError> {
        let path = self.paths().pid_file(pid, "cmdline");
        Ok(parse_cmdline(&self.read(&path)?))
    }

    /// Command line, or `""` (kernel threads have none).
    pub fn process_command(&self, pid: u32) -> String {
        or_default("process_command", self.try_process_command(pid))
    }

    /// Resident set size (`VmRSS`) in kB.
    pub fn try_process_ram_kb(&self, pid: u32) -> Result<u64, ReadError> {
        let path = self.paths().pid_file(pid, "status");
        let content = self.read(&path)?;
        parse_status_kb(&content, "VmRSS").ok_or_else(|| ReadError::not_found(&path, "VmRSS"))
    }

    pub fn process_ram_kb(&self, pid: u32) -> u64 {
        or_default("process_ram_kb", self.try_process_ram_kb(pid))
    }

    /// Real uid of `pid`.
    pub fn try_process_uid(&self, pid: u32) -> Result<u32, ReadError> {
        let path = self.paths().pid_file(pid, "status");
        let content = self.read(&path)?;
        parse_status_uid(&content).ok_or_else(|| ReadError::not_found(&path, "Uid"))
    }

    /// Real uid of `pid`. `None` rather than `0`, since 0 is root.
    pub fn process_uid(&self, pid: u32) -> Option<u32> {
        logged("process_uid", self.try_process_uid(pid))
    }

    /// Name of the user owning `pid`, resolved through `users`.
    pub fn process_user(&self, pid: u32, users: &impl UserLookup) -> Option<String> {
        self.process_uid(pid).and_then(|uid| users.user_name(uid))
    }
}
