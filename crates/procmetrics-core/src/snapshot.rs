//! One pass over every reader, in a serializable form.
//!
//! Consumers that poll on an interval keep two snapshots and diff the
//! absolute counters themselves; nothing here remembers earlier readings.

use crate::reader::{CpuTimes, FileSystem, MetricsReader, ProcStat, UserLookup, logged};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// System-wide readings taken at `collected_at` (Unix seconds, UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub collected_at: i64,
    pub os_name: String,
    pub kernel_version: String,
    /// `MemTotal - MemFree`, kB.
    pub memory_used_kb: f64,
    pub uptime_seconds: u64,
    pub ticks_per_second: u64,
    pub active_jiffies: u64,
    pub idle_jiffies: u64,
    pub total_jiffies: u64,
    /// All aggregate counters, when the `cpu` line was readable.
    pub cpu: Option<CpuTimes>,
    pub total_processes: u64,
    pub running_processes: u64,
    pub pids: Vec<u32>,
    pub processes: Vec<ProcessSnapshot>,
}

/// Per-process readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub uid: Option<u32>,
    pub user: Option<String>,
    pub command: String,
    pub ram_kb: u64,
    pub active_jiffies: u64,
    pub active_seconds: u64,
    pub uptime_seconds: u64,
}

impl HostSnapshot {
    /// Takes a snapshot of the host, with per-process detail for `detail_pids`.
    pub fn collect<F: FileSystem>(
        reader: &MetricsReader<F>,
        users: &impl UserLookup,
        detail_pids: &[u32],
    ) -> Self {
        let cpu = reader.system_cpu_times();

        Self {
            collected_at: Utc::now().timestamp(),
            os_name: reader.os_name(),
            kernel_version: reader.kernel_version(),
            memory_used_kb: reader.memory_utilization(),
            uptime_seconds: reader.system_uptime(),
            ticks_per_second: reader.ticks_per_second(),
            active_jiffies: cpu.map(|c| c.active()).unwrap_or(0),
            idle_jiffies: cpu.map(|c| c.idle()).unwrap_or(0),
            total_jiffies: cpu.map(|c| c.total()).unwrap_or(0),
            cpu,
            total_processes: reader.total_processes(),
            running_processes: reader.running_processes(),
            pids: reader.pids(),
            processes: detail_pids
                .iter()
                .map(|&pid| ProcessSnapshot::collect(reader, users, pid))
                .collect(),
        }
    }
}

impl ProcessSnapshot {
    /// CPU and uptime figures all come from a single read of `/proc/[pid]/stat`.
    pub fn collect<F: FileSystem>(
        reader: &MetricsReader<F>,
        users: &impl UserLookup,
        pid: u32,
    ) -> Self {
        let uid = reader.process_uid(pid);
        let stat = logged("process_stat", reader.try_process_stat(pid));
        let active_jiffies = stat.as_ref().map(ProcStat::active_jiffies).unwrap_or(0);
        let uptime_seconds = stat
            .as_ref()
            .and_then(|stat| logged("process_uptime", reader.uptime_of(stat)))
            .unwrap_or(0);

        Self {
            pid,
            uid,
            user: uid.and_then(|uid| users.user_name(uid)),
            command: reader.process_command(pid),
            ram_kb: reader.process_ram_kb(pid),
            active_jiffies,
            active_seconds: reader.tick_rate().to_seconds(active_jiffies),
            uptime_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{MockFs, PasswdUsers, ProcPaths, TickRate};
    use std::path::Path;

    fn typical() -> (MetricsReader<MockFs>, PasswdUsers) {
        let fs = MockFs::typical_system();
        let users = PasswdUsers::load(&fs, Path::new("/etc/passwd"));
        let reader =
            MetricsReader::new(fs, ProcPaths::default()).with_tick_rate(TickRate::Fixed(100));
        (reader, users)
    }

    #[test]
    fn test_collect_host_snapshot() {
        let (reader, users) = typical();
        let snapshot = HostSnapshot::collect(&reader, &users, &[1000]);

        assert_eq!(snapshot.os_name, "Ubuntu 22.04.3 LTS");
        assert_eq!(snapshot.kernel_version, "6.5.0-14-generic");
        assert_eq!(snapshot.memory_used_kb, 8192000.0);
        assert_eq!(snapshot.uptime_seconds, 12345);
        assert_eq!(snapshot.ticks_per_second, 100);
        assert_eq!(snapshot.active_jiffies, 13800);
        assert_eq!(snapshot.idle_jiffies, 81000);
        assert_eq!(snapshot.total_jiffies, 94800);
        assert_eq!(snapshot.total_processes, 10000);
        assert_eq!(snapshot.running_processes, 2);
        assert_eq!(snapshot.pids.len(), 4);
        assert!(snapshot.collected_at > 0);

        let bash = &snapshot.processes[0];
        assert_eq!(bash.pid, 1000);
        assert_eq!(bash.user.as_deref(), Some("user"));
        assert_eq!(bash.command, "/bin/bash --login");
        assert_eq!(bash.ram_kb, 8000);
        assert_eq!(bash.active_jiffies, 150);
        assert_eq!(bash.active_seconds, 1);
        assert_eq!(bash.uptime_seconds, 11345);
    }

    #[test]
    fn test_collect_empty_host() {
        let reader = MetricsReader::new(MockFs::new(), ProcPaths::default());
        let snapshot = HostSnapshot::collect(&reader, &PasswdUsers::new(), &[42]);

        assert_eq!(snapshot.os_name, "");
        assert_eq!(snapshot.cpu, None);
        assert_eq!(snapshot.total_jiffies, 0);
        assert!(snapshot.pids.is_empty());
        assert_eq!(snapshot.processes[0].uid, None);
        assert_eq!(snapshot.processes[0].active_jiffies, 0);
    }

    #[test]
    fn test_process_snapshot_matches_readers() {
        let (reader, users) = typical();

        for pid in [1, 1000, 1001] {
            let row = ProcessSnapshot::collect(&reader, &users, pid);
            assert_eq!(row.active_jiffies, reader.process_active_jiffies(pid));
            assert_eq!(row.active_seconds, reader.process_active_seconds(pid));
            assert_eq!(row.uptime_seconds, reader.process_uptime(pid));
        }
    }

    #[test]
    fn test_process_snapshot_short_stat_line() {
        let mut fs = MockFs::typical_system();
        fs.add_file("/proc/7/stat", "7 (a) S 0 0 0 0 0 0 0 0 0 0 1000 20");
        let reader =
            MetricsReader::new(fs, ProcPaths::default()).with_tick_rate(TickRate::Fixed(100));
        let row = ProcessSnapshot::collect(&reader, &PasswdUsers::new(), 7);

        assert_eq!(row.active_jiffies, 1020);
        assert_eq!(row.active_seconds, 10);
        assert_eq!(row.uptime_seconds, 0);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let (reader, users) = typical();
        let snapshot = HostSnapshot::collect(&reader, &users, &[]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["os_name"], "Ubuntu 22.04.3 LTS");
        assert_eq!(json["cpu"]["user"], 10000);

        let back: HostSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
