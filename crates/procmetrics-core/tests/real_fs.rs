//! End-to-end readings against real files laid out under a temporary root.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use procmetrics_core::reader::{MetricsReader, PasswdUsers, ProcPaths, RealFs, TickRate};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "etc/os-release",
        "NAME=\"Fedora Linux\"\nPRETTY_NAME=\"Fedora Linux 39 (Workstation Edition)\"\n",
    );
    write(root, "etc/passwd", "root:x:0:0:root:/root:/bin/bash\nalice:x:1000:1000::/home/alice:/bin/zsh\n");
    write(
        root,
        "proc/version",
        "Linux version 6.6.8-200.fc39.x86_64 (mockbuild@fedoraproject.org) (gcc (GCC) 13.2.1) #1 SMP PREEMPT_DYNAMIC\n",
    );
    write(root, "proc/meminfo", "MemFree:         400 kB\nMemTotal:       1000 kB\nMemAvailable:    700 kB\n");
    write(root, "proc/uptime", "12345.67 8901.23\n");
    write(
        root,
        "proc/stat",
        "cpu  10 20 30 40 50 60 70 80 90 100\ncpu0 10 20 30 40 50 60 70 80 90 100\nbtime 1700000000\nprocesses 321\nprocs_running 3\n",
    );

    write(
        root,
        "proc/42/stat",
        "42 (my app) S 1 42 42 0 -1 4194304 10 0 0 0 300 200 0 0 20 0 1 0 234500 1000 100 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n",
    );
    write(root, "proc/42/status", "Name:\tmy app\nUid:\t1000\t1000\t1000\t1000\nVmRSS:\t    5120 kB\n");
    write(root, "proc/42/cmdline", "/usr/bin/my-app\0--serve\0");

    for name in ["1", "99", "abc", "7x"] {
        fs::create_dir_all(root.join("proc").join(name)).unwrap();
    }
    // Numeric name, but a file: not a process.
    write(root, "proc/5", "");

    dir
}

fn reader(dir: &TempDir) -> MetricsReader<RealFs> {
    MetricsReader::new(RealFs::new(), ProcPaths::under(dir.path())).with_tick_rate(TickRate::Fixed(100))
}

#[test]
fn system_readers() {
    let dir = fixture();
    let reader = reader(&dir);

    assert_eq!(reader.os_name(), "Fedora Linux 39 (Workstation Edition)");
    assert_eq!(reader.kernel_version(), "6.6.8-200.fc39.x86_64");
    assert_eq!(reader.memory_utilization(), 600.0);
    assert_eq!(reader.system_uptime(), 12345);
    assert_eq!(reader.total_processes(), 321);
    assert_eq!(reader.running_processes(), 3);
}

#[test]
fn cpu_jiffies() {
    let dir = fixture();
    let reader = reader(&dir);

    assert_eq!(reader.system_active_jiffies(), 270);
    assert_eq!(reader.system_idle_jiffies(), 90);
    assert_eq!(reader.system_total_jiffies(), 360);
}

#[test]
fn pids_are_numeric_directories_only() {
    let dir = fixture();
    let pids: HashSet<u32> = reader(&dir).pids().into_iter().collect();
    assert_eq!(pids, HashSet::from([1, 42, 99]));
}

#[test]
fn process_readers() {
    let dir = fixture();
    let reader = reader(&dir);
    let users = PasswdUsers::load(reader.fs(), &reader.paths().passwd);

    assert_eq!(reader.process_active_jiffies(42), 500);
    assert_eq!(reader.process_active_seconds(42), 5);
    // 234500 jiffies = 2345 s after boot.
    assert_eq!(reader.process_uptime(42), 10000);
    assert_eq!(reader.process_start_time(42), 1700002345);
    assert_eq!(reader.process_command(42), "/usr/bin/my-app --serve");
    assert_eq!(reader.process_ram_kb(42), 5120);
    assert_eq!(reader.process_user(42, &users).as_deref(), Some("alice"));

    // A pid directory with nothing inside behaves like a vanished process.
    assert_eq!(reader.process_active_jiffies(99), 0);
    assert_eq!(reader.process_uid(99), None);
}

#[test]
fn repeated_calls_return_identical_values() {
    let dir = fixture();
    let reader = reader(&dir);

    for _ in 0..2 {
        assert_eq!(reader.system_total_jiffies(), 360);
        assert_eq!(reader.memory_utilization(), 600.0);
        assert_eq!(reader.os_name(), "Fedora Linux 39 (Workstation Edition)");
    }
}

#[test]
fn readings_follow_file_changes() {
    let dir = fixture();
    let reader = reader(&dir);
    assert_eq!(reader.system_uptime(), 12345);

    write(dir.path(), "proc/uptime", "20000.01 9000.00\n");
    assert_eq!(reader.system_uptime(), 20000);

    write(dir.path(), "proc/stat", "cpu  11 20 30 41 50 60 70 80 90 100\n");
    assert_eq!(reader.system_active_jiffies(), 271);
    assert_eq!(reader.system_total_jiffies(), 362);
}

#[test]
fn missing_files_yield_empty_values() {
    let dir = tempfile::tempdir().unwrap();
    let reader = MetricsReader::new(RealFs::new(), ProcPaths::under(dir.path().join("nothing")));

    assert_eq!(reader.os_name(), "");
    assert_eq!(reader.kernel_version(), "");
    assert!(reader.pids().is_empty());
    assert!(reader.try_pids().unwrap_err().is_unavailable());
    assert_eq!(reader.memory_utilization(), 0.0);
    assert_eq!(reader.system_uptime(), 0);
    assert_eq!(reader.system_active_jiffies(), 0);
    assert_eq!(reader.system_idle_jiffies(), 0);
    assert_eq!(reader.system_total_jiffies(), 0);
    assert_eq!(reader.process_active_jiffies(1), 0);
    assert_eq!(reader.process_uptime(1), 0);
    assert_eq!(reader.process_command(1), "");
}

#[test]
fn concurrent_readers_agree() {
    let dir = fixture();
    let reader = reader(&dir);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| {
                    (
                        reader.system_total_jiffies(),
                        reader.process_active_jiffies(42),
                        reader.pids().len(),
                    )
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), (360, 500, 3));
        }
    });
}
