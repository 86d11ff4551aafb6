//! Where the readers look.

use std::path::{Path, PathBuf};

/// Locations of the files the readers consume.
///
/// Only the roots are stored; per-file suffixes (`meminfo`, `<pid>/stat`, …)
/// are joined at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcPaths {
    pub proc_root: PathBuf,
    pub os_release: PathBuf,
    pub passwd: PathBuf,
}

impl Default for ProcPaths {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            os_release: PathBuf::from("/etc/os-release"),
            passwd: PathBuf::from("/etc/passwd"),
        }
    }
}

impl ProcPaths {
    /// Default paths with a different proc root.
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
            ..Self::default()
        }
    }

    /// Rebases every path under `root`: `<root>/proc`, `<root>/etc/os-release`
    /// and `<root>/etc/passwd`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            proc_root: root.join("proc"),
            os_release: root.join("etc/os-release"),
            passwd: root.join("etc/passwd"),
        }
    }

    /// `<proc_root>/<name>`.
    pub fn proc_file(&self, name: &str) -> PathBuf {
        self.proc_root.join(name)
    }

    /// `<proc_root>/<pid>/<name>`.
    pub fn pid_file(&self, pid: u32, name: &str) -> PathBuf {
        self.proc_root.join(pid.to_string()).join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = ProcPaths::default();
        assert_eq!(paths.proc_file("meminfo"), Path::new("/proc/meminfo"));
        assert_eq!(paths.pid_file(42, "stat"), Path::new("/proc/42/stat"));
        assert_eq!(paths.os_release, Path::new("/etc/os-release"));
    }

    #[test]
    fn test_new_overrides_proc_root_only() {
        let paths = ProcPaths::new("/host/proc");
        assert_eq!(paths.proc_file("stat"), Path::new("/host/proc/stat"));
        assert_eq!(paths.passwd, Path::new("/etc/passwd"));
    }

    #[test]
    fn test_under_rebases_everything() {
        let paths = ProcPaths::under("/tmp/fixture");
        assert_eq!(paths.proc_file("uptime"), Path::new("/tmp/fixture/proc/uptime"));
        assert_eq!(paths.os_release, Path::new("/tmp/fixture/etc/os-release"));
        assert_eq!(paths.passwd, Path::new("/tmp/fixture/etc/passwd"));
    }
}
