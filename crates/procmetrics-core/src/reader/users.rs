//! Uid to user-name resolution.

use crate::reader::traits::FileSystem;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Account lookup service consulted by `MetricsReader::process_user`.
pub trait UserLookup: Send + Sync {
    /// Display name for `uid`, if the account database knows it.
    fn user_name(&self, uid: u32) -> Option<String>;
}

/// Lookup table built from a passwd file.
///
/// Loaded once; call `load` again to pick up account changes.
#[derive(Debug, Clone, Default)]
pub struct PasswdUsers {
    uid_to_name: HashMap<u32, String>,
}

impl PasswdUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the passwd file at `path`. An unreadable file gives an empty table.
    pub fn load<F: FileSystem>(fs: &F, path: &Path) -> Self {
        match fs.read_to_string(path) {
            Ok(content) => Self::from_content(&content),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "passwd unavailable");
                Self::new()
            }
        }
    }

    /// Builds the table from `name:password:uid:...` lines.
    ///
    /// Comments, blank lines and lines without a numeric uid are skipped.
    pub fn from_content(content: &str) -> Self {
        let uid_to_name = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let mut fields = line.split(':');
                let name = fields.next()?;
                let uid = fields.nth(1)?.parse().ok()?;
                Some((uid, name.to_string()))
            })
            .collect();
        Self { uid_to_name }
    }

    /// Returns true if the table has any mappings.
    pub fn is_loaded(&self) -> bool {
        !self.uid_to_name.is_empty()
    }
}

impl UserLookup for PasswdUsers {
    fn user_name(&self, uid: u32) -> Option<String> {
        self.uid_to_name.get(&uid).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::mock::MockFs;

    #[test]
    fn test_passwd_users() {
        let users = PasswdUsers::from_content(
            "root:x:0:0::/root:/bin/bash\nuser:x:1000:1000::/home/user:/bin/bash",
        );

        assert_eq!(users.user_name(0).as_deref(), Some("root"));
        assert_eq!(users.user_name(1000).as_deref(), Some("user"));
        assert_eq!(users.user_name(9999), None);
        assert!(users.is_loaded());
    }

    #[test]
    fn test_passwd_skips_comments_and_broken_lines() {
        let users = PasswdUsers::from_content(
            "# local accounts\nroot:x:0:0:root:/root:/bin/bash\n\nbroken-line\nbad:x:notanumber:0::/:/bin/sh\n  daemon:x:1:1::/usr/sbin:/usr/sbin/nologin  \n",
        );

        assert_eq!(users.uid_to_name.len(), 2);
        assert_eq!(users.user_name(0).as_deref(), Some("root"));
        assert_eq!(users.user_name(1).as_deref(), Some("daemon"));
    }

    #[test]
    fn test_load_from_fs() {
        let fs = MockFs::typical_system();
        let users = PasswdUsers::load(&fs, Path::new("/etc/passwd"));
        assert_eq!(users.user_name(65534).as_deref(), Some("nobody"));
    }

    #[test]
    fn test_load_missing_file() {
        let users = PasswdUsers::load(&MockFs::new(), Path::new("/etc/passwd"));
        assert!(!users.is_loaded());
        assert_eq!(users.user_name(0), None);
    }
}
