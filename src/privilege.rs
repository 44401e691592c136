//! Check for the privileges needed to rewrite the hosts file.

use std::io::ErrorKind;
use std::path::Path;

/// Whether the current process may modify `hosts_path`.
///
/// Superuser always passes. Otherwise the file is opened for append without
/// writing: success means writable, `PermissionDenied` means not. Any other
/// failure is inconclusive and treated as privileged, leaving the real write
/// to report the problem.
pub fn has_admin_privileges(hosts_path: &Path) -> bool {
    if crate::platform::is_superuser() {
        return true;
    }
    match std::fs::OpenOptions::new().append(true).open(hosts_path) {
        Ok(_) => true,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            tracing::debug!(path = %hosts_path.display(), "hosts file not writable");
            false
        }
        Err(e) => {
            tracing::debug!(path = %hosts_path.display(), error = %e, "privilege probe inconclusive");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writable_file_counts_as_privileged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "127.0.0.1 localhost\n").unwrap();
        assert!(has_admin_privileges(&path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "127.0.0.1 localhost\n");
    }

    #[test]
    fn missing_file_is_inconclusive_and_assumed_privileged() {
        let dir = tempfile::tempdir().unwrap();
        assert!(has_admin_privileges(&dir.path().join("nope")));
    }

    #[cfg(unix)]
    #[test]
    fn read_only_file_is_not_privileged_for_regular_user() {
        use std::os::unix::fs::PermissionsExt;
        if crate::platform::is_superuser() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();
        assert!(!has_admin_privileges(&path));
    }
}
