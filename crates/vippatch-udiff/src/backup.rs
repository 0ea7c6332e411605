//! Pre-patch backup creation.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PatchError, Result};

/// Number of backup names tried before giving up (`.bak` through `.bak999`).
const MAX_BACKUPS: usize = 999;

/// Copy `target` to the first free name among `<target>.bak`,
/// `<target>.bak2`, ... `<target>.bak999`.
///
/// An existing backup is never overwritten; the next free suffix is used
/// instead. Returns the path of the backup that was written.
pub fn create_backup(target: &Path) -> Result<PathBuf> {
    for i in 1..=MAX_BACKUPS {
        let postfix = if i == 1 {
            ".bak".to_string()
        } else {
            format!(".bak{i}")
        };
        let mut name = OsString::from(target.as_os_str());
        name.push(&postfix);
        let backup = PathBuf::from(name);

        if backup.exists() {
            continue;
        }

        fs::copy(target, &backup)?;
        debug!(backup = %backup.display(), "created backup");
        return Ok(backup);
    }

    Err(PatchError::BackupExhausted(MAX_BACKUPS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_backup_uses_bare_bak_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("test.sv");
        fs::write(&target, "package test;\nendpackage\n").unwrap();

        let backup = create_backup(&target).unwrap();

        assert_eq!(backup, dir.path().join("test.sv.bak"));
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            "package test;\nendpackage\n"
        );
    }

    #[test]
    fn test_repeated_backups_count_upward_without_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("test.sv");
        fs::write(&target, "v1\n").unwrap();

        create_backup(&target).unwrap();
        fs::write(&target, "v2\n").unwrap();
        create_backup(&target).unwrap();
        fs::write(&target, "v3\n").unwrap();
        create_backup(&target).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("test.sv.bak")).unwrap(),
            "v1\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("test.sv.bak2")).unwrap(),
            "v2\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("test.sv.bak3")).unwrap(),
            "v3\n"
        );
    }

    #[test]
    fn test_skips_over_existing_gap_free_names() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("test.sv");
        fs::write(&target, "content\n").unwrap();
        fs::write(dir.path().join("test.sv.bak"), "old\n").unwrap();
        fs::write(dir.path().join("test.sv.bak2"), "older\n").unwrap();

        let backup = create_backup(&target).unwrap();

        assert_eq!(backup, dir.path().join("test.sv.bak3"));
        assert_eq!(
            fs::read_to_string(dir.path().join("test.sv.bak")).unwrap(),
            "old\n"
        );
    }
}
