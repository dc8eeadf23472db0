use crate::error::{EngineError, Result};
use crate::notifier::Notifier;
use crate::path_security::sanitize_directory;
use crate::record::WorkingSet;
use crate::report::{Outcomes, Stage};
use std::path::Path;

/// List the regular files directly inside `dir`, sorted by name.
///
/// Symlinks count when they resolve to a regular file. Subdirectories and
/// special files are left out and never descended into.
///
/// # Errors
/// Returns [`EngineError::DirectoryAccess`] if `dir` is missing, is not a
/// directory or cannot be read.
pub fn enumerate_files(dir: &Path, notifier: &dyn Notifier) -> Result<(WorkingSet, Outcomes)> {
    let dir = sanitize_directory(dir)?;
    let access_error = |source: std::io::Error| EngineError::DirectoryAccess {
        path: dir.clone(),
        source,
    };

    let mut outcomes = Outcomes::default();
    let mut names = Vec::new();

    for entry in std::fs::read_dir(&dir).map_err(access_error)? {
        let entry = entry.map_err(access_error)?;
        let file_name = entry.file_name();

        // Follows symlinks, like a plain `stat`.
        let is_file = std::fs::metadata(entry.path()).is_ok_and(|m| m.is_file());
        if !is_file {
            notifier.debug(&format!(
                "{}: skipped, reason: not a regular file",
                file_name.to_string_lossy()
            ));
            continue;
        }

        match file_name.into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                let shown = raw.to_string_lossy().into_owned();
                notifier.warn(&format!("{shown}: skipped, reason: non UTF-8 file name"));
                outcomes.skip(Stage::Enumerate, &shown, "non UTF-8 file name");
            }
        }
    }

    names.sort_unstable();
    notifier.info(&format!(
        "found {} file(s) in {}",
        names.len(),
        dir.display()
    ));
    for name in &names {
        notifier.debug(&format!("{name}: enumerated"));
    }

    Ok((WorkingSet::from_names(names), outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::MemoryNotifier;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_regular_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("sub.txt")).unwrap();
        fs::write(temp.path().join("sub.txt").join("nested.txt"), "n").unwrap();

        let notifier = MemoryNotifier::new();
        let (set, outcomes) = enumerate_files(temp.path(), &notifier).unwrap();

        assert_eq!(set.names(), vec!["a.txt", "b.txt"]);
        assert!(outcomes.skipped.is_empty());
        assert!(notifier.contains(log::Level::Debug, "sub.txt: skipped"));
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let (set, _) = enumerate_files(temp.path(), &MemoryNotifier::new()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = enumerate_files(&temp.path().join("gone"), &MemoryNotifier::new()).unwrap_err();
        assert!(matches!(err, EngineError::DirectoryAccess { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_follow_their_target() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("real.txt"), "r").unwrap();
        fs::create_dir(temp.path().join("dir")).unwrap();
        symlink(temp.path().join("real.txt"), temp.path().join("link.txt")).unwrap();
        symlink(temp.path().join("dir"), temp.path().join("dirlink")).unwrap();
        symlink(temp.path().join("nowhere"), temp.path().join("dangling")).unwrap();

        let (set, _) = enumerate_files(temp.path(), &MemoryNotifier::new()).unwrap();
        assert_eq!(set.names(), vec!["link.txt", "real.txt"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_reported() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(OsStr::from_bytes(b"bad\xff.txt")), "x").unwrap();
        fs::write(temp.path().join("good.txt"), "x").unwrap();

        let notifier = MemoryNotifier::new();
        let (set, outcomes) = enumerate_files(temp.path(), &notifier).unwrap();
        assert_eq!(set.names(), vec!["good.txt"]);
        assert_eq!(outcomes.skipped.len(), 1);
        assert_eq!(outcomes.skipped[0].stage, Stage::Enumerate);
        assert!(notifier.contains(log::Level::Warn, "non UTF-8"));
    }
}
