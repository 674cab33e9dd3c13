//! Directory validation and single-level enumeration

use super::types::DirectoryEntry;
use anyhow::{Context, Result, bail};
use std::error::Error as StdError;
use std::io::{self, ErrorKind};
use std::path::Path;
use walkdir::WalkDir;

/// Make sure `path` is an existing, readable directory.
pub fn validate_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{:?} does not exist.", path);
    }
    if !path.is_dir() {
        bail!("{:?} is not a directory", path);
    }
    std::fs::read_dir(path).with_context(|| format!("cannot open directory {:?}", path))?;
    Ok(())
}

/// Immediate entries of `path`, in the order the OS yields them.
///
/// Entries that fail with permission-denied are skipped without being
/// reported; any other enumeration error is returned to the caller.
pub fn entries(path: &Path) -> impl Iterator<Item = Result<DirectoryEntry>> + '_ {
    WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(move |entry| {
            admit(entry, path).map(|entry| entry.map(|e| DirectoryEntry::new(e.into_path())))
        })
}

/// Decide what happens to one enumeration result: pass it through, drop it
/// (permission denied) or turn it into a fatal error.
fn admit<T, E>(item: std::result::Result<T, E>, path: &Path) -> Option<Result<T>>
where
    E: StdError + Send + Sync + 'static,
{
    match item {
        Ok(value) => Some(Ok(value)),
        Err(err) if is_permission_denied(&err) => {
            tracing::trace!("Skipping inaccessible entry: {}", err);
            None
        }
        Err(err) => {
            Some(Err(err).with_context(|| format!("Error enumerating {}", path.display())))
        }
    }
}

fn is_permission_denied(err: &(dyn StdError + 'static)) -> bool {
    std::iter::successors(Some(err), |&e| e.source())
        .filter_map(|e| e.downcast_ref::<io::Error>())
        .any(|io| io.kind() == ErrorKind::PermissionDenied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let err = validate_directory(&temp_dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let err = validate_directory(&file).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_validate_directory_ok() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_directory(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_entries_are_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("b.js"), "b").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("sub").join("deep.txt"), "c").unwrap();

        let mut names: Vec<String> = entries(temp_dir.path())
            .map(|entry| {
                entry
                    .unwrap()
                    .path()
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.txt", "b.js", "sub"]);
    }

    #[test]
    fn test_entries_of_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(entries(temp_dir.path()).count(), 0);
    }

    #[test]
    fn test_permission_denied_entry_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let denied: std::result::Result<(), io::Error> =
            Err(io::Error::from(ErrorKind::PermissionDenied));
        assert!(admit(denied, temp_dir.path()).is_none());
    }

    #[test]
    fn test_other_enumeration_error_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let broken: std::result::Result<(), io::Error> =
            Err(io::Error::other("device went away"));

        let err = admit(broken, temp_dir.path()).unwrap().unwrap_err();
        assert!(err.to_string().contains("Error enumerating"));
        assert!(format!("{err:#}").contains("device went away"));
    }

    #[test]
    fn test_wrapped_permission_denied_is_skipped() {
        #[derive(Debug)]
        struct Wrapped(io::Error);

        impl std::fmt::Display for Wrapped {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "walk failed")
            }
        }

        impl StdError for Wrapped {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.0)
            }
        }

        let temp_dir = TempDir::new().unwrap();
        let denied: std::result::Result<(), Wrapped> =
            Err(Wrapped(io::Error::from(ErrorKind::PermissionDenied)));
        assert!(admit(denied, temp_dir.path()).is_none());
    }

    #[test]
    fn test_successful_entry_passes_through() {
        let temp_dir = TempDir::new().unwrap();
        let ok: std::result::Result<u8, io::Error> = Ok(7);
        assert_eq!(admit(ok, temp_dir.path()).unwrap().unwrap(), 7);
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = validate_directory(&locked);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("cannot open directory"));
    }
}
