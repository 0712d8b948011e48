//! Atomic replacement of a destination file.
//!
//! The finished archive is built in a temporary file next to the destination
//! and renamed over it, so readers observe either the old file or the new
//! one, never a partially written one.

use std::fs::File;
use std::io;
use std::path::Path;
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, warn};

/// Move `temp` onto `destination`, replacing any existing file.
///
/// Uses a same-filesystem rename. If the platform refuses to rename `temp`
/// there, its bytes are copied into a second temporary file in the
/// destination's directory, which is then renamed into place. On any failure
/// both temporary files are removed and `destination` is left as it was.
pub fn replace(temp: TempPath, destination: &Path) -> io::Result<()> {
    match temp.persist(destination) {
        Ok(()) => {
            debug!(
                target: "oxicbz::write",
                destination = %destination.display(),
                "replaced destination"
            );
            Ok(())
        }
        Err(err) if rename_unsupported(&err.error) => {
            warn!(
                target: "oxicbz::write",
                destination = %destination.display(),
                error = %err.error,
                "rename unsupported, copying beside destination"
            );
            let temp = err.path;
            copy_beside(&temp, destination)?;
            temp.close()
        }
        Err(err) => Err(err.error),
    }
}

/// Copy `source` into a temporary file next to `destination` and rename it
/// over `destination`.
fn copy_beside(source: &Path, destination: &Path) -> io::Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut sibling = NamedTempFile::new_in(dir)?;
    io::copy(&mut File::open(source)?, sibling.as_file_mut())?;
    sibling.as_file().sync_all()?;
    sibling.persist(destination).map_err(|err| err.error)?;
    Ok(())
}

fn rename_unsupported(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::CrossesDevices | io::ErrorKind::Unsupported
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn temp_with(dir: &Path, data: &[u8]) -> TempPath {
        let mut file = tempfile::NamedTempFile::new_in(dir).unwrap();
        file.write_all(data).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn test_replace_creates_destination() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("book.cbz");
        let temp = temp_with(dir.path(), b"new");
        let temp_file = temp.to_path_buf();

        replace(temp, &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"new");
        assert!(!temp_file.exists());
    }

    #[test]
    fn test_replace_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("book.cbz");
        fs::write(&destination, b"old contents").unwrap();

        replace(temp_with(dir.path(), b"new"), &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"new");
    }

    fn names_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_copy_beside_replaces_from_other_directory() {
        let source_dir = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("book.cbz");
        fs::write(&destination, b"old contents").unwrap();
        let source = source_dir.path().join("staged.tmp");
        fs::write(&source, b"new").unwrap();

        copy_beside(&source, &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"new");
        assert_eq!(names_in(dir.path()), ["book.cbz"]);
    }

    #[test]
    fn test_failed_copy_beside_leaves_destination() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("book.cbz");
        fs::write(&destination, b"old contents").unwrap();

        let missing = dir.path().join("gone.tmp");
        assert!(copy_beside(&missing, &destination).is_err());
        assert_eq!(fs::read(&destination).unwrap(), b"old contents");
        assert_eq!(names_in(dir.path()), ["book.cbz"]);
    }

    #[test]
    fn test_failed_replace_removes_temp() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("missing-dir").join("book.cbz");
        let temp = temp_with(dir.path(), b"new");
        let temp_file = temp.to_path_buf();

        assert!(replace(temp, &destination).is_err());
        assert!(!temp_file.exists());
        assert!(!destination.exists());
    }
}
