//! Atomic replacement of sitemap files

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Write `contents` to `path` so that readers only ever see the old file or
/// the complete new one
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over the target.
pub fn write_atomically(path: &Path, contents: &[u8]) -> AppResult<u64> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| AppError::output(path, e))?;

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| AppError::output(path, e))?;
    staged
        .write_all(contents)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| AppError::output(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staged.path(), fs::Permissions::from_mode(0o644))
            .map_err(|e| AppError::output(path, e))?;
    }

    debug!("Renaming {} over {}", staged.path().display(), path.display());
    staged
        .persist(path)
        .map_err(|e| AppError::output(path, e.error))?;

    Ok(contents.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        let written = write_atomically(&path, b"<urlset/>").unwrap();
        assert_eq!(written, 9);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<urlset/>");
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, "old contents that are longer than the new ones").unwrap();
        write_atomically(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("public").join("sitemap.xml");
        write_atomically(&path, b"x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_target_is_output_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inner"), "x").unwrap();
        let err = write_atomically(&path, b"x").unwrap_err();
        assert!(matches!(err, AppError::Output { .. }));
    }
}
