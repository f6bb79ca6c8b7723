//! Idempotent schema output
//!
//! Write rules:
//! - target missing or different: `changed = true`, bytes are written
//! - target byte-identical: `changed = false`, write skipped unless forced
//! - dry run: never writes, `changed` still reported

use std::fs;
use std::io;
use std::path::Path;

/// How the output file may be touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WritePolicy {
    /// Compute the change status only
    pub dry_run: bool,
    /// Rewrite the file even when it is up to date
    pub force: bool,
}

impl WritePolicy {
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            force: false,
        }
    }

    pub fn forced() -> Self {
        Self {
            dry_run: false,
            force: true,
        }
    }
}

/// Result of an output attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Target was missing or its contents differ
    pub changed: bool,
    /// Bytes were written to the target
    pub written: bool,
}

/// Returns whether `path` is missing or holds bytes other than `bytes`.
pub fn output_changed(path: &Path, bytes: &[u8]) -> io::Result<bool> {
    match fs::read(path) {
        Ok(existing) => Ok(existing != bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e),
    }
}

/// Writes `bytes` to `path` according to `policy`.
///
/// I/O errors are returned as-is.
pub fn write_if_changed(path: &Path, bytes: &[u8], policy: WritePolicy) -> io::Result<WriteOutcome> {
    let changed = output_changed(path, bytes)?;
    let written = !policy.dry_run && (changed || policy.force);

    if written {
        fs::write(path, bytes)?;
    }

    Ok(WriteOutcome { changed, written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_target_is_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.sch");

        let outcome = write_if_changed(&path, b"<a/>", WritePolicy::default()).unwrap();
        assert_eq!(outcome, WriteOutcome { changed: true, written: true });
        assert_eq!(fs::read(&path).unwrap(), b"<a/>");
    }

    #[test]
    fn test_identical_target_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.sch");
        fs::write(&path, b"<a/>").unwrap();

        let outcome = write_if_changed(&path, b"<a/>", WritePolicy::default()).unwrap();
        assert_eq!(outcome, WriteOutcome { changed: false, written: false });
    }

    #[test]
    fn test_force_rewrites_identical_target() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.sch");
        fs::write(&path, b"<a/>").unwrap();

        let outcome = write_if_changed(&path, b"<a/>", WritePolicy::forced()).unwrap();
        assert_eq!(outcome, WriteOutcome { changed: false, written: true });
    }

    #[test]
    fn test_dry_run_never_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.sch");

        let outcome = write_if_changed(&path, b"<a/>", WritePolicy::dry_run()).unwrap();
        assert_eq!(outcome, WriteOutcome { changed: true, written: false });
        assert!(!path.exists());

        let policy = WritePolicy { dry_run: true, force: true };
        let outcome = write_if_changed(&path, b"<a/>", policy).unwrap();
        assert!(!outcome.written);
    }

    #[test]
    fn test_changed_contents_are_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.sch");
        fs::write(&path, b"<old/>").unwrap();

        let outcome = write_if_changed(&path, b"<new/>", WritePolicy::default()).unwrap();
        assert!(outcome.changed && outcome.written);
        assert_eq!(fs::read(&path).unwrap(), b"<new/>");
    }

    #[test]
    fn test_unwritable_target_propagates_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing_dir").join("out.sch");

        let err = write_if_changed(&path, b"<a/>", WritePolicy::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
