//! Filesystem checks.

use std::fs;
use std::io;
use std::panic::Location;
use std::path::Path;

use super::Assertion;
use crate::failure::Failure;
use crate::tester::Tester;

impl<T: Tester> Assertion<T> {
    /// Checks that `path` exists.
    #[track_caller]
    pub fn file_exists(&self, path: impl AsRef<Path>) -> &Self {
        let at = Location::caller();
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(_) => self.check(true, || Failure::at("file_exists", at)),
            Err(e) => self.check(false, || {
                Failure::at("file_exists", at)
                    .detail("path", path.display())
                    .detail("err", e)
            }),
        }
    }

    /// Checks that `path` does not exist.
    ///
    /// Errors other than "not found" fail the check.
    #[track_caller]
    pub fn file_not_exists(&self, path: impl AsRef<Path>) -> &Self {
        let at = Location::caller();
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(_) => self.check(false, || {
                Failure::at("file_not_exists", at).detail("path", path.display())
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.check(true, || Failure::at("file_not_exists", at))
            }
            Err(e) => self.check(false, || {
                Failure::at("file_not_exists", at)
                    .detail("path", path.display())
                    .detail("err", e)
            }),
        }
    }

    /// Checks that `path` is a directory.
    #[track_caller]
    pub fn is_dir(&self, path: impl AsRef<Path>) -> &Self {
        self.dir_check("is_dir", Location::caller(), path.as_ref(), true)
    }

    /// Checks that `path` exists and is not a directory.
    ///
    /// A path that cannot be read fails the check.
    #[track_caller]
    pub fn is_not_dir(&self, path: impl AsRef<Path>) -> &Self {
        self.dir_check("is_not_dir", Location::caller(), path.as_ref(), false)
    }

    fn dir_check(
        &self,
        action: &'static str,
        at: &'static Location<'static>,
        path: &Path,
        want_dir: bool,
    ) -> &Self {
        match fs::metadata(path) {
            Ok(meta) => self.check(meta.is_dir() == want_dir, || {
                Failure::at(action, at).detail("path", path.display())
            }),
            Err(e) => self.check(false, || {
                Failure::at(action, at)
                    .detail("path", path.display())
                    .detail("err", e)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Assertion, SoftTester};

    #[test]
    fn test_existing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.txt");
        std::fs::write(&file, "x").unwrap();

        Assertion::new()
            .file_exists(&file)
            .file_exists(dir.path())
            .is_dir(dir.path())
            .is_not_dir(&file)
            .file_not_exists(dir.path().join("missing"));
    }

    #[test]
    fn test_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let a = Assertion::with_tester(SoftTester::new());
        a.file_exists(&missing)
            .is_dir(&missing)
            .is_not_dir(&missing)
            .file_not_exists(dir.path());
        let failures = a.tester().take_failures();
        assert_eq!(failures.len(), 4);
        assert!(failures[0].starts_with("file_exists failed"));
        assert!(failures[2].starts_with("is_not_dir failed"));
    }
}
