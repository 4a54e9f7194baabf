//! Image payload storage.
//!
//! The exporter never touches the filesystem directly; it asks an
//! [`ImageStorage`] for the bytes behind an image's stored path.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// Source of binary image payloads.
pub trait ImageStorage {
    /// Read the raw bytes stored at `path`.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Display name for a stored path: the last path component.
    fn file_name<'p>(&self, path: &'p str) -> &'p str {
        base_name(path)
    }
}

impl<S: ImageStorage + ?Sized> ImageStorage for &S {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn file_name<'p>(&self, path: &'p str) -> &'p str {
        (**self).file_name(path)
    }
}

/// Strip directory components from a stored path.
///
/// Only `/` separates components; a `\` is part of the name. A path ending
/// in `/` has an empty base name.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Images stored as files below a media root directory.
#[derive(Debug, Clone)]
pub struct FsImageStorage {
    root: PathBuf,
}

impl FsImageStorage {
    /// Create a storage rooted at `root`. Relative stored paths are resolved
    /// against it; absolute ones are used as-is.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Full filesystem path for a stored path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl ImageStorage for FsImageStorage {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }
}

/// In-memory image storage, keyed by stored path.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStorage {
    images: HashMap<String, Vec<u8>>,
}

impl MemoryImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `path`, replacing anything already there.
    pub fn insert<P: Into<String>>(&mut self, path: P, data: Vec<u8>) {
        self.images.insert(path.into(), data);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageStorage for MemoryImageStorage {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.images.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no image stored at {path}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("exercise-images/12/pushup.png"), "pushup.png");
        assert_eq!(base_name("/srv/media/exercise-images/12/pushup.png"), "pushup.png");
        assert_eq!(base_name("pushup.png"), "pushup.png");
        assert_eq!(base_name("dir\\pushup.png"), "dir\\pushup.png");
        assert_eq!(base_name("exercise-images/1/a\\b.png"), "a\\b.png");
        assert_eq!(base_name("dir/"), "");
    }

    #[test]
    fn test_fs_storage_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("exercise-images/1")).unwrap();
        std::fs::write(dir.path().join("exercise-images/1/a.png"), [1u8, 2, 3]).unwrap();

        let storage = FsImageStorage::new(dir.path());
        assert_eq!(storage.read("exercise-images/1/a.png").unwrap(), vec![1, 2, 3]);
        assert_eq!(storage.file_name("exercise-images/1/a.png"), "a.png");
    }

    #[test]
    fn test_fs_storage_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsImageStorage::new(dir.path());
        let err = storage.read("missing.png").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryImageStorage::new();
        assert!(storage.is_empty());
        storage.insert("a/b.jpg", vec![0xff, 0xd8]);
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.read("a/b.jpg").unwrap(), vec![0xff, 0xd8]);
        assert!(storage.read("a/c.jpg").is_err());
    }
}
