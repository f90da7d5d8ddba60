use std::io;
use std::path::Path;

use crate::file_system::{FileSystem, FsEntry};

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
  }

  fn remove_file(&self, path: &Path) -> io::Result<()> {
    std::fs::remove_file(path)
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn is_file(&self, path: &Path) -> bool {
    path.is_file()
  }

  fn is_dir(&self, path: &Path) -> bool {
    path.is_dir()
  }

  fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(path)? {
      let entry = entry?;
      entries.push(FsEntry { is_dir: entry.file_type()?.is_dir(), path: entry.path() });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
  }
}

#[test]
fn test_os_walk_files() {
  let dir = std::env::temp_dir().join("wxpack_fs_os_walk");
  let _ = std::fs::remove_dir_all(&dir);
  OsFileSystem.write(&dir.join("b/two.txt"), b"2").unwrap();
  OsFileSystem.write(&dir.join("a/one.txt"), b"1").unwrap();

  let files = OsFileSystem.walk_files(&dir).unwrap();
  let names = files.iter().map(|p| p.file_name().unwrap().to_string_lossy()).collect::<Vec<_>>();
  assert_eq!(names, ["one.txt", "two.txt"]);

  let _ = std::fs::remove_dir_all(&dir);
}
