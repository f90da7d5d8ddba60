use std::io;
use std::path::{Path, PathBuf};

/// A single directory entry returned by [`FileSystem::read_dir`].
#[derive(Debug, Clone)]
pub struct FsEntry {
  pub path: PathBuf,
  pub is_dir: bool,
}

/// The filesystem seam of the compiler. Everything the pipeline reads or
/// writes goes through this trait, which lets the whole build run against an
/// in-memory tree in tests.
pub trait FileSystem: Send + Sync {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  /// Writes `content`, creating missing parent directories.
  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  fn remove_file(&self, path: &Path) -> io::Result<()>;

  fn exists(&self, path: &Path) -> bool;

  fn is_file(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;

  /// Entries sorted by name so traversal order is stable across builds.
  fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>>;

  /// All files under `root`, depth first, in stable order.
  fn walk_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
      let mut subdirs = Vec::new();
      for entry in self.read_dir(&dir)? {
        if entry.is_dir {
          subdirs.push(entry.path);
        } else {
          files.push(entry.path);
        }
      }
      // Popped from the back, so push in reverse to keep name order.
      subdirs.reverse();
      pending.extend(subdirs);
    }
    files.sort();
    Ok(files)
  }
}
