use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use vfs::{MemoryFS, VfsPath};

use crate::file_system::{FileSystem, FsEntry};

/// [`FileSystem`] backed by an in-memory `vfs` tree. Paths are interpreted
/// as absolute slash paths rooted at the tree root, so test fixtures can use
/// the same layout the compiler sees in production.
#[derive(Clone)]
pub struct MemoryFileSystem {
  root: VfsPath,
}

fn to_io<T>(result: Result<T, vfs::VfsError>) -> io::Result<T> {
  result.map_err(|error| io::Error::new(io::ErrorKind::Other, error.to_string()))
}

impl MemoryFileSystem {
  pub fn new() -> Self {
    Self { root: VfsPath::new(MemoryFS::new()) }
  }

  fn vpath(&self, path: &Path) -> io::Result<VfsPath> {
    let slashed = path.to_string_lossy().replace('\\', "/");
    to_io(self.root.join(slashed.trim_start_matches('/')))
  }
}

impl Default for MemoryFileSystem {
  fn default() -> Self {
    Self::new()
  }
}

impl FileSystem for MemoryFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    let mut content = Vec::new();
    to_io(self.vpath(path)?.open_file())?.read_to_end(&mut content)?;
    Ok(content)
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    to_io(self.vpath(path)?.read_to_string())
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
      self.create_dir_all(parent)?;
    }
    let mut file = to_io(self.vpath(path)?.create_file())?;
    file.write_all(content)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    to_io(self.vpath(path)?.create_dir_all())
  }

  fn remove_file(&self, path: &Path) -> io::Result<()> {
    to_io(self.vpath(path)?.remove_file())
  }

  fn exists(&self, path: &Path) -> bool {
    self.vpath(path).and_then(|p| to_io(p.exists())).unwrap_or(false)
  }

  fn is_file(&self, path: &Path) -> bool {
    self.vpath(path).and_then(|p| to_io(p.is_file())).unwrap_or(false)
  }

  fn is_dir(&self, path: &Path) -> bool {
    self.vpath(path).and_then(|p| to_io(p.is_dir())).unwrap_or(false)
  }

  fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
    let dir = self.vpath(path)?;
    let mut entries = Vec::new();
    for child in to_io(dir.read_dir())? {
      entries.push(FsEntry {
        is_dir: to_io(child.is_dir())?,
        path: PathBuf::from(child.as_str()),
      });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
  }
}

#[test]
fn test_memory_round_trip() {
  let fs = MemoryFileSystem::new();
  fs.write(Path::new("/src/pages/index.js"), b"module.exports = 1;").unwrap();

  assert!(fs.is_file(Path::new("/src/pages/index.js")));
  assert!(fs.is_dir(Path::new("/src/pages")));
  assert_eq!(fs.read_to_string(Path::new("/src/pages/index.js")).unwrap(), "module.exports = 1;");
}

#[test]
fn test_memory_walk_is_sorted() {
  let fs = MemoryFileSystem::new();
  fs.write(Path::new("/src/b.js"), b"").unwrap();
  fs.write(Path::new("/src/a/nested.js"), b"").unwrap();
  fs.write(Path::new("/src/a.js"), b"").unwrap();

  let files = fs.walk_files(Path::new("/src")).unwrap();
  let files = files.iter().map(|p| p.to_string_lossy().into_owned()).collect::<Vec<_>>();
  // `PathBuf` ordering is component-wise, so the `a` directory sorts before `a.js`.
  assert_eq!(files, ["/src/a/nested.js", "/src/a.js", "/src/b.js"]);
}
