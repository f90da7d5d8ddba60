mod file_system;
mod memory;
mod os;

pub use crate::file_system::{FileSystem, FsEntry};
pub use crate::memory::MemoryFileSystem;
pub use crate::os::OsFileSystem;
